//! The move-restriction predicate.
//!
//! Restrictions only ever prune the mating side's candidate moves; defender
//! replies are never filtered (the tablebase must refute all of them). A move
//! is allowed iff none of the configured filters rejects it.
//!
//! The `allowing`-family filters and `excludeToCapturable` judge a move by the
//! opponent's legal replies, so they provisionally play the move on a clone of
//! the position before scanning replies.

use shakmaty::{Bitboard, Chess, Color, Move, Position, Square};

use crate::options::{InputError, Options};
use crate::position;

/// Immutable filter configuration, compiled once from [`Options`].
#[derive(Debug, Clone)]
pub struct MoveFilter {
    pub mating_side: Color,
    pub exclude_moves: Vec<String>,
    pub exclude_sans: Vec<String>,
    pub exclude_from: Bitboard,
    pub exclude_to: Bitboard,
    pub exclude_captures: bool,
    pub exclude_captures_of: String,
    pub exclude_to_attacked: bool,
    pub exclude_to_capturable: bool,
    pub exclude_promotion_to: String,
    pub exclude_allowing_capture: bool,
    pub exclude_allowing_from: Bitboard,
    pub exclude_allowing_to: Bitboard,
    pub exclude_allowing_moves: Vec<String>,
    pub exclude_allowing_sans: Vec<String>,
}

fn split_tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn parse_squares(s: &str) -> Result<Bitboard, InputError> {
    let mut bb = Bitboard::EMPTY;
    for token in s.split_whitespace() {
        let sq: Square = token.parse().map_err(|_| InputError::BadSquare {
            token: token.to_string(),
        })?;
        bb |= Bitboard::from(sq);
    }
    Ok(bb)
}

impl MoveFilter {
    /// A filter with no restrictions configured.
    pub fn new(mating_side: Color) -> Self {
        MoveFilter {
            mating_side,
            exclude_moves: Vec::new(),
            exclude_sans: Vec::new(),
            exclude_from: Bitboard::EMPTY,
            exclude_to: Bitboard::EMPTY,
            exclude_captures: false,
            exclude_captures_of: String::new(),
            exclude_to_attacked: false,
            exclude_to_capturable: false,
            exclude_promotion_to: String::new(),
            exclude_allowing_capture: false,
            exclude_allowing_from: Bitboard::EMPTY,
            exclude_allowing_to: Bitboard::EMPTY,
            exclude_allowing_moves: Vec::new(),
            exclude_allowing_sans: Vec::new(),
        }
    }

    pub fn from_options(options: &Options, mating_side: Color) -> Result<Self, InputError> {
        Ok(MoveFilter {
            mating_side,
            exclude_moves: split_tokens(&options.exclude_moves),
            exclude_sans: split_tokens(&options.exclude_sans),
            exclude_from: parse_squares(&options.exclude_from)?,
            exclude_to: parse_squares(&options.exclude_to)?,
            exclude_captures: options.exclude_captures,
            exclude_captures_of: options.exclude_captures_of.clone(),
            exclude_to_attacked: options.exclude_to_attacked,
            exclude_to_capturable: options.exclude_to_capturable,
            exclude_promotion_to: options.exclude_promotion_to.clone(),
            exclude_allowing_capture: options.exclude_allowing_capture,
            exclude_allowing_from: parse_squares(&options.exclude_allowing_from)?,
            exclude_allowing_to: parse_squares(&options.exclude_allowing_to)?,
            exclude_allowing_moves: split_tokens(&options.exclude_allowing_moves),
            exclude_allowing_sans: split_tokens(&options.exclude_allowing_sans),
        })
    }

    /// Whether any filter needs the opponent's replies to the candidate move.
    fn needs_replies(&self) -> bool {
        self.exclude_to_capturable
            || self.exclude_allowing_capture
            || !self.exclude_allowing_from.is_empty()
            || !self.exclude_allowing_to.is_empty()
            || !self.exclude_allowing_moves.is_empty()
            || !self.exclude_allowing_sans.is_empty()
    }

    /// Whether the mating side may play `m` in `pos`.
    ///
    /// `pos` must be the pre-move position and `m` one of its legal moves.
    pub fn allowed(&self, pos: &Chess, m: &Move) -> bool {
        if pos.turn() != self.mating_side {
            return true;
        }
        let uci = position::uci(m);
        if self.exclude_moves.contains(&uci) {
            return false;
        }
        if !self.exclude_sans.is_empty() && self.exclude_sans.contains(&position::san(pos, m)) {
            return false;
        }
        if let Some(from) = m.from() {
            if self.exclude_from.contains(from) {
                return false;
            }
        }
        if self.exclude_to.contains(m.to()) {
            return false;
        }
        if self.exclude_captures {
            if m.is_capture() {
                return false;
            }
        } else if !self.exclude_captures_of.is_empty()
            && m.is_capture()
            && self.captures_excluded_piece(pos, m)
        {
            return false;
        }
        if self.exclude_to_attacked && is_attacked_by(pos, m.to(), !pos.turn()) {
            return false;
        }
        if !self.exclude_promotion_to.is_empty() {
            if let Some(role) = m.promotion() {
                if self.exclude_promotion_to.contains(role.char()) {
                    return false;
                }
            }
        }
        if self.needs_replies() {
            let mut after = pos.clone();
            after.play_unchecked(m);
            for reply in &after.legal_moves() {
                if self.reply_rejects(&after, m, reply) {
                    return false;
                }
            }
        }
        true
    }

    fn captures_excluded_piece(&self, pos: &Chess, m: &Move) -> bool {
        // En-passant targets an empty square; no piece letter to match there.
        pos.board()
            .piece_at(m.to())
            .is_some_and(|p| self.exclude_captures_of.contains(p.role.char()))
    }

    fn reply_rejects(&self, after: &Chess, m: &Move, reply: &Move) -> bool {
        if self.exclude_to_capturable && reply.is_capture() && reply.to() == m.to() {
            return true;
        }
        if self.exclude_allowing_capture && reply.is_capture() {
            return true;
        }
        if let Some(from) = reply.from() {
            if self.exclude_allowing_from.contains(from) {
                return true;
            }
        }
        if self.exclude_allowing_to.contains(reply.to()) {
            return true;
        }
        if !self.exclude_allowing_moves.is_empty()
            && self.exclude_allowing_moves.contains(&position::uci(reply))
        {
            return true;
        }
        if !self.exclude_allowing_sans.is_empty()
            && self.exclude_allowing_sans.contains(&position::san(after, reply))
        {
            return true;
        }
        false
    }
}

fn is_attacked_by(pos: &Chess, sq: Square, attacker: Color) -> bool {
    let board = pos.board();
    !board.attacks_to(sq, attacker, board.occupied()).is_empty()
}
