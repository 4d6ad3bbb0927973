//! Mate-distance score arithmetic.
//!
//! Scores are always from the side-to-move's point of view:
//! - `0`: unresolved (drawn or no mate proven within the explored tree)
//! - `+m`: side to move mates in `(MATE - m + 1) / 2` moves
//! - `-m`: side to move is mated in `(MATE + m) / 2` moves
//! - [`NONE`]: no information; used only at the probe/PV boundary, never
//!   stored in the table

/// Table score. 16-bit on purpose: score writes stay word-sized and atomic.
pub type Score = i16;

pub const MATE: Score = 30000;
pub const NONE: Score = 30001;

/// Translate a successor's score into the parent's perspective.
///
/// Mate scores flip sign and move one ply closer to zero; `0` stays `0`.
#[inline]
pub fn propagate(score: Score) -> Score {
    match score {
        0 => 0,
        s if s > 0 => -s + 1,
        s => -s - 1,
    }
}

/// Full-move count until mate is delivered (positive) or received (negative),
/// or [`NONE`] for a non-mate score.
#[inline]
pub fn score2mate(score: Score) -> Score {
    if score > 0 {
        (MATE - score + 1) / 2
    } else if score < 0 {
        -(MATE + score) / 2
    } else {
        NONE
    }
}
