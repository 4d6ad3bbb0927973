//! Canonical compact position encoding and notation helpers.
//!
//! Position identity deliberately excludes the halfmove and fullmove clocks:
//! two positions differing only in clocks are one entity, otherwise the
//! explored set would explode with 50-move-rule duplicates. The 24-byte
//! [`PackedPosition`] is the hash key everywhere; textual FEN appears only at
//! interfaces (opening book keys, the table dump, reports).
//!
//! Packing scheme: the occupancy bitboard (8 bytes, little endian) followed by
//! one nibble per occupied square in ascending square order (16 bytes, padded
//! with zeros). Nibbles 0-11 are white/black pawn..king; the remaining codes
//! fold the non-placement state into the placement:
//!
//! - `12`: a pawn that may be captured en passant (color and the en-passant
//!   target square follow from its rank)
//! - `13`/`14`: a white/black rook that still has castling rights
//! - `15`: the black king when black is to move

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, Piece, Position,
    Role, Setup, Square,
};

/// Compact fixed-width position key, clocks excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedPosition(pub [u8; 24]);

const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Encode a position into its canonical 24-byte key.
pub fn encode(pos: &Chess) -> PackedPosition {
    let board = pos.board();
    let occupied = board.occupied();

    let mut bytes = [0u8; 24];
    bytes[..8].copy_from_slice(&occupied.0.to_le_bytes());

    let castling = pos.castles().castling_rights();
    // Only a legally capturable en-passant pawn is part of the identity.
    let ep_pawn = pos.ep_square(EnPassantMode::Legal).map(|ep| {
        let delta = if u32::from(ep.rank()) == 2 { 8 } else { -8 };
        ep.offset(delta).expect("en-passant pawn square on the board")
    });

    let mut nibble = 0usize;
    for sq in occupied {
        let piece = board.piece_at(sq).expect("occupied square holds a piece");
        let code: u8 = if ep_pawn == Some(sq) {
            12
        } else if piece.role == Role::Rook && castling.contains(sq) {
            if piece.color.is_white() {
                13
            } else {
                14
            }
        } else if piece.role == Role::King && piece.color.is_black() && pos.turn().is_black() {
            15
        } else {
            (piece.role as u8 - 1) + if piece.color.is_white() { 0 } else { 6 }
        };
        bytes[8 + nibble / 2] |= code << (4 * (nibble % 2));
        nibble += 1;
    }

    PackedPosition(bytes)
}

/// Decode a packed key back into a position (clocks reset).
pub fn decode(packed: &PackedPosition) -> Chess {
    let bytes = &packed.0;
    let occupied = Bitboard(u64::from_le_bytes(
        bytes[..8].try_into().expect("occupancy prefix is 8 bytes"),
    ));

    let mut board = Board::empty();
    let mut castling_rights = Bitboard::EMPTY;
    let mut ep_square = None;
    let mut turn = Color::White;

    let mut nibble = 0usize;
    for sq in occupied {
        let code = (bytes[8 + nibble / 2] >> (4 * (nibble % 2))) & 0xf;
        nibble += 1;
        let piece = match code {
            0..=11 => Piece {
                color: if code < 6 { Color::White } else { Color::Black },
                role: ROLES[(code % 6) as usize],
            },
            12 => {
                // A white pawn just double-pushed to the fourth rank, a black
                // one to the fifth.
                if u32::from(sq.rank()) == 3 {
                    ep_square = sq.offset(-8);
                    Piece {
                        color: Color::White,
                        role: Role::Pawn,
                    }
                } else {
                    ep_square = sq.offset(8);
                    Piece {
                        color: Color::Black,
                        role: Role::Pawn,
                    }
                }
            }
            13 | 14 => {
                castling_rights |= Bitboard::from(sq);
                Piece {
                    color: if code == 13 {
                        Color::White
                    } else {
                        Color::Black
                    },
                    role: Role::Rook,
                }
            }
            15 => {
                turn = Color::Black;
                Piece {
                    color: Color::Black,
                    role: Role::King,
                }
            }
            _ => unreachable!("nibble codes are 4-bit"),
        };
        board.set_piece_at(sq, piece);
    }

    let setup = Setup {
        board,
        turn,
        castling_rights,
        ep_square,
        ..Setup::empty()
    };
    Chess::from_setup(setup, CastlingMode::Standard)
        .expect("packed keys only ever hold reachable positions")
}

/// FEN without the halfmove/fullmove clocks (parts 1-4).
pub fn epd(pos: &Chess) -> String {
    let board = pos.board();
    let rights = pos.castles().castling_rights();
    let mut castling = String::new();
    for (sq, letter) in [
        (Square::H1, 'K'),
        (Square::A1, 'Q'),
        (Square::H8, 'k'),
        (Square::A8, 'q'),
    ] {
        if rights.contains(sq) {
            castling.push(letter);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }
    let ep = match pos.ep_square(EnPassantMode::Legal) {
        Some(sq) => sq.to_string(),
        None => "-".to_string(),
    };
    format!(
        "{} {} {} {}",
        board.board_fen(Bitboard::EMPTY),
        if pos.turn().is_white() { "w" } else { "b" },
        castling,
        ep
    )
}

/// Parse a FEN or EPD prefix (parts 1-4) into a position.
pub fn parse_fen(fen: &str) -> Result<Chess, String> {
    let padded = if fen.split_whitespace().count() < 6 {
        format!("{fen} 0 1")
    } else {
        fen.to_string()
    };
    let parsed: Fen = padded.parse().map_err(|e| format!("{e}"))?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| format!("{e}"))
}

/// Coordinate notation of a move.
pub fn uci(m: &Move) -> String {
    m.to_uci(CastlingMode::Standard).to_string()
}

/// Standard algebraic notation, with check/mate suffix.
pub fn san(pos: &Chess, m: &Move) -> String {
    SanPlus::from_move(pos.clone(), m).to_string()
}
