//! Opening-book compilation.
//!
//! A book forces the mating side's move in every position it covers; while a
//! position is covered, all other move restrictions are bypassed. Books are
//! compiled once from comma-separated UCI lines and consulted read-only
//! during enumeration.

use log::debug;
use rustc_hash::FxHashMap;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Color, Position};

use crate::options::InputError;
use crate::position;

/// FEN (without clocks) of a mating-side position, mapped to the only
/// move allowed there.
pub type OpeningBook = FxHashMap<String, String>;

pub fn cdb_link(root_pos: &str, pv: &str) -> String {
    format!("https://chessdb.cn/queryc_en/?{root_pos} moves {pv}").replace(' ', "_")
}

/// Compile `lines_spec` into a book.
///
/// Each comma-separated line is a whitespace-separated UCI sequence from the
/// root and may contain at most one `*` placeholder, which expands to every
/// legal defender reply at that point (skipping replies some earlier line
/// already prescribes a continuation for).
pub fn compile(
    root: &Chess,
    root_pos: &str,
    mating_side: Color,
    lines_spec: &str,
    verbose: u32,
) -> Result<OpeningBook, InputError> {
    let mut lines: Vec<Vec<String>> = Vec::new();

    for line in lines_spec.split(',') {
        let stars = line.matches('*').count();
        if stars > 1 {
            return Err(InputError::MultiplePlaceholders {
                line: line.to_string(),
            });
        }
        if stars == 0 {
            lines.push(tokens(line));
            continue;
        }

        let (before, after) = line.split_once('*').expect("line contains a placeholder");
        let pre = tokens(before);
        let post = tokens(after);

        let mut board = root.clone();
        for m in &pre {
            let mv = parse_legal(&board, m)?;
            board.play_unchecked(&mv);
        }
        for reply in &board.legal_moves() {
            let reply_uci = position::uci(reply);
            let already_present = lines.iter().any(|existing| {
                existing.len() > pre.len()
                    && existing[..pre.len()] == pre[..]
                    && existing[pre.len()] == reply_uci
            });
            if already_present {
                continue;
            }
            let mut expanded = pre.clone();
            expanded.push(reply_uci);
            expanded.extend(post.iter().cloned());
            lines.push(expanded);
        }
    }

    let mut book = OpeningBook::default();
    for moves in &lines {
        if verbose >= 3 {
            let pv = moves.join(" ");
            println!("Processing line {pv} ...");
            if verbose >= 4 {
                println!("{}", cdb_link(root_pos, &pv));
            }
        }
        let mut board = root.clone();
        for move_str in moves {
            if board.turn() == mating_side {
                let fen = position::epd(&board);
                match book.get(&fen) {
                    Some(existing) if existing != move_str => {
                        return Err(InputError::ConflictingBookMoves {
                            fen,
                            first: existing.clone(),
                            second: move_str.clone(),
                        });
                    }
                    _ => {
                        book.insert(fen, move_str.clone());
                    }
                }
            }
            let mv = parse_legal(&board, move_str)?;
            board.play_unchecked(&mv);
        }
    }

    debug!("Compiled {} book lines", lines.len());
    Ok(book)
}

fn tokens(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn parse_legal(board: &Chess, move_str: &str) -> Result<shakmaty::Move, InputError> {
    let illegal = || InputError::IllegalBookMove {
        uci: move_str.to_string(),
        fen: position::epd(board),
    };
    let uci: UciMove = move_str.parse().map_err(|_| illegal())?;
    uci.to_move(board).map_err(|_| illegal())
}
