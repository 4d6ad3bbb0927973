//! Probing, principal-variation extraction, and reporting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::atomic::Ordering;

use shakmaty::{Chess, Move, Position};

use crate::book::cdb_link;
use crate::position;
use crate::score::{propagate, score2mate, Score, NONE};

use super::MateTb;

impl MateTb {
    /// Table score of a position, [`NONE`] if it was never explored.
    pub fn probe(&self, pos: &Chess) -> Score {
        match self.index.find(&position::encode(pos)) {
            Some(id) => self.scores[id as usize].load(Ordering::Relaxed),
            None => NONE,
        }
    }

    /// Score of `m` from the mover's perspective, probed from the position
    /// after the move.
    fn move_score(&self, pos: &Chess, m: &Move) -> (Score, Chess) {
        let mut child = pos.clone();
        child.play_unchecked(m);
        let mut score = self.probe(&child);
        if score != NONE && score != 0 {
            score = propagate(score);
        }
        (score, child)
    }

    /// Walk the table greedily from `pos`, always picking the best-scoring
    /// move, until the game is drawn by rule or the table runs out.
    pub fn obtain_pv(&self, pos: &Chess) -> Vec<String> {
        if pos.halfmoves() >= 100 && !pos.is_checkmate() {
            if pos.turn() != self.mating_side {
                return vec!["; draw by 50mr".to_string()];
            }
            return Vec::new();
        }
        if matches!(pos.outcome(), Some(outcome) if outcome.winner().is_none()) {
            return Vec::new();
        }

        let mut best: Option<(Score, Move, Chess)> = None;
        for m in &pos.legal_moves() {
            let (score, child) = self.move_score(pos, m);
            let better = match &best {
                None => true,
                Some((best_score, _, _)) => sort_key(score) > sort_key(*best_score),
            };
            if better {
                best = Some((score, m.clone(), child));
            }
        }
        let Some((_, best_move, child)) = best else {
            return Vec::new();
        };

        let mut pv = vec![position::uci(&best_move)];
        pv.extend(self.obtain_pv(&child));
        pv
    }

    /// Print the best line, and at `verbose >= 1` the full MultiPV list.
    pub fn output(&self) {
        let mut lines: Vec<(Score, Vec<String>)> = Vec::new();
        for m in &self.root.legal_moves() {
            let (score, child) = self.move_score(&self.root, m);
            let mut pv = if score != NONE && score != 0 {
                self.obtain_pv(&child)
            } else {
                Vec::new()
            };
            pv.insert(0, position::uci(m));
            lines.push((score, pv));
        }
        lines.sort_by(|a, b| sort_key(b.0).cmp(&sort_key(a.0)));

        match lines.first() {
            Some(&(score, ref pv)) if score != NONE && score != 0 => {
                println!("\nMatetrack:");
                println!(
                    "{} bm #{}; PV: {};",
                    self.root_pos,
                    score2mate(score),
                    pv.join(" ")
                );
            }
            _ => println!("No mate found."),
        }

        if self.verbose == 0 {
            return;
        }
        println!("\nMultiPV:");
        for (rank, (score, pv)) in lines.iter().enumerate() {
            if *score == NONE {
                println!("multipv {} score None", rank + 1);
                continue;
            }
            let mut score_str = format!("cp {score}");
            if *score != 0 {
                score_str += &format!(" mate {}", score2mate(*score));
            }
            let mut pv_str = pv.join(" ");
            if pv_str.ends_with(';') {
                pv_str.pop();
            }
            println!("multipv {} score {} pv {}", rank + 1, score_str, pv_str);
            if self.verbose >= 2 {
                println!("{}\n", cdb_link(&self.root_pos, &pv_str));
            }
        }
    }

    /// Dump every explored position as `<FEN without clocks>[ bm #<n>;]`.
    pub fn write_tb(&self, filename: &str) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(filename)?);
        for (id, packed) in self.index.dense_keys().iter().enumerate() {
            let fen = position::epd(&position::decode(packed));
            let score = self.scores[id].load(Ordering::Relaxed);
            if score != 0 {
                writeln!(out, "{fen} bm #{};", score2mate(score))?;
            } else {
                writeln!(out, "{fen}")?;
            }
        }
        out.flush()?;
        println!("Wrote TB to {filename}.");
        Ok(())
    }
}

/// Ordering key treating [`NONE`] as worse than any real score.
fn sort_key(score: Score) -> i32 {
    if score == NONE {
        i32::MIN
    } else {
        i32::from(score)
    }
}
