//! Phase 1: breadth-first enumeration of the allowed game tree.

use std::sync::atomic::{AtomicI16, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;
use shakmaty::Position;

use crate::index::PositionId;
use crate::position::{self, PackedPosition};
use crate::score::{Score, MATE};

use super::MateTb;

impl MateTb {
    /// Expand the position graph from the root, level by level, deduplicating
    /// through the index. Frontier duplicates are tolerated; the atomic
    /// insert at the next level drops them.
    pub(super) fn enumerate(&mut self, pool: &ThreadPool) {
        let tic = Instant::now();
        info!("Create the allowed part of the game tree ...");

        let mate_seeds: Mutex<Vec<(PositionId, Score)>> = Mutex::new(Vec::new());
        let mut frontier = vec![position::encode(&self.root)];
        let mut depth: u32 = 0;

        while !frontier.is_empty() && depth <= self.max_depth {
            // Nodes inserted at the depth limit are not expanded further.
            let expand = depth < self.max_depth;
            let batch = (frontier.len() / (self.concurrency * 8)).max(128);
            let next: Mutex<Vec<PackedPosition>> = Mutex::new(Vec::new());

            pool.install(|| {
                frontier.par_chunks(batch).for_each(|chunk| {
                    let mut local_next = Vec::new();
                    let mut local_seeds = Vec::new();
                    for packed in chunk {
                        let (inserted, id) = self.index.insert_if_absent(*packed);
                        if !inserted {
                            continue;
                        }
                        if (id + 1) % 10000 == 0 {
                            debug!("Progress: {} (d{})", id + 1, depth);
                        }
                        let pos = position::decode(packed);
                        if pos.legal_moves().is_empty() {
                            // Checkmate seeds the retrograde pass; stalemate
                            // stays unresolved.
                            if pos.is_check() {
                                local_seeds.push((id, -MATE));
                            }
                            continue;
                        }
                        if !expand {
                            continue;
                        }
                        for m in self.candidate_moves(&pos) {
                            let mut child = pos.clone();
                            child.play_unchecked(&m);
                            local_next.push(position::encode(&child));
                        }
                    }
                    if !local_seeds.is_empty() {
                        mate_seeds
                            .lock()
                            .expect("seed list poisoned")
                            .extend(local_seeds);
                    }
                    if !local_next.is_empty() {
                        next.lock().expect("frontier poisoned").extend(local_next);
                    }
                });
            });

            frontier = next.into_inner().expect("frontier poisoned");
            depth += 1;
        }

        let count = self.index.len();
        info!(
            "Found {} positions to depth {} in {:.2}s",
            count,
            depth.saturating_sub(1),
            tic.elapsed().as_secs_f64()
        );

        self.scores = (0..count).map(|_| AtomicI16::new(0)).collect();
        self.children = vec![Vec::new(); count];
        for (id, score) in mate_seeds.into_inner().expect("seed list poisoned") {
            self.scores[id as usize].store(score, Ordering::Relaxed);
        }
    }
}
