//! Phase 3: retrograde fixed-point scoring.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::info;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::score::{propagate, NONE};

use super::MateTb;

impl MateTb {
    /// Sweep the table from the highest ids down, pulling every node's score
    /// up to the best propagated child score, until a full pass changes
    /// nothing.
    ///
    /// Score reads and writes are relaxed atomics: a stale read can only
    /// defer a true update to the next pass, and the pass counter is an
    /// atomic add, so a pass that did any work can never signal convergence.
    pub(super) fn solve(&mut self, pool: &ThreadPool) {
        let tic = Instant::now();
        info!("Generate tablebase ...");

        let n = self.children.len();
        let batch = (n / (self.concurrency * 32)).max(128);
        let mut ranges = Vec::new();
        let mut end = n;
        while end > 0 {
            let start = end.saturating_sub(batch);
            ranges.push(start..end);
            end = start;
        }

        let scores = &self.scores;
        let children = &self.children;
        let mut iteration = 0usize;
        loop {
            let changed = AtomicUsize::new(0);
            pool.install(|| {
                ranges.par_iter().for_each(|range| {
                    let mut batch_changed = 0usize;
                    for id in range.clone().rev() {
                        let mut best = NONE;
                        for &child in &children[id] {
                            let score = propagate(scores[child as usize].load(Ordering::Relaxed));
                            if best == NONE || score > best {
                                best = score;
                            }
                        }
                        if best != NONE && scores[id].load(Ordering::Relaxed) != best {
                            scores[id].store(best, Ordering::Relaxed);
                            batch_changed += 1;
                        }
                    }
                    if batch_changed > 0 {
                        changed.fetch_add(batch_changed, Ordering::Relaxed);
                    }
                });
            });
            iteration += 1;
            let changed = changed.into_inner();
            info!("Iteration {iteration}, changed {changed:9} scores");
            if changed == 0 {
                break;
            }
        }

        info!(
            "Tablebase generated with {} iterations in {:.2}s",
            iteration,
            tic.elapsed().as_secs_f64()
        );
    }
}
