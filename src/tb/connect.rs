//! Phase 2: connect every explored non-terminal node to its explored
//! successors.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;
use shakmaty::Position;

use crate::position;

use super::MateTb;

impl MateTb {
    /// Fill the children vectors. Each task owns exactly one node's slot, so
    /// no locking is needed; successors that were never enumerated are simply
    /// not edges.
    pub(super) fn connect(&mut self, pool: &ThreadPool) {
        let tic = Instant::now();
        info!("Connect child nodes ...");

        let keys = self.index.dense_keys();
        let dim = keys.len();
        let index = &self.index;
        let scores = &self.scores;
        let done = AtomicUsize::new(0);

        pool.install(|| {
            self.children
                .par_iter_mut()
                .enumerate()
                .for_each(|(id, children)| {
                    // Mate nodes keep an empty child list.
                    if scores[id].load(Ordering::Relaxed) == 0 {
                        let pos = position::decode(&keys[id]);
                        for m in &pos.legal_moves() {
                            let mut child = pos.clone();
                            child.play_unchecked(m);
                            if let Some(child_id) = index.find(&position::encode(&child)) {
                                children.push(child_id);
                            }
                        }
                    }
                    let count = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 10000 == 0 {
                        debug!("Progress: {count}/{dim}");
                    }
                });
        });

        info!(
            "Connected {} positions in {:.2}s",
            dim,
            tic.elapsed().as_secs_f64()
        );
    }
}
