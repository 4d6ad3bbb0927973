//! The restricted-tree mate tablebase.
//!
//! Construction runs three bulk-parallel phases with a barrier between them:
//!
//! 1. enumerate: breadth-first expansion of the allowed game tree,
//!    deduplicated through the sharded index; terminals are seeded with
//!    `-MATE`.
//! 2. connect: attach to every non-terminal node the ids of its legal
//!    successors that were explored.
//! 3. solve: retrograde fixed-point propagation of mate distances until a
//!    full pass changes nothing.
//!
//! After that the table is read-only; probing, PV extraction and reporting
//! are in the `pv` submodule.

mod connect;
mod enumerate;
mod pv;
mod solve;

use std::sync::atomic::{AtomicI16, Ordering};

use log::info;
use shakmaty::{Chess, Color, Position};

use crate::book::{self, OpeningBook};
use crate::index::{PositionId, ShardedIndex};
use crate::options::{InputError, Options};
use crate::position::{self, PackedPosition};
use crate::restrict::MoveFilter;
use crate::score::Score;

pub struct MateTb {
    root: Chess,
    /// Root EPD exactly as given (parts 1-4), used for reports and links.
    root_pos: String,
    mating_side: Color,
    filter: MoveFilter,
    book: OpeningBook,
    max_depth: u32,
    concurrency: usize,
    verbose: u32,
    index: ShardedIndex,
    scores: Vec<AtomicI16>,
    children: Vec<Vec<PositionId>>,
}

impl MateTb {
    pub fn new(options: &Options) -> Result<Self, InputError> {
        let parts: Vec<&str> = options.epd.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(InputError::EpdTooShort {
                epd: options.epd.clone(),
            });
        }
        let root_pos = parts[..4].join(" ");
        let root = position::parse_fen(&root_pos).map_err(|reason| InputError::BadRootPosition {
            epd: options.epd.clone(),
            reason,
        })?;

        let mut mating_side = if parts[1] == "b" {
            Color::Black
        } else {
            Color::White
        };
        // A negative best-mate annotation means the side to move gets mated.
        for pair in parts[4..].windows(2) {
            if pair[0] == "bm" && pair[1].contains("#-") {
                mating_side = !mating_side;
                break;
            }
        }
        println!(
            "Restrict moves for {} side.",
            if mating_side == Color::White {
                "WHITE"
            } else {
                "BLACK"
            }
        );

        let filter = MoveFilter::from_options(options, mating_side)?;

        let book = if options.opening_moves.is_empty() {
            OpeningBook::default()
        } else {
            println!("Preparing the opening book ...");
            let book = book::compile(
                &root,
                &root_pos,
                mating_side,
                &options.opening_moves,
                options.verbose,
            )?;
            println!(
                "Done. The opening book contains {} positions/moves.",
                book.len()
            );
            if options.verbose >= 4 {
                dump_book(&book);
            }
            book
        };

        Ok(MateTb {
            root,
            root_pos,
            mating_side,
            filter,
            book,
            max_depth: options.depth.unwrap_or(u32::MAX),
            concurrency: options.concurrency().max(1),
            verbose: options.verbose,
            index: ShardedIndex::new(),
            scores: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Run all three construction phases.
    pub fn create(&mut self) {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .build()
            .expect("worker pool spawns");
        self.enumerate(&pool);
        self.connect(&pool);
        self.solve(&pool);
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn mating_side(&self) -> Color {
        self.mating_side
    }

    pub fn root(&self) -> &Chess {
        &self.root
    }

    pub fn find(&self, pos: &Chess) -> Option<PositionId> {
        self.index.find(&position::encode(pos))
    }

    pub fn score(&self, id: PositionId) -> Score {
        self.scores[id as usize].load(Ordering::Relaxed)
    }

    pub fn children_of(&self, id: PositionId) -> &[PositionId] {
        &self.children[id as usize]
    }

    /// The explored positions in id order.
    pub fn dense_keys(&self) -> Vec<PackedPosition> {
        self.index.dense_keys()
    }

    /// The candidate moves of `pos` under the book and the move filter, in
    /// legal-move-generation order.
    fn candidate_moves(&self, pos: &Chess) -> Vec<shakmaty::Move> {
        let only_move = if self.book.is_empty() {
            None
        } else {
            self.book.get(&position::epd(pos))
        };
        if let Some(uci) = only_move {
            if self.verbose >= 3 {
                info!("Picked move {} for {}.", uci, position::epd(pos));
            }
        }
        pos.legal_moves()
            .iter()
            .filter(|m| match only_move {
                Some(uci) => position::uci(m) == *uci,
                None => self.filter.allowed(pos, m),
            })
            .cloned()
            .collect()
    }
}

fn dump_book(book: &OpeningBook) {
    let entries: Vec<String> = book
        .iter()
        .map(|(fen, uci)| format!("{fen}: {uci}"))
        .collect();
    println!("Opening book: {}", entries.join(", "));
}
