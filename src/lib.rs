//! # matebound
//!
//! Prove an *upper bound* on the length of a forced mate by building a
//! custom, position-restricted retrograde tablebase over a pruned game tree.
//!
//! ## Architecture
//!
//! The crate is structured as layered components:
//!
//! - [`score`]: mate-distance score arithmetic (`propagate`, `score2mate`).
//! - [`position`]: canonical 24-byte compact position keys (clocks excluded)
//!   and notation helpers over the chess rule engine.
//! - [`restrict`]: the move-restriction predicate that prunes the mating
//!   side's candidate moves.
//! - [`book`]: opening-book compilation; a book entry forces a single move
//!   and bypasses all other restrictions for that position.
//! - [`index`]: the sharded concurrent map from compact position to dense
//!   node id.
//! - [`tb`]: the tablebase itself: breadth-first enumeration, child-edge
//!   connection, retrograde fixed-point scoring, and probe/PV/reporting.
//! - [`options`] / [`presets`]: command line surface and built-in restriction
//!   presets for known study positions.
//!
//! The result is an upper bound: if the restrictions prune the truly best
//! moves, the proven mate is longer than optimal, but it is still a proof
//! of a forced mate.

pub mod book;
pub mod index;
pub mod options;
pub mod position;
pub mod presets;
pub mod restrict;
pub mod score;
pub mod tb;
