use clap::Parser;
use matebound::options::Options;
use matebound::position::{decode, encode, epd};
use matebound::score::{propagate, score2mate, MATE, NONE};
use matebound::tb::MateTb;
use shakmaty::Position;

fn build(args: &[&str]) -> MateTb {
    let mut argv = vec!["matebound"];
    argv.extend_from_slice(args);
    let options = Options::parse_from(argv);
    let mut tb = MateTb::new(&options).expect("valid test options");
    tb.create();
    tb
}

#[test]
fn depth_zero_explores_only_the_root() {
    let tb = build(&["--epd", "8/8/7p/5K1k/R7/8/8/8 w - -", "--depth", "0"]);
    assert_eq!(tb.len(), 1);
    assert_eq!(tb.score(0), 0);
    assert!(tb.children_of(0).is_empty());
    assert_eq!(tb.probe(tb.root()), 0);
}

#[test]
fn stalemate_root_stays_unresolved() {
    // White to move has no legal move and is not in check.
    let tb = build(&["--epd", "8/8/8/8/8/5k2/5p2/5K2 w - -"]);
    assert_eq!(tb.len(), 1);
    assert_eq!(tb.probe(tb.root()), 0);
    assert!(tb.children_of(0).is_empty());
}

#[test]
fn checkmated_root_is_a_terminal() {
    let tb = build(&["--epd", "6Qk/5K2/8/8/8/8/8/8 b - -"]);
    assert_eq!(tb.len(), 1);
    assert_eq!(tb.probe(tb.root()), -MATE);
    assert!(tb.children_of(0).is_empty());
    assert_eq!(score2mate(tb.probe(tb.root())), 0);
}

#[test]
fn mate_in_one_is_found_at_depth_one() {
    let tb = build(&["--epd", "7k/8/5K2/8/8/8/8/6Q1 w - -", "--depth", "1"]);
    assert_eq!(score2mate(tb.probe(tb.root())), 1);
    assert_eq!(tb.obtain_pv(tb.root()), vec!["g1g7".to_string()]);
}

#[test]
fn probing_an_unexplored_position_returns_none() {
    let tb = build(&["--epd", "7k/8/5K2/8/8/8/8/6Q1 w - -", "--depth", "0"]);
    let elsewhere =
        matebound::position::parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .expect("valid FEN");
    assert_eq!(tb.probe(&elsewhere), NONE);
}

/// Walk the whole table and check the structural and scoring invariants.
fn assert_invariants(tb: &MateTb) {
    let keys = tb.dense_keys();
    assert_eq!(keys.len(), tb.len());

    for (id, key) in keys.iter().enumerate() {
        let id = id as u32;
        let pos = decode(key);
        assert_eq!(&encode(&pos), key, "key roundtrip for id {id}");

        let score = tb.score(id);
        assert_ne!(score, NONE, "NONE must never be stored");

        let children = tb.children_of(id);
        if pos.legal_moves().is_empty() {
            // Checkmates store -MATE, stalemates stay unresolved; neither
            // gains edges.
            let expected = if pos.is_checkmate() { -MATE } else { 0 };
            assert_eq!(score, expected, "terminal encoding of id {id}");
            assert!(children.is_empty(), "terminal id {id} has children");
            continue;
        }
        assert_ne!(score, -MATE, "non-terminal id {id} stores -MATE");

        // Children are exactly the explored legal successors, in
        // move-generation order.
        let mut expected = Vec::new();
        for m in &pos.legal_moves() {
            let mut child = pos.clone();
            child.play_unchecked(m);
            if let Some(child_id) = tb.find(&child) {
                expected.push(child_id);
            }
        }
        assert_eq!(children, &expected[..], "children of id {id}");
        for &child in children {
            assert!((child as usize) < keys.len());
        }

        // At the fixed point every score equals the best propagated child
        // score; a second pass would change nothing.
        let mut best = NONE;
        for &child in children {
            let propagated = propagate(tb.score(child));
            if best == NONE || propagated > best {
                best = propagated;
            }
        }
        if best != NONE {
            assert_eq!(score, best, "score of id {id} is not converged");
        } else {
            assert_eq!(score, 0, "childless non-terminal id {id} must stay 0");
        }
    }
}

#[test]
fn invariants_hold_after_construction() {
    let tb = build(&[
        "--epd",
        "8/8/7p/5K1k/R7/8/8/8 w - -",
        "--excludeAllowingCapture",
        "--excludeAllowingMoves",
        "h2h1q",
        "--depth",
        "11",
    ]);
    assert_invariants(&tb);
    assert_eq!(score2mate(tb.probe(tb.root())), 6);
}

#[test]
fn final_scores_do_not_depend_on_concurrency() {
    let args = [
        "--epd",
        "8/8/7p/5K1k/R7/8/8/8 w - -",
        "--excludeAllowingCapture",
        "--excludeAllowingMoves",
        "h2h1q",
        "--depth",
        "11",
    ];
    let serial = build(&[&args[..], &["--concurrency", "1"][..]].concat());
    let parallel = build(&[&args[..], &["--concurrency", "4"][..]].concat());

    assert_eq!(serial.len(), parallel.len());

    let mut serial_scores: Vec<(String, i16)> = serial
        .dense_keys()
        .iter()
        .enumerate()
        .map(|(id, key)| (epd(&decode(key)), serial.score(id as u32)))
        .collect();
    let mut parallel_scores: Vec<(String, i16)> = parallel
        .dense_keys()
        .iter()
        .enumerate()
        .map(|(id, key)| (epd(&decode(key)), parallel.score(id as u32)))
        .collect();
    serial_scores.sort();
    parallel_scores.sort();
    assert_eq!(serial_scores, parallel_scores);
}

#[test]
fn dump_lists_every_position_and_annotates_mates() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("matebound_dump_{}.epd", std::process::id()));
    let path = path.to_str().expect("utf-8 temp path");

    let tb = build(&["--epd", "7k/8/5K2/8/8/8/8/6Q1 w - -", "--depth", "1"]);
    tb.write_tb(path).expect("dump written");

    let dump = std::fs::read_to_string(path).expect("dump readable");
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), tb.len());
    let root_line = lines
        .iter()
        .find(|l| l.starts_with("7k/8/5K2/8/8/8/8/6Q1 w - -"))
        .expect("root line present");
    assert!(root_line.ends_with("bm #1;"), "got {root_line}");

    std::fs::remove_file(path).ok();
}
