use matebound::book::compile;
use matebound::options::InputError;
use matebound::position::{epd, parse_fen};
use shakmaty::{Color, Position};

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

#[test]
fn straight_line_records_only_mating_side_positions() {
    let root = parse_fen(START).expect("valid FEN");
    let book = compile(&root, START, Color::White, "e2e4 e7e5 g1f3", 0).expect("valid book");

    assert_eq!(book.len(), 2);
    assert_eq!(book.get(&epd(&root)).map(String::as_str), Some("e2e4"));

    let mut board = root.clone();
    for m in ["e2e4", "e7e5"] {
        let mv = m
            .parse::<shakmaty::uci::UciMove>()
            .unwrap()
            .to_move(&board)
            .unwrap();
        board.play_unchecked(&mv);
    }
    assert_eq!(book.get(&epd(&board)).map(String::as_str), Some("g1f3"));
}

#[test]
fn placeholder_expands_to_every_defender_reply() {
    let root = parse_fen(START).expect("valid FEN");
    let book = compile(&root, START, Color::White, "e2e4 * d2d4", 0).expect("valid book");

    // The root entry plus one entry per legal black reply to e2e4.
    assert_eq!(book.len(), 21);
}

#[test]
fn placeholder_skips_replies_an_earlier_line_already_covers() {
    let root = parse_fen(START).expect("valid FEN");
    let book = compile(
        &root,
        START,
        Color::White,
        "e2e4 e7e5 g1f3, e2e4 * g1f3",
        0,
    )
    .expect("valid book");

    // e7e5 keeps its explicit continuation; the other 19 replies expand.
    assert_eq!(book.len(), 21);
}

#[test]
fn conflicting_moves_for_one_position_are_fatal() {
    let root = parse_fen(START).expect("valid FEN");
    let err = compile(
        &root,
        START,
        Color::White,
        "e2e4 e7e5 g1f3, e2e4 e7e5 f1c4",
        0,
    )
    .expect_err("conflict must be detected");
    assert!(matches!(err, InputError::ConflictingBookMoves { .. }));
}

#[test]
fn more_than_one_placeholder_is_fatal() {
    let root = parse_fen(START).expect("valid FEN");
    let err = compile(&root, START, Color::White, "e2e4 * e7e5 * g1f3", 0)
        .expect_err("double placeholder must be rejected");
    assert!(matches!(err, InputError::MultiplePlaceholders { .. }));
}

#[test]
fn illegal_moves_in_a_line_are_fatal() {
    let root = parse_fen(START).expect("valid FEN");
    let err = compile(&root, START, Color::White, "e2e5", 0).expect_err("e2e5 is not legal");
    assert!(matches!(err, InputError::IllegalBookMove { .. }));
}

#[test]
fn black_as_mating_side_records_black_positions() {
    let root = parse_fen(START).expect("valid FEN");
    let book = compile(&root, START, Color::Black, "e2e4 e7e5 g1f3", 0).expect("valid book");

    // Only the position after e2e4 has black to move.
    assert_eq!(book.len(), 1);
    let mut board = root.clone();
    let mv = "e2e4"
        .parse::<shakmaty::uci::UciMove>()
        .unwrap()
        .to_move(&board)
        .unwrap();
    board.play_unchecked(&mv);
    assert_eq!(book.get(&epd(&board)).map(String::as_str), Some("e7e5"));
}
