use matebound::score::{propagate, score2mate, Score, MATE, NONE};

#[test]
fn propagate_keeps_zero_at_zero() {
    assert_eq!(propagate(0), 0);
}

#[test]
fn propagate_flips_sign_and_shortens_by_one_ply() {
    assert_eq!(propagate(-MATE), MATE - 1);
    assert_eq!(propagate(MATE - 1), -(MATE - 2));
    assert_eq!(propagate(-(MATE - 2)), MATE - 3);
}

#[test]
fn propagate_twice_moves_two_plies_toward_zero() {
    for s in [MATE, MATE - 1, MATE - 57, 1234, 2, -2, -999, -(MATE - 4), -MATE] {
        let sign: Score = if s > 0 { 1 } else { -1 };
        assert_eq!(propagate(propagate(s)), s - 2 * sign, "s = {s}");
    }
}

#[test]
fn score2mate_counts_full_moves() {
    // Mating side: mate in k moves is encoded as MATE - (2k - 1).
    for k in 1..=(MATE / 2) {
        assert_eq!(score2mate(MATE - (2 * k - 1)), k);
    }
    // Defending side: mated in k moves is encoded as -(MATE - 2k).
    for k in 1..(MATE / 2) {
        assert_eq!(score2mate(-(MATE - 2 * k)), -k);
    }
}

#[test]
fn score2mate_of_terminal_and_unresolved() {
    // A checkmate node is "mated in 0".
    assert_eq!(score2mate(-MATE), 0);
    assert_eq!(score2mate(0), NONE);
}

#[test]
fn propagation_chain_from_terminal() {
    // checkmate -> mate in 1 -> mated in 1 -> mate in 2 -> ...
    let mut score = -MATE;
    for k in 1..=20 {
        score = propagate(score);
        assert_eq!(score2mate(score), k);
        score = propagate(score);
        assert_eq!(score2mate(score), -k);
    }
}
