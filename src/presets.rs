//! Built-in restriction presets for known study positions.
//!
//! For a number of well-known mate studies the right restriction flags are
//! documented here, keyed by the EPD prefix. Presets fill the options only
//! when the user gave no restriction or book flag of their own, so explicit
//! flags always win. Some of the harder entries are known to need restrictions
//! this tool cannot express yet; those print an advisory warning.

use crate::options::Options;

/// Fill restriction options for known EPDs.
pub fn apply(options: &mut Options) {
    if options.has_restrictions() {
        return;
    }

    let parts: Vec<&str> = options.epd.split_whitespace().take(4).collect();
    if parts.len() < 4 {
        return;
    }
    let epd = parts.join(" ");

    match epd.as_str() {
        // bm #6
        "8/8/7p/5K1k/R7/8/8/8 w - -" => {
            options.exclude_allowing_capture = true;
            options.exclude_allowing_moves = "h2h1q".to_string();
            if options.depth.is_none() {
                options.depth = Some(11);
            }
        }
        // bm #7
        "8/4p2p/8/8/8/8/6p1/2B1K1kb w - -" => {
            options.exclude_allowing_capture = true;
            options.exclude_allowing_from = "g1".to_string();
            options.exclude_allowing_moves = "e6e5 e5e4".to_string();
        }
        // bm #7
        "8/8/7P/8/pp6/kp6/1p6/1Kb5 w - -" => {
            options.exclude_from = "b1".to_string();
            options.exclude_captures = true;
            options.exclude_promotion_to = "qrb".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #7
        "8/6Q1/8/7k/8/6p1/6p1/6Kb w - -" | "8/8/8/8/Q7/5kp1/6p1/6Kb w - -" => {
            options.exclude_from = "g1".to_string();
            options.exclude_to_capturable = true;
            if options.depth.is_none() {
                options.depth = Some(13);
            }
        }
        // bm #8
        "8/3Q4/8/1r6/kp6/bp6/1p6/1K6 w - -" => {
            options.exclude_from = "b1".to_string();
            options.exclude_to = "b3".to_string();
            options.exclude_to_capturable = true;
            if options.depth.is_none() {
                options.depth = Some(15);
            }
        }
        // bm #11
        "k7/2Q5/8/2p5/1pp5/1pp5/prp5/nbK5 w - -" => {
            options.exclude_from = "c1".to_string();
            options.exclude_to = "b2".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #12
        "8/2P5/8/8/8/1p2k1p1/1p1pppp1/1Kbrqbrn w - -" => {
            options.opening_moves = "c7c8q".to_string();
            options.exclude_from = "b1".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #13
        "8/8/1p6/1p6/1p6/1p6/pppbK3/rbk3N1 w - -" => {
            options.exclude_from = "e2".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #7 / bm #15
        "8/8/8/6r1/8/6B1/p1p5/k1Kb4 w - -" | "k7/8/1Qp5/2p5/2p5/6p1/2p1ppp1/2Kbrqrn w - -" => {
            options.exclude_from = "c1".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #26
        "k7/8/1Q6/8/8/6p1/1p1pppp1/1Kbrqbrn w - -" => {
            options.exclude_from = "b1".to_string();
            options.exclude_to_capturable = true;
        }
        // bm #9 / #12 / #18
        "8/8/8/8/6k1/8/2Qp1pp1/3Kbrrb w - -"
        | "8/3Q4/8/2kp4/8/1p1p4/pp1p4/rrbK4 w - -"
        | "6k1/8/8/8/8/3Q4/3p1pp1/3Kbrrb w - -" => {
            options.exclude_from = "d1".to_string();
            options.exclude_allowing_capture = true;
        }
        // bm #-35 / bm #36
        "8/8/8/1p6/6k1/1Q6/p1p1p3/rbrbK3 b - -" | "8/8/8/1p6/6k1/1p2Q3/p1p1p3/rbrbK3 w - -" => {
            options.exclude_from = "e1".to_string();
            options.exclude_to = "a1 c1".to_string();
            options.exclude_to_attacked = true;
        }
        // bm #43
        "7k/8/5p2/8/8/8/P1Kp1pp1/4brrb w - -" => {
            options.opening_moves = "c2d1".to_string();
            options.exclude_from = "d1".to_string();
            options.exclude_to_attacked = true;
        }
        // bm #46
        "8/1p6/8/3p3k/3p4/6Q1/pp1p4/rrbK4 w - -" => {
            options.exclude_from = "d1".to_string();
            options.exclude_captures = true;
            options.exclude_to_attacked = true;
        }
        // bm #12 / #16 / #22 / #50
        "6Q1/8/7k/8/8/6p1/4p1pb/4Kbrr w - -"
        | "2Q5/k7/8/8/8/8/1pp1p3/brrbK3 w - -"
        | "8/8/3p4/1Q6/8/2k5/ppp1p3/brrbK3 w - -"
        | "8/1p2k3/8/8/5Q2/8/ppp1p3/qrrbK3 w - -"
        | "8/1p2k3/8/8/5Q2/8/ppp1p3/bqrbK3 w - -" => {
            options.exclude_from = "e1".to_string();
            options.exclude_allowing_capture = true;
        }
        // bm #54
        "8/7p/7p/7p/1p3Q1p/1Kp5/nppr4/qrk5 w - -" => {
            options.exclude_from = "b3".to_string();
            options.exclude_allowing_capture = true;
            options.exclude_allowing_from = "b1 h1".to_string();
            options.exclude_allowing_moves = "c3c2".to_string();
        }
        // bm #20 / #32 / #69
        "4R3/1n1p4/3n4/8/8/p4p2/7p/5K1k w - -"
        | "4R3/1n1p1p2/3n4/8/8/p4p2/7p/5K1k w - -"
        | "4R3/pn1p1p1p/p2n4/8/8/p4p2/7p/5K1k w - -" => {
            options.opening_moves =
                "e8e1 d6e4 e1e4 f3f2 f1f2 * e4e1, e8e1 d6e4 e1e4 * e4e1, e8e1 * f1f2".to_string();
            options.exclude_sans = "Ra2 Ra3 Ra4 Ra5 Ra6 Ra7 Ra8 \
                                    Rb2 Rb3 Rb4 Rb5 Rb6 Rb7 Rb8 \
                                    Rc2 Rc3 Rc4 Rc5 Rc6 Rc7 Rc8 \
                                    Rd2 Rd3 Rd4 Rd5 Rd6 Rd7 Rd8 \
                                    Re2 Re3 Re4 Re5 Re6 Re7 Re8 \
                                    Rf2 Rf3 Rf4 Rf5 Rf6 Rf7 Rf8 \
                                    Rg2 Rg3 Rg4 Rg5 Rg6 Rg7 Rg8 \
                                    Rh2 Rh3 Rh4 Rh5 Rh6 Rh7 Rh8"
                .to_string();
            options.exclude_allowing_capture = true;
            options.exclude_allowing_from = "a1 d1 f1 h1".to_string();
        }
        // bm #72
        "8/1p4Pp/1p6/1p6/1p5p/5r1k/5p1p/5Kbr w - -" => {
            options.opening_moves = "g7g8q".to_string();
            options.exclude_from = "f1".to_string();
            options.exclude_to = "h1".to_string();
            options.exclude_allowing_capture = true;
            options.exclude_allowing_from = "b3 h5 h4".to_string();
        }
        // bm #7 / #27 / #87
        "8/8/8/8/NK6/1B1N4/2rpn1pp/2bk1brq w - -"
        | "8/7p/8/8/NK6/1B1N4/2rpn1pp/2bk1brq w - -"
        | "8/5ppp/5p2/8/NK6/1B1N4/2rpn1pp/2bk1brq w - -" => {
            options.exclude_sans = "Nb6 Nb5 Nc4".to_string();
            options.exclude_from = "a4 b3 d3".to_string();
            options.exclude_allowing_capture = true;
            println!("\n!! WARNING: An engine may be needed (not implemented yet).\n");
        }
        // bm #10 / #22 / #120
        "8/p7/8/p7/b3Q3/K7/p1r5/rk6 w - -"
        | "8/p7/8/p7/b3Q3/K6p/p1r5/rk6 w - -"
        | "8/p6p/7p/p6p/b3Q2p/K6p/p1r5/rk6 w - -" => {
            options.exclude_from = "a3".to_string();
            options.exclude_to = "a1".to_string();
            options.exclude_allowing_capture = true;
            options.exclude_allowing_from = "a1 h1".to_string();
            options.exclude_allowing_sans = "Kb1 Kc2 Kd1 Kd2".to_string();
        }
        _ => {}
    }
}
