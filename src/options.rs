//! Command-line options and fatal input errors.
//!
//! Flag names follow the established tool conventions (camelCase long
//! options). Everything except `--epd` is optional; move restrictions only
//! ever apply to the mating side.

use std::fmt;

use clap::Parser;

/// Fatal input errors. Every variant terminates the run with exit code 1.
#[derive(Debug)]
pub enum InputError {
    EpdTooShort { epd: String },
    BadRootPosition { epd: String, reason: String },
    BadSquare { token: String },
    MultiplePlaceholders { line: String },
    IllegalBookMove { uci: String, fen: String },
    ConflictingBookMoves { fen: String, first: String, second: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EpdTooShort { epd } => write!(f, "EPD \"{epd}\" is too short."),
            InputError::BadRootPosition { epd, reason } => {
                write!(f, "EPD \"{epd}\" is not a valid position: {reason}.")
            }
            InputError::BadSquare { token } => write!(f, "\"{token}\" is not a square name."),
            InputError::MultiplePlaceholders { line } => {
                write!(f, "More than one '*' in line {line}.")
            }
            InputError::IllegalBookMove { uci, fen } => {
                write!(f, "Illegal move {uci} in position {fen}.")
            }
            InputError::ConflictingBookMoves { fen, first, second } => {
                write!(f, "Cannot specify both {second} and {first} for position {fen}.")
            }
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "matebound",
    about = "Prove (upper bound) for best mate for a given position by constructing \
             a custom tablebase for a (reduced) game tree."
)]
pub struct Options {
    /// EPD for the root position. If bm is not given, it is assumed that the
    /// side to move is mating.
    #[arg(long)]
    pub epd: String,

    /// Maximal depth for the constructed game tree (a too low value means
    /// mate cannot be found).
    #[arg(long)]
    pub depth: Option<u32>,

    /// Comma separated opening lines in UCI notation that specify the mating
    /// side's moves. In each line a single placeholder '*' is allowed for the
    /// defending side.
    #[arg(long = "openingMoves", default_value = "")]
    pub opening_moves: String,

    /// Space separated UCI moves that are not allowed.
    #[arg(long = "excludeMoves", default_value = "")]
    pub exclude_moves: String,

    /// Space separated SAN moves that are not allowed.
    #[arg(long = "excludeSANs", default_value = "")]
    pub exclude_sans: String,

    /// Space separated square names that pieces should never move from.
    #[arg(long = "excludeFrom", default_value = "")]
    pub exclude_from: String,

    /// Space separated square names that pieces should never move to.
    #[arg(long = "excludeTo", default_value = "")]
    pub exclude_to: String,

    /// Never capture.
    #[arg(long = "excludeCaptures")]
    pub exclude_captures: bool,

    /// String containing piece types that should never be captured, e.g. "qrbn".
    #[arg(long = "excludeCapturesOf", default_value = "")]
    pub exclude_captures_of: String,

    /// Never move to attacked squares (including from pinned pieces, but
    /// ignoring en passant).
    #[arg(long = "excludeToAttacked")]
    pub exclude_to_attacked: bool,

    /// Never move to a square that risks capture (much slower than
    /// --excludeToAttacked).
    #[arg(long = "excludeToCapturable")]
    pub exclude_to_capturable: bool,

    /// String containing piece types that should never be promoted to, e.g. "qrb".
    #[arg(long = "excludePromotionTo", default_value = "")]
    pub exclude_promotion_to: String,

    /// Avoid moves that allow a capture somewhere on the board (much slower
    /// than --excludeToAttacked).
    #[arg(long = "excludeAllowingCapture")]
    pub exclude_allowing_capture: bool,

    /// Space separated square names that opponent's pieces should not be
    /// allowed to move from in reply to our move.
    #[arg(long = "excludeAllowingFrom", default_value = "")]
    pub exclude_allowing_from: String,

    /// Space separated square names that opponent's pieces should not be
    /// allowed to move to in reply to our move.
    #[arg(long = "excludeAllowingTo", default_value = "")]
    pub exclude_allowing_to: String,

    /// Space separated UCI moves that opponent should not be allowed to make
    /// in reply to our move.
    #[arg(long = "excludeAllowingMoves", default_value = "")]
    pub exclude_allowing_moves: String,

    /// Space separated SAN moves that opponent should not be allowed to make
    /// in reply to our move.
    #[arg(long = "excludeAllowingSANs", default_value = "")]
    pub exclude_allowing_sans: String,

    /// Optional output file for the TB.
    #[arg(long = "outFile")]
    pub out_file: Option<String>,

    /// Verbosity level. E.g. --verbose 1 shows PVs for all legal moves, and
    /// --verbose 2 also links to chessdb.cn.
    #[arg(long, default_value_t = 0)]
    pub verbose: u32,

    /// Worker pool size; defaults to the available CPU count.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl Options {
    /// Whether any restriction or book option was given explicitly.
    pub fn has_restrictions(&self) -> bool {
        !self.opening_moves.is_empty()
            || !self.exclude_moves.is_empty()
            || !self.exclude_sans.is_empty()
            || !self.exclude_from.is_empty()
            || !self.exclude_to.is_empty()
            || self.exclude_captures
            || !self.exclude_captures_of.is_empty()
            || self.exclude_to_attacked
            || self.exclude_to_capturable
            || !self.exclude_promotion_to.is_empty()
            || self.exclude_allowing_capture
            || !self.exclude_allowing_from.is_empty()
            || !self.exclude_allowing_to.is_empty()
            || !self.exclude_allowing_moves.is_empty()
            || !self.exclude_allowing_sans.is_empty()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn enclosed(s: &str) -> String {
    if s.contains(' ') {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

impl fmt::Display for Options {
    /// Echo the effective options as a re-runnable command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--epd \"{}\" ", self.epd)?;
        if let Some(depth) = self.depth {
            write!(f, "--depth {depth} ")?;
        }
        let strings = [
            ("--openingMoves", &self.opening_moves),
            ("--excludeMoves", &self.exclude_moves),
            ("--excludeSANs", &self.exclude_sans),
            ("--excludeFrom", &self.exclude_from),
            ("--excludeTo", &self.exclude_to),
        ];
        for (flag, value) in strings {
            if !value.is_empty() {
                write!(f, "{flag} {} ", enclosed(value))?;
            }
        }
        if self.exclude_captures {
            write!(f, "--excludeCaptures ")?;
        }
        if !self.exclude_captures_of.is_empty() {
            write!(f, "--excludeCapturesOf {} ", enclosed(&self.exclude_captures_of))?;
        }
        if self.exclude_to_attacked {
            write!(f, "--excludeToAttacked ")?;
        }
        if self.exclude_to_capturable {
            write!(f, "--excludeToCapturable ")?;
        }
        if !self.exclude_promotion_to.is_empty() {
            write!(f, "--excludePromotionTo {} ", enclosed(&self.exclude_promotion_to))?;
        }
        if self.exclude_allowing_capture {
            write!(f, "--excludeAllowingCapture ")?;
        }
        let strings = [
            ("--excludeAllowingFrom", &self.exclude_allowing_from),
            ("--excludeAllowingTo", &self.exclude_allowing_to),
            ("--excludeAllowingMoves", &self.exclude_allowing_moves),
            ("--excludeAllowingSANs", &self.exclude_allowing_sans),
        ];
        for (flag, value) in strings {
            if !value.is_empty() {
                write!(f, "{flag} {} ", enclosed(value))?;
            }
        }
        if let Some(out_file) = &self.out_file {
            write!(f, "--outFile {} ", enclosed(out_file))?;
        }
        Ok(())
    }
}
