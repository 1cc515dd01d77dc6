//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use initseed_core::compression::SeedPolicy;
use initseed_core::mt::IvsOffset;
use initseed_core::search::PostProcessPath;

#[derive(Parser)]
#[command(author, version, about = "Recover boot-time PRNG seeds from clock inputs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Lanes per batch (1, 4 or 8)
    #[arg(long, global = true, default_value_t = 8)]
    pub width: usize,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find every date/time whose candidate seed equals a target
    Search {
        /// Target profile (JSON)
        #[arg(long)]
        profile: PathBuf,

        /// Seed to look for, decimal or 0x-prefixed hex
        #[arg(long, value_parser = parse_u64)]
        target: u64,

        #[arg(long, value_enum, default_value_t = Policy::Upper32)]
        policy: Policy,

        #[command(flatten)]
        range: DateRange,

        /// Run on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Sum the 32-bit seeds of every second of the selected days
    Checksum {
        /// Target profile (JSON)
        #[arg(long)]
        profile: PathBuf,

        #[arg(long, value_enum, default_value_t = PostPath::Widened)]
        path: PostPath,

        #[command(flatten)]
        range: DateRange,
    },

    /// Count seeds in a range whose IV code equals a target
    IvsScan {
        #[arg(long, value_parser = parse_u32, default_value = "0")]
        start: u32,

        #[arg(long, value_parser = parse_u64)]
        count: u64,

        #[arg(long, value_enum, default_value_t = Offset::Standard)]
        offset: Offset,

        /// Packed IV code, default all six IVs at 31
        #[arg(long, value_parser = parse_u32, default_value = "0x3FFFFFFF")]
        target: u32,
    },
}

/// Slice of the date table to sweep
#[derive(clap::Args)]
pub struct DateRange {
    /// First day, YYYY-MM-DD
    #[arg(long, default_value = "2000-01-01")]
    pub from: String,

    /// Number of days; the rest of the table when omitted
    #[arg(long)]
    pub days: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Policy {
    Full64,
    Upper32,
}

impl From<Policy> for SeedPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Full64 => SeedPolicy::Full64,
            Policy::Upper32 => SeedPolicy::Upper32,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PostPath {
    Scalar,
    Widened,
}

impl From<PostPath> for PostProcessPath {
    fn from(path: PostPath) -> Self {
        match path {
            PostPath::Scalar => PostProcessPath::Scalar,
            PostPath::Widened => PostProcessPath::Widened,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Offset {
    Standard,
    Trailing,
}

impl From<Offset> for IvsOffset {
    fn from(offset: Offset) -> Self {
        match offset {
            Offset::Standard => IvsOffset::Standard,
            Offset::Trailing => IvsOffset::Trailing,
        }
    }
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let value = parse_u64(s)?;
    u32::try_from(value).map_err(|_| format!("{s:?} does not fit in 32 bits"))
}
