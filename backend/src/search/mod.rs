//! Search driver - sweep the clock input space of one target
//!
//! For each date, the driver holds the date code fixed and runs every batch
//! of time codes through the [`CompressionEngine`]. Dates are independent of
//! each other, so the parallel variants split the date list across workers and
//! give every worker its own engine clone.
//!
//! # Critical Invariants
//!
//! 1. Results never depend on partitioning: matches are sorted, checksums
//!    are wrapping sums
//! 2. Tables are built once per search and only ever read afterwards

mod ivs_scan;

pub use ivs_scan::scan_ivs_codes;

use std::fmt;

use log::{debug, info};
use serde::Serialize;

use crate::calendar::{date_codes, ClockTime, DateEntry, TimeCodeTable};
use crate::compression::{CompressionEngine, Digest, SeedPolicy};
use crate::lanes::Lanes;
use crate::mt::engine::score_ivs;
use crate::mt::IvsCode;
use crate::profile::TargetParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which post-processing implementation a checksum runs through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostProcessPath {
    /// Per-lane scalar arithmetic
    Scalar,
    /// Byte shuffle, widen, multiply, shift on whole lane batches
    Widened,
}

impl PostProcessPath {
    #[inline]
    fn mt_seeds<const W: usize>(self, digest: &Digest<W>) -> Lanes<W> {
        match self {
            PostProcessPath::Scalar => digest.mt_seed_scalar(),
            PostProcessPath::Widened => digest.mt_seed_widened(),
        }
    }
}

/// A date/time pair whose candidate seed equals the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeedMatch {
    pub date: DateEntry,
    pub time: ClockTime,
    /// Candidate under `policy`
    pub seed: u64,
    pub policy: SeedPolicy,
}

impl SeedMatch {
    /// The 32-bit value the target seeds its Mersenne Twister with
    pub fn mt_seed(&self) -> u32 {
        match self.policy {
            SeedPolicy::Full64 => (self.seed >> 32) as u32,
            SeedPolicy::Upper32 => self.seed as u32,
        }
    }

    /// IVs a full generator yields for this match after `skip` draws
    pub fn ivs(&self, skip: usize) -> IvsCode {
        score_ivs(self.mt_seed(), skip)
    }
}

impl fmt::Display for SeedMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} seed={:#018x}", self.date, self.time, self.seed)
    }
}

/// Outcome of one search, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Fingerprint of the target profile the search ran against
    pub profile: String,
    pub policy: SeedPolicy,
    pub target: u64,
    pub dates_scanned: usize,
    pub matches: Vec<SeedMatch>,
}

/// Precomputed engine and tables for sweeping one target
///
/// # Example
/// ```no_run
/// use initseed_core::compression::SeedPolicy;
/// use initseed_core::profile::TargetParams;
/// use initseed_core::search::SeedSearch;
///
/// let params = TargetParams::new(
///     &[0x0221_5F10, 0x0221_600C, 0x0221_600C, 0x0221_6058, 0x0221_6058],
///     &[0x00, 0x21, 0x47, 0x47, 0x26, 0xF4],
///     0x60,
///     6,
///     0xC7A,
/// )
/// .unwrap();
///
/// let mut search = SeedSearch::<8>::new(&params);
/// let first_day = search.dates()[..1].to_vec();
/// let matches = search.find(0x1234_5678, SeedPolicy::Upper32, &first_day);
/// println!("{} matches", matches.len());
/// ```
#[derive(Debug, Clone)]
pub struct SeedSearch<const W: usize> {
    engine: CompressionEngine<W>,
    times: TimeCodeTable<W>,
    dates: Vec<DateEntry>,
}

impl<const W: usize> SeedSearch<W> {
    pub fn new(params: &TargetParams) -> Self {
        Self {
            engine: CompressionEngine::new(params),
            times: TimeCodeTable::new(),
            dates: date_codes(),
        }
    }

    /// The full date table, in calendar order
    pub fn dates(&self) -> &[DateEntry] {
        &self.dates
    }

    pub fn times(&self) -> &TimeCodeTable<W> {
        &self.times
    }

    /// Sum of the 32-bit seeds of every second of one day
    pub fn checksum(&mut self, date_code: u32, path: PostProcessPath) -> u64 {
        checksum_date(&mut self.engine, &self.times, date_code, path)
    }

    /// Checksums of several days folded together
    pub fn checksum_dates(&mut self, dates: &[DateEntry], path: PostProcessPath) -> u64 {
        dates.iter().fold(0u64, |acc, date| {
            acc.wrapping_add(checksum_date(&mut self.engine, &self.times, date.code, path))
        })
    }

    /// Every date/time pair in `dates` whose candidate equals `target`
    pub fn find(&mut self, target: u64, policy: SeedPolicy, dates: &[DateEntry]) -> Vec<SeedMatch> {
        let mut matches = Vec::new();
        for date in dates {
            scan_date(&mut self.engine, &self.times, date, target, policy, &mut matches);
        }
        matches.sort();
        info!(
            "scanned {} dates for {:#x} ({:?}): {} matches",
            dates.len(),
            target,
            policy,
            matches.len()
        );
        matches
    }

    /// [`find`](Self::find) spread over the rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn find_parallel(&self, target: u64, policy: SeedPolicy, dates: &[DateEntry]) -> Vec<SeedMatch> {
        let mut matches: Vec<SeedMatch> = dates
            .par_iter()
            .map_init(
                || self.engine.clone(),
                |engine, date| {
                    let mut hits = Vec::new();
                    scan_date(engine, &self.times, date, target, policy, &mut hits);
                    hits
                },
            )
            .flatten()
            .collect();
        matches.sort();
        info!(
            "scanned {} dates for {:#x} ({:?}) in parallel: {} matches",
            dates.len(),
            target,
            policy,
            matches.len()
        );
        matches
    }

    /// [`checksum_dates`](Self::checksum_dates) spread over the rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn checksum_parallel(&self, dates: &[DateEntry], path: PostProcessPath) -> u64 {
        dates
            .par_iter()
            .map_init(
                || self.engine.clone(),
                |engine, date| checksum_date(engine, &self.times, date.code, path),
            )
            .reduce(|| 0, u64::wrapping_add)
    }
}

fn scan_date<const W: usize>(
    engine: &mut CompressionEngine<W>,
    times: &TimeCodeTable<W>,
    date: &DateEntry,
    target: u64,
    policy: SeedPolicy,
    out: &mut Vec<SeedMatch>,
) {
    let date_lanes = Lanes::splat(date.code);
    let before = out.len();

    for (batch, &time) in times.batches().iter().enumerate() {
        let seeds = engine.candidates(date_lanes, time, policy);
        for (lane, seed) in seeds.iter().enumerate() {
            if seed == target {
                out.push(SeedMatch {
                    date: *date,
                    time: times.clock_time(batch, lane),
                    seed,
                    policy,
                });
            }
        }
    }

    if out.len() > before {
        debug!("{}: {} matches", date, out.len() - before);
    }
}

fn checksum_date<const W: usize>(
    engine: &mut CompressionEngine<W>,
    times: &TimeCodeTable<W>,
    date_code: u32,
    path: PostProcessPath,
) -> u64 {
    let date_lanes = Lanes::splat(date_code);
    times.batches().iter().fold(0u64, |acc, &time| {
        let digest = engine.digest(date_lanes, time);
        acc.wrapping_add(path.mt_seeds(&digest).sum())
    })
}
