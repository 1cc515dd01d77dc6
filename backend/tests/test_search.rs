//! Tests for the search driver
//!
//! Every full-day sweep here runs 86 400 compressions, so the tests stick to
//! the first one or two days of the table.

use initseed_core::calendar::{time_code, ClockTime};
use initseed_core::compression::{CompressionEngine, SeedPolicy};
use initseed_core::lanes::U32x1;
use initseed_core::mt::score_ivs;
use initseed_core::profile::{TargetParams, TargetProfile};
use initseed_core::search::{PostProcessPath, SearchReport, SeedSearch};

/// Sum of the upper-32 seeds of every second of 2000-01-01
const FIRST_DAY_CHECKSUM: u64 = 185_511_856_237_653;

/// Same for 2000-01-01 and 2000-01-02 together
const FIRST_TWO_DAYS_CHECKSUM: u64 = 371_318_158_738_567;

/// Upper-32 seed at 2000-01-01 13:05:09
const PLANTED_SEED: u64 = 0xA7DC_3785;

fn params() -> TargetParams {
    TargetParams::new(
        &[0x0221_5F10, 0x0221_600C, 0x0221_600C, 0x0221_6058, 0x0221_6058],
        &[0x00, 0x21, 0x47, 0x47, 0x26, 0xF4],
        0x60,
        6,
        0xC7A,
    )
    .unwrap()
}

// ============================================================================
// Checksums
// ============================================================================

#[test]
fn test_checksum_paths_agree_at_width_8() {
    let mut search = SeedSearch::<8>::new(&params());
    let date = search.dates()[0].code;

    assert_eq!(search.checksum(date, PostProcessPath::Widened), FIRST_DAY_CHECKSUM);
    assert_eq!(search.checksum(date, PostProcessPath::Scalar), FIRST_DAY_CHECKSUM);
}

#[test]
fn test_checksum_at_width_4() {
    let mut search = SeedSearch::<4>::new(&params());
    let date = search.dates()[0].code;
    assert_eq!(search.checksum(date, PostProcessPath::Widened), FIRST_DAY_CHECKSUM);
}

#[test]
fn test_checksum_at_width_1() {
    let mut search = SeedSearch::<1>::new(&params());
    let date = search.dates()[0].code;
    assert_eq!(search.checksum(date, PostProcessPath::Scalar), FIRST_DAY_CHECKSUM);
}

#[test]
fn test_checksum_dates_folds_days() {
    let mut search = SeedSearch::<8>::new(&params());
    let dates = search.dates()[..2].to_vec();
    assert_eq!(
        search.checksum_dates(&dates, PostProcessPath::Widened),
        FIRST_TWO_DAYS_CHECKSUM
    );
}

#[test]
fn test_checksum_of_no_dates_is_zero() {
    let mut search = SeedSearch::<8>::new(&params());
    assert_eq!(search.checksum_dates(&[], PostProcessPath::Scalar), 0);
}

// ============================================================================
// Finding seeds
// ============================================================================

#[test]
fn test_find_recovers_planted_time() {
    let mut search = SeedSearch::<8>::new(&params());
    let first_day = search.dates()[..1].to_vec();

    let matches = search.find(PLANTED_SEED, SeedPolicy::Upper32, &first_day);
    assert_eq!(matches.len(), 1);

    let hit = matches[0];
    assert_eq!(hit.date, first_day[0]);
    assert_eq!(
        hit.time,
        ClockTime {
            hour: 13,
            minute: 5,
            second: 9
        }
    );
    assert_eq!(hit.seed, PLANTED_SEED);
    assert_eq!(hit.mt_seed(), 0xA7DC_3785);
    assert_eq!(hit.to_string(), "2000-01-01 13:05:09 seed=0x00000000a7dc3785");
}

#[test]
fn test_find_full64_candidate() {
    let mut engine = CompressionEngine::<1>::new(&params());
    let full = engine
        .candidates(
            U32x1::splat(0x0001_0106),
            U32x1::splat(time_code(13, 5, 9)),
            SeedPolicy::Full64,
        )
        .lane(0);

    let mut search = SeedSearch::<4>::new(&params());
    let first_day = search.dates()[..1].to_vec();
    let matches = search.find(full, SeedPolicy::Full64, &first_day);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].time.index(), 47_109);
    assert_eq!(u64::from(matches[0].mt_seed()), PLANTED_SEED);
}

#[test]
fn test_match_scores_with_full_generator() {
    let mut search = SeedSearch::<8>::new(&params());
    let first_day = search.dates()[..1].to_vec();
    let hit = search.find(PLANTED_SEED, SeedPolicy::Upper32, &first_day)[0];

    assert_eq!(hit.ivs(0), score_ivs(0xA7DC_3785, 0));
    assert_eq!(hit.ivs(5), score_ivs(0xA7DC_3785, 5));
}

#[test]
fn test_find_unreachable_upper32_target() {
    // Upper32 candidates never exceed 32 bits
    let mut search = SeedSearch::<8>::new(&params());
    let first_day = search.dates()[..1].to_vec();
    assert!(search
        .find(1 << 40, SeedPolicy::Upper32, &first_day)
        .is_empty());
}

#[test]
fn test_report_serializes() {
    let mut search = SeedSearch::<8>::new(&params());
    let first_day = search.dates()[..1].to_vec();
    let matches = search.find(PLANTED_SEED, SeedPolicy::Upper32, &first_day);

    let report = SearchReport {
        profile: TargetProfile::from(&params()).fingerprint().unwrap(),
        policy: SeedPolicy::Upper32,
        target: PLANTED_SEED,
        dates_scanned: first_day.len(),
        matches,
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["policy"], "upper32");
    assert_eq!(json["matches"][0]["time"]["hour"], 13);
    assert_eq!(json["matches"][0]["date"]["code"], 0x0001_0106);
}

// ============================================================================
// Parallel sweeps
// ============================================================================

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_find_matches_sequential() {
    let mut search = SeedSearch::<8>::new(&params());
    let dates = search.dates()[..2].to_vec();

    let sequential = search.find(PLANTED_SEED, SeedPolicy::Upper32, &dates);
    let parallel = search.find_parallel(PLANTED_SEED, SeedPolicy::Upper32, &dates);
    assert_eq!(parallel, sequential);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_checksum_matches_sequential() {
    let search = SeedSearch::<8>::new(&params());
    let dates = search.dates()[..2].to_vec();
    assert_eq!(
        search.checksum_parallel(&dates, PostProcessPath::Widened),
        FIRST_TWO_DAYS_CHECKSUM
    );
}
