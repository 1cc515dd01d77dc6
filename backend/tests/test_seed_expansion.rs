//! Tests for the seed-expansion table

use initseed_core::lanes::{U32x1, U32x4, U32x8};
use initseed_core::mt::{SeedExpansionTable, TableLength, INIT_MULTIPLIER, N};

#[test]
fn test_table_lengths() {
    assert_eq!(TableLength::IvCode.rows(), 403);
    assert_eq!(TableLength::Full.rows(), N);

    let short = SeedExpansionTable::build(U32x8::zero(), TableLength::IvCode);
    let full = SeedExpansionTable::build(U32x8::zero(), TableLength::Full);
    assert_eq!(short.len(), 403);
    assert_eq!(full.len(), 624);
    assert!(!short.is_empty());
}

#[test]
fn test_first_row_is_the_seed() {
    let seeds = U32x4::from_array([0, 1, 0x1234_5678, u32::MAX]);
    let table = SeedExpansionTable::build(seeds, TableLength::IvCode);
    assert_eq!(table.row(0), seeds);
}

#[test]
fn test_known_rows() {
    let table = SeedExpansionTable::build(U32x1::splat(0x1234_5678), TableLength::Full);
    assert_eq!(table.row(1).lane(0), 775_181_657);
    assert_eq!(table.row(2).lane(0), 499_207_455);
    assert_eq!(table.row(402).lane(0), 2_552_552_112);
    assert_eq!(table.row(623).lane(0), 3_716_414_450);
}

#[test]
fn test_recurrence_wraps() {
    let table = SeedExpansionTable::build(U32x1::splat(u32::MAX), TableLength::IvCode);
    assert_eq!(table.row(1).lane(0), 1_340_201_581);
    assert_eq!(table.row(2).lane(0), 3_941_791_902);
}

#[test]
fn test_short_table_is_prefix_of_full() {
    let seeds = U32x8::ascending(0xFFFF_FFFC);
    let short = SeedExpansionTable::build(seeds, TableLength::IvCode);
    let full = SeedExpansionTable::build(seeds, TableLength::Full);
    assert_eq!(short.rows(), &full.rows()[..403]);
}

#[test]
fn test_lanes_expand_independently() {
    let seeds = [9u32, 0, 0xABCD_EF01, 77, 5, 6, 7, 8];
    let table = SeedExpansionTable::build(U32x8::from_array(seeds), TableLength::Full);

    for (lane, &seed) in seeds.iter().enumerate() {
        let single = SeedExpansionTable::build(U32x1::splat(seed), TableLength::Full);
        for i in [0, 1, 200, 623] {
            assert_eq!(table.row(i).lane(lane), single.row(i).lane(0));
        }
    }
}

#[test]
fn test_recurrence_by_hand() {
    let table = SeedExpansionTable::build(U32x1::splat(42), TableLength::IvCode);
    for i in 1..table.len() {
        let prev = table.row(i - 1).lane(0);
        let expected = INIT_MULTIPLIER
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(i as u32);
        assert_eq!(table.row(i).lane(0), expected);
    }
}
