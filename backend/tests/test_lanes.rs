//! Tests for the lane-width abstraction

use initseed_core::lanes::{Lanes, WideLanes, U32x1, U32x4, U32x8, SUPPORTED_WIDTHS};
use proptest::prelude::*;

// ============================================================================
// Element-wise semantics
// ============================================================================

#[test]
fn test_supported_widths() {
    assert_eq!(SUPPORTED_WIDTHS, [1, 4, 8]);
}

#[test]
fn test_add_wraps_per_lane() {
    let a = U32x4::from_array([u32::MAX, 1, 0x8000_0000, 5]);
    let b = U32x4::from_array([1, 1, 0x8000_0000, 0]);
    assert_eq!((a + b).to_array(), [0, 2, 0, 5]);
}

#[test]
fn test_shifts_are_logical() {
    let v = U32x1::splat(0x8000_0000);
    assert_eq!((v >> 31).lane(0), 1);
    assert_eq!((v << 1).lane(0), 0);
}

#[test]
fn test_bitwise_operators() {
    let a = U32x4::from_array([0b1100, 0xFFFF_0000, 0, u32::MAX]);
    let b = U32x4::from_array([0b1010, 0x00FF_FF00, 0, 0]);
    assert_eq!((a & b).to_array(), [0b1000, 0x00FF_0000, 0, 0]);
    assert_eq!((a | b).to_array(), [0b1110, 0xFFFF_FF00, 0, u32::MAX]);
    assert_eq!((a ^ b).to_array(), [0b0110, 0xFF00_FF00, 0, u32::MAX]);
    assert_eq!((!a).to_array(), [!0b1100u32, 0x0000_FFFF, u32::MAX, 0]);
}

#[test]
fn test_index_and_iter() {
    let v = U32x8::ascending(10);
    assert_eq!(v[7], 17);
    assert_eq!(v.iter().collect::<Vec<_>>(), (10..18).collect::<Vec<_>>());
}

#[test]
fn test_default_is_zero() {
    assert_eq!(U32x8::default(), U32x8::zero());
    assert_eq!(Lanes::from([0u32; 4]), U32x4::zero());
}

// ============================================================================
// Byte shuffles and widening
// ============================================================================

#[test]
fn test_byte_reverse_shuffle_equals_swap_bytes() {
    let v = U32x8::from_array([
        0x0123_4567,
        0x89AB_CDEF,
        0,
        u32::MAX,
        0x8000_0001,
        0x00FF_00FF,
        0xDEAD_BEEF,
        0x1000_0000,
    ]);
    assert_eq!(v.shuffle_bytes([3, 2, 1, 0]), v.swap_bytes());
}

#[test]
fn test_identity_shuffle() {
    let v = U32x4::from_array([1, 0x0203_0405, 0xFFFF_FFFF, 0x0A0B_0C0D]);
    assert_eq!(v.shuffle_bytes([0, 1, 2, 3]), v);
}

#[test]
fn test_widen_then_truncate() {
    let v = U32x4::from_array([0, 1, u32::MAX, 0x8000_0000]);
    let wide = v.widen();
    assert_eq!(wide.to_array(), [0, 1, u64::from(u32::MAX), 0x8000_0000]);
    assert_eq!(wide.truncate(), v);
}

#[test]
fn test_wide_mul_add_wraps() {
    let wide = WideLanes::<4>::from_array([0, 1, u64::MAX, 2]);
    let out = wide.mul_add(3, 1);
    assert_eq!(out.to_array(), [1, 4, u64::MAX - 1, 7]);
}

#[test]
fn test_wide_shift_and_or() {
    let hi = WideLanes::<1>::splat(0xAABB_CCDD);
    let lo = WideLanes::<1>::splat(0x1122_3344);
    let joined = (hi << 32) | lo;
    assert_eq!(joined.lane(0), 0xAABB_CCDD_1122_3344);
    assert_eq!((joined >> 32).lane(0), 0xAABB_CCDD);
    assert_eq!(joined.truncate().lane(0), 0x1122_3344);
}

proptest! {
    #[test]
    fn prop_swap_bytes_matches_std(values in any::<[u32; 8]>()) {
        let v = U32x8::from_array(values);
        prop_assert_eq!(v.swap_bytes().to_array(), values.map(u32::swap_bytes));
    }

    #[test]
    fn prop_rotate_matches_std(values in any::<[u32; 4]>(), n in 0u32..32) {
        let v = U32x4::from_array(values);
        prop_assert_eq!(v.rotate_left(n).to_array(), values.map(|x| x.rotate_left(n)));
    }

    #[test]
    fn prop_mul_matches_wrapping_mul(values in any::<[u32; 4]>(), k in any::<u32>()) {
        let v = U32x4::from_array(values);
        prop_assert_eq!((v * k).to_array(), values.map(|x| x.wrapping_mul(k)));
    }
}
