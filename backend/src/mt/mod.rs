//! Batched Mersenne Twister (MT19937)
//!
//! Lane-parallel MT19937 pieces used both as a general purpose generator and
//! as the scoring oracle for recovered seeds:
//!
//! - **expansion**: the seeding recurrence shared by every MT path
//! - **ivs**: a six-step twist/temper shortcut that yields a packed IV code
//! - **engine**: the full 624-word generator
//!
//! CRITICAL: every constant here is defined by the target hardware's
//! generator and must stay bit-exact.

pub mod engine;
pub mod expansion;
pub mod ivs;

pub use engine::{ivs_from_generator, score_ivs, MultipleMt, Mt, Mt4, Mt8, WordGenerator};
pub use expansion::{SeedExpansionTable, TableLength};
pub use ivs::{ivs_code, ivs_codes, ivs_codes_from_base, IvsCode, IvsOffset};

use crate::lanes::Lanes;

/// State size in words
pub const N: usize = 624;

/// Twist offset
pub const M: usize = 397;

/// Multiplier of the seeding recurrence
pub const INIT_MULTIPLIER: u32 = 0x6C07_8965;

pub const MATRIX_A: u32 = 0x9908_B0DF;
pub const UPPER_MASK: u32 = 0x8000_0000;
pub const LOWER_MASK: u32 = 0x7FFF_FFFF;

pub const TEMPER_MASK_B: u32 = 0x9D2C_5680;
pub const TEMPER_MASK_C: u32 = 0xEFC6_0000;

/// Four-stage output tempering
///
/// # Example
/// ```
/// use initseed_core::lanes::U32x1;
/// use initseed_core::mt::temper;
///
/// assert_eq!(temper(U32x1::splat(0)).lane(0), 0);
/// ```
#[inline]
pub fn temper<const W: usize>(y: Lanes<W>) -> Lanes<W> {
    let mut y = y;
    y ^= y >> 11;
    y ^= (y << 7) & Lanes::splat(TEMPER_MASK_B);
    y ^= (y << 15) & Lanes::splat(TEMPER_MASK_C);
    y ^= y >> 18;
    y
}

/// One twist row: mix the upper bit of `current`, the lower bits of `next`
/// and the word `far` (`M` rows ahead, modulo the state size)
#[inline]
pub(crate) fn twist_word<const W: usize>(
    current: Lanes<W>,
    next: Lanes<W>,
    far: Lanes<W>,
) -> Lanes<W> {
    let temp = (current & Lanes::splat(UPPER_MASK)) | (next & Lanes::splat(LOWER_MASK));
    far ^ (temp >> 1) ^ ((temp & Lanes::splat(1)) * MATRIX_A)
}
