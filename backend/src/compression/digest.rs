//! Digest finalization and seed post-processing
//!
//! The target is little-endian while the hash arithmetic is big-endian, so
//! both digest halves are byte-reversed before they form the 64-bit seed:
//!
//! ```text
//! seed64 = swap(H1 + B) << 32 | swap(H0 + A)
//! lcg    = seed64 * 0x5D588B656C078965 + 0x269EC3
//! ```
//!
//! `lcg` is the full 64-bit candidate. Its upper half is the 32-bit seed the
//! target hands to its Mersenne Twister.

use serde::{Deserialize, Serialize};

use super::H;
use crate::lanes::{Lanes, WideLanes};

/// Multiplier of the LCG post-process
pub const LCG_MULTIPLIER: u64 = 0x5D58_8B65_6C07_8965;

/// Increment of the LCG post-process
pub const LCG_INCREMENT: u64 = 0x0026_9EC3;

/// Byte shuffle that reverses each 32-bit lane
pub const BYTE_REVERSE: [u8; 4] = [3, 2, 1, 0];

/// Which part of the post-processed product a search keeps
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// The whole 64-bit product
    Full64,
    /// Bits `[32, 64)` of the product, zero-extended
    #[default]
    Upper32,
}

/// One LCG step applied to a raw seed
///
/// # Example
/// ```
/// use initseed_core::compression::post_process;
///
/// assert_eq!(post_process(0), 0x269EC3);
/// assert_eq!(post_process(1), 0x5D58_8B65_6C07_8965 + 0x269EC3);
/// ```
#[inline]
pub const fn post_process(seed64: u64) -> u64 {
    seed64.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)
}

/// Final register values of one compression, per lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digest<const W: usize> {
    pub a: Lanes<W>,
    pub b: Lanes<W>,
    pub c: Lanes<W>,
    pub d: Lanes<W>,
    pub e: Lanes<W>,
}

impl<const W: usize> Digest<W> {
    /// Raw seed: byte-reversed halves, high half from register B
    #[inline]
    pub fn seed64(&self) -> WideLanes<W> {
        let high = (self.b + H[1]).swap_bytes().widen();
        let low = (self.a + H[0]).swap_bytes().widen();
        (high << 32) | low
    }

    /// Full 64-bit post-processed candidate ([`SeedPolicy::Full64`])
    #[inline]
    pub fn lcg_seed(&self) -> WideLanes<W> {
        self.seed64().map(post_process)
    }

    /// Upper 32 bits of the candidate, computed lane by lane on scalars
    pub fn mt_seed_scalar(&self) -> Lanes<W> {
        let a = self.a.to_array();
        let b = self.b.to_array();
        Lanes::from_array(std::array::from_fn(|i| {
            let high = u64::from(H[1].wrapping_add(b[i]).swap_bytes());
            let low = u64::from(H[0].wrapping_add(a[i]).swap_bytes());
            (post_process((high << 32) | low) >> 32) as u32
        }))
    }

    /// Upper 32 bits of the candidate via shuffle, widen, multiply, shift
    ///
    /// Every step is a whole-register lane operation; no lane is ever read
    /// out on its own.
    pub fn mt_seed_widened(&self) -> Lanes<W> {
        let high = (self.b + H[1]).shuffle_bytes(BYTE_REVERSE).widen();
        let low = (self.a + H[0]).shuffle_bytes(BYTE_REVERSE).widen();
        (((high << 32) | low).mul_add(LCG_MULTIPLIER, LCG_INCREMENT) >> 32).truncate()
    }

    /// Candidates under `policy`, as 64-bit lanes
    pub fn candidates(&self, policy: SeedPolicy) -> WideLanes<W> {
        match policy {
            SeedPolicy::Full64 => self.lcg_seed(),
            SeedPolicy::Upper32 => self.mt_seed_widened().widen(),
        }
    }
}
