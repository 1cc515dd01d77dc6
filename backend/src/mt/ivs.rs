//! IV-code extractor
//!
//! The first six outputs of a freshly seeded MT19937 only depend on table
//! rows `0..=6` and `397..=402`, so a seed can be classified without
//! building or twisting a full generator. Each tempered output contributes
//! its top five bits; output `k` lands in bits `[5k, 5k + 5)`.
//!
//! Two offset configurations exist for the "far" row of each step. They
//! agree on nothing in general and neither is preferred here:
//!
//! - [`IvsOffset::Standard`] reads row `k + 397` (what a full generator does)
//! - [`IvsOffset::Trailing`] reads row `k + 396`, i.e. `k + len - 7`

use std::fmt;

use serde::{Deserialize, Serialize};

use super::expansion::{SeedExpansionTable, TableLength};
use super::{temper, twist_word, M};
use crate::lanes::{Lanes, U32x1};

/// Number of IVs packed into one code
pub const IVS_PER_CODE: usize = 6;

/// Bits per IV field
pub const IV_BITS: u32 = 5;

/// Secondary row offset used by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IvsOffset {
    /// Row `k + 397`
    Standard,
    /// Row `k + 396`
    Trailing,
}

impl IvsOffset {
    pub const fn rows(self) -> usize {
        match self {
            IvsOffset::Standard => M,
            IvsOffset::Trailing => TableLength::IvCode.rows() - 7,
        }
    }
}

/// Six 5-bit IVs packed into the low 30 bits of a word
///
/// # Example
/// ```
/// use initseed_core::mt::IvsCode;
///
/// let code = IvsCode::from_ivs([31, 0, 31, 0, 31, 0]);
/// assert_eq!(code.ivs(), [31, 0, 31, 0, 31, 0]);
/// assert!(!code.is_perfect());
/// assert!(IvsCode::PERFECT.is_perfect());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct IvsCode(u32);

impl IvsCode {
    /// All six IVs at their maximum of 31
    pub const PERFECT: IvsCode = IvsCode(0x3FFF_FFFF);

    /// Wrap a raw packed value, discarding bits above bit 29
    pub const fn new(raw: u32) -> Self {
        Self(raw & 0x3FFF_FFFF)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn from_ivs(ivs: [u8; IVS_PER_CODE]) -> Self {
        let raw = ivs
            .iter()
            .enumerate()
            .fold(0u32, |acc, (k, &iv)| acc | (u32::from(iv & 0x1F) << (IV_BITS * k as u32)));
        Self(raw)
    }

    pub fn ivs(self) -> [u8; IVS_PER_CODE] {
        std::array::from_fn(|k| ((self.0 >> (IV_BITS * k as u32)) & 0x1F) as u8)
    }

    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }
}

impl fmt::Display for IvsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, s] = self.ivs();
        write!(f, "{}-{}-{}-{}-{}-{}", a, b, c, d, e, s)
    }
}

/// Fold the top five bits of a tempered output into field `k`
#[inline]
pub(crate) fn pack_field<const W: usize>(
    codes: Lanes<W>,
    k: usize,
    tempered: Lanes<W>,
) -> Lanes<W> {
    codes | ((tempered >> (32 - IV_BITS)) << (IV_BITS * k as u32))
}

/// IV codes for one seed per lane
///
/// # Example
/// ```
/// use initseed_core::lanes::{U32x1, U32x4};
/// use initseed_core::mt::{ivs_codes, IvsOffset};
///
/// let seed = 0x1234_5678;
/// let wide = ivs_codes(U32x4::splat(seed), IvsOffset::Standard);
/// let narrow = ivs_codes(U32x1::splat(seed), IvsOffset::Standard);
/// assert!(wide.iter().all(|code| code == narrow.lane(0)));
/// ```
pub fn ivs_codes<const W: usize>(seeds: Lanes<W>, offset: IvsOffset) -> Lanes<W> {
    let table = SeedExpansionTable::build(seeds, TableLength::IvCode);
    let far = offset.rows();

    let mut codes = Lanes::zero();
    for k in 0..IVS_PER_CODE {
        let val = twist_word(table.row(k), table.row(k + 1), table.row(k + far));
        codes = pack_field(codes, k, temper(val));
    }
    codes
}

/// IV codes for the consecutive seeds `base, base + 1, ..., base + W - 1`
pub fn ivs_codes_from_base<const W: usize>(base: u32, offset: IvsOffset) -> Lanes<W> {
    ivs_codes(Lanes::ascending(base), offset)
}

/// IV code of a single seed
pub fn ivs_code(seed: u32, offset: IvsOffset) -> IvsCode {
    IvsCode::new(ivs_codes(U32x1::splat(seed), offset).lane(0))
}
