//! Lane-width abstraction
//!
//! A `Lanes<W>` holds `W` independent 32-bit words and applies every
//! operation element-wise. The engines in this crate are written once
//! against `Lanes<W>` and instantiated for `W = 1`, `4` and `8`.
//!
//! Loops run over fixed-size arrays, which lets the optimizer lower them
//! to SSE/AVX2 instructions on stable Rust without any `unsafe`.
//!
//! # Critical Invariants
//!
//! 1. All arithmetic wraps (`wrapping_add`, `wrapping_mul`)
//! 2. Lane `i` of a result depends only on lane `i` of the operands
//! 3. Shifts are logical, never arithmetic

mod wide;

pub use wide::WideLanes;

use std::ops::{
    Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Mul, Not, Shl, Shr,
};

/// Lane widths the engines are instantiated for.
pub const SUPPORTED_WIDTHS: [usize; 3] = [1, 4, 8];

/// Compile-time guard for the lane width of an engine.
///
/// Referencing `WidthCheck::<W>::OK` fails monomorphization for any width
/// outside [`SUPPORTED_WIDTHS`].
pub(crate) struct WidthCheck<const W: usize>;

impl<const W: usize> WidthCheck<W> {
    pub(crate) const OK: () = assert!(
        W == 1 || W == 4 || W == 8,
        "lane width must be 1, 4 or 8"
    );
}

/// `W` independent 32-bit words processed in lockstep
///
/// # Example
/// ```
/// use initseed_core::lanes::U32x4;
///
/// let a = U32x4::from_array([1, 2, 3, 0xFFFF_FFFF]);
/// let b = U32x4::splat(1);
/// assert_eq!((a + b).to_array(), [2, 3, 4, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lanes<const W: usize>([u32; W]);

/// Single lane (scalar pipeline)
pub type U32x1 = Lanes<1>;

/// Four lanes (one 128-bit register)
pub type U32x4 = Lanes<4>;

/// Eight lanes (one 256-bit register)
pub type U32x8 = Lanes<8>;

impl<const W: usize> Lanes<W> {
    /// Number of lanes
    pub const WIDTH: usize = W;

    /// All lanes zero
    #[inline]
    pub const fn zero() -> Self {
        Self([0; W])
    }

    /// Broadcast one value to every lane
    #[inline]
    pub const fn splat(value: u32) -> Self {
        Self([value; W])
    }

    #[inline]
    pub const fn from_array(values: [u32; W]) -> Self {
        Self(values)
    }

    /// Lane `i` holds `base + i` (wrapping)
    ///
    /// # Example
    /// ```
    /// use initseed_core::lanes::U32x4;
    ///
    /// let lanes = U32x4::ascending(0xFFFF_FFFE);
    /// assert_eq!(lanes.to_array(), [0xFFFF_FFFE, 0xFFFF_FFFF, 0, 1]);
    /// ```
    #[inline]
    pub fn ascending(base: u32) -> Self {
        Self(std::array::from_fn(|i| base.wrapping_add(i as u32)))
    }

    #[inline]
    pub const fn to_array(self) -> [u32; W] {
        self.0
    }

    #[inline]
    pub fn as_array(&self) -> &[u32; W] {
        &self.0
    }

    /// Value of a single lane
    ///
    /// # Panics
    /// Panics if `lane >= W`
    #[inline]
    pub fn lane(&self, lane: usize) -> u32 {
        self.0[lane]
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Apply `f` to every lane
    #[inline]
    pub fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self(self.0.map(f))
    }

    #[inline]
    fn zip_with(self, rhs: Self, f: impl Fn(u32, u32) -> u32) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline]
    pub fn rotate_left(self, n: u32) -> Self {
        self.map(|x| x.rotate_left(n))
    }

    /// Reverse the byte order of every lane using masks and shifts
    ///
    /// Equivalent to `u32::swap_bytes` per lane, expressed in the
    /// shift/mask form that maps onto vector registers without a byte
    /// shuffle instruction.
    #[inline]
    pub fn swap_bytes(self) -> Self {
        let v1 = self & Self::splat(0x00FF_00FF);
        let v2 = self & Self::splat(0xFF00_FF00);
        (v1 >> 8) | (v1 << 24) | (v2 << 8) | (v2 >> 24)
    }

    /// Permute the bytes inside each lane
    ///
    /// Byte `j` of the output lane is byte `pattern[j]` of the input lane,
    /// with bytes numbered from the least significant. Indices are taken
    /// modulo 4, so a pattern never pulls bytes across lanes.
    ///
    /// # Example
    /// ```
    /// use initseed_core::lanes::U32x1;
    ///
    /// let v = U32x1::splat(0x1122_3344);
    /// assert_eq!(v.shuffle_bytes([3, 2, 1, 0]).lane(0), 0x4433_2211);
    /// ```
    #[inline]
    pub fn shuffle_bytes(self, pattern: [u8; 4]) -> Self {
        self.map(|x| {
            let bytes = x.to_le_bytes();
            u32::from_le_bytes(pattern.map(|p| bytes[(p & 3) as usize]))
        })
    }

    /// Zero-extend every lane to 64 bits
    #[inline]
    pub fn widen(self) -> WideLanes<W> {
        WideLanes::from_array(self.0.map(u64::from))
    }

    /// Sum of all lanes, without wrapping
    #[inline]
    pub fn sum(&self) -> u64 {
        self.0.iter().map(|&x| u64::from(x)).sum()
    }
}

impl<const W: usize> Default for Lanes<W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const W: usize> From<[u32; W]> for Lanes<W> {
    fn from(values: [u32; W]) -> Self {
        Self(values)
    }
}

impl<const W: usize> Index<usize> for Lanes<W> {
    type Output = u32;

    fn index(&self, lane: usize) -> &u32 {
        &self.0[lane]
    }
}

impl<const W: usize> BitAnd for Lanes<W> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl<const W: usize> BitOr for Lanes<W> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl<const W: usize> BitXor for Lanes<W> {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip_with(rhs, |a, b| a ^ b)
    }
}

impl<const W: usize> Not for Lanes<W> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.map(|a| !a)
    }
}

impl<const W: usize> BitAndAssign for Lanes<W> {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl<const W: usize> BitOrAssign for Lanes<W> {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl<const W: usize> BitXorAssign for Lanes<W> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl<const W: usize> Add for Lanes<W> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_add)
    }
}

impl<const W: usize> Add<u32> for Lanes<W> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: u32) -> Self {
        self.map(|a| a.wrapping_add(rhs))
    }
}

impl<const W: usize> Mul for Lanes<W> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_mul)
    }
}

impl<const W: usize> Mul<u32> for Lanes<W> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: u32) -> Self {
        self.map(|a| a.wrapping_mul(rhs))
    }
}

impl<const W: usize> Shl<u32> for Lanes<W> {
    type Output = Self;

    #[inline]
    fn shl(self, n: u32) -> Self {
        self.map(|a| a << n)
    }
}

impl<const W: usize> Shr<u32> for Lanes<W> {
    type Output = Self;

    #[inline]
    fn shr(self, n: u32) -> Self {
        self.map(|a| a >> n)
    }
}
