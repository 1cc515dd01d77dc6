//! 64-bit lanes for the widened post-processing path

use std::ops::{BitOr, Index, Shl, Shr};

/// `W` independent 64-bit words, produced by [`Lanes::widen`](super::Lanes::widen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WideLanes<const W: usize>([u64; W]);

impl<const W: usize> WideLanes<W> {
    #[inline]
    pub const fn splat(value: u64) -> Self {
        Self([value; W])
    }

    #[inline]
    pub const fn from_array(values: [u64; W]) -> Self {
        Self(values)
    }

    #[inline]
    pub const fn to_array(self) -> [u64; W] {
        self.0
    }

    #[inline]
    pub fn lane(&self, lane: usize) -> u64 {
        self.0[lane]
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn map(self, f: impl Fn(u64) -> u64) -> Self {
        Self(self.0.map(f))
    }

    /// Lane-wise `self * mul + add`, wrapping
    #[inline]
    pub fn mul_add(self, mul: u64, add: u64) -> Self {
        self.map(|x| x.wrapping_mul(mul).wrapping_add(add))
    }

    /// Keep the low 32 bits of every lane
    #[inline]
    pub fn truncate(self) -> super::Lanes<W> {
        super::Lanes::from_array(self.0.map(|x| x as u32))
    }
}

impl<const W: usize> Index<usize> for WideLanes<W> {
    type Output = u64;

    fn index(&self, lane: usize) -> &u64 {
        &self.0[lane]
    }
}

impl<const W: usize> BitOr for WideLanes<W> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] | rhs.0[i]))
    }
}

impl<const W: usize> Shl<u32> for WideLanes<W> {
    type Output = Self;

    #[inline]
    fn shl(self, n: u32) -> Self {
        self.map(|x| x << n)
    }
}

impl<const W: usize> Shr<u32> for WideLanes<W> {
    type Output = Self;

    #[inline]
    fn shr(self, n: u32) -> Self {
        self.map(|x| x >> n)
    }
}
