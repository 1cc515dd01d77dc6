//! Seed-expansion table
//!
//! The MT19937 seeding recurrence, run once per lane:
//!
//! ```text
//! table[0] = seed
//! table[i] = 0x6C078965 * (table[i-1] ^ (table[i-1] >> 30)) + i
//! ```
//!
//! The full generator consumes all 624 rows. The IV-code shortcut only ever
//! reads rows `0..403`, so it builds the shorter table.

use log::trace;

use super::{INIT_MULTIPLIER, N};
use crate::lanes::{Lanes, WidthCheck};

/// Number of rows a table is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableLength {
    /// 403 rows: enough for six twist steps reading row `k + 397`
    IvCode,
    /// 624 rows: a complete generator state
    Full,
}

impl TableLength {
    pub const fn rows(self) -> usize {
        match self {
            TableLength::IvCode => 403,
            TableLength::Full => N,
        }
    }
}

/// Expanded seeds, one column per lane
///
/// # Example
/// ```
/// use initseed_core::lanes::U32x4;
/// use initseed_core::mt::{SeedExpansionTable, TableLength};
///
/// let table = SeedExpansionTable::build(U32x4::ascending(0), TableLength::IvCode);
/// assert_eq!(table.len(), 403);
/// assert_eq!(table.row(0), U32x4::ascending(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedExpansionTable<const W: usize> {
    rows: Vec<Lanes<W>>,
}

impl<const W: usize> SeedExpansionTable<W> {
    pub fn build(seeds: Lanes<W>, length: TableLength) -> Self {
        let () = WidthCheck::<W>::OK;

        let len = length.rows();
        let mut rows = Vec::with_capacity(len);
        rows.push(seeds);
        for i in 1..len {
            let prev = rows[i - 1];
            rows.push((prev ^ (prev >> 30)) * INIT_MULTIPLIER + i as u32);
        }
        trace!("expanded {} seed lanes into {} rows", W, len);

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// # Panics
    /// Panics if `index >= self.len()`
    #[inline]
    pub fn row(&self, index: usize) -> Lanes<W> {
        self.rows[index]
    }

    pub fn rows(&self) -> &[Lanes<W>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Lanes<W>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::U32x1;

    #[test]
    fn test_second_row_of_zero_seed() {
        // 0x6C078965 * (0 ^ 0) + 1
        let table = SeedExpansionTable::build(U32x1::zero(), TableLength::IvCode);
        assert_eq!(table.row(1).lane(0), 1);
    }

    #[test]
    fn test_reference_rows_for_seed_5489() {
        // Reference MT19937 initialisation with the canonical default seed
        let table = SeedExpansionTable::build(U32x1::splat(5489), TableLength::Full);
        assert_eq!(table.row(1).lane(0), 1_301_868_182);
        assert_eq!(table.row(N - 1).lane(0), 79_981_964);
    }
}
