//! Full MT19937 engine, `W` generators in lockstep
//!
//! Each lane behaves exactly like an independent scalar MT19937 seeded with
//! that lane's seed. Lane `i` of every draw depends on lane `i` of the seed
//! and nothing else.
//!
//! # Determinism
//!
//! Same seeds → same sequence of draws, on every platform. Cloning a
//! generator copies its whole state; the clone and the original never share
//! storage.

use super::expansion::{SeedExpansionTable, TableLength};
use super::ivs::{pack_field, IvsCode, IVS_PER_CODE};
use super::{temper, twist_word, M, N};
use crate::lanes::{Lanes, WidthCheck, U32x1};

/// `W` independent MT19937 generators sharing one instruction stream
///
/// # Example
/// ```
/// use initseed_core::lanes::U32x4;
/// use initseed_core::mt::{Mt, Mt4};
///
/// let mut batch = Mt4::new(U32x4::from_array([1, 2, 3, 4]));
/// let mut third = Mt::from_seed(3);
///
/// let draw = batch.next_lanes();
/// assert_eq!(draw.lane(2), third.next_u32());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleMt<const W: usize> {
    /// `N` rows, one column per lane
    state: Vec<Lanes<W>>,
    /// Next row to hand out; `N` means the state must be twisted first
    cursor: usize,
}

/// Scalar generator
pub type Mt = MultipleMt<1>;

/// Four generators in lockstep
pub type Mt4 = MultipleMt<4>;

/// Eight generators in lockstep
pub type Mt8 = MultipleMt<8>;

impl<const W: usize> MultipleMt<W> {
    /// Seed every lane; the first draw triggers a twist
    pub fn new(seeds: Lanes<W>) -> Self {
        let () = WidthCheck::<W>::OK;

        Self {
            state: SeedExpansionTable::build(seeds, TableLength::Full).into_rows(),
            cursor: N,
        }
    }

    /// Seed every lane with the same value
    pub fn from_seed(seed: u32) -> Self {
        Self::new(Lanes::splat(seed))
    }

    /// Regenerate all `N` rows (the twist) and rewind the cursor
    pub fn advance(&mut self) {
        let s = &mut self.state;

        for k in 0..N - M {
            s[k] = twist_word(s[k], s[k + 1], s[k + M]);
        }
        for k in N - M..N - 1 {
            s[k] = twist_word(s[k], s[k + 1], s[k + M - N]);
        }
        s[N - 1] = twist_word(s[N - 1], s[0], s[M - 1]);

        self.cursor = 0;
    }

    /// Draw one tempered word per lane
    #[inline]
    pub fn next_lanes(&mut self) -> Lanes<W> {
        if self.cursor >= N {
            self.advance();
        }
        let y = self.state[self.cursor];
        self.cursor += 1;
        temper(y)
    }

    /// Skip `count` draws
    pub fn discard(&mut self, count: usize) {
        let mut remaining = count;
        while remaining > 0 {
            if self.cursor >= N {
                self.advance();
            }
            let step = remaining.min(N - self.cursor);
            self.cursor += step;
            remaining -= step;
        }
    }

    /// Pack the top five bits of the next six draws into IV codes
    pub fn next_ivs_codes(&mut self) -> Lanes<W> {
        let mut codes = Lanes::zero();
        for k in 0..IVS_PER_CODE {
            codes = pack_field(codes, k, self.next_lanes());
        }
        codes
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> &[Lanes<W>] {
        &self.state
    }
}

impl Mt {
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.next_lanes().lane(0)
    }
}

/// A seedable 32-bit generator
///
/// This is the only view scoring code has of a generator, so any MT19937
/// implementation with the same draws can stand in for [`Mt`].
pub trait WordGenerator: Clone {
    /// Reinitialize from a 32-bit seed
    fn reseed(&mut self, seed: u32);

    /// Regenerate the internal state block
    fn advance(&mut self);

    /// Draw the next 32-bit output
    fn next_word(&mut self) -> u32;
}

impl WordGenerator for Mt {
    fn reseed(&mut self, seed: u32) {
        *self = Mt::new(U32x1::splat(seed));
    }

    fn advance(&mut self) {
        MultipleMt::advance(self);
    }

    fn next_word(&mut self) -> u32 {
        self.next_u32()
    }
}

/// IV code read from a generator after skipping `skip` draws
///
/// The generator passed in is left untouched; a clone does the drawing.
pub fn ivs_from_generator<G: WordGenerator>(generator: &G, skip: usize) -> IvsCode {
    let mut g = generator.clone();
    for _ in 0..skip {
        g.next_word();
    }
    let draws: [u32; IVS_PER_CODE] = std::array::from_fn(|_| g.next_word());
    let packed = pack_field_scalar(draws);
    IvsCode::new(packed)
}

fn pack_field_scalar(draws: [u32; IVS_PER_CODE]) -> u32 {
    draws
        .iter()
        .enumerate()
        .fold(U32x1::zero(), |acc, (k, &d)| pack_field(acc, k, U32x1::splat(d)))
        .lane(0)
}

/// IV code of `seed` as seen by a full generator after `skip` draws
///
/// With `skip == 0` this equals the [`IvsOffset::Standard`](super::IvsOffset)
/// shortcut.
pub fn score_ivs(seed: u32, skip: usize) -> IvsCode {
    let mut mt = Mt::from_seed(seed);
    mt.discard(skip);
    IvsCode::new(mt.next_ivs_codes().lane(0))
}
