//! Compression engine - boot parameters to candidate seed
//!
//! The target derives its boot seed by compressing one 64-byte block with an
//! 80-round, five-register hash (the SHA-1 compression function) and feeding
//! the first two digest words through a 64-bit LCG step.
//!
//! # Message layout
//!
//! | Word | Contents |
//! |------|----------|
//! | 0-4  | firmware constants, byte-reversed |
//! | 5    | `(version << 16) \| timer0`, byte-reversed |
//! | 6    | MAC bytes 4-5 |
//! | 7    | `0x06000000 ^ frame ^ MAC bytes 0-3`, byte-reversed |
//! | 8    | date code (swept) |
//! | 9    | time code (swept) |
//! | 10-15| fixed tail and padding |
//!
//! # Critical Invariants
//!
//! 1. All constants are protocol values and stay bit-exact
//! 2. The scalar and widened post-processing paths agree on every lane
//! 3. Words 0-7 and 10-15 are fixed at construction; only 8 and 9 change

mod digest;

pub use digest::{post_process, Digest, SeedPolicy};

use crate::lanes::{Lanes, WideLanes, WidthCheck};
use crate::profile::{InputError, TargetParams};

/// Initial register values
pub const H: [u32; 5] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

/// Additive constant of each 20-step round
pub const K: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// Message schedule length
pub const ROUNDS: usize = 80;

const STEPS_PER_ROUND: usize = 20;

const DATE_WORD: usize = 8;
const TIME_WORD: usize = 9;

/// Lane-parallel seed hash for one target
///
/// # Example
/// ```
/// use initseed_core::compression::{CompressionEngine, SeedPolicy};
/// use initseed_core::lanes::U32x1;
///
/// let nazo = [0x0221_5F10, 0x0221_600C, 0x0221_600C, 0x0221_6058, 0x0221_6058];
/// let mac = [0x00, 0x21, 0x47, 0x47, 0x26, 0xF4];
/// let mut engine = CompressionEngine::<1>::from_parts(&nazo, &mac, 0x60, 6, 0xC7A).unwrap();
///
/// let first = engine.candidates(U32x1::splat(0), U32x1::splat(0), SeedPolicy::Full64);
/// let again = engine.candidates(U32x1::splat(0), U32x1::splat(0), SeedPolicy::Full64);
/// assert_eq!(first, again);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionEngine<const W: usize> {
    schedule: [Lanes<W>; ROUNDS],
}

impl<const W: usize> CompressionEngine<W> {
    pub fn new(params: &TargetParams) -> Self {
        let () = WidthCheck::<W>::OK;

        let nazo = params.nazo();
        let mac = params.mac();

        let mut w = [0u32; 16];
        for (slot, &word) in w.iter_mut().zip(nazo.iter()) {
            *slot = word.swap_bytes();
        }
        w[5] = ((params.version() << 16) | params.timer0()).swap_bytes();
        w[6] = (u32::from(mac[4]) << 8) | u32::from(mac[5]);
        w[7] = (0x0600_0000 ^ params.frame() ^ u32::from_le_bytes([mac[0], mac[1], mac[2], mac[3]]))
            .swap_bytes();
        w[10] = 0x0000_0000;
        w[11] = 0x0000_0000;
        w[12] = 0xFF2F_0000;
        w[13] = 0x8000_0000;
        w[14] = 0x0000_0000;
        w[15] = 0x0000_01A0;

        let mut schedule = [Lanes::zero(); ROUNDS];
        for (slot, &word) in schedule.iter_mut().zip(w.iter()) {
            *slot = Lanes::splat(word);
        }

        Self { schedule }
    }

    /// Validate raw parameters and build an engine
    ///
    /// # Errors
    /// [`InputError::InvalidLength`] for a `nazo` that is not five words or a
    /// `mac` that is not six bytes.
    pub fn from_parts(
        nazo: &[u32],
        mac: &[u8],
        version: u32,
        frame: u32,
        timer0: u32,
    ) -> Result<Self, InputError> {
        Ok(Self::new(&TargetParams::new(nazo, mac, version, frame, timer0)?))
    }

    /// Full 80-word schedule as of the last probe
    pub fn schedule(&self) -> &[Lanes<W>; ROUNDS] {
        &self.schedule
    }

    /// Run the compression for one date/time pair per lane
    pub fn digest(&mut self, date: Lanes<W>, time: Lanes<W>) -> Digest<W> {
        let w = &mut self.schedule;
        w[DATE_WORD] = date;
        w[TIME_WORD] = time;
        for t in 16..ROUNDS {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let mut r = Registers::initial();
        let (r0, rest) = w.split_at(STEPS_PER_ROUND);
        let (r1, rest) = rest.split_at(STEPS_PER_ROUND);
        let (r2, r3) = rest.split_at(STEPS_PER_ROUND);

        r.round(r0, K[0], |b, c, d| (b & c) | (!b & d));
        r.round(r1, K[1], |b, c, d| b ^ c ^ d);
        r.round(r2, K[2], |b, c, d| (b & c) | (b & d) | (c & d));
        r.round(r3, K[3], |b, c, d| b ^ c ^ d);

        Digest {
            a: r.a,
            b: r.b,
            c: r.c,
            d: r.d,
            e: r.e,
        }
    }

    /// Candidate seeds for one date/time pair per lane under `policy`
    pub fn candidates(&mut self, date: Lanes<W>, time: Lanes<W>, policy: SeedPolicy) -> WideLanes<W> {
        self.digest(date, time).candidates(policy)
    }

    /// Raw 64-bit seeds, before the LCG post-process
    pub fn seed64(&mut self, date: Lanes<W>, time: Lanes<W>) -> WideLanes<W> {
        self.digest(date, time).seed64()
    }
}

/// The five working registers
struct Registers<const W: usize> {
    a: Lanes<W>,
    b: Lanes<W>,
    c: Lanes<W>,
    d: Lanes<W>,
    e: Lanes<W>,
}

impl<const W: usize> Registers<W> {
    fn initial() -> Self {
        Self {
            a: Lanes::splat(H[0]),
            b: Lanes::splat(H[1]),
            c: Lanes::splat(H[2]),
            d: Lanes::splat(H[3]),
            e: Lanes::splat(H[4]),
        }
    }

    #[inline(always)]
    fn round<F>(&mut self, words: &[Lanes<W>], k: u32, f: F)
    where
        F: Fn(Lanes<W>, Lanes<W>, Lanes<W>) -> Lanes<W>,
    {
        for &w in words {
            let temp = self.a.rotate_left(5) + f(self.b, self.c, self.d) + self.e + w + k;
            self.e = self.d;
            self.d = self.c;
            self.c = self.b.rotate_left(30);
            self.b = self.a;
            self.a = temp;
        }
    }
}
