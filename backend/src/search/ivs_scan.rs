//! Brute-force scan of a seed range for one IV code

use log::debug;

use crate::lanes::WidthCheck;
use crate::mt::{ivs_code, ivs_codes_from_base, IvsCode, IvsOffset};

/// Count seeds in `start..start + count` (wrapping) whose IV code is `target`
///
/// Full lane batches go through the `W`-wide extractor; a remainder shorter
/// than `W` falls back to the scalar one.
///
/// # Example
/// ```
/// use initseed_core::mt::{ivs_code, IvsOffset};
/// use initseed_core::search::scan_ivs_codes;
///
/// let target = ivs_code(1000, IvsOffset::Standard);
/// assert!(scan_ivs_codes::<4>(998, 5, IvsOffset::Standard, target) >= 1);
/// ```
pub fn scan_ivs_codes<const W: usize>(
    start: u32,
    count: u64,
    offset: IvsOffset,
    target: IvsCode,
) -> u64 {
    let () = WidthCheck::<W>::OK;

    let width = W as u64;
    let batches = count / width;
    let mut hits = 0u64;
    let mut seed = start;

    for _ in 0..batches {
        let codes = ivs_codes_from_base::<W>(seed, offset);
        hits += codes.iter().filter(|&code| code == target.raw()).count() as u64;
        seed = seed.wrapping_add(W as u32);
    }
    for _ in 0..count % width {
        if ivs_code(seed, offset) == target {
            hits += 1;
        }
        seed = seed.wrapping_add(1);
    }

    debug!(
        "ivs scan from {:#010x}: {} seeds, {} hits for {}",
        start, count, hits, target
    );
    hits
}
