//! Initial Seed Core - Rust Engine
//!
//! Recovers the boot-time PRNG seed of a target device from its public boot
//! parameters and the real-time-clock value it booted at.
//!
//! # Architecture
//!
//! - **lanes**: Lane-width abstraction (1, 4 or 8 words per instruction)
//! - **mt**: Batched Mersenne Twister, seed expansion and IV-code extractor
//! - **compression**: 80-round seed hash and LCG post-processing
//! - **calendar**: Precomputed date and time codes
//! - **search**: Sweeps of the clock input space
//! - **profile**: Target parameters and their JSON form
//!
//! # Critical Invariants
//!
//! 1. All arithmetic is fixed-width and wraps
//! 2. Lanes never influence each other
//! 3. Everything is deterministic: no entropy source is ever consulted

// Module declarations
pub mod calendar;
pub mod compression;
pub mod lanes;
pub mod mt;
pub mod profile;
pub mod search;

// Re-exports for convenience
pub use calendar::{date_codes, time_code, time_codes, ClockTime, DateEntry, TimeCodeTable};
pub use compression::{CompressionEngine, Digest, SeedPolicy};
pub use lanes::{Lanes, WideLanes, U32x1, U32x4, U32x8};
pub use mt::{ivs_code, IvsCode, IvsOffset, MultipleMt, Mt, Mt4, Mt8, WordGenerator};
pub use profile::{InputError, TargetParams, TargetProfile};
pub use search::{PostProcessPath, SearchReport, SeedMatch, SeedSearch};
