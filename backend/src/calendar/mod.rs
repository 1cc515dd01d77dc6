//! Domain enumerator - the target's real-time-clock input space
//!
//! The target writes its clock registers into the hash message as packed
//! BCD words. This module precomputes every value those words can take:
//!
//! - **time codes**: 86 400 entries, one per second of the day
//! - **date codes**: 36 525 entries, one per day of 2000-01-01..=2099-12-31
//!
//! Both tables are immutable once built and are shared by every probe of a
//! sweep.
//!
//! # Encoding
//!
//! ```text
//! time: [hour BCD | PM flag 0x40000000] << 24 | minute BCD << 16 | second BCD << 8
//! date: year BCD << 24 | month BCD << 16 | day BCD << 8 | weekday
//! ```

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::lanes::{Lanes, WidthCheck};

/// Entries in the time table
pub const SECONDS_PER_DAY: usize = 86_400;

/// First year of the date table
pub const EPOCH_YEAR: u32 = 2000;

/// Years covered by the date table
pub const YEARS: u32 = 100;

/// Entries in the date table
pub const DAYS_IN_RANGE: usize = 36_525;

/// Set in time codes from 12:00:00 onward
pub const PM_FLAG: u32 = 0x4000_0000;

/// Two-digit BCD encoding of `value` (0..=99)
///
/// # Example
/// ```
/// use initseed_core::calendar::bcd;
///
/// assert_eq!(bcd(59), 0x59);
/// ```
#[inline]
pub const fn bcd(value: u32) -> u32 {
    ((value / 10) << 4) | (value % 10)
}

/// Inverse of [`bcd`]; `None` if either nibble is not a decimal digit
#[inline]
pub const fn from_bcd(code: u32) -> Option<u32> {
    let tens = (code >> 4) & 0xF;
    let ones = code & 0xF;
    if tens > 9 || ones > 9 {
        None
    } else {
        Some(tens * 10 + ones)
    }
}

/// Packed time code for a wall-clock time
///
/// # Example
/// ```
/// use initseed_core::calendar::time_code;
///
/// assert_eq!(time_code(13, 5, 9), 0x5305_0900);
/// ```
pub const fn time_code(hour: u32, minute: u32, second: u32) -> u32 {
    let mut hour_code = bcd(hour) << 24;
    if hour >= 12 {
        hour_code |= PM_FLAG;
    }
    hour_code | (bcd(minute) << 16) | (bcd(second) << 8)
}

/// A time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    /// Time at `index` seconds after midnight
    pub const fn from_index(index: usize) -> Self {
        let index = index as u32;
        Self {
            hour: index / 3600,
            minute: (index / 60) % 60,
            second: index % 60,
        }
    }

    pub const fn index(&self) -> usize {
        (self.hour * 3600 + self.minute * 60 + self.second) as usize
    }

    pub const fn code(&self) -> u32 {
        time_code(self.hour, self.minute, self.second)
    }

    /// Decode a time code; `None` if it is not one the table contains
    pub fn from_code(code: u32) -> Option<Self> {
        let hour = from_bcd((code >> 24) & 0x3F)?;
        let minute = from_bcd((code >> 16) & 0xFF)?;
        let second = from_bcd((code >> 8) & 0xFF)?;
        if hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        let time = Self {
            hour,
            minute,
            second,
        };
        (time.code() == code).then_some(time)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Every time code of one day, ordered by seconds since midnight
pub fn time_codes() -> Vec<u32> {
    (0..SECONDS_PER_DAY)
        .map(|i| ClockTime::from_index(i).code())
        .collect()
}

/// Time codes grouped into lane batches
///
/// Lane `i` of batch `j` holds the time `j * W + i` seconds after midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeCodeTable<const W: usize> {
    batches: Vec<Lanes<W>>,
}

impl<const W: usize> TimeCodeTable<W> {
    pub fn new() -> Self {
        let () = WidthCheck::<W>::OK;

        let codes = time_codes();
        let batches: Vec<Lanes<W>> = codes
            .chunks_exact(W)
            .map(|chunk| Lanes::from_array(std::array::from_fn(|i| chunk[i])))
            .collect();
        debug!("built {} time-code batches of width {}", batches.len(), W);

        Self { batches }
    }

    pub fn batches(&self) -> &[Lanes<W>] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Time held by `lane` of batch `batch`
    pub fn clock_time(&self, batch: usize, lane: usize) -> ClockTime {
        ClockTime::from_index(batch * W + lane)
    }
}

impl<const W: usize> Default for TimeCodeTable<W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Leap rule of the target clock: every fourth year, starting with the epoch
pub const fn is_leap_year(year_offset: u32) -> bool {
    year_offset % 4 == 0
}

pub const fn days_in_month(year_offset: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year_offset) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Weekday of the epoch's first day, Sunday = 0
pub const fn epoch_weekday() -> u32 {
    // January treated as month 13 of the previous year
    let yy = EPOCH_YEAR - 1;
    (yy + yy / 4 - yy / 100 + yy / 400 + (13 * 13 + 8) / 5 + 1) % 7
}

/// Packed date code
///
/// `year_offset` counts years from [`EPOCH_YEAR`].
pub const fn date_code(year_offset: u32, month: u32, day: u32, weekday: u32) -> u32 {
    (bcd(year_offset) << 24) | (bcd(month) << 16) | (bcd(day) << 8) | weekday
}

/// One calendar day of the date table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DateEntry {
    /// Years since [`EPOCH_YEAR`]
    pub year_offset: u32,
    pub month: u32,
    pub day: u32,
    /// Sunday = 0
    pub weekday: u32,
    pub code: u32,
}

impl DateEntry {
    pub const fn year(&self) -> u32 {
        EPOCH_YEAR + self.year_offset
    }

    /// Decode a date code; `None` if any field is out of range
    ///
    /// The weekday is taken from the code as-is.
    pub fn from_code(code: u32) -> Option<Self> {
        let year_offset = from_bcd(code >> 24)?;
        let month = from_bcd((code >> 16) & 0xFF)?;
        let day = from_bcd((code >> 8) & 0xFF)?;
        let weekday = code & 0xFF;
        if !(1..=12).contains(&month) || weekday > 6 {
            return None;
        }
        if day == 0 || day > days_in_month(year_offset, month) {
            return None;
        }
        Some(Self {
            year_offset,
            month,
            day,
            weekday,
            code,
        })
    }
}

impl fmt::Display for DateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month, self.day)
    }
}

/// Every date of the covered century, in calendar order
///
/// The weekday runs continuously from [`epoch_weekday`] across year
/// boundaries.
pub fn date_codes() -> Vec<DateEntry> {
    let mut entries = Vec::with_capacity(DAYS_IN_RANGE);
    let mut weekday = epoch_weekday();

    for year_offset in 0..YEARS {
        for month in 1..=12 {
            for day in 1..=days_in_month(year_offset, month) {
                entries.push(DateEntry {
                    year_offset,
                    month,
                    day,
                    weekday,
                    code: date_code(year_offset, month, day, weekday),
                });
                weekday += 1;
                if weekday == 7 {
                    weekday = 0;
                }
            }
        }
    }
    debug!("built {} date codes starting {}", entries.len(), EPOCH_YEAR);

    entries
}
