//! The timestamp extension (type −1).
//!
//! Three payload layouts exist on the wire:
//!
//! | layout | payload | contents |
//! |---|---|---|
//! | timestamp32 | 4 bytes  | u32 seconds |
//! | timestamp64 | 8 bytes  | u30 nanoseconds, u34 seconds packed in a u64 |
//! | timestamp96 | 12 bytes | u32 nanoseconds, then i64 seconds |

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use msgpack_ref_buffers::Writer;

use crate::constants::{EXT8, FIXEXT4, FIXEXT8};
use crate::ext::TIMESTAMP_EXT_TYPE;

const SECONDS_34_BIT_MASK: u64 = 0x0000_0003_ffff_ffff;
const NANOSECONDS_30_BIT_LIMIT: u32 = 1 << 30;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Seconds and nanoseconds relative to the Unix epoch.
///
/// `nanoseconds` is added to `seconds`, so one nanosecond before the epoch
/// is `{ seconds: -1, nanoseconds: 999_999_999 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

/// Wire layout chosen for a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    Timestamp32,
    Timestamp64,
    Timestamp96,
}

impl TimestampLayout {
    /// Extension payload length of this layout.
    pub fn payload_len(self) -> usize {
        match self {
            TimestampLayout::Timestamp32 => 4,
            TimestampLayout::Timestamp64 => 8,
            TimestampLayout::Timestamp96 => 12,
        }
    }
}

impl Timestamp {
    pub const fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Most compact layout able to hold this timestamp.
    pub fn layout(&self) -> TimestampLayout {
        let fits_34_bits = (self.seconds as u64) & !SECONDS_34_BIT_MASK == 0;
        if fits_34_bits && self.nanoseconds < NANOSECONDS_30_BIT_LIMIT {
            if self.nanoseconds == 0 && self.seconds <= u32::MAX as i64 {
                TimestampLayout::Timestamp32
            } else {
                TimestampLayout::Timestamp64
            }
        } else {
            TimestampLayout::Timestamp96
        }
    }

    /// Writes the full extension frame: header, type tag and payload.
    pub(crate) fn write(&self, writer: &mut Writer) {
        let tag = TIMESTAMP_EXT_TYPE as u8;
        match self.layout() {
            TimestampLayout::Timestamp32 => {
                writer.u8u8(FIXEXT4, tag);
                writer.u32(self.seconds as u32);
            }
            TimestampLayout::Timestamp64 => {
                writer.u8u8(FIXEXT8, tag);
                writer.u64(((self.nanoseconds as u64) << 34) | self.seconds as u64);
            }
            TimestampLayout::Timestamp96 => {
                writer.u8u8(EXT8, 12);
                writer.u8(tag);
                writer.u32(self.nanoseconds);
                writer.i64(self.seconds);
            }
        }
    }

    /// Parses a timestamp extension payload. Returns `None` when the length
    /// matches none of the three layouts.
    pub(crate) fn from_payload(data: &[u8]) -> Option<Self> {
        match *data {
            [a, b, c, d] => Some(Self::new(u32::from_be_bytes([a, b, c, d]) as i64, 0)),
            [a, b, c, d, e, f, g, h] => {
                let packed = u64::from_be_bytes([a, b, c, d, e, f, g, h]);
                Some(Self::new(
                    (packed & SECONDS_34_BIT_MASK) as i64,
                    (packed >> 34) as u32,
                ))
            }
            [a, b, c, d, ref rest @ ..] if rest.len() == 8 => {
                let mut seconds = [0u8; 8];
                seconds.copy_from_slice(rest);
                Some(Self::new(
                    i64::from_be_bytes(seconds),
                    u32::from_be_bytes([a, b, c, d]),
                ))
            }
            _ => None,
        }
    }

    /// Converts from [`SystemTime`], including instants before the epoch.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self::new(
                i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                after.subsec_nanos(),
            ),
            Err(err) => {
                let before = err.duration();
                let mut seconds = -i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                let mut nanoseconds = before.subsec_nanos();
                if nanoseconds > 0 {
                    seconds -= 1;
                    nanoseconds = NANOS_PER_SECOND - nanoseconds;
                }
                Self::new(seconds, nanoseconds)
            }
        }
    }

    /// Converts to [`SystemTime`]. Returns `None` when the instant is outside
    /// the platform's representable range.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        let base = if self.seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.seconds as u64))?
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(self.seconds.unsigned_abs()))?
        };
        base.checked_add(Duration::from_nanos(self.nanoseconds as u64))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}
