//! `MsgPackDecoder`: parses MessagePack bytes into a [`Value`] tree.
//!
//! The decoder reads exactly one value per [`MsgPackDecoder::read_any`] call
//! and leaves the cursor after it; trailing bytes are not inspected.
//!
//! Integers are classified by wire family: positive fixint and
//! `uint8..uint64` become [`Value::UInt`], negative fixint and
//! `int8..int64` become [`Value::Int`].

use msgpack_ref_buffers::{BufferError, Reader};

use crate::constants::*;
use crate::error::{Malformed, MsgPackError};
use crate::ext::TIMESTAMP_EXT_TYPE;
use crate::{Extension, Map, Timestamp, Value};

/// Default limit on array/map nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

pub struct MsgPackDecoder<'a> {
    reader: Reader<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> MsgPackDecoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the deepest array/map nesting accepted before the input is
    /// rejected as malformed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.reader.offset()
    }

    /// Unread bytes after the cursor.
    pub fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    #[inline]
    fn read<T>(
        &mut self,
        f: impl FnOnce(&mut Reader<'a>) -> Result<T, BufferError>,
    ) -> Result<T, MsgPackError> {
        let offset = self.reader.offset();
        f(&mut self.reader).map_err(|err| MsgPackError::truncated(offset, err))
    }

    /// Reads one value at the current offset.
    pub fn read_any(&mut self) -> Result<Value, MsgPackError> {
        let start = self.reader.offset();
        let byte = self.read(Reader::u8)?;

        match byte {
            0x00..=POSITIVE_FIXINT_MAX => Ok(Value::UInt(byte as u64)),
            FIXMAP..=FIXMAP_MAX => self.read_map(start, (byte & 0x0f) as usize),
            FIXARRAY..=FIXARRAY_MAX => self.read_arr(start, (byte & 0x0f) as usize),
            FIXSTR..=FIXSTR_MAX => self.read_str((byte & 0x1f) as usize),
            NIL => Ok(Value::Nil),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 => {
                let n = self.read(Reader::u8)? as usize;
                self.read_bin(n)
            }
            BIN16 => {
                let n = self.read(Reader::u16)? as usize;
                self.read_bin(n)
            }
            BIN32 => {
                let n = self.read(Reader::u32)? as usize;
                self.read_bin(n)
            }
            EXT8 => {
                let n = self.read(Reader::u8)? as usize;
                self.read_ext(start, n)
            }
            EXT16 => {
                let n = self.read(Reader::u16)? as usize;
                self.read_ext(start, n)
            }
            EXT32 => {
                let n = self.read(Reader::u32)? as usize;
                self.read_ext(start, n)
            }
            FLOAT32 => Ok(Value::Float32(self.read(Reader::f32)?)),
            FLOAT64 => Ok(Value::Float64(self.read(Reader::f64)?)),
            UINT8 => Ok(Value::UInt(self.read(Reader::u8)? as u64)),
            UINT16 => Ok(Value::UInt(self.read(Reader::u16)? as u64)),
            UINT32 => Ok(Value::UInt(self.read(Reader::u32)? as u64)),
            UINT64 => Ok(Value::UInt(self.read(Reader::u64)?)),
            INT8 => Ok(Value::Int(self.read(Reader::i8)? as i64)),
            INT16 => Ok(Value::Int(self.read(Reader::i16)? as i64)),
            INT32 => Ok(Value::Int(self.read(Reader::i32)? as i64)),
            INT64 => Ok(Value::Int(self.read(Reader::i64)?)),
            FIXEXT1 => self.read_ext(start, 1),
            FIXEXT2 => self.read_ext(start, 2),
            FIXEXT4 => self.read_ext(start, 4),
            FIXEXT8 => self.read_ext(start, 8),
            FIXEXT16 => self.read_ext(start, 16),
            STR8 => {
                let n = self.read(Reader::u8)? as usize;
                self.read_str(n)
            }
            STR16 => {
                let n = self.read(Reader::u16)? as usize;
                self.read_str(n)
            }
            STR32 => {
                let n = self.read(Reader::u32)? as usize;
                self.read_str(n)
            }
            ARRAY16 => {
                let n = self.read(Reader::u16)? as usize;
                self.read_arr(start, n)
            }
            ARRAY32 => {
                let n = self.read(Reader::u32)? as usize;
                self.read_arr(start, n)
            }
            MAP16 => {
                let n = self.read(Reader::u16)? as usize;
                self.read_map(start, n)
            }
            MAP32 => {
                let n = self.read(Reader::u32)? as usize;
                self.read_map(start, n)
            }
            NEGATIVE_FIXINT..=0xff => Ok(Value::Int(byte as i8 as i64)),
            // NEVER_USED
            _ => Err(MsgPackError::malformed(start, Malformed::InvalidMarker(byte))),
        }
    }

    fn read_str(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let offset = self.reader.offset();
        let bytes = self.read(|r| r.buf(size))?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(Value::Str(s.to_owned())),
            Err(err) => {
                log::trace!("msgpack string at offset {offset} is not UTF-8: {err}");
                Err(MsgPackError::InvalidUtf8 {
                    offset,
                    bytes: bytes.to_vec(),
                })
            }
        }
    }

    fn read_bin(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let bytes = self.read(|r| r.buf(size))?;
        Ok(Value::Bin(bytes.to_vec()))
    }

    fn read_ext(&mut self, start: usize, size: usize) -> Result<Value, MsgPackError> {
        let tag = self.read(Reader::i8)?;
        let data = self.read(|r| r.buf(size))?;
        if tag == TIMESTAMP_EXT_TYPE {
            return Timestamp::from_payload(data)
                .map(Value::Timestamp)
                .ok_or_else(|| MsgPackError::malformed(start, Malformed::TimestampLength(size)));
        }
        Ok(Value::Extension(Extension::new(tag, data)))
    }

    fn enter(&mut self, start: usize) -> Result<(), MsgPackError> {
        if self.depth >= self.max_depth {
            return Err(MsgPackError::malformed(
                start,
                Malformed::TooDeep(self.max_depth),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Every element takes at least one byte, so the declared count never
    /// needs more slots than there are bytes left.
    fn capacity_for(&self, count: usize) -> usize {
        count.min(self.reader.remaining())
    }

    fn read_arr(&mut self, start: usize, size: usize) -> Result<Value, MsgPackError> {
        self.enter(start)?;
        let items = self.read_items(size);
        self.depth -= 1;
        items.map(Value::Array)
    }

    fn read_items(&mut self, size: usize) -> Result<Vec<Value>, MsgPackError> {
        let mut arr = Vec::with_capacity(self.capacity_for(size));
        for _ in 0..size {
            arr.push(self.read_any()?);
        }
        Ok(arr)
    }

    fn read_map(&mut self, start: usize, size: usize) -> Result<Value, MsgPackError> {
        self.enter(start)?;
        let entries = self.read_entries(size);
        self.depth -= 1;
        entries.map(Value::Map)
    }

    /// Repeated keys keep the last value seen.
    fn read_entries(&mut self, size: usize) -> Result<Map, MsgPackError> {
        let mut map = Map::with_capacity(self.capacity_for(size) / 2);
        for _ in 0..size {
            let key = self.read_any()?;
            let val = self.read_any()?;
            map.insert(key, val);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(bytes: &[u8]) -> Result<Value, MsgPackError> {
        MsgPackDecoder::new(bytes).read_any()
    }

    #[test]
    fn integer_families_map_to_variants() {
        assert_eq!(dec(&[0x05]), Ok(Value::UInt(5)));
        assert_eq!(dec(&[0xcc, 0xff]), Ok(Value::UInt(255)));
        assert_eq!(dec(&[0xd0, 0x05]), Ok(Value::Int(5)));
        assert_eq!(dec(&[0xd0, 0xff]), Ok(Value::Int(-1)));
        assert_eq!(dec(&[0xe0]), Ok(Value::Int(-32)));
        assert_eq!(
            dec(&[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            Ok(Value::UInt(u64::MAX))
        );
        assert_eq!(
            dec(&[0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn never_used_marker_is_malformed() {
        assert_eq!(
            dec(&[0xc1]),
            Err(MsgPackError::MalformedInput {
                offset: 0,
                reason: Malformed::InvalidMarker(0xc1)
            })
        );
        assert_eq!(
            dec(&[0x91, 0xc1]),
            Err(MsgPackError::MalformedInput {
                offset: 1,
                reason: Malformed::InvalidMarker(0xc1)
            })
        );
    }

    #[test]
    fn empty_input_is_truncated() {
        assert_eq!(
            dec(&[]),
            Err(MsgPackError::TruncatedInput {
                offset: 0,
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn huge_declared_count_does_not_preallocate() {
        // array32 claiming u32::MAX elements backed by two bytes
        let err = dec(&[0xdd, 0xff, 0xff, 0xff, 0xff, 0xc0, 0xc0]).unwrap_err();
        assert!(matches!(err, MsgPackError::TruncatedInput { offset: 7, .. }));
    }

    #[test]
    fn nesting_limit() {
        let mut bytes = vec![0x91; 10];
        bytes.push(0xc0);
        assert!(MsgPackDecoder::new(&bytes).with_max_depth(10).read_any().is_ok());
        assert_eq!(
            MsgPackDecoder::new(&bytes).with_max_depth(9).read_any(),
            Err(MsgPackError::MalformedInput {
                offset: 9,
                reason: Malformed::TooDeep(9)
            })
        );
    }

    #[test]
    fn timestamp_with_bad_length_is_malformed() {
        assert_eq!(
            dec(&[0xd5, 0xff, 0x00, 0x00]),
            Err(MsgPackError::MalformedInput {
                offset: 0,
                reason: Malformed::TimestampLength(2)
            })
        );
    }

    #[test]
    fn cursor_stops_after_first_value() {
        let bytes = [0xc3, 0xc2, 0x01];
        let mut decoder = MsgPackDecoder::new(&bytes);
        assert_eq!(decoder.read_any(), Ok(Value::Bool(true)));
        assert_eq!(decoder.offset(), 1);
        assert_eq!(decoder.remaining(), 2);
        assert_eq!(decoder.read_any(), Ok(Value::Bool(false)));
        assert_eq!(decoder.read_any(), Ok(Value::UInt(1)));
    }

    #[test]
    fn failed_read_does_not_leak_depth() {
        let bytes = [0x91, 0xc1, 0x91, 0x91, 0xc0];
        let mut decoder = MsgPackDecoder::new(&bytes).with_max_depth(2);
        assert_eq!(
            decoder.read_any(),
            Err(MsgPackError::MalformedInput {
                offset: 1,
                reason: Malformed::InvalidMarker(0xc1)
            })
        );
        assert_eq!(
            decoder.read_any(),
            Ok(Value::Array(vec![Value::Array(vec![Value::Nil])]))
        );
    }

    #[test]
    fn failed_map_read_does_not_leak_depth() {
        // {"a": <truncated str8>} followed by a fixarray holding nil
        let bytes = [0x81, 0xa1, b'a', 0xd9, 0x05, 0x91, 0xc0];
        let mut decoder = MsgPackDecoder::new(&bytes).with_max_depth(1);
        assert!(decoder.read_any().is_err());
        assert_eq!(decoder.depth, 0);
    }
}
