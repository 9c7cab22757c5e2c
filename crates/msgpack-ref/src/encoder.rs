//! `MsgPackEncoder`: writes a [`Value`] tree as MessagePack.
//!
//! Every scalar, header and length uses the smallest wire form able to hold
//! it. Signed and unsigned integers keep to their own wire families so the
//! decoder can restore the original variant: [`Value::UInt`] uses positive
//! fixint and `uint8..uint64`; [`Value::Int`] uses negative fixint and
//! `int8..int64`.

use msgpack_ref_buffers::Writer;

use crate::constants::*;
use crate::{Extension, Map, Timestamp, Value};

pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Creates an encoder whose output buffer reserves `capacity` bytes.
    /// The hint never changes the bytes produced.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_capacity(capacity),
        }
    }

    /// Encodes `value` and returns the bytes.
    ///
    /// # Panics
    ///
    /// Panics if a string, binary, extension payload, array or map is longer
    /// than `u32::MAX`, which the wire format cannot express.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Nil => self.write_nil(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Int(i) => self.write_integer(*i),
            Value::UInt(u) => self.write_u_integer(*u),
            Value::Float32(f) => self.write_f32(*f),
            Value::Float64(f) => self.write_f64(*f),
            Value::Str(s) => self.write_str(s),
            Value::Bin(b) => self.write_bin(b),
            Value::Array(arr) => self.write_arr(arr),
            Value::Map(map) => self.write_map(map),
            Value::Extension(ext) => self.write_ext(ext),
            Value::Timestamp(ts) => self.write_timestamp(ts),
        }
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_f32(&mut self, float: f32) {
        self.writer.u8f32(FLOAT32, float);
    }

    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        let writer = &mut self.writer;
        if uint <= POSITIVE_FIXINT_MAX as u64 {
            writer.u8(uint as u8);
        } else if uint <= u8::MAX as u64 {
            writer.u8u8(UINT8, uint as u8);
        } else if uint <= u16::MAX as u64 {
            writer.u8u16(UINT16, uint as u16);
        } else if uint <= u32::MAX as u64 {
            writer.u8u32(UINT32, uint as u32);
        } else {
            writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        let writer = &mut self.writer;
        if (-32..0).contains(&int) {
            // negative fixint: 0xe0..=0xff
            writer.i8(int as i8);
        } else if i8::try_from(int).is_ok() {
            writer.u8u8(INT8, int as i8 as u8);
        } else if let Ok(int) = i16::try_from(int) {
            writer.u8(INT16);
            writer.i16(int);
        } else if let Ok(int) = i32::try_from(int) {
            writer.u8(INT32);
            writer.i32(int);
        } else {
            writer.u8(INT64);
            writer.i64(int);
        }
    }

    pub fn write_str_hdr(&mut self, length: usize) {
        if length <= FIXSTR_MAX_LEN {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= u8::MAX as usize {
            self.writer.u8u8(STR8, length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, wire_len(length));
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.writer.ensure_capacity(5 + s.len());
        self.write_str_hdr(s.len());
        self.writer.utf8(s);
    }

    pub fn write_bin_hdr(&mut self, length: usize) {
        if length <= u8::MAX as usize {
            self.writer.u8u8(BIN8, length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, wire_len(length));
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.writer.ensure_capacity(5 + buf.len());
        self.write_bin_hdr(buf.len());
        self.writer.buf(buf);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= FIX_CONTAINER_MAX_LEN {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, wire_len(length));
        }
    }

    pub fn write_arr(&mut self, arr: &[Value]) {
        self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item);
        }
    }

    pub fn write_map_hdr(&mut self, length: usize) {
        if length <= FIX_CONTAINER_MAX_LEN {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, wire_len(length));
        }
    }

    pub fn write_map(&mut self, map: &Map) {
        self.write_map_hdr(map.len());
        for (key, val) in map {
            self.write_any(key);
            self.write_any(val);
        }
    }

    pub fn write_ext_hdr(&mut self, tag: i8, length: usize) {
        let tag = tag as u8;
        match length {
            1 => self.writer.u8u8(FIXEXT1, tag),
            2 => self.writer.u8u8(FIXEXT2, tag),
            4 => self.writer.u8u8(FIXEXT4, tag),
            8 => self.writer.u8u8(FIXEXT8, tag),
            16 => self.writer.u8u8(FIXEXT16, tag),
            _ => {
                if length <= u8::MAX as usize {
                    self.writer.u8u8(EXT8, length as u8);
                } else if length <= u16::MAX as usize {
                    self.writer.u8u16(EXT16, length as u16);
                } else {
                    self.writer.u8u32(EXT32, wire_len(length));
                }
                self.writer.u8(tag);
            }
        }
    }

    pub fn write_ext(&mut self, ext: &Extension) {
        if ext.is_reserved() {
            log::warn!(
                "writing generic extension with reserved type {} ({} byte payload) verbatim",
                ext.tag,
                ext.data.len()
            );
        }
        self.writer.ensure_capacity(6 + ext.data.len());
        self.write_ext_hdr(ext.tag, ext.data.len());
        self.writer.buf(&ext.data);
    }

    pub fn write_timestamp(&mut self, ts: &Timestamp) {
        ts.write(&mut self.writer);
    }
}

fn wire_len(length: usize) -> u32 {
    match u32::try_from(length) {
        Ok(length) => length,
        Err(_) => panic!("length {length} exceeds the MessagePack 32-bit limit"),
    }
}
