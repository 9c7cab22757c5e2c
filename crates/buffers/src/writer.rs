//! Binary buffer writer with auto-growing capacity.

/// A binary buffer writer that grows automatically as needed.
///
/// All multi-byte scalars are written big-endian.
///
/// # Example
///
/// ```
/// use msgpack_ref_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with `capacity` bytes reserved up front.
    ///
    /// The capacity only affects allocation behaviour, never the bytes
    /// produced.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Ensures at least `additional` more bytes can be written without
    /// reallocating.
    #[inline]
    pub fn ensure_capacity(&mut self, additional: usize) {
        self.uint8.reserve(additional);
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` when nothing has been written since the last flush.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands out the bytes written since the last flush, leaving the writer
    /// empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.uint8.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer.
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer.
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer.
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer.
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer.
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer.
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 32-bit floating point number.
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number.
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a u8 followed by a u8.
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.uint8.extend_from_slice(&[marker, val]);
    }

    /// Writes a u8 followed by a u16.
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.ensure_capacity(3);
        self.u8(marker);
        self.u16(val);
    }

    /// Writes a u8 followed by a u32.
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.ensure_capacity(5);
        self.u8(marker);
        self.u32(val);
    }

    /// Writes a u8 followed by a u64.
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.ensure_capacity(9);
        self.u8(marker);
        self.u64(val);
    }

    /// Writes a u8 followed by an f32.
    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.ensure_capacity(5);
        self.u8(marker);
        self.f32(val);
    }

    /// Writes a u8 followed by an f64.
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.ensure_capacity(9);
        self.u8(marker);
        self.f64(val);
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        self.uint8.extend_from_slice(buf);
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.uint8.extend_from_slice(s.as_bytes());
        s.len()
    }
}
