//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A cursor over a borrowed byte slice.
///
/// Every read is bounds-checked: running past the end yields
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use msgpack_ref_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u16(), Ok(0x0203));
/// assert!(reader.u16().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    uint8: &'a [u8],
    /// Current cursor position.
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `uint8`.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Current cursor offset from the start of the input.
    pub fn offset(&self) -> usize {
        self.x
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.uint8.len() - self.x
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if n > remaining {
            Err(BufferError::EndOfBuffer {
                needed: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        self.u8().map(|b| b as i8)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.array().map(u16::from_be_bytes)
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        self.array().map(i16::from_be_bytes)
    }

    /// Reads an unsigned 32-bit big-endian integer.
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.array().map(u32::from_be_bytes)
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_be_bytes)
    }

    /// Reads an unsigned 64-bit big-endian integer.
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.array().map(u64::from_be_bytes)
    }

    /// Reads a signed 64-bit big-endian integer.
    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        self.array().map(i64::from_be_bytes)
    }

    /// Reads a 32-bit big-endian float, bit pattern preserved.
    #[inline]
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        self.u32().map(f32::from_bits)
    }

    /// Reads a 64-bit big-endian float, bit pattern preserved.
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        self.u64().map(f64::from_bits)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }
}
