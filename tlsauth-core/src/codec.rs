//! Bounded reading and length-prefixed writing of handshake bodies.
//!
//! Every decoder in this crate goes through [`Reader`]. A length read from
//! the wire is only ever used through [`Reader::take`], which fails with
//! [`Error::TruncatedMessage`] instead of reading past the buffer.

use crate::error::{Error, Result};
use bytes::BufMut;

/// Largest value a 24-bit length prefix can carry.
pub const MAX_U24: usize = 0x00FF_FFFF;

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::TruncatedMessage);
        }
        let start = self.offset;
        self.offset += n;
        Ok(&self.buf[start..self.offset])
    }

    /// Consume `n` bytes and return a reader restricted to them.
    pub fn sub(&mut self, n: usize) -> Result<Reader<'a>> {
        self.take(n).map(Reader::new)
    }

    /// Read one byte.
    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian 16-bit integer.
    pub fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read a big-endian 24-bit integer.
    pub fn u24(&mut self) -> Result<usize> {
        let b = self.take(3)?;
        Ok(((b[0] as usize) << 16) | ((b[1] as usize) << 8) | (b[2] as usize))
    }

    /// Read a vector with a one-byte length prefix.
    pub fn vec_u8(&mut self) -> Result<&'a [u8]> {
        let len = self.u8()? as usize;
        self.take(len)
    }

    /// Read a vector with a two-byte length prefix.
    pub fn vec_u16(&mut self) -> Result<&'a [u8]> {
        let len = self.u16()? as usize;
        self.take(len)
    }

    /// Read a vector with a three-byte length prefix.
    pub fn vec_u24(&mut self) -> Result<&'a [u8]> {
        let len = self.u24()?;
        self.take(len)
    }

    /// Fail with `InvalidMessage` if any bytes are left over.
    pub fn expect_end(&self, what: &str) -> Result<()> {
        if !self.is_empty() {
            return Err(Error::InvalidMessage(format!(
                "{} bytes trailing {}",
                self.remaining(),
                what
            )));
        }
        Ok(())
    }
}

/// Append a 24-bit big-endian length.
pub fn put_u24(buf: &mut impl BufMut, len: usize) -> Result<()> {
    if len > MAX_U24 {
        return Err(Error::InvalidMessage(format!(
            "length {} does not fit in 24 bits",
            len
        )));
    }
    buf.put_uint(len as u64, 3);
    Ok(())
}

/// Append a 16-bit big-endian length.
pub fn put_u16_len(buf: &mut impl BufMut, len: usize) -> Result<()> {
    let len = u16::try_from(len).map_err(|_| {
        Error::InvalidMessage(format!("length {} does not fit in 16 bits", len))
    })?;
    buf.put_u16(len);
    Ok(())
}

/// Append an 8-bit length.
pub fn put_u8_len(buf: &mut impl BufMut, len: usize) -> Result<()> {
    let len = u8::try_from(len)
        .map_err(|_| Error::InvalidMessage(format!("length {} does not fit in 8 bits", len)))?;
    buf.put_u8(len);
    Ok(())
}
