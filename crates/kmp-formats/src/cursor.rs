//! Positioned big-endian reader and writer
//!
//! [`ByteReader`] is a read-only view over a byte slice; [`ByteWriter`] appends
//! to a growable buffer and can seek back to overwrite bytes that were reserved
//! earlier. Neither knows anything about sections.

use crate::error::{KmpError, Result};
use binrw::io::{Cursor, Seek, SeekFrom};
use binrw::{BinRead, BinWrite, Endian};

/// A record with a fixed on-disk size, read and written through binrw
pub trait FixedRecord: for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()> {
    /// Encoded size in bytes
    const SIZE: usize;
}

/// Big-endian reader over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at offset 0
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current byte offset
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.inner.position()
    }

    /// Move to an absolute offset
    pub fn seek(&mut self, offset: u64) {
        self.inner.set_position(offset);
    }

    /// Total buffer length
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Whether the buffer is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// Bytes left after the current offset
    #[must_use]
    pub fn remaining(&self) -> usize {
        let position = usize::try_from(self.tell()).unwrap_or(usize::MAX);
        self.len().saturating_sub(position)
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(KmpError::UnexpectedEnd {
                offset: self.tell(),
                needed,
            });
        }
        Ok(())
    }

    fn read_scalar<T>(&mut self, size: usize) -> Result<T>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        self.ensure(size)?;
        Ok(T::read_options(&mut self.inner, Endian::Big, ())?)
    }

    /// Read an unsigned byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_scalar(1)
    }

    /// Read a big-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_scalar(2)
    }

    /// Read a big-endian `i16`
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_scalar(2)
    }

    /// Read a big-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_scalar(4)
    }

    /// Read a big-endian `f32`
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_scalar(4)
    }

    /// Read two bytes as the high half of a big-endian `f32`
    ///
    /// The low 16 bits of the result are always zero.
    pub fn read_half_f32(&mut self) -> Result<f32> {
        let [hi, lo] = self.read_u8_array::<2>()?;
        Ok(f32::from_be_bytes([hi, lo, 0, 0]))
    }

    /// Read `N` bytes as text, replacing invalid UTF-8
    pub fn read_fixed_string<const N: usize>(&mut self) -> Result<String> {
        let bytes = self.read_u8_array::<N>()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read `N` raw bytes
    pub fn read_u8_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.read_scalar(N)
    }

    /// Read `N` big-endian `u16` values
    pub fn read_u16_array<const N: usize>(&mut self) -> Result<[u16; N]> {
        self.read_scalar(2 * N)
    }

    /// Read `N` big-endian `f32` values
    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.read_scalar(4 * N)
    }

    /// Read `count` big-endian `u32` values
    pub fn read_u32_vec(&mut self, count: usize) -> Result<Vec<u32>> {
        self.ensure(count.saturating_mul(4))?;
        (0..count).map(|_| self.read_u32()).collect()
    }

    /// Skip `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.inner.seek(SeekFrom::Current(count as i64))?;
        Ok(())
    }

    /// Read one fixed-size record
    pub fn read_record<T: FixedRecord>(&mut self) -> Result<T> {
        self.read_scalar(T::SIZE)
    }

    /// Read `count` consecutive fixed-size records
    pub fn read_records<T: FixedRecord>(&mut self, count: usize) -> Result<Vec<T>> {
        self.ensure(count.saturating_mul(T::SIZE))?;
        (0..count).map(|_| self.read_record()).collect()
    }
}

/// Big-endian writer with seek-and-overwrite support
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    inner: Cursor<Vec<u8>>,
}

impl ByteWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current byte offset
    #[must_use]
    pub fn tell(&self) -> u64 {
        self.inner.position()
    }

    /// Move to an absolute offset; later writes overwrite existing bytes
    pub fn seek(&mut self, offset: u64) {
        self.inner.set_position(offset);
    }

    /// Move to the end of the written data
    pub fn seek_end(&mut self) {
        let end = self.inner.get_ref().len() as u64;
        self.inner.set_position(end);
    }

    /// Bytes written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Whether nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    /// Consume the writer and return the buffer
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn write_scalar<T>(&mut self, value: &T) -> Result<()>
    where
        T: for<'b> BinWrite<Args<'b> = ()>,
    {
        value.write_options(&mut self.inner, Endian::Big, ())?;
        Ok(())
    }

    /// Write an unsigned byte
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_scalar(&value)
    }

    /// Write a big-endian `u16`
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_scalar(&value)
    }

    /// Write a big-endian `i16`
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_scalar(&value)
    }

    /// Write a big-endian `u32`
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_scalar(&value)
    }

    /// Write a big-endian `f32`
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_scalar(&value)
    }

    /// Write the high two bytes of a big-endian `f32`
    pub fn write_half_f32(&mut self, value: f32) -> Result<()> {
        let [hi, lo, _, _] = value.to_be_bytes();
        self.write_u8_array(&[hi, lo])
    }

    /// Write raw bytes
    pub fn write_u8_array(&mut self, values: &[u8]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_u8(v))
    }

    /// Write big-endian `u16` values
    pub fn write_u16_array(&mut self, values: &[u16]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_u16(v))
    }

    /// Write big-endian `u32` values
    pub fn write_u32_array(&mut self, values: &[u32]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_u32(v))
    }

    /// Write big-endian `f32` values
    pub fn write_f32_array(&mut self, values: &[f32]) -> Result<()> {
        values.iter().try_for_each(|&v| self.write_f32(v))
    }

    /// Write a fixed-size record
    pub fn write_record<T: FixedRecord>(&mut self, record: &T) -> Result<()> {
        self.write_scalar(record)
    }

    /// Write `count` zero bytes
    pub fn write_padding(&mut self, count: usize) -> Result<()> {
        (0..count).try_for_each(|_| self.write_u8(0))
    }
}

/// Narrow a count or index into its on-disk integer type
pub(crate) fn narrow<T, V>(value: V, section: &str, row: usize, field: &str) -> Result<T>
where
    V: Copy + std::fmt::Display,
    T: TryFrom<V>,
{
    T::try_from(value).map_err(|_| KmpError::ValueOutOfRange {
        section: section.to_string(),
        row,
        field: field.to_string(),
        value: value.to_string(),
    })
}
