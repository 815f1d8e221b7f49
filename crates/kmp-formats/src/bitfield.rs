//! Sub-byte field packing for 8- and 16-bit words
//!
//! A [`BitLayout`] splits a word into adjacent sub-fields, most significant
//! sub-field first. Bits below the last declared sub-field are not claimed by
//! [`BitLayout::unpack`]; use [`BitLayout::unpack_with_remainder`] to capture
//! them.
//!
//! ```
//! use kmp_formats::bitfield::{BitLayout, WordWidth};
//!
//! let layout = BitLayout::new(WordWidth::Bits16, [3, 1, 12]);
//! let word = layout.pack([5, 1, 300]).expect("values fit");
//! assert_eq!(word, 0b101_1_0001_0010_1100);
//! assert_eq!(layout.unpack(word).expect("layout fits"), [5, 1, 300]);
//! ```

use thiserror::Error;

/// Total width of a packed word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    /// One byte
    Bits8,
    /// Two bytes, big-endian on disk
    Bits16,
}

impl WordWidth {
    /// Number of bits in the word
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
        }
    }
}

/// Errors produced by bitfield packing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitfieldError {
    /// A sub-field value needs more bits than declared
    #[error("field {index}: value {value} exceeds {width}-bit maximum")]
    FieldOverflow {
        /// Sub-field position in the layout
        index: usize,
        /// Offending value
        value: u32,
        /// Declared width
        width: u32,
    },

    /// Declared widths do not fit in the word
    #[error("sub-field widths sum to {total} bits, word holds {word}")]
    WidthExceeded {
        /// Sum of declared widths
        total: u32,
        /// Word width in bits
        word: u32,
    },
}

/// Layout of `N` sub-fields inside one word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitLayout<const N: usize> {
    word: WordWidth,
    widths: [u32; N],
}

impl<const N: usize> BitLayout<N> {
    /// Declare a layout; widths are listed most significant first
    #[must_use]
    pub const fn new(word: WordWidth, widths: [u32; N]) -> Self {
        Self { word, widths }
    }

    /// Sub-field widths
    #[must_use]
    pub const fn widths(&self) -> &[u32; N] {
        &self.widths
    }

    /// Bits left unclaimed at the low end of the word
    pub fn unused_bits(&self) -> Result<u32, BitfieldError> {
        let total: u32 = self.widths.iter().sum();
        let word = self.word.bits();
        if total > word {
            return Err(BitfieldError::WidthExceeded { total, word });
        }
        Ok(word - total)
    }

    /// Split `word` into its sub-field values
    ///
    /// Only the low [`WordWidth::bits`] bits of `word` are considered.
    pub fn unpack(&self, word: u16) -> Result<[u32; N], BitfieldError> {
        self.unpack_with_remainder(word).map(|(values, _)| values)
    }

    /// Split `word` and also return the unclaimed low bits
    pub fn unpack_with_remainder(&self, word: u16) -> Result<([u32; N], u32), BitfieldError> {
        let unused = self.unused_bits()?;
        let word = u32::from(word) & mask(self.word.bits());

        let mut values = [0u32; N];
        let mut shift = self.word.bits();
        for (value, &width) in values.iter_mut().zip(&self.widths) {
            shift -= width;
            *value = (word >> shift) & mask(width);
        }

        Ok((values, word & mask(unused)))
    }

    /// Combine sub-field values into a word
    pub fn pack(&self, values: [u32; N]) -> Result<u16, BitfieldError> {
        self.unused_bits()?;

        let mut word = 0u32;
        let mut shift = self.word.bits();
        for (index, (&value, &width)) in values.iter().zip(&self.widths).enumerate() {
            if value > mask(width) {
                return Err(BitfieldError::FieldOverflow {
                    index,
                    value,
                    width,
                });
            }
            shift -= width;
            word |= value << shift;
        }

        Ok(word as u16)
    }
}

const fn mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_object_layout() {
        let layout = BitLayout::new(WordWidth::Bits16, [3, 1, 12]);
        let word = layout.pack([5, 1, 300]).expect("Operation should succeed");
        assert_eq!(word >> 13, 5);
        assert_eq!((word >> 12) & 1, 1);
        assert_eq!(word & 0x0FFF, 300);
        assert_eq!(
            layout.unpack(word).expect("Operation should succeed"),
            [5, 1, 300]
        );
    }

    #[test]
    fn test_byte_layout() {
        let layout = BitLayout::new(WordWidth::Bits8, [2, 3, 3]);
        let word = layout.pack([0b11, 0b010, 0b101]).expect("Operation should succeed");
        assert_eq!(word, 0b1101_0101);
        assert_eq!(
            layout.unpack(word).expect("Operation should succeed"),
            [0b11, 0b010, 0b101]
        );
    }

    #[test]
    fn test_remainder_is_low_bits() {
        let layout = BitLayout::new(WordWidth::Bits16, [4, 4]);
        let (values, rest) = layout
            .unpack_with_remainder(0xABCD)
            .expect("Operation should succeed");
        assert_eq!(values, [0xA, 0xB]);
        assert_eq!(rest, 0xCD);

        // Unclaimed bits are dropped by plain unpack and zero after pack
        let word = layout.pack(values).expect("Operation should succeed");
        assert_eq!(word, 0xAB00);
    }

    #[test]
    fn test_overflow_reports_field() {
        let layout = BitLayout::new(WordWidth::Bits16, [3, 1, 12]);
        assert_eq!(
            layout.pack([8, 0, 0]),
            Err(BitfieldError::FieldOverflow {
                index: 0,
                value: 8,
                width: 3
            })
        );
        assert_eq!(
            layout.pack([0, 2, 0]),
            Err(BitfieldError::FieldOverflow {
                index: 1,
                value: 2,
                width: 1
            })
        );
        assert!(layout.pack([7, 1, 4095]).is_ok());
        assert!(layout.pack([7, 1, 4096]).is_err());
    }

    #[test]
    fn test_width_exceeded() {
        let layout = BitLayout::new(WordWidth::Bits8, [4, 5]);
        assert_eq!(
            layout.pack([0, 0]),
            Err(BitfieldError::WidthExceeded { total: 9, word: 8 })
        );
        assert!(layout.unpack(0).is_err());
    }

    #[test]
    fn test_byte_word_ignores_high_bits() {
        let layout = BitLayout::new(WordWidth::Bits8, [8]);
        assert_eq!(layout.unpack(0x1234).expect("Operation should succeed"), [0x34]);
    }

    fn layout_and_values() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
        prop::collection::vec(0u32..=16, 1..6)
            .prop_map(|raw| {
                // Clamp each width to the bits still free in the word
                let mut budget = 16u32;
                raw.into_iter()
                    .map(|w| {
                        let w = w.min(budget);
                        budget -= w;
                        w
                    })
                    .collect::<Vec<_>>()
            })
            .prop_flat_map(|widths| {
                let values = widths
                    .iter()
                    .map(|&w| 0u32..=mask(w))
                    .collect::<Vec<_>>();
                (Just(widths), values)
            })
    }

    proptest! {
        /// unpack(pack(values)) == values for every in-range tuple
        #[test]
        fn bitfield_inverse_law((widths, values) in layout_and_values()) {
            let mut w = [0u32; 6];
            let mut v = [0u32; 6];
            w[..widths.len()].copy_from_slice(&widths);
            v[..values.len()].copy_from_slice(&values);

            let layout = BitLayout::new(WordWidth::Bits16, w);
            let word = layout.pack(v)?;
            prop_assert_eq!(layout.unpack(word)?, v);
        }
    }
}
