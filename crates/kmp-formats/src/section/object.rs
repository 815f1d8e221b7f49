//! Placed objects (GOBJ)

use crate::bitfield::{BitLayout, WordWidth};
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{KmpError, Result};
use crate::section::SectionTag;

/// Object word: type (3), enable (1), object id (12)
pub const OBJECT_LAYOUT: BitLayout<3> = BitLayout::new(WordWidth::Bits16, [3, 1, 12]);

/// Presence word: mode (4), parameter (6), flag (3), then one bit each for
/// 3-4 players, 2 players and single player
pub const PRESENCE_LAYOUT: BitLayout<6> =
    BitLayout::new(WordWidth::Bits16, [4, 6, 3, 1, 1, 1]);

const OBJECT_FIELDS: [&str; 3] = ["type", "enable", "object"];
const PRESENCE_FIELDS: [&str; 6] = ["mode", "parameter", "flag", "multi_3_4", "multi_2", "single"];

/// Conditional activation of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresenceFlag {
    /// Condition mode
    pub mode: u8,
    /// Condition parameter
    pub parameter: u8,
    /// Extra flag bits
    pub flag: u8,
    /// Present with 3-4 players
    pub multi_3_4: bool,
    /// Present with 2 players
    pub multi_2: bool,
    /// Present in single player
    pub single: bool,
}

impl PresenceFlag {
    /// Present in every player count with no condition
    pub const ALWAYS: Self = Self {
        mode: 0,
        parameter: 0,
        flag: 0,
        multi_3_4: true,
        multi_2: true,
        single: true,
    };

    /// Unpack from the on-disk word
    pub fn from_word(word: u16) -> Result<Self> {
        let [mode, parameter, flag, multi_3_4, multi_2, single] =
            PRESENCE_LAYOUT.unpack(word).map_err(KmpError::Bitfield)?;
        Ok(Self {
            mode: mode as u8,
            parameter: parameter as u8,
            flag: flag as u8,
            multi_3_4: multi_3_4 == 1,
            multi_2: multi_2 == 1,
            single: single == 1,
        })
    }

    /// Pack into the on-disk word
    pub fn to_word(&self, row: usize) -> Result<u16> {
        PRESENCE_LAYOUT
            .pack([
                u32::from(self.mode),
                u32::from(self.parameter),
                u32::from(self.flag),
                u32::from(self.multi_3_4),
                u32::from(self.multi_2),
                u32::from(self.single),
            ])
            .map_err(|e| KmpError::from_bitfield(e, SectionTag::Gobj, row, &PRESENCE_FIELDS))
    }
}

/// One placed object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameObject {
    /// Object type bits (3 bits)
    pub kind: u8,
    /// Enable bit
    pub enabled: bool,
    /// Object id (12 bits)
    pub object_id: u16,
    /// Reference word, shown as hex in the tabular form
    pub reference: u16,
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
    /// Route index, 0xFFFF for none
    pub route: u16,
    /// Object-specific settings
    pub settings: [u16; 8],
    /// Presence condition
    pub presence: PresenceFlag,
}

impl Default for GameObject {
    fn default() -> Self {
        Self {
            kind: 0,
            enabled: false,
            object_id: 0,
            reference: 0,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            route: 0xFFFF,
            settings: [0; 8],
            presence: PresenceFlag::ALWAYS,
        }
    }
}

impl GameObject {
    /// Encoded size in bytes
    pub const SIZE: usize = 60;

    /// Read one record
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let [kind, enabled, object_id] = OBJECT_LAYOUT
            .unpack(reader.read_u16()?)
            .map_err(KmpError::Bitfield)?;
        let reference = reader.read_u16()?;
        let position = reader.read_f32_array::<3>()?;
        let rotation = reader.read_f32_array::<3>()?;
        let scale = reader.read_f32_array::<3>()?;
        let route = reader.read_u16()?;
        let settings = reader.read_u16_array::<8>()?;
        let presence = PresenceFlag::from_word(reader.read_u16()?)?;

        Ok(Self {
            kind: kind as u8,
            enabled: enabled == 1,
            object_id: object_id as u16,
            reference,
            position,
            rotation,
            scale,
            route,
            settings,
            presence,
        })
    }

    /// Write one record; `row` is used for error context
    pub fn write(&self, writer: &mut ByteWriter, row: usize) -> Result<()> {
        let word = OBJECT_LAYOUT
            .pack([
                u32::from(self.kind),
                u32::from(self.enabled),
                u32::from(self.object_id),
            ])
            .map_err(|e| KmpError::from_bitfield(e, SectionTag::Gobj, row, &OBJECT_FIELDS))?;

        writer.write_u16(word)?;
        writer.write_u16(self.reference)?;
        writer.write_f32_array(&self.position)?;
        writer.write_f32_array(&self.rotation)?;
        writer.write_f32_array(&self.scale)?;
        writer.write_u16(self.route)?;
        writer.write_u16_array(&self.settings)?;
        writer.write_u16(self.presence.to_word(row)?)
    }
}

/// Format a reference word the way the tabular form shows it (`0x1A2B`)
#[must_use]
pub fn format_reference(value: u16) -> String {
    format!("0x{}", hex::encode_upper(value.to_be_bytes()))
}

/// Parse a reference cell: up to four hex digits with an optional `0x` prefix
#[must_use]
pub fn parse_reference(text: &str) -> Option<u16> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 4 {
        return None;
    }

    let padded = format!("{digits:0>4}");
    let bytes = hex::decode(padded).ok()?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}
