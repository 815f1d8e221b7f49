//! Stage information (STGI)

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::Result;

/// Per-course settings
///
/// The speed factor is stored as the high 16 bits of a big-endian `f32`, so
/// only values whose low 16 bits are zero survive a round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageInfo {
    /// Lap count
    pub lap_count: u8,
    /// Pole position side
    pub pole_position: u8,
    /// Driver distance (narrow start)
    pub driver_distance: u8,
    /// Lens flare flashing flag
    pub flare_flashing: u8,
    /// Lens flare color, RGBA
    pub flare_color: [u8; 4],
    /// Speed modifier
    pub speed_factor: f32,
}

impl Default for StageInfo {
    fn default() -> Self {
        Self {
            lap_count: 3,
            pole_position: 0,
            driver_distance: 0,
            flare_flashing: 0,
            flare_color: [0xE6, 0xE6, 0xE6, 0x00],
            speed_factor: 1.0,
        }
    }
}

impl StageInfo {
    /// Encoded size in bytes
    pub const SIZE: usize = 12;

    /// Read one record
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let [lap_count, pole_position, driver_distance, flare_flashing] =
            reader.read_u8_array::<4>()?;
        reader.skip(1)?;
        let flare_color = reader.read_u8_array::<4>()?;
        reader.skip(1)?;
        let speed_factor = reader.read_half_f32()?;

        Ok(Self {
            lap_count,
            pole_position,
            driver_distance,
            flare_flashing,
            flare_color,
            speed_factor,
        })
    }

    /// Write one record
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u8_array(&[
            self.lap_count,
            self.pole_position,
            self.driver_distance,
            self.flare_flashing,
        ])?;
        writer.write_padding(1)?;
        writer.write_u8_array(&self.flare_color)?;
        writer.write_padding(1)?;
        writer.write_half_f32(self.speed_factor)
    }
}
