//! Area volumes (AREA)

use crate::cursor::FixedRecord;
use binrw::{BinRead, BinWrite};

/// Trigger volume
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct Area {
    /// 0 = box, 1 = cylinder
    pub shape: u8,
    /// Area type
    pub kind: u8,
    /// Camera index
    pub camera: u8,
    /// Priority among overlapping areas
    pub priority: u8,
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
    /// First type-specific setting
    pub setting1: u16,
    /// Second type-specific setting
    pub setting2: u16,
    /// Route index
    pub route: u8,
    /// Enemy point index
    #[brw(pad_after = 2)]
    pub enemy: u8,
}

impl FixedRecord for Area {
    const SIZE: usize = 48;
}
