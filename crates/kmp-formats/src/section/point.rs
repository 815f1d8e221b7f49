//! Position + rotation point records (KTPT, JGPT, CNPT, MSPT)

use crate::cursor::FixedRecord;
use binrw::{BinRead, BinWrite};

/// Start/finish point (KTPT)
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct StartPoint {
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Player index, -1 for all players
    #[brw(pad_after = 2)]
    pub player_index: i16,
}

impl FixedRecord for StartPoint {
    const SIZE: usize = 28;
}

/// Respawn point (JGPT)
///
/// The 16-bit slot before `range` holds the point id in some files; it is
/// treated as padding and written as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct RespawnPoint {
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Respawn range
    #[brw(pad_before = 2)]
    pub range: i16,
}

impl FixedRecord for RespawnPoint {
    const SIZE: usize = 28;
}

/// Cannon target point (CNPT)
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct CannonPoint {
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Cannon id
    pub cannon_id: u16,
    /// Shooting effect
    pub shoot: i16,
}

impl FixedRecord for CannonPoint {
    const SIZE: usize = 28;
}

/// Mission start point (MSPT)
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct MissionPoint {
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Entry id
    #[brw(pad_after = 2)]
    pub entry: u16,
}

impl FixedRecord for MissionPoint {
    const SIZE: usize = 28;
}
