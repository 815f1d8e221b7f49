//! Path point and path-group records (ENPT/ITPT/CKPT and ENPH/ITPH/CKPH)

use crate::cursor::FixedRecord;
use binrw::{BinRead, BinWrite};

/// Unused predecessor/successor slot
pub const NO_LINK: u8 = 0xFF;

/// Maximum predecessor or successor links per group
pub const MAX_GROUP_LINKS: usize = 6;

/// Enemy route point (ENPT)
///
/// Layout: position (3 × f32), range (f32), one 16-bit and two 8-bit settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct EnemyPoint {
    /// World position
    pub position: [f32; 3],
    /// Width of the point's influence
    pub range: f32,
    /// 16-bit setting
    pub setting1: u16,
    /// First 8-bit setting
    pub setting2: u8,
    /// Second 8-bit setting
    pub setting3: u8,
}

impl FixedRecord for EnemyPoint {
    const SIZE: usize = 20;
}

/// Item route point (ITPT)
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct ItemPoint {
    /// World position
    pub position: [f32; 3],
    /// Width of the point's influence
    pub range: f32,
    /// First 16-bit setting
    pub setting1: u16,
    /// Second 16-bit setting
    pub setting2: u16,
}

impl FixedRecord for ItemPoint {
    const SIZE: usize = 20;
}

/// Checkpoint (CKPT)
///
/// The two link bytes chain checkpoints inside one group. They are kept here
/// so the record mirrors the file, but the tabular form never stores them;
/// they are recomputed from group boundaries when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct CheckpointPoint {
    /// Left end of the checkpoint line (x, z)
    pub left: [f32; 2],
    /// Right end of the checkpoint line (x, z)
    pub right: [f32; 2],
    /// Respawn point index
    pub respawn: u8,
    /// Checkpoint type (0 = lap counter, 0xFF = regular)
    pub kind: u8,
    /// Previous checkpoint in the group, or [`NO_LINK`]
    pub previous: u8,
    /// Next checkpoint in the group, or [`NO_LINK`]
    pub next: u8,
}

impl FixedRecord for CheckpointPoint {
    const SIZE: usize = 20;
}

/// Path group (ENPH/ITPH/CKPH)
///
/// Covers the point range `[start, start + length)` and links to up to six
/// predecessor and six successor groups. The trailing two bytes are dispatch
/// settings for enemy groups and padding everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(big)]
pub struct PathGroup {
    /// First point index
    pub start: u8,
    /// Number of points
    pub length: u8,
    /// Predecessor group indices
    pub previous: [u8; MAX_GROUP_LINKS],
    /// Successor group indices
    pub next: [u8; MAX_GROUP_LINKS],
    /// Enemy-path dispatch bytes
    pub dispatch: [u8; 2],
}

impl FixedRecord for PathGroup {
    const SIZE: usize = 16;
}

impl Default for PathGroup {
    fn default() -> Self {
        Self {
            start: 0,
            length: 0,
            previous: [NO_LINK; MAX_GROUP_LINKS],
            next: [NO_LINK; MAX_GROUP_LINKS],
            dispatch: [0; 2],
        }
    }
}

impl PathGroup {
    /// Exclusive end of the covered point range
    #[must_use]
    pub fn end(&self) -> usize {
        usize::from(self.start) + usize::from(self.length)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cursor::{ByteReader, ByteWriter};

    #[test]
    fn test_record_sizes_match_layout() {
        let mut writer = ByteWriter::new();
        writer
            .write_record(&EnemyPoint::default())
            .expect("Operation should succeed");
        assert_eq!(writer.len(), EnemyPoint::SIZE);

        let mut writer = ByteWriter::new();
        writer
            .write_record(&ItemPoint::default())
            .expect("Operation should succeed");
        assert_eq!(writer.len(), ItemPoint::SIZE);

        let mut writer = ByteWriter::new();
        writer
            .write_record(&CheckpointPoint::default())
            .expect("Operation should succeed");
        assert_eq!(writer.len(), CheckpointPoint::SIZE);

        let mut writer = ByteWriter::new();
        writer
            .write_record(&PathGroup::default())
            .expect("Operation should succeed");
        assert_eq!(writer.len(), PathGroup::SIZE);
    }

    #[test]
    fn test_enemy_point_layout() {
        let point = EnemyPoint {
            position: [1.0, 2.0, 3.0],
            range: 10.0,
            setting1: 0x0102,
            setting2: 3,
            setting3: 4,
        };
        let mut writer = ByteWriter::new();
        writer.write_record(&point).expect("Operation should succeed");
        let data = writer.into_inner();

        assert_eq!(&data[0..4], &1.0f32.to_be_bytes());
        assert_eq!(&data[12..16], &10.0f32.to_be_bytes());
        assert_eq!(&data[16..20], &[0x01, 0x02, 3, 4]);

        let parsed: EnemyPoint = ByteReader::new(&data)
            .read_record()
            .expect("Operation should succeed");
        assert_eq!(parsed, point);
    }

    #[test]
    fn test_group_layout() {
        let group = PathGroup {
            start: 4,
            length: 6,
            previous: [0, NO_LINK, NO_LINK, NO_LINK, NO_LINK, NO_LINK],
            next: [2, 3, NO_LINK, NO_LINK, NO_LINK, NO_LINK],
            dispatch: [0xAA, 0xBB],
        };
        let mut writer = ByteWriter::new();
        writer.write_record(&group).expect("Operation should succeed");
        let data = writer.into_inner();

        assert_eq!(data[0], 4);
        assert_eq!(data[1], 6);
        assert_eq!(data[2], 0);
        assert_eq!(data[8], 2);
        assert_eq!(&data[14..16], &[0xAA, 0xBB]);
        assert_eq!(group.end(), 10);
    }
}
