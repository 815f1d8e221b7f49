//! Section schema registry
//!
//! Every section starts with the same 8-byte header:
//!
//! | Offset | Size | Field                                        |
//! |--------|------|----------------------------------------------|
//! | 0      | 4    | Tag (`KTPT`, `ENPT`, ...)                     |
//! | 4      | 2    | Entry count                                   |
//! | 6      | 2    | Tag-dependent: padding, route-point total for |
//! |        |      | `POTI`, two starting-camera indices for `CAME`|
//!
//! followed by `entry count` records whose layout depends on the tag. Most
//! tags hold fixed-size records; `POTI` holds variable-length routes.

mod area;
mod camera;
mod object;
mod path;
mod point;
mod route;
mod stage;

pub use area::Area;
pub use camera::{Camera, CameraList, NO_CAMERA};
pub use object::{
    GameObject, OBJECT_LAYOUT, PRESENCE_LAYOUT, PresenceFlag, format_reference, parse_reference,
};
pub use path::{CheckpointPoint, EnemyPoint, ItemPoint, MAX_GROUP_LINKS, NO_LINK, PathGroup};
pub use point::{CannonPoint, MissionPoint, RespawnPoint, StartPoint};
pub use route::{Route, RoutePoint};
pub use stage::StageInfo;

use crate::cursor::{ByteReader, ByteWriter, FixedRecord, narrow};
use crate::error::{KmpError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, warn};

/// Size of the common section header
pub const SECTION_HEADER_SIZE: usize = 8;

/// Section tags known to the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionTag {
    /// Start/finish points
    Ktpt,
    /// Enemy path points
    Enpt,
    /// Enemy path groups
    Enph,
    /// Item path points
    Itpt,
    /// Item path groups
    Itph,
    /// Checkpoints
    Ckpt,
    /// Checkpoint groups
    Ckph,
    /// Objects
    Gobj,
    /// Routes
    Poti,
    /// Areas
    Area,
    /// Cameras
    Came,
    /// Respawn points
    Jgpt,
    /// Cannon points
    Cnpt,
    /// Mission start points
    Mspt,
    /// Stage info
    Stgi,
}

impl SectionTag {
    /// Order in which sections are written
    pub const CANONICAL_ORDER: [Self; 15] = [
        Self::Ktpt,
        Self::Enpt,
        Self::Enph,
        Self::Itpt,
        Self::Itph,
        Self::Ckpt,
        Self::Ckph,
        Self::Gobj,
        Self::Poti,
        Self::Area,
        Self::Came,
        Self::Jgpt,
        Self::Cnpt,
        Self::Mspt,
        Self::Stgi,
    ];

    /// Four-character tag text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ktpt => "KTPT",
            Self::Enpt => "ENPT",
            Self::Enph => "ENPH",
            Self::Itpt => "ITPT",
            Self::Itph => "ITPH",
            Self::Ckpt => "CKPT",
            Self::Ckph => "CKPH",
            Self::Gobj => "GOBJ",
            Self::Poti => "POTI",
            Self::Area => "AREA",
            Self::Came => "CAME",
            Self::Jgpt => "JGPT",
            Self::Cnpt => "CNPT",
            Self::Mspt => "MSPT",
            Self::Stgi => "STGI",
        }
    }

    /// Tag bytes as stored on disk
    #[must_use]
    pub fn as_bytes(self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.as_str().as_bytes());
        bytes
    }

    /// Look up a tag by its on-disk bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        Self::CANONICAL_ORDER
            .into_iter()
            .find(|tag| tag.as_str().as_bytes() == bytes)
    }

    /// Position in [`Self::CANONICAL_ORDER`]
    #[must_use]
    pub fn canonical_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One decoded section
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// KTPT
    StartPoints(Vec<StartPoint>),
    /// ENPT
    EnemyPoints(Vec<EnemyPoint>),
    /// ENPH
    EnemyGroups(Vec<PathGroup>),
    /// ITPT
    ItemPoints(Vec<ItemPoint>),
    /// ITPH
    ItemGroups(Vec<PathGroup>),
    /// CKPT
    CheckpointPoints(Vec<CheckpointPoint>),
    /// CKPH
    CheckpointGroups(Vec<PathGroup>),
    /// GOBJ
    Objects(Vec<GameObject>),
    /// POTI
    Routes(Vec<Route>),
    /// AREA
    Areas(Vec<Area>),
    /// CAME
    Cameras(CameraList),
    /// JGPT
    RespawnPoints(Vec<RespawnPoint>),
    /// CNPT
    CannonPoints(Vec<CannonPoint>),
    /// MSPT
    MissionPoints(Vec<MissionPoint>),
    /// STGI
    StageInfo(Vec<StageInfo>),
}

impl Section {
    /// Tag of this section
    #[must_use]
    pub fn tag(&self) -> SectionTag {
        match self {
            Self::StartPoints(_) => SectionTag::Ktpt,
            Self::EnemyPoints(_) => SectionTag::Enpt,
            Self::EnemyGroups(_) => SectionTag::Enph,
            Self::ItemPoints(_) => SectionTag::Itpt,
            Self::ItemGroups(_) => SectionTag::Itph,
            Self::CheckpointPoints(_) => SectionTag::Ckpt,
            Self::CheckpointGroups(_) => SectionTag::Ckph,
            Self::Objects(_) => SectionTag::Gobj,
            Self::Routes(_) => SectionTag::Poti,
            Self::Areas(_) => SectionTag::Area,
            Self::Cameras(_) => SectionTag::Came,
            Self::RespawnPoints(_) => SectionTag::Jgpt,
            Self::CannonPoints(_) => SectionTag::Cnpt,
            Self::MissionPoints(_) => SectionTag::Mspt,
            Self::StageInfo(_) => SectionTag::Stgi,
        }
    }

    /// Number of entries written in the section header
    #[must_use]
    pub fn entry_count(&self) -> usize {
        match self {
            Self::StartPoints(v) => v.len(),
            Self::EnemyPoints(v) => v.len(),
            Self::ItemPoints(v) => v.len(),
            Self::CheckpointPoints(v) => v.len(),
            Self::EnemyGroups(v) | Self::ItemGroups(v) | Self::CheckpointGroups(v) => v.len(),
            Self::Objects(v) => v.len(),
            Self::Routes(v) => v.len(),
            Self::Areas(v) => v.len(),
            Self::Cameras(list) => list.cameras.len(),
            Self::RespawnPoints(v) => v.len(),
            Self::CannonPoints(v) => v.len(),
            Self::MissionPoints(v) => v.len(),
            Self::StageInfo(v) => v.len(),
        }
    }

    /// An empty section for `tag`
    #[must_use]
    pub fn empty(tag: SectionTag) -> Self {
        match tag {
            SectionTag::Ktpt => Self::StartPoints(Vec::new()),
            SectionTag::Enpt => Self::EnemyPoints(Vec::new()),
            SectionTag::Enph => Self::EnemyGroups(Vec::new()),
            SectionTag::Itpt => Self::ItemPoints(Vec::new()),
            SectionTag::Itph => Self::ItemGroups(Vec::new()),
            SectionTag::Ckpt => Self::CheckpointPoints(Vec::new()),
            SectionTag::Ckph => Self::CheckpointGroups(Vec::new()),
            SectionTag::Gobj => Self::Objects(Vec::new()),
            SectionTag::Poti => Self::Routes(Vec::new()),
            SectionTag::Area => Self::Areas(Vec::new()),
            SectionTag::Came => Self::Cameras(CameraList::default()),
            SectionTag::Jgpt => Self::RespawnPoints(Vec::new()),
            SectionTag::Cnpt => Self::CannonPoints(Vec::new()),
            SectionTag::Mspt => Self::MissionPoints(Vec::new()),
            SectionTag::Stgi => Self::StageInfo(Vec::new()),
        }
    }

    /// Decode the section starting at the reader's position
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let offset = reader.tell();
        let raw_tag = reader.read_u8_array::<4>()?;
        let tag = SectionTag::from_bytes(raw_tag).ok_or_else(|| {
            KmpError::UnknownSection(String::from_utf8_lossy(&raw_tag).into_owned())
        })?;
        let count = usize::from(reader.read_u16()?);
        let extra = reader.read_u8_array::<2>()?;

        let section = match tag {
            SectionTag::Ktpt => Self::StartPoints(reader.read_records(count)?),
            SectionTag::Enpt => Self::EnemyPoints(reader.read_records(count)?),
            SectionTag::Enph => Self::EnemyGroups(reader.read_records(count)?),
            SectionTag::Itpt => Self::ItemPoints(reader.read_records(count)?),
            SectionTag::Itph => Self::ItemGroups(read_padded_groups(reader, count)?),
            SectionTag::Ckpt => Self::CheckpointPoints(reader.read_records(count)?),
            SectionTag::Ckph => Self::CheckpointGroups(read_padded_groups(reader, count)?),
            SectionTag::Gobj => Self::Objects(
                (0..count)
                    .map(|_| GameObject::read(reader))
                    .collect::<Result<_>>()?,
            ),
            SectionTag::Poti => {
                let routes = (0..count)
                    .map(|_| Route::read(reader))
                    .collect::<Result<Vec<_>>>()?;
                let declared = usize::from(u16::from_be_bytes(extra));
                let actual: usize = routes.iter().map(|r| r.points.len()).sum();
                if declared != actual {
                    warn!(declared, actual, "POTI header point total disagrees with routes");
                }
                Self::Routes(routes)
            }
            SectionTag::Area => Self::Areas(reader.read_records(count)?),
            SectionTag::Came => Self::Cameras(CameraList {
                first: extra,
                cameras: reader.read_records(count)?,
            }),
            SectionTag::Jgpt => Self::RespawnPoints(reader.read_records(count)?),
            SectionTag::Cnpt => Self::CannonPoints(reader.read_records(count)?),
            SectionTag::Mspt => Self::MissionPoints(reader.read_records(count)?),
            SectionTag::Stgi => Self::StageInfo(
                (0..count)
                    .map(|_| StageInfo::read(reader))
                    .collect::<Result<_>>()?,
            ),
        };

        debug!(%tag, entries = count, offset, "decoded section");
        Ok(section)
    }

    /// Encode the section at the writer's position
    pub fn write(&self, writer: &mut ByteWriter) -> Result<()> {
        let tag = self.tag();
        writer.write_u8_array(&tag.as_bytes())?;
        writer.write_u16(narrow(self.entry_count(), tag.as_str(), 0, "entry count")?)?;
        writer.write_u8_array(&self.header_extra()?)?;

        match self {
            Self::StartPoints(v) => write_records(writer, v)?,
            Self::EnemyPoints(v) => write_records(writer, v)?,
            Self::EnemyGroups(v) => write_records(writer, v)?,
            Self::ItemPoints(v) => write_records(writer, v)?,
            Self::CheckpointPoints(v) => write_records(writer, v)?,
            Self::ItemGroups(v) | Self::CheckpointGroups(v) => {
                for group in v {
                    writer.write_record(&PathGroup {
                        dispatch: [0; 2],
                        ..*group
                    })?;
                }
            }
            Self::Objects(v) => {
                for (row, object) in v.iter().enumerate() {
                    object.write(writer, row)?;
                }
            }
            Self::Routes(v) => {
                for (row, route) in v.iter().enumerate() {
                    route.write(writer, row)?;
                }
            }
            Self::Areas(v) => write_records(writer, v)?,
            Self::Cameras(list) => write_records(writer, &list.cameras)?,
            Self::RespawnPoints(v) => write_records(writer, v)?,
            Self::CannonPoints(v) => write_records(writer, v)?,
            Self::MissionPoints(v) => write_records(writer, v)?,
            Self::StageInfo(v) => {
                for info in v {
                    info.write(writer)?;
                }
            }
        }

        debug!(%tag, entries = self.entry_count(), "encoded section");
        Ok(())
    }

    fn header_extra(&self) -> Result<[u8; 2]> {
        match self {
            Self::Routes(routes) => {
                let total: usize = routes.iter().map(|r| r.points.len()).sum();
                let total: u16 = narrow(total, "POTI", 0, "route point total")?;
                Ok(total.to_be_bytes())
            }
            Self::Cameras(list) => Ok(list.first),
            _ => Ok([0; 2]),
        }
    }
}

fn read_padded_groups(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<PathGroup>> {
    let mut groups: Vec<PathGroup> = reader.read_records(count)?;
    for group in &mut groups {
        group.dispatch = [0; 2];
    }
    Ok(groups)
}

fn write_records<T: FixedRecord>(writer: &mut ByteWriter, records: &[T]) -> Result<()> {
    records
        .iter()
        .try_for_each(|record| writer.write_record(record))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn encode(section: &Section) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        section.write(&mut writer).expect("Operation should succeed");
        writer.into_inner()
    }

    fn decode(data: &[u8]) -> Section {
        Section::read(&mut ByteReader::new(data)).expect("Operation should succeed")
    }

    #[test]
    fn test_tag_lookup() {
        for tag in SectionTag::CANONICAL_ORDER {
            assert_eq!(SectionTag::from_bytes(tag.as_bytes()), Some(tag));
            assert_eq!(SectionTag::CANONICAL_ORDER[tag.canonical_index()], tag);
        }
        assert_eq!(SectionTag::from_bytes(*b"XXXX"), None);
        assert_eq!(SectionTag::Came.to_string(), "CAME");
    }

    #[test]
    fn test_unknown_section() {
        let data = *b"WXYZ\0\0\0\0";
        let err = Section::read(&mut ByteReader::new(&data)).expect_err("Test operation should fail");
        assert!(matches!(err, KmpError::UnknownSection(ref tag) if tag == "WXYZ"));
    }

    #[test]
    fn test_start_point_section() {
        let section = Section::StartPoints(vec![StartPoint {
            position: [0.0; 3],
            rotation: [0.0; 3],
            player_index: -1,
        }]);
        let data = encode(&section);

        assert_eq!(&data[0..8], b"KTPT\x00\x01\x00\x00");
        assert_eq!(data.len(), SECTION_HEADER_SIZE + 28);
        assert_eq!(decode(&data), section);
    }

    #[test]
    fn test_every_empty_section_round_trips() {
        for tag in SectionTag::CANONICAL_ORDER {
            let section = Section::empty(tag);
            let data = encode(&section);
            assert_eq!(data.len(), SECTION_HEADER_SIZE, "{tag}");
            assert_eq!(&data[0..4], &tag.as_bytes());
            let parsed = decode(&data);
            assert_eq!(parsed.tag(), tag);
            assert_eq!(parsed.entry_count(), 0);
        }
    }

    #[test]
    fn test_item_group_tail_is_padding() {
        let group = PathGroup {
            start: 0,
            length: 3,
            dispatch: [7, 8],
            ..PathGroup::default()
        };

        let enemy = encode(&Section::EnemyGroups(vec![group]));
        assert_eq!(&enemy[22..24], &[7, 8]);

        let item = encode(&Section::ItemGroups(vec![group]));
        assert_eq!(&item[22..24], &[0, 0]);

        // Stray bytes in the padding are dropped on read
        let mut raw = item;
        raw[22] = 0x55;
        let Section::ItemGroups(groups) = decode(&raw) else {
            panic!("expected item groups");
        };
        assert_eq!(groups[0].dispatch, [0, 0]);
    }

    #[test]
    fn test_route_header_holds_point_total() {
        let section = Section::Routes(vec![
            Route {
                setting1: 0,
                setting2: 1,
                points: vec![RoutePoint::default(); 3],
            },
            Route {
                setting1: 1,
                setting2: 0,
                points: vec![RoutePoint::default(); 2],
            },
        ]);
        let data = encode(&section);

        assert_eq!(&data[4..8], &[0, 2, 0, 5]);
        assert_eq!(data.len(), SECTION_HEADER_SIZE + 2 * 4 + 5 * 16);
        assert_eq!(decode(&data), section);
    }

    #[test]
    fn test_camera_header_holds_first_cameras() {
        let section = Section::Cameras(CameraList {
            first: [2, 0],
            cameras: vec![Camera::default(); 3],
        });
        let data = encode(&section);

        assert_eq!(&data[4..8], &[0, 3, 2, 0]);
        assert_eq!(decode(&data), section);
    }

    #[test]
    fn test_truncated_section() {
        let mut data = encode(&Section::Areas(vec![Area::default(); 2]));
        data.truncate(data.len() - 1);
        let err = Section::read(&mut ByteReader::new(&data)).expect_err("Test operation should fail");
        assert!(matches!(err, KmpError::UnexpectedEnd { .. }));
    }
}
