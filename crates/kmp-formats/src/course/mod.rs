//! Rows-by-section view of a KMP file
//!
//! [`Course`] has one row list per sheet. Path sections are merged with their
//! group sections ([`PathRow`]), routes are flattened to one row per point
//! ([`RouteRow`]), and the camera header's two starting-camera indices become
//! per-row flags ([`CameraRow`]). Checkpoint link bytes are derived from the
//! group layout, so [`CheckpointRow`] does not carry them.

mod sheets;

pub use sheets::{SHEET_NAMES, from_workbook, to_workbook};

use crate::cursor::narrow;
use crate::error::{KmpError, Result};
use crate::file::{DEFAULT_VERSION, KmpFile};
use crate::linker::{CheckpointLinks, PathRow, PointLinks, expand, flatten, split_runs};
use crate::section::{
    Area, Camera, CameraList, CannonPoint, CheckpointPoint, EnemyPoint, GameObject, ItemPoint,
    MissionPoint, NO_CAMERA, PathGroup, RespawnPoint, Route, RoutePoint, Section, SectionTag,
    StageInfo, StartPoint,
};
use tracing::{debug, warn};

/// Route-wide data carried by the first point of each route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteHeader {
    /// Route index
    pub id: u16,
    /// First route setting
    pub setting1: u8,
    /// Second route setting
    pub setting2: u8,
}

/// One route point, with the route header on the first point of each route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    /// Route header, present on the first point of a route
    pub header: Option<RouteHeader>,
    /// The point
    pub point: RoutePoint,
}

/// One checkpoint line without its link bytes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CheckpointRow {
    /// Left end (x, z)
    pub left: [f32; 2],
    /// Right end (x, z)
    pub right: [f32; 2],
    /// Respawn point index
    pub respawn: u8,
    /// Checkpoint type (0 = lap count, 0xFF = regular)
    pub kind: u8,
}

impl CheckpointRow {
    fn linked(self, links: PointLinks) -> CheckpointPoint {
        CheckpointPoint {
            left: self.left,
            right: self.right,
            respawn: self.respawn,
            kind: self.kind,
            previous: links.previous,
            next: links.next,
        }
    }
}

impl From<CheckpointPoint> for CheckpointRow {
    fn from(point: CheckpointPoint) -> Self {
        Self {
            left: point.left,
            right: point.right,
            respawn: point.respawn,
            kind: point.kind,
        }
    }
}

/// One camera with its starting-camera marks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRow {
    /// The camera record
    pub camera: Camera,
    /// Marked as the first starting camera
    pub first_1: bool,
    /// Marked as the second starting camera
    pub first_2: bool,
}

/// A whole course, one row list per sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Container version
    pub version: u32,
    /// KTPT
    pub start_points: Vec<StartPoint>,
    /// ENPT + ENPH
    pub enemy_paths: Vec<PathRow<EnemyPoint>>,
    /// ITPT + ITPH
    pub item_paths: Vec<PathRow<ItemPoint>>,
    /// CKPT + CKPH
    pub checkpoints: Vec<PathRow<CheckpointRow>>,
    /// GOBJ
    pub objects: Vec<GameObject>,
    /// POTI
    pub routes: Vec<RouteRow>,
    /// AREA
    pub areas: Vec<Area>,
    /// CAME
    pub cameras: Vec<CameraRow>,
    /// JGPT
    pub respawn_points: Vec<RespawnPoint>,
    /// CNPT
    pub cannon_points: Vec<CannonPoint>,
    /// MSPT
    pub mission_points: Vec<MissionPoint>,
    /// STGI
    pub stage_info: Vec<StageInfo>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            start_points: Vec::new(),
            enemy_paths: Vec::new(),
            item_paths: Vec::new(),
            checkpoints: Vec::new(),
            objects: Vec::new(),
            routes: Vec::new(),
            areas: Vec::new(),
            cameras: Vec::new(),
            respawn_points: Vec::new(),
            cannon_points: Vec::new(),
            mission_points: Vec::new(),
            stage_info: Vec::new(),
        }
    }
}

/// Decode a KMP file into rows
pub fn decode(data: &[u8]) -> Result<Course> {
    Course::from_file(&KmpFile::parse(data)?)
}

/// Encode rows into a KMP file
pub fn encode(course: &Course) -> Result<Vec<u8>> {
    course.to_file()?.build()
}

/// Pull a section's rows out of a file, or an empty list if it is absent
macro_rules! records {
    ($file:expr, $tag:expr, $variant:ident) => {
        match $file.section($tag) {
            Some(Section::$variant(records)) => records.clone(),
            _ => Vec::new(),
        }
    };
}

impl Course {
    /// Build the rows from a decoded container
    pub fn from_file(file: &KmpFile) -> Result<Self> {
        let enemy_points = records!(file, SectionTag::Enpt, EnemyPoints);
        let enemy_groups = records!(file, SectionTag::Enph, EnemyGroups);
        let item_points = records!(file, SectionTag::Itpt, ItemPoints);
        let item_groups = records!(file, SectionTag::Itph, ItemGroups);
        let checkpoint_points = records!(file, SectionTag::Ckpt, CheckpointPoints);
        let checkpoint_groups = records!(file, SectionTag::Ckph, CheckpointGroups);

        let checkpoints = unlink_checkpoints(&expand(
            SectionTag::Ckph,
            &checkpoint_points,
            &checkpoint_groups,
        )?)?;

        let course = Self {
            version: file.header.version,
            start_points: records!(file, SectionTag::Ktpt, StartPoints),
            enemy_paths: expand(SectionTag::Enph, &enemy_points, &enemy_groups)?,
            item_paths: expand(SectionTag::Itph, &item_points, &item_groups)?,
            checkpoints,
            objects: records!(file, SectionTag::Gobj, Objects),
            routes: route_rows(&records!(file, SectionTag::Poti, Routes))?,
            areas: records!(file, SectionTag::Area, Areas),
            cameras: match file.section(SectionTag::Came) {
                Some(Section::Cameras(list)) => camera_rows(list)?,
                _ => Vec::new(),
            },
            respawn_points: records!(file, SectionTag::Jgpt, RespawnPoints),
            cannon_points: records!(file, SectionTag::Cnpt, CannonPoints),
            mission_points: records!(file, SectionTag::Mspt, MissionPoints),
            stage_info: records!(file, SectionTag::Stgi, StageInfo),
        };

        for tag in SectionTag::CANONICAL_ORDER {
            if file.section(tag).is_none() {
                debug!(%tag, "section absent, decoded as empty");
            }
        }
        Ok(course)
    }

    /// Split the rows back into all fifteen sections
    pub fn to_file(&self) -> Result<KmpFile> {
        let (enemy_points, enemy_groups) = flatten(SectionTag::Enph, &self.enemy_paths)?;
        let (item_points, item_groups) = flatten(SectionTag::Itph, &self.item_paths)?;

        let (checkpoint_rows, checkpoint_groups) = flatten(SectionTag::Ckph, &self.checkpoints)?;
        let links =
            CheckpointLinks::compute(self.checkpoints.iter().map(|row| row.group.is_some()))?;
        let checkpoint_points = checkpoint_rows
            .into_iter()
            .zip(links)
            .map(|(row, links)| row.linked(links))
            .collect();

        let sections = vec![
            Section::StartPoints(self.start_points.clone()),
            Section::EnemyPoints(enemy_points),
            Section::EnemyGroups(enemy_groups),
            Section::ItemPoints(item_points),
            Section::ItemGroups(strip_dispatch(item_groups)),
            Section::CheckpointPoints(checkpoint_points),
            Section::CheckpointGroups(strip_dispatch(checkpoint_groups)),
            Section::Objects(self.objects.clone()),
            Section::Routes(routes(&self.routes)?),
            Section::Areas(self.areas.clone()),
            Section::Cameras(camera_list(&self.cameras)?),
            Section::RespawnPoints(self.respawn_points.clone()),
            Section::CannonPoints(self.cannon_points.clone()),
            Section::MissionPoints(self.mission_points.clone()),
            Section::StageInfo(self.stage_info.clone()),
        ];

        KmpFile::new(self.version, sections)
    }
}

/// Drop checkpoint link bytes, warning when they disagree with the group layout
fn unlink_checkpoints(rows: &[PathRow<CheckpointPoint>]) -> Result<Vec<PathRow<CheckpointRow>>> {
    let links = CheckpointLinks::compute(rows.iter().map(|row| row.group.is_some()))?;

    let differing = rows
        .iter()
        .zip(&links)
        .filter(|(row, link)| (row.point.previous, row.point.next) != (link.previous, link.next))
        .count();
    if differing > 0 {
        warn!(
            points = differing,
            "checkpoint link bytes disagree with group layout; using group layout"
        );
    }

    Ok(rows
        .iter()
        .map(|row| PathRow {
            point: CheckpointRow::from(row.point),
            group: row.group,
        })
        .collect())
}

fn strip_dispatch(groups: Vec<PathGroup>) -> Vec<PathGroup> {
    groups
        .into_iter()
        .map(|group| PathGroup {
            dispatch: [0; 2],
            ..group
        })
        .collect()
}

fn route_rows(routes: &[Route]) -> Result<Vec<RouteRow>> {
    let mut rows = Vec::new();
    for (index, route) in routes.iter().enumerate() {
        if route.points.is_empty() {
            return Err(KmpError::EmptyRoute { route: index });
        }

        let header = RouteHeader {
            id: narrow(index, SectionTag::Poti.as_str(), index, "route id")?,
            setting1: route.setting1,
            setting2: route.setting2,
        };
        rows.extend(route.points.iter().enumerate().map(|(i, &point)| RouteRow {
            header: (i == 0).then_some(header),
            point,
        }));
    }
    Ok(rows)
}

fn routes(rows: &[RouteRow]) -> Result<Vec<Route>> {
    let runs = split_runs(rows, |row| row.header.is_some()).ok_or_else(|| {
        KmpError::MissingRequiredGroup {
            section: SectionTag::Poti,
            row: 0,
        }
    })?;

    runs.into_iter()
        .enumerate()
        .map(|(index, run)| {
            let Some(header) = rows[run.start].header else {
                return Err(KmpError::MissingRequiredGroup {
                    section: SectionTag::Poti,
                    row: run.start,
                });
            };
            if usize::from(header.id) != index {
                warn!(
                    row = run.start,
                    id = header.id,
                    position = index,
                    "route id does not match its position; using the position"
                );
            }
            Ok(Route {
                setting1: header.setting1,
                setting2: header.setting2,
                points: rows[run].iter().map(|row| row.point).collect(),
            })
        })
        .collect()
}

fn camera_rows(list: &CameraList) -> Result<Vec<CameraRow>> {
    let mut rows: Vec<CameraRow> = list
        .cameras
        .iter()
        .map(|&camera| CameraRow {
            camera,
            ..CameraRow::default()
        })
        .collect();

    for (marker, &index) in (1u8..=2).zip(&list.first) {
        if index == NO_CAMERA {
            continue;
        }
        let Some(row) = rows.get_mut(usize::from(index)) else {
            if list.cameras.is_empty() {
                warn!(marker, index, "starting camera set but there are no cameras");
                continue;
            }
            return Err(KmpError::CameraMarker {
                marker,
                reason: format!(
                    "index {index} is outside the {} cameras",
                    list.cameras.len()
                ),
            });
        };
        if marker == 1 {
            row.first_1 = true;
        } else {
            row.first_2 = true;
        }
    }
    Ok(rows)
}

fn camera_list(rows: &[CameraRow]) -> Result<CameraList> {
    Ok(CameraList {
        first: [
            marked_camera(rows, 1, |row| row.first_1)?,
            marked_camera(rows, 2, |row| row.first_2)?,
        ],
        cameras: rows.iter().map(|row| row.camera).collect(),
    })
}

fn marked_camera(rows: &[CameraRow], marker: u8, is_marked: impl Fn(&CameraRow) -> bool) -> Result<u8> {
    let marked: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_marked(row))
        .map(|(index, _)| index)
        .collect();

    match marked.as_slice() {
        [] => Ok(NO_CAMERA),
        [index] => {
            let byte: u8 = narrow(*index, SectionTag::Came.as_str(), *index, "first camera")?;
            if byte == NO_CAMERA {
                return Err(KmpError::CameraMarker {
                    marker,
                    reason: format!("camera {index} cannot be addressed"),
                });
            }
            Ok(byte)
        }
        many => Err(KmpError::CameraMarker {
            marker,
            reason: format!("{} cameras are marked, expected one", many.len()),
        }),
    }
}
