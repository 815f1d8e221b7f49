//! Course to workbook mapping
//!
//! Each sheet is described by a [`SheetRecord`] implementation: its name, its
//! columns, and how one row type turns into cells and back. Columns are looked
//! up by label, so their order in a hand-edited file does not matter.

use super::{CameraRow, CheckpointRow, Course, RouteHeader, RouteRow};
use crate::error::{KmpError, Result};
use crate::file::DEFAULT_VERSION;
use crate::linker::{GroupLinks, PathRow};
use crate::section::{
    Area, Camera, CannonPoint, EnemyPoint, GameObject, ItemPoint, MAX_GROUP_LINKS, MissionPoint,
    PresenceFlag, RespawnPoint, RoutePoint, StageInfo, StartPoint, format_reference,
    parse_reference,
};
use crate::sheet::{
    Sheet, SheetBuilder, SheetField, SheetRow, SheetSchema, SheetType, SheetValue, Workbook,
};
use tracing::{debug, warn};

/// Sheet names in workbook order
pub const SHEET_NAMES: [&str; 12] = [
    "KTPT",
    "ENPT+ENPH",
    "ITPT+ITPH",
    "CKPT+CKPH",
    "GOBJ",
    "POTI",
    "AREA",
    "CAME",
    "JGPT",
    "CNPT",
    "MSPT",
    "STGI",
];

const POS: [&str; 3] = ["Pos x", "Pos y", "Pos z"];
const ROT: [&str; 3] = ["Rot x", "Rot y", "Rot z"];
const SCALE: [&str; 3] = ["Scale x", "Scale y", "Scale z"];
const LAST: [&str; MAX_GROUP_LINKS] = ["Last 1", "Last 2", "Last 3", "Last 4", "Last 5", "Last 6"];
const NEXT: [&str; MAX_GROUP_LINKS] = ["Next 1", "Next 2", "Next 3", "Next 4", "Next 5", "Next 6"];
const DISPATCH: [&str; 2] = ["Dispatch1", "Dispatch2"];
const OBJECT_SETTINGS: [&str; 8] = [
    "Setting1", "Setting2", "Setting3", "Setting4", "Setting5", "Setting6", "Setting7", "Setting8",
];
const VIEW_START: [&str; 3] = ["Start pos x", "Start pos y", "Start pos z"];
const VIEW_END: [&str; 3] = ["End pos x", "End pos y", "End pos z"];
const FLARE: [&str; 4] = ["Flare R", "Flare G", "Flare B", "Flare A"];

/// Render a course as a workbook with one sheet per row list
pub fn to_workbook(course: &Course) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook.set_version(course.version);

    workbook.add_sheet(write_sheet(&course.start_points)?)?;
    workbook.add_sheet(write_sheet(&course.enemy_paths)?)?;
    workbook.add_sheet(write_sheet(&course.item_paths)?)?;
    workbook.add_sheet(write_sheet(&course.checkpoints)?)?;
    workbook.add_sheet(write_sheet(&course.objects)?)?;
    workbook.add_sheet(write_sheet(&course.routes)?)?;
    workbook.add_sheet(write_sheet(&course.areas)?)?;
    workbook.add_sheet(write_sheet(&course.cameras)?)?;
    workbook.add_sheet(write_sheet(&course.respawn_points)?)?;
    workbook.add_sheet(write_sheet(&course.cannon_points)?)?;
    workbook.add_sheet(write_sheet(&course.mission_points)?)?;
    workbook.add_sheet(write_sheet(&course.stage_info)?)?;

    Ok(workbook)
}

/// Read a course back from a workbook
///
/// Absent sheets are empty; sheets with unknown names are ignored.
pub fn from_workbook(workbook: &Workbook) -> Result<Course> {
    for name in workbook.sheet_names() {
        if !SHEET_NAMES.contains(&name) {
            warn!(sheet = name, "ignoring unknown sheet");
        }
    }

    Ok(Course {
        version: workbook.version().unwrap_or(DEFAULT_VERSION),
        start_points: read_sheet(workbook)?,
        enemy_paths: read_sheet(workbook)?,
        item_paths: read_sheet(workbook)?,
        checkpoints: read_sheet(workbook)?,
        objects: read_sheet(workbook)?,
        routes: read_sheet(workbook)?,
        areas: read_sheet(workbook)?,
        cameras: read_sheet(workbook)?,
        respawn_points: read_sheet(workbook)?,
        cannon_points: read_sheet(workbook)?,
        mission_points: read_sheet(workbook)?,
        stage_info: read_sheet(workbook)?,
    })
}

/// A row type stored in one sheet
trait SheetRecord: Sized {
    /// Sheet name
    const SHEET: &'static str;

    /// Column definitions in display order
    fn fields() -> Vec<SheetField>;

    /// Cells in the same order as [`Self::fields`]
    fn cells(&self) -> Vec<SheetValue>;

    /// Rebuild a row
    fn from_cells(cells: &Cells<'_>) -> Result<Self>;
}

fn write_sheet<T: SheetRecord>(rows: &[T]) -> Result<Sheet> {
    let mut builder = SheetBuilder::new(T::SHEET, T::fields());
    for row in rows {
        builder.add_row(row.cells())?;
    }
    Ok(builder.build())
}

fn read_sheet<T: SheetRecord>(workbook: &Workbook) -> Result<Vec<T>> {
    let Some(sheet) = workbook.sheet(T::SHEET) else {
        debug!(sheet = T::SHEET, "sheet absent, reading as empty");
        return Ok(Vec::new());
    };

    let schema = sheet.schema();
    if let Some(missing) = T::fields().iter().find(|f| !schema.has_field(&f.name)) {
        return Err(KmpError::MissingColumn {
            sheet: T::SHEET.to_string(),
            column: missing.name.clone(),
        });
    }

    sheet
        .rows()
        .iter()
        .enumerate()
        .map(|(row, values)| {
            T::from_cells(&Cells {
                sheet: T::SHEET,
                row,
                values,
                schema,
            })
        })
        .collect()
}

/// Column list builder
#[derive(Default)]
struct Fields(Vec<SheetField>);

impl Fields {
    fn float(mut self, names: &[&str]) -> Self {
        self.0
            .extend(names.iter().map(|&n| SheetField::new(n, SheetType::Float(4))));
        self
    }

    fn dec(mut self, names: &[&str], size: usize) -> Self {
        self.0
            .extend(names.iter().map(|&n| SheetField::new(n, SheetType::Dec(size))));
        self
    }

    fn hex(mut self, name: &str, size: usize) -> Self {
        self.0.push(SheetField::new(name, SheetType::Hex(size)));
        self
    }

    fn build(self) -> Vec<SheetField> {
        self.0
    }
}

/// Typed access to one row's cells by column label
struct Cells<'a> {
    sheet: &'static str,
    row: usize,
    values: &'a SheetRow,
    schema: &'a SheetSchema,
}

impl Cells<'_> {
    fn value(&self, column: &str) -> Result<&SheetValue> {
        self.values
            .get_by_name(column, self.schema)
            .ok_or_else(|| KmpError::MissingColumn {
                sheet: self.sheet.to_string(),
                column: column.to_string(),
            })
    }

    fn missing(&self, column: &str) -> KmpError {
        KmpError::MissingValue {
            sheet: self.sheet.to_string(),
            row: self.row,
            column: column.to_string(),
        }
    }

    fn out_of_range(&self, column: &str, value: impl ToString) -> KmpError {
        KmpError::ValueOutOfRange {
            section: self.sheet.to_string(),
            row: self.row,
            field: column.to_string(),
            value: value.to_string(),
        }
    }

    fn is_empty(&self, column: &str) -> Result<bool> {
        Ok(self.value(column)?.is_empty())
    }

    fn float(&self, column: &str) -> Result<f32> {
        match self.value(column)? {
            SheetValue::Float(value) => Ok(*value),
            SheetValue::Dec(value) => Ok(*value as f32),
            SheetValue::Empty => Err(self.missing(column)),
            SheetValue::Hex(text) => Err(self.out_of_range(column, text)),
        }
    }

    fn floats<const N: usize>(&self, columns: [&str; N]) -> Result<[f32; N]> {
        let mut out = [0.0; N];
        for (slot, column) in out.iter_mut().zip(columns) {
            *slot = self.float(column)?;
        }
        Ok(out)
    }

    fn int<T: TryFrom<i64>>(&self, column: &str) -> Result<T> {
        let value = match self.value(column)? {
            SheetValue::Dec(value) => *value,
            SheetValue::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => *value as i64,
            SheetValue::Float(value) => return Err(self.out_of_range(column, value)),
            SheetValue::Hex(text) => return Err(self.out_of_range(column, text)),
            SheetValue::Empty => return Err(self.missing(column)),
        };
        T::try_from(value).map_err(|_| self.out_of_range(column, value))
    }

    fn ints<T: TryFrom<i64> + Copy + Default, const N: usize>(
        &self,
        columns: [&str; N],
    ) -> Result<[T; N]> {
        let mut out = [T::default(); N];
        for (slot, column) in out.iter_mut().zip(columns) {
            *slot = self.int(column)?;
        }
        Ok(out)
    }

    fn flag(&self, column: &str) -> Result<bool> {
        match self.int::<i64>(column)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.out_of_range(column, other)),
        }
    }

    fn reference(&self, column: &str) -> Result<u16> {
        match self.value(column)? {
            SheetValue::Empty => Err(self.missing(column)),
            other => {
                let text = other.to_string();
                parse_reference(&text).ok_or(KmpError::InvalidReference {
                    row: self.row,
                    value: text,
                })
            }
        }
    }
}

fn floats(values: &[f32]) -> impl Iterator<Item = SheetValue> + '_ {
    values.iter().map(|&v| SheetValue::Float(v))
}

fn decs<T: Copy + Into<i64>>(values: &[T]) -> impl Iterator<Item = SheetValue> + '_ {
    values.iter().map(|&v| SheetValue::Dec(v.into()))
}

fn dec(value: impl Into<i64>) -> SheetValue {
    SheetValue::Dec(value.into())
}

/// Id, predecessor and successor columns shared by the three path sheets
fn group_fields(fields: Fields, id: &str) -> Fields {
    fields.dec(&[id], 1).dec(&LAST, 1).dec(&NEXT, 1)
}

fn group_cells(group: Option<&GroupLinks>, cells: &mut Vec<SheetValue>) {
    match group {
        Some(links) => {
            cells.push(dec(links.id));
            cells.extend(decs(&links.previous));
            cells.extend(decs(&links.next));
        }
        None => cells.extend(std::iter::repeat_n(
            SheetValue::Empty,
            1 + 2 * MAX_GROUP_LINKS,
        )),
    }
}

fn read_group(cells: &Cells<'_>, id: &str) -> Result<Option<GroupLinks>> {
    if cells.is_empty(id)? {
        return Ok(None);
    }
    Ok(Some(GroupLinks {
        id: cells.int(id)?,
        previous: cells.ints(LAST)?,
        next: cells.ints(NEXT)?,
        dispatch: [0; 2],
    }))
}

impl SheetRecord for StartPoint {
    const SHEET: &'static str = "KTPT";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .float(&POS)
            .float(&ROT)
            .dec(&["PlayerIdx"], 2)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        floats(&self.position)
            .chain(floats(&self.rotation))
            .chain([dec(self.player_index)])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            player_index: cells.int("PlayerIdx")?,
        })
    }
}

impl SheetRecord for PathRow<EnemyPoint> {
    const SHEET: &'static str = "ENPT+ENPH";

    fn fields() -> Vec<SheetField> {
        let fields = Fields::default()
            .float(&POS)
            .float(&["Range"])
            .dec(&["Setting1"], 2)
            .dec(&["Setting2", "Setting3"], 1);
        group_fields(fields, "ENPH ID").dec(&DISPATCH, 1).build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let point = &self.point;
        let mut cells: Vec<SheetValue> = floats(&point.position)
            .chain([
                SheetValue::Float(point.range),
                dec(point.setting1),
                dec(point.setting2),
                dec(point.setting3),
            ])
            .collect();
        group_cells(self.group.as_ref(), &mut cells);
        match &self.group {
            Some(links) => cells.extend(decs(&links.dispatch)),
            None => cells.extend([SheetValue::Empty, SheetValue::Empty]),
        }
        cells
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        let mut group = read_group(cells, "ENPH ID")?;
        if let Some(links) = group.as_mut() {
            links.dispatch = cells.ints(DISPATCH)?;
        }
        Ok(Self {
            point: EnemyPoint {
                position: cells.floats(POS)?,
                range: cells.float("Range")?,
                setting1: cells.int("Setting1")?,
                setting2: cells.int("Setting2")?,
                setting3: cells.int("Setting3")?,
            },
            group,
        })
    }
}

impl SheetRecord for PathRow<ItemPoint> {
    const SHEET: &'static str = "ITPT+ITPH";

    fn fields() -> Vec<SheetField> {
        let fields = Fields::default()
            .float(&POS)
            .float(&["Range"])
            .dec(&["Setting1", "Setting2"], 2);
        group_fields(fields, "ITPH ID").build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let point = &self.point;
        let mut cells: Vec<SheetValue> = floats(&point.position)
            .chain([
                SheetValue::Float(point.range),
                dec(point.setting1),
                dec(point.setting2),
            ])
            .collect();
        group_cells(self.group.as_ref(), &mut cells);
        cells
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            point: ItemPoint {
                position: cells.floats(POS)?,
                range: cells.float("Range")?,
                setting1: cells.int("Setting1")?,
                setting2: cells.int("Setting2")?,
            },
            group: read_group(cells, "ITPH ID")?,
        })
    }
}

impl SheetRecord for PathRow<CheckpointRow> {
    const SHEET: &'static str = "CKPT+CKPH";

    fn fields() -> Vec<SheetField> {
        let fields = Fields::default()
            .float(&["Left x", "Left y", "Right x", "Right y"])
            .dec(&["Respawn", "Type"], 1);
        group_fields(fields, "CKPH ID").build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let point = &self.point;
        let mut cells: Vec<SheetValue> = floats(&point.left)
            .chain(floats(&point.right))
            .chain([dec(point.respawn), dec(point.kind)])
            .collect();
        group_cells(self.group.as_ref(), &mut cells);
        cells
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            point: CheckpointRow {
                left: cells.floats(["Left x", "Left y"])?,
                right: cells.floats(["Right x", "Right y"])?,
                respawn: cells.int("Respawn")?,
                kind: cells.int("Type")?,
            },
            group: read_group(cells, "CKPH ID")?,
        })
    }
}

impl SheetRecord for GameObject {
    const SHEET: &'static str = "GOBJ";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .dec(&["Type(LE)", "Enable(LE)"], 1)
            .dec(&["Object"], 2)
            .hex("Reference (hex)", 2)
            .float(&POS)
            .float(&ROT)
            .float(&SCALE)
            .dec(&["Route"], 2)
            .dec(&OBJECT_SETTINGS, 2)
            .dec(
                &["MODE", "Parameters", "Flag", "Multi(>2)", "Multi(<3)", "Single"],
                1,
            )
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let presence = &self.presence;
        [
            dec(self.kind),
            dec(self.enabled),
            dec(self.object_id),
            SheetValue::Hex(format_reference(self.reference)),
        ]
        .into_iter()
        .chain(floats(&self.position))
        .chain(floats(&self.rotation))
        .chain(floats(&self.scale))
        .chain([dec(self.route)])
        .chain(decs(&self.settings))
        .chain([
            dec(presence.mode),
            dec(presence.parameter),
            dec(presence.flag),
            dec(presence.multi_3_4),
            dec(presence.multi_2),
            dec(presence.single),
        ])
        .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            kind: cells.int("Type(LE)")?,
            enabled: cells.flag("Enable(LE)")?,
            object_id: cells.int("Object")?,
            reference: cells.reference("Reference (hex)")?,
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            scale: cells.floats(SCALE)?,
            route: cells.int("Route")?,
            settings: cells.ints(OBJECT_SETTINGS)?,
            presence: PresenceFlag {
                mode: cells.int("MODE")?,
                parameter: cells.int("Parameters")?,
                flag: cells.int("Flag")?,
                multi_3_4: cells.flag("Multi(>2)")?,
                multi_2: cells.flag("Multi(<3)")?,
                single: cells.flag("Single")?,
            },
        })
    }
}

impl SheetRecord for RouteRow {
    const SHEET: &'static str = "POTI";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .dec(&["ID"], 2)
            .dec(&["PointSetting 1", "PointSetting 2"], 1)
            .float(&POS)
            .dec(&["Setting1", "Setting2"], 2)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let header = match &self.header {
            Some(header) => [dec(header.id), dec(header.setting1), dec(header.setting2)],
            None => [SheetValue::Empty, SheetValue::Empty, SheetValue::Empty],
        };
        header
            .into_iter()
            .chain(floats(&self.point.position))
            .chain([dec(self.point.setting1), dec(self.point.setting2)])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        let header = if cells.is_empty("ID")? {
            None
        } else {
            Some(RouteHeader {
                id: cells.int("ID")?,
                setting1: cells.int("PointSetting 1")?,
                setting2: cells.int("PointSetting 2")?,
            })
        };
        Ok(Self {
            header,
            point: RoutePoint {
                position: cells.floats(POS)?,
                setting1: cells.int("Setting1")?,
                setting2: cells.int("Setting2")?,
            },
        })
    }
}

impl SheetRecord for Area {
    const SHEET: &'static str = "AREA";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .dec(&["Shape", "Type", "Camera", "Priority"], 1)
            .float(&POS)
            .float(&ROT)
            .float(&SCALE)
            .dec(&["Setting 1", "Setting 2"], 2)
            .dec(&["Route", "Enemy"], 1)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        decs(&[self.shape, self.kind, self.camera, self.priority])
            .collect::<Vec<_>>()
            .into_iter()
            .chain(floats(&self.position))
            .chain(floats(&self.rotation))
            .chain(floats(&self.scale))
            .chain([
                dec(self.setting1),
                dec(self.setting2),
                dec(self.route),
                dec(self.enemy),
            ])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            shape: cells.int("Shape")?,
            kind: cells.int("Type")?,
            camera: cells.int("Camera")?,
            priority: cells.int("Priority")?,
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            scale: cells.floats(SCALE)?,
            setting1: cells.int("Setting 1")?,
            setting2: cells.int("Setting 2")?,
            route: cells.int("Route")?,
            enemy: cells.int("Enemy")?,
        })
    }
}

impl SheetRecord for CameraRow {
    const SHEET: &'static str = "CAME";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .dec(&["Type", "First1", "First2", "Next", "Route"], 1)
            .dec(&["Camera velocity", "Zoom velocity", "View velocity"], 2)
            .float(&POS)
            .float(&ROT)
            .float(&["ZoomStart", "ZoomEnd"])
            .float(&VIEW_START)
            .float(&VIEW_END)
            .float(&["Time"])
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        let camera = &self.camera;
        [
            dec(camera.kind),
            dec(self.first_1),
            dec(self.first_2),
            dec(camera.next),
            dec(camera.route),
            dec(camera.camera_velocity),
            dec(camera.zoom_velocity),
            dec(camera.view_velocity),
        ]
        .into_iter()
        .chain(floats(&camera.position))
        .chain(floats(&camera.rotation))
        .chain(floats(&[camera.zoom_start, camera.zoom_end]).collect::<Vec<_>>())
        .chain(floats(&camera.view_start))
        .chain(floats(&camera.view_end))
        .chain([SheetValue::Float(camera.time)])
        .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            camera: Camera {
                kind: cells.int("Type")?,
                next: cells.int("Next")?,
                route: cells.int("Route")?,
                camera_velocity: cells.int("Camera velocity")?,
                zoom_velocity: cells.int("Zoom velocity")?,
                view_velocity: cells.int("View velocity")?,
                position: cells.floats(POS)?,
                rotation: cells.floats(ROT)?,
                zoom_start: cells.float("ZoomStart")?,
                zoom_end: cells.float("ZoomEnd")?,
                view_start: cells.floats(VIEW_START)?,
                view_end: cells.floats(VIEW_END)?,
                time: cells.float("Time")?,
            },
            first_1: cells.flag("First1")?,
            first_2: cells.flag("First2")?,
        })
    }
}

impl SheetRecord for RespawnPoint {
    const SHEET: &'static str = "JGPT";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .float(&POS)
            .float(&ROT)
            .dec(&["Range"], 2)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        floats(&self.position)
            .chain(floats(&self.rotation))
            .chain([dec(self.range)])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            range: cells.int("Range")?,
        })
    }
}

impl SheetRecord for CannonPoint {
    const SHEET: &'static str = "CNPT";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .float(&POS)
            .float(&ROT)
            .dec(&["Cannon ID", "Shoot"], 2)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        floats(&self.position)
            .chain(floats(&self.rotation))
            .chain([dec(self.cannon_id), dec(self.shoot)])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            cannon_id: cells.int("Cannon ID")?,
            shoot: cells.int("Shoot")?,
        })
    }
}

impl SheetRecord for MissionPoint {
    const SHEET: &'static str = "MSPT";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .float(&POS)
            .float(&ROT)
            .dec(&["Entry"], 2)
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        floats(&self.position)
            .chain(floats(&self.rotation))
            .chain([dec(self.entry)])
            .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            position: cells.floats(POS)?,
            rotation: cells.floats(ROT)?,
            entry: cells.int("Entry")?,
        })
    }
}

impl SheetRecord for StageInfo {
    const SHEET: &'static str = "STGI";

    fn fields() -> Vec<SheetField> {
        Fields::default()
            .dec(&["Lap", "Pole", "Distance", "Flare"], 1)
            .dec(&FLARE, 1)
            .float(&["Speed Factor"])
            .build()
    }

    fn cells(&self) -> Vec<SheetValue> {
        decs(&[
            self.lap_count,
            self.pole_position,
            self.driver_distance,
            self.flare_flashing,
        ])
        .chain(decs(&self.flare_color))
        .chain([SheetValue::Float(self.speed_factor)])
        .collect()
    }

    fn from_cells(cells: &Cells<'_>) -> Result<Self> {
        Ok(Self {
            lap_count: cells.int("Lap")?,
            pole_position: cells.int("Pole")?,
            driver_distance: cells.int("Distance")?,
            flare_flashing: cells.int("Flare")?,
            flare_color: cells.ints(FLARE)?,
            speed_factor: cells.float("Speed Factor")?,
        })
    }
}
