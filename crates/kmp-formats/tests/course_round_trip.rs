//! End-to-end tests over a fully populated course: binary round trip, sheet
//! round trip and container layout.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use kmp_formats::course::{
    CameraRow, CheckpointRow, RouteHeader, RouteRow, from_workbook, to_workbook,
};
use kmp_formats::linker::{GroupLinks, PathRow};
use kmp_formats::section::{
    Area, Camera, CannonPoint, EnemyPoint, GameObject, ItemPoint, MissionPoint, NO_LINK,
    PresenceFlag, RespawnPoint, RoutePoint, Section, SectionTag, StageInfo, StartPoint,
};
use kmp_formats::sheet::{format, parse};
use kmp_formats::{Course, KmpError, KmpFile, decode, encode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn links(previous: &[u8], next: &[u8]) -> GroupLinks {
    let mut group = GroupLinks::unlinked(0);
    group.previous[..previous.len()].copy_from_slice(previous);
    group.next[..next.len()].copy_from_slice(next);
    group
}

fn enemy(x: f32) -> EnemyPoint {
    EnemyPoint {
        position: [x, 0.0, -x],
        range: 10.0,
        setting1: 0,
        setting2: 0,
        setting3: 0,
    }
}

fn checkpoint(z: f32) -> CheckpointRow {
    CheckpointRow {
        left: [-500.0, z],
        right: [500.0, z],
        respawn: 0,
        kind: 0xFF,
    }
}

/// A small two-loop course touching every sheet
fn full_course() -> Course {
    let mut enemy_paths = vec![PathRow::start(
        enemy(0.0),
        GroupLinks {
            id: 0,
            dispatch: [0, 1],
            ..links(&[1], &[1])
        },
    )];
    enemy_paths.extend((1..4).map(|i| PathRow::member(enemy(i as f32 * 100.0))));
    enemy_paths.push(PathRow::start(
        enemy(400.0),
        GroupLinks {
            id: 1,
            ..links(&[0], &[0])
        },
    ));
    enemy_paths.push(PathRow::member(enemy(500.0)));

    let mut checkpoints: Vec<PathRow<CheckpointRow>> = (0..10)
        .map(|i| PathRow::member(checkpoint(i as f32 * 250.0)))
        .collect();
    checkpoints[0].group = Some(links(&[1], &[1]));
    checkpoints[0].point.kind = 0;
    checkpoints[4].group = Some(GroupLinks {
        id: 1,
        ..links(&[0], &[0])
    });

    Course {
        version: 2520,
        start_points: vec![StartPoint {
            position: [-14_250.0, 1_000.0, 3_750.0],
            rotation: [0.0, 90.0, 0.0],
            player_index: -1,
        }],
        enemy_paths,
        item_paths: vec![
            PathRow::start(
                ItemPoint {
                    position: [1.0, 2.0, 3.0],
                    range: 1.0,
                    setting1: 0,
                    setting2: 0,
                },
                links(&[0], &[0]),
            ),
            PathRow::member(ItemPoint::default()),
        ],
        checkpoints,
        objects: vec![
            GameObject {
                kind: 1,
                enabled: true,
                object_id: 0x0065,
                reference: 0x0000,
                position: [10.0, 0.0, 20.0],
                scale: [1.0, 1.0, 1.0],
                route: 0,
                settings: [1, 2, 3, 4, 5, 6, 7, 8],
                presence: PresenceFlag {
                    mode: 0,
                    parameter: 0,
                    flag: 0,
                    multi_3_4: true,
                    multi_2: true,
                    single: true,
                },
                ..GameObject::default()
            },
            GameObject {
                object_id: 0x00D2,
                reference: 0xBEEF,
                route: 0xFFFF,
                ..GameObject::default()
            },
        ],
        routes: vec![
            RouteRow {
                header: Some(RouteHeader {
                    id: 0,
                    setting1: 0,
                    setting2: 1,
                }),
                point: RoutePoint {
                    position: [0.0, 500.0, 0.0],
                    setting1: 30,
                    setting2: 0,
                },
            },
            RouteRow {
                header: None,
                point: RoutePoint {
                    position: [100.0, 500.0, 0.0],
                    setting1: 30,
                    setting2: 0,
                },
            },
            RouteRow {
                header: Some(RouteHeader {
                    id: 1,
                    setting1: 1,
                    setting2: 0,
                }),
                point: RoutePoint::default(),
            },
        ],
        areas: vec![Area {
            shape: 0,
            kind: 0,
            camera: 0,
            priority: 0,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 45.0, 0.0],
            scale: [2.5, 1.0, 2.5],
            setting1: 0,
            setting2: 0,
            route: 0xFF,
            enemy: 0xFF,
        }],
        cameras: vec![
            CameraRow {
                camera: Camera {
                    kind: 5,
                    next: 1,
                    route: 1,
                    camera_velocity: 30,
                    zoom_velocity: 0,
                    view_velocity: 0,
                    zoom_start: 40.0,
                    zoom_end: 50.0,
                    time: 3.5,
                    ..Camera::default()
                },
                first_1: true,
                first_2: false,
            },
            CameraRow {
                camera: Camera {
                    kind: 0,
                    next: 0xFF,
                    route: 0xFF,
                    ..Camera::default()
                },
                first_1: false,
                first_2: true,
            },
        ],
        respawn_points: vec![RespawnPoint {
            position: [0.0, 100.0, 0.0],
            rotation: [0.0, 180.0, 0.0],
            range: -1,
        }],
        cannon_points: vec![CannonPoint {
            position: [5.0, 5.0, 5.0],
            rotation: [0.0; 3],
            cannon_id: 0,
            shoot: -1,
        }],
        mission_points: vec![MissionPoint {
            entry: 3,
            ..MissionPoint::default()
        }],
        stage_info: vec![StageInfo {
            lap_count: 3,
            pole_position: 1,
            speed_factor: 1.5,
            ..StageInfo::default()
        }],
    }
}

#[test]
fn test_binary_round_trip() {
    let course = full_course();
    let data = encode(&course).expect("Operation should succeed");
    let decoded = decode(&data).expect("Operation should succeed");

    assert_eq!(decoded, course);
    assert_eq!(encode(&decoded).expect("Operation should succeed"), data);
}

#[test]
fn test_sheet_round_trip_is_byte_exact() {
    let data = encode(&full_course()).expect("Operation should succeed");
    let course = decode(&data).expect("Operation should succeed");

    let text = format(&to_workbook(&course).expect("Operation should succeed"));
    let workbook = parse(&text).expect("Operation should succeed");
    let rebuilt = from_workbook(&workbook).expect("Operation should succeed");

    assert_eq!(rebuilt, course);
    assert_eq!(encode(&rebuilt).expect("Operation should succeed"), data);
}

#[test]
fn test_container_layout() {
    let data = encode(&full_course()).expect("Operation should succeed");
    let file = KmpFile::parse(&data).expect("Operation should succeed");

    assert_eq!(&data[..4], b"RKMD");
    assert_eq!(file.header.file_length as usize, data.len());
    assert_eq!(file.header.section_count, 15);
    assert_eq!(file.header.header_length, 76);
    assert_eq!(file.header.version, 2520);

    assert_eq!(file.offsets[0], 0);
    assert!(file.offsets.windows(2).all(|pair| pair[0] < pair[1]));
    for (offset, tag) in file.offsets.iter().zip(SectionTag::CANONICAL_ORDER) {
        let at = 76 + *offset as usize;
        assert_eq!(&data[at..at + 4], tag.as_bytes());
    }

    // KTPT: 8-byte header + one 28-byte start point
    assert_eq!(file.offsets[1], 8 + 28);

    // STGI is last: 8-byte header + one 12-byte record ends the file
    assert_eq!(file.offsets[14] as usize + 8 + 12, data.len() - 76);
}

#[test]
fn test_group_records() {
    let data = encode(&full_course()).expect("Operation should succeed");
    let file = KmpFile::parse(&data).expect("Operation should succeed");

    let summary = file.summary();
    let entries = |tag: SectionTag| {
        summary
            .sections
            .iter()
            .find(|s| s.tag == tag)
            .map(|s| s.entries)
            .expect("Operation should succeed")
    };
    assert_eq!(entries(SectionTag::Enpt), 6);
    assert_eq!(entries(SectionTag::Enph), 2);
    assert_eq!(entries(SectionTag::Ckpt), 10);
    assert_eq!(entries(SectionTag::Ckph), 2);
    assert_eq!(entries(SectionTag::Poti), 2);
    assert_eq!(entries(SectionTag::Came), 2);
}

#[test]
fn test_checkpoint_link_bytes() {
    let data = encode(&full_course()).expect("Operation should succeed");
    let file = KmpFile::parse(&data).expect("Operation should succeed");
    let Some(Section::CheckpointPoints(points)) = file.section(SectionTag::Ckpt) else {
        panic!("CKPT section missing");
    };

    // Groups [0, 4) and [4, 10)
    let links: Vec<(u8, u8)> = points.iter().map(|p| (p.previous, p.next)).collect();
    assert_eq!(links[0], (NO_LINK, 1));
    assert_eq!(links[3], (2, NO_LINK));
    assert_eq!(links[4], (NO_LINK, 5));
    assert_eq!(links[9], (8, NO_LINK));
}

#[test]
fn test_edited_sheet_is_rejected_with_location() {
    let course = decode(&encode(&full_course()).expect("Operation should succeed"))
        .expect("Operation should succeed");
    let text = format(&to_workbook(&course).expect("Operation should succeed"));

    // Clear the group cells of the first enemy row (two lines below its sheet directive)
    let lines: Vec<&str> = text.lines().collect();
    let directive = lines
        .iter()
        .position(|line| *line == "## sheet = ENPT+ENPH")
        .expect("Operation should succeed");
    let mut edited: Vec<String> = lines.iter().map(|line| (*line).to_string()).collect();
    let cells: Vec<&str> = lines[directive + 2].split('|').collect();
    let mut cleared = cells[..7].to_vec();
    cleared.extend(std::iter::repeat_n("", cells.len() - 7));
    edited[directive + 2] = cleared.join("|");

    let rebuilt = from_workbook(&parse(&edited.join("\n")).expect("Operation should succeed"))
        .expect("Operation should succeed");
    let err = encode(&rebuilt).expect_err("Test operation should fail");
    match err {
        KmpError::MissingRequiredGroup { section, row } => {
            assert_eq!(section, SectionTag::Enph);
            assert_eq!(row, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Binary and workbook round trips, both back to the same bytes
fn check_round_trips(course: &Course) -> Result<(), TestCaseError> {
    let data = encode(course).expect("Operation should succeed");
    prop_assert_eq!(&decode(&data).expect("Operation should succeed"), course);

    let text = format(&to_workbook(course).expect("Operation should succeed"));
    let rebuilt = from_workbook(&parse(&text).expect("Operation should succeed"))
        .expect("Operation should succeed");
    prop_assert_eq!(&rebuilt, course);
    prop_assert_eq!(encode(&rebuilt).expect("Operation should succeed"), data);
    Ok(())
}

fn coords3() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(-1.0e5f32..1.0e5)
}

fn object() -> impl Strategy<Value = GameObject> {
    (
        (0u8..8, any::<bool>(), 0u16..4096, any::<u16>()),
        (coords3(), coords3(), coords3()),
        (any::<u16>(), any::<[u16; 8]>()),
        (0u8..16, 0u8..64, 0u8..8),
        (any::<bool>(), any::<bool>(), any::<bool>()),
    )
        .prop_map(
            |(
                (kind, enabled, object_id, reference),
                (position, rotation, scale),
                (route, settings),
                (mode, parameter, flag),
                (multi_3_4, multi_2, single),
            )| GameObject {
                kind,
                enabled,
                object_id,
                reference,
                position,
                rotation,
                scale,
                route,
                settings,
                presence: PresenceFlag {
                    mode,
                    parameter,
                    flag,
                    multi_3_4,
                    multi_2,
                    single,
                },
            },
        )
}

/// Group length plus its link bytes
fn group() -> impl Strategy<Value = (usize, [u8; 6], [u8; 6], [u8; 2])> {
    (1usize..5, any::<[u8; 6]>(), any::<[u8; 6]>(), any::<[u8; 2]>())
}

/// Rows for a sequence of groups; group ids follow their position
fn path_rows<P>(
    groups: &[(usize, [u8; 6], [u8; 6], [u8; 2])],
    keep_dispatch: bool,
    point: impl Fn(usize) -> P,
) -> Vec<PathRow<P>> {
    let mut rows = Vec::new();
    for (id, &(length, previous, next, dispatch)) in groups.iter().enumerate() {
        let links = GroupLinks {
            id: id as u8,
            previous,
            next,
            dispatch: if keep_dispatch { dispatch } else { [0; 2] },
        };
        rows.push(PathRow::start(point(rows.len()), links));
        for _ in 1..length {
            rows.push(PathRow::member(point(rows.len())));
        }
    }
    rows
}

proptest! {
    #[test]
    fn prop_start_points_round_trip(
        points in prop::collection::vec(
            (prop::array::uniform3(-1.0e5f32..1.0e5), prop::array::uniform3(-360.0f32..360.0), any::<i16>()),
            0..16,
        )
    ) {
        let course = Course {
            start_points: points
                .into_iter()
                .map(|(position, rotation, player_index)| StartPoint { position, rotation, player_index })
                .collect(),
            ..Course::default()
        };
        let data = encode(&course).expect("Operation should succeed");
        prop_assert_eq!(&decode(&data).expect("Operation should succeed"), &course);

        let text = format(&to_workbook(&course).expect("Operation should succeed"));
        let rebuilt = from_workbook(&parse(&text).expect("Operation should succeed"))
            .expect("Operation should succeed");
        prop_assert_eq!(encode(&rebuilt).expect("Operation should succeed"), data);
    }

    #[test]
    fn prop_objects_round_trip(objects in prop::collection::vec(object(), 0..8)) {
        check_round_trips(&Course {
            objects,
            ..Course::default()
        })?;
    }

    #[test]
    fn prop_routes_round_trip(
        routes in prop::collection::vec(
            (
                prop::collection::vec((coords3(), any::<u16>(), any::<u16>()), 1..5),
                any::<u8>(),
                any::<u8>(),
            ),
            0..5,
        )
    ) {
        let mut rows = Vec::new();
        for (id, (points, setting1, setting2)) in routes.into_iter().enumerate() {
            for (i, (position, point_setting1, point_setting2)) in points.into_iter().enumerate() {
                rows.push(RouteRow {
                    header: (i == 0).then_some(RouteHeader {
                        id: id as u16,
                        setting1,
                        setting2,
                    }),
                    point: RoutePoint {
                        position,
                        setting1: point_setting1,
                        setting2: point_setting2,
                    },
                });
            }
        }
        check_round_trips(&Course {
            routes: rows,
            ..Course::default()
        })?;
    }

    #[test]
    fn prop_path_groups_round_trip(
        enemy_groups in prop::collection::vec(group(), 0..5),
        item_groups in prop::collection::vec(group(), 0..5),
        checkpoint_groups in prop::collection::vec(group(), 0..5),
        settings in any::<(u16, u8, u8)>(),
    ) {
        let (setting1, setting2, setting3) = settings;
        let course = Course {
            enemy_paths: path_rows(&enemy_groups, true, |i| EnemyPoint {
                position: [i as f32, 0.5, -(i as f32)],
                range: 20.0,
                setting1,
                setting2,
                setting3,
            }),
            item_paths: path_rows(&item_groups, false, |i| ItemPoint {
                position: [0.0, i as f32 * 0.25, 0.0],
                range: 1.0,
                setting1,
                setting2: u16::from(setting2),
            }),
            checkpoints: path_rows(&checkpoint_groups, false, |i| CheckpointRow {
                left: [-100.0, i as f32 * 10.0],
                right: [100.0, i as f32 * 10.0],
                respawn: setting2,
                kind: setting3,
            }),
            ..Course::default()
        };
        check_round_trips(&course)?;
    }

    #[test]
    fn prop_cameras_round_trip(
        cameras in prop::collection::vec((0u8..10, coords3(), 0.0f32..100.0), 0..6),
        first_1 in prop::option::of(0usize..6),
        first_2 in prop::option::of(0usize..6),
    ) {
        let rows = cameras
            .into_iter()
            .enumerate()
            .map(|(i, (kind, position, time))| CameraRow {
                camera: Camera {
                    kind,
                    position,
                    time,
                    ..Camera::default()
                },
                first_1: first_1 == Some(i),
                first_2: first_2 == Some(i),
            })
            .collect();
        check_round_trips(&Course {
            cameras: rows,
            ..Course::default()
        })?;
    }

    #[test]
    fn prop_stage_info_round_trip(
        lap_count in any::<u8>(),
        flare_color in any::<[u8; 4]>(),
        // High half of a finite, non-negative f32
        speed_bits in 0u16..0x7F80,
    ) {
        check_round_trips(&Course {
            stage_info: vec![StageInfo {
                lap_count,
                flare_color,
                speed_factor: f32::from_bits(u32::from(speed_bits) << 16),
                ..StageInfo::default()
            }],
            ..Course::default()
        })?;
    }
}
