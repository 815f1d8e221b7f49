//! Cameras (CAME)

use crate::cursor::FixedRecord;
use binrw::{BinRead, BinWrite};

/// Marker for "no starting camera"
pub const NO_CAMERA: u8 = 0xFF;

/// One camera record
///
/// Layout: type, next, one pad byte, route, three 16-bit velocities, two pad
/// bytes, then fifteen floats.
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct Camera {
    /// Camera type
    pub kind: u8,
    /// Next camera index
    pub next: u8,
    /// Route index
    #[brw(pad_before = 1)]
    pub route: u8,
    /// Movement speed along the route
    pub camera_velocity: u16,
    /// Zoom speed
    pub zoom_velocity: u16,
    /// View-target speed
    #[brw(pad_after = 2)]
    pub view_velocity: u16,
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Field of view at start
    pub zoom_start: f32,
    /// Field of view at end
    pub zoom_end: f32,
    /// View target at start
    pub view_start: [f32; 3],
    /// View target at end
    pub view_end: [f32; 3],
    /// Duration
    pub time: f32,
}

impl FixedRecord for Camera {
    const SIZE: usize = 72;
}

/// Camera section body: the cameras plus the two starting-camera indices
/// stored in the section header
#[derive(Debug, Clone, PartialEq)]
pub struct CameraList {
    /// First and second starting camera, [`NO_CAMERA`] when unset
    pub first: [u8; 2],
    /// Camera records
    pub cameras: Vec<Camera>,
}

impl Default for CameraList {
    fn default() -> Self {
        Self {
            first: [NO_CAMERA; 2],
            cameras: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cursor::{ByteReader, ByteWriter};

    #[test]
    fn test_camera_layout() {
        let camera = Camera {
            kind: 5,
            next: 1,
            route: 2,
            camera_velocity: 30,
            zoom_velocity: 4,
            view_velocity: 12,
            position: [1.0, 2.0, 3.0],
            rotation: [0.0; 3],
            zoom_start: 30.0,
            zoom_end: 60.0,
            view_start: [4.0, 5.0, 6.0],
            view_end: [7.0, 8.0, 9.0],
            time: 600.0,
        };
        let mut writer = ByteWriter::new();
        writer.write_record(&camera).expect("Operation should succeed");
        let data = writer.into_inner();

        assert_eq!(data.len(), Camera::SIZE);
        assert_eq!(&data[0..4], &[5, 1, 0, 2]);
        assert_eq!(&data[4..12], &[0, 30, 0, 4, 0, 12, 0, 0]);
        assert_eq!(&data[68..72], &600.0f32.to_be_bytes());

        let parsed: Camera = ByteReader::new(&data)
            .read_record()
            .expect("Operation should succeed");
        assert_eq!(parsed, camera);
    }
}
