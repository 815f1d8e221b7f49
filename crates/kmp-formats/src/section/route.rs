//! Routes (POTI)

use crate::cursor::{ByteReader, ByteWriter, FixedRecord, narrow};
use crate::error::Result;
use binrw::{BinRead, BinWrite};

/// One point on a route
#[derive(Debug, Clone, Copy, PartialEq, Default, BinRead, BinWrite)]
#[brw(big)]
pub struct RoutePoint {
    /// World position
    pub position: [f32; 3],
    /// First point setting
    pub setting1: u16,
    /// Second point setting
    pub setting2: u16,
}

impl FixedRecord for RoutePoint {
    const SIZE: usize = 16;
}

/// A route: a point count, two route-wide settings, then the points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    /// First route setting (smoothing)
    pub setting1: u8,
    /// Second route setting (cyclic)
    pub setting2: u8,
    /// Points in travel order
    pub points: Vec<RoutePoint>,
}

impl Route {
    /// Read one route
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let count = reader.read_u16()?;
        let [setting1, setting2] = reader.read_u8_array::<2>()?;
        let points = reader.read_records(usize::from(count))?;
        Ok(Self {
            setting1,
            setting2,
            points,
        })
    }

    /// Write one route; `row` is used for error context
    pub fn write(&self, writer: &mut ByteWriter, row: usize) -> Result<()> {
        writer.write_u16(narrow(self.points.len(), "POTI", row, "point count")?)?;
        writer.write_u8_array(&[self.setting1, self.setting2])?;
        self.points
            .iter()
            .try_for_each(|point| writer.write_record(point))
    }

    /// Encoded size in bytes
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        4 + self.points.len() * RoutePoint::SIZE
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_route_round_trip() {
        let route = Route {
            setting1: 1,
            setting2: 0,
            points: vec![
                RoutePoint {
                    position: [0.0, 10.0, 0.0],
                    setting1: 5,
                    setting2: 0,
                },
                RoutePoint {
                    position: [100.0, 10.0, -50.0],
                    setting1: 5,
                    setting2: 1,
                },
            ],
        };
        let mut writer = ByteWriter::new();
        route.write(&mut writer, 0).expect("Operation should succeed");
        let data = writer.into_inner();

        assert_eq!(data.len(), route.encoded_size());
        assert_eq!(&data[0..4], &[0, 2, 1, 0]);

        let parsed = Route::read(&mut ByteReader::new(&data)).expect("Operation should succeed");
        assert_eq!(parsed, route);
    }

    #[test]
    fn test_truncated_route() {
        // Claims three points but carries one
        let mut data = vec![0, 3, 0, 0];
        data.extend_from_slice(&[0u8; 16]);
        let result = Route::read(&mut ByteReader::new(&data));
        assert!(matches!(
            result,
            Err(crate::error::KmpError::UnexpectedEnd { .. })
        ));
    }
}
