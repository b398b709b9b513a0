//! Geometry synthesis
//!
//! A bulletin's positions are only points in free text; the
//! spatial shape they describe is chosen heuristically from their
//! count and from the `AREA`/`TRACK` keywords found elsewhere in
//! the message.

use serde::Serialize;

use crate::position::Position;

/// A synthesized geographic shape
///
/// Serializes as a GeoJSON geometry object: the variant name
/// becomes the `type` tag and the positions the `coordinates`.
///
/// Constructed with [`Geometry::synthesize`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single position
    Point(Position),

    /// Unordered-looking scatter of positions
    MultiPoint(Vec<Position>),

    /// One closed ring (`AREA` bulletins)
    Polygon(Vec<Vec<Position>>),

    /// An open path in text order (`TRACK` bulletins)
    LineString(Vec<Position>),
}

impl Geometry {
    /// Choose a geometry for a bulletin's positions
    ///
    /// Pure function of the position count and the two keyword
    /// flags:
    ///
    /// | count | area  | track | result      |
    /// |-------|-------|-------|-------------|
    /// | 0     | —     | —     | `None`      |
    /// | 1     | —     | —     | Point       |
    /// | 2     | —     | —     | MultiPoint  |
    /// | >2    | true  | —     | Polygon     |
    /// | >2    | false | true  | LineString  |
    /// | >2    | false | false | MultiPoint  |
    ///
    /// `has_area` takes precedence over `has_track`. Polygon rings
    /// are explicitly closed by repeating the first position.
    /// Position order is preserved in every variant.
    pub fn synthesize(positions: Vec<Position>, has_area: bool, has_track: bool) -> Option<Self> {
        match positions.len() {
            0 => None,
            1 => Some(Geometry::Point(positions[0])),
            2 => Some(Geometry::MultiPoint(positions)),
            _ if has_area => {
                let mut ring = positions;
                let first = ring[0];
                ring.push(first);
                Some(Geometry::Polygon(vec![ring]))
            }
            _ if has_track => Some(Geometry::LineString(positions)),
            _ => Some(Geometry::MultiPoint(positions)),
        }
    }

    /// GeoJSON type tag of this geometry
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::Polygon(_) => "Polygon",
            Geometry::LineString(_) => "LineString",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(n: usize) -> Vec<Position> {
        (0..n)
            .map(|i| Position {
                longitude: i as f64,
                latitude: -(i as f64),
            })
            .collect()
    }

    #[test]
    fn test_zero_positions() {
        assert_eq!(None, Geometry::synthesize(positions(0), true, true));
    }

    #[test]
    fn test_one_and_two_positions_ignore_flags() {
        for flags in [(false, false), (true, false), (false, true), (true, true)] {
            let geo = Geometry::synthesize(positions(1), flags.0, flags.1).unwrap();
            assert_eq!("Point", geo.kind());

            let geo = Geometry::synthesize(positions(2), flags.0, flags.1).unwrap();
            assert_eq!("MultiPoint", geo.kind());
        }
    }

    #[test]
    fn test_polygon_ring_closed() {
        let geo = Geometry::synthesize(positions(4), true, false).unwrap();
        match &geo {
            Geometry::Polygon(rings) => {
                assert_eq!(1, rings.len());
                assert_eq!(5, rings[0].len());
                assert_eq!(rings[0][0], rings[0][4]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_area_precedes_track() {
        let geo = Geometry::synthesize(positions(3), true, true).unwrap();
        assert_eq!("Polygon", geo.kind());
    }

    #[test]
    fn test_track_line_string_open() {
        let geo = Geometry::synthesize(positions(4), false, true).unwrap();
        match &geo {
            Geometry::LineString(path) => {
                assert_eq!(4, path.len());
                assert_ne!(path[0], path[3]);
                // text order preserved
                assert_eq!(0.0, path[0].longitude);
                assert_eq!(3.0, path[3].longitude);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_many_positions_without_flags() {
        let geo = Geometry::synthesize(positions(5), false, false).unwrap();
        assert_eq!("MultiPoint", geo.kind());
    }

    #[test]
    fn test_geojson_shape() {
        let geo = Geometry::synthesize(
            vec![Position {
                longitude: 8.25,
                latitude: 48.5,
            }],
            false,
            false,
        )
        .unwrap();
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!(
            serde_json::json!({"type": "Point", "coordinates": [8.25, 48.5]}),
            json
        );

        let geo = Geometry::synthesize(positions(3), true, false).unwrap();
        let json = serde_json::to_value(&geo).unwrap();
        assert_eq!("Polygon", json["type"]);
        assert_eq!(4, json["coordinates"][0].as_array().unwrap().len());
    }
}
