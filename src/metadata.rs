//! Shape list record embedded in image metadata
//!
//! The record is a JSON object `{ "boxes": [...] }` stored in the image's
//! EXIF block. Each entry is either a rectangle (`top_left`,
//! `bottom_right`) or a polygon (`points`), both with a `text` label.
//! Reading and writing the EXIF block itself is left to the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{Point, Shape};

/// EXIF tag number the record is stored under
pub const EXIF_TAG: u16 = 65000;

/// One persisted shape, in natural image coordinates
///
/// Whole-pixel coordinates are written as JSON integers, which is what
/// other readers of the record expect. Both integers and floats are read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoxEntry {
    Rectangle {
        #[serde(serialize_with = "serialize_pair")]
        top_left: [f64; 2],
        #[serde(serialize_with = "serialize_pair")]
        bottom_right: [f64; 2],
        #[serde(default)]
        text: String,
    },
    Polygon {
        #[serde(serialize_with = "serialize_pairs")]
        points: Vec<[f64; 2]>,
        #[serde(default)]
        text: String,
    },
}

impl BoxEntry {
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Rectangle { vertices, text } => BoxEntry::Rectangle {
                top_left: vertices[0].into(),
                bottom_right: vertices[2].into(),
                text: text.clone(),
            },
            Shape::Polygon { vertices, text } => BoxEntry::Polygon {
                points: vertices.iter().map(|&v| v.into()).collect(),
                text: text.clone(),
            },
        }
    }

    /// Convert to an in-memory shape
    ///
    /// Rectangles are normalized to canonical corner order. Returns `None`
    /// for polygons with fewer than three points.
    pub fn into_shape(self) -> Option<Shape> {
        match self {
            BoxEntry::Rectangle {
                top_left,
                bottom_right,
                text,
            } => Some(Shape::rectangle(top_left.into(), bottom_right.into()).with_text(text)),
            BoxEntry::Polygon { points, text } => {
                Shape::polygon(points.into_iter().map(Point::from).collect())
                    .map(|shape| shape.with_text(text))
            }
        }
    }
}

/// A coordinate, written as an integer when it has no fractional part
struct Coordinate(f64);

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

fn serialize_pair<S: Serializer>(
    &[x, y]: &[f64; 2],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    [Coordinate(x), Coordinate(y)].serialize(serializer)
}

fn serialize_pairs<S: Serializer>(
    pairs: &[[f64; 2]],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(pairs.iter().map(|&[x, y]| [Coordinate(x), Coordinate(y)]))
}

/// The whole persisted record
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BoxesDocument {
    pub boxes: Vec<BoxEntry>,
}

impl BoxesDocument {
    pub fn from_shapes(shapes: &[Shape]) -> Self {
        Self {
            boxes: shapes.iter().map(BoxEntry::from_shape).collect(),
        }
    }
}

/// Entries are decoded one by one so a bad entry cannot sink the whole record
#[derive(Deserialize)]
struct RawDocument {
    boxes: Vec<serde_json::Value>,
}

/// Decode a record into a shape list, skipping malformed entries
pub fn decode(json: &str) -> Result<Vec<Shape>> {
    let raw: RawDocument = serde_json::from_str(json).context("Invalid box metadata record")?;
    Ok(shapes_from_raw(raw))
}

/// Decode a record from raw EXIF tag bytes
pub fn decode_slice(bytes: &[u8]) -> Result<Vec<Shape>> {
    let raw: RawDocument =
        serde_json::from_slice(bytes).context("Invalid box metadata record")?;
    Ok(shapes_from_raw(raw))
}

/// Encode a shape list as a compact JSON record
pub fn encode(shapes: &[Shape]) -> Result<String> {
    serde_json::to_string(&BoxesDocument::from_shapes(shapes))
        .context("Failed to serialize box metadata")
}

fn shapes_from_raw(raw: RawDocument) -> Vec<Shape> {
    let total = raw.boxes.len();
    let shapes: Vec<Shape> = raw
        .boxes
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<BoxEntry>(value) {
            Ok(entry) => {
                let shape = entry.into_shape();
                if shape.is_none() {
                    log::warn!("Skipping box entry {i}: polygon needs at least 3 points");
                }
                shape
            }
            Err(e) => {
                log::warn!("Skipping malformed box entry {i}: {e}");
                None
            }
        })
        .collect();
    log::debug!("Decoded {} of {} box entries", shapes.len(), total);
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rectangle_and_polygon() {
        let json = r#"{"boxes": [
            {"top_left": [10, 20], "bottom_right": [30, 40], "text": "hello"},
            {"points": [[0, 0], [5, 0], [5, 5]], "text": "tri"}
        ]}"#;
        let shapes = decode(json).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(
            shapes[0],
            Shape::rectangle(Point::new(10.0, 20.0), Point::new(30.0, 40.0)).with_text("hello")
        );
        assert!(!shapes[1].is_rectangle());
        assert_eq!(shapes[1].text(), "tri");
        assert_eq!(shapes[1].vertices()[1], Point::new(5.0, 0.0));
    }

    #[test]
    fn test_decode_normalizes_swapped_corners() {
        let json = r#"{"boxes": [{"top_left": [30, 40], "bottom_right": [10, 20], "text": ""}]}"#;
        let shapes = decode(json).unwrap();
        assert_eq!(shapes[0].vertices()[0], Point::new(10.0, 20.0));
        assert_eq!(shapes[0].vertices()[2], Point::new(30.0, 40.0));
    }

    #[test]
    fn test_decode_skips_malformed_entries() {
        let json = r#"{"boxes": [
            {"top_left": [10, 20], "text": "missing corner"},
            {"points": [[0, 0], [1, 1]], "text": "too few"},
            {"top_left": "nope", "bottom_right": [1, 1]},
            {"top_left": [1, 2], "bottom_right": [3, 4]}
        ]}"#;
        let shapes = decode(json).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].text(), "");
        assert_eq!(shapes[0].vertices()[2], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_decode_rejects_invalid_document() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"shapes": []}"#).is_err());
        assert!(decode_slice(br#"{"boxes": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_encode_layout() {
        let shapes = vec![
            Shape::rectangle(Point::new(1.0, 2.0), Point::new(3.0, 4.0)).with_text("a"),
            Shape::polygon(vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(1.0, 2.0),
            ])
            .unwrap(),
        ];
        let json = encode(&shapes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["boxes"][0]["top_left"], serde_json::json!([1, 2]));
        assert_eq!(value["boxes"][0]["bottom_right"], serde_json::json!([3, 4]));
        assert_eq!(value["boxes"][0]["text"], "a");
        assert_eq!(value["boxes"][1]["points"][2], serde_json::json!([1, 2]));
        assert_eq!(decode(&json).unwrap(), shapes);
    }

    #[test]
    fn test_encode_writes_whole_pixels_as_integers() {
        let shapes = vec![Shape::rectangle(Point::new(10.0, 20.0), Point::new(30.0, 40.0))];
        assert_eq!(
            encode(&shapes).unwrap(),
            r#"{"boxes":[{"top_left":[10,20],"bottom_right":[30,40],"text":""}]}"#
        );

        let tri = Shape::polygon(vec![
            Point::new(-1.0, 0.0),
            Point::new(2.5, 0.0),
            Point::new(1.0, 3.0),
        ])
        .unwrap();
        assert_eq!(
            encode(&[tri.clone()]).unwrap(),
            r#"{"boxes":[{"points":[[-1,0],[2.5,0],[1,3]],"text":""}]}"#
        );
        assert_eq!(decode(&encode(&[tri.clone()]).unwrap()).unwrap(), vec![tri]);
    }
}
