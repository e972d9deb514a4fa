use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Four box values, either `[x1, y1, w, h]` in pixels or `[cx, cy, w, h]` normalized.
///
/// Serialized as a plain four element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox { x, y, w, h }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.w, self.h]
    }

    /// Compare against another box with an absolute tolerance on every value.
    pub fn almost_eq(&self, other: &BoundingBox, eps: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        BoundingBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

/// Detections of a single frame.
///
/// Boxes, classes and ids are parallel sequences. They can only grow together
/// through [`FrameAnnotation::push`], so their lengths always agree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFrameAnnotation")]
pub struct FrameAnnotation {
    bboxes: Vec<BoundingBox>,
    classes: Vec<u32>,
    ids: Vec<i64>,
}

#[derive(Deserialize)]
struct RawFrameAnnotation {
    bboxes: Vec<BoundingBox>,
    classes: Vec<u32>,
    ids: Vec<i64>,
}

impl TryFrom<RawFrameAnnotation> for FrameAnnotation {
    type Error = String;

    fn try_from(raw: RawFrameAnnotation) -> Result<Self, Self::Error> {
        if raw.bboxes.len() != raw.classes.len() || raw.bboxes.len() != raw.ids.len() {
            return Err(format!(
                "annotation lengths differ: {} bboxes, {} classes, {} ids",
                raw.bboxes.len(),
                raw.classes.len(),
                raw.ids.len()
            ));
        }
        Ok(FrameAnnotation {
            bboxes: raw.bboxes,
            classes: raw.classes,
            ids: raw.ids,
        })
    }
}

impl FrameAnnotation {
    pub fn new() -> FrameAnnotation {
        FrameAnnotation::default()
    }

    pub fn push(&mut self, bbox: BoundingBox, class: u32, id: i64) {
        self.bboxes.push(bbox);
        self.classes.push(class);
        self.ids.push(id);
    }

    pub fn bboxes(&self) -> &[BoundingBox] {
        &self.bboxes
    }

    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.bboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bboxes.is_empty()
    }

    /// Iterate detections as `(bbox, class, id)`.
    pub fn iter(&self) -> impl Iterator<Item = (&BoundingBox, u32, i64)> + '_ {
        self.bboxes
            .iter()
            .zip(self.classes.iter().copied())
            .zip(self.ids.iter().copied())
            .map(|((b, c), i)| (b, c, i))
    }

    /// Replace every box with `f(box)`; classes and ids are carried over untouched.
    pub fn map_bboxes<F>(self, f: F) -> FrameAnnotation
    where
        F: FnMut(BoundingBox) -> BoundingBox,
    {
        FrameAnnotation {
            bboxes: self.bboxes.into_iter().map(f).collect(),
            classes: self.classes,
            ids: self.ids,
        }
    }
}

/// Contents of a sequence's `seqinfo.ini`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetadata {
    pub name: String,
    /// Image directory, already joined onto the folder holding `seqinfo.ini`.
    pub directory: PathBuf,
    pub framerate: f64,
    pub length: usize,
    pub width: u32,
    pub height: u32,
    /// Frame file extension including the leading dot, e.g. `.jpg`.
    pub extension: String,
}

impl SequenceMetadata {
    /// File name of the 0-based frame `index`, e.g. `000001.jpg` for index 0.
    pub fn frame_file_name(&self, index: usize) -> String {
        format!("{:06}{}", index + 1, self.extension)
    }
}
