use crate::types::{BoundingBox, FrameAnnotation};

/// Converts an `[x1, y1, w, h]` pixel box to YOLO `[cx, cy, w, h]` normalized by the frame size.
///
/// `width` and `height` must be non-zero.
pub fn convert_to_yolo(bbox: &BoundingBox, width: u32, height: u32) -> BoundingBox {
    let width = width as f64;
    let height = height as f64;
    BoundingBox {
        x: (bbox.x + bbox.w / 2.0) / width,
        y: (bbox.y + bbox.h / 2.0) / height,
        w: bbox.w / width,
        h: bbox.h / height,
    }
}

/// Inverse of [`convert_to_yolo`].
pub fn convert_from_yolo(bbox: &BoundingBox, width: u32, height: u32) -> BoundingBox {
    let width = width as f64;
    let height = height as f64;
    let w = bbox.w * width;
    let h = bbox.h * height;
    BoundingBox {
        x: bbox.x * width - w / 2.0,
        y: bbox.y * height - h / 2.0,
        w,
        h,
    }
}

impl FrameAnnotation {
    pub fn to_yolo(self, width: u32, height: u32) -> FrameAnnotation {
        self.map_bboxes(|b| convert_to_yolo(&b, width, height))
    }
}

/// Anything a frame stream can carry: a bare annotation or a fallible one.
pub trait FrameItem {
    fn to_yolo(self, width: u32, height: u32) -> Self;
}

impl FrameItem for FrameAnnotation {
    fn to_yolo(self, width: u32, height: u32) -> Self {
        FrameAnnotation::to_yolo(self, width, height)
    }
}

impl<E> FrameItem for Result<FrameAnnotation, E> {
    fn to_yolo(self, width: u32, height: u32) -> Self {
        self.map(|f| f.to_yolo(width, height))
    }
}

/// Lazy adapter normalizing each frame as it is pulled.
pub struct YoloFrames<I> {
    frames: I,
    width: u32,
    height: u32,
}

impl<I> Iterator for YoloFrames<I>
where
    I: Iterator,
    I::Item: FrameItem,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .next()
            .map(|f| f.to_yolo(self.width, self.height))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

/// Wraps a frame stream so every box comes out normalized against `width` x `height`.
pub fn convert_parsed_to_yolo<I>(frames: I, width: u32, height: u32) -> YoloFrames<I::IntoIter>
where
    I: IntoIterator,
    I::Item: FrameItem,
{
    YoloFrames {
        frames: frames.into_iter(),
        width,
        height,
    }
}
