use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};
use crate::types::FrameAnnotation;

/// Serializes an object to a pretty JSON file.
pub fn object_to_json<T: Serialize + ?Sized, P: AsRef<Path>>(output_path: P, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object)?;
    write_text(output_path, &j)
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<T> {
    let path = file_path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn write_text<P: AsRef<Path>>(output_path: P, contents: &str) -> Result<()> {
    let path = output_path.as_ref();
    std::fs::write(path, contents).map_err(|e| Error::io(path, e))
}

/// YOLO label text of one frame: `class cx cy w h` per detection, newline separated.
///
/// An empty frame gives an empty string.
pub fn prepare_txt(annotation: &FrameAnnotation) -> String {
    annotation
        .iter()
        .map(|(b, cls, _)| format!("{} {} {} {} {}", cls, b.x, b.y, b.w, b.h))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn prepare_obj_names(classes: &[String]) -> String {
    classes.join("\n")
}

/// Darknet `obj.data` pointing at the split lists and class names.
pub fn prepare_obj_data(
    train: &Path,
    valid: &Path,
    names: &Path,
    n_classes: usize,
    backup: &str,
) -> String {
    let mut s = String::new();
    s += format!("classes = {}\n", n_classes).as_str();
    s += format!("train = {}\n", train.display()).as_str();
    s += format!("valid = {}\n", valid.display()).as_str();
    s += format!("names = {}\n", names.display()).as_str();
    s += format!("backup = {}\n", backup).as_str();
    s
}

/// Newline separated path list, no trailing newline.
pub fn prepare_path_list<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
