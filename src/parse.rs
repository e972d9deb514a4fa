//! Readers for the two MOT15 per-sequence files: `seqinfo.ini` and `gt/gt.txt`.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::mem;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{BoundingBox, FrameAnnotation, SequenceMetadata};

const SEQUENCE_SECTION: &str = "Sequence";
const GT_FIELDS: usize = 10;
/// Every ground-truth box is a person.
const PERSON_CLASS: u32 = 0;

/// Key/value pairs of one `[section]` of an ini file.
///
/// Keys are matched case-insensitively, values are trimmed.
struct IniSection {
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn read(contents: &str, section: &str) -> Result<IniSection> {
        let mut entries = Vec::new();
        let mut found = false;
        let mut inside = false;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                inside = name.trim() == section;
                found |= inside;
                continue;
            }
            if !inside {
                continue;
            }
            if let Some(idx) = line.find(['=', ':']) {
                let key = line[..idx].trim().to_lowercase();
                let value = line[idx + 1..].trim().to_string();
                entries.push((key, value));
            }
        }
        if !found {
            return Err(Error::MissingSection(section.to_string()));
        }
        Ok(IniSection { entries })
    }

    fn get(&self, key: &str) -> Result<&str> {
        let wanted = key.to_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| *k == wanted)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| Error::MissingKey(key.to_string()))
    }

    fn get_parsed<T: FromStr>(&self, key: &str, expected: &'static str) -> Result<T> {
        let value = self.get(key)?;
        value.parse().map_err(|_| Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        })
    }

    fn get_positive<T: FromStr + PartialOrd + Default>(
        &self,
        key: &str,
        expected: &'static str,
    ) -> Result<T> {
        let parsed: T = self.get_parsed(key, expected)?;
        if !(parsed > T::default()) {
            return Err(Error::InvalidValue {
                key: key.to_string(),
                value: self.get(key)?.to_string(),
                expected,
            });
        }
        Ok(parsed)
    }
}

/// Parses `seqinfo.ini` contents. `imDir` is resolved against `base_dir`.
pub fn parse_metadata_str(contents: &str, base_dir: &Path) -> Result<SequenceMetadata> {
    let section = IniSection::read(contents, SEQUENCE_SECTION)?;
    Ok(SequenceMetadata {
        name: section.get("name")?.to_string(),
        directory: base_dir.join(section.get("imDir")?),
        framerate: section.get_positive("frameRate", "positive float")?,
        length: section.get_parsed("seqLength", "integer")?,
        width: section.get_positive("imWidth", "positive integer")?,
        height: section.get_positive("imHeight", "positive integer")?,
        extension: section.get("imExt")?.to_string(),
    })
}

/// Reads a MOT15 `seqinfo.ini`.
///
/// The image directory of the result is the ini's parent directory joined with `imDir`.
pub fn parse_metadata<P: AsRef<Path>>(metadata_file: P) -> Result<SequenceMetadata> {
    let path = metadata_file.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let metadata = parse_metadata_str(&contents, base_dir)?;
    log::debug!(
        "{}: {} frames {}x{} @ {} fps",
        metadata.name,
        metadata.length,
        metadata.width,
        metadata.height,
        metadata.framerate
    );
    Ok(metadata)
}

/// One line of `gt.txt`, with frame and object id already shifted to 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthRecord {
    pub frame: i64,
    pub id: i64,
    pub bbox: BoundingBox,
}

fn parse_field<T: FromStr>(raw: &str, line: usize, field: &'static str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidField {
        line,
        field,
        value: raw.trim().to_string(),
    })
}

/// Parses `frame,id,x,y,w,h,conf,x3,y3,z`. `line` is 1-based and only used for errors.
pub fn parse_gt_line(text: &str, line: usize) -> Result<GroundTruthRecord> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != GT_FIELDS {
        return Err(Error::FieldCount {
            line,
            expected: GT_FIELDS,
            found: fields.len(),
        });
    }
    let frame: i64 = parse_field(fields[0], line, "frame")?;
    let id: i64 = parse_field(fields[1], line, "id")?;
    Ok(GroundTruthRecord {
        frame: frame - 1,
        id: id - 1,
        bbox: BoundingBox {
            x: parse_field(fields[2], line, "x")?,
            y: parse_field(fields[3], line, "y")?,
            w: parse_field(fields[4], line, "w")?,
            h: parse_field(fields[5], line, "h")?,
        },
    })
}

enum State {
    Reading,
    Padding,
    Done,
}

/// Streams one [`FrameAnnotation`] per frame out of a `gt.txt` reader.
///
/// Lines must be sorted by frame. Frames without detections come out empty,
/// and after the input runs dry frames are padded until `length` have been
/// produced. `length` does not cap gap filling: if the file references frames
/// at or past `length`, every frame below the last referenced one is still
/// produced, and the last one is dropped.
///
/// The first error ends the stream.
pub struct GroundTruthFrames<R> {
    lines: Lines<R>,
    line_no: usize,
    length: usize,
    current_frame: i64,
    annotation: FrameAnnotation,
    pending: Option<GroundTruthRecord>,
    state: State,
}

impl<R: BufRead> GroundTruthFrames<R> {
    pub fn new(reader: R, length: usize) -> GroundTruthFrames<R> {
        GroundTruthFrames {
            lines: reader.lines(),
            line_no: 0,
            length,
            current_frame: 0,
            annotation: FrameAnnotation::new(),
            pending: None,
            state: State::Reading,
        }
    }

    fn emit(&mut self) -> FrameAnnotation {
        self.current_frame += 1;
        mem::take(&mut self.annotation)
    }

    fn next_record(&mut self) -> Option<Result<GroundTruthRecord>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(
            line.map_err(|source| Error::ReadLine {
                line: self.line_no,
                source,
            })
            .and_then(|l| parse_gt_line(&l, self.line_no)),
        )
    }
}

impl<R: BufRead> Iterator for GroundTruthFrames<R> {
    type Item = Result<FrameAnnotation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Padding => {
                    if self.current_frame < self.length as i64 {
                        return Some(Ok(self.emit()));
                    }
                    self.state = State::Done;
                }
                State::Reading => {
                    if let Some(record) = self.pending.take() {
                        if record.frame > self.current_frame {
                            self.pending = Some(record);
                            return Some(Ok(self.emit()));
                        }
                        self.annotation.push(record.bbox, PERSON_CLASS, record.id);
                        continue;
                    }
                    match self.next_record() {
                        Some(Ok(record)) => self.pending = Some(record),
                        Some(Err(e)) => {
                            self.state = State::Done;
                            return Some(Err(e));
                        }
                        None => self.state = State::Padding,
                    }
                }
            }
        }
    }
}

/// Opens `gt_file` and streams its frames, see [`GroundTruthFrames`].
///
/// `length` is the sequence length from [`parse_metadata`].
pub fn parse_ground_truth<P: AsRef<Path>>(
    gt_file: P,
    length: usize,
) -> Result<GroundTruthFrames<BufReader<File>>> {
    let path = gt_file.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(GroundTruthFrames::new(BufReader::new(file), length))
}
