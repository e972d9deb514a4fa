use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::convert::{YoloFrames, convert_parsed_to_yolo};
use crate::error::Result;
use crate::parse::{GroundTruthFrames, parse_ground_truth, parse_metadata};
use crate::types::{FrameAnnotation, SequenceMetadata};

pub const SEQ_INFO_FILE: &str = "seqinfo.ini";
pub const GT_FILE: &str = "gt/gt.txt";

/// Normalized frames of one sequence, streamed straight from `gt.txt`.
pub type SequenceFrames = YoloFrames<GroundTruthFrames<BufReader<File>>>;

/// Parses the metadata, then streams the ground truth normalized against it.
///
/// The ground truth file is only opened once the metadata parsed, since its
/// frame count and image size drive the rest.
pub fn load_sequence<P, Q>(gt_file: P, metadata_file: Q) -> Result<(SequenceMetadata, SequenceFrames)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let metadata = parse_metadata(metadata_file)?;
    let gt = parse_ground_truth(gt_file, metadata.length)?;
    let frames = convert_parsed_to_yolo(gt, metadata.width, metadata.height);
    Ok((metadata, frames))
}

/// Loads a MOT15 sequence directory (`seqinfo.ini` + `gt/gt.txt`) fully into memory.
pub fn process_directory<P: AsRef<Path>>(
    directory: P,
) -> Result<(SequenceMetadata, Vec<FrameAnnotation>)> {
    let directory = directory.as_ref();
    log::trace!("loading {}", directory.display());
    let (metadata, frames) =
        load_sequence(directory.join(GT_FILE), directory.join(SEQ_INFO_FILE))?;
    let frames = frames.collect::<Result<Vec<_>>>()?;
    Ok((metadata, frames))
}
