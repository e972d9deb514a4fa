//! Writes the YOLO dataset tree: split directories with frames and labels, plus manifests.

use std::ops::Range;
use std::path::{Path, PathBuf};

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::config::DatasetConfig;
use crate::data_loader::{list_sequences, sequence_name, split_sequences};
use crate::error::{Error, Result};
use crate::io::{
    object_to_json, prepare_obj_data, prepare_obj_names, prepare_path_list, prepare_txt,
    write_text,
};
use crate::pipeline::{GT_FILE, SEQ_INFO_FILE, load_sequence};
use crate::types::FrameAnnotation;

pub const TRAIN_DIR: &str = "train";
/// Darknet-style tools expect the validation split under this name.
pub const VAL_DIR: &str = "test";
pub const ANNOTATIONS_FILE: &str = "annotations.json";

/// Consecutive index ranges of `n` over `0..len`; the last one may be shorter.
pub fn batched(len: usize, n: usize) -> impl Iterator<Item = Range<usize>> {
    (0..len)
        .step_by(n.max(1))
        .map(move |start| start..(start + n).min(len))
}

/// Paths of every frame copied into the two splits.
#[derive(Debug, Default)]
pub struct DatasetSummary {
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Pulls the frame expected at `frame_idx` off a sequence stream.
fn next_frame<I>(frames: &mut I, frame_idx: usize) -> Result<FrameAnnotation>
where
    I: Iterator<Item = Result<FrameAnnotation>>,
{
    frames
        .next()
        .unwrap_or_else(|| Err(Error::MissingFrame { frame: frame_idx }))
}

/// Writes one sequence into `split_directory`, returning the copied frame paths.
///
/// The sequence is cut into `<name>_<idx>` chunks of `length` frames (the whole
/// sequence when `None`); a shorter tail is dropped. Frames are streamed from
/// the ground truth in order, only one chunk is held at a time.
pub fn process_sequence(
    sequence: &Path,
    split_directory: &Path,
    length: Option<usize>,
) -> Result<Vec<PathBuf>> {
    log::trace!("loading {}", sequence.display());
    let (meta, mut frames) =
        load_sequence(sequence.join(GT_FILE), sequence.join(SEQ_INFO_FILE))?;
    let name = sequence_name(sequence);
    let batch_length = length.unwrap_or(meta.length);
    let mut copied = Vec::new();

    for (idx, subseq) in batched(meta.length, batch_length).enumerate() {
        let idx = idx + 1;
        if subseq.len() < batch_length {
            log::warn!(
                "Skipping {} subsequence of length {} since it's shorter than {}",
                name,
                subseq.len(),
                batch_length
            );
            continue;
        }

        let seq_dir = split_directory.join(format!("{}_{}", name, idx));
        create_dir(&seq_dir)?;
        let mut annotations = Vec::with_capacity(subseq.len());

        for (subidx, frame_idx) in subseq.enumerate() {
            let gt = next_frame(&mut frames, frame_idx)?;
            let in_filename = meta.directory.join(meta.frame_file_name(frame_idx));
            let out_filename = seq_dir.join(meta.frame_file_name(subidx));
            std::fs::copy(&in_filename, &out_filename).map_err(|e| Error::io(&in_filename, e))?;

            write_text(out_filename.with_extension("txt"), &prepare_txt(&gt))?;
            annotations.push(gt);
            copied.push(out_filename);
        }

        object_to_json(seq_dir.join(ANNOTATIONS_FILE), &annotations)?;
    }
    log::trace!("{}: copied {} frames", name, copied.len());
    Ok(copied)
}

/// Writes every sequence of one split, in the given order.
pub fn process_split(
    split_directory: &Path,
    sequences: &[PathBuf],
    length: Option<usize>,
) -> Result<Vec<PathBuf>> {
    create_dir(split_directory)?;
    let per_sequence: Vec<Vec<PathBuf>> = sequences
        .par_iter()
        .progress_count(sequences.len() as u64)
        .map(|seq| process_sequence(seq, split_directory, length))
        .collect::<Result<_>>()?;
    let split: Vec<PathBuf> = per_sequence.into_iter().flatten().collect();
    log::info!(
        "{}: {} sequences, {} frames",
        split_directory.display(),
        sequences.len(),
        split.len()
    );
    Ok(split)
}

/// Converts every MOT15 sequence under `directory` into a YOLO dataset in `output_directory`.
///
/// Writes `train/`, `test/`, `train.txt`, `test.txt`, `obj.names` and `obj.data`.
pub fn prepare_dataset<P, Q>(
    directory: P,
    output_directory: Q,
    config: &DatasetConfig,
) -> Result<DatasetSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    config.validate()?;
    let output_directory = output_directory.as_ref();
    let sequences = list_sequences(directory)?;
    let (train_sequences, val_sequences) = split_sequences(sequences, config);

    let train = process_split(&output_directory.join(TRAIN_DIR), &train_sequences, config.length)?;
    let train_txt = output_directory.join("train.txt");
    write_text(&train_txt, &prepare_path_list(&train))?;

    let val = process_split(&output_directory.join(VAL_DIR), &val_sequences, config.length)?;
    let val_txt = output_directory.join("test.txt");
    write_text(&val_txt, &prepare_path_list(&val))?;

    let obj_names_txt = output_directory.join("obj.names");
    write_text(&obj_names_txt, &prepare_obj_names(&config.class_names))?;

    let obj_data = prepare_obj_data(
        &train_txt,
        &val_txt,
        &obj_names_txt,
        config.class_names.len(),
        &config.backup,
    );
    write_text(output_directory.join("obj.data"), &obj_data)?;

    Ok(DatasetSummary { train, val })
}
