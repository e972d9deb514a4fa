mod common;

use common::{MOT15_GT, make_sequence};
use mot_yolo::FrameAnnotation;
use mot_yolo::config::DatasetConfig;
use mot_yolo::dataset::{prepare_dataset, process_sequence};
use mot_yolo::io::object_from_json;
use std::fs;
use tempfile::TempDir;

fn config(val: &[&str], length: Option<usize>) -> DatasetConfig {
    DatasetConfig {
        val_sequences: val.iter().map(|s| s.to_string()).collect(),
        length,
        ..Default::default()
    }
}

#[test]
fn test_prepare_dataset_layout() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    make_sequence(input.path(), "Venice-1", 7, MOT15_GT);
    make_sequence(input.path(), "ADL-Rundle-6", 3, "2,1,0,0,192,108,1,-1,-1,-1\n");
    make_sequence(input.path(), "Venice-2", 2, "");

    let summary = prepare_dataset(input.path(), output.path(), &config(&["Venice-2"], None)).unwrap();
    assert_eq!(summary.train.len(), 10);
    assert_eq!(summary.val.len(), 2);

    let out = output.path();
    // sorted sequence order
    assert_eq!(summary.train[0], out.join("train/ADL-Rundle-6_1/000001.jpg"));
    assert_eq!(summary.train[3], out.join("train/Venice-1_1/000001.jpg"));
    assert_eq!(summary.val[1], out.join("test/Venice-2_1/000002.jpg"));

    assert_eq!(
        fs::read_to_string(out.join("train/Venice-1_1/000004.jpg")).unwrap(),
        "Venice-1:4"
    );
    assert_eq!(
        fs::read_to_string(out.join("train/ADL-Rundle-6_1/000002.txt")).unwrap(),
        "0 0.05 0.05 0.1 0.1"
    );
    assert_eq!(fs::read_to_string(out.join("train/ADL-Rundle-6_1/000001.txt")).unwrap(), "");
    let labels = fs::read_to_string(out.join("train/Venice-1_1/000003.txt")).unwrap();
    assert_eq!(labels.lines().count(), 3);
    assert!(labels.lines().all(|l| l.starts_with("0 ")));

    let annotations: Vec<FrameAnnotation> =
        object_from_json(out.join("train/Venice-1_1/annotations.json")).unwrap();
    assert_eq!(annotations.len(), 7);
    assert_eq!(annotations[5].ids(), &[0, 1, 2, 3]);

    let train_txt = fs::read_to_string(out.join("train.txt")).unwrap();
    assert_eq!(train_txt.lines().count(), 10);
    assert!(!train_txt.ends_with('\n'));
    assert_eq!(fs::read_to_string(out.join("obj.names")).unwrap(), "person");

    let obj_data = fs::read_to_string(out.join("obj.data")).unwrap();
    assert!(obj_data.starts_with("classes = 1\n"));
    assert!(obj_data.contains(&format!("valid = {}\n", out.join("test.txt").display())));
    assert!(obj_data.ends_with("backup = data/\n"));
}

#[test]
fn test_subsequences() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let seq = make_sequence(input.path(), "Venice-1", 7, MOT15_GT);

    let copied = process_sequence(&seq, output.path(), Some(3)).unwrap();
    // 7 frames in chunks of 3: the trailing single frame is dropped
    assert_eq!(copied.len(), 6);
    assert!(output.path().join("Venice-1_1").is_dir());
    assert!(output.path().join("Venice-1_2").is_dir());
    assert!(!output.path().join("Venice-1_3").exists());

    // second chunk holds source frames 4..6 renumbered from 1
    assert_eq!(
        fs::read_to_string(output.path().join("Venice-1_2/000001.jpg")).unwrap(),
        "Venice-1:4"
    );
    let labels = fs::read_to_string(output.path().join("Venice-1_2/000003.txt")).unwrap();
    assert_eq!(labels.lines().count(), 4);

    let annotations: Vec<FrameAnnotation> =
        object_from_json(output.path().join("Venice-1_2/annotations.json")).unwrap();
    assert_eq!(annotations.len(), 3);
    assert!(annotations[0].is_empty());
}

#[test]
fn test_whole_sequence_gets_first_chunk_name() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let seq = make_sequence(input.path(), "Venice-1", 7, MOT15_GT);

    let copied = process_sequence(&seq, output.path(), None).unwrap();
    assert_eq!(copied.len(), 7);
    assert!(output.path().join("Venice-1_1").is_dir());
    assert!(!output.path().join("Venice-1").exists());
    assert_eq!(copied[6], output.path().join("Venice-1_1/000007.jpg"));
}

#[test]
fn test_malformed_ground_truth_aborts() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let gt = MOT15_GT.replacen("\n", "\n\n", 1);
    let seq = make_sequence(input.path(), "Venice-1", 7, &gt);

    assert!(process_sequence(&seq, output.path(), None).is_err());
}

#[test]
fn test_missing_frame_image_fails() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let seq = make_sequence(input.path(), "Venice-1", 7, MOT15_GT);
    fs::remove_file(seq.join("img1/000002.jpg")).unwrap();

    assert!(prepare_dataset(input.path(), output.path(), &config(&[], None)).is_err());
}

#[test]
fn test_zero_length_rejected() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    assert!(prepare_dataset(input.path(), output.path(), &config(&[], Some(0))).is_err());
}
