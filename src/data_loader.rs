use std::path::{Path, PathBuf};

use glob::glob;

use crate::config::DatasetConfig;
use crate::error::{Error, Result};

fn dir_filter(rp: glob::GlobResult) -> Option<PathBuf> {
    match rp {
        Ok(p) if p.is_dir() => Some(p),
        Ok(_) => None,
        Err(e) => {
            log::warn!("skipping unreadable entry: {}", e);
            None
        }
    }
}

/// Lists the sequence directories directly under `root_folder`, sorted by path.
pub fn list_sequences<P: AsRef<Path>>(root_folder: P) -> Result<Vec<PathBuf>> {
    let root = root_folder.as_ref();
    if !root.is_dir() {
        return Err(Error::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }
    let pattern = format!("{}/*", glob::Pattern::escape(&root.to_string_lossy()));
    let mut sorted_path: Vec<PathBuf> = glob(&pattern)?.filter_map(dir_filter).collect();
    sorted_path.sort();
    log::trace!("found {} sequences in {}", sorted_path.len(), root.display());
    Ok(sorted_path)
}

pub fn sequence_name(sequence: &Path) -> String {
    sequence
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Splits sequences into `(train, val)` by validation name, keeping order.
pub fn split_sequences(
    sequences: Vec<PathBuf>,
    config: &DatasetConfig,
) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let (val, train): (Vec<_>, Vec<_>) = sequences
        .into_iter()
        .partition(|seq| config.is_val(&sequence_name(seq)));
    (train, val)
}
