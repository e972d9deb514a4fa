use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::object_from_json;

/// How the MOT15 sequences are turned into a YOLO dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Sequence names that go to the validation (`test`) split.
    pub val_sequences: Vec<String>,
    /// Sub-sequence length. `None` keeps each sequence whole.
    pub length: Option<usize>,
    pub class_names: Vec<String>,
    /// Weights directory written into `obj.data`.
    pub backup: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            val_sequences: [
                "ADL-Rundle-8",
                "ETH-Pedcross2",
                "KITTI-17",
                "PETS09-S2L1",
                "TUD-Stadtmitte",
                "Venice-2",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            length: None,
            class_names: vec!["person".to_string()],
            backup: "data/".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn from_json_file(path: &str) -> Result<DatasetConfig> {
        let config: DatasetConfig = object_from_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(Error::InvalidConfig(
                "sub-sequence length must be at least 1".to_string(),
            ));
        }
        if self.class_names.is_empty() {
            return Err(Error::InvalidConfig("class_names is empty".to_string()));
        }
        Ok(())
    }

    pub fn is_val(&self, sequence_name: &str) -> bool {
        self.val_sequences.iter().any(|s| s == sequence_name)
    }
}
