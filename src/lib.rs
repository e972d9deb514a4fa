pub mod config;
pub mod convert;
pub mod data_loader;
pub mod dataset;
pub mod error;
pub mod io;
pub mod parse;
pub mod pipeline;
pub mod types;

pub use error::{Error, Result};
pub use types::{BoundingBox, FrameAnnotation, SequenceMetadata};
