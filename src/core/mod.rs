pub mod engine;
pub mod manifest;
pub mod pipeline;
pub mod splitter;

pub use crate::domain::model::{Document, Manifest, OutputFile, Section, SplitOutput, SplitReport};
pub use crate::domain::ports::{OutputWriter, Pipeline, SourceLoader, SplitSettings};
pub use crate::utils::error::Result;
