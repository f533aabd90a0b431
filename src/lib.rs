pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, SplitConfig};
pub use core::{engine::SplitEngine, pipeline::MarkdownSplitPipeline, splitter::Splitter};
pub use utils::error::{Result, SplitError};
