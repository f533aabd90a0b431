pub mod cli;
pub mod toml_config;

use crate::core::SplitSettings;
use crate::domain::model::HeadingLevel;
use crate::utils::error::Result;
use crate::utils::validation::{validate_extension, validate_path, validate_plain_name, Validate};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use crate::utils::error::SplitError;
#[cfg(feature = "cli")]
use crate::utils::validation::{parse_bool_token, parse_heading_level};

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub source_path: PathBuf,
    pub level: HeadingLevel,
    pub numbered: bool,
    pub extension: String,
    pub output_dir_name: String,
    pub strict_names: bool,
}

impl SplitConfig {
    pub fn new(source_path: impl Into<PathBuf>, level: HeadingLevel, numbered: bool) -> Self {
        Self {
            source_path: source_path.into(),
            level,
            numbered,
            extension: crate::core::splitter::DEFAULT_EXTENSION.to_string(),
            output_dir_name: toml_config::DEFAULT_OUTPUT_DIR.to_string(),
            strict_names: false,
        }
    }
}

impl SplitSettings for SplitConfig {
    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn level(&self) -> HeadingLevel {
        self.level
    }

    fn numbered(&self) -> bool {
        self.numbered
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn output_dir_name(&self) -> &str {
        &self.output_dir_name
    }

    fn strict_names(&self) -> bool {
        self.strict_names
    }
}

impl Validate for SplitConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source_path.to_string_lossy())?;
        validate_extension("extension", &self.extension)?;
        validate_plain_name("output_dir", &self.output_dir_name)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "split-markdown")]
#[command(about = "Split a Markdown file into one file per heading")]
#[command(
    long_about = "Reads a Markdown file and splits it into multiple files. Headings at the \
chosen level are treated as split points and the heading becomes the filename. Files are \
written to a new `_split` folder next to the source, together with a `_list.yaml` listing \
them in document order. Headings must only use characters supported in filenames. There is \
a maximum of 999 headings."
)]
pub struct CliConfig {
    /// The combined Markdown content
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Heading level to split at, e.g. 1 for `#` or 2 for `##`
    #[arg(value_name = "HEADING")]
    pub heading: Option<String>,

    /// Prefix files with their position, e.g. Y, true, Yes, false
    #[arg(value_name = "NUMBERED")]
    pub numbered: Option<String>,

    /// Path to a TOML defaults file (default: ./split-markdown.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Replace an existing destination folder without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Show the files that would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Fail instead of overwriting when two headings produce the same filename
    #[arg(long)]
    pub strict_names: bool,

    /// Extension for the section files, without the dot
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merge command line values over the defaults file.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> Result<SplitConfig> {
        let defaults = file.cloned().unwrap_or_default();

        let level = match self.heading.as_deref() {
            Some(text) => parse_heading_level(text)?,
            None => defaults
                .split
                .level
                .ok_or_else(|| SplitError::invalid_arguments("Invalid number of arguments."))?,
        };

        let numbered = match self.numbered.as_deref() {
            Some(text) => parse_bool_token(text, "numbered-files")?,
            None => defaults
                .split
                .numbered
                .ok_or_else(|| SplitError::invalid_arguments("Invalid number of arguments."))?,
        };

        let config = SplitConfig {
            source_path: self.source.clone(),
            level,
            numbered,
            extension: self
                .extension
                .clone()
                .unwrap_or_else(|| defaults.extension().to_string()),
            output_dir_name: defaults.output_dir().to_string(),
            strict_names: self.strict_names || defaults.split.strict_names.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}
