use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 切分使用的標題層級 (1..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The boundary prefix, e.g. level 2 is `"## "`.
    pub fn marker(self) -> String {
        format!("{} ", "#".repeat(usize::from(self.0)))
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "heading level must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )
        })
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// Source document as raw lines, no line terminators kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Splits on `\n` and `\r\n`. An empty string has zero lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    /// Content before the first boundary heading.
    Preamble,
    Titled { title: String, ordinal: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    /// For titled sections the first line is the re-synthesized `# title`.
    pub lines: Vec<String>,
    /// 1-based line of the boundary heading (1 for the preamble).
    pub start_line: usize,
}

impl Section {
    pub fn title(&self) -> Option<&str> {
        match &self.kind {
            SectionKind::Preamble => None,
            SectionKind::Titled { title, .. } => Some(title),
        }
    }

    pub fn ordinal(&self) -> Option<usize> {
        match self.kind {
            SectionKind::Preamble => None,
            SectionKind::Titled { ordinal, .. } => Some(ordinal),
        }
    }

    pub fn content(&self) -> String {
        let mut content = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub filename: String,
    /// `None` for the preamble.
    pub title: Option<String>,
    pub content: String,
    pub start_line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutput {
    /// In flush order; the preamble, when present, comes first.
    pub files: Vec<OutputFile>,
    pub manifest: Manifest,
    pub section_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub section_count: usize,
    pub files_written: usize,
    pub titles: Vec<String>,
}
