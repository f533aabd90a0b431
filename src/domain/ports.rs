use crate::domain::model::{Document, HeadingLevel, Manifest, SplitOutput, SplitReport};
use crate::utils::error::Result;
use std::path::Path;

pub trait SourceLoader {
    fn load_lines(&self, path: &Path) -> Result<Document>;
}

pub trait OutputWriter {
    /// Removes `dir` if it exists, then creates it empty.
    fn ensure_clean_directory(&self, dir: &Path) -> Result<()>;
    /// Overwrites an existing file of the same name.
    fn write_file(&self, dir: &Path, filename: &str, content: &str) -> Result<()>;
    fn write_manifest(&self, dir: &Path, manifest: &Manifest) -> Result<()>;
}

pub trait SplitSettings {
    fn source_path(&self) -> &Path;
    fn level(&self) -> HeadingLevel;
    fn numbered(&self) -> bool;
    fn extension(&self) -> &str;
    fn output_dir_name(&self) -> &str;
    fn strict_names(&self) -> bool;

    /// `_split` (or the configured name) next to the source file.
    fn output_dir(&self) -> std::path::PathBuf {
        let parent = self
            .source_path()
            .parent()
            .unwrap_or_else(|| Path::new(""));
        parent.join(self.output_dir_name())
    }
}

/// Extract (read lines), transform (split), load (write the split folder).
pub trait Pipeline {
    fn extract(&self) -> Result<Document>;
    fn transform(&self, document: Document) -> Result<SplitOutput>;
    fn load(&self, output: SplitOutput) -> Result<SplitReport>;
}
