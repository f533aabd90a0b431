use crate::core::manifest::MANIFEST_FILENAME;
use crate::core::splitter::{FilenameScheme, Splitter};
use crate::core::{OutputWriter, Pipeline, SourceLoader, SplitSettings};
use crate::domain::model::{Document, OutputFile, SplitOutput, SplitReport};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::is_plain_filename;
use std::collections::{HashMap, HashSet};

/// A filename produced by more than one section, or by a section and the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub filename: String,
    /// `None` when the name belongs to the manifest.
    pub first_line: Option<usize>,
    pub line: usize,
}

/// Every file whose name was already used by an earlier one or is reserved
/// for the manifest.
pub fn find_collisions(files: &[OutputFile]) -> Vec<Collision> {
    let mut seen: HashMap<&str, Option<usize>> = HashMap::new();
    seen.insert(MANIFEST_FILENAME, None);
    let mut collisions = Vec::new();

    for file in files {
        match seen.get(file.filename.as_str()) {
            Some(&first_line) => collisions.push(Collision {
                filename: file.filename.clone(),
                first_line,
                line: file.start_line,
            }),
            None => {
                seen.insert(&file.filename, Some(file.start_line));
            }
        }
    }

    collisions
}

pub struct MarkdownSplitPipeline<S: SourceLoader + OutputWriter, C: SplitSettings> {
    storage: S,
    config: C,
    splitter: Splitter,
}

impl<S: SourceLoader + OutputWriter, C: SplitSettings> MarkdownSplitPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let scheme = FilenameScheme {
            numbered: config.numbered(),
            extension: config.extension().to_string(),
        };
        let splitter = Splitter::new(config.level(), scheme);
        Self {
            storage,
            config,
            splitter,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: SourceLoader + OutputWriter, C: SplitSettings> Pipeline for MarkdownSplitPipeline<S, C> {
    fn extract(&self) -> Result<Document> {
        let source = self.config.source_path();
        tracing::debug!("Reading markdown from: {}", source.display());

        let document = self.storage.load_lines(source)?;
        if document.is_empty() {
            return Err(SplitError::EmptyInput);
        }
        Ok(document)
    }

    fn transform(&self, document: Document) -> Result<SplitOutput> {
        let output = self.splitter.split(&document)?;

        // 標題直接當作檔名，含路徑分隔符的在寫入前就拒絕
        if let Some(file) = output.files.iter().find(|f| !is_plain_filename(&f.filename)) {
            return Err(SplitError::UnsafeFilename {
                filename: file.filename.clone(),
            });
        }

        for collision in find_collisions(&output.files) {
            if self.config.strict_names() {
                return Err(SplitError::DuplicateFilename {
                    filename: collision.filename,
                    first_line: collision.first_line,
                    line: collision.line,
                });
            }
            match collision.first_line {
                Some(first_line) => tracing::warn!(
                    "⚠️ '{}' from line {} overwrites the file from line {}",
                    collision.filename,
                    collision.line,
                    first_line
                ),
                None => tracing::warn!(
                    "⚠️ '{}' from line {} will be overwritten by the manifest",
                    collision.filename,
                    collision.line
                ),
            }
        }

        Ok(output)
    }

    fn load(&self, output: SplitOutput) -> Result<SplitReport> {
        let output_dir = self.config.output_dir();
        tracing::debug!("Writing {} files to {}", output.files.len(), output_dir.display());

        self.storage.ensure_clean_directory(&output_dir)?;

        let mut titles = Vec::with_capacity(output.section_count);
        for file in &output.files {
            self.storage
                .write_file(&output_dir, &file.filename, &file.content)?;
            if let Some(title) = &file.title {
                titles.push(title.clone());
            }
        }
        self.storage.write_manifest(&output_dir, &output.manifest)?;

        Ok(SplitReport {
            output_dir,
            section_count: output.section_count,
            files_written: output
                .files
                .iter()
                .map(|f| f.filename.as_str())
                .collect::<HashSet<_>>()
                .len(),
            titles,
        })
    }
}
