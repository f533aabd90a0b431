use crate::core::manifest::MANIFEST_FILENAME;
use crate::core::{Document, Manifest, OutputWriter, SourceLoader};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::is_plain_filename;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Local filesystem adapter.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl SourceLoader for LocalStorage {
    fn load_lines(&self, path: &Path) -> Result<Document> {
        if !path.is_file() {
            return Err(SplitError::SourceNotFound {
                path: path.display().to_string(),
            });
        }

        // 無效的 UTF-8 以 U+FFFD 取代，不中斷切分
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        Ok(Document::from_text(text))
    }
}

impl OutputWriter for LocalStorage {
    fn ensure_clean_directory(&self, dir: &Path) -> Result<()> {
        if dir.exists() {
            tracing::debug!("Removing existing folder: {}", dir.display());
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }

    fn write_file(&self, dir: &Path, filename: &str, content: &str) -> Result<()> {
        if !is_plain_filename(filename) {
            return Err(SplitError::UnsafeFilename {
                filename: filename.to_string(),
            });
        }

        // 先寫到暫存檔再改名，單一檔案不會留下寫一半的內容
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        staged.persist(dir.join(filename)).map_err(|e| e.error)?;
        Ok(())
    }

    fn write_manifest(&self, dir: &Path, manifest: &Manifest) -> Result<()> {
        self.write_file(dir, MANIFEST_FILENAME, &manifest.to_yaml())
    }
}

/// Warns that `dir` will be replaced and waits for Enter.
///
/// Returns `false` when stdin is closed before a line arrives.
pub fn confirm_overwrite(dir: &Path) -> Result<bool> {
    let mut stdout = std::io::stdout();
    writeln!(stdout)?;
    writeln!(
        stdout,
        "WARNING: existing destination folder will be overwritten! ({})",
        dir.display()
    )?;
    write!(stdout, "Press Enter to continue or Ctrl+C to exit ... ")?;
    stdout.flush()?;

    let mut answer = String::new();
    let read = std::io::stdin().lock().read_line(&mut answer)?;
    writeln!(stdout)?;
    Ok(read > 0)
}
