use crate::domain::model::Manifest;

pub const MANIFEST_FILENAME: &str = "_list.yaml";
pub const MANIFEST_KEY: &str = "Content";

/// Collects manifest entries in emission order. No sorting, no dedup.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    entries: Vec<String>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn build(self) -> Manifest {
        Manifest {
            entries: self.entries,
        }
    }
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `Content:` then one four-space indented `- entry` line per entry.
    /// Entries are written verbatim, without YAML quoting.
    pub fn to_yaml(&self) -> String {
        let mut yaml = format!("{}:\n", MANIFEST_KEY);
        for entry in &self.entries {
            yaml.push_str("    - ");
            yaml.push_str(entry);
            yaml.push('\n');
        }
        yaml
    }
}
