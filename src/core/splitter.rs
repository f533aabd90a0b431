use crate::core::manifest::ManifestBuilder;
use crate::domain::model::{Document, HeadingLevel, OutputFile, Section, SectionKind, SplitOutput};
use crate::utils::error::{Result, SplitError};

pub const MAX_SECTIONS: usize = 999;
pub const PREAMBLE_STEM: &str = "_untitled";
pub const DEFAULT_EXTENSION: &str = "md";

/// How section filenames are derived from titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameScheme {
    pub numbered: bool,
    pub extension: String,
}

impl Default for FilenameScheme {
    fn default() -> Self {
        Self {
            numbered: false,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl FilenameScheme {
    pub fn new(numbered: bool) -> Self {
        Self {
            numbered,
            ..Self::default()
        }
    }

    /// Name without extension; this is what the manifest lists.
    ///
    /// Titles are passed through as-is apart from trimming, so they must
    /// already be filesystem-safe.
    pub fn stem(&self, section: &Section) -> String {
        match &section.kind {
            SectionKind::Preamble => PREAMBLE_STEM.to_string(),
            SectionKind::Titled { title, ordinal } if self.numbered => {
                format!("{:03} {}", ordinal, title)
            }
            SectionKind::Titled { title, .. } => title.clone(),
        }
    }

    pub fn filename(&self, section: &Section) -> String {
        format!("{}.{}", self.stem(section), self.extension)
    }
}

/// Accumulator threaded through the line fold.
#[derive(Debug)]
struct SplitState {
    completed: Vec<Section>,
    current: Section,
    count: usize,
}

impl SplitState {
    fn new() -> Self {
        Self {
            completed: Vec::new(),
            current: Section {
                kind: SectionKind::Preamble,
                lines: Vec::new(),
                start_line: 1,
            },
            count: 0,
        }
    }

    fn step(mut self, marker: &str, line_number: usize, line: &str) -> Result<Self> {
        let Some(rest) = line.strip_prefix(marker) else {
            self.current.lines.push(line.to_string());
            return Ok(self);
        };

        self.count += 1;
        if self.count > MAX_SECTIONS {
            return Err(SplitError::TooManySections { max: MAX_SECTIONS });
        }

        let title = rest.trim();
        if title.is_empty() {
            return Err(SplitError::EmptyHeadingTitle { line: line_number });
        }

        let next = Section {
            kind: SectionKind::Titled {
                title: title.to_string(),
                ordinal: self.count,
            },
            lines: vec![format!("# {}", title)],
            start_line: line_number,
        };
        let finished = std::mem::replace(&mut self.current, next);
        if !finished.lines.is_empty() {
            self.completed.push(finished);
        }
        Ok(self)
    }

    fn finish(mut self) -> (Vec<Section>, usize) {
        if !self.current.lines.is_empty() {
            self.completed.push(self.current);
        }
        (self.completed, self.count)
    }
}

/// Partitions `document` at every line starting with the level's marker.
///
/// Returns the sections in document order, the preamble first when it has
/// any lines, together with the number of titled sections.
pub fn partition(document: &Document, level: HeadingLevel) -> Result<(Vec<Section>, usize)> {
    if document.is_empty() {
        return Err(SplitError::EmptyInput);
    }

    let marker = level.marker();
    let state = document
        .lines
        .iter()
        .enumerate()
        .try_fold(SplitState::new(), |state, (index, line)| {
            state.step(&marker, index + 1, line)
        })?;

    Ok(state.finish())
}

#[derive(Debug, Clone)]
pub struct Splitter {
    level: HeadingLevel,
    scheme: FilenameScheme,
}

impl Splitter {
    pub fn new(level: HeadingLevel, scheme: FilenameScheme) -> Self {
        Self { level, scheme }
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn scheme(&self) -> &FilenameScheme {
        &self.scheme
    }

    pub fn split(&self, document: &Document) -> Result<SplitOutput> {
        let (sections, section_count) = partition(document, self.level)?;

        let mut manifest = ManifestBuilder::new();
        let mut files = Vec::with_capacity(sections.len());
        for section in &sections {
            if section.kind != SectionKind::Preamble {
                manifest.push(self.scheme.stem(section));
            }
            files.push(OutputFile {
                filename: self.scheme.filename(section),
                title: section.title().map(str::to_string),
                content: section.content(),
                start_line: section.start_line,
            });
        }

        tracing::debug!(
            "Split {} lines into {} files ({} sections)",
            document.len(),
            files.len(),
            section_count
        );

        Ok(SplitOutput {
            files,
            manifest: manifest.build(),
            section_count,
        })
    }
}

/// Convenience entry point over raw lines.
pub fn split(lines: &[String], level: HeadingLevel, numbered: bool) -> Result<SplitOutput> {
    Splitter::new(level, FilenameScheme::new(numbered)).split(&Document::new(lines.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    fn level(n: u8) -> HeadingLevel {
        HeadingLevel::new(n).unwrap()
    }

    #[test]
    fn test_two_sections_in_order() {
        let out = Splitter::new(level(2), FilenameScheme::default())
            .split(&doc("## A\none\n## B\ntwo\nthree"))
            .unwrap();

        assert_eq!(out.section_count, 2);
        assert_eq!(out.files.len(), 2);
        assert_eq!(out.files[0].filename, "A.md");
        assert_eq!(out.files[0].content, "# A\none\n");
        assert_eq!(out.files[1].filename, "B.md");
        assert_eq!(out.files[1].content, "# B\ntwo\nthree\n");
        assert_eq!(out.manifest.entries, vec!["A", "B"]);
    }

    #[test]
    fn test_level_isolation_keeps_other_levels_as_content() {
        let out = Splitter::new(level(2), FilenameScheme::default())
            .split(&doc("# Title\n## A\ntext\n### Sub\n## B\nmore"))
            .unwrap();

        assert_eq!(out.section_count, 2);
        assert_eq!(out.files[0].filename, "_untitled.md");
        assert_eq!(out.files[0].content, "# Title\n");
        assert_eq!(out.files[1].content, "# A\ntext\n### Sub\n");
        assert_eq!(out.files[2].content, "# B\nmore\n");
        assert_eq!(out.manifest.entries, vec!["A", "B"]);
    }

    #[test]
    fn test_no_heading_document_is_all_preamble() {
        let out = Splitter::new(level(1), FilenameScheme::new(true))
            .split(&doc("just text\n## not level one"))
            .unwrap();

        assert_eq!(out.section_count, 0);
        assert_eq!(out.files.len(), 1);
        assert_eq!(out.files[0].filename, "_untitled.md");
        assert_eq!(out.files[0].content, "just text\n## not level one\n");
        assert!(out.manifest.entries.is_empty());
    }

    #[test]
    fn test_blank_preamble_line_is_still_flushed() {
        let out = Splitter::new(level(1), FilenameScheme::default())
            .split(&doc("\n# A"))
            .unwrap();
        assert_eq!(out.files[0].filename, "_untitled.md");
        assert_eq!(out.files[0].content, "\n");
        assert_eq!(out.files[1].content, "# A\n");
    }

    #[test]
    fn test_numbered_filenames_pad_to_three() {
        let out = Splitter::new(level(1), FilenameScheme::new(true))
            .split(&doc("# Intro\n# Body\n# End"))
            .unwrap();
        let names: Vec<_> = out.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["001 Intro.md", "002 Body.md", "003 End.md"]);
        assert_eq!(out.manifest.entries, vec!["001 Intro", "002 Body", "003 End"]);
    }

    #[test]
    fn test_heading_is_resynthesized_at_level_one_with_trimmed_title() {
        let out = Splitter::new(level(3), FilenameScheme::default())
            .split(&doc("###    Spaced out   \n  body keeps its spaces  "))
            .unwrap();
        assert_eq!(out.files[0].filename, "Spaced out.md");
        assert_eq!(out.files[0].content, "# Spaced out\n  body keeps its spaces  \n");
    }

    #[test]
    fn test_empty_title_reports_line_number() {
        let splitter = Splitter::new(level(2), FilenameScheme::default());
        let err = splitter.split(&doc("intro\n## A\n## \ntext")).unwrap_err();
        assert!(matches!(err, SplitError::EmptyHeadingTitle { line: 3 }));

        let err = splitter.split(&doc("##    ")).unwrap_err();
        assert!(matches!(err, SplitError::EmptyHeadingTitle { line: 1 }));
    }

    #[test]
    fn test_marker_requires_trailing_space() {
        let out = Splitter::new(level(2), FilenameScheme::default())
            .split(&doc("##NoSpace\n## Real"))
            .unwrap();
        assert_eq!(out.section_count, 1);
        assert_eq!(out.files[0].content, "##NoSpace\n");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Splitter::new(level(1), FilenameScheme::default())
            .split(&Document::default())
            .unwrap_err();
        assert!(matches!(err, SplitError::EmptyInput));
    }

    #[test]
    fn test_section_limit_boundary() {
        let at_limit: Vec<String> = (1..=MAX_SECTIONS).map(|i| format!("# S{}", i)).collect();
        let out = split(&at_limit, level(1), true).unwrap();
        assert_eq!(out.section_count, 999);
        assert_eq!(out.files.last().unwrap().filename, "999 S999.md");

        let mut over = at_limit;
        over.push("# S1000".to_string());
        let err = split(&over, level(1), true).unwrap_err();
        assert!(matches!(err, SplitError::TooManySections { max: 999 }));
    }

    #[test]
    fn test_duplicate_titles_are_both_emitted() {
        let out = Splitter::new(level(1), FilenameScheme::default())
            .split(&doc("# Same\nfirst\n# Same\nsecond"))
            .unwrap();
        assert_eq!(out.files.len(), 2);
        assert_eq!(out.files[0].filename, out.files[1].filename);
        assert_eq!(out.manifest.entries, vec!["Same", "Same"]);
    }

    #[test]
    fn test_partition_assigns_ordinals_in_order() {
        let (sections, count) = partition(&doc("pre\n# a\n# b\nx\n# c"), level(1)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(sections[0].ordinal(), None);
        let ordinals: Vec<_> = sections.iter().filter_map(Section::ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        let starts: Vec<_> = sections.iter().map(|s| s.start_line).collect();
        assert_eq!(starts, vec![1, 2, 3, 5]);
    }
}
