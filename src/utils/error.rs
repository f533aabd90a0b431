use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("File does not exist: {path}")]
    SourceNotFound { path: String },

    #[error("No markdown found.")]
    EmptyInput,

    #[error("{line} Cannot extract filename from heading.")]
    EmptyHeadingTitle { line: usize },

    #[error("Too many headings ({max} max).")]
    TooManySections { max: usize },

    #[error(
        "Duplicate output filename '{filename}' at line {line} ({})",
        first_use(.first_line)
    )]
    DuplicateFilename {
        filename: String,
        /// `None` when the name collides with the manifest file.
        first_line: Option<usize>,
        line: usize,
    },

    #[error("Heading produces an unusable filename: '{filename}'")]
    UnsafeFilename { filename: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 參數或配置錯誤
    Arguments,
    /// 來源文件問題
    Input,
    /// 標題內容無法切分
    Content,
    /// 檔案系統錯誤
    System,
}

impl SplitError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArguments { .. } | Self::ConfigError { .. } => ErrorCategory::Arguments,
            Self::SourceNotFound { .. } | Self::EmptyInput => ErrorCategory::Input,
            Self::EmptyHeadingTitle { .. }
            | Self::TooManySections { .. }
            | Self::DuplicateFilename { .. }
            | Self::UnsafeFilename { .. } => ErrorCategory::Content,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// 根據錯誤類別決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Arguments => 2,
            ErrorCategory::Input | ErrorCategory::Content => 1,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArguments { message } => message.clone(),
            Self::SourceNotFound { .. } => "File does not exist.".to_string(),
            Self::IoError(e) => format!("File system operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => {
                "Usage: split-markdown <source> <heading 1-6> <numbered? y/n>"
            }
            Self::ConfigError { .. } => "Check the [split] table of the configuration file",
            Self::SourceNotFound { .. } => "Check the source path and try again",
            Self::EmptyInput => "The source file is empty; nothing to split",
            Self::EmptyHeadingTitle { .. } => "Give the heading on that line some title text",
            Self::TooManySections { .. } => "Split at a deeper heading level or break the document up first",
            Self::DuplicateFilename { .. } => {
                "Rename one of the headings, enable numbering, or drop --strict-names"
            }
            Self::UnsafeFilename { .. } => {
                "Headings must only use characters supported in filenames"
            }
            Self::IoError(_) => "Check permissions and free space in the destination folder",
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;

fn first_use(first_line: &Option<usize>) -> String {
    match first_line {
        Some(line) => format!("already used by line {}", line),
        None => "reserved for the manifest".to_string(),
    }
}
