use crate::domain::model::HeadingLevel;
use crate::utils::error::{Result, SplitError};
use std::path::{Component, Path};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn parse_heading_level(text: &str) -> Result<HeadingLevel> {
    let level: i64 = text
        .trim()
        .parse()
        .map_err(|_| SplitError::invalid_arguments("The heading level should be a whole number."))?;

    u8::try_from(level)
        .ok()
        .and_then(HeadingLevel::new)
        .ok_or_else(|| {
            SplitError::invalid_arguments("The heading level should be a number from 1 to 6.")
        })
}

/// Accepts y/yes/t/true and n/no/f/false, case-insensitive.
pub fn parse_bool_token(text: &str, reason: &str) -> Result<bool> {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" | "t" | "true" => Ok(true),
        "n" | "no" | "f" | "false" => Ok(false),
        _ => Err(SplitError::invalid_arguments(format!(
            "Invalid value for {}",
            reason
        ))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SplitError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(SplitError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

/// A value that must be usable as one file or directory name on its own.
pub fn validate_plain_name(field_name: &str, value: &str) -> Result<()> {
    validate_path(field_name, value)?;

    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(SplitError::ConfigError {
            message: format!("{}: '{}' must be a plain name, not a path", field_name, value),
        });
    }

    Ok(())
}

/// True when `filename` names exactly one entry inside a directory.
pub fn is_plain_filename(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !filename.contains(['/', '\\', '\0'])
}

pub fn validate_extension(field_name: &str, extension: &str) -> Result<()> {
    if extension.trim().is_empty() || extension.starts_with('.') {
        return Err(SplitError::ConfigError {
            message: format!(
                "{}: '{}' must be a non-empty extension without the leading dot",
                field_name, extension
            ),
        });
    }
    validate_plain_name(field_name, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_level() {
        assert_eq!(parse_heading_level("2").unwrap().get(), 2);
        assert_eq!(parse_heading_level(" 6 ").unwrap().get(), 6);

        let err = parse_heading_level("two").unwrap_err();
        assert_eq!(
            err.user_friendly_message(),
            "The heading level should be a whole number."
        );
        for out_of_range in ["0", "7", "-1", "300"] {
            let err = parse_heading_level(out_of_range).unwrap_err();
            assert_eq!(
                err.user_friendly_message(),
                "The heading level should be a number from 1 to 6."
            );
        }
    }

    #[test]
    fn test_parse_bool_token() {
        for token in ["y", "Yes", "T", "TRUE", " true "] {
            assert!(parse_bool_token(token, "numbered-files").unwrap());
        }
        for token in ["n", "NO", "f", "False"] {
            assert!(!parse_bool_token(token, "numbered-files").unwrap());
        }
        for token in ["", "  ", "1", "maybe"] {
            let err = parse_bool_token(token, "numbered-files").unwrap_err();
            assert_eq!(err.user_friendly_message(), "Invalid value for numbered-files");
        }
    }

    #[test]
    fn test_validate_plain_name_and_extension() {
        assert!(validate_plain_name("output_dir", "_split").is_ok());
        assert!(validate_plain_name("output_dir", "a/b").is_err());
        assert!(validate_plain_name("output_dir", "..").is_err());
        assert!(validate_plain_name("output_dir", "").is_err());

        assert!(validate_extension("extension", "md").is_ok());
        assert!(validate_extension("extension", ".md").is_err());
        assert!(validate_extension("extension", " ").is_err());
    }

    #[test]
    fn test_is_plain_filename() {
        assert!(is_plain_filename("001 Intro.md"));
        assert!(is_plain_filename("Q&A: part 1.md"));
        assert!(!is_plain_filename("a/b.md"));
        assert!(!is_plain_filename("../escape.md"));
        assert!(!is_plain_filename("/abs.md"));
        assert!(!is_plain_filename("back\\slash.md"));
        assert!(!is_plain_filename(""));
    }
}
