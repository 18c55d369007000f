// ABOUTME: Path selector validation for folder and file pages
// Expands ~ and checks the entered path against the selector's filter

use std::path::{Path, PathBuf};

/// What a selector accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFilter {
    FoldersOnly,
    /// Existing file with this extension (case-insensitive, without the dot)
    FileType(String),
}

impl PathFilter {
    pub fn hint(&self) -> String {
        match self {
            Self::FoldersOnly => "folder".to_string(),
            Self::FileType(ext) => format!("*.{ext} file"),
        }
    }
}

/// Validation result for a selector path
#[derive(Debug, Clone)]
pub struct ValidatedPath {
    pub path: PathBuf,
    pub is_valid: bool,
    pub expanded_path: PathBuf,
    pub error: Option<String>,
}

impl ValidatedPath {
    pub fn validate(input: &str, filter: &PathFilter) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Self::invalid(PathBuf::new(), PathBuf::new(), "Path is empty");
        }

        let expanded = expand_home(trimmed);

        if !expanded.exists() {
            return Self::invalid(PathBuf::from(trimmed), expanded, "Path does not exist");
        }

        match filter {
            PathFilter::FoldersOnly if !expanded.is_dir() => {
                Self::invalid(PathBuf::from(trimmed), expanded, "Path is not a directory")
            }
            PathFilter::FileType(ext) if !has_extension(&expanded, ext) => Self::invalid(
                PathBuf::from(trimmed),
                expanded,
                &format!("Expected a .{ext} file"),
            ),
            _ => Self {
                path: PathBuf::from(trimmed),
                is_valid: true,
                expanded_path: expanded,
                error: None,
            },
        }
    }

    fn invalid(path: PathBuf, expanded_path: PathBuf, error: &str) -> Self {
        Self {
            path,
            is_valid: false,
            expanded_path,
            error: Some(error.to_string()),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
