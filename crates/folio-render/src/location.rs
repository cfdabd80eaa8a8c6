use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a document comes from: a file on disk or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    Path(PathBuf),
    Url(String),
}

impl DocumentLocation {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// An opened document's backing bytes. Pdfium cannot cross threads, so every
/// rasterization call re-opens the document inside its blocking task; cloning
/// this handle into the task is cheap for both variants.
#[derive(Debug, Clone)]
pub enum DocumentData {
    File(PathBuf),
    Bytes(Arc<Vec<u8>>),
}
