//! Error types for the volume assembler

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the volume assembler
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required source file is absent
    #[error("Missing: {}", file_name(.0))]
    MissingInput(PathBuf),

    /// Volume number does not map to a page of the covers pack
    #[error("Volume {volume} has no cover: covers pack has {page_count} pages")]
    CoverOutOfRange { volume: u32, page_count: usize },

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Nothing to concatenate
    #[error("No input files provided")]
    NoInputs,

    /// Job table could not be parsed or is inconsistent
    #[error("Invalid volume manifest: {0}")]
    InvalidManifest(String),

    /// General error
    #[error("{0}")]
    General(String),
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_only_the_file() {
        let err = Error::MissingInput(PathBuf::from("/tmp/work/HomePlanet_Vehicles_Volume.pdf"));
        assert_eq!(err.to_string(), "Missing: HomePlanet_Vehicles_Volume.pdf");
    }

    #[test]
    fn test_cover_out_of_range_message() {
        let err = Error::CoverOutOfRange { volume: 9, page_count: 7 };
        assert!(err.to_string().contains("Volume 9"));
        assert!(err.to_string().contains("7 pages"));
    }
}
