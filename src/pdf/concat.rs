//! Body concatenation

use std::path::PathBuf;
use tracing::debug;
use crate::error::{Error, Result};
use super::pages::{build_document, load_document, save_document, PageSource};

/// Options for concatenating PDFs
#[derive(Debug, Clone)]
pub struct ConcatOptions {
    /// Input PDF file paths in the order they should be concatenated
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Concatenate every page of every input, in list order, into one PDF
///
/// Returns the number of pages written, which is the sum of the inputs'
/// page counts.
///
/// # Example
///
/// ```no_run
/// use homeplanet_volumes::pdf::{concat_pdfs, ConcatOptions};
/// use std::path::PathBuf;
///
/// let options = ConcatOptions {
///     input_paths: vec![
///         PathBuf::from("HomePlanet_Telemetry_and_Suggestions_LockIn.pdf"),
///         PathBuf::from("HomePlanet_Live_Build_Telemetry_Mode_v2.pdf"),
///     ],
///     output_path: PathBuf::from("out/Body_Volume_2.pdf"),
/// };
///
/// concat_pdfs(&options).expect("Failed to concatenate");
/// ```
pub fn concat_pdfs(options: &ConcatOptions) -> Result<usize> {
    if options.input_paths.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut sources = Vec::with_capacity(options.input_paths.len());
    for path in &options.input_paths {
        let source = PageSource::all(load_document(path)?);
        if source.is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }
        debug!(path = %path.display(), pages = source.len(), "queued body input");
        sources.push(source);
    }

    let page_count = sources.iter().map(PageSource::len).sum();

    let mut body = build_document(sources)?;
    save_document(&mut body, &options.output_path)?;

    Ok(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_empty_input_list() {
        let options = ConcatOptions {
            input_paths: vec![],
            output_path: PathBuf::from("body.pdf"),
        };
        assert!(matches!(concat_pdfs(&options).unwrap_err(), Error::NoInputs));
    }

    #[test]
    fn test_concat_nonexistent_file() {
        let options = ConcatOptions {
            input_paths: vec![PathBuf::from("nonexistent.pdf")],
            output_path: PathBuf::from("body.pdf"),
        };
        let err = concat_pdfs(&options).unwrap_err();
        assert_eq!(err.to_string(), "Missing: nonexistent.pdf");
    }
}
