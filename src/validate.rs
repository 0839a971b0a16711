//! Up-front check that every source file is present

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::error::{Error, Result};

/// Confirm every required file exists under `root`
///
/// Relative paths resolve against `root`; absolute paths are used as given.
/// Stops at the first absent file so the run aborts before any output is
/// written.
pub fn require_inputs<P: AsRef<Path>>(root: &Path, required: &[P]) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::with_capacity(required.len());

    for path in required {
        let path = root.join(path.as_ref());
        if !path.exists() {
            return Err(Error::MissingInput(path));
        }
        debug!(path = %path.display(), "found input");
        resolved.push(path);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_all_present() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF").unwrap();

        let resolved = require_inputs(dir.path(), &["a.pdf", "b.pdf"]).unwrap();
        assert_eq!(resolved, vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]);
    }

    #[test]
    fn test_first_missing_is_named() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"%PDF").unwrap();

        let err = require_inputs(dir.path(), &["a.pdf", "gone.pdf", "also-gone.pdf"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing: gone.pdf");
    }

    #[test]
    fn test_absolute_paths_ignore_root() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("abs.pdf");
        std::fs::write(&absolute, b"%PDF").unwrap();

        let resolved = require_inputs(Path::new("/nonexistent-root"), &[&absolute]).unwrap();
        assert_eq!(resolved, vec![absolute]);
    }
}
