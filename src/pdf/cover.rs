//! Cover extraction and cover prepending

use std::path::Path;
use tracing::debug;
use crate::error::{Error, Result};
use super::pages::{build_document, load_document, save_document, PageSource};

/// Map a 1-based volume number to its zero-based page in the covers pack
///
/// The pack is assumed to hold one cover per volume, in volume order. Nothing
/// checks that the page found is actually labelled for this volume.
pub fn cover_index(volume: u32, page_count: usize) -> Result<usize> {
    let index = (volume as usize)
        .checked_sub(1)
        .filter(|&index| index < page_count)
        .ok_or(Error::CoverOutOfRange { volume, page_count })?;
    Ok(index)
}

/// Write the cover for `volume` as a standalone single-page PDF
pub fn extract_cover(covers_pack: &Path, volume: u32, output: &Path) -> Result<()> {
    let pack = load_document(covers_pack)?;
    let page_count = pack.get_pages().len();
    let index = cover_index(volume, page_count)?;

    let source = PageSource::single(pack, index)
        .ok_or(Error::CoverOutOfRange { volume, page_count })?;
    let mut cover = build_document(vec![source])?;
    save_document(&mut cover, output)?;

    debug!(volume, index, output = %output.display(), "extracted cover");
    Ok(())
}

/// Write a PDF whose first page is the cover's first page, followed by every
/// page of the body in order
///
/// Extra pages in the cover document are ignored.
pub fn prepend_cover(cover: &Path, body: &Path, output: &Path) -> Result<usize> {
    let cover_doc = load_document(cover)?;
    let cover_page = PageSource::single(cover_doc, 0)
        .ok_or_else(|| Error::EmptyPdf(cover.to_path_buf()))?;

    let body_pages = PageSource::all(load_document(body)?);
    let page_count = 1 + body_pages.len();

    let mut merged = build_document(vec![cover_page, body_pages])?;
    save_document(&mut merged, output)?;

    debug!(pages = page_count, output = %output.display(), "prepended cover");
    Ok(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_index_is_volume_minus_one() {
        assert_eq!(cover_index(1, 7).unwrap(), 0);
        assert_eq!(cover_index(6, 7).unwrap(), 5);
        assert_eq!(cover_index(7, 7).unwrap(), 6);
    }

    #[test]
    fn test_cover_index_past_end() {
        let err = cover_index(8, 7).unwrap_err();
        assert!(matches!(err, Error::CoverOutOfRange { volume: 8, page_count: 7 }));
    }

    #[test]
    fn test_cover_index_volume_zero() {
        assert!(matches!(
            cover_index(0, 7).unwrap_err(),
            Error::CoverOutOfRange { volume: 0, .. }
        ));
    }
}
