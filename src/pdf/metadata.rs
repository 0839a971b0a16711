//! Page counts and page geometry

use std::path::Path;
use lopdf::{Document, Object, ObjectId};
use crate::error::{Error, Result};
use super::pages::{inherited_attribute, load_document};

/// A page rectangle in default user space units (points)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    /// US Letter (8.5" x 11"), used when a page declares no media box
    pub fn letter() -> Self {
        Self { llx: 0.0, lly: 0.0, urx: 612.0, ury: 792.0 }
    }

    pub fn width(&self) -> f32 {
        (self.urx - self.llx).abs()
    }

    pub fn height(&self) -> f32 {
        (self.ury - self.lly).abs()
    }

    /// Horizontal center of the box
    pub fn center_x(&self) -> f32 {
        self.llx.min(self.urx) + self.width() / 2.0
    }

    /// Bottom edge of the box
    pub fn bottom(&self) -> f32 {
        self.lly.min(self.ury)
    }

    fn from_array(values: &[f32]) -> Option<Self> {
        match values {
            [llx, lly, urx, ury] => Some(Self { llx: *llx, lly: *lly, urx: *urx, ury: *ury }),
            _ => None,
        }
    }
}

/// Resolve a page's effective `/MediaBox`, following the page tree and
/// indirect references; pages without one fall back to Letter
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    let Some(value) = inherited_attribute(doc, page_id, b"MediaBox") else {
        return Ok(PageBox::letter());
    };

    let array = resolve(doc, &value)?.as_array()?;
    let values = array
        .iter()
        .map(|item| resolve(doc, item).and_then(|number| Ok(number.as_float()?)))
        .collect::<Result<Vec<f32>>>()?;

    PageBox::from_array(&values)
        .ok_or_else(|| Error::General(format!("Malformed MediaBox on page {:?}", page_id)))
}

/// Count the number of pages in a PDF file
pub fn count_pages(path: &Path) -> Result<usize> {
    let doc = load_document(path)?;
    Ok(doc.get_pages().len())
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::sample_document;

    #[test]
    fn test_count_pages_nonexistent_file() {
        let result = count_pages(Path::new("nonexistent.pdf"));
        assert!(matches!(result.unwrap_err(), Error::MissingInput(_)));
    }

    #[test]
    fn test_media_box_per_page() {
        let doc = sample_document(&[(612.0, 792.0, "letter"), (595.0, 842.0, "a4")]);
        let boxes: Vec<PageBox> = doc
            .get_pages()
            .values()
            .map(|&id| media_box(&doc, id).unwrap())
            .collect();
        assert_eq!(boxes[0].width(), 612.0);
        assert_eq!(boxes[1].width(), 595.0);
        assert_eq!(boxes[1].height(), 842.0);
    }

    #[test]
    fn test_missing_media_box_defaults_to_letter() {
        let mut doc = sample_document(&[(100.0, 100.0, "bare")]);
        let page_id = *doc.get_pages().values().next().unwrap();
        doc.get_dictionary_mut(page_id).unwrap().remove(b"MediaBox");
        assert_eq!(media_box(&doc, page_id).unwrap(), PageBox::letter());
    }

    #[test]
    fn test_offset_box_center() {
        let page_box = PageBox { llx: 100.0, lly: 50.0, urx: 500.0, ury: 650.0 };
        assert_eq!(page_box.center_x(), 300.0);
        assert_eq!(page_box.bottom(), 50.0);
    }
}
