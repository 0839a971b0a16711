//! Footer stamping
//!
//! Each body page gets its own Form XObject overlay whose bounding box is that
//! page's media box, so pages of different sizes are all centered correctly.
//! The overlay is drawn after the page's original content, which is wrapped
//! in `q`/`Q` so any transformation it leaves active is undone first.

use std::path::Path;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info};
use crate::error::Result;
use super::metadata::{media_box, PageBox};
use super::metrics::{encode_win_ansi, text_width};
use super::pages::{inherited_attribute, load_document, save_document};

/// First footer line, stamped on every body page
pub const GOVERNANCE_LINE: &str = "Governed by HomePlanet Volume 0 — Planetary System Architecture";

/// Second footer line, stamped only on resident volumes
pub const RESIDENT_LINE: &str = "Inherits Presence-First Timestamping, Authority, and Truth Ledger";

/// Baseline of the first line, in points above the page's bottom edge
pub const FOOTER_BASELINE: f32 = 18.0;

/// Distance from the first line's baseline up to the second line's
pub const RESIDENT_LINE_OFFSET: f32 = 10.0;

/// Font resource name inside the overlay
const FOOTER_FONT: &[u8] = b"HPHelv";

/// Preferred XObject resource name on stamped pages
const FOOTER_XOBJECT: &str = "HomePlanetFooter";

/// One centered line of footer text
#[derive(Debug, Clone, PartialEq)]
pub struct FooterLine {
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Baseline in points above the page's bottom edge
    pub baseline: f32,
}

/// Options for stamping footers
#[derive(Debug, Clone, PartialEq)]
pub struct FooterOptions {
    /// Lines drawn on every page except the cover
    pub lines: Vec<FooterLine>,
}

impl FooterOptions {
    /// The standard footer: the governance line, plus the resident line when
    /// the volume inherits from Volume 0's resident systems
    pub fn for_volume(resident: bool) -> Self {
        let mut lines = vec![FooterLine {
            text: GOVERNANCE_LINE.to_string(),
            font_size: 9.0,
            baseline: FOOTER_BASELINE,
        }];

        if resident {
            lines.push(FooterLine {
                text: RESIDENT_LINE.to_string(),
                font_size: 8.0,
                baseline: FOOTER_BASELINE + RESIDENT_LINE_OFFSET,
            });
        }

        Self { lines }
    }
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self::for_volume(false)
    }
}

/// Stamp the footer onto every page but the first and write the result
///
/// Returns the number of pages stamped.
pub fn stamp_footer(input_path: &Path, output_path: &Path, options: &FooterOptions) -> Result<usize> {
    let mut doc = load_document(input_path)?;
    let stamped = stamp_document(&mut doc, options)?;
    save_document(&mut doc, output_path)?;

    info!(stamped, output = %output_path.display(), "stamped footers");
    Ok(stamped)
}

/// Stamp the footer onto every page of `doc` except page index 0
pub fn stamp_document(doc: &mut Document, options: &FooterOptions) -> Result<usize> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if page_ids.len() < 2 {
        return Ok(0);
    }

    let font_id = use_helvetica_font(doc);

    for &page_id in page_ids.iter().skip(1) {
        let page_box = media_box(doc, page_id)?;
        let content = footer_content(&page_box, options)?;
        let xobject_id = create_footer_xobject(doc, content, font_id, &page_box);
        let name = add_xobject_to_page_resources(doc, page_id, xobject_id)?;

        let save_state = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        add_content_to_page(doc, page_id, save_state, At::Start)?;

        let invoke = Content {
            operations: vec![
                Operation::new("Q", vec![]),
                Operation::new("q", vec![]),
                Operation::new("Do", vec![Object::Name(name.into_bytes())]),
                Operation::new("Q", vec![]),
            ],
        };
        // Streams are joined as-is, so the original's last token may end
        // right where this one starts
        let mut invoke_bytes = b"\n".to_vec();
        invoke_bytes.extend(invoke.encode()?);
        let invoke_id = doc.add_object(Stream::new(Dictionary::new(), invoke_bytes));
        add_content_to_page(doc, page_id, invoke_id, At::End)?;

        debug!(?page_id, width = page_box.width(), height = page_box.height(), "stamped page");
    }

    Ok(page_ids.len() - 1)
}

/// Declare Helvetica (a standard PDF font, nothing to embed)
fn use_helvetica_font(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

    doc.add_object(Object::Dictionary(font))
}

/// Generate the overlay's content stream for one page
fn footer_content(page_box: &PageBox, options: &FooterOptions) -> Result<Vec<u8>> {
    let mut operations = vec![Operation::new("g", vec![Object::Integer(0)])];

    for line in &options.lines {
        let encoded = encode_win_ansi(&line.text);
        let x = page_box.center_x() - text_width(&encoded, line.font_size) / 2.0;
        let y = page_box.bottom() + line.baseline;

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(FOOTER_FONT.to_vec()), Object::Real(line.font_size)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new("Tj", vec![Object::string_literal(encoded)]),
            Operation::new("ET", vec![]),
        ]);
    }

    Ok(Content { operations }.encode()?)
}

/// Create a Form XObject covering exactly the page's media box
fn create_footer_xobject(
    doc: &mut Document,
    content: Vec<u8>,
    font_id: ObjectId,
    page_box: &PageBox,
) -> ObjectId {
    let mut fonts = Dictionary::new();
    fonts.set(FOOTER_FONT, Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set("BBox", Object::Array(vec![
        Object::Real(page_box.llx),
        Object::Real(page_box.lly),
        Object::Real(page_box.urx),
        Object::Real(page_box.ury),
    ]));
    xobject_dict.set("Matrix", Object::Array(vec![
        Object::Integer(1),
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(1),
        Object::Integer(0),
        Object::Integer(0),
    ]));
    xobject_dict.set("Resources", Object::Dictionary(resources));

    doc.add_object(Stream::new(xobject_dict, content))
}

/// Register the XObject in the page's own Resources and return its name
///
/// Resources reached by reference (or inherited) may be shared with other
/// pages, so the page always gets its own copy.
fn add_xobject_to_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    xobject_id: ObjectId,
) -> Result<String> {
    let mut resources = match inherited_attribute(doc, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict,
        Some(Object::Reference(id)) => doc.get_dictionary(id).cloned().unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    };

    let mut xobjects = match resources.get(b"XObject") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).cloned().unwrap_or_else(|_| Dictionary::new()),
        _ => Dictionary::new(),
    };

    let name = unused_name(&xobjects);
    xobjects.set(name.as_str(), Object::Reference(xobject_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    doc.get_dictionary_mut(page_id)?
        .set("Resources", Object::Dictionary(resources));

    Ok(name)
}

fn unused_name(xobjects: &Dictionary) -> String {
    let mut name = FOOTER_XOBJECT.to_string();
    let mut suffix = 1;
    while xobjects.has(name.as_bytes()) {
        name = format!("{}{}", FOOTER_XOBJECT, suffix);
        suffix += 1;
    }
    name
}

/// Where a new stream goes in a page's content list
#[derive(Debug, Clone, Copy)]
enum At {
    Start,
    End,
}

/// Add a content stream to a page's Contents, before or after the existing ones
///
/// Contents may be a stream, an array of streams, or a reference to such an
/// array; a referenced array is spliced in rather than nested.
fn add_content_to_page(doc: &mut Document, page_id: ObjectId, new_content_id: ObjectId, at: At) -> Result<()> {
    let existing_content = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let mut streams = match existing_content {
        Some(Object::Reference(content_id)) => match doc.get_object(content_id)? {
            Object::Array(content_array) => content_array.clone(),
            _ => vec![Object::Reference(content_id)],
        },
        Some(Object::Array(content_array)) => content_array,
        _ => Vec::new(),
    };

    match at {
        At::Start => streams.insert(0, Object::Reference(new_content_id)),
        At::End => streams.push(Object::Reference(new_content_id)),
    }

    doc.get_dictionary_mut(page_id)?.set("Contents", Object::Array(streams));
    Ok(())
}
