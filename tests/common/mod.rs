//! Fixture PDFs shared by the integration and CLI tests
//!
//! Each page shows a label so page order can be checked after every step.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

pub const COVERS_PACK: &str = "HomePlanet_Volume_Covers_and_Footers_Pack.pdf";

/// Write a PDF with one labelled page per `(width, height, label)`
pub fn write_pdf(path: &Path, pages: &[(f32, f32, &str)]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for &(width, height, label) in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 400.into()]),
                Operation::new("Tj", vec![Object::string_literal(label)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), Object::Real(width), Object::Real(height)],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(path).expect("Failed to write fixture");
}

pub fn covers_pack(dir: &Path, covers: usize) -> PathBuf {
    let labels: Vec<String> = (1..=covers).map(|n| format!("Cover {}", n)).collect();
    let pages: Vec<(f32, f32, &str)> = labels.iter().map(|l| (612.0, 792.0, l.as_str())).collect();
    let path = dir.join(COVERS_PACK);
    write_pdf(&path, &pages);
    path
}

/// Every source the built-in manifest needs, with known page counts
pub fn write_sources(dir: &Path) {
    covers_pack(dir, 7);
    write_pdf(
        &dir.join("HomePlanet_Telemetry_and_Suggestions_LockIn.pdf"),
        &[(612.0, 792.0, "lockin-1"), (612.0, 792.0, "lockin-2")],
    );
    write_pdf(
        &dir.join("HomePlanet_Live_Build_Telemetry_Mode_v2.pdf"),
        &[(595.0, 842.0, "live-1"), (842.0, 595.0, "live-2"), (595.0, 842.0, "live-3")],
    );
    write_pdf(
        &dir.join("HomePlanet_Career_Presence_System.pdf"),
        &[(612.0, 792.0, "career-1")],
    );
    write_pdf(
        &dir.join("HomePlanet_Vehicles_Volume.pdf"),
        &[(612.0, 792.0, "vehicles-1"), (612.0, 1008.0, "vehicles-2")],
    );
    write_pdf(
        &dir.join("HomePlanet_Remix_Mode_Live_Reference_Capture_v2.pdf"),
        &[(612.0, 792.0, "remix-1"), (612.0, 792.0, "remix-2"), (612.0, 792.0, "remix-3"), (612.0, 792.0, "remix-4")],
    );
}
