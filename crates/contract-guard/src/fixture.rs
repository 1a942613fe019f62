//! Sample vendor contract for trying the tool without a real document.
//!
//! Every clause in the sample breaks the house playbook, so a run against it
//! exercises the negotiation branch.

use std::path::Path;

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::info;

/// Title line followed by the three clauses, each with its baseline y.
pub const SAMPLE_CONTRACT_LINES: [(&str, i64); 4] = [
    ("VENDOR SERVICE AGREEMENT (DRAFT)", 800),
    ("1. PAYMENT TERMS: Client shall pay invoices within Net 90 Days.", 750),
    ("2. LIABILITY: Vendor liability shall not exceed $100 USD.", 725),
    ("3. JURISDICTION: Governing law shall be Antarctica.", 700),
];

/// Write the one-page sample contract to `path`, replacing any existing file.
pub fn write_sample_contract(path: &Path) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = Vec::new();
    for (line, y) in SAMPLE_CONTRACT_LINES {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        operations.push(Operation::new("Td", vec![100.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(line)]));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("encoding contract page content")?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)
        .with_context(|| format!("writing sample contract to {}", path.display()))?;
    info!(path = %path.display(), "generated test contract");
    Ok(())
}
