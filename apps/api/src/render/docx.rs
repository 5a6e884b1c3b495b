//! DOCX renderer — a minimal WordprocessingML package written with `zip`.
//!
//! Parts: content types, package rels, core properties, styles and the main
//! document. Every zip entry carries the DOS epoch as its timestamp so the
//! archive is byte-identical for identical input.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::render::markup::escape;
use crate::render::outline::ReportOutline;
use crate::render::{RenderError, ReportContext};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri" w:eastAsia="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:color w:val="374151"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="200"/></w:pPr><w:rPr><w:b/><w:color w:val="4F46E5"/><w:sz w:val="44"/><w:szCs w:val="44"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="4F46E5"/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style></w:styles>"#;

/// A4 with 2 cm margins, in twentieths of a point.
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1134" w:right="1134" w:bottom="1134" w:left="1134" w:header="709" w:footer="709" w:gutter="0"/></w:sectPr>"#;

pub fn render_docx(ctx: &ReportContext) -> Result<Vec<u8>, RenderError> {
    let outline = ReportOutline::build(ctx);

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("docProps/core.xml", core_properties_xml(&outline)),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
        ("word/styles.xml", STYLES_XML.to_string()),
        ("word/document.xml", document_xml(&outline)),
    ];

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in parts {
        archive.start_file(name, entry_options())?;
        archive.write_all(body.as_bytes())?;
    }

    Ok(archive.finish()?.into_inner())
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

fn core_properties_xml(outline: &ReportOutline) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{title}</dc:title><dc:subject>{subject}</dc:subject><dc:creator>{creator}</dc:creator></cp:coreProperties>"#,
        title = escape(outline.title),
        subject = escape(&outline.prepared_for()),
        creator = env!("CARGO_PKG_NAME"),
    )
}

fn document_xml(outline: &ReportOutline) -> String {
    let mut body = String::new();

    body.push_str(&paragraph(Some("Title"), &[outline.title]));
    body.push_str(&paragraph(None, &[outline.prepared_for().as_str()]));
    body.push_str(&paragraph(None, &[outline.date_of_birth().as_str()]));

    for section in &outline.sections {
        body.push_str(&paragraph(Some("Heading1"), &[section.heading().as_str()]));
        body.push_str(&paragraph(None, &[section.description.as_str()]));
    }

    body.push_str(&paragraph(Some("Heading1"), &[outline.recommendations_heading]));
    for recommendation in &outline.recommendations {
        body.push_str(&paragraph(Some("ListParagraph"), &["\u{2022}\t", recommendation.as_str()]));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}{SECTION_PROPERTIES}</w:body></w:document>"#
    )
}

/// One `<w:p>` with an optional paragraph style and one run per text piece.
fn paragraph(style: Option<&str>, runs: &[&str]) -> String {
    let properties = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{s}"/></w:pPr>"#))
        .unwrap_or_default();
    let runs: String = runs.iter().map(|text| run(text)).collect();
    format!("<w:p>{properties}{runs}</w:p>")
}

fn run(text: &str) -> String {
    // Tabs must be their own element inside a run.
    let content = text
        .split('\t')
        .map(|piece| {
            if piece.is_empty() {
                String::new()
            } else {
                format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape(piece))
            }
        })
        .collect::<Vec<_>>()
        .join("<w:tab/>");
    format!("<w:r>{content}</w:r>")
}
