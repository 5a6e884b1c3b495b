//! PDF renderer — fixed-layout A4 pages set in embedded DejaVu Sans.
//!
//! Each face is embedded whole as a Type0 / CIDFontType2 font with
//! `Identity-H` encoding. CIDs are assigned per document in first-use order;
//! a `CIDToGIDMap` stream maps them to glyphs and a `ToUnicode` CMap maps
//! them back to text, so the name is shown and extracted exactly as entered.
//! Characters the font has no glyph for draw as `.notdef` but still extract
//! correctly.

use std::collections::HashMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::render::metrics::{wrap_lines, FontFace, FontMetrics};
use crate::render::outline::ReportOutline;
use crate::render::{RenderError, ReportContext};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const LINE_SPACING: f32 = 1.35;
const BULLET_INDENT: f32 = 14.0;
const BULLET: &str = "\u{2022}";

const ACCENT: [f32; 3] = [0.31, 0.27, 0.90];
const BODY: [f32; 3] = [0.22, 0.25, 0.32];
const RULE: [f32; 3] = [0.85, 0.86, 0.90];

/// Entries per `beginbfchar` block; the CMap format caps it at 100.
const BFCHAR_BLOCK: usize = 100;

pub fn render_pdf(ctx: &ReportContext) -> Result<Vec<u8>, RenderError> {
    let outline = ReportOutline::build(ctx);
    let mut writer = PageWriter::new(
        EmbeddedFont::load(FontFace::Regular)?,
        EmbeddedFont::load(FontFace::Bold)?,
    );

    writer.paragraph(FontFace::Bold, 22.0, outline.title, ACCENT);
    writer.gap(4.0);
    writer.paragraph(FontFace::Regular, 12.0, &outline.prepared_for(), BODY);
    writer.paragraph(FontFace::Regular, 12.0, &outline.date_of_birth(), BODY);
    writer.gap(6.0);
    writer.rule();
    writer.gap(14.0);

    for section in &outline.sections {
        writer.paragraph(FontFace::Bold, 14.0, &section.heading(), ACCENT);
        writer.gap(2.0);
        writer.paragraph(FontFace::Regular, 11.0, &section.description, BODY);
        writer.gap(12.0);
    }

    writer.paragraph(FontFace::Bold, 14.0, outline.recommendations_heading, ACCENT);
    writer.gap(4.0);
    for recommendation in &outline.recommendations {
        writer.bullet(11.0, recommendation, BODY);
        writer.gap(4.0);
    }

    let (pages, fonts) = writer.finish();
    assemble(&outline, pages, &fonts)
}

// ────────────────────────────────────────────────────────────────────────────
// Embedded fonts
// ────────────────────────────────────────────────────────────────────────────

/// One face as used by the current document.
struct EmbeddedFont {
    face: FontFace,
    metrics: FontMetrics,
    cids: HashMap<char, u16>,
    /// `chars[cid - 1]`; CID 0 stays `.notdef`.
    chars: Vec<char>,
}

impl EmbeddedFont {
    fn load(face: FontFace) -> Result<Self, RenderError> {
        Ok(EmbeddedFont {
            face,
            metrics: FontMetrics::load(face)?,
            cids: HashMap::new(),
            chars: Vec::new(),
        })
    }

    /// Two-byte big-endian CIDs for `text`, allocating new CIDs as needed.
    fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let cid = match self.cids.get(&c) {
                Some(&cid) => cid,
                None => {
                    self.chars.push(c);
                    let cid = u16::try_from(self.chars.len()).unwrap_or(0);
                    self.cids.insert(c, cid);
                    cid
                }
            };
            bytes.extend_from_slice(&cid.to_be_bytes());
        }
        bytes
    }

    fn cid_to_gid_map(&self) -> Vec<u8> {
        let mut map = vec![0u8, 0u8];
        for &c in &self.chars {
            map.extend_from_slice(&self.metrics.glyph_id(c).to_be_bytes());
        }
        map
    }

    fn widths(&self) -> Vec<Object> {
        if self.chars.is_empty() {
            return Vec::new();
        }
        let widths = self
            .chars
            .iter()
            .map(|&c| Object::Integer(i64::from(self.metrics.advance(c))))
            .collect::<Vec<_>>();
        vec![Object::Integer(1), Object::Array(widths)]
    }
}

/// ToUnicode CMap mapping every allocated CID back to its character.
fn to_unicode_cmap(chars: &[char]) -> Vec<u8> {
    let mut cmap = String::from(concat!(
        "/CIDInit /ProcSet findresource begin\n",
        "12 dict begin\n",
        "begincmap\n",
        "/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n",
        "/CMapName /Adobe-Identity-UCS def\n",
        "/CMapType 2 def\n",
        "1 begincodespacerange\n",
        "<0000> <FFFF>\n",
        "endcodespacerange\n",
    ));

    for (block_index, block) in chars.chunks(BFCHAR_BLOCK).enumerate() {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (offset, &c) in block.iter().enumerate() {
            let cid = block_index * BFCHAR_BLOCK + offset + 1;
            let mut units = [0u16; 2];
            let utf16: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{cid:04X}> <{utf16}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(concat!(
        "endcmap\n",
        "CMapName currentdict /CMap defineresource pop\n",
        "end\n",
        "end\n",
    ));
    cmap.into_bytes()
}

// ────────────────────────────────────────────────────────────────────────────
// Page layout
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates content-stream operations top to bottom, breaking pages when
/// the next line would cross the bottom margin.
struct PageWriter {
    regular: EmbeddedFont,
    bold: EmbeddedFont,
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    cursor_y: f32,
}

impl PageWriter {
    fn new(regular: EmbeddedFont, bold: EmbeddedFont) -> Self {
        PageWriter {
            regular,
            bold,
            finished: Vec::new(),
            current: Vec::new(),
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn font(&mut self, face: FontFace) -> &mut EmbeddedFont {
        match face {
            FontFace::Regular => &mut self.regular,
            FontFace::Bold => &mut self.bold,
        }
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor_y - height < MARGIN && !self.current.is_empty() {
            self.finished.push(std::mem::take(&mut self.current));
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn gap(&mut self, points: f32) {
        self.cursor_y -= points;
    }

    fn set_fill(&mut self, color: [f32; 3]) {
        self.current.push(Operation::new(
            "rg",
            color.iter().map(|&c| Object::from(c)).collect(),
        ));
    }

    fn show_text(&mut self, face: FontFace, size: f32, x: f32, baseline: f32, text: &str) {
        let cids = self.font(face).encode(text);
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![face.resource_name().into(), size.into()]),
            Operation::new("Td", vec![(MARGIN + x).into(), baseline.into()]),
            Operation::new("Tj", vec![Object::String(cids, StringFormat::Hexadecimal)]),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Wrapped text, one BT/ET block per line.
    fn paragraph(&mut self, face: FontFace, size: f32, text: &str, color: [f32; 3]) {
        let height = size * LINE_SPACING;
        let lines = wrap_lines(text, &self.font(face).metrics, size, TEXT_WIDTH);
        for line in lines {
            self.ensure_room(height);
            let baseline = self.cursor_y - size;
            self.set_fill(color);
            self.show_text(face, size, 0.0, baseline, &line);
            self.cursor_y -= height;
        }
    }

    /// Bulleted item with a hanging indent.
    fn bullet(&mut self, size: f32, text: &str, color: [f32; 3]) {
        let face = FontFace::Regular;
        let height = size * LINE_SPACING;
        let lines = wrap_lines(
            text,
            &self.font(face).metrics,
            size,
            TEXT_WIDTH - BULLET_INDENT,
        );

        for (i, line) in lines.iter().enumerate() {
            self.ensure_room(height);
            let baseline = self.cursor_y - size;
            self.set_fill(color);
            if i == 0 {
                self.show_text(face, size, 0.0, baseline, BULLET);
            }
            self.show_text(face, size, BULLET_INDENT, baseline, line);
            self.cursor_y -= height;
        }
    }

    /// Thin horizontal rule across the text width at the cursor.
    fn rule(&mut self) {
        self.ensure_room(1.0);
        let y = self.cursor_y;
        self.current.extend([
            Operation::new("RG", RULE.iter().map(|&c| Object::from(c)).collect()),
            Operation::new("w", vec![Object::Integer(1)]),
            Operation::new("m", vec![MARGIN.into(), y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    fn finish(mut self) -> (Vec<Vec<Operation>>, [EmbeddedFont; 2]) {
        if !self.current.is_empty() || self.finished.is_empty() {
            self.finished.push(self.current);
        }
        (self.finished, [self.regular, self.bold])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble(
    outline: &ReportOutline,
    pages: Vec<Vec<Operation>>,
    fonts: &[EmbeddedFont; 2],
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font_resources = lopdf::Dictionary::new();
    for font in fonts {
        let font_id = add_type0_font(&mut doc, font);
        font_resources.set(font.face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_resources,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(PAGE_WIDTH),
                Object::from(PAGE_HEIGHT),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(outline.title),
        "Subject" => text_string(&outline.prepared_for()),
        "Producer" => text_string(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Writes the font program, descriptor, descendant CIDFont, CID map and
/// ToUnicode CMap, and returns the Type0 font to reference from resources.
fn add_type0_font(doc: &mut Document, font: &EmbeddedFont) -> ObjectId {
    let metrics = &font.metrics;
    let base_font = font.face.base_font();
    let program = font.face.data();

    let program_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => program.len() as i64 },
        program.to_vec(),
    ));

    let bbox = metrics
        .bounding_box()
        .iter()
        .map(|&v| Object::Integer(i64::from(v)))
        .collect::<Vec<_>>();
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font,
        // Nonsymbolic.
        "Flags" => Object::Integer(32),
        "FontBBox" => bbox,
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => Object::Integer(i64::from(metrics.ascent())),
        "Descent" => Object::Integer(i64::from(metrics.descent())),
        "CapHeight" => Object::Integer(i64::from(metrics.cap_height())),
        "StemV" => Object::Integer(80),
        "FontFile2" => program_id,
    });

    let cid_map_id = doc.add_object(Stream::new(dictionary! {}, font.cid_to_gid_map()));

    let mut cid_font = dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => base_font,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => Object::Integer(0),
        },
        "FontDescriptor" => descriptor_id,
        "DW" => Object::Integer(1000),
        "CIDToGIDMap" => cid_map_id,
    };
    let widths = font.widths();
    if !widths.is_empty() {
        cid_font.set("W", widths);
    }
    let cid_font_id = doc.add_object(cid_font);

    let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode_cmap(&font.chars)));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => base_font,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::from(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// PDF text string: literal for ASCII, UTF-16BE with a byte-order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerology::engine::generate_report;
    use crate::numerology::{BirthDate, FullName};
    use crate::render::tests::{pdf_text, sample_context, squash};

    fn context_for(name: &str) -> ReportContext {
        let name = FullName::parse(name).unwrap();
        let date = BirthDate::parse("1990-05-15").unwrap();
        ReportContext::new(&name, date, generate_report(&name, date))
    }

    #[test]
    fn test_cids_follow_first_use_and_are_reused() {
        let mut font = EmbeddedFont::load(FontFace::Regular).unwrap();
        assert_eq!(font.encode("aba"), vec![0, 1, 0, 2, 0, 1]);
        assert_eq!(font.encode("ễa"), vec![0, 3, 0, 1]);
        assert_eq!(font.chars, vec!['a', 'b', 'ễ']);

        let map = font.cid_to_gid_map();
        assert_eq!(map.len(), 2 * 4);
        assert_eq!(&map[0..2], &[0, 0]);
        assert!(map[2..].chunks(2).all(|gid| gid != [0, 0]));
    }

    #[test]
    fn test_to_unicode_cmap_maps_cids_back_to_text() {
        let cmap = String::from_utf8(to_unicode_cmap(&['N', 'ễ', '𝄞'])).unwrap();
        assert!(cmap.contains("3 beginbfchar"));
        assert!(cmap.contains("<0001> <004E>"));
        assert!(cmap.contains("<0002> <1EC5>"));
        // Outside the BMP: surrogate pair.
        assert!(cmap.contains("<0003> <D834DD1E>"));
    }

    #[test]
    fn test_to_unicode_cmap_splits_large_blocks() {
        let chars: Vec<char> = ('a'..='z').chain('A'..='Z').cycle().take(150).collect();
        let cmap = String::from_utf8(to_unicode_cmap(&chars)).unwrap();
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("50 beginbfchar"));
        assert!(cmap.contains("<0096> <"));
    }

    #[test]
    fn test_pdf_is_loadable_and_embeds_fonts() {
        let bytes = render_pdf(&sample_context()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        // Font dictionaries are plain objects, so their names survive compression.
        let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"DejaVuSans-Bold"));
        assert!(contains(b"Identity-H"));
        assert!(contains(b"FontFile2"));
        assert!(contains(b"ToUnicode"));
    }

    #[test]
    fn test_pdf_text_contains_numbers_and_copy() {
        let ctx = sample_context();
        let text = squash(&pdf_text(&render_pdf(&ctx).unwrap()));

        assert!(text.contains(&squash("Life Path Number: 3")));
        assert!(text.contains(&squash("Personality Number: 33")));
        assert!(text.contains(&squash(&ctx.report.expression_description)));
    }

    #[test]
    fn test_pdf_keeps_display_name_as_entered() {
        for name in ["Nguyễn Văn A", "Trần Thị Hương", "Đặng Ngọc Ánh", "山田 Taro"] {
            let text = squash(&pdf_text(&render_pdf(&context_for(name)).unwrap()));
            let expected = squash(&format!("Prepared for: {name}"));
            assert!(text.contains(&expected), "{name:?} not found in {text:?}");
        }
    }

    #[test]
    fn test_pdf_breaks_long_content_across_pages() {
        let mut ctx = sample_context();
        ctx.report.recommendations = (0..80)
            .map(|i| format!("Recommendation number {i} with enough words to fill a line of text."))
            .collect();

        let bytes = render_pdf(&ctx).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);

        let text = squash(&pdf_text(&bytes));
        assert!(text.contains(&squash("Recommendation number 79 with")));
    }

    #[test]
    fn test_pdf_output_is_byte_identical() {
        let ctx = sample_context();
        assert_eq!(render_pdf(&ctx).unwrap(), render_pdf(&ctx).unwrap());
    }
}
