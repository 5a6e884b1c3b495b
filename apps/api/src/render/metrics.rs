//! Fonts embedded in the PDF and their glyph metrics.
//!
//! DejaVu Sans (regular and bold) ships inside the binary. It covers Latin,
//! including every Vietnamese letter, plus Greek and Cyrillic. Widths are
//! read from the font's `hmtx` table and scaled to 1/1000 em, the unit PDF
//! width arrays use.

use ttf_parser::{Face, GlyphId};

use crate::render::RenderError;

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Faces available to the PDF renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    /// PostScript name of the embedded font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "DejaVuSans",
            FontFace::Bold => "DejaVuSans-Bold",
        }
    }

    /// Raw TrueType program, embedded as `FontFile2`.
    pub fn data(self) -> &'static [u8] {
        match self {
            FontFace::Regular => DEJAVU_SANS,
            FontFace::Bold => DEJAVU_SANS_BOLD,
        }
    }
}

/// A parsed face. Characters the font has no glyph for map to glyph 0
/// (`.notdef`) and take its advance.
pub struct FontMetrics {
    face: Face<'static>,
    units_per_em: f32,
}

impl FontMetrics {
    pub fn load(font: FontFace) -> Result<Self, RenderError> {
        let face = Face::parse(font.data(), 0)?;
        let units_per_em = f32::from(face.units_per_em());
        Ok(FontMetrics { face, units_per_em })
    }

    pub fn glyph_id(&self, c: char) -> u16 {
        self.face.glyph_index(c).map(|g| g.0).unwrap_or(0)
    }

    /// Advance of `c` in 1/1000 em.
    pub fn advance(&self, c: char) -> u32 {
        let units = self
            .face
            .glyph_hor_advance(GlyphId(self.glyph_id(c)))
            .unwrap_or(0);
        self.scale(i32::from(units)).unsigned_abs()
    }

    /// Width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.advance(c)).sum();
        units as f32 * size_pt / 1000.0
    }

    pub fn ascent(&self) -> i32 {
        self.scale(i32::from(self.face.ascender()))
    }

    pub fn descent(&self) -> i32 {
        self.scale(i32::from(self.face.descender()))
    }

    pub fn cap_height(&self) -> i32 {
        self.face
            .capital_height()
            .map(|h| self.scale(i32::from(h)))
            .unwrap_or_else(|| self.ascent())
    }

    /// `[x_min, y_min, x_max, y_max]` in 1/1000 em.
    pub fn bounding_box(&self) -> [i32; 4] {
        let bbox = self.face.global_bounding_box();
        [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max].map(|v| self.scale(i32::from(v)))
    }

    fn scale(&self, units: i32) -> i32 {
        (units as f32 * 1000.0 / self.units_per_em).round() as i32
    }
}

/// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
///
/// A single word wider than the line is split by characters so no line ever
/// overflows. Whitespace runs collapse to one space. Empty input yields no lines.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetrics,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let space_w = metrics.measure_str(" ", size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word, size_pt);

        if word_w > max_width_pt {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = split_long_word(word, metrics, size_pt, max_width_pt);
            // The last piece stays open so following words can join it.
            if let Some(tail) = pieces.pop() {
                lines.extend(pieces);
                current_width = metrics.measure_str(&tail, size_pt);
                current = tail;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(
    word: &str,
    metrics: &FontMetrics,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0_f32;

    for c in word.chars() {
        let char_w = metrics.advance(c) as f32 * size_pt / 1000.0;
        if !piece.is_empty() && piece_width + char_w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += char_w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
