//! Layout-preserving page text from glyph positions.
//!
//! `pdf-extract`'s plain-text output puts a single space between any two
//! pieces of text, however far apart they sit on the page, which erases the
//! column gaps table detection depends on. Instead we record where every
//! glyph is drawn and lay the page out on a character grid: a glyph at `x`
//! lands near column `x / advance`, word gaps stay one space and column gaps
//! become at least two.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};

/// Gap, in multiples of the font size, above which two glyphs are in
/// different cells. A space in most fonts is about a quarter of this.
const CELL_GAP_EM: f64 = 0.75;
/// Gap below which two glyphs belong to the same word.
const WORD_GAP_EM: f64 = 0.1;
/// Glyphs whose baselines differ by less than this share a line.
const SAME_LINE_EM: f64 = 0.5;
/// Nominal line pitch used to turn vertical space into blank lines.
const LINE_PITCH_EM: f64 = 1.5;
const MAX_BLANK_LINES: usize = 5;

/// One drawn glyph in page coordinates, `y` growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub x: f64,
    pub y: f64,
    /// Horizontal advance in page units
    pub advance: f64,
    /// Effective font size in page units
    pub size: f64,
    pub text: String,
}

/// [`OutputDev`] that records glyphs for a single page.
#[derive(Debug, Default)]
pub struct GlyphCollector {
    page_top: f64,
    glyphs: Vec<Glyph>,
}

impl GlyphCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }
}

impl OutputDev for GlyphCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.page_top = media_box.ury;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        if char.trim().is_empty() {
            return Ok(());
        }
        let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
        let size = font_size * scale;
        self.glyphs.push(Glyph {
            x: trm.m31,
            y: self.page_top - trm.m32,
            advance: width * size,
            size,
            text: char.to_string(),
        });
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Render glyphs as text whose whitespace mirrors the page geometry.
pub fn layout_text(glyphs: &[Glyph]) -> String {
    let mut glyphs: Vec<&Glyph> = glyphs
        .iter()
        .filter(|g| g.size > 0.0 && !g.text.trim().is_empty())
        .collect();
    if glyphs.is_empty() {
        return String::new();
    }

    let advances: Vec<f64> = glyphs.iter().map(|g| g.advance).filter(|a| *a > 0.0).collect();
    let char_width = if advances.is_empty() {
        glyphs.iter().map(|g| g.size).sum::<f64>() / glyphs.len() as f64 * 0.5
    } else {
        advances.iter().sum::<f64>() / advances.len() as f64
    };

    glyphs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut out = String::new();
    let mut prev_y: Option<(f64, f64)> = None;
    for line in lines(&glyphs) {
        let (y, size) = (line[0].y, line[0].size);
        if let Some((py, psize)) = prev_y {
            let pitch = LINE_PITCH_EM * psize.max(size);
            let blanks = ((y - py) / pitch).round() as usize;
            for _ in 1..blanks.min(MAX_BLANK_LINES + 1) {
                out.push('\n');
            }
        }
        out.push_str(&layout_line(&line, char_width));
        out.push('\n');
        prev_y = Some((y, size));
    }
    out
}

/// Group y-sorted glyphs into lines, each sorted by x.
fn lines<'g>(glyphs: &[&'g Glyph]) -> Vec<Vec<&'g Glyph>> {
    let mut out: Vec<Vec<&Glyph>> = Vec::new();
    for &g in glyphs {
        match out.last_mut() {
            Some(line) if (g.y - line[0].y).abs() < SAME_LINE_EM * line[0].size => line.push(g),
            _ => out.push(vec![g]),
        }
    }
    for line in &mut out {
        line.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    out
}

fn layout_line(line: &[&Glyph], char_width: f64) -> String {
    let mut text = String::new();
    let mut col = 0usize;
    let mut prev_end: Option<f64> = None;

    for g in line {
        let target = (g.x.max(0.0) / char_width).round() as usize;
        let spaces = match prev_end {
            None => target,
            Some(end) => {
                let gap = g.x - end;
                if gap <= WORD_GAP_EM * g.size {
                    0
                } else if gap < CELL_GAP_EM * g.size {
                    1
                } else {
                    target.saturating_sub(col).max(2)
                }
            }
        };
        text.extend(std::iter::repeat_n(' ', spaces));
        text.push_str(&g.text);
        col += spaces + g.text.chars().count();
        let end = g.x + g.advance;
        prev_end = Some(prev_end.map_or(end, |p| p.max(end)));
    }
    text
}
