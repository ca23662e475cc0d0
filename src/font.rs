//! Label fonts and text rendering.
//!
//! A [`LabelFont`] is resolved through a fallback chain: each TrueType
//! candidate is tried in order, and the built-in 5x7 bitmap font is used when
//! none of them load. Both variants measure and draw text the same way: the
//! draw origin is the top-left of the line box, and [`TextBox`] describes the
//! inked pixels relative to that origin.

use crate::gradient::Color;
use anyhow::{anyhow, Context, Result};
use image::{Rgb, RgbImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::{Path, PathBuf};

const GLYPH_WIDTH: i32 = 5;
const GLYPH_HEIGHT: i32 = 7;
const GLYPH_ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Pixel extent of rendered text. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    fn union(self, other: TextBox) -> TextBox {
        TextBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// A font handle used to measure and draw an icon label.
pub enum LabelFont {
    TrueType {
        font: Font<'static>,
        scale: Scale,
        source: PathBuf,
    },
    Builtin,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::TrueType { scale, source, .. } => f
                .debug_struct("TrueType")
                .field("source", source)
                .field("scale", &scale.y)
                .finish(),
            LabelFont::Builtin => f.write_str("Builtin"),
        }
    }
}

impl LabelFont {
    /// Walk the candidate list and return the first font that loads, or the
    /// built-in font when none do. Load failures are only logged.
    pub fn resolve(candidates: &[PathBuf], pixel_size: f32) -> Self {
        for path in candidates {
            match Self::from_file(path, pixel_size) {
                Ok(font) => {
                    log::debug!("Using font {} at {pixel_size}px", path.display());
                    return font;
                }
                Err(err) => log::debug!("Skipping font {}: {err:#}", path.display()),
            }
        }

        log::debug!("No font candidate loaded, using the built-in font");
        LabelFont::Builtin
    }

    /// Load a TrueType/OpenType file (or the first face of a collection) with
    /// an em size of `pixel_size` pixels.
    pub fn from_file(path: &Path, pixel_size: f32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let font = Font::try_from_vec_and_index(data, 0)
            .ok_or_else(|| anyhow!("Not a usable font: {}", path.display()))?;
        let scale = em_scale(&font, pixel_size);

        Ok(LabelFont::TrueType {
            font,
            scale,
            source: path.to_path_buf(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin)
    }

    /// Bounding box of the inked pixels of `text` drawn at the origin.
    pub fn text_bbox(&self, text: &str) -> TextBox {
        match self {
            LabelFont::TrueType { font, scale, .. } => layout(font, *scale, text, 0, 0)
                .iter()
                .filter_map(|glyph| glyph.pixel_bounding_box())
                .map(|bb| TextBox {
                    left: bb.min.x,
                    top: bb.min.y,
                    right: bb.max.x,
                    bottom: bb.max.y,
                })
                .reduce(TextBox::union)
                .unwrap_or_default(),
            LabelFont::Builtin => builtin_bbox(text),
        }
    }

    /// Composite `text` onto `img` with its line box starting at `(x, y)`.
    /// Pixels outside the image are clipped.
    pub fn draw_text(&self, img: &mut RgbImage, text: &str, x: i32, y: i32, color: Color) {
        match self {
            LabelFont::TrueType { font, scale, .. } => {
                for glyph in layout(font, *scale, text, x, y) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        blend_pixel(
                            img,
                            bb.min.x + gx as i32,
                            bb.min.y + gy as i32,
                            color,
                            coverage,
                        );
                    });
                }
            }
            LabelFont::Builtin => {
                for (index, glyph) in text.chars().map(builtin_glyph).enumerate() {
                    let cell_x = x + index as i32 * GLYPH_ADVANCE;
                    for_each_glyph_pixel(glyph, |px, py| {
                        blend_pixel(img, cell_x + px, y + py, color, 1.0);
                    });
                }
            }
        }
    }
}

/// rusttype scales by ascent-descent height; convert so `pixel_size` is the em size.
fn em_scale(font: &Font<'_>, pixel_size: f32) -> Scale {
    let metrics = font.v_metrics_unscaled();
    let line_height = metrics.ascent - metrics.descent;
    let units_per_em = f32::from(font.units_per_em());

    if line_height > 0.0 && units_per_em > 0.0 {
        Scale::uniform(pixel_size * line_height / units_per_em)
    } else {
        Scale::uniform(pixel_size)
    }
}

fn layout<'a>(
    font: &'a Font<'static>,
    scale: Scale,
    text: &str,
    x: i32,
    y: i32,
) -> Vec<PositionedGlyph<'a>> {
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(x as f32, y as f32 + ascent)).collect()
}

fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }

    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    let Rgb([r, g, b]) = *pixel;
    let mix = |bg: u8, fg: u8| {
        (f32::from(bg) * (1.0 - coverage) + f32::from(fg) * coverage).round() as u8
    };

    *pixel = Rgb([
        mix(r, color.red),
        mix(g, color.green),
        mix(b, color.blue),
    ]);
}

fn builtin_bbox(text: &str) -> TextBox {
    let mut bbox: Option<TextBox> = None;

    for (index, glyph) in text.chars().map(builtin_glyph).enumerate() {
        let cell_x = index as i32 * GLYPH_ADVANCE;
        for_each_glyph_pixel(glyph, |px, py| {
            let pixel = TextBox {
                left: cell_x + px,
                top: py,
                right: cell_x + px + 1,
                bottom: py + 1,
            };
            bbox = Some(bbox.map_or(pixel, |current| current.union(pixel)));
        });
    }

    bbox.unwrap_or_default()
}

fn for_each_glyph_pixel(glyph: &[u8; GLYPH_HEIGHT as usize], mut f: impl FnMut(i32, i32)) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            // Leftmost column is the most significant of the five bits
            if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 != 0 {
                f(col, row as i32);
            }
        }
    }
}

/// 5x7 bitmap for `c`. Letters are case-folded; anything without a glyph is blank.
fn builtin_glyph(c: char) -> &'static [u8; GLYPH_HEIGHT as usize] {
    const BLANK: [u8; 7] = [0; 7];

    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => &LETTERS[c as usize - 'A' as usize],
        c @ '0'..='9' => &DIGITS[c as usize - '0' as usize],
        _ => &BLANK,
    }
}

#[rustfmt::skip]
const LETTERS: [[u8; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

#[rustfmt::skip]
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bbox_covers_llm() {
        let bbox = builtin_bbox("LLM");
        assert_eq!(
            bbox,
            TextBox {
                left: 0,
                top: 0,
                right: 2 * GLYPH_ADVANCE + GLYPH_WIDTH,
                bottom: GLYPH_HEIGHT,
            }
        );
    }

    #[test]
    fn builtin_glyphs_are_case_insensitive() {
        assert_eq!(builtin_glyph('m'), builtin_glyph('M'));
        assert_eq!(builtin_glyph('?'), &[0; 7]);
    }

    #[test]
    fn builtin_bbox_of_blank_text_is_empty() {
        assert_eq!(builtin_bbox(""), TextBox::default());
        assert_eq!(builtin_bbox("  ").width(), 0);
    }

    #[test]
    fn builtin_bbox_skips_leading_blank_cells() {
        let bbox = builtin_bbox(" I");
        // 'I' inks columns 1..=3 of its cell
        assert_eq!(bbox.left, GLYPH_ADVANCE + 1);
        assert_eq!(bbox.width(), 3);
    }
}
