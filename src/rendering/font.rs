//! Font acquisition with an ordered fallback chain.
//!
//! The label wants a bold sans face. We walk a list of common system font
//! paths and fall back to a built-in 8x8 bitmap face when none loads, so
//! font acquisition can never fail outright. Only read and parse failures
//! advance the chain; each skipped candidate is logged.

use std::sync::Arc;

use image::{Rgb, RgbImage};
use once_cell::sync::Lazy;
use rusttype::{point, Font, Scale};

/// Preferred faces, most specific first. DejaVu Sans Bold matches the
/// original label output; the rest cover other common installs.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

static LABEL_FONT: Lazy<Arc<LabelFont>> = Lazy::new(|| Arc::new(load_chain()));

/// A text face the label can measure and paint with.
///
/// Either a real TrueType font or the built-in bitmap fallback. Both
/// variants implement the same measure/draw contract so layout code does
/// not care which one is active.
pub enum LabelFont {
    Truetype(Font<'static>),
    /// 8x8 bitmap glyphs scaled to the requested pixel size.
    Bitmap,
}

fn load_chain() -> LabelFont {
    for path in FONT_CANDIDATES {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("font candidate {path} unavailable: {e}");
                continue;
            }
        };
        match Font::try_from_vec(bytes) {
            Some(font) => {
                log::debug!("using font {path}");
                return LabelFont::Truetype(font);
            }
            None => log::warn!("font candidate {path} failed to parse, skipping"),
        }
    }
    log::warn!("no system font found, falling back to built-in bitmap font");
    LabelFont::Bitmap
}

/// Shared process-wide font, loaded once through the fallback chain.
pub fn label_font() -> Arc<LabelFont> {
    Arc::clone(&LABEL_FONT)
}

fn bitmap_glyph(ch: char) -> [u8; 8] {
    let code = ch as usize;
    if code < font8x8::legacy::BASIC_LEGACY.len() {
        font8x8::legacy::BASIC_LEGACY[code]
    } else {
        font8x8::legacy::BASIC_LEGACY[b'?' as usize]
    }
}

impl LabelFont {
    /// Ink bounding box of `text` at `px`, as (width, height).
    /// Empty text measures (0, 0).
    pub fn measure(&self, text: &str, px: f32) -> (u32, u32) {
        match self {
            LabelFont::Truetype(font) => {
                let scale = Scale::uniform(px);
                let v_metrics = font.v_metrics(scale);
                let mut max_x = 0i32;
                let mut min_y = i32::MAX;
                let mut max_y = i32::MIN;
                for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        max_x = max_x.max(bb.max.x);
                        min_y = min_y.min(bb.min.y);
                        max_y = max_y.max(bb.max.y);
                    }
                }
                if max_y < min_y {
                    (0, 0)
                } else {
                    (max_x.max(0) as u32, (max_y - min_y) as u32)
                }
            }
            LabelFont::Bitmap => {
                let s = bitmap_scale(px);
                let chars = text.chars().count() as u32;
                if chars == 0 {
                    (0, 0)
                } else {
                    (chars * 8 * s, 8 * s)
                }
            }
        }
    }

    /// Paint `text` with its ink top-left corner at (x, y).
    pub fn draw(&self, img: &mut RgbImage, x: i32, y: i32, text: &str, px: f32, color: Rgb<u8>) {
        match self {
            LabelFont::Truetype(font) => {
                let scale = Scale::uniform(px);
                let v_metrics = font.v_metrics(scale);
                let glyphs: Vec<_> = font
                    .layout(text, scale, point(x as f32, v_metrics.ascent))
                    .collect();
                // shift so the measured ink top lands exactly on y
                let ink_top = glyphs
                    .iter()
                    .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.min.y))
                    .min()
                    .unwrap_or(0);
                let dy = y - ink_top;
                for glyph in &glyphs {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, v| {
                            let px = gx as i32 + bb.min.x;
                            let py = gy as i32 + bb.min.y + dy;
                            blend_pixel(img, px, py, color, v);
                        });
                    }
                }
            }
            LabelFont::Bitmap => {
                let s = bitmap_scale(px) as i32;
                let mut cx = x;
                for ch in text.chars() {
                    let rows = bitmap_glyph(ch);
                    for (row, bits) in rows.iter().enumerate() {
                        for col in 0..8 {
                            if bits >> col & 1 == 0 {
                                continue;
                            }
                            for sy in 0..s {
                                for sx in 0..s {
                                    let px = cx + col as i32 * s + sx;
                                    let py = y + row as i32 * s + sy;
                                    blend_pixel(img, px, py, color, 1.0);
                                }
                            }
                        }
                    }
                    cx += 8 * s;
                }
            }
        }
    }
}

fn bitmap_scale(px: f32) -> u32 {
    ((px / 8.0).round() as u32).max(1)
}

fn blend_pixel(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    let dst = img.get_pixel_mut(x, y);
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        let font = label_font();
        assert_eq!(font.measure("", 40.0), (0, 0));
    }

    #[test]
    fn wider_text_measures_wider() {
        let font = label_font();
        let (short, _) = font.measure("Hi", 40.0);
        let (long, _) = font.measure("Hello, world", 40.0);
        assert!(long > short);
    }

    #[test]
    fn larger_size_measures_larger() {
        let font = label_font();
        let (w_body, h_body) = font.measure("$2.99", 40.0);
        let (w_price, h_price) = font.measure("$2.99", 96.0);
        assert!(w_price > w_body);
        assert!(h_price > h_body);
    }

    #[test]
    fn draw_marks_pixels() {
        let font = label_font();
        let mut img = RgbImage::from_pixel(400, 100, Rgb([255, 255, 255]));
        font.draw(&mut img, 5, 5, "X", 40.0, Rgb([0, 0, 0]));
        let touched = img.pixels().any(|p| p.0 != [255, 255, 255]);
        assert!(touched);
    }

    #[test]
    fn bitmap_fallback_measures_by_cell() {
        let font = LabelFont::Bitmap;
        assert_eq!(font.measure("ab", 40.0), (2 * 8 * 5, 8 * 5));
    }
}
