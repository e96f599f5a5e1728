//! Painting and PNG encoding.
//!
//! Executes a [`LayoutPlan`] onto a white canvas: the left-region text
//! stack, the resized barcode, the price, and the 2 px separator rule.
//! The PNG is encoded in memory with a pHYs chunk carrying the print
//! density, so nothing touches the output path until the label is whole.

use image::imageops::FilterType;
use image::{imageops, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::rendering::font::LabelFont;
use crate::rendering::layout::{
    mm_to_px, LayoutPlan, BARCODE_HEIGHT_MM, BARCODE_WIDTH_MM, BODY_FONT_MM, PIXELS_PER_MM,
    PRICE_FONT_MM,
};

const SEPARATOR_WIDTH_PX: u32 = 2;
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Text content painted onto the label.
pub struct LabelText<'a> {
    pub name: &'a str,
    pub producer: &'a str,
    pub ean_line: &'a str,
    pub price: &'a str,
}

/// Resize the natively rendered barcode to its physical target size.
pub fn fit_barcode(barcode: &RgbImage) -> RgbImage {
    imageops::resize(
        barcode,
        mm_to_px(BARCODE_WIDTH_MM),
        mm_to_px(BARCODE_HEIGHT_MM),
        FilterType::Lanczos3,
    )
}

/// Paint the full canvas from the plan.
pub fn paint(
    plan: &LayoutPlan,
    text: &LabelText<'_>,
    barcode: &RgbImage,
    font: &LabelFont,
) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(plan.width, plan.height, WHITE);

    let body_px = mm_to_px(BODY_FONT_MM) as f32;
    let price_px = mm_to_px(PRICE_FONT_MM) as f32;

    let (x, y) = plan.name_origin;
    font.draw(&mut canvas, x as i32, y as i32, text.name, body_px, BLACK);
    let (x, y) = plan.producer_origin;
    font.draw(&mut canvas, x as i32, y as i32, text.producer, body_px, BLACK);
    let (x, y) = plan.ean_origin;
    font.draw(&mut canvas, x as i32, y as i32, text.ean_line, body_px, BLACK);

    let (x, y) = plan.barcode_origin;
    imageops::replace(&mut canvas, barcode, x as i64, y as i64);

    let (x, y) = plan.price_origin;
    font.draw(&mut canvas, x as i32, y as i32, text.price, price_px, BLACK);

    for x in plan.separator_x..(plan.separator_x + SEPARATOR_WIDTH_PX).min(plan.width) {
        for y in 0..plan.height {
            canvas.put_pixel(x, y, BLACK);
        }
    }

    canvas
}

/// Encode the canvas as PNG bytes with the label density in a pHYs chunk.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    // pHYs is expressed in pixels per meter
    let ppm = PIXELS_PER_MM * 1000;

    let mut buf = Vec::new();
    let mut encoder = png::Encoder::new(&mut buf, canvas.width(), canvas.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::Render(format!("failed to encode PNG: {e}")))?;
    writer
        .write_image_data(canvas.as_raw())
        .map_err(|e| Error::Render(format!("failed to encode PNG: {e}")))?;
    writer
        .finish()
        .map_err(|e| Error::Render(format!("failed to encode PNG: {e}")))?;

    Ok(buf)
}
