//! Label composition pipeline.
//!
//! Measure-then-paint in two explicit passes: the canvas width depends on
//! the measured text and barcode widths, so nothing can be painted until
//! every block has been sized and the [`layout::LayoutPlan`] fixed.

pub mod font;
pub mod layout;
pub mod paint;

use std::path::PathBuf;

use crate::lookup::{resolve_product, ProductSource};
use crate::rendering::layout::{mm_to_px, Measurements, TextBlock, BODY_FONT_MM, PRICE_FONT_MM};
use crate::rendering::paint::LabelText;
use crate::{barcode, price, LabelRequest, Result};

/// A finished label on disk.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    /// Where the PNG was written
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl RenderedLabel {
    /// Label width in millimeters at the print density.
    pub fn width_mm(&self) -> f64 {
        self.width as f64 / layout::PIXELS_PER_MM as f64
    }

    /// Label height in millimeters at the print density.
    pub fn height_mm(&self) -> f64 {
        self.height as f64 / layout::PIXELS_PER_MM as f64
    }
}

/// Compose a label using `source` for metadata resolution.
///
/// When the request carries both a name and a producer override the
/// source is never consulted.
pub fn compose_with_source(req: &LabelRequest, source: &dyn ProductSource) -> Result<RenderedLabel> {
    let record = resolve_product(source, &req.ean, &req.lang, &req.overrides)?;
    log::debug!("resolved product: {} / {}", record.name, record.producer);

    let price_text = price::format_price(req.price_minor_units, &req.price_format)?;

    let native_barcode = barcode::render(&req.ean)?;
    let barcode_img = paint::fit_barcode(&native_barcode);

    let font = font::label_font();
    let body_px = mm_to_px(BODY_FONT_MM) as f32;
    let price_px = mm_to_px(PRICE_FONT_MM) as f32;

    let ean_line = format!("EAN: {}", record.ean);
    let measure = |text: &str, px: f32| {
        let (width, height) = font.measure(text, px);
        TextBlock { width, height }
    };
    let measurements = Measurements {
        name: measure(&record.name, body_px),
        producer: measure(&record.producer, body_px),
        ean_line: measure(&ean_line, body_px),
        price: measure(&price_text, price_px),
    };

    let plan = layout::plan(&measurements);
    log::debug!("layout plan: {}x{} px", plan.width, plan.height);

    let canvas = paint::paint(
        &plan,
        &LabelText {
            name: &record.name,
            producer: &record.producer,
            ean_line: &ean_line,
            price: &price_text,
        },
        &barcode_img,
        &font,
    );

    // encode fully in memory so a failure leaves no partial file
    let bytes = paint::encode_png(&canvas)?;
    std::fs::write(&req.output, bytes)?;

    Ok(RenderedLabel {
        path: req.output.clone(),
        width: plan.width,
        height: plan.height,
    })
}
