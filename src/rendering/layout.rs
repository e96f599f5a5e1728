//! Label geometry.
//!
//! All physical dimensions are fixed in millimeters and converted at a
//! fixed print density. The canvas width is content-dependent, so layout
//! runs in two passes: measure every block first, then derive an immutable
//! [`LayoutPlan`] that the painter executes. The plan is pure arithmetic
//! over measured sizes and is unit-tested without fonts or images.

/// Print density, pixels per millimeter (203.2 DPI).
pub const PIXELS_PER_MM: u32 = 8;
/// Fixed label height.
pub const LABEL_HEIGHT_MM: u32 = 48;
/// Blank margin on the far left of the label.
pub const LEFT_MARGIN_MM: u32 = 5;
/// Padding inside each region.
pub const INTERNAL_PADDING_MM: u32 = 3;
/// Vertical gap between stacked elements.
pub const LINE_GAP_MM: u32 = 1;
/// Barcode target size on the label.
pub const BARCODE_WIDTH_MM: u32 = 30;
pub const BARCODE_HEIGHT_MM: u32 = 10;
/// Font sizes.
pub const BODY_FONT_MM: u32 = 5;
pub const PRICE_FONT_MM: u32 = 12;

/// Convert a millimeter constant to pixels at the label density.
pub const fn mm_to_px(mm: u32) -> u32 {
    mm * PIXELS_PER_MM
}

/// Ink bounding box of one measured text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub width: u32,
    pub height: u32,
}

/// Everything the layout depends on, measured up front.
#[derive(Debug, Clone, Copy)]
pub struct Measurements {
    pub name: TextBlock,
    pub producer: TextBlock,
    pub ean_line: TextBlock,
    pub price: TextBlock,
}

/// Pixel origin of one painted element.
pub type Origin = (u32, u32);

/// The complete paint geometry for one label, derived once per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub width: u32,
    pub height: u32,
    pub name_origin: Origin,
    pub producer_origin: Origin,
    pub ean_origin: Origin,
    pub barcode_origin: Origin,
    pub price_origin: Origin,
    /// Left edge of the vertical rule between the two regions.
    pub separator_x: u32,
}

/// Derive the paint plan from measured block sizes.
///
/// Left region: name, producer, EAN line and barcode stacked top-down,
/// each advancing the cursor by its own height plus the line gap. Width is
/// driven by the widest block. Right region holds the price, vertically
/// centered over the full label height.
pub fn plan(m: &Measurements) -> LayoutPlan {
    let height = mm_to_px(LABEL_HEIGHT_MM);
    let left_margin = mm_to_px(LEFT_MARGIN_MM);
    let padding = mm_to_px(INTERNAL_PADDING_MM);
    let gap = mm_to_px(LINE_GAP_MM);
    let barcode_w = mm_to_px(BARCODE_WIDTH_MM);

    let x_left = left_margin + padding;
    let mut y = padding;

    let name_origin = (x_left, y);
    y += m.name.height + gap;
    let producer_origin = (x_left, y);
    y += m.producer.height + gap;
    let ean_origin = (x_left, y);
    y += m.ean_line.height + gap;
    let barcode_origin = (x_left, y);

    let widest = m
        .name
        .width
        .max(m.producer.width)
        .max(m.ean_line.width)
        .max(barcode_w);
    let left_width = widest + 2 * padding;
    let right_width = m.price.width + 2 * padding;

    let separator_x = left_margin + left_width;
    let price_origin = (
        separator_x + padding,
        height.saturating_sub(m.price.height) / 2,
    );

    LayoutPlan {
        width: left_margin + left_width + right_width,
        height,
        name_origin,
        producer_origin,
        ean_origin,
        barcode_origin,
        price_origin,
        separator_x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(width: u32, height: u32) -> TextBlock {
        TextBlock { width, height }
    }

    fn sample() -> Measurements {
        Measurements {
            name: block(180, 30),
            producer: block(120, 30),
            ean_line: block(200, 28),
            price: block(220, 70),
        }
    }

    #[test]
    fn height_is_fixed() {
        assert_eq!(plan(&sample()).height, 384);
    }

    #[test]
    fn width_formula() {
        let p = plan(&sample());
        // barcode (240) is the widest left block here
        let left = 240 + 2 * 24;
        let right = 220 + 2 * 24;
        assert_eq!(p.width, 40 + left + right);
        assert_eq!(p.separator_x, 40 + left);
    }

    #[test]
    fn text_wider_than_barcode_drives_left_region() {
        let mut m = sample();
        m.name = block(500, 30);
        let p = plan(&m);
        assert_eq!(p.separator_x, 40 + 500 + 2 * 24);
    }

    #[test]
    fn stack_advances_by_height_plus_gap() {
        let p = plan(&sample());
        assert_eq!(p.name_origin, (40 + 24, 24));
        assert_eq!(p.producer_origin.1, 24 + 30 + 8);
        assert_eq!(p.ean_origin.1, 24 + 30 + 8 + 30 + 8);
        assert_eq!(p.barcode_origin.1, 24 + 30 + 8 + 30 + 8 + 28 + 8);
    }

    #[test]
    fn price_is_vertically_centered() {
        let p = plan(&sample());
        assert_eq!(p.price_origin.1, (384 - 70) / 2);
        assert_eq!(p.price_origin.0, p.separator_x + 24);
    }

    #[test]
    fn empty_blocks_still_reserve_gap_and_padding() {
        let m = Measurements {
            name: block(0, 0),
            producer: block(0, 0),
            ean_line: block(0, 0),
            price: block(0, 0),
        };
        let p = plan(&m);
        assert_eq!(p.producer_origin.1, 24 + 8);
        assert_eq!(p.barcode_origin.1, 24 + 3 * 8);
        // left region still spans the barcode, right region its padding
        assert_eq!(p.width, 40 + (240 + 48) + 48);
    }

    #[test]
    fn price_taller_than_label_does_not_underflow() {
        let mut m = sample();
        m.price = block(100, 500);
        assert_eq!(plan(&m).price_origin.1, 0);
    }
}
