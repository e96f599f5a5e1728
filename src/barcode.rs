//! EAN-13 encoding and rasterization.
//!
//! The symbol is 95 modules wide: a 101 guard, six left digits encoded
//! with L/G parity chosen by the leading digit, a 01010 center guard, six
//! right digits in R codes, and a closing 101 guard. The raster carries no
//! human-readable text; the composer draws the identifier separately.

use image::{Rgb, RgbImage};

use crate::{Error, Result};

/// Modules in a full EAN-13 symbol.
pub const SYMBOL_MODULES: u32 = 95;
/// Horizontal pixels per module in the native raster.
pub const MODULE_WIDTH_PX: u32 = 2;
/// Bar height of the native raster.
pub const BAR_HEIGHT_PX: u32 = 64;
/// Blank modules kept on each side for scanner lock-on.
pub const QUIET_ZONE_MODULES: u32 = 10;

/// L codes for digits 0-9; G is the reverse-complement, R the complement.
const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

const G_CODES: [u8; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101, 0b0111001, 0b0000101, 0b0010001,
    0b0001001, 0b0010111,
];

/// Parity pattern for the six left digits, indexed by the leading digit.
/// Bit i set (from MSB of 6) means the G code is used at position i.
const LEFT_PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

fn digits_of(ean: &str) -> Result<Vec<u8>> {
    let digits: Option<Vec<u8>> = ean
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();
    let digits = digits.ok_or_else(|| Error::Encoding(format!("non-digit in {ean:?}")))?;
    if digits.len() != 13 {
        return Err(Error::Encoding(format!(
            "expected 13 digits, got {}",
            digits.len()
        )));
    }
    Ok(digits)
}

/// Compute the EAN-13 check digit for the first 12 digits.
fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, &d)| if i % 2 == 0 { d as u32 } else { d as u32 * 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Encode a 13-digit identifier into its 95-module bar pattern.
///
/// The check digit is recomputed and compared; the CLI validates digit
/// count upstream, so a mismatch here means a mistyped code.
pub fn encode(ean: &str) -> Result<Vec<bool>> {
    let digits = digits_of(ean)?;
    let expected = check_digit(&digits);
    if digits[12] != expected {
        return Err(Error::Encoding(format!(
            "check digit mismatch for {ean}: expected {expected}"
        )));
    }

    let mut modules = Vec::with_capacity(SYMBOL_MODULES as usize);
    let push_bits = |modules: &mut Vec<bool>, pattern: u8, count: u8| {
        for i in (0..count).rev() {
            modules.push(pattern >> i & 1 == 1);
        }
    };

    push_bits(&mut modules, 0b101, 3);

    let parity = LEFT_PARITY[digits[0] as usize];
    for (i, &d) in digits[1..7].iter().enumerate() {
        let code = if parity >> (5 - i) & 1 == 1 {
            G_CODES[d as usize]
        } else {
            L_CODES[d as usize]
        };
        push_bits(&mut modules, code, 7);
    }

    push_bits(&mut modules, 0b01010, 5);

    for &d in &digits[7..13] {
        // R code is the bitwise complement of L
        push_bits(&mut modules, !L_CODES[d as usize] & 0x7f, 7);
    }

    push_bits(&mut modules, 0b101, 3);

    debug_assert_eq!(modules.len(), SYMBOL_MODULES as usize);
    Ok(modules)
}

/// Render the identifier as black bars on white at the native module
/// geometry. The composer resizes this to the label's physical target.
pub fn render(ean: &str) -> Result<RgbImage> {
    let modules = encode(ean)?;

    let width = (SYMBOL_MODULES + 2 * QUIET_ZONE_MODULES) * MODULE_WIDTH_PX;
    let mut img = RgbImage::from_pixel(width, BAR_HEIGHT_PX, Rgb([255, 255, 255]));

    let black = Rgb([0, 0, 0]);
    for (i, &dark) in modules.iter().enumerate() {
        if !dark {
            continue;
        }
        let x0 = (QUIET_ZONE_MODULES + i as u32) * MODULE_WIDTH_PX;
        for x in x0..x0 + MODULE_WIDTH_PX {
            for y in 0..BAR_HEIGHT_PX {
                img.put_pixel(x, y, black);
            }
        }
    }

    Ok(img)
}
