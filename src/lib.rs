//! Product label generator.
//!
//! Turns an EAN-13 identifier and a price in minor currency units into a
//! printable PNG label: product name and brand (resolved from the Open
//! Food Facts API unless overridden), the identifier line, a scannable
//! barcode, and a large price display in a separate region.
//!
//! # Example
//!
//! ```no_run
//! use labelgen::LabelRequest;
//!
//! # fn main() -> labelgen::Result<()> {
//! let request = LabelRequest::new("5449000000996", 299);
//! let label = labelgen::compose(&request)?;
//! println!("{} ({}x{} px)", label.path.display(), label.width, label.height);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod barcode;
pub mod lookup;
pub mod price;
pub mod rendering;

pub use lookup::{OpenFoodFactsClient, ProductOverrides, ProductRecord, ProductSource};
pub use price::format_price;
pub use rendering::{compose_with_source, RenderedLabel};

/// Everything needed to generate one label.
///
/// [`LabelRequest::new`] fills the same defaults the CLI uses: output
/// `label.png`, the global dataset, and the `${price}` format.
#[derive(Debug, Clone)]
pub struct LabelRequest {
    /// 13-digit EAN identifier. Validated at the CLI boundary; the barcode
    /// encoder re-checks digits and checksum.
    pub ean: String,
    /// Price in minor currency units (cents)
    pub price_minor_units: u32,
    /// Output PNG path
    pub output: PathBuf,
    /// Locale hint selecting a region mirror, `"world"` for the global set
    pub lang: String,
    /// Price display template, see [`price::format_price`]
    pub price_format: String,
    /// Name/producer replacements; when both are set no lookup happens
    pub overrides: ProductOverrides,
}

impl LabelRequest {
    pub fn new(ean: impl Into<String>, price_minor_units: u32) -> Self {
        Self {
            ean: ean.into(),
            price_minor_units,
            output: PathBuf::from("label.png"),
            lang: "world".to_string(),
            price_format: price::DEFAULT_TEMPLATE.to_string(),
            overrides: ProductOverrides::default(),
        }
    }
}

/// Compose a label with the default Open Food Facts client.
///
/// The client is only built when the overrides are incomplete, so fully
/// overridden requests work offline.
pub fn compose(req: &LabelRequest) -> Result<RenderedLabel> {
    if req.overrides.is_complete() {
        struct NeverSource;
        impl ProductSource for NeverSource {
            fn lookup(&self, ean: &str, _lang: &str) -> Result<ProductRecord> {
                Err(Error::Lookup(format!(
                    "no metadata source available for {ean}"
                )))
            }
        }
        return compose_with_source(req, &NeverSource);
    }
    let client = OpenFoodFactsClient::new()?;
    compose_with_source(req, &client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let req = LabelRequest::new("5449000000996", 299);
        assert_eq!(req.output, PathBuf::from("label.png"));
        assert_eq!(req.lang, "world");
        assert_eq!(req.price_format, "${price}");
        assert!(req.overrides.name.is_none());
    }
}
