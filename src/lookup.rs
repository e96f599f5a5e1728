//! Product metadata lookup against the Open Food Facts API.
//!
//! A single blocking GET per label. The service exposes region mirrors as
//! subdomains; the locale hint selects one, with `"world"` meaning the
//! global dataset. Backends are swappable through [`ProductSource`] so
//! tests can substitute a stub and prove the override path never touches
//! the network.

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::{Error, Result};

const SERVICE_DOMAIN: &str = "openfoodfacts.org";
const WORLD: &str = "world";

/// Normalized product metadata for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Product display name
    pub name: String,
    /// Producer / brand line
    pub producer: String,
    /// The 13-digit identifier the record was resolved for
    pub ean: String,
}

/// Caller-supplied replacements for looked-up fields.
///
/// When both fields are present the lookup is skipped entirely; otherwise
/// present fields overlay the fetched record.
#[derive(Debug, Clone, Default)]
pub struct ProductOverrides {
    pub name: Option<String>,
    pub producer: Option<String>,
}

impl ProductOverrides {
    /// True when the overrides alone form a complete record.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.producer.is_some()
    }
}

/// Source of product metadata keyed by EAN.
pub trait ProductSource {
    /// Resolve a record for `ean`, using `lang` as the region hint.
    fn lookup(&self, ean: &str, lang: &str) -> Result<ProductRecord>;
}

/// Resolve the final record: skip the lookup when the overrides are
/// complete, otherwise fetch and overlay whichever fields are present.
pub fn resolve_product(
    source: &dyn ProductSource,
    ean: &str,
    lang: &str,
    overrides: &ProductOverrides,
) -> Result<ProductRecord> {
    if overrides.is_complete() {
        return Ok(ProductRecord {
            name: overrides.name.clone().unwrap_or_default(),
            producer: overrides.producer.clone().unwrap_or_default(),
            ean: ean.to_string(),
        });
    }

    let mut record = source.lookup(ean, lang)?;
    if let Some(name) = &overrides.name {
        record.name = name.clone();
    }
    if let Some(producer) = &overrides.producer {
        record.producer = producer.clone();
    }
    Ok(record)
}

/// Pick the mirror host for a locale hint.
pub fn service_host(lang: &str) -> String {
    if lang.is_empty() || lang == WORLD {
        format!("{WORLD}.{SERVICE_DOMAIN}")
    } else {
        format!("{lang}.{SERVICE_DOMAIN}")
    }
}

#[derive(Deserialize)]
struct LookupEnvelope {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    product: ProductFields,
}

#[derive(Deserialize, Default)]
struct ProductFields {
    product_name: Option<String>,
    brands: Option<String>,
}

/// Blocking HTTP client for the Open Food Facts product endpoint.
pub struct OpenFoodFactsClient {
    client: Client,
    /// Test hook: replaces the `https://{host}` origin when set.
    base_url: Option<String>,
}

impl OpenFoodFactsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("labelgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Lookup(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: None,
        })
    }

    /// Point the client at a different origin. Used by tests to target a
    /// local stub server; the locale hint is ignored in this mode.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut c = Self::new()?;
        c.base_url = Some(base_url.into());
        Ok(c)
    }

    fn endpoint(&self, ean: &str, lang: &str) -> Result<Url> {
        let origin = match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", service_host(lang)),
        };
        Url::parse(&format!("{origin}/api/v0/product/{ean}.json"))
            .map_err(|e| Error::Lookup(format!("invalid lookup URL: {e}")))
    }
}

impl ProductSource for OpenFoodFactsClient {
    fn lookup(&self, ean: &str, lang: &str) -> Result<ProductRecord> {
        let url = self.endpoint(ean, lang)?;
        log::debug!("fetching product info from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Lookup(format!("HTTP GET failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Lookup(format!(
                "failed to fetch product info: HTTP {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .map_err(|e| Error::Lookup(format!("failed to read response body: {e}")))?;
        let envelope: LookupEnvelope = serde_json::from_str(&body)
            .map_err(|e| Error::Lookup(format!("invalid response body: {e}")))?;

        if envelope.status != 1 {
            return Err(Error::NotFound(ean.to_string()));
        }

        Ok(ProductRecord {
            name: envelope
                .product
                .product_name
                .unwrap_or_else(|| "Unknown Product".to_string()),
            producer: envelope
                .product
                .brands
                .unwrap_or_else(|| "Unknown Brand".to_string()),
            ean: ean.to_string(),
        })
    }
}
