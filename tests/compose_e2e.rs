//! End-to-end composition with a stubbed metadata source.

use labelgen::{
    compose_with_source, Error, LabelRequest, ProductOverrides, ProductRecord, ProductSource,
    Result,
};

struct StubSource;

impl ProductSource for StubSource {
    fn lookup(&self, ean: &str, _lang: &str) -> Result<ProductRecord> {
        Ok(ProductRecord {
            name: "Coca-Cola".to_string(),
            producer: "The Coca-Cola Company".to_string(),
            ean: ean.to_string(),
        })
    }
}

struct PanickingSource;

impl ProductSource for PanickingSource {
    fn lookup(&self, _ean: &str, _lang: &str) -> Result<ProductRecord> {
        panic!("network lookup issued despite complete overrides");
    }
}

struct FailingSource;

impl ProductSource for FailingSource {
    fn lookup(&self, _ean: &str, _lang: &str) -> Result<ProductRecord> {
        Err(Error::Lookup("failed to fetch product info: HTTP 500".into()))
    }
}

fn request_into(dir: &tempfile::TempDir) -> LabelRequest {
    let mut req = LabelRequest::new("5449000000996", 299);
    req.output = dir.path().join("label.png");
    req
}

#[test]
fn composes_a_label_with_expected_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let req = request_into(&dir);

    let label = compose_with_source(&req, &StubSource).unwrap();
    assert_eq!(label.height, 48 * 8);
    // wider than margin plus both paddings, i.e. the layout is non-degenerate
    assert!(label.width > 40 + 2 * 24);
    assert_eq!(label.path, req.output);

    let bytes = std::fs::read(&label.path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn repeat_runs_are_dimension_stable() {
    let dir = tempfile::tempdir().unwrap();
    let req = request_into(&dir);

    let first = compose_with_source(&req, &StubSource).unwrap();
    let second = compose_with_source(&req, &StubSource).unwrap();
    assert_eq!((first.width, first.height), (second.width, second.height));
}

#[test]
fn complete_overrides_never_touch_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request_into(&dir);
    req.overrides = ProductOverrides {
        name: Some("House Cola".to_string()),
        producer: Some("Local Brand".to_string()),
    };

    let label = compose_with_source(&req, &PanickingSource).unwrap();
    assert!(label.path.exists());
}

#[test]
fn lookup_failure_leaves_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let req = request_into(&dir);

    let err = compose_with_source(&req, &FailingSource).unwrap_err();
    assert!(matches!(err, Error::Lookup(_)));
    assert!(!req.output.exists());
}

#[test]
fn bad_price_template_aborts_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request_into(&dir);
    req.price_format = "{bogus}".to_string();

    let err = compose_with_source(&req, &StubSource).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(!req.output.exists());
}

#[test]
fn invalid_check_digit_is_an_encoding_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut req = request_into(&dir);
    req.ean = "5449000000997".to_string();

    let err = compose_with_source(&req, &StubSource).unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
    assert!(!req.output.exists());
}

#[test]
fn longer_price_text_widens_only_the_right_region() {
    let dir = tempfile::tempdir().unwrap();

    let mut short = request_into(&dir);
    short.output = dir.path().join("short.png");
    let short_label = compose_with_source(&short, &StubSource).unwrap();

    let mut long = request_into(&dir);
    long.output = dir.path().join("long.png");
    long.price_format = "{maj}.{min} USD (incl. tax)".to_string();
    let long_label = compose_with_source(&long, &StubSource).unwrap();

    assert!(long_label.width > short_label.width);
    assert_eq!(long_label.height, short_label.height);
}
