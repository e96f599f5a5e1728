use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use labelgen::{LabelRequest, ProductOverrides};

/// Generate product labels from EAN codes
#[derive(Parser, Debug)]
#[command(
    name = "labelgen",
    version,
    about = "Generate product labels from EAN codes",
    after_help = "Examples:\n  labelgen 5449000000996 299 -o cola_label.png\n  labelgen 3017620422003 150 --price-format '{maj}.{min} zł'"
)]
struct Cli {
    /// EAN-13 barcode (13 digits)
    #[arg(value_parser = parse_ean)]
    ean: String,

    /// Price in minor currency units (e.g. 100 for $1.00)
    #[arg(allow_negative_numbers = true, value_parser = parse_price)]
    price: u32,

    /// Output PNG filename
    #[arg(short, long, default_value = "label.png")]
    output: PathBuf,

    /// Language code or domain prefix for Open Food Facts (e.g. en, pl, world)
    #[arg(short, long, default_value = "world")]
    lang: String,

    /// Price format template using placeholders {maj}, {min}, {price}
    #[arg(long, default_value = "${price}")]
    price_format: String,

    /// Override product name from the API
    #[arg(long)]
    name: Option<String>,

    /// Override producer/brand from the API
    #[arg(long)]
    producer: Option<String>,
}

fn parse_ean(s: &str) -> Result<String, String> {
    if s.len() == 13 && s.bytes().all(|b| b.is_ascii_digit()) {
        Ok(s.to_string())
    } else {
        Err("EAN must be exactly 13 digits".to_string())
    }
}

fn parse_price(s: &str) -> Result<u32, String> {
    let value: i64 = s
        .parse()
        .map_err(|_| "price must be an integer".to_string())?;
    if !(0..=i64::from(u32::MAX)).contains(&value) {
        return Err("price must be non-negative".to_string());
    }
    Ok(value as u32)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let request = LabelRequest {
        ean: cli.ean,
        price_minor_units: cli.price,
        output: cli.output,
        lang: cli.lang,
        price_format: cli.price_format,
        overrides: ProductOverrides {
            name: cli.name,
            producer: cli.producer,
        },
    };

    match labelgen::compose(&request) {
        Ok(label) => {
            println!("Label saved to {}", label.path.display());
            println!(
                "Dimensions: {}x{} pixels ({:.1}x{:.1}mm)",
                label.width,
                label.height,
                label.width_mm(),
                label.height_mm()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
