//! Price formatting from minor currency units.
//!
//! Prices are carried as integer minor units (cents) to avoid floating
//! point. A display string is produced from a template with three
//! placeholders:
//!
//! - `{maj}` — major units, no padding
//! - `{min}` — minor units, two digits, zero padded
//! - `{price}` — `{maj}.{min}`
//!
//! `{{` and `}}` escape literal braces. Any other placeholder name is a
//! [`Error::Format`].

use crate::{Error, Result};

/// Default template used by the CLI: `$` followed by the full price.
pub const DEFAULT_TEMPLATE: &str = "${price}";

/// Render `minor_units` through `template`.
///
/// # Examples
///
/// ```
/// assert_eq!(labelgen::format_price(299, "${price}").unwrap(), "$2.99");
/// assert_eq!(labelgen::format_price(150, "{maj}.{min} zł").unwrap(), "1.50 zł");
/// ```
pub fn format_price(minor_units: u32, template: &str) -> Result<String> {
    let maj = minor_units / 100;
    let min = minor_units % 100;

    let mut out = String::with_capacity(template.len() + 4);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(Error::Format(format!(
                                "unterminated placeholder in template: {template:?}"
                            )))
                        }
                    }
                }
                match name.as_str() {
                    "maj" => out.push_str(&maj.to_string()),
                    "min" => out.push_str(&format!("{min:02}")),
                    "price" => out.push_str(&format!("{maj}.{min:02}")),
                    other => {
                        return Err(Error::Format(format!("unknown placeholder: {{{other}}}")))
                    }
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(Error::Format(format!(
                        "unmatched '}}' in template: {template:?}"
                    )));
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}
