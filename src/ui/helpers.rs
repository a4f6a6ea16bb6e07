//! Shared formatting helpers for the page markup.

use askama::Template;

/// Thousands separator used by the `uz-UZ` number format (no-break space).
const GROUP_SEPARATOR: char = '\u{a0}';

/// Formats a price the way the page shows it: rounded to a whole number with
/// thousands grouped by no-break spaces.
///
/// Non-finite prices never reach here; records are validated on decode.
///
/// # Examples
///
/// ```
/// use listing_map::ui::helpers::format_price;
///
/// assert_eq!(format_price(3_500_000.0), "3\u{a0}500\u{a0}000");
/// assert_eq!(format_price(999.6), "1\u{a0}000");
/// assert_eq!(format_price(750.0), "750");
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Renders a template; a failure is logged and yields an empty fragment.
pub fn render_template<T: Template>(template: &T) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "template rendering failed");
        String::new()
    })
}

/// Formats an `f64` for a CSS or data attribute without trailing zeros.
#[must_use]
pub fn css_number(value: f64) -> String {
    let mut s = format!("{value:.6}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
