//! HTTP API handlers for dit-api

pub mod campaigns;
pub mod donations;
pub mod donors;
pub mod feedback;
pub mod health;
pub mod impact;
pub mod notifications;
pub mod testimonials;

pub use health::health_routes;

/// Strip angle brackets, trim, then cap at `max_chars` characters
pub(crate) fn sanitize(input: &str, max_chars: usize) -> String {
    input
        .replace(['<', '>'], "")
        .trim()
        .chars()
        .take(max_chars)
        .collect()
}

/// Trimmed text of an optional field, `None` when missing or blank
pub(crate) fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
