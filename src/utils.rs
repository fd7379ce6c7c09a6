use url::Url;

/// Scheme, host and non-default port of a URL, e.g. `https://example.com`
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncates a cell for table output, appending an ellipsis when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
