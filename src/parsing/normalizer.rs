//! Line normalization.
//!
//! Raw extracted text carries page banners, column headers and irregular
//! spacing. Normalization collapses whitespace and drops every line that is
//! empty or contains a noise substring, keeping the survivors in order.

/// Collapses every whitespace run to one space and trims both ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true if `line` contains any of `noise_patterns`.
pub fn is_noise(line: &str, noise_patterns: &[String]) -> bool {
    noise_patterns
        .iter()
        .any(|pattern| line.contains(pattern.as_str()))
}

/// Normalizes an ordered sequence of raw lines.
///
/// # Examples
///
/// ```
/// use shift_report_parser::config::ParserConfig;
/// use shift_report_parser::parsing::normalize_lines;
///
/// let config = ParserConfig::default();
/// let raw = vec![
///     "Scheduled vs Actual Hours",
///     "  Smith,   John    5/1/2024 ",
///     "",
///     "Page 1 of 3",
/// ];
/// assert_eq!(
///     normalize_lines(raw, &config.noise_patterns),
///     vec!["Smith, John 5/1/2024".to_string()]
/// );
/// ```
pub fn normalize_lines<I, S>(lines: I, noise_patterns: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| collapse_whitespace(line.as_ref()))
        .filter(|line| !line.is_empty() && !is_noise(line, noise_patterns))
        .collect()
}
