//! Column header sanitization for warehouse result tables.

use lift_core::errors::SeriesError;

/// Characters removed outright from headers.
const REMOVE: &[char] = &[
    '.', ',', '$', '%', '^', '&', '£', '@', '#', '(', ')', '[', ']', '}', '{', '?',
];

/// Characters replaced by underscores.
const REPLACE: &[char] = &['-', ' '];

/// Sanitize column headers: lowercase, spaces and `-` become `_`,
/// punctuation is stripped, runs of `_` collapse, and leading/trailing
/// `_` are trimmed. Two headers that sanitize to the same name are an
/// error rather than a silent overwrite.
///
/// `"Impr.  A."` becomes `impr_a`; `"price [$]"` becomes `price`.
pub fn sanitize_headers<S: AsRef<str>>(headers: &[S]) -> Result<Vec<String>, SeriesError> {
    let sanitized: Vec<String> = headers
        .iter()
        .map(|header| sanitize_one(header.as_ref()))
        .collect();

    for (i, name) in sanitized.iter().enumerate() {
        if sanitized[..i].contains(name) {
            return Err(SeriesError::DuplicateColumn { name: name.clone() });
        }
    }

    Ok(sanitized)
}

fn sanitize_one(header: &str) -> String {
    let mapped: String = header
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if REMOVE.contains(&c) {
                None
            } else if REPLACE.contains(&c) {
                Some('_')
            } else {
                Some(c)
            }
        })
        .collect();

    mapped
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
