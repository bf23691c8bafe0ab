//! Download filename handling: sanitization and Content-Disposition.

/// Strips characters that are unsafe in filenames.
///
/// Removes path separators, characters reserved on common filesystems, and
/// control characters, then collapses whitespace. Degenerate titles fall
/// back to "download".
pub fn sanitize_filename(name: &str) -> String {
    const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !RESERVED.contains(c))
        .collect();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        "download".to_string()
    } else {
        collapsed
    }
}

/// Builds an attachment Content-Disposition header value.
///
/// ASCII filenames are emitted literally in the quoted `filename` form.
/// Names with non-ASCII characters additionally carry the RFC 5987
/// `filename*` parameter with the UTF-8 percent-encoded name, alongside an
/// ASCII fallback for clients that ignore the extended form.
pub fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        format!("attachment; filename=\"{}\"", escape_quoted(filename))
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            escape_quoted(&ascii_fallback(filename)),
            urlencoding::encode(filename)
        )
    }
}

/// Escapes backslashes and double quotes for the quoted-string form.
fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replaces non-ASCII characters with underscores.
fn ascii_fallback(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect()
}
