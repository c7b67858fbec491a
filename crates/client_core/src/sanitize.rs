//! Escaping of untrusted text before it reaches rendered output.

/// Replaces the five markup-significant characters with entities.
///
/// `&` is handled first so entities produced by later substitutions are not
/// escaped twice.
pub fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Inverse of [`escape`] for plain-text surfaces. `&amp;` goes last.
pub fn unescape(escaped: &str) -> String {
    escaped
        .replace("&#039;", "'")
        .replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}
