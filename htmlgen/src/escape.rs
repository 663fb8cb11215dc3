use std::borrow::Cow;

use crate::Chunk;

/// Escape text for inclusion in HTML, either as element content or inside a quoted
/// attribute value.
///
/// `&`, `<`, `>`, `"` and `'` are replaced with `&amp;`, `&lt;`, `&gt;`, `&quot;` and
/// `&#x27;`. Text that needs no escaping is returned borrowed.
///
/// ```
/// assert_eq!(htmlgen::escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
/// assert!(matches!(htmlgen::escape("plain"), std::borrow::Cow::Borrowed("plain")));
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

/// Escape an owned chunk, keeping the original allocation (or static borrow) when
/// nothing needed escaping.
pub(crate) fn escape_chunk(text: Chunk) -> Chunk {
    let escaped = match escape(&text) {
        Cow::Owned(escaped) => Some(escaped),
        Cow::Borrowed(_) => None,
    };
    match escaped {
        Some(escaped) => Cow::Owned(escaped),
        None => text,
    }
}
