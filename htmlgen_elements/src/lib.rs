//! The fixed table of standard HTML element names and their structural categories.
//!
//! This is shared between `htmlgen` (which picks the node kind for a name at runtime)
//! and `htmlgen_macro` (which does the same at compile time).

/// The structural category of an HTML element.
///
/// See <https://html.spec.whatwg.org/multipage/syntax.html#elements-2>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// An element with an open tag, children, and a close tag.
    Normal,
    /// An element with no close tag and no children (e.g. `<br>`).
    Void,
    /// An element whose content is not entity-decoded by browsers (`<script>`, `<style>`).
    RawText,
}

/// Void elements, as listed by the HTML standard.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements.
///
/// Escapable raw text elements (`<title>`, `<textarea>`) are treated as normal elements.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Every standard (non-SVG) HTML element name, in lowercase.
pub const STANDARD_ELEMENTS: &[&str] = &[
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6", "hgroup", "main", "nav",
    "section", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "hr", "li", "ol",
    "p", "pre", "ul", "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em",
    "i", "kbd", "mark", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "small", "span",
    "strong", "sub", "sup", "time", "u", "var", "wbr", "area", "audio", "img", "map", "track",
    "video", "embed", "iframe", "object", "param", "picture", "source", "canvas", "noscript",
    "script", "del", "ins", "caption", "col", "colgroup", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "button", "datalist", "fieldset", "form", "input", "label", "legend", "meter",
    "optgroup", "option", "output", "progress", "select", "textarea", "details", "dialog", "menu",
    "summary", "slot", "template",
];

/// Get the category of an element by name.
///
/// Unknown names (custom elements, SVG, typos) are [`ElementCategory::Normal`]; this is
/// not a validator.
pub fn category_of(name: &str) -> ElementCategory {
    if VOID_ELEMENTS.contains(&name) {
        ElementCategory::Void
    } else if RAW_TEXT_ELEMENTS.contains(&name) {
        ElementCategory::RawText
    } else {
        ElementCategory::Normal
    }
}

/// Returns `true` if `name` is one of [`STANDARD_ELEMENTS`].
pub fn is_standard_element(name: &str) -> bool {
    STANDARD_ELEMENTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorises_known_elements() {
        assert_eq!(category_of("br"), ElementCategory::Void);
        assert_eq!(category_of("img"), ElementCategory::Void);
        assert_eq!(category_of("script"), ElementCategory::RawText);
        assert_eq!(category_of("style"), ElementCategory::RawText);
        assert_eq!(category_of("div"), ElementCategory::Normal);
        assert_eq!(category_of("title"), ElementCategory::Normal);
    }

    #[test]
    fn unknown_elements_are_normal() {
        assert_eq!(category_of("my-widget"), ElementCategory::Normal);
        assert!(!is_standard_element("my-widget"));
    }

    #[test]
    fn every_categorised_element_is_standard() {
        for name in VOID_ELEMENTS.iter().chain(RAW_TEXT_ELEMENTS) {
            assert!(is_standard_element(name), "{name} missing from table");
        }
    }
}
