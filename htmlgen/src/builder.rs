//! Factory functions for every standard HTML element.
//!
//! Each function creates an element of the right kind for its name: [`Element`] for normal
//! elements, [`VoidElement`] for void elements (which cannot be given children), and
//! [`RawTextElement`] for `<script>` and `<style>` (which take their content up front).
//!
//! ```
//! use htmlgen::{builder::*, HtmlGenerator, Tag};
//!
//! let list = ul().attr("class_", "items").children([
//!     li().child("one"),
//!     li().child(b().child("two")),
//! ]);
//! assert_eq!(
//!     list.render(),
//!     r#"<ul class="items"><li>one</li><li><b>two</b></li></ul>"#
//! );
//! ```
//!
//! Custom elements can be created with [`Element::new`], or with [`crate::tag`] when the
//! name is only known at runtime.

use crate::{Content, Element, RawTextElement, VoidElement};

macro_rules! normal_builders {
    ($($tag_ident:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($tag_ident), ">` element.")]
            pub fn $tag_ident() -> Element {
                Element::new(stringify!($tag_ident))
            }
        )*
        /// The names of all normal elements with a factory function.
        pub const NORMAL_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
normal_builders! {
    html, body, head, title, address, article, aside, footer, header,
    h1, h2, h3, h4, h5, h6, hgroup, main, nav, section,
    blockquote, dd, div, dl, dt, figcaption, figure, li, ol, p, pre, ul,
    a, abbr, b, bdi, bdo, cite, code, data, dfn, em, i, kbd, mark, q,
    rb, rp, rt, rtc, ruby, s, samp, small, span, strong, sub, sup, time, u, var,
    audio, map, video, iframe, object, picture, canvas, noscript,
    del, ins, caption, colgroup, table, tbody, td, tfoot, th, thead, tr,
    button, datalist, fieldset, form, label, legend, meter, optgroup, option,
    output, progress, select, textarea, details, dialog, menu, summary, slot, template,
}

macro_rules! void_builders {
    ($($tag_ident:ident),* $(,)?) => {
        $(
            #[doc = concat!("Create a `<", stringify!($tag_ident), ">` void element.")]
            pub fn $tag_ident() -> VoidElement {
                VoidElement::new(stringify!($tag_ident))
            }
        )*
        /// The names of all void elements with a factory function.
        pub const VOID_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
void_builders! {
    area, base, br, col, embed, hr, img, input, link, meta, param, source, track, wbr,
}

macro_rules! raw_text_builders {
    ($($tag_ident:ident),* $(,)?) => {
        $(
            #[doc = concat!(
                "Create a `<", stringify!($tag_ident), ">` element.\n\n",
                "The content is rendered without escaping; see [`RawTextElement`]."
            )]
            pub fn $tag_ident(content: impl Into<Content>) -> RawTextElement {
                RawTextElement::new(stringify!($tag_ident), content)
            }
        )*
        /// The names of all raw text elements with a factory function.
        pub const RAW_TEXT_TAGS: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
raw_text_builders! { script, style }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HtmlGenerator, Tag};
    use htmlgen_elements::{category_of, ElementCategory, STANDARD_ELEMENTS};

    #[test]
    fn every_standard_element_has_a_factory() {
        let mut all: Vec<&str> = NORMAL_TAGS
            .iter()
            .chain(VOID_TAGS)
            .chain(RAW_TEXT_TAGS)
            .copied()
            .collect();
        let mut standard = STANDARD_ELEMENTS.to_vec();
        all.sort_unstable();
        standard.sort_unstable();
        assert_eq!(all, standard);
    }

    #[test]
    fn factories_match_categories() {
        for name in NORMAL_TAGS {
            assert_eq!(category_of(name), ElementCategory::Normal, "{name}");
        }
        for name in VOID_TAGS {
            assert_eq!(category_of(name), ElementCategory::Void, "{name}");
        }
        for name in RAW_TEXT_TAGS {
            assert_eq!(category_of(name), ElementCategory::RawText, "{name}");
        }
    }

    #[test]
    fn nested_builders() {
        let page = html().children([
            Content::from(head().child(title().child("a & b"))),
            body()
                .child(p().attr("data_n", 5).child(br()))
                .child(style("p > a { color: red }"))
                .into(),
        ]);
        assert_eq!(
            page.render(),
            concat!(
                "<html><head><title>a &amp; b</title></head>",
                r#"<body><p data-n="5"><br></p><style>p > a { color: red }</style></body></html>"#
            )
        );
    }
}
