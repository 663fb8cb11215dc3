#![deny(missing_docs)]
//! A crate for generating HTML from a tree of values, with escaping by default and lazy,
//! streaming output.
//!
//! Elements are created through either [builder] or [html], and can hold any [Content]:
//! text (escaped), numbers, other elements, lists, lazy iterators, or trusted HTML.
//! Nothing is rendered until the tree is consumed, either all at once through
//! [HtmlGenerator::render] or [std::fmt::Display], or chunk by chunk through
//! [HtmlGenerator::chunks] and [HtmlGenerator::write_to].
//!
//! Anything that provides trusted HTML (through [TrustedHtml]) is embedded without
//! escaping, and every node of this crate is itself trusted HTML, so output can be passed
//! back and forth with other rendering systems without being escaped twice.
//!
//! # Example
//!
//! ```
//! use htmlgen::{builder::*, Document, HtmlGenerator, Tag};
//!
//! let items = ["one", "two & three"];
//! let doc = Document::new([html().children([
//!     head().child(title().child("Example")),
//!     body().child(
//!         div()
//!             .attr("class_", "container")
//!             .child(h1().child("Hello, World!"))
//!             .child(ul().child(htmlgen::Content::iter(items.map(|item| li().child(item))))),
//!     ),
//! ])]);
//! assert_eq!(
//!     doc.render(),
//!     concat!(
//!         "<!DOCTYPE html>\n<html><head><title>Example</title></head><body>",
//!         r#"<div class="container"><h1>Hello, World!</h1>"#,
//!         "<ul><li>one</li><li>two &amp; three</li></ul></div></body></html>",
//!     )
//! );
//! ```

pub mod builder;
pub mod routing;
pub mod util;

mod tracing_macros;

mod escape;
pub use escape::escape;

mod content;
pub use content::{Content, OnceIter};

mod chunks;
pub use chunks::{Chunk, Chunks};

mod generator;
pub use generator::HtmlGenerator;

mod safe;
pub use safe::{Deferred, MarkSafe, SafeString, TrustedHtml};

mod attribute;
pub use attribute::{normalize_attribute_name, Attribute, AttributeValue};

mod element;
pub use element::{tag, AnyElement, Element, ElementError, RawTextElement, Tag, VoidElement};

mod document;
pub use document::{Comment, Document, Fragment};

mod join;
pub use join::Join;

mod template;
pub use template::{format, FormatError, Template};

pub use htmlgen_elements::{category_of, is_standard_element, ElementCategory};

#[cfg(feature = "macros")]
pub use htmlgen_macro::html;
