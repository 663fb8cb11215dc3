use std::borrow::Cow;

use crate::attribute::{open_tag, set_attribute};
use crate::generator::impl_node;
use crate::{Attribute, AttributeValue, Chunks, Content, HtmlGenerator};

/// A balanced fragment of zero or more nodes, rendered in sequence with no wrapping
/// markup.
///
/// You rarely need this, since any list can be passed as a child directly. It is useful
/// when several nodes must be rendered to a single string, e.g. the body of an email.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    /// The children of the fragment.
    pub children: Vec<Content>,
}
impl Fragment {
    /// Create a fragment from a list of children.
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
        }
    }
}
impl HtmlGenerator for Fragment {
    fn chunks(&self) -> Chunks {
        Chunks::new().children(&self.children)
    }
}

/// A complete HTML document: the `<!DOCTYPE html>` line followed by the children.
///
/// ```
/// use htmlgen::{builder::{body, head, title}, Document, HtmlGenerator};
///
/// let document = Document::new([head().child(title().child("Hi")), body()])
///     .html_attr("lang", "en");
/// assert_eq!(
///     document.render(),
///     "<!DOCTYPE html>\n<html lang=\"en\"><head><title>Hi</title></head><body></body></html>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The children of the document.
    pub children: Vec<Content>,
    /// Attributes for a wrapping `<html>` element. When empty, the children are rendered
    /// directly after the doctype.
    pub html_attributes: Vec<Attribute>,
}
impl Document {
    /// Create a document from a list of children.
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        Self {
            children: children.into_iter().map(Into::into).collect(),
            html_attributes: Vec::new(),
        }
    }

    /// Set an attribute on the `<html>` element, which wraps the children once any
    /// attribute is set.
    #[must_use]
    pub fn html_attr(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        set_attribute(&mut self.html_attributes, Attribute::new(key, value));
        self
    }
}
impl HtmlGenerator for Document {
    fn chunks(&self) -> Chunks {
        let chunks = Chunks::new().chunk("<!DOCTYPE html>\n");
        if self.html_attributes.is_empty() {
            return chunks.children(&self.children);
        }
        chunks
            .chunk(open_tag("html", &self.html_attributes))
            .children(&self.children)
            .chunk("</html>")
    }
}

/// An HTML comment.
///
/// The content is converted to text without escaping, so it must not contain `-->`.
#[derive(Debug, Clone)]
pub struct Comment {
    /// The content of the comment.
    pub content: Content,
}
impl Comment {
    /// Create a comment.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
impl HtmlGenerator for Comment {
    fn chunks(&self) -> Chunks {
        Chunks::new()
            .chunk("<!--")
            .raw_text(self.content.clone())
            .chunk("-->")
    }
}

impl_node!(Fragment, Document, Comment);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{body, div, head, html, i, script, title};
    use crate::{MarkSafe, Tag};

    #[test]
    fn comment_is_not_escaped() {
        assert_eq!(
            Comment::new("My favorite operators are > and <!").render(),
            "<!--My favorite operators are > and <!-->"
        );
    }

    #[test]
    fn fragment_has_no_markup() {
        let fragment = Fragment::new([Content::from("a & b"), i().into(), 3.into()]);
        assert_eq!(fragment.render(), "a &amp; b<i></i>3");
        assert_eq!(Fragment::default().render(), "");
    }

    #[test]
    fn full_document() {
        let document = Document::new([html().children([
            Content::from(head().child(title().child("Hello, World!"))),
            body()
                .child(div().attr("id", "content").child("Hi & bye"))
                .child(script(r#"console.log("Hello, World!");"#))
                .child(MarkSafe::new("<hr>"))
                .into(),
        ])]);
        assert_eq!(
            document.to_string(),
            concat!(
                "<!DOCTYPE html>\n",
                "<html><head><title>Hello, World!</title></head><body>",
                r#"<div id="content">Hi &amp; bye</div>"#,
                r#"<script>console.log("Hello, World!");</script>"#,
                "<hr></body></html>"
            )
        );
    }

    #[test]
    fn html_attributes_wrap_children() {
        let document = Document::new(["x"]).html_attr("lang", "en").html_attr("data_a", true);
        assert_eq!(
            document.render(),
            "<!DOCTYPE html>\n<html lang=\"en\" data-a>x</html>"
        );
        let unwrapped = Document::new(["x"]).html_attr("lang", None::<&str>);
        assert_eq!(unwrapped.render(), "<!DOCTYPE html>\nx");
    }
}
