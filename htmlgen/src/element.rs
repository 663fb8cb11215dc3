use std::borrow::Cow;
use std::fmt;

use htmlgen_elements::{category_of, ElementCategory};

use crate::attribute::{open_tag, set_attribute};
use crate::generator::impl_node;
use crate::{util, Attribute, AttributeValue, Chunks, Content, HtmlGenerator, MarkSafe};

/// Operations shared by every element type: attribute access, cloning with extra
/// attributes, and access to the open and close tags.
///
/// The `with_*` methods return a shallow clone: the clone has the same name, a copy of the
/// child list (sharing the children themselves), and a merged attribute list. The original
/// element is left untouched.
pub trait Tag: Clone {
    /// The tag name.
    fn name(&self) -> &str;

    /// The attributes, in insertion order.
    fn attributes(&self) -> &[Attribute];

    /// Mutable access to the attributes.
    fn attributes_mut(&mut self) -> &mut Vec<Attribute>;

    /// Set an attribute, returning the element. See [`Tag::set_attr`].
    #[must_use]
    fn attr(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<AttributeValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute.
    ///
    /// The name is normalized (see [`crate::normalize_attribute_name`]). Setting an
    /// existing attribute overwrites its value in place; setting an absent value (`None`,
    /// `false`) removes it.
    fn set_attr(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<AttributeValue>) {
        set_attribute(self.attributes_mut(), Attribute::new(key, value));
    }

    /// Get the value of an attribute by (unnormalized) name.
    fn get_attr(&self, key: &str) -> Option<&AttributeValue> {
        let key = crate::normalize_attribute_name(key);
        self.attributes()
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    /// Remove an attribute by (unnormalized) name, returning its value.
    fn remove_attr(&mut self, key: &str) -> Option<AttributeValue> {
        let key = crate::normalize_attribute_name(key);
        let attributes = self.attributes_mut();
        let index = attributes.iter().position(|a| a.key == key)?;
        Some(attributes.remove(index).value)
    }

    /// Clone the element with additional attributes.
    ///
    /// Names are normalized as in [`Tag::set_attr`]; an absent value removes an existing
    /// attribute from the clone.
    #[must_use]
    fn with_attrs<K, V>(&self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<AttributeValue>,
    {
        let mut clone = self.clone();
        for (key, value) in attributes {
            clone.set_attr(key, value);
        }
        clone
    }

    /// Clone the element with additional classes appended to its `class` attribute.
    ///
    /// If the result has no classes at all, no `class` attribute is added.
    #[must_use]
    fn with_classes<'a, I, C>(&self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<&'a str>>,
    {
        let mut clone = self.clone();
        clone.add_classes(classes);
        clone
    }

    /// Clone the element with additional declarations appended to its `style` attribute.
    #[must_use]
    fn with_styles<'a, I, S>(&self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<&'a str>>,
    {
        let mut clone = self.clone();
        clone.add_styles(styles);
        clone
    }

    /// Append classes to the `class` attribute in place.
    fn add_classes<'a, I, C>(&mut self, classes: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<&'a str>>,
    {
        let extra = util::classes(classes);
        let existing = self.get_attr("class").and_then(AttributeValue::as_str);
        let joined = util::classes([existing, Some(extra.as_str())]);
        if !joined.is_empty() {
            self.set_attr("class", joined);
        }
    }

    /// Append style declarations to the `style` attribute in place.
    fn add_styles<'a, I, S>(&mut self, styles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Option<&'a str>>,
    {
        let extra = util::styles(styles);
        let existing = self.get_attr("style").and_then(AttributeValue::as_str);
        let joined = util::styles([existing, Some(extra.as_str())]);
        if !joined.is_empty() {
            self.set_attr("style", joined);
        }
    }

    /// The open tag alone, e.g. for splicing into a translated string with
    /// [`crate::format`].
    fn open_tag(&self) -> MarkSafe {
        MarkSafe::new(open_tag(self.name(), self.attributes()))
    }

    /// The close tag alone.
    fn close_tag(&self) -> MarkSafe {
        MarkSafe::new(format!("</{}>", self.name()))
    }
}

/// A normal HTML element: open tag, children, close tag.
///
/// `children` and `attributes` are public and may be changed freely after construction
/// and before rendering, e.g. by wrapper components that post-process their children.
///
/// ```
/// use htmlgen::{Element, HtmlGenerator, Tag};
///
/// let element = Element::new("div").attr("attr", "b").child("a");
/// assert_eq!(element.render(), r#"<div attr="b">a</div>"#);
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    /// The name of the tag.
    pub name: Cow<'static, str>,
    /// The attributes of the tag.
    pub attributes: Vec<Attribute>,
    /// The children of the tag.
    pub children: Vec<Content>,
}
impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Content>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}
impl Tag for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
}
impl HtmlGenerator for Element {
    fn chunks(&self) -> Chunks {
        Chunks::new()
            .chunk(open_tag(&self.name, &self.attributes))
            .children(&self.children)
            .chunk(format!("</{}>", self.name))
    }
}

/// A void HTML element (e.g. `<br>`, `<img>`): an open tag with no children and no close
/// tag.
///
/// There is no way to give a `VoidElement` children; the dynamic constructor [`tag`]
/// reports an error instead.
///
/// ```compile_fail
/// use htmlgen::builder::br;
///
/// let _ = br().child("x");
/// ```
///
/// The same holds for `html!`:
///
/// ```compile_fail
/// use htmlgen::html;
///
/// let _ = html! { <br>"x"</br> };
/// ```
#[derive(Debug, Clone)]
pub struct VoidElement {
    /// The name of the tag.
    pub name: Cow<'static, str>,
    /// The attributes of the tag.
    pub attributes: Vec<Attribute>,
}
impl VoidElement {
    /// Create a void element with no attributes.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }
}
impl Tag for VoidElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }

    fn close_tag(&self) -> MarkSafe {
        MarkSafe::new("")
    }
}
impl HtmlGenerator for VoidElement {
    fn chunks(&self) -> Chunks {
        Chunks::new().chunk(open_tag(&self.name, &self.attributes))
    }
}

/// A raw text element (`<script>`, `<style>`).
///
/// Browsers do not decode entities inside these elements, so the content is converted to
/// text **without escaping**. It is up to the caller to make sure the content does not
/// contain the element's close tag.
///
/// `html!` accepts at most one child for these elements:
///
/// ```compile_fail
/// use htmlgen::html;
///
/// let _ = html! { <script>"a" "b"</script> };
/// ```
///
/// Content that is itself a generator is rendered, which is handy for client-side
/// templates:
///
/// ```
/// use htmlgen::{builder::{div, script}, HtmlGenerator, Tag};
///
/// let template = script(div().child("<x>")).attr("type", "text/template");
/// assert_eq!(
///     template.render(),
///     r#"<script type="text/template"><div>&lt;x&gt;</div></script>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RawTextElement {
    /// The name of the tag.
    pub name: Cow<'static, str>,
    /// The attributes of the tag.
    pub attributes: Vec<Attribute>,
    /// The content of the tag.
    pub content: Content,
}
impl RawTextElement {
    /// Create a raw text element.
    pub fn new(name: impl Into<Cow<'static, str>>, content: impl Into<Content>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content: content.into(),
        }
    }
}
impl Tag for RawTextElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attributes
    }
}
impl HtmlGenerator for RawTextElement {
    fn chunks(&self) -> Chunks {
        Chunks::new()
            .chunk(open_tag(&self.name, &self.attributes))
            .raw_text(self.content.clone())
            .chunk(format!("</{}>", self.name))
    }
}

/// Error returned when an element is given children it cannot hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementError {
    /// A void element was given children.
    VoidChildren {
        /// The name of the element.
        name: String,
    },
    /// A raw text element was given more than one piece of content.
    RawTextChildren {
        /// The name of the element.
        name: String,
        /// How many pieces of content it would have held.
        count: usize,
    },
}
impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementError::VoidChildren { name } => {
                write!(f, "Void element <{name}> cannot have children")
            }
            ElementError::RawTextChildren { name, count } => write!(
                f,
                "Raw text element <{name}> takes a single piece of content, got {count}"
            ),
        }
    }
}
impl std::error::Error for ElementError {}

/// An element of any category, chosen by name from the standard element table.
#[derive(Debug, Clone)]
pub enum AnyElement {
    /// A normal element.
    Normal(Element),
    /// A void element.
    Void(VoidElement),
    /// A raw text element.
    RawText(RawTextElement),
}
impl AnyElement {
    /// Create an element, picking its kind with [`htmlgen_elements::category_of`].
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        match category_of(&name) {
            ElementCategory::Normal => AnyElement::Normal(Element::new(name)),
            ElementCategory::Void => AnyElement::Void(VoidElement::new(name)),
            ElementCategory::RawText => {
                AnyElement::RawText(RawTextElement::new(name, Content::Empty))
            }
        }
    }

    /// Add children to the element.
    ///
    /// # Errors
    ///
    /// Void elements accept no children at all, and raw text elements accept a single piece
    /// of content.
    pub fn with_children<I>(self, children: I) -> Result<Self, ElementError>
    where
        I: IntoIterator,
        I::Item: Into<Content>,
    {
        let mut children: Vec<Content> = children.into_iter().map(Into::into).collect();
        match self {
            AnyElement::Normal(element) => Ok(AnyElement::Normal(element.children(children))),
            AnyElement::Void(element) if children.is_empty() => Ok(AnyElement::Void(element)),
            AnyElement::Void(element) => {
                crate::tracing_macros::debug!(name = %element.name, "void element given children");
                Err(ElementError::VoidChildren {
                    name: element.name.into_owned(),
                })
            }
            AnyElement::RawText(mut element) => {
                let existing = usize::from(!element.content.is_empty());
                match (existing + children.len(), children.pop()) {
                    (_, None) => Ok(AnyElement::RawText(element)),
                    (1, Some(content)) => {
                        element.content = content;
                        Ok(AnyElement::RawText(element))
                    }
                    (count, Some(_)) => Err(ElementError::RawTextChildren {
                        name: element.name.into_owned(),
                        count,
                    }),
                }
            }
        }
    }
}
impl Tag for AnyElement {
    fn name(&self) -> &str {
        match self {
            AnyElement::Normal(element) => element.name(),
            AnyElement::Void(element) => element.name(),
            AnyElement::RawText(element) => element.name(),
        }
    }

    fn attributes(&self) -> &[Attribute] {
        match self {
            AnyElement::Normal(element) => element.attributes(),
            AnyElement::Void(element) => element.attributes(),
            AnyElement::RawText(element) => element.attributes(),
        }
    }

    fn attributes_mut(&mut self) -> &mut Vec<Attribute> {
        match self {
            AnyElement::Normal(element) => element.attributes_mut(),
            AnyElement::Void(element) => element.attributes_mut(),
            AnyElement::RawText(element) => element.attributes_mut(),
        }
    }

    fn close_tag(&self) -> MarkSafe {
        match self {
            AnyElement::Normal(element) => element.close_tag(),
            AnyElement::Void(element) => element.close_tag(),
            AnyElement::RawText(element) => element.close_tag(),
        }
    }
}
impl HtmlGenerator for AnyElement {
    fn chunks(&self) -> Chunks {
        match self {
            AnyElement::Normal(element) => element.chunks(),
            AnyElement::Void(element) => element.chunks(),
            AnyElement::RawText(element) => element.chunks(),
        }
    }
}

/// Create an element of the right kind for `name`, with the given children.
///
/// ```
/// use htmlgen::{tag, ElementError, HtmlGenerator};
///
/// assert_eq!(tag("p", ["hi"]).unwrap().render(), "<p>hi</p>");
/// assert_eq!(tag("br", Vec::<&str>::new()).unwrap().render(), "<br>");
/// assert!(matches!(tag("br", ["x"]), Err(ElementError::VoidChildren { .. })));
/// ```
///
/// # Errors
///
/// See [`AnyElement::with_children`].
pub fn tag<I>(name: impl Into<Cow<'static, str>>, children: I) -> Result<AnyElement, ElementError>
where
    I: IntoIterator,
    I::Item: Into<Content>,
{
    AnyElement::new(name).with_children(children)
}

impl_node!(Element, VoidElement, RawTextElement, AnyElement);
