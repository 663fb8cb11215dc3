use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{HtmlGenerator, SafeString, TrustedHtml};

/// Anything that can appear as a child in the tree.
///
/// Content is resolved into chunks in a fixed order, matching the variant documentation
/// below: empty content is skipped, nodes are spliced in, trusted values are emitted
/// verbatim, text is escaped, lists and iterators are flattened, and any other value is
/// formatted with [`fmt::Display`] and escaped.
///
/// Most values convert into content through [`From`]:
///
/// - `None` and `false` become [`Content::Empty`], so `cond.then(|| ...)` and `cond && ...`
///   style children disappear. `0`, `""` and `true` are real content.
/// - string types become [`Content::Text`]; they are never split into characters.
/// - numbers and `char` become [`Content::Display`].
/// - `Vec`s and arrays become [`Content::List`].
/// - the generator types of this crate become [`Content::Node`].
/// - [`SafeString`] becomes [`Content::Trusted`].
///
/// Cloning content is shallow: nodes, trusted values and iterators are shared.
#[derive(Clone, Default)]
pub enum Content {
    /// Renders nothing.
    #[default]
    Empty,
    /// A nested generator, whose chunks are emitted in place.
    Node(Rc<dyn HtmlGenerator>),
    /// A value providing its own trusted HTML, emitted without escaping.
    Trusted(Rc<dyn TrustedHtml>),
    /// Plain text, escaped on output.
    Text(Cow<'static, str>),
    /// A sequence of content, rendered in order.
    List(Vec<Content>),
    /// A lazy, one-shot sequence of content.
    Iter(OnceIter),
    /// Any other value, formatted with [`fmt::Display`] and escaped on output.
    Display(Rc<dyn fmt::Display>),
}
impl Content {
    /// Create text content.
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Content::Text(text.into())
    }

    /// Wrap any generator, including ones defined outside this crate.
    pub fn node(node: impl HtmlGenerator + 'static) -> Self {
        Content::Node(Rc::new(node))
    }

    /// Wrap a value that renders its own trusted HTML.
    pub fn trusted(value: impl TrustedHtml + 'static) -> Self {
        Content::Trusted(Rc::new(value))
    }

    /// Wrap a value that will be formatted with [`fmt::Display`] and escaped.
    pub fn display(value: impl fmt::Display + 'static) -> Self {
        Content::Display(Rc::new(value))
    }

    /// Wrap an iterator. Items are pulled lazily, one at a time, as the output is consumed.
    ///
    /// The iterator is consumed by the first render; see [`OnceIter`].
    pub fn iter<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content> + 'static,
        I::IntoIter: 'static,
    {
        Content::Iter(OnceIter::new(iter))
    }

    /// Returns `true` if the content is [`Empty`].
    ///
    /// [`Empty`]: Content::Empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Empty => f.write_str("Empty"),
            Content::Node(_) => f.write_str("Node(..)"),
            Content::Trusted(_) => f.write_str("Trusted(..)"),
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::List(items) => f.debug_tuple("List").field(items).finish(),
            Content::Iter(_) => f.write_str("Iter(..)"),
            Content::Display(value) => write!(f, "Display({value})"),
        }
    }
}

/// A shared, one-shot iterator of [`Content`].
///
/// Clones share the same underlying iterator, so a shallow copy of an element (see
/// [`crate::Tag::with_attrs`]) drains the same sequence as the original. Rendering an
/// element twice renders the iterator's items only the first time.
#[derive(Clone)]
pub struct OnceIter(Rc<RefCell<Box<dyn Iterator<Item = Content>>>>);
impl OnceIter {
    /// Wrap an iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Content> + 'static,
        I::IntoIter: 'static,
    {
        Self(Rc::new(RefCell::new(Box::new(
            iter.into_iter().map(Into::into),
        ))))
    }

    /// Pull the next item.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly, i.e. if producing an item renders the tree that
    /// contains this iterator.
    pub fn next_item(&self) -> Option<Content> {
        self.0.borrow_mut().next()
    }
}
impl fmt::Debug for OnceIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnceIter(..)")
    }
}

impl From<&'static str> for Content {
    fn from(value: &'static str) -> Self {
        Content::Text(Cow::Borrowed(value))
    }
}
impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(Cow::Owned(value))
    }
}
impl From<&String> for Content {
    fn from(value: &String) -> Self {
        Content::Text(Cow::Owned(value.clone()))
    }
}
impl From<Cow<'static, str>> for Content {
    fn from(value: Cow<'static, str>) -> Self {
        Content::Text(value)
    }
}
impl From<bool> for Content {
    fn from(value: bool) -> Self {
        if value {
            Content::display(value)
        } else {
            Content::Empty
        }
    }
}
impl From<()> for Content {
    fn from(_: ()) -> Self {
        Content::Empty
    }
}
impl From<SafeString> for Content {
    fn from(value: SafeString) -> Self {
        Content::Trusted(Rc::new(value))
    }
}
impl From<OnceIter> for Content {
    fn from(value: OnceIter) -> Self {
        Content::Iter(value)
    }
}
impl From<Rc<dyn HtmlGenerator>> for Content {
    fn from(value: Rc<dyn HtmlGenerator>) -> Self {
        Content::Node(value)
    }
}
impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Content::Empty,
        }
    }
}
impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(value: Vec<T>) -> Self {
        Content::List(value.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Content>, const N: usize> From<[T; N]> for Content {
    fn from(value: [T; N]) -> Self {
        Content::List(value.into_iter().map(Into::into).collect())
    }
}

macro_rules! display_content {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Content {
                fn from(value: $ty) -> Self {
                    Content::display(value)
                }
            }
        )*
    };
}
display_content! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, char
}
