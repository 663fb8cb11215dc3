use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::generator::impl_node;
use crate::{Chunk, Chunks, HtmlGenerator};

/// A value that can render itself as trusted, already-escaped HTML.
///
/// This is the interoperability seam between `htmlgen` and other escaping libraries:
/// anything implementing it can be placed in a tree (with [`crate::Content::trusted`]) and
/// its output is emitted verbatim. Every [`HtmlGenerator`] implements it, as does
/// [`SafeString`], so output from this crate is never escaped twice by a foreign layer that
/// understands the trait.
pub trait TrustedHtml {
    /// Render this value as HTML that must not be escaped again.
    fn trusted_html(&self) -> String;
}

impl<T: HtmlGenerator + ?Sized> TrustedHtml for T {
    fn trusted_html(&self) -> String {
        self.render().into_string()
    }
}

/// A string of HTML that is known to be safe.
///
/// This is what rendering a generator produces. It dereferences to `str`, and converting it
/// back into [`crate::Content`] yields trusted content that is emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SafeString(String);
impl SafeString {
    /// Mark an existing string as safe HTML.
    ///
    /// The caller vouches that `html` is already escaped.
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Get the HTML as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the HTML into a plain [`String`].
    pub fn into_string(self) -> String {
        self.0
    }
}
impl TrustedHtml for SafeString {
    fn trusted_html(&self) -> String {
        self.0.clone()
    }
}
impl Deref for SafeString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}
impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl From<SafeString> for String {
    fn from(value: SafeString) -> Self {
        value.0
    }
}
impl PartialEq<str> for SafeString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for SafeString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
impl PartialEq<String> for SafeString {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}
impl FromIterator<Chunk> for SafeString {
    fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
        let mut html = String::new();
        for chunk in iter {
            html.push_str(&chunk);
        }
        Self(html)
    }
}

/// A generator that emits its HTML verbatim, without escaping.
///
/// ```
/// use htmlgen::{builder::a, HtmlGenerator, MarkSafe};
///
/// assert_eq!(a().child(MarkSafe::new("<i>")).render(), "<a><i></a>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSafe {
    /// The HTML to emit.
    pub html: Cow<'static, str>,
}
impl MarkSafe {
    /// Mark `html` as safe.
    pub fn new(html: impl Into<Cow<'static, str>>) -> Self {
        Self { html: html.into() }
    }
}
impl HtmlGenerator for MarkSafe {
    fn chunks(&self) -> Chunks {
        Chunks::new().chunk(self.html.clone())
    }
}

struct Callback(Box<dyn Fn() -> String>);
impl TrustedHtml for Callback {
    fn trusted_html(&self) -> String {
        (self.0)()
    }
}

/// A generator whose HTML is produced by a callback at render time.
///
/// Use this to embed output from another rendering system (a template engine, a markdown
/// renderer) so that it is produced in document order, just in time, rather than up front.
#[derive(Clone)]
pub struct Deferred {
    callback: Rc<Callback>,
}
impl Deferred {
    /// Create a deferred generator. `render` is called each time the generator is consumed.
    pub fn new<F, H>(render: F) -> Self
    where
        F: Fn() -> H + 'static,
        H: TrustedHtml,
    {
        Self {
            callback: Rc::new(Callback(Box::new(move || render().trusted_html()))),
        }
    }
}
impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}
impl HtmlGenerator for Deferred {
    fn chunks(&self) -> Chunks {
        Chunks::new().content(crate::Content::Trusted(self.callback.clone()))
    }
}

impl_node!(MarkSafe, Deferred);
