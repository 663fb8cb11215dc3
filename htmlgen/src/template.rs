//! Substituting rendered HTML into (translatable) strings.
//!
//! Both [`Template`] and [`format`] escape the template first (unless it is already
//! trusted HTML), then replace `{key}` placeholders with the rendered, escaped context
//! values. Translators can work on plain text while the replacements carry markup.

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::{Captures, Regex};

use crate::generator::impl_node;
use crate::{Chunks, Content, HtmlGenerator, SafeString, TrustedHtml};

/// `{{key}}` (kept for older templates) or `{key}`.
static TEMPLATE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}|\{([A-Za-z0-9_]+)\}").unwrap());

/// Escaped braces, `{key}`, or a stray brace.
static FORMAT_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{([A-Za-z0-9_]*)\}|[{}]").unwrap());

/// A context value, rendered at most once.
#[derive(Debug)]
struct LazyHtml {
    source: Content,
    html: OnceCell<SafeString>,
}
impl LazyHtml {
    fn get(&self) -> &str {
        self.html
            .get_or_init(|| Chunks::from(self.source.clone()).collect())
            .as_str()
    }
}

/// A template whose `{key}` placeholders are replaced by rendered context values.
///
/// The template is escaped unless it is trusted (e.g. a [`crate::MarkSafe`] or
/// [`SafeString`]), so plain translated strings are safe to use. Each context value is
/// rendered at most once, even when its placeholder appears several times or when it is a
/// one-shot iterator. Placeholders without a context value are left as they are.
///
/// For backwards compatibility, `{{key}}` is also accepted as a placeholder.
///
/// ```
/// use htmlgen::{builder::a, HtmlGenerator, Tag, Template};
///
/// let message = Template::new("You have been paired with {partner} & co.")
///     .with("partner", a().attr("href", "mailto:js@example.com").child("John Smith"));
/// assert_eq!(
///     message.render(),
///     r#"You have been paired with <a href="mailto:js@example.com">John Smith</a> &amp; co."#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    template: Content,
    context: Vec<(Cow<'static, str>, Rc<LazyHtml>)>,
}
impl Template {
    /// Create a template with no context.
    pub fn new(template: impl Into<Content>) -> Self {
        Self {
            template: template.into(),
            context: Vec::new(),
        }
    }

    /// Add a context value. A later value for the same key replaces an earlier one.
    #[must_use]
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Content>) -> Self {
        let key = key.into();
        let value = Rc::new(LazyHtml {
            source: value.into(),
            html: OnceCell::new(),
        });
        match self.context.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.context.push((key, value)),
        }
        self
    }

    fn lookup(&self, key: &str) -> Option<&LazyHtml> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_ref())
    }

    fn substituted(&self) -> String {
        let template: SafeString = Chunks::from(self.template.clone()).collect();
        let result = substitute(template.as_str(), &TEMPLATE_PLACEHOLDER, |captures| {
            let whole = &captures[0];
            let value = captures
                .get(1)
                .or_else(|| captures.get(2))
                .and_then(|key| {
                    let value = self.lookup(key.as_str());
                    if value.is_none() {
                        crate::tracing_macros::debug!(key = key.as_str(), "template key has no value");
                    }
                    value
                });
            Ok::<_, Infallible>(Cow::Owned(
                value.map_or_else(|| whole.to_string(), |value| value.get().to_string()),
            ))
        });
        match result {
            Ok(html) => html,
            Err(never) => match never {},
        }
    }
}

struct Substituted(Template);
impl TrustedHtml for Substituted {
    fn trusted_html(&self) -> String {
        self.0.substituted()
    }
}

impl HtmlGenerator for Template {
    fn chunks(&self) -> Chunks {
        Chunks::new().content(Content::trusted(Substituted(self.clone())))
    }
}

impl_node!(Template);

/// Error returned by [`format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template uses a key that is not in the context.
    MissingKey {
        /// The missing key.
        key: String,
    },
    /// The template contains a `{` or `}` that is neither doubled nor part of a
    /// placeholder.
    UnbalancedBrace {
        /// The byte offset of the brace in the escaped template.
        position: usize,
    },
}
impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingKey { key } => write!(f, "Missing format key `{key}`"),
            FormatError::UnbalancedBrace { position } => {
                write!(f, "Unbalanced brace at position {position}")
            }
        }
    }
}
impl std::error::Error for FormatError {}

/// Substitute rendered context values into a template.
///
/// Like [`Template`], but eager and strict: every context value is rendered up front,
/// `{{` and `}}` produce literal braces, and a placeholder without a value is an error.
/// This is handy for splicing open and close tags into a translated sentence:
///
/// ```
/// use htmlgen::{builder::a, format, Tag};
///
/// let link = a().attr("href", "/help");
/// let html = format(
///     "Please {link_start}click here{link_end} for {{help}}.",
///     [("link_start", link.open_tag()), ("link_end", link.close_tag())],
/// )
/// .unwrap();
/// assert_eq!(html, r#"Please <a href="/help">click here</a> for {help}."#);
/// ```
///
/// # Errors
///
/// Returns [`FormatError::MissingKey`] for a placeholder with no value, and
/// [`FormatError::UnbalancedBrace`] for a stray brace.
pub fn format<K, V>(
    template: impl Into<Content>,
    context: impl IntoIterator<Item = (K, V)>,
) -> Result<SafeString, FormatError>
where
    K: AsRef<str>,
    V: Into<Content>,
{
    let context: Vec<(K, SafeString)> = context
        .into_iter()
        .map(|(key, value)| (key, Chunks::from(value.into()).collect()))
        .collect();
    let template: SafeString = Chunks::from(template.into()).collect();

    substitute(template.as_str(), &FORMAT_PLACEHOLDER, |captures| {
        let whole = captures.get(0).map_or("", |m| m.as_str());
        match whole {
            "{{" => return Ok(Cow::Borrowed("{")),
            "}}" => return Ok(Cow::Borrowed("}")),
            _ => {}
        }
        let Some(key) = captures.get(1) else {
            return Err(FormatError::UnbalancedBrace {
                position: captures.get(0).map_or(0, |m| m.start()),
            });
        };
        context
            .iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key.as_str())
            .map(|(_, value)| Cow::Owned(value.as_str().to_string()))
            .ok_or_else(|| FormatError::MissingKey {
                key: key.as_str().to_string(),
            })
    })
    .map(SafeString::from_trusted)
}

/// Replace every match of `pattern` in `text` in a single pass. Replacements are not
/// searched again.
fn substitute<'t, E>(
    text: &'t str,
    pattern: &Regex,
    mut replace: impl FnMut(&Captures<'t>) -> Result<Cow<'t, str>, E>,
) -> Result<String, E> {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for captures in pattern.captures_iter(text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        result.push_str(&text[last..whole.start()]);
        result.push_str(&replace(&captures)?);
        last = whole.end();
    }
    result.push_str(&text[last..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{a, b, i};
    use crate::{MarkSafe, Tag};

    #[test]
    fn escapes_template_and_values() {
        let template = Template::new("<b>{name}</b> {{name}}").with("name", "<i>");
        assert_eq!(template.render(), "&lt;b&gt;&lt;i&gt;&lt;/b&gt; &lt;i&gt;");
    }

    #[test]
    fn trusted_templates_are_not_escaped() {
        let template = Template::new(MarkSafe::new("<b>{name}</b>")).with("name", i().child("x"));
        assert_eq!(template.render(), "<b><i>x</i></b>");
    }

    #[test]
    fn unknown_keys_are_kept() {
        let template = Template::new("{a} {b} {{c}} {not a key}").with("a", 1);
        assert_eq!(template.render(), "1 {b} {{c}} {not a key}");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let template = Template::new("{{a}} {a}").with("a", "{b}").with("b", "no");
        assert_eq!(template.render(), "{b} {b}");
    }

    #[test]
    fn values_are_rendered_once() {
        let items = Content::iter(["a", "b"]);
        let template = Template::new("{x}, {x}!").with("x", items);
        assert_eq!(template.render(), "ab, ab!");
        assert_eq!(template.render(), "ab, ab!");
    }

    #[test]
    fn replacements_are_not_substituted_again() {
        let template = Template::new("{a}").with("a", "{b}").with("b", "no");
        assert_eq!(template.render(), "{b}");
    }

    #[test]
    fn later_values_replace_earlier_ones() {
        let template = Template::new("{a}").with("a", 1).with("a", 2);
        assert_eq!(template.render(), "2");
    }

    #[test]
    fn template_is_a_single_chunk() {
        let template = Template::new("{x} & {y}").with("x", b().child("1")).with("y", 2);
        let chunks: Vec<_> = template.chunks().collect();
        assert_eq!(chunks, vec!["<b>1</b> &amp; 2"]);
    }

    #[test]
    fn format_substitutes() {
        let link = a().attr("href", "/x");
        assert_eq!(
            format(
                "Click {start}here{end} > {{literal}}",
                [("start", link.open_tag()), ("end", link.close_tag())]
            )
            .unwrap(),
            r#"Click <a href="/x">here</a> &gt; {literal}"#
        );
    }

    #[test]
    fn format_errors() {
        assert_eq!(
            format("Hi {name}", [("other", "x")]),
            Err(FormatError::MissingKey {
                key: "name".to_string()
            })
        );
        assert_eq!(
            format("a } b", Vec::<(&str, &str)>::new()),
            Err(FormatError::UnbalancedBrace { position: 2 })
        );
        assert_eq!(
            FormatError::MissingKey {
                key: "name".to_string()
            }
            .to_string(),
            "Missing format key `name`"
        );
    }
}
