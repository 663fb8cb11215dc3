use std::borrow::Cow;

use crate::{escape, SafeString};

/// The value of an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value"))]
pub enum AttributeValue {
    /// The attribute is omitted entirely.
    Absent,
    /// The attribute is written as a bare name, e.g. `<input disabled>`.
    Bare,
    /// The attribute is written as `name="value"`, with the value escaped.
    Text(Cow<'static, str>),
}
impl AttributeValue {
    /// Returns the value as a string slice if this is a [`Text`] value.
    ///
    /// [`Text`]: AttributeValue::Text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if the value is [`Absent`].
    ///
    /// [`Absent`]: AttributeValue::Absent
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}
impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        if value {
            AttributeValue::Bare
        } else {
            AttributeValue::Absent
        }
    }
}
impl From<&'static str> for AttributeValue {
    fn from(value: &'static str) -> Self {
        AttributeValue::Text(Cow::Borrowed(value))
    }
}
impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(Cow::Owned(value))
    }
}
impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        AttributeValue::Text(Cow::Owned(value.clone()))
    }
}
impl From<Cow<'static, str>> for AttributeValue {
    fn from(value: Cow<'static, str>) -> Self {
        AttributeValue::Text(value)
    }
}
impl From<SafeString> for AttributeValue {
    fn from(value: SafeString) -> Self {
        AttributeValue::Text(Cow::Owned(value.into_string()))
    }
}
impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => AttributeValue::Absent,
        }
    }
}

macro_rules! display_attribute_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::Text(Cow::Owned(value.to_string()))
                }
            }
        )*
    };
}
display_attribute_value! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, char
}

/// A key-value pair for an HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    /// The normalized name of the attribute.
    pub key: Cow<'static, str>,
    /// The value of the attribute.
    pub value: AttributeValue,
}
impl Attribute {
    /// Create a new attribute. The key is normalized with [`normalize_attribute_name`].
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<AttributeValue>) -> Self {
        Attribute {
            key: normalize_key(key.into()),
            value: value.into(),
        }
    }

    /// Append the attribute as it appears in an open tag (including the leading space) to
    /// `out`. Absent attributes append nothing.
    pub fn write_to(&self, out: &mut String) {
        match &self.value {
            AttributeValue::Absent => {}
            AttributeValue::Bare => {
                out.push(' ');
                out.push_str(&self.key);
            }
            AttributeValue::Text(value) => {
                out.push(' ');
                out.push_str(&self.key);
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
    }
}

/// Convert an attribute name written as a Rust identifier to an HTML attribute name.
///
/// Trailing underscores are removed, so `class_` and `type_` can be used where `class` and
/// `type` would clash with keywords. Remaining underscores become hyphens, so `data_index`
/// becomes `data-index`. Names without underscores are returned unchanged.
///
/// ```
/// use htmlgen::normalize_attribute_name;
///
/// assert_eq!(normalize_attribute_name("class_"), "class");
/// assert_eq!(normalize_attribute_name("foo_bar_"), "foo-bar");
/// assert_eq!(normalize_attribute_name("aria-label"), "aria-label");
/// ```
pub fn normalize_attribute_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim_end_matches('_');
    if trimmed.contains('_') {
        Cow::Owned(trimmed.replace('_', "-"))
    } else {
        Cow::Borrowed(trimmed)
    }
}

fn normalize_key(key: Cow<'static, str>) -> Cow<'static, str> {
    let normalized = match normalize_attribute_name(&key) {
        Cow::Borrowed(name) if name.len() == key.len() => None,
        other => Some(other.into_owned()),
    };
    match normalized {
        Some(normalized) => Cow::Owned(normalized),
        None => key,
    }
}

/// Set an attribute in a list, keeping its position if the key is already present.
///
/// Setting an [`AttributeValue::Absent`] value removes the attribute.
pub(crate) fn set_attribute(attributes: &mut Vec<Attribute>, attribute: Attribute) {
    let existing = attributes.iter().position(|a| a.key == attribute.key);
    match (existing, attribute.value.is_absent()) {
        (Some(index), true) => {
            attributes.remove(index);
        }
        (Some(index), false) => attributes[index].value = attribute.value,
        (None, true) => {}
        (None, false) => attributes.push(attribute),
    }
}

/// Build the open tag for an element.
pub(crate) fn open_tag(name: &str, attributes: &[Attribute]) -> String {
    let mut tag = String::with_capacity(name.len() + 2);
    tag.push('<');
    tag.push_str(name);
    for attribute in attributes {
        attribute.write_to(&mut tag);
    }
    tag.push('>');
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_keys_once() {
        assert_eq!(Attribute::new("data_index", 0).key, "data-index");
        assert_eq!(Attribute::new("type_", "text").key, "type");
        assert!(matches!(Attribute::new("id", "x").key, Cow::Borrowed("id")));
    }

    #[test]
    fn leading_underscores_are_kept() {
        assert_eq!(normalize_attribute_name("_x"), "-x");
    }

    #[test]
    fn writes_values() {
        let mut out = String::new();
        Attribute::new("value", "<&''>").write_to(&mut out);
        Attribute::new("disabled", true).write_to(&mut out);
        Attribute::new("hidden", false).write_to(&mut out);
        Attribute::new("title", None::<&str>).write_to(&mut out);
        Attribute::new("tabindex", 0).write_to(&mut out);
        assert_eq!(
            out,
            r#" value="&lt;&amp;&#x27;&#x27;&gt;" disabled tabindex="0""#
        );
    }

    #[test]
    fn set_attribute_overwrites_in_place() {
        let mut attributes = vec![Attribute::new("a", "1"), Attribute::new("b", "2")];
        set_attribute(&mut attributes, Attribute::new("a", "3"));
        set_attribute(&mut attributes, Attribute::new("c", "4"));
        assert_eq!(open_tag("x", &attributes), r#"<x a="3" b="2" c="4">"#);

        set_attribute(&mut attributes, Attribute::new("b", None::<&str>));
        assert_eq!(open_tag("x", &attributes), r#"<x a="3" c="4">"#);
    }
}
