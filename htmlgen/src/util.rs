//! Helpers for building attribute values.

/// Join conditional class names into a single `class` attribute value.
///
/// `None` and empty entries are skipped.
///
/// ```
/// use htmlgen::util::classes;
///
/// let active = true;
/// let disabled = false;
/// assert_eq!(
///     classes([Some("fixed"), disabled.then_some("NOT"), None, active.then_some("conditional")]),
///     "fixed conditional"
/// );
/// ```
pub fn classes<'a, I, C>(classes: I) -> String
where
    I: IntoIterator<Item = C>,
    C: Into<Option<&'a str>>,
{
    join_present(classes, " ")
}

/// Join conditional style declarations into a single `style` attribute value.
///
/// `None` and empty entries are skipped.
///
/// ```
/// use htmlgen::util::styles;
///
/// assert_eq!(styles(["display: block", "", "color: green"]), "display: block; color: green");
/// ```
pub fn styles<'a, I, S>(styles: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a str>>,
{
    join_present(styles, "; ")
}

fn join_present<'a, I, S>(items: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a str>>,
{
    let mut result = String::new();
    for item in items.into_iter().filter_map(Into::into) {
        if item.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push_str(separator);
        }
        result.push_str(item);
    }
    result
}
