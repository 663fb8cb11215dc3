use std::rc::Rc;
use std::vec;

use once_cell::unsync::OnceCell;

use crate::generator::impl_node;
use crate::{Chunks, Content, HtmlGenerator, OnceIter, SafeString};

/// Places a joiner between items, like [`slice::join`].
///
/// The joiner and the items can be any content. Empty items (`None`, `false`) are skipped
/// and do not produce an extra joiner. The joiner is rendered once, when it is first
/// needed, and its HTML is reused for every gap.
///
/// ```
/// use htmlgen::{builder::br, HtmlGenerator, Join};
///
/// let lines = Join::new(br(), [None, Some("1"), None, Some("2")]);
/// assert_eq!(lines.render(), "1<br>2");
/// ```
#[derive(Debug, Clone)]
pub struct Join {
    joiner: Content,
    items: Content,
    rendered_joiner: Rc<OnceCell<SafeString>>,
}
impl Join {
    /// Create a join. `items` may be a list, a lazy iterator ([`Content::iter`]), or a
    /// single value.
    pub fn new(joiner: impl Into<Content>, items: impl Into<Content>) -> Self {
        Self {
            joiner: joiner.into(),
            items: items.into(),
            rendered_joiner: Rc::new(OnceCell::new()),
        }
    }
}
impl HtmlGenerator for Join {
    fn chunks(&self) -> Chunks {
        let items = match self.items.clone() {
            Content::List(items) => Items::List(items.into_iter()),
            Content::Iter(iter) => Items::Iter(iter),
            single => Items::List(vec![single].into_iter()),
        };
        Chunks::new().content(Content::iter(Interleave {
            join: self.clone(),
            items,
            started: false,
            pending: None,
        }))
    }
}

enum Items {
    List(vec::IntoIter<Content>),
    Iter(OnceIter),
}
impl Iterator for Items {
    type Item = Content;

    fn next(&mut self) -> Option<Content> {
        match self {
            Items::List(items) => items.next(),
            Items::Iter(iter) => iter.next_item(),
        }
    }
}

struct Interleave {
    join: Join,
    items: Items,
    started: bool,
    pending: Option<Content>,
}
impl Iterator for Interleave {
    type Item = Content;

    fn next(&mut self) -> Option<Content> {
        if let Some(item) = self.pending.take() {
            return Some(item);
        }
        let item = self.items.find(|item| !item.is_empty())?;
        if !self.started {
            self.started = true;
            return Some(item);
        }
        self.pending = Some(item);
        let joiner = self
            .join
            .rendered_joiner
            .get_or_init(|| Chunks::from(self.join.joiner.clone()).collect());
        Some(joiner.clone().into())
    }
}

impl_node!(Join);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{br, i};
    use crate::Tag;

    #[test]
    fn skips_empty_items() {
        let join = Join::new(
            br(),
            [Content::Empty, 1.into(), Content::Empty, 2.into(), Content::Empty, i().into()],
        );
        assert_eq!(join.render(), "1<br>2<br><i></i>");
    }

    #[test]
    fn falsy_items_add_one_joiner() {
        let join = Join::new("X", [None, Some(1), None, Some(2)]);
        assert_eq!(join.render(), "1X2");
        let join = Join::new("X", [Content::from(false), 0.into(), "".into()]);
        assert_eq!(join.render(), "0X");
    }

    #[test]
    fn joiner_is_escaped() {
        assert_eq!(Join::new(" & ", ["a", "b"]).render(), "a &amp; b");
    }

    #[test]
    fn joiner_is_rendered_once() {
        let joiner = Content::iter([br().attr("n", 1), br().attr("n", 2)]);
        let join = Join::new(joiner, ["a", "b", "c"]);
        assert_eq!(
            join.render(),
            r#"a<br n="1"><br n="2">b<br n="1"><br n="2">c"#
        );
    }

    #[test]
    fn lazy_items() {
        let join = Join::new(", ", Content::iter((1..).map(|n| n * n)));
        let text: String = join.chunks().take(5).collect();
        assert_eq!(text, "1, 4, 9");
    }

    #[test]
    fn single_item() {
        assert_eq!(Join::new(br(), "only").render(), "only");
        assert_eq!(Join::new(br(), Vec::<Content>::new()).render(), "");
    }
}
