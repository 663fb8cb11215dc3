use std::borrow::Cow;
use std::vec;

use crate::escape::escape_chunk;
use crate::{Content, OnceIter};

/// One piece of rendered HTML.
pub type Chunk = Cow<'static, str>;

enum Frame {
    /// Emitted as-is.
    Chunk(Chunk),
    /// Resolved through the escaping rules of [`Content`].
    Content(Content),
    /// Converted to text without escaping.
    RawText(Content),
    List(vec::IntoIter<Content>),
    Iter(OnceIter),
}

/// A lazy sequence of HTML chunks.
///
/// This is what every [`crate::HtmlGenerator`] produces. It is a pull-based iterator over
/// a stack of pending work: each call to [`Iterator::next`] pulls at most one item from
/// one child sequence and returns the next chunk, so unbounded children can be streamed
/// as long as the consumer stops at some point. No output is buffered beyond the chunk
/// being returned.
///
/// Generators build their sequence in reading order:
///
/// ```
/// use htmlgen::{Chunks, Content};
///
/// let chunks = Chunks::new()
///     .chunk("<p>")
///     .content("1 < 2")
///     .chunk("</p>");
/// assert_eq!(chunks.collect::<String>(), "<p>1 &lt; 2</p>");
/// ```
#[must_use = "chunks are lazy and do nothing unless consumed"]
pub struct Chunks {
    // The next frame to process is at the end.
    stack: Vec<Frame>,
}
impl Chunks {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Append a chunk that is emitted verbatim.
    pub fn chunk(self, chunk: impl Into<Chunk>) -> Self {
        self.then(Frame::Chunk(chunk.into()))
    }

    /// Append content, which is escaped and flattened as described on [`Content`].
    pub fn content(self, content: impl Into<Content>) -> Self {
        self.then(Frame::Content(content.into()))
    }

    /// Append a list of children. The list is copied shallowly; the children themselves
    /// are shared.
    pub fn children(self, children: &[Content]) -> Self {
        if children.is_empty() {
            return self;
        }
        self.then(Frame::List(children.to_vec().into_iter()))
    }

    /// Append content that is converted to text without any escaping.
    ///
    /// Text and displayed values are emitted verbatim, nodes and trusted values are
    /// rendered, and lists and iterators are concatenated. The whole conversion happens
    /// when the chunk is pulled, and produces a single chunk.
    pub fn raw_text(self, content: impl Into<Content>) -> Self {
        self.then(Frame::RawText(content.into()))
    }

    fn then(mut self, frame: Frame) -> Self {
        self.stack.insert(0, frame);
        self
    }

    fn resolve(&mut self, content: Content) -> Option<Chunk> {
        match content {
            Content::Empty => None,
            Content::Node(node) => {
                self.stack.extend(node.chunks().stack);
                None
            }
            Content::Trusted(value) => Some(Cow::Owned(value.trusted_html())),
            Content::Text(text) => Some(escape_chunk(text)),
            Content::List(items) => {
                self.stack.push(Frame::List(items.into_iter()));
                None
            }
            Content::Iter(iter) => {
                self.stack.push(Frame::Iter(iter));
                None
            }
            Content::Display(value) => Some(escape_chunk(Cow::Owned(value.to_string()))),
        }
    }
}
impl Default for Chunks {
    fn default() -> Self {
        Self::new()
    }
}
impl From<Content> for Chunks {
    fn from(content: Content) -> Self {
        Chunks::new().content(content)
    }
}
impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Chunk(chunk) => return Some(chunk),
                Frame::Content(content) => {
                    if let Some(chunk) = self.resolve(content) {
                        return Some(chunk);
                    }
                }
                Frame::RawText(content) => {
                    let mut text = String::new();
                    push_raw_text(&mut text, content);
                    return Some(Cow::Owned(text));
                }
                Frame::List(mut items) => {
                    if let Some(item) = items.next() {
                        self.stack.push(Frame::List(items));
                        self.stack.push(Frame::Content(item));
                    }
                }
                Frame::Iter(iter) => {
                    if let Some(item) = iter.next_item() {
                        self.stack.push(Frame::Iter(iter));
                        self.stack.push(Frame::Content(item));
                    }
                }
            }
        }
        None
    }
}

fn push_raw_text(text: &mut String, content: Content) {
    match content {
        Content::Empty => {}
        Content::Node(node) => text.extend(node.chunks()),
        Content::Trusted(value) => text.push_str(&value.trusted_html()),
        Content::Text(value) => text.push_str(&value),
        Content::List(items) => {
            for item in items {
                push_raw_text(text, item);
            }
        }
        Content::Iter(iter) => {
            while let Some(item) = iter.next_item() {
                push_raw_text(text, item);
            }
        }
        Content::Display(value) => text.push_str(&value.to_string()),
    }
}
