use std::io::Write;

use crate::{Chunks, SafeString};

/// A balanced piece of HTML that can produce itself as a lazy sequence of chunks.
///
/// This is implemented by every node type in this crate, and can be implemented by users
/// to create their own nodes (wrap them in [`crate::Content::node`] to place them in a
/// tree).
///
/// Output is only guaranteed to be reliable for one full consumption: if the tree contains
/// one-shot iterators ([`crate::Content::iter`]), they are drained by the first render.
pub trait HtmlGenerator {
    /// Produce the chunks of HTML for this node.
    fn chunks(&self) -> Chunks;

    /// Render the whole node to a [`SafeString`].
    fn render(&self) -> SafeString {
        self.chunks().collect()
    }

    /// Stream the node to a writer, one chunk at a time.
    fn write_to(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        for chunk in self.chunks() {
            writer.write_all(chunk.as_bytes())?;
        }
        Ok(())
    }
}

/// Implements [`std::fmt::Display`] (rendering the node) and conversion into
/// [`crate::Content`] for generator types.
macro_rules! impl_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    for chunk in $crate::HtmlGenerator::chunks(self) {
                        f.write_str(&chunk)?;
                    }
                    Ok(())
                }
            }
            impl From<$ty> for $crate::Content {
                fn from(node: $ty) -> Self {
                    $crate::Content::Node(::std::rc::Rc::new(node))
                }
            }
        )*
    };
}
pub(crate) use impl_node;
