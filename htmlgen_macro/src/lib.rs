use htmlgen_elements::{category_of, is_standard_element, ElementCategory};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote, quote_spanned};

mod ast;
use ast::{AstAttribute, AstNode, AstNodes, AttributeValue};

/// Generate an expression evaluating to the node itself (an element, a fragment, ...).
fn node_to_tokens(node: &AstNode) -> syn::Result<TokenStream2> {
    match node {
        AstNode::Element {
            name,
            span,
            attributes,
            children,
        } => element_to_tokens(name, *span, attributes, children),
        AstNode::Fragment(children) => fragment_to_tokens(children),
        AstNode::Expression { body, iterator } => Ok(if *iterator {
            quote! { ::htmlgen::Content::iter(#body) }
        } else {
            quote! { (#body) }
        }),
        AstNode::Text(text) => Ok(quote! { #text }),
    }
}

/// Generate an expression evaluating to [`htmlgen::Content`].
fn content_to_tokens(node: &AstNode) -> syn::Result<TokenStream2> {
    let node = node_to_tokens(node)?;
    Ok(quote! { ::htmlgen::Content::from(#node) })
}

fn fragment_to_tokens(children: &[AstNode]) -> syn::Result<TokenStream2> {
    if children.is_empty() {
        return Ok(quote! { ::htmlgen::Fragment::default() });
    }
    let children = children
        .iter()
        .map(content_to_tokens)
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(quote! { ::htmlgen::Fragment::new([#(#children),*]) })
}

fn element_to_tokens(
    name: &str,
    span: proc_macro2::Span,
    attributes: &[AstAttribute],
    children: &[AstNode],
) -> syn::Result<TokenStream2> {
    let category = category_of(name);
    let constructor = match category {
        ElementCategory::Normal if is_standard_element(name) => {
            let ident = format_ident!("{}", name, span = span);
            quote! { ::htmlgen::builder::#ident() }
        }
        ElementCategory::Normal => quote_spanned! {span=> ::htmlgen::Element::new(#name) },
        ElementCategory::Void => {
            if !children.is_empty() {
                return Err(syn::Error::new(
                    span,
                    format!("void element <{name}> cannot have children"),
                ));
            }
            quote_spanned! {span=> ::htmlgen::VoidElement::new(#name) }
        }
        ElementCategory::RawText => {
            let content = match children {
                [] => quote! { ::htmlgen::Content::Empty },
                [child] => content_to_tokens(child)?,
                _ => {
                    return Err(syn::Error::new(
                        span,
                        format!("raw text element <{name}> takes at most one child"),
                    ))
                }
            };
            quote_spanned! {span=> ::htmlgen::RawTextElement::new(#name, #content) }
        }
    };

    let attributes = attributes.iter().map(|attribute| {
        let name = &attribute.name;
        let value = match &attribute.value {
            Some(AttributeValue::Literal(lit)) => quote! { #lit },
            Some(AttributeValue::Expression(expr)) => quote! { (#expr) },
            None => quote! { true },
        };
        quote_spanned! {attribute.span=>
            let __element = ::htmlgen::Tag::attr(__element, #name, #value);
        }
    });

    let children = match category {
        ElementCategory::Normal if !children.is_empty() => {
            let children = children
                .iter()
                .map(content_to_tokens)
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { let __element = __element.children([#(#children),*]); }
        }
        _ => quote! {},
    };

    Ok(quote! {{
        let __element = #constructor;
        #(#attributes)*
        #children
        __element
    }})
}

#[proc_macro]
/// Constructs a tree of `htmlgen` nodes from HTML-like syntax, similar to JSX.
///
/// # Syntax
///
/// - Elements: `<name attr="value">children</name>`, or `<name/>` with no children.
///   Standard elements use the matching `htmlgen::builder` function, void elements
///   produce a `VoidElement` and `<script>`/`<style>` a `RawTextElement`. Other names
///   produce an `Element`.
/// - Attribute names may be identifiers, keywords, raw identifiers or hyphenated, and
///   are normalized like any other attribute (`class_` becomes `class`, `data_id`
///   becomes `data-id`). Values are literals or `{expr}`; a name without a value is a
///   bare attribute.
/// - Text is written as string literals, and escaped.
/// - `{expr}` inserts anything convertible into `htmlgen::Content`, and `#{expr}` inserts
///   an iterator that is consumed lazily.
/// - Fragments are written `<>...</>`. Several top-level nodes are wrapped in a fragment.
///
/// Giving children to a void element, or more than one child to a raw text element, is a
/// compile error.
///
/// # Example
///
/// ```ignore
/// use htmlgen::{html, HtmlGenerator};
///
/// let items = ["a", "b"];
/// let element = html! {
///     <ul class="list">
///         #{items.iter().map(|item| html! { <li>{*item}</li> })}
///     </ul>
/// };
/// assert_eq!(element.render(), r#"<ul class="list"><li>a</li><li>b</li></ul>"#);
/// ```
pub fn html(input: TokenStream) -> TokenStream {
    let AstNodes(nodes) = syn::parse_macro_input!(input as AstNodes);

    let result = match nodes.as_slice() {
        [node] => node_to_tokens(node),
        nodes => fragment_to_tokens(nodes),
    };
    result.unwrap_or_else(syn::Error::into_compile_error).into()
}
