use proc_macro2::{Span, TokenStream};
use syn::{
    braced,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    token, Ident, Lit, LitStr, Token,
};

/// An attribute of an element.
pub struct AstAttribute {
    /// The name as written, with `-` between the parts of hyphenated names and raw
    /// identifiers unrawed. Normalization happens at runtime.
    pub name: String,
    pub span: Span,
    pub value: Option<AttributeValue>,
}

pub enum AttributeValue {
    Literal(Lit),
    Expression(TokenStream),
}

pub enum AstNode {
    Element {
        name: String,
        span: Span,
        attributes: Vec<AstAttribute>,
        children: Vec<AstNode>,
    },
    Fragment(Vec<AstNode>),
    /// `{expr}`, or `#{expr}` for a lazy iterator.
    Expression { body: TokenStream, iterator: bool },
    Text(LitStr),
}

/// The whole input: any number of nodes.
pub struct AstNodes(pub Vec<AstNode>);
impl Parse for AstNodes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut nodes = Vec::new();
        while !input.is_empty() {
            nodes.push(input.parse()?);
        }
        Ok(AstNodes(nodes))
    }
}

impl Parse for AstNode {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![<]) {
            if input.peek2(Token![/]) {
                return Err(input.error("unexpected closing tag"));
            }
            return parse_element(input);
        }
        if input.peek(Token![#]) && input.peek2(token::Brace) {
            input.parse::<Token![#]>()?;
            let content;
            braced!(content in input);
            return Ok(AstNode::Expression {
                body: content.parse()?,
                iterator: true,
            });
        }
        if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            return Ok(AstNode::Expression {
                body: content.parse()?,
                iterator: false,
            });
        }
        if input.peek(LitStr) {
            return Ok(AstNode::Text(input.parse()?));
        }
        Err(input.error("expected an element, a string literal or `{...}`"))
    }
}

fn parse_element(input: ParseStream) -> syn::Result<AstNode> {
    input.parse::<Token![<]>()?;

    // <>...</>
    if input.peek(Token![>]) {
        input.parse::<Token![>]>()?;
        let children = parse_children(input)?;
        input.parse::<Token![<]>()?;
        input.parse::<Token![/]>()?;
        input.parse::<Token![>]>()?;
        return Ok(AstNode::Fragment(children));
    }

    let (name, span) = parse_name(input)?;

    let mut attributes = Vec::new();
    while !(input.peek(Token![>]) || input.peek(Token![/])) {
        if input.is_empty() {
            return Err(syn::Error::new(span, format!("unclosed tag <{name}>")));
        }
        attributes.push(parse_attribute(input)?);
    }

    if input.peek(Token![/]) {
        input.parse::<Token![/]>()?;
        input.parse::<Token![>]>()?;
        return Ok(AstNode::Element {
            name,
            span,
            attributes,
            children: Vec::new(),
        });
    }
    input.parse::<Token![>]>()?;

    let children = parse_children(input)?;
    input.parse::<Token![<]>()?;
    input.parse::<Token![/]>()?;
    let (close_name, close_span) = parse_name(input)?;
    if close_name != name {
        return Err(syn::Error::new(
            close_span,
            format!("expected closing tag </{name}>, found </{close_name}>"),
        ));
    }
    input.parse::<Token![>]>()?;

    Ok(AstNode::Element {
        name,
        span,
        attributes,
        children,
    })
}

/// Parse nodes up to (not including) the next `</`.
fn parse_children(input: ParseStream) -> syn::Result<Vec<AstNode>> {
    let mut children = Vec::new();
    while !(input.peek(Token![<]) && input.peek2(Token![/])) {
        if input.is_empty() {
            return Err(input.error("expected a closing tag"));
        }
        children.push(input.parse()?);
    }
    Ok(children)
}

fn parse_attribute(input: ParseStream) -> syn::Result<AstAttribute> {
    let (name, span) = parse_name(input)?;
    if !input.peek(Token![=]) {
        return Ok(AstAttribute {
            name,
            span,
            value: None,
        });
    }
    input.parse::<Token![=]>()?;

    let value = if input.peek(token::Brace) {
        let content;
        braced!(content in input);
        AttributeValue::Expression(content.parse()?)
    } else {
        AttributeValue::Literal(input.parse()?)
    };
    Ok(AstAttribute {
        name,
        span,
        value: Some(value),
    })
}

/// Parse `ident`, `r#ident`, keywords, and hyphenated names such as `data-index` or
/// `my-widget`.
fn parse_name(input: ParseStream) -> syn::Result<(String, Span)> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    let mut name = first.unraw().to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
        name.push_str(&Ident::parse_any(input)?.unraw().to_string());
    }
    Ok((name, span))
}
