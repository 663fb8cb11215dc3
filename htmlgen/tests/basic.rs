use htmlgen::{
    builder::{a, body, br, div, i, img, input, script},
    format, util, Comment, Content, Document, Fragment, Join, MarkSafe, Tag,
    Template,
};

#[test]
fn test_input() {
    assert_eq!(input().attr("name", "bar").to_string(), r#"<input name="bar">"#);
}

#[test]
fn test_document() {
    let rows = ["a", "b", "c"]
        .into_iter()
        .enumerate()
        .map(|(i, x)| div().attr("div_index", i).child(x));
    let document = Document::new([
        Content::from(script(r#"alert("Hello, World!");"#)),
        body()
            .child(r#"Direct body text with "<>&' special characters"#)
            .child(Content::iter(rows))
            .child(input().attr("type", "text").attr("value", "<&''>"))
            .attr("foo", "bar")
            .attr("class_", "a")
            .into(),
    ]);
    assert_eq!(
        document.to_string(),
        concat!(
            "<!DOCTYPE html>\n",
            r#"<script>alert("Hello, World!");</script><body foo="bar" class="a">"#,
            "Direct body text with &quot;&lt;&gt;&amp;&#x27; special characters",
            r#"<div div-index="0">a</div><div div-index="1">b</div><div div-index="2">c</div>"#,
            r#"<input type="text" value="&lt;&amp;&#x27;&#x27;&gt;"></body>"#
        )
    );
}

#[test]
fn test_document_html_attributes() {
    let document = Document::new([body().child("body")]).html_attr("class_", "foo");
    assert_eq!(
        document.to_string(),
        "<!DOCTYPE html>\n<html class=\"foo\"><body>body</body></html>"
    );
}

#[test]
fn test_fragment() {
    let fragment = Fragment::new([
        Content::from("loose text"),
        div().child("a").into(),
        "more text".into(),
        div().child("b").into(),
        "final <> text".into(),
    ]);
    assert_eq!(
        fragment.to_string(),
        "loose text<div>a</div>more text<div>b</div>final &lt;&gt; text"
    );
}

#[test]
fn test_comment() {
    assert_eq!(
        Comment::new("My favorite operators are > and <!").to_string(),
        "<!--My favorite operators are > and <!-->"
    );
}

#[test]
fn test_attribute_names() {
    assert_eq!(input().attr("foo_bar_", true).to_string(), "<input foo-bar>");
}

#[test]
fn test_zero_is_rendered() {
    assert_eq!(
        div().child(0).attr("tabindex", 0).to_string(),
        r#"<div tabindex="0">0</div>"#
    );
}

#[test]
fn test_with_classes_and_styles() {
    assert_eq!(
        img().attr("class_", "a").with_classes(["b"]).to_string(),
        r#"<img class="a b">"#
    );
    assert_eq!(
        div()
            .child(i().child("a"))
            .attr("class_", "a")
            .with_classes(["b"])
            .to_string(),
        r#"<div class="a b"><i>a</i></div>"#
    );
    assert_eq!(
        img().attr("style", "a: b").with_styles(["b: c"]).to_string(),
        r#"<img style="a: b; b: c">"#
    );
}

#[test]
fn test_iterators() {
    assert_eq!(div().child(Content::iter(1..=3)).to_string(), "<div>123</div>");
}

#[test]
fn test_join() {
    let join = Join::new(
        br(),
        [
            Content::Empty,
            1.into(),
            Content::Empty,
            2.into(),
            Content::Empty,
            i().into(),
        ],
    );
    assert_eq!(join.to_string(), "1<br>2<br><i></i>");
}

#[test]
fn test_mark_safe() {
    assert_eq!(a().child(MarkSafe::new("<i>")).to_string(), "<a><i></a>");
}

#[test]
fn test_classes_and_styles() {
    let (yes, no) = (true, false);
    assert_eq!(
        util::classes([Some("fixed"), no.then_some("NOT"), None, yes.then_some("conditional")]),
        "fixed conditional"
    );
    assert_eq!(
        util::styles([Some("display: block"), no.then_some("NOT"), None, yes.then_some("color: green")]),
        "display: block; color: green"
    );
}

#[test]
fn test_template() {
    assert_eq!(Template::new("a").to_string(), "a");
    assert_eq!(Template::new("<a").to_string(), "&lt;a");
    assert_eq!(Template::new(MarkSafe::new("<a>")).to_string(), "<a>");
    assert_eq!(
        Template::new("<a{{a}}b{{a}}{{b}}")
            .with("a", "A")
            .with("b", "B")
            .to_string(),
        "&lt;aAbAB"
    );
    assert_eq!(Template::new("{{a}}{{b}}").to_string(), "{{a}}{{b}}");
    assert_eq!(Template::new("{{a}}").with("a", br()).to_string(), "<br>");
    assert_eq!(
        Template::new("{a}{b}").with("a", "A").with("b", "B").to_string(),
        "AB"
    );
    assert_eq!(Template::new("{a}{b}").to_string(), "{a}{b}");
    assert_eq!(Template::new("{a}").with("a", "1<2").to_string(), "1&lt;2");
}

#[test]
fn test_template_one_shot_values() {
    let shared = std::rc::Rc::new(std::cell::RefCell::new(vec![1].into_iter()));
    let source = shared.clone();
    let values = std::iter::from_fn(move || source.borrow_mut().next());
    let template = Template::new("{{x}}{{x}}").with("x", Content::iter(values));
    assert_eq!(template.to_string(), "11");
    assert_eq!(shared.borrow_mut().next(), None);
}

#[test]
fn test_format() {
    let html = format(
        "<Please {link_start}click here{link_end}.",
        [
            ("link_start", a().attr("href", "foo").open_tag()),
            ("link_end", a().close_tag()),
        ],
    )
    .unwrap();
    assert_eq!(html, r#"&lt;Please <a href="foo">click here</a>."#);
}
