#![cfg(feature = "serde")]

use htmlgen::{builder::b, Attribute, HtmlGenerator, Tag};

#[test]
fn test_serialize_safe_string() {
    let html = b().attr("id", "x").child("<").render();
    assert_eq!(
        serde_json::to_string(&html).unwrap(),
        r#""<b id=\"x\">&lt;</b>""#
    );
}

#[test]
fn test_serialize_attributes() {
    let element = b().attr("data_id", 3).attr("hidden", true);
    let attributes: &[Attribute] = element.attributes();
    assert_eq!(
        serde_json::to_value(attributes).unwrap(),
        serde_json::json!([
            { "key": "data-id", "value": { "type": "Text", "value": "3" } },
            { "key": "hidden", "value": { "type": "Bare" } },
        ])
    );
}
