//! Json value conversion tests.

use serde_json::json;
use textdoc::{Decoder, Document, Node, ParseErrorKind};

#[test]
fn test_object_from_json() {
    let value = json!({
        "zeta": 1,
        "alpha": "text",
        "flag": true,
        "none": null,
        "child": { "id": 2 },
        "list": [1, { "id": 3 }, [4]]
    });
    let doc = Document::try_from(&value).unwrap();
    let object = doc.object().unwrap();
    assert_eq!(object.name(), None);

    // member order is kept
    let names: Vec<&str> = object.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["zeta", "alpha", "flag", "none", "child", "list"]);

    assert_eq!(object.text("zeta"), Some("1"));
    assert_eq!(object.text("alpha"), Some("text"));
    assert_eq!(object.text("flag"), Some("true"));
    assert_eq!(object.text("none"), Some("null"));
    assert_eq!(object.object("child").unwrap().name(), Some("child"));

    let list = object.array("list").unwrap();
    assert_eq!(list.name(), Some("list"));
    assert_eq!(list.object(1).unwrap().name(), Some("list"));
    assert_eq!(list.array(2).unwrap().name(), Some("list"));
    assert_eq!(list.array(2).unwrap().text(0), Some("4"));
}

#[test]
fn test_same_tree_as_parsed() {
    let text = r#"{"a": [1, 2.5, "x"], "b": {"c": false}}"#;
    let value: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(Document::try_from(&value).unwrap(), Document::parse(text).unwrap());
}

#[test]
fn test_array_from_json() {
    let value = json!([{ "id": 1 }, "two"]);
    let doc = Document::try_from(&value).unwrap();
    let array = doc.array().unwrap();
    assert_eq!(array.name(), None);
    assert!(array.get(0).unwrap().is_object());
    assert_eq!(array.get(1), Some(&Node::Text("two".to_string())));

    let mut decoder = Decoder::new(&doc);
    let it = decoder.begin_array("").unwrap();
    assert!(decoder.begin_object(""));
    assert_eq!(decoder.read_int_field("id"), Some(1));
    decoder.end_object().unwrap();
    assert_eq!(it.position(), 0);
    decoder.end_array().unwrap();
}

#[test]
fn test_scalar_root() {
    for value in [json!(1), json!("text"), json!(null), json!(true)] {
        let err = Document::try_from(&value).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::RootNotContainer);
    }
}

#[test]
fn test_exponent_literals() {
    for text in ["[1e10]", "[1E5]", "[-2.5E-3]", "[1e+10]"] {
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        let converted = Document::try_from(&value).unwrap();
        let parsed = Document::parse(text).unwrap();

        // the parser keeps the literal, serde_json writes exponents as `e+` / `e-`
        let literal = &text[1..text.len() - 1];
        assert_eq!(parsed.array().unwrap().text(0), Some(literal));
        let normalized = converted.array().unwrap().text(0).unwrap();
        assert!(normalized.contains("e+") || normalized.contains("e-"), "{}", normalized);

        let mut from_json = Decoder::new(&converted);
        let mut from_text = Decoder::new(&parsed);
        let a = from_json.begin_array("").unwrap();
        let b = from_text.begin_array("").unwrap();
        assert_eq!(a.read_number(), b.read_number());
        assert_eq!(a.read_double(), b.read_double());
        assert!(a.read_number().is_some());
    }

    let value: serde_json::Value = serde_json::from_str("[1e10]").unwrap();
    assert_ne!(Document::try_from(&value).unwrap(), Document::parse("[1e10]").unwrap());

    // without an exponent both routes agree
    let text = "[1.50, -0.0, 2.5e-3, 9007199254740993]";
    let value: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(Document::try_from(&value).unwrap(), Document::parse(text).unwrap());
}
