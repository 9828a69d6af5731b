//! Visitor driven unmarshalling tests.

use textdoc::{DecodeError, Decoder, Document, FromText, Unmarshal};

fn unmarshal<V: Unmarshal>(input: &str, visitor: &mut V) {
    let doc = Document::parse(input).unwrap();
    Decoder::new(&doc).unmarshal(visitor).unwrap();
}

#[derive(Default)]
struct Scalar<T> {
    value: Option<T>,
}

impl<T: for<'a> FromText<'a>> Unmarshal for Scalar<T> {
    fn set_field(&mut self, name: &str, value: &str) -> bool {
        if name != "field" {
            return false;
        }
        self.value = T::from_text(value);
        self.value.is_some()
    }
}

#[test]
fn test_scalar_fields() {
    let mut int = Scalar::<i32>::default();
    unmarshal(r#"{"field": 123}"#, &mut int);
    assert_eq!(int.value, Some(123));

    let mut float = Scalar::<f64>::default();
    unmarshal(r#"{"field": 1.25}"#, &mut float);
    assert_eq!(float.value, Some(1.25));

    let mut boolean = Scalar::<bool>::default();
    unmarshal(r#"{"field": false}"#, &mut boolean);
    assert_eq!(boolean.value, Some(false));

    let mut string = Scalar::<String>::default();
    unmarshal(r#"{"field": "value"}"#, &mut string);
    assert_eq!(string.value.as_deref(), Some("value"));

    let mut null = Scalar::<String>::default();
    unmarshal(r#"{"field": null}"#, &mut null);
    assert_eq!(null.value.as_deref(), Some("null"));

    // the text does not convert
    let mut int = Scalar::<i32>::default();
    unmarshal(r#"{"field": "abc"}"#, &mut int);
    assert_eq!(int.value, None);

    // other names are not recognized
    let mut int = Scalar::<i32>::default();
    unmarshal(r#"{"other": 1}"#, &mut int);
    assert_eq!(int.value, None);
}

#[derive(Default)]
struct IntList {
    values: Vec<i32>,
}

impl Unmarshal for IntList {
    fn set_field(&mut self, _name: &str, value: &str) -> bool {
        match value.parse() {
            Ok(v) => {
                self.values.push(v);
                true
            }
            Err(_) => false,
        }
    }
}

#[test]
fn test_root_array_of_scalars() {
    let mut list = IntList::default();
    unmarshal("[1,2,3,4]", &mut list);
    assert_eq!(list.values, [1, 2, 3, 4]);

    let mut list = IntList::default();
    unmarshal("[]", &mut list);
    assert!(list.values.is_empty());
}

#[derive(Default)]
struct Item {
    field: i32,
    child: Option<Box<Item>>,
}

impl Unmarshal for Item {
    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            "field" => value.parse().map(|v| self.field = v).is_ok(),
            _ => false,
        }
    }

    fn unmarshal_for_field(&mut self, name: &str) -> Option<&mut dyn Unmarshal> {
        match name {
            "Object" => Some(&mut **self.child.insert(Box::default())),
            _ => None,
        }
    }
}

#[test]
fn test_nested_object() {
    let mut item = Item::default();
    unmarshal(r#"{"field": 123, "Object": {"field": 345}}"#, &mut item);
    assert_eq!(item.field, 123);
    let child = item.child.unwrap();
    assert_eq!(child.field, 345);
    assert!(child.child.is_none());
}

#[test]
fn test_skipped_subtree() {
    let mut item = Item::default();
    unmarshal(
        r#"{"skipped": {"field": 1, "Object": {"field": 2}}, "Object": {"field": 3}, "field": 4}"#,
        &mut item,
    );
    assert_eq!(item.field, 4);
    assert_eq!(item.child.unwrap().field, 3);
}

#[test]
fn test_document_unmarshal() {
    let doc = Document::parse(r#"{"field": 7, "Object": {"field": 8, "Object": {"field": 9}}}"#).unwrap();
    let mut item = Item::default();
    doc.unmarshal(&mut item);
    assert_eq!(item.field, 7);
    let child = item.child.unwrap();
    assert_eq!(child.field, 8);
    assert_eq!(child.child.unwrap().field, 9);
}

#[test]
fn test_root_array_of_objects() {
    let mut items: Vec<Item> = Vec::new();
    unmarshal(r#"[{"field": 1}, {"field": 2}, {"field": 3}]"#, &mut items);
    let fields: Vec<i32> = items.iter().map(|item| item.field).collect();
    assert_eq!(fields, [1, 2, 3]);
}

#[derive(Default)]
struct Catalog {
    name: String,
    tags: Vec<String>,
    items: Vec<Item>,
    pushed: usize,
}

impl Unmarshal for Catalog {
    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            "name" => self.name = value.to_owned(),
            "tags" => self.tags.push(value.to_owned()),
            _ => return false,
        }
        true
    }

    fn unmarshal_for_field(&mut self, name: &str) -> Option<&mut dyn Unmarshal> {
        match name {
            "items" => self.items.unmarshal_for_field(name),
            _ => None,
        }
    }

    fn push_to_array(&mut self, name: &str) -> bool {
        match name {
            "items" => {
                self.pushed += 1;
                true
            }
            _ => false,
        }
    }
}

#[test]
fn test_field_arrays() {
    let mut catalog = Catalog::default();
    unmarshal(
        r#"{
            "name": "catalog",
            "tags": ["a", "b"],
            "items": [{"field": 1}, {"field": 2, "Object": {"field": 20}}],
            "unknown": [{"field": 99}]
        }"#,
        &mut catalog,
    );
    assert_eq!(catalog.name, "catalog");
    assert_eq!(catalog.tags, ["a", "b"]);
    assert_eq!(catalog.items.len(), 2);
    assert_eq!(catalog.items[0].field, 1);
    assert!(catalog.items[0].child.is_none());
    assert_eq!(catalog.items[1].field, 2);
    assert_eq!(catalog.items[1].child.as_ref().unwrap().field, 20);
    assert_eq!(catalog.pushed, 2);
}

#[derive(Default)]
struct Grid {
    rows: Vec<IntList>,
}

impl Unmarshal for Grid {
    fn unmarshal_for_field(&mut self, name: &str) -> Option<&mut dyn Unmarshal> {
        match name {
            "grid" => {
                self.rows.push(IntList::default());
                self.rows.last_mut().map(|row| row as &mut dyn Unmarshal)
            }
            _ => None,
        }
    }

    fn push_to_array(&mut self, _name: &str) -> bool {
        true
    }
}

#[test]
fn test_nested_arrays() {
    let mut grid = Grid::default();
    unmarshal(r#"{"grid": [[1, 2], [], [3]]}"#, &mut grid);
    let rows: Vec<&[i32]> = grid.rows.iter().map(|row| row.values.as_slice()).collect();
    assert_eq!(rows, [&[1, 2][..], &[][..], &[3][..]]);
}

#[test]
fn test_invalid_document() {
    let doc = Document::load("[1,2,3,4,]");
    assert!(doc.is_none());

    let mut list = IntList::default();
    let decoder = Decoder::new(doc.as_ref());
    assert_eq!(decoder.unmarshal(&mut list), Err(DecodeError::InvalidDocument));
    assert!(list.values.is_empty());
}

#[test]
fn test_unmarshal_leaves_cursor_alone() {
    let doc = Document::parse(r#"{"field": 1, "Object": {"field": 2}}"#).unwrap();
    let mut decoder = Decoder::new(&doc);
    assert!(decoder.begin_object(""));
    assert!(decoder.begin_object("Object"));

    let mut item = Item::default();
    decoder.unmarshal(&mut item).unwrap();
    assert_eq!(item.field, 1);

    assert_eq!(decoder.depth(), 2);
    assert_eq!(decoder.read_int_field("field"), Some(2));
}

#[test]
fn test_vec_drops_scalar_elements() {
    let mut items: Vec<Item> = Vec::new();
    unmarshal(r#"[{"field": 1}, 5, "x", null, {"field": 2}]"#, &mut items);
    let fields: Vec<i32> = items.iter().map(|item| item.field).collect();
    assert_eq!(fields, [1, 2]);

    // nested arrays still get an element of their own
    let mut items: Vec<Item> = Vec::new();
    unmarshal(r#"[[1, 2], {"field": 3}]"#, &mut items);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].field, 0);
    assert_eq!(items[1].field, 3);
}

/// Records the child's state when each array element is pushed.
#[derive(Default)]
struct Recorder {
    items: Vec<Item>,
    seen: Vec<i32>,
}

impl Unmarshal for Recorder {
    fn unmarshal_for_field(&mut self, name: &str) -> Option<&mut dyn Unmarshal> {
        match name {
            "items" => self.items.unmarshal_for_field(name),
            _ => None,
        }
    }

    fn push_to_array(&mut self, name: &str) -> bool {
        match (name, self.items.last()) {
            ("items", Some(child)) => {
                self.seen.push(child.field);
                true
            }
            _ => false,
        }
    }
}

#[test]
fn test_push_to_array_sees_filled_child() {
    let mut recorder = Recorder::default();
    unmarshal(r#"{"items": [{"field": 10}, {"field": 20}, {"field": 30}]}"#, &mut recorder);
    assert_eq!(recorder.seen, [10, 20, 30]);
    assert_eq!(recorder.items.len(), 3);
}
