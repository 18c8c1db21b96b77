#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn text(id: &str, x: f64, y: f64) -> Element {
    Element::Text(TextElement {
        id: id.into(),
        content: format!("text {id}"),
        color: "#112233".into(),
        font_size: 18.0,
        font_weight: "bold".into(),
        font_family: None,
        position: Position::new(x, y),
    })
}

fn image(id: &str, x: f64, y: f64) -> Element {
    Element::Image(ImageElement {
        id: id.into(),
        src: "data:image/png;base64,AAAA".into(),
        width: 120.0,
        height: 80.0,
        position: Position::new(x, y),
    })
}

fn sample_design() -> Design {
    Design { elements: vec![text("a", 0.0, 0.0), image("b", 10.0, 10.0), text("c", 20.0, 20.0)] }
}

fn ids(design: &Design) -> Vec<&str> {
    design.elements.iter().map(Element::id).collect()
}

// =============================================================
// Element serde
// =============================================================

#[test]
fn text_element_wire_shape() {
    let value = serde_json::to_value(text("t1", 5.0, 6.0)).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "text",
            "id": "t1",
            "content": "text t1",
            "color": "#112233",
            "fontSize": 18.0,
            "fontWeight": "bold",
            "position": { "x": 5.0, "y": 6.0 }
        })
    );
}

#[test]
fn image_element_wire_shape() {
    let value = serde_json::to_value(image("i1", 1.0, 2.0)).unwrap();
    assert_eq!(value["type"], "image");
    assert_eq!(value["src"], "data:image/png;base64,AAAA");
    assert_eq!(value["width"], 120.0);
    assert_eq!(value["position"]["y"], 2.0);
}

#[test]
fn image_dimensions_default_when_absent() {
    let element: Element = serde_json::from_value(json!({
        "type": "image",
        "id": "x",
        "src": "/clipart/star.svg",
        "position": { "x": 0, "y": 0 }
    }))
    .unwrap();
    let Element::Image(image) = element else {
        panic!("expected image");
    };
    assert_eq!(image.width, DEFAULT_IMAGE_SIZE);
    assert_eq!(image.height, DEFAULT_IMAGE_SIZE);
}

#[test]
fn unknown_element_type_rejected() {
    let result = serde_json::from_value::<Element>(json!({
        "type": "video",
        "id": "v",
        "position": { "x": 0, "y": 0 }
    }));
    assert!(result.is_err());
}

#[test]
fn design_without_elements_field_is_empty() {
    let design: Design = serde_json::from_str("{}").unwrap();
    assert!(design.is_empty());
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_updates_only_target() {
    let design = sample_design();
    let moved = design.move_element("b", Position::new(-40.0, 900.0)).unwrap();
    assert_eq!(moved.get("b").unwrap().position(), Position::new(-40.0, 900.0));
    assert_eq!(moved.elements[0], design.elements[0]);
    assert_eq!(moved.elements[2], design.elements[2]);
    assert_eq!(ids(&moved), vec!["a", "b", "c"]);
}

#[test]
fn move_leaves_original_untouched() {
    let design = sample_design();
    let _ = design.move_element("a", Position::new(99.0, 99.0)).unwrap();
    assert_eq!(design.get("a").unwrap().position(), Position::new(0.0, 0.0));
}

#[test]
fn move_missing_element_errors() {
    let err = sample_design().move_element("zzz", Position::default()).unwrap_err();
    assert_eq!(err, DesignError::ElementNotFound("zzz".into()));
}

#[test]
fn translate_accumulates_deltas_without_clamping() {
    let design = sample_design();
    let once = design.translate_element("c", -500.0, 3.5).unwrap();
    let twice = once.translate_element("c", -500.0, 3.5).unwrap();
    assert_eq!(twice.get("c").unwrap().position(), Position::new(-980.0, 27.0));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_removes_exactly_one_and_keeps_others_identical() {
    let design = sample_design();
    for target in ["a", "b", "c"] {
        let after = design.delete_element(target).unwrap();
        assert_eq!(after.len(), design.len() - 1);
        assert!(!after.contains(target));
        let survivors: Vec<&Element> = design.elements.iter().filter(|e| e.id() != target).collect();
        let remaining: Vec<&Element> = after.elements.iter().collect();
        assert_eq!(remaining, survivors);
    }
}

#[test]
fn delete_missing_element_errors() {
    let design = sample_design();
    assert!(matches!(design.delete_element("nope"), Err(DesignError::ElementNotFound(_))));
    assert_eq!(design.len(), 3);
}

#[test]
fn delete_last_element_leaves_empty_design() {
    let design = Design { elements: vec![text("only", 0.0, 0.0)] };
    assert!(design.delete_element("only").unwrap().is_empty());
}

// =============================================================
// Builders
// =============================================================

#[test]
fn text_builder_applies_defaults() {
    let Element::Text(t) = text_element("Hello", None, None, None, None).unwrap() else {
        panic!("expected text");
    };
    assert_eq!(t.content, "Hello");
    assert_eq!(t.color, DEFAULT_TEXT_COLOR);
    assert_eq!(t.font_size, DEFAULT_FONT_SIZE);
    assert_eq!(t.font_weight, "normal");
    assert_eq!(t.position, DEFAULT_POSITION);
}

#[test]
fn text_builder_rejects_whitespace() {
    assert_eq!(text_element("   ", None, None, None, None).unwrap_err(), DesignError::BlankText);
}

#[test]
fn builders_generate_unique_ids() {
    let a = image_element("x", None, None, None);
    let b = image_element("x", None, None, None);
    assert_ne!(a.id(), b.id());
}

#[test]
fn with_element_rejects_duplicate_id() {
    let design = sample_design();
    let err = design.with_element(text("a", 1.0, 1.0)).unwrap_err();
    assert_eq!(err, DesignError::DuplicateElement("a".into()));
}

#[test]
fn validate_accepts_distinct_ids() {
    assert_eq!(sample_design().validate(), Ok(()));
    assert_eq!(Design::new().validate(), Ok(()));
}

#[test]
fn validate_names_repeated_id() {
    let parsed: Design = serde_json::from_value(json!({
        "elements": [
            { "type": "text", "id": "dup", "content": "one", "color": "#000000", "fontSize": 12, "fontWeight": "normal", "position": { "x": 0, "y": 0 } },
            { "type": "text", "id": "dup", "content": "two", "color": "#000000", "fontSize": 12, "fontWeight": "normal", "position": { "x": 5, "y": 5 } }
        ]
    }))
    .unwrap();
    assert_eq!(parsed.validate(), Err(DesignError::DuplicateElement("dup".into())));
}

#[test]
fn with_element_appends_on_top() {
    let design = sample_design().with_element(image("d", 0.0, 0.0)).unwrap();
    assert_eq!(ids(&design), vec!["a", "b", "c", "d"]);
}

#[test]
fn with_id_keeps_everything_else() {
    let original = text("a", 3.0, 4.0);
    let renamed = original.with_id("fresh".into());
    assert_eq!(renamed.id(), "fresh");
    assert_eq!(renamed.position(), original.position());
    assert_eq!(renamed.kind(), "text");
}
