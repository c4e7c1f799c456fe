use std::sync::{Arc, Mutex};

use fieldform::NodeEditor;
use fieldform_core::{ConfigNode, DesignerConfig, FieldDescriptor, TypeDefinition, TypeRegistry};
use serde_json::json;

fn registry() -> Arc<dyn TypeRegistry + Send + Sync> {
    Arc::new(
        DesignerConfig::new()
            .with_type(
                TypeDefinition::new("input").field(FieldDescriptor::labeled(
                    "placeholder",
                    "Placeholder",
                )),
            )
            .expect("type registers")
            .with_type(
                TypeDefinition::new("select").field(FieldDescriptor::new("options")),
            )
            .expect("type registers")
            .with_type(TypeDefinition::new("repeat").container())
            .expect("type registers"),
    )
}

fn observed(editor: &mut NodeEditor) -> Arc<Mutex<Vec<ConfigNode>>> {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&emissions);
    editor.on_change(move |node| {
        sink.lock().unwrap().push(node);
    });
    emissions
}

#[test]
fn property_set_value_never_echoes_an_emission() {
    let mut editor = NodeEditor::new(registry());
    let emissions = observed(&mut editor);

    for value in [
        json!({}),
        json!({"key": "name", "type": "input"}),
        json!({"key": "other", "className": "col-6", "type": "select", "wrappers": ["card"]}),
        json!(null),
        json!("not a node"),
    ] {
        editor.set_value(value);
        editor.tick();
    }

    assert!(
        emissions.lock().unwrap().is_empty(),
        "externally pushed values must never be echoed back as changes"
    );
}

#[test]
fn property_edits_within_one_turn_coalesce_into_one_emission() {
    let mut editor = NodeEditor::new(registry());
    let emissions = observed(&mut editor);
    editor.set_value(json!({"key": "name", "type": "input"}));

    editor.edit_key("renamed");
    editor.edit_class_name("col-6");
    editor.edit_field("placeholder", json!("type here"));
    editor.tick();

    let emitted = emissions.lock().unwrap();
    assert_eq!(emitted.len(), 1, "one turn, one coalesced update");
    let node = &emitted[0];
    assert_eq!(node.key, "renamed");
    assert_eq!(node.class_name, "col-6");
    assert_eq!(node.type_id, "input");
    assert_eq!(node.extra["placeholder"], json!("type here"));
}

#[test]
fn drained_turn_emits_nothing_further() {
    let mut editor = NodeEditor::new(registry());
    let emissions = observed(&mut editor);
    editor.set_value(json!({"key": "name", "type": "input"}));

    editor.edit_key("renamed");
    editor.tick();
    editor.tick();
    editor.tick();

    assert_eq!(emissions.lock().unwrap().len(), 1);
}

#[test]
fn external_write_cancels_an_update_scheduled_before_it() {
    let mut editor = NodeEditor::new(registry());
    let emissions = observed(&mut editor);
    editor.set_value(json!({"key": "name", "type": "input"}));

    editor.edit_key("stale");
    editor.set_value(json!({"key": "fresh", "type": "input"}));
    editor.tick();

    assert!(
        emissions.lock().unwrap().is_empty(),
        "an update scheduled before suppression must be discarded, not applied"
    );
    assert_eq!(editor.outer().key, "fresh");
}

#[test]
fn emissions_are_structurally_independent_copies() {
    let mut editor = NodeEditor::new(registry());
    let emissions = observed(&mut editor);
    editor.set_value(json!({"key": "name", "type": "input"}));

    editor.edit_key("renamed");
    editor.tick();

    {
        let mut emitted = emissions.lock().unwrap();
        let node = &mut emitted[0];
        node.key = "mutated by host".into();
        node.extra.insert("injected".into(), json!(true));
    }
    assert_eq!(editor.value().key, "renamed");
    assert!(!editor.value().extra.contains_key("injected"));
}

#[test]
fn outer_and_inner_edits_merge_commutatively() {
    let mut left = NodeEditor::new(registry());
    let left_emissions = observed(&mut left);
    let mut right = NodeEditor::new(registry());
    let right_emissions = observed(&mut right);
    let seed = json!({"key": "name", "type": "input"});
    left.set_value(seed.clone());
    right.set_value(seed);

    left.edit_key("renamed");
    left.edit_field("placeholder", json!("p"));
    left.tick();

    right.edit_field("placeholder", json!("p"));
    right.edit_key("renamed");
    right.tick();

    assert_eq!(
        left_emissions.lock().unwrap().as_slice(),
        right_emissions.lock().unwrap().as_slice(),
        "the surfaces write disjoint fields, so edit order cannot matter"
    );
}

#[test]
fn update_with_no_listener_is_a_no_op() {
    let mut editor = NodeEditor::new(registry());
    editor.set_value(json!({"key": "name", "type": "input"}));
    editor.edit_key("renamed");
    editor.tick();
    // Registering afterwards must not replay the drained turn.
    let emissions = observed(&mut editor);
    editor.tick();
    assert!(emissions.lock().unwrap().is_empty());
}
