use super::bee_catalogue;
use crate::schema::{derive, root_block_json, FieldKind, Palette, ShapeCategory, VisualGroup};
use crate::{Engine, FactSignature, ParamType, SignatureKind};

#[test]
fn test_derive_statement_schema() {
    let sig = FactSignature::new("hive", SignatureKind::Statement)
        .with_param("name", ParamType::Text)
        .with_param("frames", ParamType::Integer);
    let schema = derive(&sig);

    assert_eq!(schema.type_id, "hive");
    assert_eq!(schema.category, ShapeCategory::StatementShape);
    assert_eq!(schema.visual_group, VisualGroup::FACTS);
    assert_eq!(
        schema.display_template,
        vec![("name".to_string(), 1), ("frames".to_string(), 2)]
    );
    let kinds: Vec<FieldKind> = schema.field_specs.iter().map(|f| f.kind).collect();
    assert_eq!(kinds, vec![FieldKind::TextField, FieldKind::NumberField]);
}

#[test]
fn test_label_lists_one_line_per_param() {
    let sig = FactSignature::new("find_queen", SignatureKind::Expression)
        .with_param("hive", ParamType::Text)
        .with_param("max_days", ParamType::Integer);
    assert_eq!(derive(&sig).label(), "find_queen\nhive: %1\nmax_days: %2");

    let bare = FactSignature::new("census", SignatureKind::Expression);
    assert_eq!(derive(&bare).label(), "census");
}

#[test]
fn test_statement_block_json() {
    let sig = FactSignature::new("has_count", SignatureKind::Statement)
        .with_param("n", ParamType::Integer);
    let block = derive(&sig).to_block_json();

    assert_eq!(block["type"], "has_count");
    assert_eq!(block["message0"], "has_count\nn: %1");
    assert_eq!(block["args0"][0]["type"], "field_number");
    assert_eq!(block["args0"][0]["name"], "n");
    assert!(block["previousStatement"].is_null());
    assert!(block.get("previousStatement").is_some());
    assert!(block.get("nextStatement").is_some());
    assert!(block.get("output").is_none());
}

#[test]
fn test_expression_block_json() {
    let sig = FactSignature::new("find", SignatureKind::Expression)
        .with_param("species", ParamType::Text);
    let block = derive(&sig).to_block_json();

    assert_eq!(block["output"], "Goal");
    assert_eq!(block["args0"][0]["type"], "field_input");
    assert!(block.get("previousStatement").is_none());
}

#[test]
fn test_root_block_accepts_goal_blocks() {
    let root = root_block_json();
    assert_eq!(root["type"], "program");
    assert_eq!(root["args0"][1]["check"], "Goal");
}

#[test]
fn test_palette_groups_in_catalogue_order() {
    let engine = Engine::new(bee_catalogue());
    let palette = engine.palette();

    assert_eq!(palette.facts, vec!["has_count", "is_species", "hive"]);
    assert_eq!(palette.goals, vec!["find_queen", "census"]);

    let toolbox = palette.to_toolbox_json();
    assert_eq!(toolbox["contents"][0]["name"], Palette::FACTS);
    assert_eq!(toolbox["contents"][1]["name"], Palette::GOALS);
    assert_eq!(toolbox["contents"][1]["contents"][1]["type"], "census");
}

#[test]
fn test_block_definitions_start_with_root() {
    let engine = Engine::new(bee_catalogue());
    let blocks = engine.block_definitions_json();
    let blocks = blocks.as_array().unwrap();
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[0]["type"], "program");
    assert_eq!(blocks[1]["type"], "has_count");
}
