use super::bee_catalogue;
use crate::{
    assemble, Catalogue, FactNode, FactSignature, ParamType, Registry, RootNode, SignatureKind,
    TesseraError,
};

fn abg_registry() -> Registry {
    let catalogue = Catalogue::from_signatures(vec![
        FactSignature::new("a", SignatureKind::Statement).with_param("x", ParamType::Integer),
        FactSignature::new("b", SignatureKind::Statement).with_param("x", ParamType::Integer),
        FactSignature::new("g", SignatureKind::Expression).with_param("x", ParamType::Integer),
    ])
    .unwrap();
    Registry::from_catalogue(&catalogue)
}

#[test]
fn test_assemble_exact_layout() {
    let root = RootNode {
        statements: vec![
            FactNode::new("a").with_value("x", 1),
            FactNode::new("b").with_value("x", 2),
        ],
        goal: Some(FactNode::new("g").with_value("x", 3)),
    };
    assert_eq!(
        assemble(&root, &abg_registry()).unwrap(),
        "(facts\n  (a 1)\n  (b 2))\n\n(goal\n  (g 3))"
    );
}

#[test]
fn test_assemble_empty_facts() {
    let root = RootNode {
        statements: vec![],
        goal: Some(FactNode::new("g").with_value("x", 3)),
    };
    assert_eq!(
        assemble(&root, &abg_registry()).unwrap(),
        "(facts\n  )\n\n(goal\n  (g 3))"
    );
}

#[test]
fn test_assemble_missing_goal() {
    let root = RootNode {
        statements: vec![FactNode::new("a").with_value("x", 1)],
        goal: None,
    };
    assert!(matches!(
        assemble(&root, &abg_registry()).unwrap_err(),
        TesseraError::MissingGoal
    ));
}

#[test]
fn test_assemble_incomplete_statement_emits_nothing() {
    let root = RootNode {
        statements: vec![
            FactNode::new("a").with_value("x", 1),
            FactNode::new("b"),
        ],
        goal: Some(FactNode::new("g").with_value("x", 3)),
    };
    let before = root.clone();
    let err = assemble(&root, &abg_registry()).unwrap_err();
    assert!(matches!(err, TesseraError::IncompleteNode { .. }));
    assert_eq!(root, before);
}

#[test]
fn test_assemble_rejects_expression_in_facts() {
    let root = RootNode {
        statements: vec![FactNode::new("g").with_value("x", 1)],
        goal: Some(FactNode::new("g").with_value("x", 3)),
    };
    assert!(matches!(
        assemble(&root, &abg_registry()).unwrap_err(),
        TesseraError::KindMismatch { .. }
    ));
}

#[test]
fn test_assemble_mixed_value_types() {
    let registry = Registry::from_catalogue(&bee_catalogue());
    let root = RootNode {
        statements: vec![
            FactNode::new("is_species").with_value("species", "bee"),
            FactNode::new("hive")
                .with_value("name", "north")
                .with_value("frames", 10),
        ],
        goal: Some(FactNode::new("census")),
    };
    insta::assert_snapshot!(assemble(&root, &registry).unwrap(), @r#"
    (facts
      (is_species "bee")
      (hive "north" 10))

    (goal
      (census))
    "#);
}
