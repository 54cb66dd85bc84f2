use proptest::prelude::*;
use std::collections::BTreeMap;
use tessera::persistence::{load, save};
use tessera::{
    assemble, derive, parse_program_with, Catalogue, FactNode, FactSignature, FieldKind,
    ParamType, Registry, ResourceLimits, RootNode, SignatureKind, Value,
};

fn param_type() -> impl Strategy<Value = ParamType> {
    prop_oneof![Just(ParamType::Integer), Just(ParamType::Text)]
}

fn signature(index: usize, kind: SignatureKind) -> impl Strategy<Value = FactSignature> {
    prop::collection::vec(param_type(), 0..6).prop_map(move |types| {
        types
            .into_iter()
            .enumerate()
            .fold(
                FactSignature::new(format!("sig_{}", index), kind),
                |sig, (i, ty)| sig.with_param(format!("p{}", i), ty),
            )
    })
}

/// At least one statement and one expression signature
fn catalogue() -> impl Strategy<Value = Catalogue> {
    (1usize..5, 1usize..4)
        .prop_flat_map(|(statements, expressions)| {
            let mut sigs = Vec::new();
            for i in 0..statements {
                sigs.push(signature(i, SignatureKind::Statement).boxed());
            }
            for i in statements..statements + expressions {
                sigs.push(signature(i, SignatureKind::Expression).boxed());
            }
            sigs
        })
        .prop_map(|sigs| Catalogue::from_signatures(sigs).unwrap())
}

fn value_for(ty: ParamType) -> BoxedStrategy<Value> {
    match ty {
        ParamType::Integer => any::<i64>().prop_map(Value::Integer).boxed(),
        ParamType::Text => "[ -~\n\t]{0,12}".prop_map(Value::Text).boxed(),
    }
}

fn node_for(sig: &FactSignature) -> BoxedStrategy<FactNode> {
    let name = sig.name.clone();
    let fields: Vec<_> = sig
        .params
        .iter()
        .map(|p| {
            let param = p.name.clone();
            value_for(p.ty).prop_map(move |v| (param.clone(), v))
        })
        .collect();
    fields
        .prop_map(move |values| FactNode {
            signature: name.clone(),
            values: values.into_iter().collect::<BTreeMap<_, _>>(),
        })
        .boxed()
}

/// A catalogue with a complete tree built from it
fn catalogue_and_tree() -> impl Strategy<Value = (Catalogue, RootNode)> {
    catalogue().prop_flat_map(|catalogue| {
        let statements: Vec<FactSignature> = catalogue
            .iter()
            .filter(|s| s.kind == SignatureKind::Statement)
            .cloned()
            .collect();
        let goals: Vec<FactSignature> = catalogue
            .iter()
            .filter(|s| s.kind == SignatureKind::Expression)
            .cloned()
            .collect();

        let statement = prop::sample::select(statements).prop_flat_map(|s| node_for(&s));
        let goal = prop::sample::select(goals).prop_flat_map(|s| node_for(&s));

        (
            Just(catalogue),
            prop::collection::vec(statement, 0..6),
            goal,
        )
            .prop_map(|(catalogue, statements, goal)| {
                (
                    catalogue,
                    RootNode {
                        statements,
                        goal: Some(goal),
                    },
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_field_specs_follow_params(catalogue in catalogue()) {
        for sig in catalogue.iter() {
            let schema = derive(sig);
            prop_assert_eq!(schema.field_specs.len(), sig.params.len());
            for (field, param) in schema.field_specs.iter().zip(&sig.params) {
                prop_assert_eq!(&field.name, &param.name);
                prop_assert_eq!(field.kind, FieldKind::from(param.ty));
            }
        }
    }

    #[test]
    fn prop_save_load_round_trip((_catalogue, tree) in catalogue_and_tree()) {
        let blob = save(&tree).unwrap();
        prop_assert_eq!(load(&blob, &ResourceLimits::default()).unwrap(), tree);
    }

    #[test]
    fn prop_program_parses_back((catalogue, tree) in catalogue_and_tree()) {
        let registry = Registry::from_catalogue(&catalogue);
        let program = assemble(&tree, &registry).unwrap();
        let parsed = parse_program_with(&program, None, &catalogue).unwrap();
        prop_assert_eq!(parsed, tree);
    }

    #[test]
    fn prop_statement_fragment_layout(n in any::<i64>(), species in "[a-z ]{0,10}") {
        let catalogue = Catalogue::from_signatures(vec![
            FactSignature::new("observed", SignatureKind::Statement)
                .with_param("count", ParamType::Integer)
                .with_param("species", ParamType::Text),
        ]).unwrap();
        let registry = Registry::from_catalogue(&catalogue);
        let node = FactNode::new("observed")
            .with_value("species", species.as_str())
            .with_value("count", n);
        let code = registry.emit(&node).unwrap().into_code();
        prop_assert_eq!(code, format!("(observed {} \"{}\")\n", n, species));
    }
}
