use crate::{Catalogue, FactSignature, ParamType, SignatureKind};


// Schema tests
mod schema;

// Code generation tests
mod assembler;



/// A small catalogue: two annotations, two analyses
pub(crate) fn bee_catalogue() -> Catalogue {
    Catalogue::from_signatures(vec![
        FactSignature::new("has_count", SignatureKind::Statement).with_param("n", ParamType::Integer),
        FactSignature::new("is_species", SignatureKind::Statement)
            .with_param("species", ParamType::Text),
        FactSignature::new("hive", SignatureKind::Statement)
            .with_param("name", ParamType::Text)
            .with_param("frames", ParamType::Integer),
        FactSignature::new("find_queen", SignatureKind::Expression)
            .with_param("hive", ParamType::Text)
            .with_param("max_days", ParamType::Integer),
        FactSignature::new("census", SignatureKind::Expression),
    ])
    .unwrap()
}
