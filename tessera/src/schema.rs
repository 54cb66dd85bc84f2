//! Block schemas derived from fact signatures.
//!
//! [`derive`] is pure: one signature in, one schema out. The schema's field
//! order is the signature's parameter order, which the emitter relies on.

use crate::signature::ROOT_BLOCK_TYPE;
use crate::{FactSignature, ParamType, SignatureKind};
use serde::Serialize;
use serde_json::{json, Value as Json};

/// Value slot type that goal blocks plug into
pub const GOAL_CHECK: &str = "Goal";

/// Editor widget for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    NumberField,
    TextField,
}

impl From<ParamType> for FieldKind {
    fn from(ty: ParamType) -> Self {
        match ty {
            ParamType::Integer => FieldKind::NumberField,
            ParamType::Text => FieldKind::TextField,
        }
    }
}

impl FieldKind {
    fn editor_type(&self) -> &'static str {
        match self {
            FieldKind::NumberField => "field_number",
            FieldKind::TextField => "field_input",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Block shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeCategory {
    /// Connects in sequence, produces no value
    StatementShape,
    /// Produces a value for exactly one slot type
    ExpressionShape,
}

impl From<SignatureKind> for ShapeCategory {
    fn from(kind: SignatureKind) -> Self {
        match kind {
            SignatureKind::Statement => ShapeCategory::StatementShape,
            SignatureKind::Expression => ShapeCategory::ExpressionShape,
        }
    }
}

/// Display hint only; carries no meaning for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualGroup {
    pub hue: u16,
}

impl VisualGroup {
    pub const FACTS: VisualGroup = VisualGroup { hue: 210 };
    pub const GOALS: VisualGroup = VisualGroup { hue: 120 };
    pub const ROOT: VisualGroup = VisualGroup { hue: 0 };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockSchema {
    pub type_id: String,
    /// `(param, placeholder)` pairs, placeholders 1-based in param order
    pub display_template: Vec<(String, usize)>,
    pub field_specs: Vec<FieldSpec>,
    pub category: ShapeCategory,
    pub visual_group: VisualGroup,
}

/// Derive the block schema for one signature
pub fn derive(signature: &FactSignature) -> BlockSchema {
    let display_template = signature
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.clone(), i + 1))
        .collect();

    let field_specs = signature
        .params
        .iter()
        .map(|p| FieldSpec {
            name: p.name.clone(),
            kind: p.ty.into(),
        })
        .collect();

    let category = ShapeCategory::from(signature.kind);
    let visual_group = match category {
        ShapeCategory::StatementShape => VisualGroup::FACTS,
        ShapeCategory::ExpressionShape => VisualGroup::GOALS,
    };

    BlockSchema {
        type_id: signature.name.clone(),
        display_template,
        field_specs,
        category,
        visual_group,
    }
}

impl BlockSchema {
    /// The signature name, then one `param: %n` line per parameter
    pub fn label(&self) -> String {
        let mut label = self.type_id.clone();
        for (param, placeholder) in &self.display_template {
            label.push_str(&format!("\n{}: %{}", param, placeholder));
        }
        label
    }

    /// Block definition in the editor's JSON format
    pub fn to_block_json(&self) -> Json {
        let args: Vec<Json> = self
            .field_specs
            .iter()
            .map(|field| match field.kind {
                FieldKind::NumberField => json!({
                    "type": field.kind.editor_type(),
                    "name": field.name,
                    "value": 0,
                    "precision": 1,
                }),
                FieldKind::TextField => json!({
                    "type": field.kind.editor_type(),
                    "name": field.name,
                    "text": "",
                }),
            })
            .collect();

        let mut block = json!({
            "type": self.type_id,
            "message0": self.label(),
            "args0": args,
            "colour": self.visual_group.hue,
            "tooltip": self.type_id,
        });

        if let Json::Object(map) = &mut block {
            match self.category {
                ShapeCategory::StatementShape => {
                    map.insert("previousStatement".to_string(), Json::Null);
                    map.insert("nextStatement".to_string(), Json::Null);
                }
                ShapeCategory::ExpressionShape => {
                    map.insert("output".to_string(), json!(GOAL_CHECK));
                }
            }
        }

        block
    }
}

/// The fixed root block holding the fact sequence and the goal slot
pub fn root_block_json() -> Json {
    json!({
        "type": ROOT_BLOCK_TYPE,
        "message0": "facts %1 goal %2",
        "args0": [
            { "type": "input_statement", "name": "FACTS" },
            { "type": "input_value", "name": "GOAL", "check": GOAL_CHECK },
        ],
        "colour": VisualGroup::ROOT.hue,
        "tooltip": "The program: facts in order, then one goal",
        "deletable": false,
    })
}

/// Schemas split into the two editor palette groups, catalogue order kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub facts: Vec<String>,
    pub goals: Vec<String>,
}

impl Palette {
    pub const FACTS: &'static str = "Facts";
    pub const GOALS: &'static str = "Goals";

    pub fn classify<'a>(schemas: impl IntoIterator<Item = &'a BlockSchema>) -> Self {
        let mut palette = Palette::default();
        for schema in schemas {
            match schema.category {
                ShapeCategory::StatementShape => palette.facts.push(schema.type_id.clone()),
                ShapeCategory::ExpressionShape => palette.goals.push(schema.type_id.clone()),
            }
        }
        palette
    }

    /// Category toolbox in the editor's JSON format
    pub fn to_toolbox_json(&self) -> Json {
        let category = |name: &str, group: VisualGroup, types: &[String]| {
            json!({
                "kind": "category",
                "name": name,
                "colour": group.hue,
                "contents": types
                    .iter()
                    .map(|t| json!({ "kind": "block", "type": t }))
                    .collect::<Vec<_>>(),
            })
        };

        json!({
            "kind": "categoryToolbox",
            "contents": [
                category(Self::FACTS, VisualGroup::FACTS, self.facts.as_slice()),
                category(Self::GOALS, VisualGroup::GOALS, self.goals.as_slice()),
            ],
        })
    }
}
