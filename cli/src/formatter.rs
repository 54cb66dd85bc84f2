use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use tessera::{Catalogue, RootNode, Value};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    /// One row per signature: name, kind and `param: type` list
    pub fn format_catalogue(&self, catalogue: &Catalogue) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Signature").set_alignment(CellAlignment::Left),
            Cell::new("Kind").set_alignment(CellAlignment::Left),
            Cell::new("Parameters").set_alignment(CellAlignment::Left),
        ]));

        for signature in catalogue.iter() {
            let params = signature
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(Row::from(vec![
                signature.name.clone(),
                signature.kind.to_string(),
                params,
            ]));
        }

        format!("{}\n", table)
    }

    /// Summary of a stored tree, statements first, then the goal
    pub fn format_tree_summary(&self, tree: &RootNode) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Slot"),
            Cell::new("Signature"),
            Cell::new("Values"),
        ]));

        for (i, node) in tree.statements.iter().enumerate() {
            table.add_row(Row::from(vec![
                format!("fact {}", i + 1),
                node.signature.clone(),
                format_values(node.values.iter()),
            ]));
        }
        match &tree.goal {
            Some(goal) => table.add_row(Row::from(vec![
                "goal".to_string(),
                goal.signature.clone(),
                format_values(goal.values.iter()),
            ])),
            None => table.add_row(Row::from(vec!["goal", "?", ""])),
        };

        format!("{}\n", table)
    }
}

fn format_values<'a>(values: impl Iterator<Item = (&'a String, &'a Value)>) -> String {
    values
        .map(|(name, value)| match value {
            Value::Integer(n) => format!("{}={}", name, n),
            Value::Text(s) => format!("{}={:?}", name, s),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
