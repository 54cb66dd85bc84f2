use crate::{Fragment, Registry, RootNode, SignatureKind, TesseraError, TesseraResult};
use tracing::debug;

const INDENT: &str = "  ";

/// Compile a root node into program text.
///
/// Statement fragments are indented and concatenated in child order, the
/// goal fragment is trimmed, and both blocks are wrapped as
/// `(facts ...)` and `(goal ...)` separated by one blank line. Nothing is
/// returned unless every node emits.
pub fn assemble(root: &RootNode, registry: &Registry) -> TesseraResult<String> {
    let goal_node = root.goal.as_ref().ok_or(TesseraError::MissingGoal)?;

    let mut facts = String::new();
    for node in &root.statements {
        match registry.emit(node)? {
            Fragment::Statement(code) => {
                for line in code.lines() {
                    facts.push_str(INDENT);
                    facts.push_str(line);
                    facts.push('\n');
                }
            }
            Fragment::Expression(..) => {
                return Err(TesseraError::KindMismatch {
                    signature: node.signature.clone(),
                    expected: SignatureKind::Statement.to_string(),
                    found: SignatureKind::Expression.to_string(),
                })
            }
        }
    }

    let goal = match registry.emit(goal_node)? {
        Fragment::Expression(code, _order) => code,
        Fragment::Statement(_) => {
            return Err(TesseraError::KindMismatch {
                signature: goal_node.signature.clone(),
                expected: SignatureKind::Expression.to_string(),
                found: SignatureKind::Statement.to_string(),
            })
        }
    };

    debug!(statements = root.statements.len(), "program assembled");
    Ok(format!(
        "(facts\n{INDENT}{})\n\n(goal\n{INDENT}{})",
        facts.trim(),
        goal.trim()
    ))
}
