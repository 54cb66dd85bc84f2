use ariadne::{Color, Label, Report, ReportKind, Source};
use tessera::TesseraError;

/// Format a TesseraError with fancy terminal output using Ariadne
pub fn format_error(error: &TesseraError) -> String {
    match error {
        TesseraError::Parse(details) => {
            let mut output = Vec::new();

            let mut report =
                Report::build(ReportKind::Error, &details.source_id, details.span.start)
                    .with_message(format!(
                        "Parse error: {} ({}:{})",
                        details.message, details.source_id, details.span
                    ))
                    .with_label(
                        Label::new((&details.source_id, details.span.start..details.span.end))
                            .with_message("")
                            .with_color(Color::Red),
                    );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        TesseraError::MissingGoal => {
            "Compile error: the program has no goal\n  Add an analysis block to the goal slot"
                .to_string()
        }
        TesseraError::IncompleteNode { signature, param } => format!(
            "Compile error: '{}' has no value for '{}'\n  Fill in every field before compiling",
            signature, param
        ),
        TesseraError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => format!(
            "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
            limit_name, limit_value, actual_value, suggestion
        ),
        other => format!("Error: {}", other),
    }
}
