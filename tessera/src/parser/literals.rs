use crate::Value;

pub(crate) fn parse_integer(digits: &str) -> Option<Value> {
    digits.parse::<i64>().ok().map(Value::Integer)
}

/// Undo the escaping applied by [`crate::emitter::quote_text`]. The grammar
/// only admits the five escapes the emitter produces.
pub(crate) fn unescape_text(raw: &str) -> Value {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }
    Value::Text(text)
}
