use std::fmt::{self, Write};

use crate::value::{Array, Object, Value};

/// One indentation unit in pretty output.
const INDENT: &str = "  ";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        write_value(&mut output, self, 0);
        f.write_str(&output)
    }
}

/// Formats a value at the given nesting depth.
fn write_value(output: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(output, *n),
        Value::String(s) => write_string_literal(output, s),
        Value::Array(array) => write_array(output, array, depth),
        Value::Object(object) => write_object(output, object, depth),
    }
}

fn write_array(output: &mut String, array: &Array, depth: usize) {
    if array.is_empty() {
        output.push_str("[]");
        return;
    }

    output.push_str("[\n");
    let child_indent = INDENT.repeat(depth + 1);
    for (i, element) in array.iter().enumerate() {
        output.push_str(&child_indent);
        write_value(output, element, depth + 1);
        if i + 1 < array.len() {
            output.push(',');
        }
        output.push('\n');
    }
    output.push_str(&INDENT.repeat(depth));
    output.push(']');
}

fn write_object(output: &mut String, object: &Object, depth: usize) {
    if object.is_empty() {
        output.push_str("{}");
        return;
    }

    output.push_str("{\n");
    let child_indent = INDENT.repeat(depth + 1);
    for (i, (key, value)) in object.iter().enumerate() {
        output.push_str(&child_indent);
        write_string_literal(output, key);
        output.push_str(": ");
        write_value(output, value, depth + 1);
        if i + 1 < object.len() {
            output.push(',');
        }
        output.push('\n');
    }
    output.push_str(&INDENT.repeat(depth));
    output.push('}');
}

/// Values equal to their truncation print without a fractional part;
/// everything else uses the default floating-point formatting.
fn write_number(output: &mut String, n: f64) {
    if n.is_finite() && n == n.trunc() && n.abs() < 9e15 {
        write!(output, "{}", n as i64).unwrap();
    } else {
        write!(output, "{}", n).unwrap();
    }
}

/// Formats a string as a quoted literal.
///
/// Quotes, backslashes, and the named control characters are escaped so the
/// output reparses to the same value. Other control characters pass through
/// raw, matching what the parser accepts.
fn write_string_literal(output: &mut String, s: &str) {
    output.push('"');
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c => output.push(c),
        }
    }
    output.push('"');
}
