use crate::cursor::Cursor;
use crate::value::{Array, Object, Value};
use crate::{ParseError, ParseErrorKind, ParseResult};

/// Parse JSON text into a value tree.
///
/// The input must contain exactly one value; anything but whitespace after
/// it is a [`ParseErrorKind::TrailingContent`] error.
pub fn parse(text: &str) -> ParseResult<Value> {
    let mut cursor = Cursor::new(text);
    let value = parse_value(&mut cursor)?;

    cursor.skip_whitespace();
    if !cursor.is_at_end() {
        return Err(ParseError::new(ParseErrorKind::TrailingContent {
            remaining: cursor.remaining(),
        }));
    }

    Ok(value)
}

/// Parses a single value, dispatching on the first non-whitespace byte.
fn parse_value(cursor: &mut Cursor) -> ParseResult<Value> {
    cursor.skip_whitespace();
    match cursor.peek() {
        Some(b'{') => parse_object(cursor),
        Some(b'[') => parse_array(cursor),
        Some(b'"') => Ok(Value::String(parse_string(cursor)?)),
        Some(b't') | Some(b'f') => parse_boolean(cursor),
        Some(b'n') => parse_null(cursor),
        Some(b'-') | Some(b'0'..=b'9') => parse_number(cursor),
        Some(byte) => Err(ParseError::new(ParseErrorKind::UnexpectedCharacter(
            byte,
            cursor.offset(),
        ))),
        None => Err(ParseError::new(ParseErrorKind::UnexpectedEof)),
    }
}

fn parse_null(cursor: &mut Cursor) -> ParseResult<Value> {
    let start = cursor.offset();
    if cursor.eat_keyword("null") {
        Ok(Value::Null)
    } else {
        Err(ParseError::new(ParseErrorKind::MalformedLiteral(start)))
    }
}

fn parse_boolean(cursor: &mut Cursor) -> ParseResult<Value> {
    let start = cursor.offset();
    if cursor.eat_keyword("true") {
        Ok(Value::Bool(true))
    } else if cursor.eat_keyword("false") {
        Ok(Value::Bool(false))
    } else {
        Err(ParseError::new(ParseErrorKind::MalformedLiteral(start)))
    }
}

/// Parses `'-'? digit+ ('.' digit+)?`.
///
/// The integer part accumulates by repeated multiply-and-add, the fraction
/// by division-based weighting. At least one digit is required on each side
/// of the decimal point; there is no exponent notation.
fn parse_number(cursor: &mut Cursor) -> ParseResult<Value> {
    let start = cursor.offset();
    let negative = cursor.eat(b'-');

    let mut value = 0f64;
    let mut integer_digits = 0;
    while let Some(byte @ b'0'..=b'9') = cursor.peek() {
        value = value * 10.0 + f64::from(byte - b'0');
        integer_digits += 1;
        cursor.bump();
    }
    if integer_digits == 0 {
        return Err(ParseError::new(ParseErrorKind::MalformedNumber(start)));
    }

    if cursor.eat(b'.') {
        let mut weight = 0.1;
        let mut fraction_digits = 0;
        while let Some(byte @ b'0'..=b'9') = cursor.peek() {
            value += f64::from(byte - b'0') * weight;
            weight *= 0.1;
            fraction_digits += 1;
            cursor.bump();
        }
        if fraction_digits == 0 {
            return Err(ParseError::new(ParseErrorKind::MalformedNumber(start)));
        }
    }

    Ok(Value::Number(if negative { -value } else { value }))
}

/// Parses a quoted string, decoding two-character backslash escapes.
///
/// Unescaped runs are copied out of the input in one piece. `\uXXXX` is not
/// decoded and surfaces as an unsupported escape.
fn parse_string(cursor: &mut Cursor) -> ParseResult<String> {
    let open = cursor.offset();
    cursor.bump(); // opening quote, already seen by the dispatcher

    let mut content = String::new();
    let mut run_start = cursor.offset();
    loop {
        match cursor.peek() {
            Some(b'"') => {
                content.push_str(cursor.slice(run_start, cursor.offset()));
                cursor.bump();
                return Ok(content);
            }
            Some(b'\\') => {
                content.push_str(cursor.slice(run_start, cursor.offset()));
                let escape_at = cursor.offset();
                cursor.bump();
                let decoded = match cursor.peek() {
                    None => {
                        return Err(ParseError::new(ParseErrorKind::UnterminatedString(open)));
                    }
                    Some(b'"') => '"',
                    Some(b'\\') => '\\',
                    Some(b'/') => '/',
                    Some(b'n') => '\n',
                    Some(b'r') => '\r',
                    Some(b't') => '\t',
                    Some(b'b') => '\u{0008}',
                    Some(b'f') => '\u{000C}',
                    Some(_) => {
                        return Err(ParseError::new(ParseErrorKind::InvalidEscape(escape_at)));
                    }
                };
                cursor.bump();
                content.push(decoded);
                run_start = cursor.offset();
            }
            Some(_) => cursor.bump(),
            None => return Err(ParseError::new(ParseErrorKind::UnterminatedString(open))),
        }
    }
}

fn parse_array(cursor: &mut Cursor) -> ParseResult<Value> {
    cursor.bump(); // '['
    let mut array = Array::new();

    cursor.skip_whitespace();
    if cursor.eat(b']') {
        return Ok(Value::Array(array));
    }

    loop {
        array.add(parse_value(cursor)?);

        cursor.skip_whitespace();
        if cursor.eat(b',') {
            continue;
        }
        if cursor.eat(b']') {
            return Ok(Value::Array(array));
        }
        return Err(ParseError::new(ParseErrorKind::MalformedArray(
            cursor.offset(),
        )));
    }
}

fn parse_object(cursor: &mut Cursor) -> ParseResult<Value> {
    cursor.bump(); // '{'
    let mut object = Object::new();

    cursor.skip_whitespace();
    if cursor.eat(b'}') {
        return Ok(Value::Object(object));
    }

    loop {
        cursor.skip_whitespace();
        if cursor.peek() != Some(b'"') {
            return Err(ParseError::new(ParseErrorKind::MalformedObject(
                cursor.offset(),
            )));
        }
        let key = parse_string(cursor)?;

        cursor.skip_whitespace();
        if !cursor.eat(b':') {
            return Err(ParseError::new(ParseErrorKind::MalformedObject(
                cursor.offset(),
            )));
        }

        // A repeated key replaces the earlier entry; the last value wins.
        object.set(key, parse_value(cursor)?);

        cursor.skip_whitespace();
        if cursor.eat(b',') {
            continue;
        }
        if cursor.eat(b'}') {
            return Ok(Value::Object(object));
        }
        return Err(ParseError::new(ParseErrorKind::MalformedObject(
            cursor.offset(),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::value::{Array, Object, Value};
    use crate::ParseErrorKind;

    fn kind_of(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().kind().clone()
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_parse_truncated_literals() {
        assert_eq!(kind_of("tru"), ParseErrorKind::MalformedLiteral(0));
        assert_eq!(kind_of("fals"), ParseErrorKind::MalformedLiteral(0));
        assert_eq!(kind_of("nul"), ParseErrorKind::MalformedLiteral(0));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse("42").unwrap(), Value::Number(42.0));
        assert_eq!(parse("-123").unwrap(), Value::Number(-123.0));
        assert_eq!(parse("0").unwrap(), Value::Number(0.0));
        assert_eq!(parse("3.25").unwrap(), Value::Number(3.25));
        assert_eq!(parse("-0.5").unwrap(), Value::Number(-0.5));
        // Leading zeros are accepted.
        assert_eq!(parse("007").unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_parse_malformed_numbers() {
        assert_eq!(kind_of("-"), ParseErrorKind::MalformedNumber(0));
        assert_eq!(kind_of("1."), ParseErrorKind::MalformedNumber(0));
        assert_eq!(kind_of("-.5"), ParseErrorKind::MalformedNumber(0));
    }

    #[test]
    fn test_no_exponent_notation() {
        assert_eq!(
            kind_of("1e3"),
            ParseErrorKind::TrailingContent { remaining: 2 }
        );
    }

    #[test]
    fn test_parse_strings() {
        assert_eq!(
            parse(r#""hello""#).unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(parse(r#""""#).unwrap(), Value::String(String::new()));
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            parse(r#""a \"quoted\" word""#).unwrap(),
            Value::String("a \"quoted\" word".to_string())
        );
        assert_eq!(
            parse(r#""back\\slash""#).unwrap(),
            Value::String("back\\slash".to_string())
        );
        assert_eq!(
            parse(r#""line\nbreak\ttab""#).unwrap(),
            Value::String("line\nbreak\ttab".to_string())
        );
        assert_eq!(parse(r#""\/""#).unwrap(), Value::String("/".to_string()));
    }

    #[test]
    fn test_unsupported_escape() {
        assert_eq!(kind_of(r#""\u0041""#), ParseErrorKind::InvalidEscape(1));
        assert_eq!(kind_of(r#""\x""#), ParseErrorKind::InvalidEscape(1));
    }

    #[test]
    fn test_parse_string_multibyte() {
        assert_eq!(
            parse("\"caf\u{e9} \u{2603}\"").unwrap(),
            Value::String("caf\u{e9} \u{2603}".to_string())
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(kind_of(r#""abc"#), ParseErrorKind::UnterminatedString(0));
        assert_eq!(kind_of(r#""abc\"#), ParseErrorKind::UnterminatedString(0));
        // The naive preceding-character quote rule this replaces broke on a
        // backslash before the closing quote; escapes are consumed as a unit.
        assert_eq!(
            parse(r#""ends with \\""#).unwrap(),
            Value::String("ends with \\".to_string())
        );
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(parse("[]").unwrap(), Value::Array(Array::new()));

        let mut expected = Array::new();
        expected.add(1);
        expected.add(2);
        expected.add(3);
        assert_eq!(parse("[1, 2, 3]").unwrap(), Value::Array(expected));
    }

    #[test]
    fn test_parse_nested_arrays() {
        let parsed = parse("[[true], []]").unwrap();
        let outer = parsed.get_array().unwrap();
        assert_eq!(outer.len(), 2);
        let first = outer.get(0).unwrap().get_array().unwrap();
        assert_eq!(first.get(0).unwrap().get_bool(), Ok(true));
        assert!(outer.get(1).unwrap().get_array().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_arrays() {
        assert_eq!(kind_of("[1, 2"), ParseErrorKind::MalformedArray(5));
        assert_eq!(kind_of("[1 2]"), ParseErrorKind::MalformedArray(3));
        // A comma with no value after it fails at the value dispatch.
        assert!(matches!(
            kind_of("[1,]"),
            ParseErrorKind::UnexpectedCharacter(b']', _)
        ));
    }

    #[test]
    fn test_parse_objects() {
        assert_eq!(parse("{}").unwrap(), Value::Object(Object::new()));

        let mut expected = Object::new();
        expected.set("a", 1);
        expected.set("b", 2);
        assert_eq!(
            parse(r#"{"a": 1, "b": 2}"#).unwrap(),
            Value::Object(expected)
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let parsed = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        let object = parsed.get_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("a").unwrap().get_f64(), Ok(2.0));
    }

    #[test]
    fn test_malformed_objects() {
        assert_eq!(kind_of(r#"{"a":1"#), ParseErrorKind::MalformedObject(6));
        assert_eq!(kind_of(r#"{"a" 1}"#), ParseErrorKind::MalformedObject(5));
        assert_eq!(kind_of(r#"{1: 2}"#), ParseErrorKind::MalformedObject(1));
        assert_eq!(kind_of(r#"{"a":1,}"#), ParseErrorKind::MalformedObject(7));
    }

    #[test]
    fn test_whitespace_tolerance() {
        assert_eq!(
            parse(" \n {\"a\":1} \t").unwrap(),
            parse("{\"a\":1}").unwrap()
        );
        assert_eq!(parse("[ 1 ,\n\t2 ]").unwrap(), parse("[1,2]").unwrap());
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(
            kind_of("{\"a\":1}  x"),
            ParseErrorKind::TrailingContent { remaining: 1 }
        );
        assert_eq!(
            kind_of("null extra"),
            ParseErrorKind::TrailingContent { remaining: 5 }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kind_of(""), ParseErrorKind::UnexpectedEof);
        assert_eq!(kind_of("  \n"), ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_unexpected_dispatch_character() {
        assert_eq!(kind_of("?"), ParseErrorKind::UnexpectedCharacter(b'?', 0));
        assert_eq!(kind_of("+1"), ParseErrorKind::UnexpectedCharacter(b'+', 0));
    }

    #[test]
    fn test_nested_structure() {
        let parsed = parse(r#"{"arr": [1, {"nested": true}], "num": 42}"#).unwrap();
        let object = parsed.get_object().unwrap();
        let arr = object.get("arr").unwrap().get_array().unwrap();
        assert_eq!(arr.len(), 2);
        let nested = arr.get(1).unwrap().get_object().unwrap();
        assert_eq!(nested.get("nested").unwrap().get_bool(), Ok(true));
        assert_eq!(object.get("num").unwrap().get_f64(), Ok(42.0));
    }
}
