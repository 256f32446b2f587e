// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! constructs `Value`s from the textual literal forms used in an IPPcode23
//! program (spec §4.1). malformed literals are a loader-time concern and
//! are reported as `ErrorKind::XmlStructure`, matching exit code 32.

use crate::{EngineError, ErrorKind, Value};

/// parses the textual value of a `int`/`bool`/`string`/`nil` argument into
/// a `Value`. `kind_tag` is the argument's XML `type` attribute.
pub fn parse_literal(kind_tag: &str, text: &str) -> Result<Value, EngineError> {
    match kind_tag {
        "int" => parse_int(text).map(Value::Int),
        "bool" => match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(malformed(text)),
        },
        "string" => escape_expand(text).map(Value::Str),
        "nil" => {
            if text == "nil" {
                Ok(Value::Nil)
            } else {
                Err(malformed(text))
            }
        }
        _ => Err(malformed(text)),
    }
}

fn parse_int(text: &str) -> Result<i64, EngineError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let magnitude = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).map_err(|_| malformed(text))?
    } else if let Some(oct) = unsigned
        .strip_prefix("0o")
        .or_else(|| unsigned.strip_prefix("0O"))
    {
        i64::from_str_radix(oct, 8).map_err(|_| malformed(text))?
    } else {
        unsigned.parse::<i64>().map_err(|_| malformed(text))?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// replaces every `\ddd` triplet (three decimal digits) with the
/// corresponding Unicode code point. every other backslash is invalid.
pub fn escape_expand(s: &str) -> Result<String, EngineError> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\\' {
            let digits: String = chars.get(i + 1..i + 4).map(|c| c.iter().collect()).ok_or_else(|| malformed(s))?;
            if digits.len() != 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err(malformed(s));
            }
            let code: u32 = digits.parse().map_err(|_| malformed(s))?;
            let ch = char::from_u32(code).ok_or_else(|| malformed(s))?;
            out.push(ch);
            i += 4;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    Ok(out)
}

fn malformed(text: &str) -> EngineError {
    EngineError::new(
        ErrorKind::XmlStructure,
        format!("malformed literal: {text:?}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_hex_and_octal_ints() {
        assert_eq!(parse_literal("int", "42").unwrap(), Value::Int(42));
        assert_eq!(parse_literal("int", "-42").unwrap(), Value::Int(-42));
        assert_eq!(parse_literal("int", "0x2A").unwrap(), Value::Int(42));
        assert_eq!(parse_literal("int", "-0x2A").unwrap(), Value::Int(-42));
        assert_eq!(parse_literal("int", "0o52").unwrap(), Value::Int(42));
        assert_eq!(parse_literal("int", "-0o52").unwrap(), Value::Int(-42));
    }

    #[test]
    fn rejects_malformed_int() {
        assert!(parse_literal("int", "forty-two").is_err());
    }

    #[test]
    fn parses_bool_and_nil() {
        assert_eq!(parse_literal("bool", "true").unwrap(), Value::Bool(true));
        assert_eq!(parse_literal("bool", "false").unwrap(), Value::Bool(false));
        assert_eq!(parse_literal("nil", "nil").unwrap(), Value::Nil);
        assert!(parse_literal("nil", "null").is_err());
    }

    #[test]
    fn expands_escape_triplets() {
        assert_eq!(escape_expand("a\\032b").unwrap(), "a b");
        assert_eq!(escape_expand("no escapes").unwrap(), "no escapes");
    }

    #[test]
    fn rejects_bare_backslash() {
        assert!(escape_expand("a\\b").is_err());
        assert!(escape_expand("trailing\\").is_err());
    }

    #[test]
    fn string_literal_goes_through_escape_expand() {
        assert_eq!(
            parse_literal("string", "x\\092y").unwrap(),
            Value::Str("x\\y".to_string())
        );
    }
}
