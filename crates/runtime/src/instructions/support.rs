// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! small helpers shared by more than one instruction family: the
//! per-kind operand projections and the equality/ordering rules that
//! back `EQ`/`LT`/`GT`/`JUMPIFEQ`/`JUMPIFNEQ`.

use std::cmp::Ordering;

use ippvm_types::{EngineError, ErrorKind, Value};

pub fn as_int(value: &Value) -> Result<i64, EngineError> {
    match value {
        Value::Int(n) => Ok(*n),
        other => Err(operand_type(other, "int")),
    }
}

pub fn as_bool(value: &Value) -> Result<bool, EngineError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(operand_type(other, "bool")),
    }
}

pub fn as_str(value: &Value) -> Result<&str, EngineError> {
    match value {
        Value::Str(s) => Ok(s.as_str()),
        other => Err(operand_type(other, "string")),
    }
}

fn operand_type(value: &Value, expected: &str) -> EngineError {
    EngineError::new(
        ErrorKind::OperandType,
        format!("expected a {expected} operand, got {}", value.type_name_or_empty()),
    )
}

/// the ordering relation `LT`/`GT` use: both operands must share a kind
/// and neither may be `Nil`.
pub fn ordering(lhs: &Value, rhs: &Value) -> Result<Ordering, EngineError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Nil, _) | (_, Value::Nil) => Err(EngineError::new(
            ErrorKind::OperandType,
            "nil has no ordering",
        )),
        _ => Err(EngineError::new(
            ErrorKind::OperandType,
            "comparison operands must share a type",
        )),
    }
}

/// the equality relation `EQ`/`JUMPIFEQ`/`JUMPIFNEQ` use: same rule as
/// `ordering`, except `Nil` compares equal only to `Nil`.
pub fn values_equal(lhs: &Value, rhs: &Value) -> Result<bool, EngineError> {
    match (lhs, rhs) {
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Nil, _) | (_, Value::Nil) => Ok(false),
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        _ => Err(EngineError::new(
            ErrorKind::OperandType,
            "equality operands must share a type",
        )),
    }
}

/// the textual form `WRITE` prints: `Nil` is the empty string, `Bool`
/// is `true`/`false`, everything else is its natural `Display`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => s.clone(),
        Value::Nil => String::new(),
        Value::Uninitialized => String::new(),
    }
}
