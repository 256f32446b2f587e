// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, ErrorKind, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::as_str;
use crate::instructions::conversion::char_at;

pub fn concat(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let lhs = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let rhs = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let mut result = as_str(&lhs)?.to_string();
    result.push_str(as_str(&rhs)?);
    ctx.memory.write(frame, name, Value::Str(result))?;
    Ok(Flow::Next)
}

pub fn strlen(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let value = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let len = as_str(&value)?.chars().count() as i64;
    ctx.memory.write(frame, name, Value::Int(len))?;
    Ok(Flow::Next)
}

/// `GETCHAR`: the one-character string at `index` in the source
/// string. an out-of-range index is a `StringError`.
pub fn getchar(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let string = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let string = as_str(&string)?;
    let index = crate::instructions::support::as_int(
        &instruction.arguments[2].resolve_used_value(ctx.memory)?,
    )?;

    let ch = char_at(string, index)
        .ok_or_else(|| EngineError::new(ErrorKind::StringError, format!("index {index} is out of range")))?;
    ctx.memory.write(frame, name, Value::Str(ch.to_string()))?;
    Ok(Flow::Next)
}

/// `SETCHAR`: overwrites the character of `var` at `index` with the
/// first character of the replacement string, then writes the result
/// back into `var`. `var` must already hold a string.
pub fn setchar(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let current = ctx.memory.read(frame, name)?.clone();
    current.kind()?;
    let mut chars: Vec<char> = as_str(&current)?.chars().collect();

    let index = crate::instructions::support::as_int(
        &instruction.arguments[1].resolve_used_value(ctx.memory)?,
    )?;
    let replacement = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let replacement = as_str(&replacement)?;
    let new_char = replacement
        .chars()
        .next()
        .ok_or_else(|| EngineError::new(ErrorKind::StringError, "replacement string is empty"))?;

    let index = usize::try_from(index)
        .ok()
        .filter(|i| *i < chars.len())
        .ok_or_else(|| EngineError::new(ErrorKind::StringError, format!("index {index} is out of range")))?;
    chars[index] = new_char;

    ctx.memory.write(frame, name, Value::Str(chars.into_iter().collect()))?;
    Ok(Flow::Next)
}
