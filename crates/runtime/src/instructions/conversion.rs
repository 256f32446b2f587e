// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, ErrorKind, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::{as_int, as_str};

/// `INT2CHAR`: the integer must be a valid Unicode code point, otherwise
/// this is a `StringError` (it is a string-producing conversion).
pub fn int2char(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let code = as_int(&instruction.arguments[1].resolve_used_value(ctx.memory)?)?;
    let ch = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| EngineError::new(ErrorKind::StringError, format!("{code} is not a valid character code")))?;
    ctx.memory.write(frame, name, Value::Str(ch.to_string()))?;
    Ok(Flow::Next)
}

/// `STRI2INT`: the character code at `index` in the string, as an int.
/// an out-of-range index is a `StringError`.
pub fn stri2int(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let string = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let string = as_str(&string)?;
    let index = as_int(&instruction.arguments[2].resolve_used_value(ctx.memory)?)?;

    let ch = char_at(string, index)
        .ok_or_else(|| EngineError::new(ErrorKind::StringError, format!("index {index} is out of range")))?;
    ctx.memory.write(frame, name, Value::Int(ch as i64))?;
    Ok(Flow::Next)
}

pub fn char_at(string: &str, index: i64) -> Option<char> {
    let index = usize::try_from(index).ok()?;
    string.chars().nth(index)
}
