// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::as_bool;

pub fn and(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let lhs = as_bool(&instruction.arguments[1].resolve_used_value(ctx.memory)?)?;
    let rhs = as_bool(&instruction.arguments[2].resolve_used_value(ctx.memory)?)?;
    ctx.memory.write(frame, name, Value::Bool(lhs && rhs))?;
    Ok(Flow::Next)
}

pub fn or(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let lhs = as_bool(&instruction.arguments[1].resolve_used_value(ctx.memory)?)?;
    let rhs = as_bool(&instruction.arguments[2].resolve_used_value(ctx.memory)?)?;
    ctx.memory.write(frame, name, Value::Bool(lhs || rhs))?;
    Ok(Flow::Next)
}

pub fn not(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let value = as_bool(&instruction.arguments[1].resolve_used_value(ctx.memory)?)?;
    ctx.memory.write(frame, name, Value::Bool(!value))?;
    Ok(Flow::Next)
}
