// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, ErrorKind, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::as_int;

fn binary(
    instruction: &Instruction,
    ctx: &mut ExecContext,
    op: impl FnOnce(i64, i64) -> Result<i64, EngineError>,
) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let lhs = as_int(&instruction.arguments[1].resolve_used_value(ctx.memory)?)?;
    let rhs = as_int(&instruction.arguments[2].resolve_used_value(ctx.memory)?)?;
    let result = op(lhs, rhs)?;
    ctx.memory.write(frame, name, Value::Int(result))?;
    Ok(Flow::Next)
}

pub fn add(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    binary(instruction, ctx, |a, b| Ok(a.wrapping_add(b)))
}

pub fn sub(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    binary(instruction, ctx, |a, b| Ok(a.wrapping_sub(b)))
}

pub fn mul(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    binary(instruction, ctx, |a, b| Ok(a.wrapping_mul(b)))
}

pub fn idiv(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    binary(instruction, ctx, |a, b| {
        if b == 0 {
            Err(EngineError::new(ErrorKind::OperandValue, "division by zero"))
        } else {
            Ok(a.wrapping_div(b))
        }
    })
}
