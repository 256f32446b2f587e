// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::cmp::Ordering;

use ippvm_program::Instruction;
use ippvm_types::{EngineError, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::{ordering, values_equal};

fn write_bool(instruction: &Instruction, ctx: &mut ExecContext, result: bool) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    ctx.memory.write(frame, name, Value::Bool(result))?;
    Ok(Flow::Next)
}

pub fn lt(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let lhs = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let rhs = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let result = ordering(&lhs, &rhs)? == Ordering::Less;
    write_bool(instruction, ctx, result)
}

pub fn gt(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let lhs = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let rhs = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let result = ordering(&lhs, &rhs)? == Ordering::Greater;
    write_bool(instruction, ctx, result)
}

pub fn eq(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let lhs = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let rhs = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let result = values_equal(&lhs, &rhs)?;
    write_bool(instruction, ctx, result)
}
