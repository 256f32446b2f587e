// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::EngineError;

use crate::dispatch::{ExecContext, Flow};

pub fn move_(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let value = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    ctx.memory.write(frame, name, value)?;
    Ok(Flow::Next)
}

pub fn createframe(_instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    ctx.memory.createframe();
    Ok(Flow::Next)
}

pub fn pushframe(_instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    ctx.memory.pushframe()?;
    Ok(Flow::Next)
}

pub fn popframe(_instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    ctx.memory.popframe()?;
    Ok(Flow::Next)
}

pub fn defvar(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    ctx.memory.define(frame, name)?;
    Ok(Flow::Next)
}
