// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, ErrorKind};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::{as_int, values_equal};

/// `LABEL` is consumed entirely by the preprocessing pass; at execute
/// time it is a no-op.
pub fn label(_instruction: &Instruction, _ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    Ok(Flow::Next)
}

pub fn jump(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let name = instruction.arguments[0].as_label()?;
    let target = ctx.memory.lookup_label(name)?;
    Ok(Flow::Jump(target))
}

fn jump_if(instruction: &Instruction, ctx: &mut ExecContext, negate: bool) -> Result<Flow, EngineError> {
    let name = instruction.arguments[0].as_label()?;
    let lhs = instruction.arguments[1].resolve_used_value(ctx.memory)?;
    let rhs = instruction.arguments[2].resolve_used_value(ctx.memory)?;
    let equal = values_equal(&lhs, &rhs)?;
    let condition = if negate { !equal } else { equal };
    if condition {
        let target = ctx.memory.lookup_label(name)?;
        Ok(Flow::Jump(target))
    } else {
        Ok(Flow::Next)
    }
}

pub fn jumpifeq(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    jump_if(instruction, ctx, false)
}

pub fn jumpifneq(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    jump_if(instruction, ctx, true)
}

/// `EXIT`: halts with the given code, which must be an int in `0..=49`.
pub fn exit(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let code = as_int(&instruction.arguments[0].resolve_used_value(ctx.memory)?)?;
    if !(0..=49).contains(&code) {
        return Err(EngineError::new(
            ErrorKind::OperandValue,
            format!("exit code {code} is outside 0..=49"),
        ));
    }
    Ok(Flow::Exit(code as i32))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{ErrorKind, Opcode, Value};

    use super::*;

    #[test]
    fn jump_resolves_through_the_label_table() {
        let mut memory = Memory::new();
        memory.define_label("start", 4).unwrap();
        let instr = Instruction::new(Opcode::JUMP, vec![Argument::Label("start".into())], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        match jump(&instr, &mut c).unwrap() {
            Flow::Jump(target) => assert_eq!(target, 4),
            _ => panic!("expected jump"),
        }
    }

    #[test]
    fn jumpifeq_only_jumps_when_equal() {
        let mut memory = Memory::new();
        memory.define_label("start", 4).unwrap();
        let instr = Instruction::new(
            Opcode::JUMPIFEQ,
            vec![
                Argument::Label("start".into()),
                Argument::Literal(Value::Int(1)),
                Argument::Literal(Value::Int(2)),
            ],
            0,
        );
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        assert!(matches!(jumpifeq(&instr, &mut c).unwrap(), Flow::Next));
    }

    #[test]
    fn exit_rejects_out_of_range_code() {
        let mut memory = Memory::new();
        let instr = Instruction::new(Opcode::EXIT, vec![Argument::Literal(Value::Int(50))], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        assert_eq!(exit(&instr, &mut c).unwrap_err().kind, ErrorKind::OperandValue);
    }

    #[test]
    fn exit_returns_the_requested_code() {
        let mut memory = Memory::new();
        let instr = Instruction::new(Opcode::EXIT, vec![Argument::Literal(Value::Int(9))], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        match exit(&instr, &mut c).unwrap() {
            Flow::Exit(code) => assert_eq!(code, 9),
            _ => panic!("expected exit"),
        }
    }
}
