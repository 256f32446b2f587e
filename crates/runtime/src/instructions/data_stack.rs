// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::EngineError;

use crate::dispatch::{ExecContext, Flow};

pub fn pushs(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let value = instruction.arguments[0].resolve_used_value(ctx.memory)?;
    ctx.memory.data_stack_push(value);
    Ok(Flow::Next)
}

pub fn pops(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let value = ctx.memory.data_stack_pop()?;
    ctx.memory.write(frame, name, value)?;
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{ErrorKind, FrameKind, Opcode, Value};

    use super::*;

    #[test]
    fn pushs_then_pops_round_trips() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "x").unwrap();

        let push = Instruction::new(Opcode::PUSHS, vec![Argument::Literal(Value::Int(9))], 0);
        let pop = Instruction::new(
            Opcode::POPS,
            vec![Argument::Var { frame: FrameKind::Global, name: "x".into() }],
            1,
        );

        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        pushs(&push, &mut c).unwrap();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        pops(&pop, &mut c).unwrap();

        assert_eq!(memory.read(FrameKind::Global, "x").unwrap(), &Value::Int(9));
    }

    #[test]
    fn pops_on_empty_stack_is_missing_value() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "x").unwrap();
        let pop = Instruction::new(
            Opcode::POPS,
            vec![Argument::Var { frame: FrameKind::Global, name: "x".into() }],
            0,
        );
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        assert_eq!(pops(&pop, &mut c).unwrap_err().kind, ErrorKind::MissingValue);
    }
}
