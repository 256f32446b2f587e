// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::EngineError;

use crate::dispatch::{ExecContext, Flow};

pub fn call(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let label = instruction.arguments[0].as_label()?;
    let target = ctx.memory.lookup_label(label)?;
    ctx.memory.call_stack_push(ctx.memory.get_pc() + 1);
    Ok(Flow::Jump(target))
}

pub fn return_(_instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let target = ctx.memory.call_stack_pop()?;
    Ok(Flow::Jump(target))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{ErrorKind, Opcode};

    use super::*;

    #[test]
    fn call_pushes_return_address_and_jumps() {
        let mut memory = Memory::new();
        memory.define_label("target", 7).unwrap();
        memory.set_pc(2);
        let instruction = Instruction::new(Opcode::CALL, vec![Argument::Label("target".into())], 2);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        match call(&instruction, &mut c).unwrap() {
            Flow::Jump(target) => assert_eq!(target, 7),
            _ => panic!("expected a jump"),
        }
        assert_eq!(memory.call_stack_pop().unwrap(), 3);
    }

    #[test]
    fn return_without_call_is_missing_value() {
        let mut memory = Memory::new();
        let instruction = Instruction::new(Opcode::RETURN, vec![], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        assert_eq!(return_(&instruction, &mut c).unwrap_err().kind, ErrorKind::MissingValue);
    }
}
