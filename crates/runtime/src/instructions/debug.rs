// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::EngineError;
use tracing::debug;

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::display_value;

/// `DPRINT`: prints the operand to the diagnostic stream (`tracing`,
/// not stdout — it must never interleave with `WRITE`'s output).
pub fn dprint(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let value = instruction.arguments[0].resolve_used_value(ctx.memory)?;
    debug!(target: "ippvm_runtime::dprint", value = %display_value(&value));
    Ok(Flow::Next)
}

/// `BREAK`: dumps the current program counter and stack depths.
pub fn break_(_instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    debug!(
        target: "ippvm_runtime::break",
        pc = ctx.memory.get_pc(),
        "BREAK"
    );
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{Opcode, Value};

    use super::*;

    #[test]
    fn dprint_does_not_touch_stdout() {
        let mut memory = Memory::new();
        let instr = Instruction::new(Opcode::DPRINT, vec![Argument::Literal(Value::Int(1))], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        dprint(&instr, &mut c).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn break_is_a_no_op_on_state() {
        let mut memory = Memory::new();
        memory.set_pc(3);
        let instr = Instruction::new(Opcode::BREAK, vec![], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        break_(&instr, &mut c).unwrap();
        assert_eq!(memory.get_pc(), 3);
    }
}
