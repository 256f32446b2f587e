// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use ippvm_program::Instruction;
use ippvm_types::{EngineError, Value};

use crate::dispatch::{ExecContext, Flow};

/// `TYPE` is total: an uninitialized operand yields the empty string
/// rather than raising `MissingValue` (spec §4.1/§4.5).
pub fn type_(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let value = instruction.arguments[1].resolve_value(ctx.memory)?;
    ctx.memory.write(frame, name, Value::Str(value.type_name_or_empty().to_string()))?;
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{FrameKind, Opcode};

    use super::*;

    #[test]
    fn type_of_an_uninitialized_variable_is_empty_string() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "src").unwrap();
        memory.define(FrameKind::Global, "r").unwrap();
        let instr = Instruction::new(
            Opcode::TYPE,
            vec![
                Argument::Var { frame: FrameKind::Global, name: "r".into() },
                Argument::Var { frame: FrameKind::Global, name: "src".into() },
            ],
            0,
        );
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        type_(&instr, &mut c).unwrap();
        assert_eq!(memory.read(FrameKind::Global, "r").unwrap(), &Value::Str(String::new()));
    }

    #[test]
    fn type_of_an_int_literal() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "r").unwrap();
        let instr = Instruction::new(
            Opcode::TYPE,
            vec![
                Argument::Var { frame: FrameKind::Global, name: "r".into() },
                Argument::Literal(Value::Int(4)),
            ],
            0,
        );
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        type_(&instr, &mut c).unwrap();
        assert_eq!(memory.read(FrameKind::Global, "r").unwrap(), &Value::Str("int".into()));
    }
}
