// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::io::{BufRead, Write};

use ippvm_program::Instruction;
use ippvm_types::{literal, EngineError, ErrorKind, Value};

use crate::dispatch::{ExecContext, Flow};
use crate::instructions::support::display_value;

/// `READ`: a line is consumed from the input stream and parsed as the
/// named type. a read past end-of-input, or a line that doesn't parse
/// as the requested type, yields `nil` rather than an error — this
/// mirrors how a missing or malformed test fixture should not crash an
/// otherwise-correct program.
pub fn read(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let (frame, name) = instruction.arguments[0].as_var()?;
    let type_name = instruction.arguments[1].as_type_name()?;

    let mut line = String::new();
    let value = match ctx.input.read_line(&mut line) {
        Ok(0) => Value::Nil,
        Ok(_) => {
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if type_name == "string" {
                Value::Str(trimmed.to_string())
            } else {
                literal::parse_literal(type_name, trimmed).unwrap_or(Value::Nil)
            }
        }
        Err(_) => Value::Nil,
    };

    ctx.memory.write(frame, name, value)?;
    Ok(Flow::Next)
}

/// `WRITE`: prints the operand's textual form with no trailing newline.
pub fn write(instruction: &Instruction, ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    let value = instruction.arguments[0].resolve_used_value(ctx.memory)?;
    let text = display_value(&value);
    ctx.output
        .write_all(text.as_bytes())
        .map_err(|e| EngineError::new(ErrorKind::Semantic, format!("write to stdout failed: {e}")))?;
    Ok(Flow::Next)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ippvm_program::{Argument, Memory};
    use ippvm_types::{FrameKind, Opcode};

    use super::*;

    #[test]
    fn read_parses_a_line_as_the_requested_type() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "x").unwrap();
        let instr = Instruction::new(
            Opcode::READ,
            vec![
                Argument::Var { frame: FrameKind::Global, name: "x".into() },
                Argument::TypeName("int".into()),
            ],
            0,
        );
        let mut input = Cursor::new(&b"42\n"[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        read(&instr, &mut c).unwrap();
        assert_eq!(memory.read(FrameKind::Global, "x").unwrap(), &Value::Int(42));
    }

    #[test]
    fn read_string_is_stored_verbatim_without_escape_decoding() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "x").unwrap();
        let instr = Instruction::new(
            Opcode::READ,
            vec![
                Argument::Var { frame: FrameKind::Global, name: "x".into() },
                Argument::TypeName("string".into()),
            ],
            0,
        );
        let mut input = Cursor::new(&b"C:\\temp\n"[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        read(&instr, &mut c).unwrap();
        assert_eq!(memory.read(FrameKind::Global, "x").unwrap(), &Value::Str("C:\\temp".into()));
    }

    #[test]
    fn read_past_eof_is_nil() {
        let mut memory = Memory::new();
        memory.define(FrameKind::Global, "x").unwrap();
        let instr = Instruction::new(
            Opcode::READ,
            vec![
                Argument::Var { frame: FrameKind::Global, name: "x".into() },
                Argument::TypeName("int".into()),
            ],
            0,
        );
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        read(&instr, &mut c).unwrap();
        assert_eq!(memory.read(FrameKind::Global, "x").unwrap(), &Value::Nil);
    }

    #[test]
    fn write_prints_without_trailing_newline() {
        let mut memory = Memory::new();
        let instr = Instruction::new(Opcode::WRITE, vec![Argument::Literal(Value::Int(7))], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        write(&instr, &mut c).unwrap();
        assert_eq!(output, b"7");
    }

    #[test]
    fn write_nil_prints_nothing() {
        let mut memory = Memory::new();
        let instr = Instruction::new(Opcode::WRITE, vec![Argument::Literal(Value::Nil)], 0);
        let mut input = Cursor::new(&b""[..]);
        let mut output = Vec::new();
        let mut c = ExecContext { memory: &mut memory, input: &mut input, output: &mut output };
        write(&instr, &mut c).unwrap();
        assert!(output.is_empty());
    }
}
