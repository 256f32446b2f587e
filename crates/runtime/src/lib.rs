// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! the IPPcode23 execution engine: dispatch table, fetch/execute loop,
//! and the instruction bodies themselves.

use std::io::{BufRead, Write};

use ippvm_program::{Memory, Program};
use ippvm_types::{EngineError, InstructionContext};
use tracing::debug;

mod dispatch;
mod instructions;
mod preprocess;

pub use dispatch::{ExecContext, Flow};

/// runs a loaded program to completion against the given I/O streams,
/// returning the process exit code (`0` unless `EXIT` requests another).
pub fn execute(
    program: &Program,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<i32, EngineError> {
    let mut memory = Memory::new();
    preprocess::register_labels(program, &mut memory)?;
    dispatch::init_dispatch_table();

    let mut pc = 0usize;
    loop {
        let instruction = match program.get(pc) {
            Some(instruction) => instruction,
            None => return Ok(0),
        };

        memory.set_pc(pc);
        let mut ctx = ExecContext {
            memory: &mut memory,
            input,
            output,
        };

        let flow = dispatch::dispatch_instruction(instruction, &mut ctx).map_err(|err| {
            err.with_context(InstructionContext {
                opcode: instruction.opcode.get_name().to_string(),
                ordinal: instruction.ordinal,
            })
        })?;

        match flow {
            Flow::Next => pc += 1,
            Flow::Jump(target) => {
                debug!(from = pc, to = target, "jump");
                pc = target;
            }
            Flow::Exit(code) => return Ok(code),
        }
    }
}
