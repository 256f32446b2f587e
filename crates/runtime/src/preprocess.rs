// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! the label preprocessing pass (spec §4.5/§9): scans the whole program
//! once before execution starts and records every `LABEL`'s instruction
//! index, so `JUMP`/`JUMPIFEQ`/`JUMPIFNEQ` resolve in O(1) rather than
//! scanning the program on every jump.

use ippvm_program::{Memory, Program};
use ippvm_types::{EngineError, Opcode};

pub fn register_labels(program: &Program, memory: &mut Memory) -> Result<(), EngineError> {
    for instruction in &program.instructions {
        if instruction.opcode == Opcode::LABEL {
            let name = instruction.arguments[0].as_label()?;
            memory.define_label(name, instruction.ordinal)?;
        }
    }
    Ok(())
}
