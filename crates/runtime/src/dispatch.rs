// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::io::{BufRead, Write};

use ippvm_program::{Instruction, Memory};
use ippvm_types::{opcode::OPCODE_COUNT, EngineError, ErrorKind};

use crate::instructions::{
    arithmetic, comparison, control_flow, conversion, data_stack, debug, fundamental,
    function_call, io, logic, strings, types,
};

/// the state threaded through a single instruction body: memory plus
/// the program's standard streams.
pub struct ExecContext<'m, 'io> {
    pub memory: &'m mut Memory,
    pub input: &'io mut dyn BufRead,
    pub output: &'io mut dyn Write,
}

/// what the fetch/execute loop should do after an instruction runs.
pub enum Flow {
    Next,
    Jump(usize),
    Exit(i32),
}

type InstructionBody = fn(&Instruction, &mut ExecContext) -> Result<Flow, EngineError>;

fn unimplemented_instruction(_instruction: &Instruction, _ctx: &mut ExecContext) -> Result<Flow, EngineError> {
    Err(EngineError::new(
        ErrorKind::Semantic,
        "opcode has no registered instruction body",
    ))
}

static mut DISPATCH_TABLE: [InstructionBody; OPCODE_COUNT] =
    [unimplemented_instruction; OPCODE_COUNT];

/// populates the dispatch table. idempotent: a second call is a no-op,
/// detected by checking whether the first slot has already been filled.
pub fn init_dispatch_table() {
    use ippvm_types::Opcode;

    let table = unsafe { &mut DISPATCH_TABLE };

    if table[Opcode::MOVE.index()] == fundamental::move_ {
        return;
    }

    table[Opcode::MOVE.index()] = fundamental::move_;
    table[Opcode::CREATEFRAME.index()] = fundamental::createframe;
    table[Opcode::PUSHFRAME.index()] = fundamental::pushframe;
    table[Opcode::POPFRAME.index()] = fundamental::popframe;
    table[Opcode::DEFVAR.index()] = fundamental::defvar;

    table[Opcode::CALL.index()] = function_call::call;
    table[Opcode::RETURN.index()] = function_call::return_;

    table[Opcode::PUSHS.index()] = data_stack::pushs;
    table[Opcode::POPS.index()] = data_stack::pops;

    table[Opcode::ADD.index()] = arithmetic::add;
    table[Opcode::SUB.index()] = arithmetic::sub;
    table[Opcode::MUL.index()] = arithmetic::mul;
    table[Opcode::IDIV.index()] = arithmetic::idiv;

    table[Opcode::LT.index()] = comparison::lt;
    table[Opcode::GT.index()] = comparison::gt;
    table[Opcode::EQ.index()] = comparison::eq;

    table[Opcode::AND.index()] = logic::and;
    table[Opcode::OR.index()] = logic::or;
    table[Opcode::NOT.index()] = logic::not;

    table[Opcode::INT2CHAR.index()] = conversion::int2char;
    table[Opcode::STRI2INT.index()] = conversion::stri2int;

    table[Opcode::READ.index()] = io::read;
    table[Opcode::WRITE.index()] = io::write;

    table[Opcode::CONCAT.index()] = strings::concat;
    table[Opcode::STRLEN.index()] = strings::strlen;
    table[Opcode::GETCHAR.index()] = strings::getchar;
    table[Opcode::SETCHAR.index()] = strings::setchar;

    table[Opcode::TYPE.index()] = types::type_;

    table[Opcode::LABEL.index()] = control_flow::label;
    table[Opcode::JUMP.index()] = control_flow::jump;
    table[Opcode::JUMPIFEQ.index()] = control_flow::jumpifeq;
    table[Opcode::JUMPIFNEQ.index()] = control_flow::jumpifneq;
    table[Opcode::EXIT.index()] = control_flow::exit;

    table[Opcode::DPRINT.index()] = debug::dprint;
    table[Opcode::BREAK.index()] = debug::break_;
}

pub fn dispatch_instruction(
    instruction: &Instruction,
    ctx: &mut ExecContext,
) -> Result<Flow, EngineError> {
    let body = unsafe { DISPATCH_TABLE[instruction.opcode.index()] };
    body(instruction, ctx)
}
