// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE, LICENSE.additional and CONTRIBUTING.

use crate::opcode::Opcode;

impl Opcode {
    /// the canonical mnemonic, as it would appear (uppercased) in the XML
    /// source. used by diagnostics and by `DPRINT`/`BREAK`.
    pub fn get_name(&self) -> &'static str {
        match self {
            Opcode::MOVE => "MOVE",
            Opcode::CREATEFRAME => "CREATEFRAME",
            Opcode::PUSHFRAME => "PUSHFRAME",
            Opcode::POPFRAME => "POPFRAME",
            Opcode::DEFVAR => "DEFVAR",
            Opcode::CALL => "CALL",
            Opcode::RETURN => "RETURN",
            Opcode::PUSHS => "PUSHS",
            Opcode::POPS => "POPS",
            Opcode::ADD => "ADD",
            Opcode::SUB => "SUB",
            Opcode::MUL => "MUL",
            Opcode::IDIV => "IDIV",
            Opcode::LT => "LT",
            Opcode::GT => "GT",
            Opcode::EQ => "EQ",
            Opcode::AND => "AND",
            Opcode::OR => "OR",
            Opcode::NOT => "NOT",
            Opcode::INT2CHAR => "INT2CHAR",
            Opcode::STRI2INT => "STRI2INT",
            Opcode::READ => "READ",
            Opcode::WRITE => "WRITE",
            Opcode::CONCAT => "CONCAT",
            Opcode::STRLEN => "STRLEN",
            Opcode::GETCHAR => "GETCHAR",
            Opcode::SETCHAR => "SETCHAR",
            Opcode::TYPE => "TYPE",
            Opcode::LABEL => "LABEL",
            Opcode::JUMP => "JUMP",
            Opcode::JUMPIFEQ => "JUMPIFEQ",
            Opcode::JUMPIFNEQ => "JUMPIFNEQ",
            Opcode::EXIT => "EXIT",
            Opcode::DPRINT => "DPRINT",
            Opcode::BREAK => "BREAK",
        }
    }
}
