// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

/// the opcode of an IPPcode23 instruction, i.e. its uppercased XML
/// `opcode` attribute after normalization.
///
/// the dispatcher (`ippvm_runtime::interpreter::dispatch_table`) maps every
/// variant here to exactly one instruction body.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[allow(non_camel_case_types)]
pub enum Opcode {
    //
    // frames & functions
    //

    MOVE,
    CREATEFRAME,
    PUSHFRAME,
    POPFRAME,
    DEFVAR,
    CALL,
    RETURN,

    //
    // data stack
    //

    PUSHS,
    POPS,

    //
    // arithmetic
    //

    ADD,
    SUB,
    MUL,
    IDIV,

    //
    // comparison
    //

    // `LT`/`GT` reject `Nil` operands; `EQ` additionally allows either
    // operand to be `Nil` (equal to anything only if both are `Nil`).
    LT,
    GT,
    EQ,

    //
    // logic
    //

    AND,
    OR,
    NOT,

    //
    // conversions
    //

    INT2CHAR,
    STRI2INT,

    //
    // I/O
    //

    READ,
    WRITE,

    //
    // strings
    //

    CONCAT,
    STRLEN,
    GETCHAR,
    SETCHAR,

    //
    // types
    //

    TYPE,

    //
    // control flow
    //

    // `LABEL` is a no-op at execute time, it is consumed entirely during
    // label preprocessing (spec §4.5).
    LABEL,
    JUMP,
    JUMPIFEQ,
    JUMPIFNEQ,
    EXIT,

    //
    // debug
    //

    DPRINT,
    BREAK,
}

/// the number of `Opcode` variants, i.e. the size of the dispatch table
/// `ippvm_runtime::dispatch` indexes into.
pub const OPCODE_COUNT: usize = 35;

impl Opcode {
    /// the dispatch table index for this opcode. relies on `Opcode` being
    /// a fieldless enum, whose discriminants are assigned `0..OPCODE_COUNT`
    /// in declaration order.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// normalizes an XML `opcode` attribute (case-insensitively) to an
    /// `Opcode`, or `None` for an unrecognized mnemonic.
    pub fn parse(text: &str) -> Option<Opcode> {
        let upper = text.to_ascii_uppercase();
        let opcode = match upper.as_str() {
            "MOVE" => Opcode::MOVE,
            "CREATEFRAME" => Opcode::CREATEFRAME,
            "PUSHFRAME" => Opcode::PUSHFRAME,
            "POPFRAME" => Opcode::POPFRAME,
            "DEFVAR" => Opcode::DEFVAR,
            "CALL" => Opcode::CALL,
            "RETURN" => Opcode::RETURN,
            "PUSHS" => Opcode::PUSHS,
            "POPS" => Opcode::POPS,
            "ADD" => Opcode::ADD,
            "SUB" => Opcode::SUB,
            "MUL" => Opcode::MUL,
            "IDIV" => Opcode::IDIV,
            "LT" => Opcode::LT,
            "GT" => Opcode::GT,
            "EQ" => Opcode::EQ,
            "AND" => Opcode::AND,
            "OR" => Opcode::OR,
            "NOT" => Opcode::NOT,
            "INT2CHAR" => Opcode::INT2CHAR,
            "STRI2INT" => Opcode::STRI2INT,
            "READ" => Opcode::READ,
            "WRITE" => Opcode::WRITE,
            "CONCAT" => Opcode::CONCAT,
            "STRLEN" => Opcode::STRLEN,
            "GETCHAR" => Opcode::GETCHAR,
            "SETCHAR" => Opcode::SETCHAR,
            "TYPE" => Opcode::TYPE,
            "LABEL" => Opcode::LABEL,
            "JUMP" => Opcode::JUMP,
            "JUMPIFEQ" => Opcode::JUMPIFEQ,
            "JUMPIFNEQ" => Opcode::JUMPIFNEQ,
            "EXIT" => Opcode::EXIT,
            "DPRINT" => Opcode::DPRINT,
            "BREAK" => Opcode::BREAK,
            _ => return None,
        };
        Some(opcode)
    }

    /// the number of arguments this opcode's instruction carries, used by
    /// the loader to reject malformed argument counts early.
    pub fn arity(&self) -> usize {
        match self {
            Opcode::CREATEFRAME
            | Opcode::PUSHFRAME
            | Opcode::POPFRAME
            | Opcode::RETURN
            | Opcode::BREAK => 0,

            Opcode::DEFVAR
            | Opcode::CALL
            | Opcode::PUSHS
            | Opcode::POPS
            | Opcode::LABEL
            | Opcode::JUMP
            | Opcode::EXIT
            | Opcode::DPRINT => 1,

            Opcode::MOVE
            | Opcode::NOT
            | Opcode::INT2CHAR
            | Opcode::READ
            | Opcode::WRITE
            | Opcode::STRLEN
            | Opcode::TYPE => 2,

            Opcode::ADD
            | Opcode::SUB
            | Opcode::MUL
            | Opcode::IDIV
            | Opcode::LT
            | Opcode::GT
            | Opcode::EQ
            | Opcode::AND
            | Opcode::OR
            | Opcode::STRI2INT
            | Opcode::CONCAT
            | Opcode::GETCHAR
            | Opcode::SETCHAR
            | Opcode::JUMPIFEQ
            | Opcode::JUMPIFNEQ => 3,
        }
    }
}
