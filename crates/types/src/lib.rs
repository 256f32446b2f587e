// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::fmt;

pub mod literal;
pub mod opcode;
pub mod utils;

pub use opcode::Opcode;

/// a runtime value of the IPPcode23 machine.
///
/// there are four inhabited kinds (`int`, `bool`, `string`, `nil`) plus the
/// sentinel `Uninitialized`, which is the state of a variable slot that has
/// been declared (`DEFVAR`) but never written.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Nil,
    Uninitialized,
}

/// the four inhabited kinds of `Value`, i.e. what `TYPE` and the comparison
/// and arithmetic guards probe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Bool,
    Str,
    Nil,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::Str => "string",
            ValueKind::Nil => "nil",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// the probe used by comparisons, arithmetic guards and `MOVE`/`PUSHS`/
    /// `WRITE` (everything except `TYPE`, which has its own total variant,
    /// see `type_name_or_empty`).
    pub fn kind(&self) -> Result<ValueKind, EngineError> {
        match self {
            Value::Int(_) => Ok(ValueKind::Int),
            Value::Bool(_) => Ok(ValueKind::Bool),
            Value::Str(_) => Ok(ValueKind::Str),
            Value::Nil => Ok(ValueKind::Nil),
            Value::Uninitialized => Err(EngineError::new(
                ErrorKind::MissingValue,
                "read of an uninitialized variable",
            )),
        }
    }

    /// `TYPE` is total: an uninitialized operand yields the empty string
    /// rather than raising `MissingValue`.
    pub fn type_name_or_empty(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Nil => "nil",
            Value::Uninitialized => "",
        }
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Value::Uninitialized)
    }
}

/// the frame a `var` argument addresses: `FRAME@name` in the XML source,
/// `FRAME` one of GF/LF/TF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Global,
    Local,
    Temporary,
}

impl FrameKind {
    pub fn parse(tag: &str) -> Option<FrameKind> {
        match tag {
            "GF" => Some(FrameKind::Global),
            "LF" => Some(FrameKind::Local),
            "TF" => Some(FrameKind::Temporary),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            FrameKind::Global => "GF",
            FrameKind::Local => "LF",
            FrameKind::Temporary => "TF",
        }
    }
}

/// the static kind an argument carries from the XML, independent of the
/// value it resolves to at use time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Var,
    Int,
    Bool,
    String,
    Nil,
    Label,
    Type,
}

impl ArgumentKind {
    pub fn parse(tag: &str) -> Option<ArgumentKind> {
        match tag {
            "var" => Some(ArgumentKind::Var),
            "int" => Some(ArgumentKind::Int),
            "bool" => Some(ArgumentKind::Bool),
            "string" => Some(ArgumentKind::String),
            "nil" => Some(ArgumentKind::Nil),
            "label" => Some(ArgumentKind::Label),
            "type" => Some(ArgumentKind::Type),
            _ => None,
        }
    }
}

/// the error taxonomy that drives exit codes, see spec §6/§7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    XmlStructure,
    Semantic,
    OperandType,
    UndefVariable,
    FrameAbsent,
    MissingValue,
    OperandValue,
    StringError,
}

impl ErrorKind {
    /// the process exit code this error kind surfaces as.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::XmlStructure => 32,
            ErrorKind::Semantic => 52,
            ErrorKind::OperandType => 53,
            ErrorKind::UndefVariable => 54,
            ErrorKind::FrameAbsent => 55,
            ErrorKind::MissingValue => 56,
            ErrorKind::OperandValue => 57,
            ErrorKind::StringError => 58,
        }
    }
}

/// the opcode and 0-based ordinal of the instruction that raised an
/// `EngineError`, attached by the dispatcher so diagnostics can name both
/// (spec §7: "name the opcode and ordinal of the failing instruction").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionContext {
    pub opcode: String,
    pub ordinal: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayContext(pub Option<InstructionContext>);

impl fmt::Display for DisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(ctx) => write!(f, "{} (instruction #{})", ctx.opcode, ctx.ordinal),
            None => f.write_str("<preprocessing>"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind:?} at {context}: {message}")]
pub struct EngineError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: DisplayContext,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: DisplayContext(None),
        }
    }

    pub fn with_context(mut self, context: InstructionContext) -> Self {
        self.context = DisplayContext(Some(context));
        self
    }
}
