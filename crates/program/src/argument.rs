// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

//! resolves a parsed `Argument` to the concrete thing an instruction body
//! needs at the moment it runs (spec §4.3). a `var` argument is resolved
//! against `Memory`; every other kind is already a concrete value, label,
//! or type name baked in by the loader.

use ippvm_types::{EngineError, ErrorKind, Value};

use crate::memory::Memory;
use crate::program::Argument;

impl Argument {
    /// resolves this argument to a runtime `Value`. valid for `Var` and
    /// `Literal` arguments; `Label`/`TypeName` arguments never reach an
    /// instruction body that expects a value, so reaching them here is
    /// an `OperandType` error rather than a panic.
    pub fn resolve_value(&self, memory: &Memory) -> Result<Value, EngineError> {
        match self {
            Argument::Var { frame, name } => memory.read(*frame, name).cloned(),
            Argument::Literal(value) => Ok(value.clone()),
            Argument::Label(_) | Argument::TypeName(_) => Err(EngineError::new(
                ErrorKind::OperandType,
                "argument does not carry a runtime value",
            )),
        }
    }

    /// resolves this argument to a usable `Value`, rejecting an
    /// uninitialized variable with `MissingValue`. every instruction that
    /// consumes an operand's value (as opposed to `TYPE`, which is total)
    /// goes through this rather than `resolve_value`.
    pub fn resolve_used_value(&self, memory: &Memory) -> Result<Value, EngineError> {
        let value = self.resolve_value(memory)?;
        value.kind()?;
        Ok(value)
    }

    /// the `FRAME@name` this argument addresses, for instructions that
    /// write rather than read (`MOVE`'s destination, `DEFVAR`, ...).
    pub fn as_var(&self) -> Result<(ippvm_types::FrameKind, &str), EngineError> {
        match self {
            Argument::Var { frame, name } => Ok((*frame, name.as_str())),
            _ => Err(EngineError::new(
                ErrorKind::OperandType,
                "expected a variable argument",
            )),
        }
    }

    pub fn as_label(&self) -> Result<&str, EngineError> {
        match self {
            Argument::Label(name) => Ok(name.as_str()),
            _ => Err(EngineError::new(
                ErrorKind::OperandType,
                "expected a label argument",
            )),
        }
    }

    pub fn as_type_name(&self) -> Result<&str, EngineError> {
        match self {
            Argument::TypeName(name) => Ok(name.as_str()),
            _ => Err(EngineError::new(
                ErrorKind::OperandType,
                "expected a type argument",
            )),
        }
    }
}
