// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::collections::HashMap;

use ippvm_types::{EngineError, ErrorKind, Value};

/// a mapping from variable name to value. GF, every LF on the frame stack,
/// and the (optional) TF are each one `Frame`.
#[derive(Debug, Default)]
pub struct Frame {
    slots: HashMap<String, Value>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// adds a fresh `Uninitialized` slot. fails if the name is already
    /// defined in this frame.
    pub fn define(&mut self, name: &str) -> Result<(), EngineError> {
        if self.slots.contains_key(name) {
            return Err(EngineError::new(
                ErrorKind::Semantic,
                format!("variable '{name}' is already defined in this frame"),
            ));
        }
        self.slots.insert(name.to_string(), Value::Uninitialized);
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<&Value, EngineError> {
        self.slots.get(name).ok_or_else(|| {
            EngineError::new(ErrorKind::UndefVariable, format!("undefined variable '{name}'"))
        })
    }

    /// replaces the slot's value. the slot must already exist (via
    /// `define`); this is an internal invariant, not a user-facing error
    /// path, since every `var` argument is resolved against a frame that
    /// the loader has already validated contains a matching `DEFVAR`.
    pub fn write(&mut self, name: &str, value: Value) -> Result<(), EngineError> {
        match self.slots.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EngineError::new(
                ErrorKind::UndefVariable,
                format!("undefined variable '{name}'"),
            )),
        }
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &String> {
        self.slots.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slot_is_uninitialized() {
        let mut frame = Frame::new();
        frame.define("x").unwrap();
        assert_eq!(frame.read("x").unwrap(), &Value::Uninitialized);
    }

    #[test]
    fn redefine_is_semantic_error() {
        let mut frame = Frame::new();
        frame.define("x").unwrap();
        let err = frame.define("x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn read_missing_is_undef_variable() {
        let frame = Frame::new();
        let err = frame.read("x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefVariable);
    }

    #[test]
    fn write_round_trips() {
        let mut frame = Frame::new();
        frame.define("x").unwrap();
        frame.write("x", Value::Int(7)).unwrap();
        assert_eq!(frame.read("x").unwrap(), &Value::Int(7));
    }
}
