// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::collections::HashMap;

use ippvm_types::{EngineError, ErrorKind, FrameKind, Value};

use crate::frame::Frame;

/// the full execution state an `ippvm_runtime` dispatch loop mutates:
/// GF, the LF stack, the (optional) TF, the data stack, the call stack,
/// the label table and the program counter.
#[derive(Debug, Default)]
pub struct Memory {
    gf: Frame,
    lf_stack: Vec<Frame>,
    tf: Option<Frame>,
    data_stack: Vec<Value>,
    call_stack: Vec<usize>,
    labels: HashMap<String, usize>,
    pc: usize,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            gf: Frame::new(),
            lf_stack: Vec::new(),
            tf: None,
            data_stack: Vec::new(),
            call_stack: Vec::new(),
            labels: HashMap::new(),
            pc: 0,
        }
    }

    pub fn get_frame(&self, kind: FrameKind) -> Result<&Frame, EngineError> {
        match kind {
            FrameKind::Global => Ok(&self.gf),
            FrameKind::Local => self.lf_stack.last().ok_or_else(frame_absent),
            FrameKind::Temporary => self.tf.as_ref().ok_or_else(frame_absent),
        }
    }

    pub fn get_frame_mut(&mut self, kind: FrameKind) -> Result<&mut Frame, EngineError> {
        match kind {
            FrameKind::Global => Ok(&mut self.gf),
            FrameKind::Local => self.lf_stack.last_mut().ok_or_else(frame_absent),
            FrameKind::Temporary => self.tf.as_mut().ok_or_else(frame_absent),
        }
    }

    pub fn define(&mut self, kind: FrameKind, name: &str) -> Result<(), EngineError> {
        self.get_frame_mut(kind)?.define(name)
    }

    pub fn read(&self, kind: FrameKind, name: &str) -> Result<&Value, EngineError> {
        self.get_frame(kind)?.read(name)
    }

    pub fn write(&mut self, kind: FrameKind, name: &str, value: Value) -> Result<(), EngineError> {
        self.get_frame_mut(kind)?.write(name, value)
    }

    /// `CREATEFRAME`: (re)creates TF as an empty frame, discarding any
    /// frame already in TF.
    pub fn createframe(&mut self) {
        self.tf = Some(Frame::new());
    }

    /// `PUSHFRAME`: moves TF onto the LF stack. fails with `FrameAbsent`
    /// if TF does not exist.
    pub fn pushframe(&mut self) -> Result<(), EngineError> {
        let frame = self.tf.take().ok_or_else(frame_absent)?;
        self.lf_stack.push(frame);
        Ok(())
    }

    /// `POPFRAME`: moves the top LF into TF. fails with `FrameAbsent` if
    /// the LF stack is empty.
    pub fn popframe(&mut self) -> Result<(), EngineError> {
        let frame = self.lf_stack.pop().ok_or_else(frame_absent)?;
        self.tf = Some(frame);
        Ok(())
    }

    pub fn data_stack_push(&mut self, value: Value) {
        self.data_stack.push(value);
    }

    pub fn data_stack_pop(&mut self) -> Result<Value, EngineError> {
        self.data_stack.pop().ok_or_else(|| {
            EngineError::new(ErrorKind::MissingValue, "data stack is empty")
        })
    }

    pub fn call_stack_push(&mut self, return_pc: usize) {
        self.call_stack.push(return_pc);
    }

    pub fn call_stack_pop(&mut self) -> Result<usize, EngineError> {
        self.call_stack.pop().ok_or_else(|| {
            EngineError::new(ErrorKind::MissingValue, "call stack is empty")
        })
    }

    pub fn get_pc(&self) -> usize {
        self.pc
    }

    pub fn set_pc(&mut self, pc: usize) {
        self.pc = pc;
    }

    pub fn advance_pc(&mut self) {
        self.pc += 1;
    }

    /// records a label at the given instruction index. duplicate labels
    /// are a `Semantic` error (spec §4.2/§9, label preprocessing pass).
    pub fn define_label(&mut self, name: &str, index: usize) -> Result<(), EngineError> {
        if self.labels.contains_key(name) {
            return Err(EngineError::new(
                ErrorKind::Semantic,
                format!("label '{name}' is already defined"),
            ));
        }
        self.labels.insert(name.to_string(), index);
        Ok(())
    }

    /// looks up the instruction index a label resolves to. the label
    /// preprocessing pass registers every `LABEL` instruction before
    /// execution starts, so a miss here means a `JUMP`-family instruction
    /// names a label nothing ever declared — also a `Semantic` error.
    pub fn lookup_label(&self, name: &str) -> Result<usize, EngineError> {
        self.labels.get(name).copied().ok_or_else(|| {
            EngineError::new(ErrorKind::Semantic, format!("undefined label '{name}'"))
        })
    }
}

fn frame_absent() -> EngineError {
    EngineError::new(ErrorKind::FrameAbsent, "frame does not exist")
}
