// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

use std::collections::HashSet;

use ippvm_program::{Argument, Instruction, Program};
use ippvm_types::{literal, ArgumentKind, EngineError, ErrorKind, FrameKind, Opcode};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

struct RawInstruction {
    order: i64,
    opcode: Opcode,
    arguments: Vec<Argument>,
}

/// parses an XML program into a `Program`, in source order sorted by
/// the `order` attribute (spec §6: instructions execute in ascending
/// `order`, not necessarily contiguous document order).
pub fn load_program(xml: &str) -> Result<Program, EngineError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut raw_instructions = Vec::new();
    let mut saw_program_root = false;

    loop {
        let event = reader.read_event().map_err(|e| xml_error(e.to_string()))?;
        match event {
            Event::Start(tag) if local_name(&tag) == b"program" => {
                saw_program_root = true;
                validate_language_attribute(&tag)?;
            }
            Event::Empty(tag) if local_name(&tag) == b"program" => {
                saw_program_root = true;
                validate_language_attribute(&tag)?;
            }
            Event::Start(tag) if local_name(&tag) == b"instruction" => {
                let raw = parse_instruction(&mut reader, &tag)?;
                raw_instructions.push(raw);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_program_root {
        return Err(xml_error("missing <program> root element"));
    }

    debug!(count = raw_instructions.len(), "loaded raw instructions");
    order_and_assign(raw_instructions)
}

fn local_name(tag: &BytesStart) -> Vec<u8> {
    tag.local_name().as_ref().to_vec()
}

fn validate_language_attribute(tag: &BytesStart) -> Result<(), EngineError> {
    let language = find_attribute(tag, b"language")?
        .ok_or_else(|| xml_error("<program> is missing the 'language' attribute"))?;
    if !language.eq_ignore_ascii_case("ippcode23") {
        return Err(xml_error(format!("unsupported language '{language}'")));
    }
    Ok(())
}

fn find_attribute(tag: &BytesStart, name: &[u8]) -> Result<Option<String>, EngineError> {
    for attr in tag.attributes() {
        let attr = attr.map_err(|e| xml_error(e.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| xml_error(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn parse_instruction(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
) -> Result<RawInstruction, EngineError> {
    let order_text = find_attribute(start, b"order")?
        .ok_or_else(|| xml_error("<instruction> is missing the 'order' attribute"))?;
    let order: i64 = order_text
        .parse()
        .map_err(|_| xml_error(format!("invalid instruction order '{order_text}'")))?;
    if order <= 0 {
        return Err(xml_error(format!("instruction order must be positive, got {order}")));
    }

    let opcode_text = find_attribute(start, b"opcode")?
        .ok_or_else(|| xml_error("<instruction> is missing the 'opcode' attribute"))?;
    let opcode = Opcode::parse(&opcode_text)
        .ok_or_else(|| xml_error(format!("unrecognized opcode '{opcode_text}'")))?;

    let mut slots: [Option<Argument>; 3] = [None, None, None];

    loop {
        match reader.read_event().map_err(|e| xml_error(e.to_string()))? {
            Event::Start(tag) => {
                let index = arg_slot_index(&local_name(&tag))?;
                let kind = argument_kind(&tag)?;
                let text = read_element_text(reader)?;
                slots[index] = Some(build_argument(kind, &text)?);
            }
            Event::Empty(tag) => {
                let index = arg_slot_index(&local_name(&tag))?;
                let kind = argument_kind(&tag)?;
                slots[index] = Some(build_argument(kind, "")?);
            }
            Event::End(tag) if local_name(&tag) == b"instruction" => break,
            Event::Eof => return Err(xml_error("unexpected end of document inside <instruction>")),
            _ => {}
        }
    }

    let arity = opcode.arity();
    let mut arguments = Vec::with_capacity(arity);
    for (position, slot) in slots.into_iter().enumerate() {
        if position >= arity {
            if slot.is_some() {
                return Err(xml_error(format!(
                    "opcode '{opcode_text}' takes {arity} argument(s) but arg{} was given",
                    position + 1
                )));
            }
            continue;
        }
        let argument = slot.ok_or_else(|| {
            xml_error(format!(
                "opcode '{opcode_text}' is missing arg{}",
                position + 1
            ))
        })?;
        arguments.push(argument);
    }

    Ok(RawInstruction {
        order,
        opcode,
        arguments,
    })
}

fn arg_slot_index(tag: &[u8]) -> Result<usize, EngineError> {
    match tag {
        b"arg1" => Ok(0),
        b"arg2" => Ok(1),
        b"arg3" => Ok(2),
        other => Err(xml_error(format!(
            "unexpected element '{}' inside <instruction>",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn argument_kind(tag: &BytesStart) -> Result<ArgumentKind, EngineError> {
    let type_text = find_attribute(tag, b"type")?
        .ok_or_else(|| xml_error("argument element is missing the 'type' attribute"))?;
    ArgumentKind::parse(&type_text)
        .ok_or_else(|| xml_error(format!("unrecognized argument type '{type_text}'")))
}

fn read_element_text(reader: &mut Reader<&[u8]>) -> Result<String, EngineError> {
    let mut text = String::new();
    loop {
        match reader.read_event().map_err(|e| xml_error(e.to_string()))? {
            Event::Text(e) => {
                let decoded = e.unescape().map_err(|e| xml_error(e.to_string()))?;
                text.push_str(&decoded);
            }
            Event::End(_) => break,
            Event::Eof => return Err(xml_error("unexpected end of document inside argument element")),
            _ => {}
        }
    }
    Ok(text)
}

fn build_argument(kind: ArgumentKind, text: &str) -> Result<Argument, EngineError> {
    let trimmed = text.trim();
    match kind {
        ArgumentKind::Var => parse_var(trimmed),
        ArgumentKind::Label => Ok(Argument::Label(trimmed.to_string())),
        ArgumentKind::Type => Ok(Argument::TypeName(trimmed.to_string())),
        ArgumentKind::Int => literal::parse_literal("int", trimmed).map(Argument::Literal),
        ArgumentKind::Bool => literal::parse_literal("bool", trimmed).map(Argument::Literal),
        ArgumentKind::String => literal::parse_literal("string", text).map(Argument::Literal),
        ArgumentKind::Nil => literal::parse_literal("nil", trimmed).map(Argument::Literal),
    }
}

fn parse_var(text: &str) -> Result<Argument, EngineError> {
    let (frame_tag, name) = text
        .split_once('@')
        .ok_or_else(|| xml_error(format!("malformed variable reference '{text}'")))?;
    let frame = FrameKind::parse(frame_tag)
        .ok_or_else(|| xml_error(format!("unrecognized frame '{frame_tag}'")))?;
    if name.is_empty() {
        return Err(xml_error(format!("malformed variable reference '{text}'")));
    }
    Ok(Argument::Var {
        frame,
        name: name.to_string(),
    })
}

/// sorts by `order`, checks uniqueness, and assigns the 0-based
/// ordinals the diagnostic machinery uses.
fn order_and_assign(mut raw: Vec<RawInstruction>) -> Result<Program, EngineError> {
    raw.sort_by_key(|i| i.order);

    let mut seen = HashSet::with_capacity(raw.len());
    for instruction in &raw {
        if !seen.insert(instruction.order) {
            return Err(xml_error(format!(
                "duplicate instruction order '{}'",
                instruction.order
            )));
        }
    }

    let instructions = raw
        .into_iter()
        .enumerate()
        .map(|(ordinal, raw)| Instruction::new(raw.opcode, raw.arguments, ordinal))
        .collect();

    Ok(Program::new(instructions))
}

fn xml_error(message: impl Into<String>) -> EngineError {
    EngineError::new(ErrorKind::XmlStructure, message.into())
}

#[cfg(test)]
mod tests {
    use ippvm_types::Value;

    use super::*;

    #[test]
    fn loads_a_minimal_program() {
        let xml = r#"
            <program language="IPPcode23">
                <instruction order="1" opcode="DEFVAR">
                    <arg1 type="var">GF@x</arg1>
                </instruction>
                <instruction order="2" opcode="MOVE">
                    <arg1 type="var">GF@x</arg1>
                    <arg2 type="int">42</arg2>
                </instruction>
            </program>
        "#;

        let program = load_program(xml).unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.get(0).unwrap().opcode, Opcode::DEFVAR);
        assert_eq!(program.get(1).unwrap().opcode, Opcode::MOVE);
        assert_eq!(
            program.get(1).unwrap().arguments[1],
            Argument::Literal(Value::Int(42))
        );
    }

    #[test]
    fn sorts_by_order_not_document_order() {
        let xml = r#"
            <program language="IPPcode23">
                <instruction order="5" opcode="BREAK"></instruction>
                <instruction order="1" opcode="CREATEFRAME"></instruction>
            </program>
        "#;

        let program = load_program(xml).unwrap();
        assert_eq!(program.get(0).unwrap().opcode, Opcode::CREATEFRAME);
        assert_eq!(program.get(1).unwrap().opcode, Opcode::BREAK);
    }

    #[test]
    fn rejects_wrong_language() {
        let xml = r#"<program language="other"></program>"#;
        assert_eq!(load_program(xml).unwrap_err().kind, ErrorKind::XmlStructure);
    }

    #[test]
    fn rejects_duplicate_order() {
        let xml = r#"
            <program language="IPPcode23">
                <instruction order="1" opcode="BREAK"></instruction>
                <instruction order="1" opcode="BREAK"></instruction>
            </program>
        "#;
        assert_eq!(load_program(xml).unwrap_err().kind, ErrorKind::XmlStructure);
    }

    #[test]
    fn rejects_wrong_arity() {
        let xml = r#"
            <program language="IPPcode23">
                <instruction order="1" opcode="BREAK">
                    <arg1 type="int">1</arg1>
                </instruction>
            </program>
        "#;
        assert_eq!(load_program(xml).unwrap_err().kind, ErrorKind::XmlStructure);
    }

    #[test]
    fn rejects_malformed_variable() {
        let xml = r#"
            <program language="IPPcode23">
                <instruction order="1" opcode="DEFVAR">
                    <arg1 type="var">x</arg1>
                </instruction>
            </program>
        "#;
        assert_eq!(load_program(xml).unwrap_err().kind, ErrorKind::XmlStructure);
    }
}
