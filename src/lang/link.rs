use super::ast::{Operand, ParsedInstruction};
use super::token::Mnemonic;
use super::Error;
use crate::error;
use crate::mars::MemoryCell;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// Resolves symbolic references and emits the final instruction
/// sequence. `EQU`-defined constants substitute wherever their label is
/// used and take precedence over positional labels; every other label
/// resolves to the relative instruction-index distance, counted over
/// the sequence with `EQU` pseudo-instructions excluded. The origin
/// resolves the same way relative to the first real instruction.
pub fn resolve(
    parsed: &[ParsedInstruction],
    origin: &Operand,
    origin_line: usize,
) -> Result<(Vec<MemoryCell>, i32)> {
    let link = Link::build(parsed);
    let mut cells = Vec::new();
    let mut position = 0;
    for instruction in parsed {
        let opcode = match instruction.mnemonic {
            Mnemonic::Op(opcode) => opcode,
            Mnemonic::Equ => continue,
        };
        let a = link.value(&instruction.a, position, instruction.line)?;
        let b = link.value(&instruction.b, position, instruction.line)?;
        cells.push(MemoryCell::new(
            opcode,
            instruction.modifier,
            instruction.a_mode,
            a,
            instruction.b_mode,
            b,
        ));
        position += 1;
    }
    let origin = link.value(origin, 0, origin_line)?;
    Ok((cells, origin))
}

struct Link<'a> {
    constants: HashMap<&'a str, i32>,
    positions: HashMap<&'a str, i32>,
}

impl<'a> Link<'a> {
    fn build(parsed: &'a [ParsedInstruction]) -> Link<'a> {
        let mut constants = HashMap::new();
        let mut positions = HashMap::new();
        let mut position = 0;
        for instruction in parsed {
            match instruction.mnemonic {
                Mnemonic::Equ => {
                    if let (Some(label), Operand::Literal(value)) =
                        (&instruction.label, &instruction.a)
                    {
                        constants.entry(label.as_str()).or_insert(*value);
                    }
                }
                Mnemonic::Op(_) => {
                    if let Some(label) = &instruction.label {
                        positions.entry(label.as_str()).or_insert(position);
                    }
                    position += 1;
                }
            }
        }
        Link {
            constants,
            positions,
        }
    }

    fn value(&self, operand: &Operand, position: i32, line: usize) -> Result<i32> {
        match operand {
            Operand::Literal(value) => Ok(*value),
            Operand::Label(name) => self.offset(name, position, line),
        }
    }

    fn offset(&self, name: &str, from: i32, line: usize) -> Result<i32> {
        if let Some(value) = self.constants.get(name) {
            return Ok(*value);
        }
        match self.positions.get(name) {
            Some(target) => Ok(target - from),
            None => Err(error!(UndefinedLabel, line; name)),
        }
    }
}
