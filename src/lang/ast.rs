use super::token::Mnemonic;
use crate::mars::{AddressMode, Modifier};

/// An operand value before label resolution: either a signed literal
/// or a symbolic reference to be resolved by the linker.
#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Literal(i32),
    Label(String),
}

/// One parsed source line that carries an instruction (or an `EQU`
/// pseudo-instruction), with labels still unresolved. `line` is the
/// 1-based source line for diagnostics.
#[derive(Debug, PartialEq, Clone)]
pub struct ParsedInstruction {
    pub line: usize,
    pub label: Option<String>,
    pub mnemonic: Mnemonic,
    pub modifier: Modifier,
    pub a_mode: AddressMode,
    pub a: Operand,
    pub b_mode: AddressMode,
    pub b: Operand,
}
