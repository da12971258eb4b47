use crate::mars::{AddressMode, Modifier, Opcode};

/// A mnemonic token: either a real opcode or the `EQU` pseudo-opcode,
/// which defines a named constant and never reaches core memory.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mnemonic {
    Op(Opcode),
    Equ,
}

impl Mnemonic {
    /// `JMP`, `SPL`, and `EQU` take a single operand; everything else
    /// requires a B-operand too.
    pub fn takes_b_operand(&self) -> bool {
        use Opcode::*;
        match self {
            Mnemonic::Equ => false,
            Mnemonic::Op(Jmp) | Mnemonic::Op(Spl) => false,
            Mnemonic::Op(_) => true,
        }
    }
}

/// Case-sensitive prefix match against the fixed mnemonic table, so
/// `MOV.I` and `MOV` both resolve. A word matching nothing is a label.
pub fn mnemonic(word: &str) -> Option<Mnemonic> {
    use Opcode::*;
    let table = [
        ("DAT", Mnemonic::Op(Dat)),
        ("MOV", Mnemonic::Op(Mov)),
        ("ADD", Mnemonic::Op(Add)),
        ("SUB", Mnemonic::Op(Sub)),
        ("MUL", Mnemonic::Op(Mul)),
        ("DIV", Mnemonic::Op(Div)),
        ("MOD", Mnemonic::Op(Mod)),
        ("JMP", Mnemonic::Op(Jmp)),
        ("JMZ", Mnemonic::Op(Jmz)),
        ("JMN", Mnemonic::Op(Jmn)),
        ("DJN", Mnemonic::Op(Djn)),
        ("CMP", Mnemonic::Op(Cmp)),
        ("SLT", Mnemonic::Op(Slt)),
        ("SPL", Mnemonic::Op(Spl)),
        ("EQU", Mnemonic::Equ),
    ];
    for (prefix, mnemonic) in table.iter() {
        if word.starts_with(prefix) {
            return Some(*mnemonic);
        }
    }
    None
}

/// The `.MOD` suffix on a mnemonic token. Defaults to `F` when absent.
pub fn modifier(word: &str) -> Modifier {
    use Modifier::*;
    let table = [
        (".AB", AB),
        (".BA", BA),
        (".A", A),
        (".B", B),
        (".F", F),
        (".X", X),
        (".I", I),
    ];
    for (suffix, modifier) in table.iter() {
        if word.ends_with(suffix) {
            return *modifier;
        }
    }
    F
}

/// The addressing-mode sigil leading an operand. `$` is optional for
/// direct mode, so a bare number has no prefix at all.
pub fn mode_prefix(c: char) -> Option<AddressMode> {
    use AddressMode::*;
    match c {
        '#' => Some(Immediate),
        '$' => Some(Direct),
        '@' => Some(Indirect),
        '<' => Some(Decrement),
        '>' => Some(Increment),
        _ => None,
    }
}

/// A value token is numeric when it leads with a digit or a sign;
/// anything else is a symbolic label.
pub fn is_number(word: &str) -> bool {
    match word.chars().next() {
        Some(c) => c.is_ascii_digit() || c == '-' || c == '+',
        None => false,
    }
}
