use super::ast::{Operand, ParsedInstruction};
use super::token::{self, Mnemonic};
use super::Error;
use crate::error;
use crate::mars::{AddressMode, Champion, Identity};

type Result<T> = std::result::Result<T, Error>;

/// Compiles Redcode warrior source into a champion.
///
/// Scanning stops at the first line beginning with `END`. `ORG` sets
/// the origin, metadata comment tags fill the champion's identity, and
/// every other non-blank, non-comment line must parse as an
/// instruction: `[label] MNEMONIC[.MODIFIER] operandA[, ]operandB`.
pub fn parse(source: &str) -> Result<Champion> {
    let mut parser = Parser::new();
    parser.scan(source)?;
    let (instructions, origin) =
        super::link::resolve(&parser.instructions, &parser.origin, parser.origin_line)?;
    let mut identity = parser.identity;
    identity.origin = origin;
    Ok(Champion::with_identity(identity, instructions))
}

struct Parser {
    instructions: Vec<ParsedInstruction>,
    identity: Identity,
    origin: Operand,
    origin_line: usize,
}

impl Parser {
    fn new() -> Parser {
        Parser {
            instructions: Vec::new(),
            identity: Identity::default(),
            origin: Operand::Literal(0),
            origin_line: 0,
        }
    }

    fn scan(&mut self, source: &str) -> Result<()> {
        let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
        for (index, line) in normalized.split('\n').enumerate() {
            let number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with("END") {
                break;
            }
            if trimmed.starts_with("ORG") {
                self.origin = origin_operand(strip_comment(trimmed), number)?;
                self.origin_line = number;
                continue;
            }
            if trimmed.starts_with(';') {
                self.metadata(trimmed);
                continue;
            }
            self.instruction(trimmed, number)?;
        }
        Ok(())
    }

    fn metadata(&mut self, line: &str) {
        if let Some(text) = tag_text(line, ";name") {
            self.identity.name = Some(text);
        } else if let Some(text) = tag_text(line, ";author") {
            self.identity.author = Some(text);
        } else if let Some(text) = tag_text(line, ";version") {
            self.identity.version = Some(text);
        } else if let Some(text) = tag_text(line, ";date") {
            self.identity.date = Some(text);
        } else if let Some(text) = tag_text(line, ";strategy") {
            self.identity.strategy = Some(text);
        }
    }

    fn instruction(&mut self, line: &str, number: usize) -> Result<()> {
        let fields: Vec<&str> = strip_comment(line)
            .split(|c: char| c == ' ' || c == '\t' || c == ',')
            .filter(|field| !field.is_empty())
            .collect();
        let mut label = None;
        let mut at = 0;
        let mut mnemonic = fields.first().and_then(|field| token::mnemonic(field));
        if mnemonic.is_none() {
            label = fields.first().map(|field| field.to_string());
            at = 1;
            mnemonic = fields.get(1).and_then(|field| token::mnemonic(field));
        }
        let mnemonic = match mnemonic {
            Some(mnemonic) => mnemonic,
            None => return Err(error!(UnknownOpcode, number; line)),
        };
        let modifier = token::modifier(fields[at]);
        let a_field = match fields.get(at + 1) {
            Some(field) => field,
            None => return Err(error!(ExpectedOperand, number; line)),
        };
        let (a_mode, a) = operand(a_field, number)?;
        let (b_mode, b) = if mnemonic.takes_b_operand() {
            let b_field = match fields.get(at + 2) {
                Some(field) => field,
                None => return Err(error!(ExpectedOperand, number; line)),
            };
            operand(b_field, number)?
        } else {
            (AddressMode::Immediate, Operand::Literal(0))
        };
        if let Mnemonic::Equ = mnemonic {
            if label.is_none() {
                return Err(error!(MalformedInstruction, number; "EQU REQUIRES A LABEL"));
            }
            if let Operand::Label(_) = a {
                return Err(error!(MalformedInstruction, number; "EQU REQUIRES A LITERAL VALUE"));
            }
        }
        self.instructions.push(ParsedInstruction {
            line: number,
            label,
            mnemonic,
            modifier,
            a_mode,
            a,
            b_mode,
            b,
        });
        Ok(())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(at) => line[..at].trim_end(),
        None => line,
    }
}

fn tag_text(line: &str, tag: &str) -> Option<String> {
    if line.starts_with(tag) {
        Some(line[tag.len()..].trim().to_string())
    } else {
        None
    }
}

fn operand(field: &str, number: usize) -> Result<(AddressMode, Operand)> {
    let first = match field.chars().next() {
        Some(first) => first,
        None => return Err(error!(ExpectedOperand, number)),
    };
    let (mode, value) = match token::mode_prefix(first) {
        Some(mode) => (mode, &field[1..]),
        None => (AddressMode::Direct, field),
    };
    if value.is_empty() {
        return Err(error!(ExpectedOperand, number; field));
    }
    if token::is_number(value) {
        match value.parse::<i32>() {
            Ok(literal) => Ok((mode, Operand::Literal(literal))),
            Err(_) => Err(error!(MalformedInstruction, number; field)),
        }
    } else {
        Ok((mode, Operand::Label(value.to_string())))
    }
}

fn origin_operand(line: &str, number: usize) -> Result<Operand> {
    let field = match line.split_whitespace().nth(1) {
        Some(field) => field,
        None => return Err(error!(ExpectedOperand, number; line)),
    };
    if token::is_number(field) {
        match field.parse::<i32>() {
            Ok(literal) => Ok(Operand::Literal(literal)),
            Err(_) => Err(error!(MalformedInstruction, number; line)),
        }
    } else {
        Ok(Operand::Label(field.to_string()))
    }
}
