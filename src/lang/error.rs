pub struct Error {
    code: ErrorCode,
    line_number: Option<usize>,
    text: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $text:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).text($text)
    };
    ($err:ident, $line:expr; $text:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .text($text)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            text: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn in_line_number(&self, line: usize) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            code: self.code,
            line_number: Some(line),
            text: self.text.clone(),
        }
    }

    pub fn text<S: Into<String>>(&self, text: S) -> Error {
        debug_assert!(self.text.is_empty());
        Error {
            code: self.code,
            line_number: self.line_number,
            text: text.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorCode {
    MalformedInstruction,
    UnknownOpcode,
    ExpectedOperand,
    UndefinedLabel,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::MalformedInstruction => "MALFORMED INSTRUCTION",
            ErrorCode::UnknownOpcode => "UNKNOWN OPCODE",
            ErrorCode::ExpectedOperand => "EXPECTED OPERAND",
            ErrorCode::UndefinedLabel => "UNDEFINED LABEL",
        };
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" IN LINE {}", line_number));
        }
        if !self.text.is_empty() {
            suffix.push_str(&format!("; {}", self.text));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}
