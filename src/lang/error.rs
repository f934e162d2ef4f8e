/// Constructs an [`Error`](crate::lang::Error) from an [`ErrorCode`] variant,
/// optionally with extra context appended after the message.
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
}

/// The classic error set. Each code carries the two-letter short form and the
/// long message of the original interpreter; both are part of the public
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NextWithoutFor,
    SyntaxError,
    ReturnWithoutGosub,
    OutOfData,
    IllegalQuantity,
    Overflow,
    OutOfMemory,
    UndefinedStatement,
    BadSubscript,
    RedimensionedArray,
    DivisionByZero,
    IllegalDirect,
    TypeMismatch,
    StringTooLong,
    FileData,
    FormulaTooComplex,
    CantContinue,
    UndefinedFunction,
    Break,
}

impl ErrorCode {
    pub fn short(self) -> &'static str {
        use ErrorCode::*;
        match self {
            NextWithoutFor => "NF",
            SyntaxError => "SN",
            ReturnWithoutGosub => "RG",
            OutOfData => "OD",
            IllegalQuantity => "FC",
            Overflow => "OV",
            OutOfMemory => "OM",
            UndefinedStatement => "US",
            BadSubscript => "BS",
            RedimensionedArray => "DD",
            DivisionByZero => "/0",
            IllegalDirect => "ID",
            TypeMismatch => "TM",
            StringTooLong => "LS",
            FileData => "FD",
            FormulaTooComplex => "ST",
            CantContinue => "CN",
            UndefinedFunction => "UF",
            Break => "BR",
        }
    }

    pub fn long(self) -> &'static str {
        use ErrorCode::*;
        match self {
            NextWithoutFor => "NEXT WITHOUT FOR",
            SyntaxError => "SYNTAX ERROR",
            ReturnWithoutGosub => "RETURN WITHOUT GOSUB",
            OutOfData => "OUT OF DATA",
            IllegalQuantity => "ILLEGAL QUANTITY",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            UndefinedStatement => "UNDEF'D STATEMENT",
            BadSubscript => "BAD SUBSCRIPT",
            RedimensionedArray => "REDIM'D ARRAY",
            DivisionByZero => "DIVISION BY ZERO",
            IllegalDirect => "ILLEGAL DIRECT",
            TypeMismatch => "TYPE MISMATCH",
            StringTooLong => "STRING TOO LONG",
            FileData => "FILE DATA ERROR",
            FormulaTooComplex => "FORMULA TOO COMPLEX",
            CantContinue => "CAN'T CONTINUE",
            UndefinedFunction => "UNDEF'D FUNCTION",
            Break => "BREAK",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line: Option<super::LineNumber>,
    message: Option<String>,
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line: None,
            message: None,
        }
    }

    pub fn message<S: Into<String>>(mut self, msg: S) -> Error {
        self.message = Some(msg.into());
        self
    }

    /// Attaches the program line the error was raised in. A later call wins
    /// only when no line has been recorded yet, so the innermost frame that
    /// knows its line is the one reported.
    pub fn in_line(mut self, line: Option<super::LineNumber>) -> Error {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<super::LineNumber> {
        self.line
    }

    /// Only BREAK leaves the interpreter in a state CONT may resume from.
    pub fn allows_cont(&self) -> bool {
        self.code == ErrorCode::Break
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code.long())?;
        if let Some(msg) = &self.message {
            write!(f, "; {}", msg)?;
        }
        if let Some(line) = self.line {
            write!(f, " IN {}", line)?;
        }
        Ok(())
    }
}
