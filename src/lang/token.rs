//! Reserved-word tokens.
//!
//! Every reserved word crunches to a single byte in `0x80..`. The order
//! matches the 6502 dispatch tables: statements first, then the auxiliary
//! keywords, the operators, and the functions. ASCII printables stay
//! themselves, so a tokenised body is a byte soup of literal ASCII and these
//! codes.

pub const END: u8 = 0x80;
pub const FOR: u8 = 0x81;
pub const NEXT: u8 = 0x82;
pub const DATA: u8 = 0x83;
pub const INPUT: u8 = 0x84;
pub const DIM: u8 = 0x85;
pub const READ: u8 = 0x86;
pub const LET: u8 = 0x87;
pub const GOTO: u8 = 0x88;
pub const RUN: u8 = 0x89;
pub const IF: u8 = 0x8A;
pub const RESTORE: u8 = 0x8B;
pub const GOSUB: u8 = 0x8C;
pub const RETURN: u8 = 0x8D;
pub const REM: u8 = 0x8E;
pub const STOP: u8 = 0x8F;
pub const ON: u8 = 0x90;
pub const NULL: u8 = 0x91;
pub const WAIT: u8 = 0x92;
pub const LOAD: u8 = 0x93;
pub const SAVE: u8 = 0x94;
pub const VERIFY: u8 = 0x95;
pub const DEF: u8 = 0x96;
pub const POKE: u8 = 0x97;
pub const PRINT: u8 = 0x98;
pub const CONT: u8 = 0x99;
pub const LIST: u8 = 0x9A;
pub const CLEAR: u8 = 0x9B;
pub const GET: u8 = 0x9C;
pub const NEW: u8 = 0x9D;

pub const TAB: u8 = 0x9E; // TAB( — the paren is part of the word
pub const TO: u8 = 0x9F;
pub const FN: u8 = 0xA0;
pub const SPC: u8 = 0xA1; // SPC(
pub const THEN: u8 = 0xA2;
pub const NOT: u8 = 0xA3;
pub const STEP: u8 = 0xA4;

// Operator codes exist for table symmetry. The cruncher leaves the ASCII
// characters in place, but the evaluator accepts either form.
pub const PLUS: u8 = 0xA5;
pub const MINUS: u8 = 0xA6;
pub const MULTIPLY: u8 = 0xA7;
pub const DIVIDE: u8 = 0xA8;
pub const POWER: u8 = 0xA9;
pub const AND: u8 = 0xAA;
pub const OR: u8 = 0xAB;
pub const GT: u8 = 0xAC;
pub const EQ: u8 = 0xAD;
pub const LT: u8 = 0xAE;

pub const SGN: u8 = 0xAF;
pub const INT: u8 = 0xB0;
pub const ABS: u8 = 0xB1;
pub const USR: u8 = 0xB2;
pub const FRE: u8 = 0xB3;
pub const POS: u8 = 0xB4;
pub const SQR: u8 = 0xB5;
pub const RND: u8 = 0xB6;
pub const LOG: u8 = 0xB7;
pub const EXP: u8 = 0xB8;
pub const COS: u8 = 0xB9;
pub const SIN: u8 = 0xBA;
pub const TAN: u8 = 0xBB;
pub const ATN: u8 = 0xBC;
pub const PEEK: u8 = 0xBD;
pub const LEN: u8 = 0xBE;
pub const STR: u8 = 0xBF; // STR$
pub const VAL: u8 = 0xC0;
pub const ASC: u8 = 0xC1;
pub const CHR: u8 = 0xC2; // CHR$
pub const LEFT: u8 = 0xC3; // LEFT$
pub const RIGHT: u8 = 0xC4; // RIGHT$
pub const MID: u8 = 0xC5; // MID$

/// One past the last assigned token byte.
pub const LAST: u8 = 0xC6;

/// The reserved-word list, word text paired with its token byte. This is the
/// single source of truth for crunching; detokenising goes through
/// [`name`].
pub const RESERVED_WORDS: &[(&str, u8)] = &[
    ("END", END),
    ("FOR", FOR),
    ("NEXT", NEXT),
    ("DATA", DATA),
    ("INPUT", INPUT),
    ("DIM", DIM),
    ("READ", READ),
    ("LET", LET),
    ("GOTO", GOTO),
    ("RUN", RUN),
    ("IF", IF),
    ("RESTORE", RESTORE),
    ("GOSUB", GOSUB),
    ("RETURN", RETURN),
    ("REM", REM),
    ("STOP", STOP),
    ("ON", ON),
    ("NULL", NULL),
    ("WAIT", WAIT),
    ("LOAD", LOAD),
    ("SAVE", SAVE),
    ("VERIFY", VERIFY),
    ("DEF", DEF),
    ("POKE", POKE),
    ("PRINT", PRINT),
    ("CONT", CONT),
    ("LIST", LIST),
    ("CLEAR", CLEAR),
    ("GET", GET),
    ("NEW", NEW),
    ("TAB(", TAB),
    ("TO", TO),
    ("FN", FN),
    ("SPC(", SPC),
    ("THEN", THEN),
    ("NOT", NOT),
    ("STEP", STEP),
    ("AND", AND),
    ("OR", OR),
    ("SGN", SGN),
    ("INT", INT),
    ("ABS", ABS),
    ("USR", USR),
    ("FRE", FRE),
    ("POS", POS),
    ("SQR", SQR),
    ("RND", RND),
    ("LOG", LOG),
    ("EXP", EXP),
    ("COS", COS),
    ("SIN", SIN),
    ("TAN", TAN),
    ("ATN", ATN),
    ("PEEK", PEEK),
    ("LEN", LEN),
    ("STR$", STR),
    ("VAL", VAL),
    ("ASC", ASC),
    ("CHR$", CHR),
    ("LEFT$", LEFT),
    ("RIGHT$", RIGHT),
    ("MID$", MID),
];

/// Parallel token-to-text table for the detokeniser.
const NAMES: &[&str] = &[
    "END", "FOR", "NEXT", "DATA", "INPUT", "DIM", "READ", "LET", "GOTO", "RUN",
    "IF", "RESTORE", "GOSUB", "RETURN", "REM", "STOP", "ON", "NULL", "WAIT",
    "LOAD", "SAVE", "VERIFY", "DEF", "POKE", "PRINT", "CONT", "LIST", "CLEAR",
    "GET", "NEW", "TAB(", "TO", "FN", "SPC(", "THEN", "NOT", "STEP", "+", "-",
    "*", "/", "^", "AND", "OR", ">", "=", "<", "SGN", "INT", "ABS", "USR",
    "FRE", "POS", "SQR", "RND", "LOG", "EXP", "COS", "SIN", "TAN", "ATN",
    "PEEK", "LEN", "STR$", "VAL", "ASC", "CHR$", "LEFT$", "RIGHT$", "MID$",
];

pub fn is_token(byte: u8) -> bool {
    byte >= END && byte < LAST
}

pub fn is_statement(byte: u8) -> bool {
    (END..=NEW).contains(&byte)
}

pub fn is_function(byte: u8) -> bool {
    (SGN..=MID).contains(&byte)
}

pub fn name(byte: u8) -> &'static str {
    if is_token(byte) {
        NAMES[(byte - END) as usize]
    } else {
        "?"
    }
}
