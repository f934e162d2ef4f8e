//! # msbasic
//!
//! Microsoft BASIC 1.1 as it ran on the 6502, re-created in Rust.
//! ```text
//! MSBASIC 1.1
//! READY.
//! █
//! ```
//!
//! The interpreter accepts the classic line-numbered dialect: input lines are
//! crunched into single-byte tokens, stored sorted by line number, and walked
//! by an execution cursor. The RND generator reproduces the 6502 ROM's
//! floating-point scramble bit for bit, so period programs that depend on the
//! random sequence behave as they did on the original hardware.

#[macro_use]
pub mod lang;
pub mod mach;
pub mod term;
