/*!
## Machine module

Runtime half of the interpreter: values, the string heap, variable tables,
the MS floating-point random generator, the console, the expression
evaluator, the statement handlers, and the interpreter state that ties them
together.

*/

/// Longest accepted input line, in bytes.
pub const LINE_MAX: usize = 255;
/// Longest string value.
pub const STRING_MAX: usize = 255;
/// FOR/GOSUB control stack depth.
pub const STACK_MAX: usize = 512;
/// Capacity of the bump-allocated string heap.
pub const STRING_SPACE: usize = 16384;
/// Simulated memory for PEEK/POKE.
pub const MEMORY_SIZE: usize = 65536;
/// Terminal width the console wraps at.
pub const TERM_WIDTH: usize = 80;
/// Column width of a PRINT comma zone.
pub const ZONE_WIDTH: usize = 14;

mod console;
mod expr;
mod rnd;
mod stmt;
mod string;
mod val;
mod var;

pub mod runtime;

pub use console::{format_number, Console};
pub use rnd::Rnd;
pub use runtime::Interp;
pub use string::StringHeap;
pub use val::{StrDesc, Val};
pub use var::{Array, UserFn, VarName};
