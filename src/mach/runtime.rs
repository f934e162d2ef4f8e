//! Interpreter state and the execution loop.
//!
//! Everything mutable lives in one [`Interp`] value threaded through the
//! evaluator and the statement handlers: the program store, the execution
//! cursor, the control stack, the variable tables, the string heap, the DATA
//! cursor, and the console. The loop is strictly synchronous; the only
//! blocking points are INPUT and GET.

use super::console::Console;
use super::rnd::Rnd;
use super::string::StringHeap;
use super::var::{Arrays, UserFns, Vars};
use super::{LINE_MAX, MEMORY_SIZE, STACK_MAX};
use crate::lang::{tokenize, Error, LineNumber, LINE_NUM_MAX};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// A position in tokenised text: the program line it belongs to (`None` in
/// direct mode), the body itself, and a byte offset. Bodies are shared
/// `Rc<[u8]>` so saved cursors (FOR/GOSUB frames, CONT) stay valid however
/// the program map changes around them.
#[derive(Debug, Clone)]
pub(super) struct Cursor {
    pub line: Option<LineNumber>,
    pub body: Rc<[u8]>,
    pub pos: usize,
}

impl Cursor {
    fn empty() -> Cursor {
        Cursor {
            line: None,
            body: Rc::from(Vec::new()),
            pos: 0,
        }
    }
}

/// Control stack entries.
#[derive(Debug, Clone)]
pub(super) enum Frame {
    For {
        var: super::var::VarName,
        limit: f64,
        step: f64,
        cursor: Cursor,
    },
    Gosub {
        cursor: Cursor,
    },
}

/// Where the next READ will look. `Reset` scans from the first program
/// line; `LineStart` scans from a RESTOREd line; `InBody` continues inside
/// a DATA statement already being consumed.
#[derive(Debug, Clone)]
pub(super) enum DataCursor {
    Reset,
    LineStart(LineNumber),
    InBody(LineNumber, usize),
}

/// ## Interpreter
pub struct Interp {
    pub(super) program: BTreeMap<LineNumber, Rc<[u8]>>,
    pub(super) cur: Cursor,
    pub(super) running: bool,
    pub(super) stack: Vec<Frame>,
    pub(super) vars: Vars,
    pub(super) arrays: Arrays,
    pub(super) fns: UserFns,
    pub(super) heap: StringHeap,
    pub(super) rnd: Rnd,
    pub(super) data: DataCursor,
    pub(super) cont: Option<Cursor>,
    pub(super) can_continue: bool,
    pub(super) console: Console,
    pub(super) memory: Vec<u8>,
    break_flag: Option<Arc<AtomicBool>>,
}

impl Default for Interp {
    fn default() -> Interp {
        Interp::new(Console::stdio())
    }
}

impl Interp {
    pub fn new(console: Console) -> Interp {
        Interp {
            program: BTreeMap::new(),
            cur: Cursor::empty(),
            running: false,
            stack: Vec::new(),
            vars: Vars::default(),
            arrays: Arrays::default(),
            fns: UserFns::default(),
            heap: StringHeap::new(),
            rnd: Rnd::new(),
            data: DataCursor::Reset,
            cont: None,
            can_continue: false,
            console,
            memory: vec![0; MEMORY_SIZE],
            break_flag: None,
        }
    }

    /// Installs the CTRL-C observer consulted by the break hook. Without
    /// one the hook always reports no break.
    pub fn set_break_flag(&mut self, flag: Arc<AtomicBool>) {
        self.break_flag = Some(flag);
    }

    pub fn free_bytes(&self) -> usize {
        self.heap.free()
    }

    /// Feeds one input line to the interpreter. A line starting with a
    /// digit is stored (replacing or deleting); anything else is crunched
    /// and executed as a direct command, running to completion.
    pub fn enter(&mut self, input: &str) -> Result<()> {
        if input.len() > LINE_MAX {
            return Err(error!(OutOfMemory; "LINE BUFFER OVERFLOW"));
        }
        let line = input.trim_start_matches(' ');
        if line.is_empty() {
            return Ok(());
        }
        if line.as_bytes()[0].is_ascii_digit() {
            return self.store_line(line);
        }
        self.cur = Cursor {
            line: None,
            body: tokenize(line).into(),
            pos: 0,
        };
        self.running = true;
        let result = self.run_loop();
        self.running = false;
        if let Err(err) = &result {
            if err.allows_cont() {
                self.can_continue = true;
                self.cont = Some(self.cur.clone());
            } else {
                self.can_continue = false;
                self.cont = None;
            }
        }
        result
    }

    /// Reports an error the way the original does: a fresh line, the
    /// message, and the line number when one is attached.
    pub fn report(&mut self, err: &Error) {
        self.console.newline();
        let text = format!("?{}", err);
        self.console.write_str(&text);
        self.console.newline();
        self.console.flush();
    }

    fn store_line(&mut self, line: &str) -> Result<()> {
        let bytes = line.as_bytes();
        let mut num: u32 = 0;
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            num = num * 10 + u32::from(bytes[i] - b'0');
            if num > u32::from(LINE_NUM_MAX) {
                return Err(error!(SyntaxError));
            }
            i += 1;
        }
        if num == 0 {
            // line numbers start at 1
            return Err(error!(SyntaxError));
        }
        let rest = line[i..].trim_start_matches(' ');
        if rest.is_empty() {
            self.program.remove(&(num as LineNumber));
        } else {
            self.program
                .insert(num as LineNumber, tokenize(rest).into());
        }
        // the stored program changed under any paused execution
        self.can_continue = false;
        self.cont = None;
        Ok(())
    }

    /// The statement loop. Dispatches statements until execution halts,
    /// re-dispatching at whatever position branching statements leave the
    /// cursor.
    fn run_loop(&mut self) -> Result<()> {
        while self.running {
            if self.cur.line.is_some() && self.break_requested() {
                return Err(error!(Break).in_line(self.cur.line));
            }
            self.skip_spaces();
            match self.peek() {
                0 => {
                    if !self.advance_line() {
                        break;
                    }
                }
                b':' => {
                    self.advance();
                }
                _ => {
                    let line = self.cur.line;
                    self.execute_statement().map_err(|e| e.in_line(line))?;
                }
            }
        }
        Ok(())
    }

    /// Moves to the next program line, or halts. Falling off the end of
    /// the program (or of a direct command) stops execution; only the
    /// program case retires the CONT point.
    fn advance_line(&mut self) -> bool {
        match self.cur.line {
            None => {
                self.running = false;
                false
            }
            Some(n) => match self.next_line_after(n) {
                Some(cursor) => {
                    self.cur = cursor;
                    true
                }
                None => {
                    self.running = false;
                    self.can_continue = false;
                    self.cont = None;
                    false
                }
            },
        }
    }

    fn next_line_after(&self, n: LineNumber) -> Option<Cursor> {
        self.program
            .range((Excluded(n), Unbounded))
            .next()
            .map(|(&num, body)| Cursor {
                line: Some(num),
                body: body.clone(),
                pos: 0,
            })
    }

    /// Exact-line branch target for GOTO, GOSUB, RUN n, and IF..THEN n.
    pub(super) fn goto_line(&mut self, target: f64) -> Result<()> {
        if target < 1.0 || target > f64::from(LINE_NUM_MAX) {
            return Err(error!(UndefinedStatement));
        }
        let num = target as LineNumber;
        match self.program.get(&num) {
            Some(body) => {
                self.cur = Cursor {
                    line: Some(num),
                    body: body.clone(),
                    pos: 0,
                };
                Ok(())
            }
            None => Err(error!(UndefinedStatement)),
        }
    }

    /// CLEAR's share of the state: variables, arrays, functions, the
    /// string space, the control stack, and the DATA cursor.
    pub(super) fn clear_state(&mut self) {
        self.vars.clear();
        self.arrays.clear();
        self.fns.clear();
        self.heap.clear();
        self.stack.clear();
        self.data = DataCursor::Reset;
    }

    pub(super) fn push_frame(&mut self, frame: Frame) -> Result<()> {
        if self.stack.len() >= STACK_MAX {
            return Err(error!(OutOfMemory));
        }
        self.stack.push(frame);
        Ok(())
    }

    fn break_requested(&self) -> bool {
        match &self.break_flag {
            Some(flag) => flag.swap(false, Ordering::SeqCst),
            None => false,
        }
    }

    // ---- cursor primitives -------------------------------------------
    //
    // Reading past the end of the body yields 0, which no tokenised body
    // contains; the scanners treat it exactly like the original's NUL
    // terminator.

    pub(super) fn peek(&self) -> u8 {
        *self.cur.body.get(self.cur.pos).unwrap_or(&0)
    }

    pub(super) fn advance(&mut self) -> u8 {
        let b = self.peek();
        if b != 0 {
            self.cur.pos += 1;
        }
        b
    }

    pub(super) fn skip_spaces(&mut self) {
        while self.peek() == b' ' {
            self.cur.pos += 1;
        }
    }

    /// Consumes `expected` (after spaces) or fails with a syntax error.
    pub(super) fn expect(&mut self, expected: u8) -> Result<()> {
        self.skip_spaces();
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(error!(SyntaxError))
        }
    }
}

impl std::fmt::Debug for Interp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Interp")
            .field("lines", &self.program.len())
            .field("cur", &self.cur)
            .field("running", &self.running)
            .field("stack_depth", &self.stack.len())
            .finish()
    }
}
