//! Statement handlers.
//!
//! The dispatcher peeks one byte: a statement token runs its handler, a
//! letter is an implicit LET, `?` is PRINT. Handlers read their operands
//! through the expression evaluator and leave the cursor wherever execution
//! should continue; the run loop re-dispatches from there, which is how the
//! branching statements work.

use super::expr::parse_val;
use super::runtime::{Cursor, DataCursor, Frame, Interp};
use super::val::Val;
use super::var::VarName;
use crate::lang::{detokenize, token, Error, LineNumber, LINE_NUM_MAX};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// An assignment target, with array subscripts already resolved.
pub(super) enum LValue {
    Var(VarName),
    Elem(VarName, usize),
}

impl LValue {
    fn name(&self) -> VarName {
        match self {
            LValue::Var(n) | LValue::Elem(n, _) => *n,
        }
    }
}

impl Interp {
    /// GONE: dispatch on the statement at the cursor.
    pub(super) fn execute_statement(&mut self) -> Result<()> {
        self.skip_spaces();
        let c = self.peek();
        if c == 0 || c == b':' {
            return Ok(());
        }
        if token::is_statement(c) {
            self.advance();
            return match c {
                token::END => self.stmt_end(),
                token::FOR => self.stmt_for(),
                token::NEXT => self.stmt_next(),
                token::DATA => self.stmt_data(),
                token::INPUT => self.stmt_input(),
                token::DIM => self.stmt_dim(),
                token::READ => self.stmt_read(),
                token::LET => self.stmt_let(),
                token::GOTO => self.stmt_goto(),
                token::RUN => self.stmt_run(),
                token::IF => self.stmt_if(),
                token::RESTORE => self.stmt_restore(),
                token::GOSUB => self.stmt_gosub(),
                token::RETURN => self.stmt_return(),
                token::REM => self.stmt_rem(),
                token::STOP => self.stmt_stop(),
                token::ON => self.stmt_on(),
                token::NULL => self.stmt_null(),
                token::WAIT => self.stmt_wait(),
                token::DEF => self.stmt_def(),
                token::POKE => self.stmt_poke(),
                token::PRINT => self.stmt_print(),
                token::CONT => self.stmt_cont(),
                token::LIST => self.stmt_list(),
                token::CLEAR => self.stmt_clear(),
                token::GET => self.stmt_get(),
                token::NEW => self.stmt_new(),
                // the disk stubs tokenise but never run
                _ => Err(error!(SyntaxError)),
            };
        }
        if c.is_ascii_alphabetic() {
            return self.stmt_let();
        }
        if c == b'?' {
            self.advance();
            return self.stmt_print();
        }
        Err(error!(SyntaxError))
    }

    // ---- assignment ---------------------------------------------------

    pub(super) fn parse_lvalue(&mut self) -> Result<LValue> {
        self.skip_spaces();
        if !self.peek().is_ascii_alphabetic() {
            return Err(error!(SyntaxError));
        }
        let name = self.scan_var_name();
        self.skip_spaces();
        if self.peek() == b'(' {
            self.advance();
            self.arrays.auto_dim(name);
            let subs = self.parse_subscripts()?;
            let idx = self.arrays.index_of(name, &subs)?;
            Ok(LValue::Elem(name, idx))
        } else {
            Ok(LValue::Var(name))
        }
    }

    /// Type-checks and stores. The caller owns the copy discipline: LET
    /// copies its string into the heap first, READ/INPUT/GET arrive with
    /// fresh bodies already.
    fn assign(&mut self, lv: &LValue, val: Val) -> Result<()> {
        if lv.name().is_string() != val.is_string() {
            return Err(error!(TypeMismatch));
        }
        match lv {
            LValue::Var(name) => {
                self.vars.store(*name, val);
                Ok(())
            }
            LValue::Elem(name, idx) => self.arrays.set_element(*name, *idx, val),
        }
    }

    fn stmt_let(&mut self) -> Result<()> {
        let lv = self.parse_lvalue()?;
        self.skip_spaces();
        match self.peek() {
            b'=' => {
                self.advance();
            }
            b if b == token::EQ => {
                self.advance();
            }
            _ => return Err(error!(SyntaxError)),
        }
        let val = self.eval()?;
        // assignment materialises a fresh copy of the string body
        let val = match val {
            Val::Str(d) => {
                let body = d.bytes(&self.heap).to_vec();
                Val::Str(self.heap.alloc(&body)?)
            }
            v => v,
        };
        self.assign(&lv, val)
    }

    // ---- control flow -------------------------------------------------

    fn stmt_end(&mut self) -> Result<()> {
        self.running = false;
        self.can_continue = false;
        self.cont = None;
        Ok(())
    }

    fn stmt_stop(&mut self) -> Result<()> {
        // the run loop saves the cursor for CONT when it sees BREAK
        Err(error!(Break))
    }

    fn stmt_cont(&mut self) -> Result<()> {
        match (self.can_continue, self.cont.clone()) {
            (true, Some(cursor)) => {
                self.cur = cursor;
                Ok(())
            }
            _ => Err(error!(CantContinue)),
        }
    }

    fn stmt_for(&mut self) -> Result<()> {
        self.skip_spaces();
        if !self.peek().is_ascii_alphabetic() {
            return Err(error!(SyntaxError));
        }
        let var = self.scan_var_name();
        if var.is_string() {
            return Err(error!(TypeMismatch));
        }
        self.expect_eq()?;
        let start = self.eval_number()?;
        self.skip_spaces();
        if self.peek() != token::TO {
            return Err(error!(SyntaxError));
        }
        self.advance();
        let limit = self.eval_number()?;
        self.skip_spaces();
        let step = if self.peek() == token::STEP {
            self.advance();
            self.eval_number()?
        } else {
            1.0
        };
        self.vars.store(var, Val::Number(start));
        // one frame per loop variable: a new FOR for the same variable
        // drops the old frame and everything above it
        if let Some(i) = self
            .stack
            .iter()
            .rposition(|f| matches!(f, Frame::For { var: v, .. } if *v == var))
        {
            self.stack.truncate(i);
        }
        let cursor = self.cur.clone();
        self.push_frame(Frame::For {
            var,
            limit,
            step,
            cursor,
        })
    }

    fn stmt_next(&mut self) -> Result<()> {
        self.skip_spaces();
        let named = if self.peek().is_ascii_alphabetic() {
            Some(self.scan_var_name())
        } else {
            None
        };
        let idx = self.stack.iter().rposition(|f| match f {
            Frame::For { var, .. } => named.map_or(true, |n| n == *var),
            Frame::Gosub { .. } => false,
        });
        let idx = match idx {
            Some(i) => i,
            None => return Err(error!(NextWithoutFor)),
        };
        let (var, limit, step, cursor) = match &self.stack[idx] {
            Frame::For {
                var,
                limit,
                step,
                cursor,
            } => (*var, *limit, *step, cursor.clone()),
            Frame::Gosub { .. } => return Err(error!(NextWithoutFor)),
        };
        let value = self.vars.fetch(var).number()? + step;
        self.vars.store(var, Val::Number(value));
        let done = if step >= 0.0 {
            value > limit
        } else {
            value < limit
        };
        if done {
            self.stack.truncate(idx);
        } else {
            self.cur = cursor;
        }
        Ok(())
    }

    fn stmt_goto(&mut self) -> Result<()> {
        let target = self.eval_number()?;
        self.goto_line(target.trunc())
    }

    fn stmt_gosub(&mut self) -> Result<()> {
        let target = self.eval_number()?;
        let cursor = self.cur.clone();
        self.push_frame(Frame::Gosub { cursor })?;
        if let Err(e) = self.goto_line(target.trunc()) {
            self.stack.pop();
            return Err(e);
        }
        Ok(())
    }

    fn stmt_return(&mut self) -> Result<()> {
        let idx = self
            .stack
            .iter()
            .rposition(|f| matches!(f, Frame::Gosub { .. }));
        let idx = match idx {
            Some(i) => i,
            None => return Err(error!(ReturnWithoutGosub)),
        };
        let cursor = match &self.stack[idx] {
            Frame::Gosub { cursor } => cursor.clone(),
            Frame::For { .. } => return Err(error!(ReturnWithoutGosub)),
        };
        self.stack.truncate(idx);
        let direct = cursor.line.is_none();
        self.cur = cursor;
        if direct {
            // returning into direct mode ends the run
            self.running = false;
        }
        Ok(())
    }

    fn stmt_if(&mut self) -> Result<()> {
        let cond = self.eval()?;
        self.skip_spaces();
        match self.peek() {
            b if b == token::THEN || b == token::GOTO => {
                self.advance();
            }
            _ => return Err(error!(SyntaxError)),
        }
        if !cond.is_true() {
            self.cur.pos = self.cur.body.len();
            return Ok(());
        }
        self.skip_spaces();
        if self.peek().is_ascii_digit() {
            let target = self.eval_number()?;
            return self.goto_line(target.trunc());
        }
        // leave the cursor on the consequent; the loop dispatches it
        Ok(())
    }

    fn stmt_on(&mut self) -> Result<()> {
        let selector = self.eval_number()?.floor();
        self.skip_spaces();
        let gosub = match self.peek() {
            b if b == token::GOTO => false,
            b if b == token::GOSUB => true,
            _ => return Err(error!(SyntaxError)),
        };
        self.advance();
        let mut count = 0f64;
        let mut target = None;
        loop {
            self.skip_spaces();
            if !self.peek().is_ascii_digit() {
                break;
            }
            let line = self.eval_number()?;
            count += 1.0;
            if count == selector {
                target = Some(line);
            }
            self.skip_spaces();
            if self.peek() == b',' {
                self.advance();
            } else {
                break;
            }
        }
        let target = match target {
            Some(t) if selector >= 1.0 => t,
            // out of range: fall through to the next statement
            _ => return Ok(()),
        };
        if gosub {
            let cursor = self.cur.clone();
            self.push_frame(Frame::Gosub { cursor })?;
            if let Err(e) = self.goto_line(target.trunc()) {
                self.stack.pop();
                return Err(e);
            }
            Ok(())
        } else {
            self.goto_line(target.trunc())
        }
    }

    fn stmt_run(&mut self) -> Result<()> {
        self.clear_state();
        self.can_continue = false;
        self.cont = None;
        self.skip_spaces();
        if self.peek().is_ascii_digit() {
            let target = self.eval_number()?;
            return self.goto_line(target.trunc());
        }
        match self.first_line() {
            Some(cursor) => {
                self.cur = cursor;
                Ok(())
            }
            None => {
                self.running = false;
                Ok(())
            }
        }
    }

    fn stmt_rem(&mut self) -> Result<()> {
        self.cur.pos = self.cur.body.len();
        Ok(())
    }

    // ---- data ---------------------------------------------------------

    fn stmt_data(&mut self) -> Result<()> {
        self.skip_to_eos();
        Ok(())
    }

    fn stmt_read(&mut self) -> Result<()> {
        loop {
            let lv = self.parse_lvalue()?;
            self.read_data_item(&lv)?;
            self.skip_spaces();
            if self.peek() == b',' {
                self.advance();
            } else {
                return Ok(());
            }
        }
    }

    fn stmt_restore(&mut self) -> Result<()> {
        self.skip_spaces();
        if self.peek().is_ascii_digit() {
            let target = self.eval_number()?.trunc();
            if target < 1.0 || target > f64::from(LINE_NUM_MAX) {
                return Err(error!(UndefinedStatement));
            }
            let num = target as LineNumber;
            if !self.program.contains_key(&num) {
                return Err(error!(UndefinedStatement));
            }
            self.data = DataCursor::LineStart(num);
        } else {
            self.data = DataCursor::Reset;
        }
        Ok(())
    }

    /// Positions the DATA cursor at the next item, scanning forward for
    /// the next DATA token when the current body is exhausted, and reads
    /// one value into the lvalue.
    fn read_data_item(&mut self, lv: &LValue) -> Result<()> {
        let (line, body, mut pos) = self.next_data_item()?;
        let string = lv.name().is_string();
        let val = if string {
            let mut text = Vec::new();
            if body.get(pos) == Some(&b'"') {
                pos += 1;
                while pos < body.len() && body[pos] != b'"' {
                    text.push(body[pos]);
                    pos += 1;
                }
                if pos < body.len() {
                    pos += 1; // closing quote
                }
            } else {
                while pos < body.len() && body[pos] != b',' && body[pos] != b':' {
                    text.push(body[pos]);
                    pos += 1;
                }
                while text.last() == Some(&b' ') {
                    text.pop();
                }
            }
            Val::Str(self.heap.alloc(&text)?)
        } else {
            while body.get(pos) == Some(&b' ') {
                pos += 1;
            }
            if body.get(pos) == Some(&b'"') {
                return Err(error!(TypeMismatch));
            }
            let start = pos;
            while pos < body.len()
                && matches!(body[pos], b'0'..=b'9' | b'.' | b'+' | b'-' | b'E' | b'e')
            {
                pos += 1;
            }
            if pos == start {
                return Err(error!(TypeMismatch));
            }
            let value = parse_val(&body[start..pos]);
            let mut rest = pos;
            while body.get(rest) == Some(&b' ') {
                rest += 1;
            }
            match body.get(rest) {
                None | Some(&b',') | Some(&b':') => {}
                Some(_) => return Err(error!(TypeMismatch)),
            }
            Val::Number(value)
        };
        self.data = DataCursor::InBody(line, pos);
        self.assign(lv, val)
    }

    /// Resolves the DATA cursor to the start of the next item, advancing
    /// across commas, statement ends, and program lines as needed.
    fn next_data_item(&mut self) -> Result<(LineNumber, Rc<[u8]>, usize)> {
        let mut cursor = self.data.clone();
        loop {
            match cursor {
                DataCursor::InBody(line, mut pos) => {
                    let body = match self.program.get(&line) {
                        Some(b) => b.clone(),
                        // the line went away under us; scan onward
                        None => {
                            cursor = DataCursor::LineStart(line);
                            continue;
                        }
                    };
                    while matches!(body.get(pos), Some(&b' ') | Some(&b',')) {
                        pos += 1;
                    }
                    match body.get(pos) {
                        Some(&b':') | None => {
                            cursor = self.scan_for_data(Some((line, pos)))?;
                        }
                        Some(_) => return Ok((line, body, pos)),
                    }
                }
                DataCursor::LineStart(line) => {
                    cursor = self.scan_for_data_from_line(line)?;
                }
                DataCursor::Reset => {
                    cursor = self.scan_for_data(None)?;
                }
            }
        }
    }

    /// Byte-scans for a DATA token, respecting string literals, starting
    /// just past `after` (or at the first program line).
    fn scan_for_data(&self, after: Option<(LineNumber, usize)>) -> Result<DataCursor> {
        let mut lines: Vec<LineNumber> = Vec::new();
        let mut first_pos = 0;
        match after {
            Some((line, pos)) => {
                first_pos = pos;
                for (&n, _) in self.program.range(line..) {
                    lines.push(n);
                }
            }
            None => {
                for (&n, _) in self.program.range(..) {
                    lines.push(n);
                }
            }
        }
        for (i, n) in lines.iter().enumerate() {
            let body = match self.program.get(n) {
                Some(b) => b.clone(),
                None => continue,
            };
            let start = if i == 0 { first_pos } else { 0 };
            if let Some(pos) = find_data_token(&body, start) {
                return Ok(DataCursor::InBody(*n, pos));
            }
        }
        Err(error!(OutOfData))
    }

    fn scan_for_data_from_line(&self, line: LineNumber) -> Result<DataCursor> {
        match self.program.range(line..).next() {
            Some((&n, _)) => self.scan_for_data(Some((n, 0))),
            None => Err(error!(OutOfData)),
        }
    }

    // ---- declarations -------------------------------------------------

    fn stmt_dim(&mut self) -> Result<()> {
        loop {
            self.skip_spaces();
            if !self.peek().is_ascii_alphabetic() {
                return Err(error!(SyntaxError));
            }
            let name = self.scan_var_name();
            self.expect(b'(')?;
            let mut sizes = Vec::new();
            loop {
                let d = self.eval_number()?;
                if !(0.0..=32767.0).contains(&d) {
                    return Err(error!(IllegalQuantity));
                }
                sizes.push(d.trunc() as usize + 1);
                if sizes.len() > super::var::MAX_DIMS {
                    return Err(error!(IllegalQuantity));
                }
                self.skip_spaces();
                if self.peek() == b',' {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(b')')?;
            self.arrays.dim(name, sizes)?;
            self.skip_spaces();
            if self.peek() == b',' {
                self.advance();
            } else {
                return Ok(());
            }
        }
    }

    fn stmt_def(&mut self) -> Result<()> {
        self.skip_spaces();
        if self.peek() != token::FN {
            return Err(error!(SyntaxError));
        }
        self.advance();
        self.skip_spaces();
        let name = self.peek().to_ascii_uppercase();
        if !name.is_ascii_alphabetic() {
            return Err(error!(SyntaxError));
        }
        self.advance();
        self.expect(b'(')?;
        self.skip_spaces();
        let param = self.peek().to_ascii_uppercase();
        if !param.is_ascii_alphabetic() {
            return Err(error!(SyntaxError));
        }
        self.advance();
        self.expect(b')')?;
        self.expect_eq()?;
        let start = self.cur.pos;
        self.skip_to_eos();
        let body: Rc<[u8]> = self.cur.body[start..self.cur.pos].into();
        self.fns.define(name, param, body);
        Ok(())
    }

    // ---- input and output ---------------------------------------------

    fn stmt_print(&mut self) -> Result<()> {
        let mut trailing_newline = true;
        loop {
            self.skip_spaces();
            let c = self.peek();
            if c == 0 || c == b':' {
                break;
            }
            match c {
                b if b == token::TAB => {
                    self.advance();
                    let n = self.paren_argument()?;
                    if !(0.0..=255.0).contains(&n) {
                        return Err(error!(IllegalQuantity));
                    }
                    let target = if n < 1.0 { 0 } else { n.trunc() as usize - 1 };
                    self.console.tab_to(target);
                    trailing_newline = true;
                }
                b if b == token::SPC => {
                    self.advance();
                    let n = self.paren_argument()?;
                    if !(0.0..=255.0).contains(&n) {
                        return Err(error!(IllegalQuantity));
                    }
                    self.console.space(n.trunc() as usize);
                    trailing_newline = true;
                }
                b';' => {
                    self.advance();
                    trailing_newline = false;
                }
                b',' => {
                    self.advance();
                    self.console.next_zone();
                    trailing_newline = false;
                }
                _ => {
                    match self.eval()? {
                        Val::Number(n) => self.console.print_number(n),
                        Val::Str(d) => {
                            let body = d.bytes(&self.heap).to_vec();
                            self.console.write_bytes(&body);
                        }
                    }
                    trailing_newline = true;
                }
            }
        }
        if trailing_newline {
            self.console.newline();
        }
        self.console.flush();
        Ok(())
    }

    /// TAB( and SPC( carry their opening paren inside the token; the
    /// closing paren is tolerated rather than demanded, as in the
    /// original.
    fn paren_argument(&mut self) -> Result<f64> {
        self.skip_spaces();
        if self.peek() == b'(' {
            self.advance();
        }
        let n = self.eval_number()?;
        self.skip_spaces();
        if self.peek() == b')' {
            self.advance();
        }
        Ok(n)
    }

    fn stmt_input(&mut self) -> Result<()> {
        self.skip_spaces();
        let mut prompt = String::from("? ");
        if self.peek() == b'"' {
            let mut text = String::new();
            self.advance();
            while self.peek() != b'"' && self.peek() != 0 {
                text.push(self.advance() as char);
            }
            if self.peek() == b'"' {
                self.advance();
            }
            self.skip_spaces();
            match self.peek() {
                b';' => {
                    self.advance();
                    prompt = text;
                }
                b',' => {
                    self.advance();
                    prompt = text + "? ";
                }
                _ => prompt = text,
            }
        }
        loop {
            let lv = self.parse_lvalue()?;
            self.console.write_str(&prompt);
            let line = match self.console.read_line() {
                Some(line) => line,
                None => return Err(error!(Break)),
            };
            let val = if lv.name().is_string() {
                Val::Str(self.heap.alloc(line.as_bytes())?)
            } else {
                Val::Number(parse_val(line.as_bytes()))
            };
            self.assign(&lv, val)?;
            self.skip_spaces();
            if self.peek() == b',' {
                self.advance();
                prompt = String::from("?? ");
            } else {
                return Ok(());
            }
        }
    }

    fn stmt_get(&mut self) -> Result<()> {
        let lv = self.parse_lvalue()?;
        let byte = self.console.read_byte();
        let val = if lv.name().is_string() {
            match byte {
                Some(b) if b != b'\n' && b != b'\r' => Val::Str(self.heap.alloc(&[b])?),
                _ => Val::Str(self.heap.alloc(&[])?),
            }
        } else {
            Val::Number(byte.map_or(0.0, f64::from))
        };
        self.assign(&lv, val)
    }

    fn stmt_list(&mut self) -> Result<()> {
        self.skip_spaces();
        let mut first: LineNumber = 1;
        let mut last: LineNumber = LINE_NUM_MAX;
        if self.peek().is_ascii_digit() {
            first = self.scan_line_number()?;
            last = first;
        }
        self.skip_spaces();
        if self.peek() == b'-' {
            self.advance();
            last = LINE_NUM_MAX;
            self.skip_spaces();
            if self.peek().is_ascii_digit() {
                last = self.scan_line_number()?;
            }
        }
        let listing: Vec<String> = self
            .program
            .range(first..=last)
            .map(|(n, body)| format!("{} {}", n, detokenize(body)))
            .collect();
        for line in listing {
            self.console.write_str(&line);
            self.console.newline();
        }
        self.console.flush();
        Ok(())
    }

    // ---- machine odds and ends ----------------------------------------

    fn stmt_poke(&mut self) -> Result<()> {
        let addr = self.eval_number()?.trunc();
        self.expect(b',')?;
        let value = self.eval_number()?.trunc();
        if !(0.0..=255.0).contains(&value) {
            return Err(error!(IllegalQuantity));
        }
        if addr < 0.0 || addr as usize >= self.memory.len() {
            return Err(error!(IllegalQuantity));
        }
        self.memory[addr as usize] = value as u8;
        Ok(())
    }

    /// WAIT parses and validates its arguments and deliberately does not
    /// wait; the simulated hardware never changes under it.
    fn stmt_wait(&mut self) -> Result<()> {
        self.eval_number()?;
        self.expect(b',')?;
        self.eval_number()?;
        self.skip_spaces();
        if self.peek() == b',' {
            self.advance();
            self.eval_number()?;
        }
        Ok(())
    }

    fn stmt_null(&mut self) -> Result<()> {
        let n = self.eval_number()?.trunc();
        if !(0.0..=255.0).contains(&n) {
            return Err(error!(IllegalQuantity));
        }
        self.console.set_null_count(n as u8);
        Ok(())
    }

    fn stmt_clear(&mut self) -> Result<()> {
        self.clear_state();
        Ok(())
    }

    fn stmt_new(&mut self) -> Result<()> {
        self.program.clear();
        self.clear_state();
        self.running = false;
        self.can_continue = false;
        self.cont = None;
        Ok(())
    }

    // ---- helpers ------------------------------------------------------

    /// LIST's range endpoints are plain digit runs, not expressions, so a
    /// `-` can separate them.
    fn scan_line_number(&mut self) -> Result<LineNumber> {
        let mut num: u32 = 0;
        while self.peek().is_ascii_digit() {
            num = num * 10 + u32::from(self.advance() - b'0');
            if num > u32::from(LINE_NUM_MAX) {
                return Err(error!(SyntaxError));
            }
        }
        Ok(num as LineNumber)
    }

    fn expect_eq(&mut self) -> Result<()> {
        self.skip_spaces();
        match self.peek() {
            b'=' => {
                self.advance();
                Ok(())
            }
            b if b == token::EQ => {
                self.advance();
                Ok(())
            }
            _ => Err(error!(SyntaxError)),
        }
    }

    /// Advances to the statement end, leaving `:` unconsumed. Quoted
    /// sections are opaque so a colon inside a string does not end the
    /// statement.
    fn skip_to_eos(&mut self) {
        let mut quoted = false;
        loop {
            match self.peek() {
                0 => return,
                b'"' => {
                    quoted = !quoted;
                    self.advance();
                }
                b':' if !quoted => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn first_line(&self) -> Option<Cursor> {
        self.program.iter().next().map(|(&n, body)| Cursor {
            line: Some(n),
            body: body.clone(),
            pos: 0,
        })
    }
}

/// Finds the next DATA token at or after `start`, skipping quoted text.
fn find_data_token(body: &[u8], start: usize) -> Option<usize> {
    let mut quoted = false;
    let mut pos = start;
    while pos < body.len() {
        match body[pos] {
            b'"' => quoted = !quoted,
            t if t == token::DATA && !quoted => return Some(pos + 1),
            _ => {}
        }
        pos += 1;
    }
    None
}
