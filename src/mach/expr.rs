//! Expression evaluation.
//!
//! A recursive-descent ladder over the execution cursor, one level per
//! precedence tier. Comparisons yield the MS truth values 0 and -1; AND, OR,
//! and NOT are bitwise over the 32-bit truncation of their operands, which
//! makes them double as the logical connectives for those truth values.
//! Unary minus sits below `^`, so `-2^2` is `-(2^2)`.

use super::runtime::{Cursor, Interp};
use super::val::{StrDesc, Val};
use super::var::VarName;
use crate::lang::{token, Error};

type Result<T> = std::result::Result<T, Error>;

/// VAL's number scanner, shared with INPUT and READ: skip leading spaces,
/// then take the longest prefix that parses. No parse means 0.
pub(super) fn parse_val(bytes: &[u8]) -> f64 {
    let mut start = 0;
    while start < bytes.len() && bytes[start] == b' ' {
        start += 1;
    }
    let b = &bytes[start..];
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    while end < b.len() {
        let c = b[end];
        if c == b'+' || c == b'-' {
            if end != 0 && !matches!(b[end - 1], b'E' | b'e') {
                break;
            }
        } else if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == b'.' {
            if seen_dot || seen_exp {
                break;
            }
            seen_dot = true;
        } else if c == b'E' || c == b'e' {
            if seen_exp || !seen_digit {
                break;
            }
            seen_exp = true;
        } else {
            break;
        }
        end += 1;
    }
    let mut candidate = &b[..end];
    while !candidate.is_empty() {
        if let Ok(s) = std::str::from_utf8(candidate) {
            if let Ok(v) = s.parse::<f64>() {
                return v;
            }
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    0.0
}

fn checked(n: f64) -> Result<f64> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(error!(Overflow))
    }
}

impl Interp {
    /// FRMEVL: evaluates one expression at the cursor.
    pub(super) fn eval(&mut self) -> Result<Val> {
        self.skip_spaces();
        self.eval_or()
    }

    pub(super) fn eval_number(&mut self) -> Result<f64> {
        self.eval()?.number()
    }

    pub(super) fn eval_string(&mut self) -> Result<StrDesc> {
        self.eval()?.string()
    }

    fn eval_or(&mut self) -> Result<Val> {
        let mut lhs = self.eval_and()?;
        loop {
            self.skip_spaces();
            if self.peek() != token::OR {
                return Ok(lhs);
            }
            self.advance();
            let rhs = self.eval_and()?;
            lhs = Val::Number(f64::from(lhs.to_i32()? | rhs.to_i32()?));
        }
    }

    fn eval_and(&mut self) -> Result<Val> {
        let mut lhs = self.eval_not()?;
        loop {
            self.skip_spaces();
            if self.peek() != token::AND {
                return Ok(lhs);
            }
            self.advance();
            let rhs = self.eval_not()?;
            lhs = Val::Number(f64::from(lhs.to_i32()? & rhs.to_i32()?));
        }
    }

    fn eval_not(&mut self) -> Result<Val> {
        self.skip_spaces();
        if self.peek() == token::NOT {
            self.advance();
            let operand = self.eval_not()?;
            return Ok(Val::Number(f64::from(!operand.to_i32()?)));
        }
        self.eval_comparison()
    }

    fn eval_comparison(&mut self) -> Result<Val> {
        let mut lhs = self.eval_additive()?;
        loop {
            // relation mask: 1 = less, 2 = equal, 4 = greater; any two
            // distinct symbols combine, so =< and >< are accepted synonyms
            let mut relation = 0u8;
            loop {
                self.skip_spaces();
                let bit = match self.peek() {
                    b'<' => 1,
                    b'=' => 2,
                    b'>' => 4,
                    b if b == token::LT => 1,
                    b if b == token::EQ => 2,
                    b if b == token::GT => 4,
                    _ => break,
                };
                if relation & bit != 0 || relation.count_ones() >= 2 {
                    break;
                }
                relation |= bit;
                self.advance();
            }
            if relation == 0 {
                return Ok(lhs);
            }
            let rhs = self.eval_additive()?;
            let ordering = match (&lhs, &rhs) {
                (Val::Str(a), Val::Str(b)) => {
                    a.bytes(&self.heap).cmp(b.bytes(&self.heap))
                }
                (Val::Number(a), Val::Number(b)) => {
                    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
                }
                _ => return Err(error!(TypeMismatch)),
            };
            let truth = match ordering {
                std::cmp::Ordering::Less => relation & 1 != 0,
                std::cmp::Ordering::Equal => relation & 2 != 0,
                std::cmp::Ordering::Greater => relation & 4 != 0,
            };
            lhs = Val::Number(if truth { -1.0 } else { 0.0 });
        }
    }

    fn eval_additive(&mut self) -> Result<Val> {
        let mut lhs = self.eval_multiplicative()?;
        loop {
            self.skip_spaces();
            let op = match self.peek() {
                b'+' => b'+',
                b'-' => b'-',
                b if b == token::PLUS => b'+',
                b if b == token::MINUS => b'-',
                _ => return Ok(lhs),
            };
            self.advance();
            if op == b'+' {
                if let Val::Str(left) = lhs {
                    let right = self.eval_multiplicative()?.string()?;
                    lhs = Val::Str(self.heap.concat(left, right)?);
                    continue;
                }
            }
            let left = lhs.number()?;
            let right = self.eval_multiplicative()?.number()?;
            lhs = Val::Number(checked(if op == b'+' {
                left + right
            } else {
                left - right
            })?);
        }
    }

    fn eval_multiplicative(&mut self) -> Result<Val> {
        let mut lhs = self.eval_unary()?;
        loop {
            self.skip_spaces();
            let op = match self.peek() {
                b'*' => b'*',
                b'/' => b'/',
                b if b == token::MULTIPLY => b'*',
                b if b == token::DIVIDE => b'/',
                _ => return Ok(lhs),
            };
            self.advance();
            let left = lhs.number()?;
            let right = self.eval_unary()?.number()?;
            if op == b'/' {
                if right == 0.0 {
                    return Err(error!(DivisionByZero));
                }
                lhs = Val::Number(checked(left / right)?);
            } else {
                lhs = Val::Number(checked(left * right)?);
            }
        }
    }

    fn eval_unary(&mut self) -> Result<Val> {
        self.skip_spaces();
        match self.peek() {
            b'-' => {
                self.advance();
                let v = self.eval_unary()?.number()?;
                Ok(Val::Number(-v))
            }
            b'+' => {
                self.advance();
                let v = self.eval_unary()?.number()?;
                Ok(Val::Number(v))
            }
            b if b == token::MINUS => {
                self.advance();
                let v = self.eval_unary()?.number()?;
                Ok(Val::Number(-v))
            }
            b if b == token::PLUS => {
                self.advance();
                let v = self.eval_unary()?.number()?;
                Ok(Val::Number(v))
            }
            _ => self.eval_power(),
        }
    }

    fn eval_power(&mut self) -> Result<Val> {
        let lhs = self.eval_primary()?;
        self.skip_spaces();
        let b = self.peek();
        if b != b'^' && b != token::POWER {
            return Ok(lhs);
        }
        self.advance();
        let base = lhs.number()?;
        // the exponent may carry its own sign; ^ stays right-associative
        let exponent = self.eval_unary()?.number()?;
        if base < 0.0 && exponent.floor() != exponent {
            return Err(error!(IllegalQuantity));
        }
        Ok(Val::Number(checked(base.powf(exponent))?))
    }

    fn eval_primary(&mut self) -> Result<Val> {
        self.skip_spaces();
        let c = self.peek();
        if c == b'(' {
            self.advance();
            let val = self.eval()?;
            self.expect(b')')?;
            return Ok(val);
        }
        if c == b'"' {
            return Ok(Val::Str(self.parse_string_literal()?));
        }
        if c.is_ascii_digit() || c == b'.' {
            return Ok(Val::Number(self.parse_number_literal()?));
        }
        if token::is_function(c) {
            self.advance();
            return self.eval_function(c);
        }
        if c == token::FN {
            self.advance();
            return self.eval_fn_call();
        }
        if c.is_ascii_alphabetic() {
            return self.eval_variable();
        }
        Err(error!(SyntaxError))
    }

    fn parse_string_literal(&mut self) -> Result<StrDesc> {
        self.advance(); // opening quote
        let mut body = Vec::new();
        loop {
            match self.peek() {
                0 => break,
                b'"' => {
                    self.advance();
                    break;
                }
                b => {
                    body.push(b);
                    self.advance();
                }
            }
        }
        self.heap.alloc(&body)
    }

    fn parse_number_literal(&mut self) -> Result<f64> {
        let mut s = String::new();
        let mut seen_digit = false;
        let mut seen_dot = false;
        let mut seen_exp = false;
        loop {
            let c = self.peek();
            if c.is_ascii_digit() {
                seen_digit = true;
            } else if c == b'.' && !seen_dot && !seen_exp {
                seen_dot = true;
            } else if (c == b'E' || c == b'e') && seen_digit && !seen_exp {
                seen_exp = true;
                s.push('E');
                self.advance();
                let sign = self.peek();
                if sign == b'+' || sign == b'-' {
                    s.push(sign as char);
                    self.advance();
                }
                continue;
            } else {
                break;
            }
            s.push(c as char);
            self.advance();
        }
        if !seen_digit {
            return Err(error!(SyntaxError));
        }
        // longest valid prefix, the way strtod reads it
        let mut t = s.as_str();
        loop {
            if let Ok(v) = t.parse::<f64>() {
                return checked(v);
            }
            t = &t[..t.len() - 1];
            if t.is_empty() {
                return Err(error!(SyntaxError));
            }
        }
    }

    /// Scans an identifier plus its `$`/`%` suffix into a normalised name.
    /// The caller has already checked the leading letter.
    pub(super) fn scan_var_name(&mut self) -> VarName {
        let mut ident = Vec::new();
        loop {
            let c = self.peek();
            if c.is_ascii_alphabetic() || c.is_ascii_digit() {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let (string, int) = match self.peek() {
            b'$' => {
                self.advance();
                (true, false)
            }
            b'%' => {
                self.advance();
                (false, true)
            }
            _ => (false, false),
        };
        VarName::new(&ident, string, int)
    }

    /// Comma-separated subscripts up to the closing paren. The opening
    /// paren is already consumed and the array already auto-dimensioned.
    pub(super) fn parse_subscripts(&mut self) -> Result<Vec<i64>> {
        let mut subs = Vec::new();
        loop {
            let v = self.eval_number()?;
            subs.push(v.trunc() as i64);
            if subs.len() > super::var::MAX_DIMS {
                return Err(error!(BadSubscript));
            }
            self.skip_spaces();
            if self.peek() == b',' {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(b')')?;
        Ok(subs)
    }

    /// Variable or array element in a primary position. Referencing an
    /// unknown array dimensions it as one dimension of size 11; unknown
    /// simple variables read as their type default.
    fn eval_variable(&mut self) -> Result<Val> {
        let name = self.scan_var_name();
        self.skip_spaces();
        if self.peek() == b'(' {
            self.advance();
            self.arrays.auto_dim(name);
            let subs = self.parse_subscripts()?;
            return self.arrays.element(name, &subs);
        }
        Ok(self.vars.fetch(name))
    }

    /// FN X(arg): bind the parameter, run the evaluator over the stored
    /// body, put everything back.
    fn eval_fn_call(&mut self) -> Result<Val> {
        self.skip_spaces();
        let letter = self.peek().to_ascii_uppercase();
        if !letter.is_ascii_alphabetic() {
            return Err(error!(SyntaxError));
        }
        self.advance();
        self.expect(b'(')?;
        let arg = self.eval_number()?;
        self.expect(b')')?;
        let func = match self.fns.get(letter) {
            Some(f) => f.clone(),
            None => return Err(error!(UndefinedFunction)),
        };
        let param = VarName::new(&[func.param], false, false);
        let saved_param = self.vars.fetch(param);
        self.vars.store(param, Val::Number(arg));
        let saved_cursor = self.cur.clone();
        self.cur = Cursor {
            line: saved_cursor.line,
            body: func.body,
            pos: 0,
        };
        let result = self.eval_number();
        self.cur = saved_cursor;
        self.vars.store(param, saved_param);
        Ok(Val::Number(result?))
    }

    /// Built-in function dispatch. Every function takes parentheses except
    /// RND, which may appear bare; a missing closing paren is tolerated,
    /// as in the original.
    fn eval_function(&mut self, tok: u8) -> Result<Val> {
        self.skip_spaces();
        let had_paren = self.peek() == b'(';
        if had_paren {
            self.advance();
        } else if tok != token::RND {
            return Err(error!(SyntaxError));
        }
        let result = self.apply_function(tok)?;
        self.skip_spaces();
        if self.peek() == b')' {
            self.advance();
        }
        Ok(result)
    }

    fn apply_function(&mut self, tok: u8) -> Result<Val> {
        use crate::lang::token::*;
        match tok {
            SGN => {
                let x = self.eval_number()?;
                Ok(Val::Number(if x < 0.0 {
                    -1.0
                } else if x > 0.0 {
                    1.0
                } else {
                    0.0
                }))
            }
            INT => Ok(Val::Number(self.eval_number()?.floor())),
            ABS => Ok(Val::Number(self.eval_number()?.abs())),
            SQR => {
                let x = self.eval_number()?;
                if x < 0.0 {
                    return Err(error!(IllegalQuantity));
                }
                Ok(Val::Number(x.sqrt()))
            }
            LOG => {
                let x = self.eval_number()?;
                if x <= 0.0 {
                    return Err(error!(IllegalQuantity));
                }
                Ok(Val::Number(x.ln()))
            }
            EXP => Ok(Val::Number(checked(self.eval_number()?.exp())?)),
            SIN => Ok(Val::Number(self.eval_number()?.sin())),
            COS => Ok(Val::Number(self.eval_number()?.cos())),
            TAN => Ok(Val::Number(checked(self.eval_number()?.tan())?)),
            ATN => Ok(Val::Number(self.eval_number()?.atan())),
            USR => Ok(Val::Number(self.eval_number()?)),
            PEEK => {
                let addr = self.eval_number()?.trunc();
                let byte = if addr >= 0.0 && (addr as usize) < self.memory.len() {
                    self.memory[addr as usize]
                } else {
                    0
                };
                Ok(Val::Number(f64::from(byte)))
            }
            FRE => {
                self.eval_number()?;
                self.heap.collect();
                Ok(Val::Number(self.heap.free() as f64))
            }
            POS => {
                self.eval_number()?;
                Ok(Val::Number(self.console.pos() as f64 + 1.0))
            }
            RND => {
                self.skip_spaces();
                let arg = match self.peek() {
                    b')' | b':' | 0 => 1.0,
                    _ => self.eval_number()?,
                };
                Ok(Val::Number(self.rnd.rnd(arg)))
            }
            LEN => {
                let s = self.eval_string()?;
                Ok(Val::Number(s.len() as f64))
            }
            ASC => {
                let s = self.eval_string()?;
                let bytes = s.bytes(&self.heap);
                match bytes.first() {
                    Some(&b) => Ok(Val::Number(f64::from(b))),
                    None => Err(error!(IllegalQuantity)),
                }
            }
            VAL => {
                let s = self.eval_string()?;
                let v = parse_val(s.bytes(&self.heap));
                Ok(Val::Number(checked(v)?))
            }
            STR => {
                let n = self.eval_number()?;
                let mut text = String::new();
                if n >= 0.0 {
                    text.push(' ');
                }
                text.push_str(&super::console::format_number(n));
                Ok(Val::Str(self.heap.alloc(text.as_bytes())?))
            }
            CHR => {
                let n = self.eval_number()?;
                if !(0.0..=255.0).contains(&n) {
                    return Err(error!(IllegalQuantity));
                }
                Ok(Val::Str(self.heap.alloc(&[n.trunc() as u8])?))
            }
            LEFT => {
                let (s, n) = self.string_and_count()?;
                let bytes = s.bytes(&self.heap).to_vec();
                let take = n.min(bytes.len());
                Ok(Val::Str(self.heap.alloc(&bytes[..take])?))
            }
            RIGHT => {
                let (s, n) = self.string_and_count()?;
                let bytes = s.bytes(&self.heap).to_vec();
                let take = n.min(bytes.len());
                Ok(Val::Str(self.heap.alloc(&bytes[bytes.len() - take..])?))
            }
            MID => {
                let s = self.eval_string()?;
                self.expect(b',')?;
                let start = self.eval_number()?;
                if !(1.0..=255.0).contains(&start) {
                    return Err(error!(IllegalQuantity));
                }
                self.skip_spaces();
                let count = if self.peek() == b',' {
                    self.advance();
                    let n = self.eval_number()?;
                    if !(0.0..=255.0).contains(&n) {
                        return Err(error!(IllegalQuantity));
                    }
                    n.trunc() as usize
                } else {
                    super::STRING_MAX
                };
                let bytes = s.bytes(&self.heap).to_vec();
                let from = (start.trunc() as usize - 1).min(bytes.len());
                let take = count.min(bytes.len() - from);
                Ok(Val::Str(self.heap.alloc(&bytes[from..from + take])?))
            }
            _ => Err(error!(SyntaxError)),
        }
    }

    fn string_and_count(&mut self) -> Result<(StrDesc, usize)> {
        let s = self.eval_string()?;
        self.expect(b',')?;
        let n = self.eval_number()?;
        if !(0.0..=255.0).contains(&n) {
            return Err(error!(IllegalQuantity));
        }
        Ok((s, n.trunc() as usize))
    }
}
