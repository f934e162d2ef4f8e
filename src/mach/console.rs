use super::{TERM_WIDTH, ZONE_WIDTH};
use std::io::{self, BufRead, Read, Write};

/// ## Terminal
///
/// One abstraction owns the byte streams and tracks the output column so
/// PRINT's zones, TAB, and wrapping agree with POS. Writing a newline resets
/// the column and pads with NULs when a NULL count is set (a courtesy to
/// slow teletypes); reaching the width wraps automatically. Write failures
/// are swallowed: the interpreter has nowhere to report them.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    col: usize,
    width: usize,
    null_count: u8,
}

impl Console {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Console {
        Console {
            input,
            output,
            col: 0,
            width: TERM_WIDTH,
            null_count: 0,
        }
    }

    pub fn stdio() -> Console {
        Console::new(
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Current output column, 0-based.
    pub fn pos(&self) -> usize {
        self.col
    }

    pub fn set_null_count(&mut self, count: u8) {
        self.null_count = count;
    }

    fn emit(&mut self, b: u8) {
        let _ = self.output.write_all(&[b]);
    }

    pub fn newline(&mut self) {
        self.emit(b'\n');
        self.col = 0;
        for _ in 0..self.null_count {
            self.emit(0);
        }
    }

    pub fn write_byte(&mut self, b: u8) {
        match b {
            b'\n' | b'\r' => self.newline(),
            0x08 => {
                if self.col > 0 {
                    self.emit(b);
                    self.col -= 1;
                }
            }
            _ => {
                self.emit(b);
                self.col += 1;
                if self.col >= self.width {
                    self.newline();
                }
            }
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// TAB: 0-based target column, clamped inside the line. Only a column
    /// strictly past the target forces a newline first.
    pub fn tab_to(&mut self, target: usize) {
        let target = target.min(self.width - 1);
        if self.col > target {
            self.newline();
        }
        while self.col < target {
            self.write_byte(b' ');
        }
    }

    /// Comma separator: advance to the next 14-column zone.
    pub fn next_zone(&mut self) {
        let pad = ZONE_WIDTH - self.col % ZONE_WIDTH;
        for _ in 0..pad {
            self.write_byte(b' ');
        }
    }

    pub fn space(&mut self, count: usize) {
        for _ in 0..count {
            self.write_byte(b' ');
        }
    }

    /// PRINT's number form: sign position, digits, one trailing space.
    pub fn print_number(&mut self, n: f64) {
        if n >= 0.0 || n.is_nan() {
            self.write_byte(b' ');
        }
        let s = format_number(n);
        self.write_str(&s);
        self.write_byte(b' ');
    }

    pub fn flush(&mut self) {
        let _ = self.output.flush();
    }

    /// Blocking line read. `None` means end of input. The column resets
    /// because the echoed return already moved the cursor.
    pub fn read_line(&mut self) -> Option<String> {
        self.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                self.col = 0;
                Some(line)
            }
        }
    }

    /// Blocking single-byte read for GET. The stream stays line-buffered,
    /// so a key is not seen until return is pressed.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.flush();
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("col", &self.col)
            .field("width", &self.width)
            .field("null_count", &self.null_count)
            .finish()
    }
}

/// Renders a double the way this BASIC prints and STR$ converts: `0` for
/// zero, plain integers below 1e10, up to nine significant digits
/// otherwise, and E-notation outside the 1e-9..1e10 magnitude window.
/// Negative values carry their minus sign; the caller supplies the leading
/// space convention for non-negatives.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NAN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let abs = n.abs();
    if abs >= 1e10 || abs < 1e-9 {
        return exponential(n, false);
    }
    if abs == abs.floor() {
        return format!("{:.0}", n);
    }
    let (digits, exp10) = significant_digits(abs);
    if exp10 < -4 || exp10 >= 9 {
        return exponential(n, true);
    }
    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    if exp10 >= 0 {
        let split = exp10 as usize + 1;
        out.push_str(&digits[..split]);
        let frac = digits[split..].trim_end_matches('0');
        if !frac.is_empty() {
            out.push('.');
            out.push_str(frac);
        }
    } else {
        out.push_str("0.");
        for _ in 0..(-exp10 - 1) {
            out.push('0');
        }
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Nine significant decimal digits of a positive double, plus the decimal
/// exponent of the leading digit.
fn significant_digits(abs: f64) -> (String, i32) {
    let formatted = format!("{:.8e}", abs);
    let mut parts = formatted.splitn(2, 'e');
    let mantissa = parts.next().unwrap_or("0");
    let exp10: i32 = parts.next().unwrap_or("0").parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exp10)
}

/// E-notation with a signed two-digit exponent. `trim_all` removes the
/// decimal point when nothing follows it (the %G style); otherwise one
/// digit stays after the point (the %E style used outside the
/// nine-digit window).
fn exponential(n: f64, trim_all: bool) -> String {
    let (digits, exp10) = significant_digits(n.abs());
    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    out.push_str(&digits[..1]);
    let frac = digits[1..].trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    } else if !trim_all {
        out.push_str(".0");
    }
    out.push('E');
    out.push_str(&format!("{:+03}", exp10));
    out
}
