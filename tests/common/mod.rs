use msbasic::mach::{Console, Interp};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Captures everything the interpreter writes to its console.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Drives an interpreter against captured output, optionally with scripted
/// input for INPUT/GET.
pub struct Runner {
    pub interp: Interp,
    out: Capture,
}

impl Runner {
    pub fn new() -> Runner {
        Runner::with_input("")
    }

    pub fn with_input(input: &str) -> Runner {
        let out = Capture::default();
        let console = Console::new(
            Box::new(io::Cursor::new(input.as_bytes().to_vec())),
            Box::new(out.clone()),
        );
        Runner {
            interp: Interp::new(console),
            out,
        }
    }

    /// Feeds one line; errors are reported through the console the way the
    /// REPL reports them.
    pub fn enter(&mut self, line: &str) {
        if let Err(err) = self.interp.enter(line) {
            self.interp.report(&err);
        }
    }

    /// Drains and returns everything printed since the last call.
    pub fn output(&mut self) -> String {
        let bytes = std::mem::take(&mut *self.out.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}
