/*!
## Terminal module

The host side of the interpreter: command-line handling, program-file
loading, and the interactive READY loop built on linefeed. CTRL-C is
observed through an atomic flag the interpreter's break hook polls between
statements.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use crate::mach::{Console, Interp};
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn main() -> i32 {
    let mut filename: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return 0;
            }
            "-v" | "--version" => {
                print_version();
                return 0;
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {}", other);
                print_help();
                return 1;
            }
            other => {
                if filename.is_some() {
                    print_help();
                    return 1;
                }
                filename = Some(other.to_string());
            }
        }
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    if ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).is_err() {
        eprintln!(
            "{}",
            Style::new().bold().paint("COULD NOT INSTALL BREAK HANDLER")
        );
    }

    let mut interp = Interp::new(Console::stdio());
    interp.set_break_flag(interrupted);

    match filename {
        Some(name) => run_file(&mut interp, &name),
        None => repl(&mut interp),
    }
}

/// Loads a program file and runs it. Lines that do not start with a digit
/// (after leading spaces), and lines starting with `#`, are skipped so
/// files may carry header comments.
fn run_file(interp: &mut Interp, filename: &str) -> i32 {
    let file = match File::open(filename) {
        Ok(f) => f,
        Err(err) => {
            eprintln!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("Cannot open '{}': {}", filename, err))
            );
            return 1;
        }
    };
    let mut stored = 0usize;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(err) => {
                eprintln!(
                    "{}",
                    Style::new()
                        .bold()
                        .paint(format!("Read error in '{}': {}", filename, err))
                );
                return 1;
            }
        };
        let text = line.trim_end_matches('\r');
        let body = text.trim_start_matches(' ');
        if body.is_empty() || body.starts_with('#') {
            continue;
        }
        if !body.as_bytes()[0].is_ascii_digit() {
            continue;
        }
        match interp.enter(text) {
            Ok(()) => stored += 1,
            Err(err) => {
                eprintln!("Warning: line {} not stored: {}", index + 1, err);
            }
        }
    }
    if stored == 0 {
        eprintln!(
            "{}",
            Style::new()
                .bold()
                .paint(format!("No program lines in '{}'", filename))
        );
        return 1;
    }
    if let Err(err) = interp.enter("RUN") {
        interp.report(&err);
    }
    0
}

fn repl(interp: &mut Interp) -> i32 {
    let interface = match Interface::new("msbasic") {
        Ok(i) => i,
        Err(err) => {
            eprintln!(
                "{}",
                Style::new()
                    .bold()
                    .paint(format!("Cannot initialise terminal: {}", err))
            );
            return 1;
        }
    };
    println!("MSBASIC {}", VERSION);
    println!("{} BYTES FREE", interp.free_bytes());
    loop {
        println!();
        println!("READY.");
        match interface.read_line() {
            Ok(ReadResult::Input(line)) => {
                if is_exit_command(&line) {
                    break;
                }
                if !line.trim().is_empty() {
                    interface.add_history_unique(line.clone());
                }
                if let Err(err) = interp.enter(&line) {
                    interp.report(&err);
                }
            }
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(_)) => continue,
            Err(_) => break,
        }
    }
    println!("BYE");
    0
}

fn is_exit_command(line: &str) -> bool {
    let word = line.trim();
    ["QUIT", "EXIT", "BYE", "SYSTEM"]
        .iter()
        .any(|w| word.eq_ignore_ascii_case(w))
}

fn print_help() {
    println!("msbasic - Microsoft BASIC 1.1 compatible interpreter");
    println!();
    println!("Usage:");
    println!("  msbasic              start the interactive interpreter");
    println!("  msbasic FILE         load and run a BASIC program");
    println!("  msbasic -h, --help   show this help");
    println!("  msbasic -v, --version  show version");
    println!();
    println!("Interactive commands: NEW, LIST [n[-m]], RUN [n], CONT, CLEAR,");
    println!("and QUIT/EXIT/BYE/SYSTEM to leave.");
}

fn print_version() {
    println!("msbasic {}", VERSION);
    println!("Microsoft BASIC 1.1 compatible");
}
