/// User interface and status output utilities
///
/// This module handles:
/// - Thread-safe console output
/// - Colored terminal text with plain fallback
/// - Status message formatting

use crate::types::StatusClass;
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn console_lock<F>(f: F)
where
    F: FnOnce() -> (),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print a status message with "testng-diff: " prefix (thread-safe)
pub fn status(s: &str) {
    console_lock(|| {
        println!("testng-diff: {}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!("");
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!("");
}

/// Print a value colored by its status class: green for pass, red for
/// fail, yellow for anything else.
pub fn print_status(s: &str, class: StatusClass) {
    let fg = match class {
        StatusClass::Pass => term::color::GREEN,
        StatusClass::Fail => term::color::RED,
        StatusClass::Other => term::color::YELLOW,
    };
    print_color(s, fg);
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
        }

        true
    }
}
