//! # BASIC
//!
//! Runs a BASIC device on the host terminal.

fn main() {
    basic::term::main();
}
