//! # BASIC for small boards
//!
//! A BASIC interpreter that lives on a microcontroller and runs the
//! script stored in its flash, plus a serial protocol for replacing
//! that script without a toolchain.
//!
//! The interpreter works straight from the program text. Nothing is
//! compiled or kept besides the program itself and a small index of the
//! lines and labels seen so far, so it fits where memory is counted in
//! kilobytes.
//!
//! A device is never allowed to get stuck. Whatever the script does,
//! sending Ctrl-C and one more byte over the line opens CMD mode, where
//! files can be listed, removed and uploaded.
//!
//! The `basic` binary runs a device on a workstation, using the
//! terminal as the serial line and a directory as flash.
//! ```text
//! basic --storage ./storage --script main.bas
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod cmd;
pub mod config;
pub mod dev;
pub mod device;
pub mod lang;
pub mod mach;
pub mod term;
