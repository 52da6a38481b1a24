/*!
## Rust Command Module

The serial protocol the interpreter yields to. [`Escape`] watches the
line between statements, [`Session`] runs CMD mode once it triggers, and
[`LineReader`] frames lines for both the command loop and uploads.

*/

mod escape;
mod line;
mod session;

pub use escape::Escape;
pub use line::LineReader;
pub use session::{Outcome, Session, BANNER};
