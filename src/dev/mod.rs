/*!
## Rust Device Module

The collaborators a device is built from: the serial line, the file
store and the board. Each is a trait with an in-memory implementation
for tests and a host implementation for running on a workstation.

*/

mod board;
mod port;
mod storage;

pub use board::{Board, HostBoard, MemBoard};
pub use port::{is_eof, MemPort, Port};
pub use storage::{read_file, DirStorage, MemStorage, OpenFlags, Storage};
