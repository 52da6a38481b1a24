use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// ## Serial line
///
/// Byte oriented and polled. A read with a timeout gives `Ok(None)`
/// when nothing arrived in time; a read without one blocks. The end of
/// the line is reported as `ErrorKind::UnexpectedEof`.
pub trait Port {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>>;
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }

    fn write_line(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())?;
        self.write_all(b"\n")
    }
}

pub fn is_eof(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::UnexpectedEof
}

/// In-memory line. Input is queued up front, output is collected.
#[derive(Debug, Default)]
pub struct MemPort {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MemPort {
    pub fn new() -> MemPort {
        MemPort::default()
    }

    pub fn feed<T: AsRef<[u8]>>(&mut self, bytes: T) {
        self.input.extend(bytes.as_ref());
    }

    pub fn pending(&self) -> usize {
        self.input.len()
    }

    pub fn take_output(&mut self) -> String {
        let s = String::from_utf8_lossy(&self.output).to_string();
        self.output.clear();
        s
    }
}

impl Port for MemPort {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        match self.input.pop_front() {
            Some(b) => Ok(Some(b)),
            None if timeout.is_some() => Ok(None),
            None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "line closed")),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
