use crate::dev::{is_eof, Port};
use std::io;
use std::time::Duration;

/// ## Protocol line reader
///
/// A line ends at `\n`, at `\r\n`, or at a `\r` that is not followed by
/// `\n` within the window. A byte read while waiting for that `\n` is
/// held and starts the next line.

#[derive(Debug, Clone)]
pub struct LineReader {
    held: Option<u8>,
    echo: bool,
    window: Duration,
}

const INITIAL_CAPACITY: usize = 16;

impl LineReader {
    pub fn new(window: Duration, echo: bool) -> LineReader {
        LineReader {
            held: None,
            echo,
            window,
        }
    }

    pub fn reset(&mut self) {
        self.held = None;
    }

    /// `Ok(None)` once the line is closed and nothing is left to read.
    pub fn read_line<P: Port + ?Sized>(&mut self, port: &mut P) -> io::Result<Option<Vec<u8>>> {
        let mut buf: Vec<u8> = Vec::with_capacity(INITIAL_CAPACITY);
        loop {
            let byte = match self.held.take() {
                Some(b) => Some(b),
                None => match port.read_byte(None) {
                    Ok(b) => b,
                    Err(e) if is_eof(&e) => None,
                    Err(e) => return Err(e),
                },
            };
            match byte {
                None if buf.is_empty() => return Ok(None),
                None | Some(b'\n') => break,
                Some(b'\r') => {
                    match port.read_byte(Some(self.window)) {
                        Ok(Some(b'\n')) | Ok(None) => {}
                        Ok(Some(b)) => self.held = Some(b),
                        Err(e) if is_eof(&e) => {}
                        Err(e) => return Err(e),
                    }
                    break;
                }
                Some(b) => {
                    if self.echo && (b' '..=b'~').contains(&b) {
                        port.write_all(&[b])?;
                    }
                    if buf.len() == buf.capacity() {
                        buf.reserve_exact(buf.capacity());
                    }
                    buf.push(b);
                }
            }
        }
        if self.echo {
            port.write_all(b"\n")?;
        }
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::MemPort;

    fn reader() -> LineReader {
        LineReader::new(Duration::from_millis(500), false)
    }

    fn lines(input: &str) -> Vec<String> {
        let mut port = MemPort::new();
        port.feed(input);
        let mut reader = reader();
        let mut v = vec![];
        while let Some(line) = reader.read_line(&mut port).unwrap() {
            v.push(String::from_utf8(line).unwrap());
        }
        v
    }

    #[test]
    fn test_every_ending_gives_the_same_line() {
        assert_eq!(lines("abc\r\n"), vec!["abc"]);
        assert_eq!(lines("abc\r"), vec!["abc"]);
        assert_eq!(lines("abc\n"), vec!["abc"]);
    }

    #[test]
    fn test_bare_cr_holds_next_byte() {
        assert_eq!(lines("72\r101\r108\r"), vec!["72", "101", "108"]);
    }

    #[test]
    fn test_mixed_endings() {
        assert_eq!(lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(lines("\r\n\n"), vec!["", ""]);
    }

    #[test]
    fn test_long_line_grows() {
        let long = "x".repeat(100);
        assert_eq!(lines(&format!("{}\n", long)), vec![long]);
    }

    #[test]
    fn test_echo_printable_only() {
        let mut port = MemPort::new();
        port.feed("a\tb\r\n");
        let mut reader = LineReader::new(Duration::from_millis(500), true);
        let line = reader.read_line(&mut port).unwrap();
        assert_eq!(line, Some(b"a\tb".to_vec()));
        assert_eq!(port.take_output(), "ab\n");
    }
}
