use crate::dev::Port;
use std::io;
use std::time::Duration;

/// Two-stage trigger for CMD mode: the escape byte seen by a zero-wait
/// poll, then any byte at all within the window. A lone stray escape
/// byte does nothing.
#[derive(Debug, Clone, Copy)]
pub struct Escape {
    byte: u8,
    window: Duration,
}

impl Escape {
    pub fn new(byte: u8, window: Duration) -> Escape {
        Escape { byte, window }
    }

    /// Bytes polled here are consumed whether or not they trigger.
    pub fn check<P: Port + ?Sized>(&self, port: &mut P) -> io::Result<bool> {
        match port.read_byte(Some(Duration::from_millis(0)))? {
            Some(b) if b == self.byte => {}
            _ => return Ok(false),
        }
        Ok(port.read_byte(Some(self.window))?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::MemPort;

    fn escape() -> Escape {
        Escape::new(0x03, Duration::from_millis(500))
    }

    #[test]
    fn test_escape_then_any_byte() {
        let mut port = MemPort::new();
        port.feed([0x03, b'x']);
        assert!(escape().check(&mut port).unwrap());
        assert_eq!(port.pending(), 0);
    }

    #[test]
    fn test_lone_escape_is_ignored() {
        let mut port = MemPort::new();
        port.feed([0x03]);
        assert!(!escape().check(&mut port).unwrap());
    }

    #[test]
    fn test_other_bytes_are_dropped() {
        let mut port = MemPort::new();
        port.feed("a");
        assert!(!escape().check(&mut port).unwrap());
        assert!(!escape().check(&mut port).unwrap());
        assert_eq!(port.pending(), 0);
    }
}
