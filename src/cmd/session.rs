use super::LineReader;
use crate::dev::{OpenFlags, Port, Storage};
use std::io;

pub const BANNER: &str = "+OK BASIC CMD Mode";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Go back to whatever the device was doing.
    Exit,
    /// Reset the board and boot again.
    Reboot,
}

/// ## CMD mode session
///
/// Reads one command per line and answers each with `+OK` or
/// `-ERR <token>`. Lasts until `exit`, `reboot` or the line closing.

pub struct Session<'a, P: Port + ?Sized, S: Storage + ?Sized> {
    port: &'a mut P,
    storage: &'a mut S,
    reader: LineReader,
    path: String,
    needs_reboot: bool,
}

impl<'a, P: Port + ?Sized, S: Storage + ?Sized> Session<'a, P, S> {
    pub fn new(port: &'a mut P, storage: &'a mut S, reader: LineReader) -> Session<'a, P, S> {
        Session {
            port,
            storage,
            reader,
            path: "/".to_string(),
            needs_reboot: false,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn run(&mut self) -> io::Result<Outcome> {
        self.reader.reset();
        self.path = "/".to_string();
        self.needs_reboot = false;
        self.port.write_line(BANNER)?;
        loop {
            let line = match self.reader.read_line(self.port)? {
                Some(line) => String::from_utf8_lossy(&line).to_string(),
                None => {
                    log::info!("line closed during session");
                    return Ok(self.leave());
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (command, rest) = match line.find(' ') {
                Some(i) => (&line[..i], line[i + 1..].trim()),
                None => (line, ""),
            };
            log::debug!("command {:?} {:?}", command, rest);
            match command {
                "exit" => {
                    self.port.write_line("+OK")?;
                    return Ok(self.leave());
                }
                "reboot" => {
                    self.port.write_line("+OK")?;
                    return Ok(Outcome::Reboot);
                }
                "ls" => self.ls()?,
                "cd" => self.cd(rest)?,
                "rm" => self.rm(rest)?,
                "upload" => self.upload(rest)?,
                _ => self.error(command)?,
            }
        }
    }

    fn leave(&self) -> Outcome {
        if self.needs_reboot {
            Outcome::Reboot
        } else {
            Outcome::Exit
        }
    }

    fn error(&mut self, token: &str) -> io::Result<()> {
        self.port.write_line(&format!("-ERR {}", token))
    }

    fn ls(&mut self) -> io::Result<()> {
        match self.storage.list(&self.path) {
            Ok(names) => {
                self.port.write_line(&self.path)?;
                for name in names {
                    self.port.write_line(&name)?;
                }
                self.port.write_line("+OK")
            }
            Err(e) => {
                log::warn!("ls {}: {}", self.path, e);
                self.error("ls")
            }
        }
    }

    /// No joining: `..` and `/` go to the root, `.` stays, anything else
    /// replaces the path with `/` and the argument as given, so `cd /lib`
    /// lands in `//lib`.
    fn cd(&mut self, arg: &str) -> io::Result<()> {
        match arg {
            "" => return self.error("cd"),
            ".." | "/" => self.path = "/".to_string(),
            "." => {}
            _ => self.path = format!("/{}", arg),
        }
        self.port.write_line("+OK")
    }

    fn rm(&mut self, name: &str) -> io::Result<()> {
        if name.is_empty() {
            return self.error("rm");
        }
        match self.storage.remove(name) {
            Ok(()) => self.port.write_line("+OK"),
            Err(e) => {
                log::warn!("rm {}: {}", name, e);
                self.error("rm")
            }
        }
    }

    fn close(&mut self, name: &str) {
        if let Err(e) = self.storage.close() {
            log::warn!("close {}: {}", name, e);
        }
    }

    fn upload(&mut self, args: &str) -> io::Result<()> {
        let mut args = args.split_whitespace();
        let (name, size) = match (args.next(), args.next().map(str::parse::<usize>)) {
            (Some(name), Some(Ok(size))) => (name.to_string(), size),
            _ => return self.error("upload"),
        };
        let flags = OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNCATE;
        if let Err(e) = self.storage.open(&name, flags) {
            log::warn!("upload {}: {}", name, e);
            return self.error("upload");
        }
        self.port.write_line("+OK")?;
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let line = match self.reader.read_line(self.port) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    log::warn!("upload {}: line closed after {} bytes", name, data.len());
                    self.close(&name);
                    return self.error("upload");
                }
                Err(e) => {
                    self.close(&name);
                    return Err(e);
                }
            };
            let text = String::from_utf8_lossy(&line).to_string();
            match text.trim().parse::<u8>() {
                Ok(b) => data.push(b),
                Err(_) => {
                    log::warn!("upload {}: bad byte {:?}", name, text);
                    self.close(&name);
                    return self.error(text.trim());
                }
            }
            self.port.write_line("+OK")?;
        }
        let written = self.storage.write(&data);
        let closed = self.storage.close();
        if let Err(e) = written.and(closed) {
            log::warn!("upload {}: {}", name, e);
            return self.error("upload");
        }
        self.needs_reboot = true;
        let crc = crc::crc32::checksum_ieee(&data);
        log::info!("uploaded {} ({} bytes, crc32 {:08x})", name, size, crc);
        self.port
            .write_line(&format!("+OK {} {} {:08x}", name, size, crc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dev::MemStorage;
    use std::time::Duration;

    fn session(input: &str, storage: &mut MemStorage) -> (Outcome, String) {
        let mut port = crate::dev::MemPort::new();
        port.feed(input);
        let reader = LineReader::new(Duration::from_millis(500), false);
        let outcome = Session::new(&mut port, storage, reader).run().unwrap();
        (outcome, port.take_output())
    }

    #[test]
    fn test_upload_stores_exact_bytes() {
        let mut storage = MemStorage::new();
        let (outcome, out) = session("upload hi.bas 3\r72\r101\r108\r999\rexit\r", &mut storage);
        assert_eq!(storage.file("hi.bas"), Some(&b"Hel"[..]));
        let crc = crc::crc32::checksum_ieee(b"Hel");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], BANNER);
        assert_eq!(&lines[1..5], &["+OK", "+OK", "+OK", "+OK"]);
        assert_eq!(lines[5], format!("+OK hi.bas 3 {:08x}", crc));
        assert_eq!(lines[6], "-ERR 999");
        assert_eq!(outcome, Outcome::Reboot);
    }

    #[test]
    fn test_upload_bad_byte() {
        let mut storage = MemStorage::new();
        let (outcome, out) = session("upload a 2\n1\nxyz\nexit\n", &mut storage);
        assert!(out.contains("-ERR xyz\n"));
        assert_eq!(storage.file("a"), Some(&b""[..]));
        assert_eq!(outcome, Outcome::Exit);
    }

    #[test]
    fn test_upload_needs_name_and_size() {
        let mut storage = MemStorage::new();
        let (_, out) = session("upload a\nupload a b\n", &mut storage);
        assert_eq!(out, format!("{}\n-ERR upload\n-ERR upload\n", BANNER));
    }

    #[test]
    fn test_ls_and_cd() {
        let mut storage = MemStorage::new()
            .with_file("main.bas", b"")
            .with_file("lib/x.bas", b"");
        let (_, out) = session("ls\ncd lib\nls\ncd ..\nls\ncd\n", &mut storage);
        assert_eq!(
            out,
            format!(
                "{}\n/\nlib\nmain.bas\n+OK\n+OK\n/lib\nx.bas\n+OK\n+OK\n/\nlib\nmain.bas\n+OK\n-ERR cd\n",
                BANNER
            )
        );
    }

    #[test]
    fn test_cd_does_not_join() {
        let mut storage = MemStorage::new().with_file("lib/x.bas", b"");
        let (_, out) = session("cd /lib\nls\ncd lib\ncd x\nls\n", &mut storage);
        assert_eq!(
            out,
            format!("{}\n+OK\n//lib\nx.bas\n+OK\n+OK\n+OK\n/x\n+OK\n", BANNER)
        );
    }

    #[test]
    fn test_rm() {
        let mut storage = MemStorage::new().with_file("main.bas", b"end");
        let (_, out) = session("rm main.bas\nrm main.bas\n", &mut storage);
        assert_eq!(out, format!("{}\n+OK\n-ERR rm\n", BANNER));
        assert_eq!(storage.file("main.bas"), None);
    }

    #[test]
    fn test_unknown_and_blank() {
        let mut storage = MemStorage::new();
        let (outcome, out) = session("\n\nformat now\nexit\n", &mut storage);
        assert_eq!(out, format!("{}\n-ERR format\n+OK\n", BANNER));
        assert_eq!(outcome, Outcome::Exit);
    }

    #[test]
    fn test_reboot() {
        let mut storage = MemStorage::new();
        let (outcome, out) = session("reboot\nls\n", &mut storage);
        assert_eq!(out, format!("{}\n+OK\n", BANNER));
        assert_eq!(outcome, Outcome::Reboot);
    }
}
