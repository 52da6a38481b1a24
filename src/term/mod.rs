/*!
## Rust Terminal Module

Runs a device on the host. The terminal stands in for the serial line,
a directory stands in for flash, and pins show up in the log.

Ctrl-C followed by any key opens CMD mode. Ctrl-D closes the line,
which is the only way this device ever stops.

*/

extern crate ansi_term;
extern crate mortal;
use crate::config::Config;
use crate::dev::{is_eof, DirStorage, HostBoard, Port};
use crate::device::Device;
use ansi_term::Style;
use clap::Parser;
use log::LevelFilter;
use mortal::{Event, Key, PrepareConfig, Signal, Terminal};
use simple_logger::SimpleLogger;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "basic", version, about = "Embedded BASIC device running on the host")]
struct Args {
    /// Directory used as the device's file store
    #[arg(long, default_value = "storage")]
    storage: PathBuf,
    /// Script run at boot
    #[arg(long, default_value = "main.bas")]
    script: String,
    /// Echo CMD mode input
    #[arg(long)]
    echo: bool,
    /// Let the os statement run shell commands
    #[arg(long)]
    allow_os: bool,
    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

pub fn main() {
    let args = Args::parse();
    let level = match args.log_level.parse::<LevelFilter>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("unknown log level {:?}, using warn", args.log_level);
            LevelFilter::Warn
        }
    };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", error);
    }
    if let Err(error) = main_loop(args) {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
    }
}

fn main_loop(args: Args) -> io::Result<()> {
    let config = Config {
        script: args.script,
        echo: args.echo,
        allow_os: args.allow_os,
        ..Config::default()
    };
    let terminal = Terminal::new()?;
    let state = terminal.prepare(PrepareConfig::default())?;
    let mut port = TerminalPort::new(terminal);
    port.write_str(&format!(
        "{}\n",
        Style::new().bold().paint(format!(
            "BASIC on {}, ^C then any key for CMD mode, ^D to quit",
            args.storage.display()
        ))
    ))?;
    let mut device = Device::new(config, port, DirStorage::new(args.storage), HostBoard);
    let result = device.boot().and_then(|_| device.run_forever());
    device.port().terminal.restore(state)?;
    match result {
        Err(e) if is_eof(&e) => Ok(()),
        result => result,
    }
}

/// The raw terminal as a serial line. Keys become the bytes a serial
/// terminal would send.
struct TerminalPort {
    terminal: Terminal,
    pending: VecDeque<u8>,
    closed: bool,
}

impl TerminalPort {
    fn new(terminal: Terminal) -> TerminalPort {
        TerminalPort {
            terminal,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::Char(c) => {
                let mut buf = [0; 4];
                self.pending.extend(c.encode_utf8(&mut buf).as_bytes());
            }
            Key::Ctrl('d') => self.closed = true,
            Key::Ctrl(c) => self.pending.push_back(c as u8 & 0x1f),
            Key::Enter => self.pending.push_back(b'\r'),
            Key::Tab => self.pending.push_back(b'\t'),
            Key::Backspace => self.pending.push_back(0x08),
            Key::Escape => self.pending.push_back(0x1b),
            _ => {}
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "terminal closed")
}

impl Port for TerminalPort {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(b) = self.pending.pop_front() {
                return Ok(Some(b));
            }
            if self.closed {
                return Err(closed());
            }
            let wait = deadline.map(|d| d.saturating_duration_since(Instant::now()));
            match self.terminal.read_event(wait)? {
                Some(Event::Key(key)) => self.key(key),
                Some(Event::Signal(Signal::Interrupt)) => self.pending.push_back(0x03),
                _ => {}
            }
            if self.pending.is_empty() && deadline.map_or(false, |d| Instant::now() >= d) {
                return Ok(None);
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let s = String::from_utf8_lossy(bytes).replace('\n', "\r\n");
        if s.starts_with('?') {
            self.terminal
                .write_str(&Style::new().bold().paint(s).to_string())
        } else {
            self.terminal.write_str(&s)
        }
    }
}
