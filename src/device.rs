use crate::cmd::{Escape, LineReader, Outcome, Session};
use crate::config::Config;
use crate::dev::{is_eof, read_file, Board, Port, Storage};
use crate::error;
use crate::lang::Error;
use crate::mach::{Event, Pin, Runtime};
use std::io;

/// What the device is doing between two calls to `step`.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    /// No script, or the script ended. Only the escape is watched.
    Idle,
    Running,
    /// Held after a fatal error. The script is done for, the device is not.
    Halted(Error),
    InSession,
}

/// ## Device
///
/// Ties the interpreter to the serial line, storage and board. One
/// statement runs per `step`, and the line is checked for the CMD mode
/// escape after each one, so a session can always be opened no matter
/// what the script does.

pub struct Device<P: Port, S: Storage, B: Board> {
    config: Config,
    port: P,
    storage: S,
    board: B,
    runtime: Runtime,
    escape: Escape,
    state: State,
    polls: u32,
}

impl<P: Port, S: Storage, B: Board> Device<P, S, B> {
    pub fn new(config: Config, port: P, storage: S, board: B) -> Device<P, S, B> {
        let escape = Escape::new(config.escape_byte, config.escape_window);
        Device {
            config,
            port,
            storage,
            board,
            runtime: Runtime::default(),
            escape,
            state: State::Idle,
            polls: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// For registering peek and poke. Registrations survive reboots.
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// Mounts storage and loads the script. Without a script the device
    /// stays idle and waits for an upload.
    pub fn boot(&mut self) -> io::Result<()> {
        if let Err(e) = self.storage.mount() {
            log::error!("mount: {}", e);
            self.state = State::Idle;
            return Ok(());
        }
        let program = match read_file(&mut self.storage, &self.config.script) {
            Ok(program) => program,
            Err(e) => {
                log::warn!("{}: {}", self.config.script, e);
                self.state = State::Idle;
                return Ok(());
            }
        };
        log::info!("loaded {} ({} bytes)", self.config.script, program.len());
        match self.runtime.init(program) {
            Ok(()) => self.state = State::Running,
            Err(e) => self.halt(e)?,
        }
        Ok(())
    }

    /// Returns only when the serial line closes.
    pub fn run_forever(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(()) => {}
                Err(e) if is_eof(&e) => return Err(e),
                Err(e) => log::error!("{}", e),
            }
        }
    }

    /// Advances the device by one statement or one poll.
    pub fn step(&mut self) -> io::Result<()> {
        match self.state {
            State::Running => {
                let event = self.runtime.run();
                self.event(event)?;
                if self.escape.check(&mut self.port)? {
                    self.session()?;
                }
            }
            State::Idle => {
                if self.escape.check(&mut self.port)? {
                    self.session()?;
                } else {
                    self.board.sleep(self.config.idle_poll);
                }
            }
            State::Halted(_) => {
                if self.escape.check(&mut self.port)? {
                    self.session()?;
                } else {
                    self.board.sleep(self.config.halt_poll);
                    self.polls = self.polls.wrapping_add(1);
                    if self.polls % self.config.announce_every.max(1) == 0 {
                        self.announce()?;
                    }
                }
            }
            State::InSession => self.session()?,
        }
        Ok(())
    }

    fn event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Running => {}
            Event::Stopped => {
                log::info!("program ended in line {}", self.runtime.line_number());
                self.state = State::Idle;
            }
            Event::Print(s) => self.port.write_str(&s)?,
            Event::Sleep(duration) => self.board.sleep(duration),
            Event::Pin(pin, n) => match pin {
                Pin::Init => self.board.pin_init(n),
                Pin::DirIn => self.board.pin_dir_in(n),
                Pin::DirOut => self.board.pin_dir_out(n),
                Pin::On => self.board.pin_on(n),
                Pin::Off => self.board.pin_off(n),
            },
            Event::Os(command) => {
                if !self.config.allow_os {
                    let line = Some(self.runtime.line_number());
                    return self.halt(error!(IllegalFunctionCall, line; "OS NOT AVAILABLE"));
                }
                match self.board.os(&command) {
                    Ok(output) => self.port.write_str(&output)?,
                    Err(e) => log::warn!("os {:?}: {}", command, e),
                }
            }
            Event::Error(e) => self.halt(e)?,
        }
        Ok(())
    }

    fn halt(&mut self, error: Error) -> io::Result<()> {
        log::error!("halted: {}", error);
        self.state = State::Halted(error);
        self.polls = 0;
        self.announce()
    }

    fn announce(&mut self) -> io::Result<()> {
        if let State::Halted(error) = &self.state {
            let s = format!("?{}\n", error);
            self.port.write_str(&s)?;
        }
        Ok(())
    }

    fn session(&mut self) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.state, State::InSession);
        let previous = match previous {
            State::InSession => State::Idle,
            state => state,
        };
        log::info!("entering CMD mode");
        let reader = LineReader::new(self.config.crlf_window, self.config.echo);
        let outcome = Session::new(&mut self.port, &mut self.storage, reader).run();
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };
        log::info!("leaving CMD mode: {:?}", outcome);
        match outcome {
            Outcome::Exit => {
                self.state = previous;
                Ok(())
            }
            Outcome::Reboot => self.reboot(),
        }
    }

    pub fn reboot(&mut self) -> io::Result<()> {
        self.board.reset();
        self.boot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::BANNER;
    use crate::dev::{MemBoard, MemPort, MemStorage, OpenFlags};
    use std::time::Duration;

    type TestDevice = Device<MemPort, MemStorage, MemBoard>;

    fn device(storage: MemStorage) -> TestDevice {
        let mut device = Device::new(Config::default(), MemPort::new(), storage, MemBoard::new());
        device.boot().unwrap();
        device
    }

    fn device_with(program: &str) -> TestDevice {
        device(MemStorage::new().with_file("main.bas", program.as_bytes()))
    }

    fn steps<S: Storage>(device: &mut Device<MemPort, S, MemBoard>, n: usize) {
        for _ in 0..n {
            device.step().unwrap();
        }
    }

    /// Flash that mounts a set number of times and then stays busy.
    struct FlakyStorage {
        inner: MemStorage,
        mounts_left: usize,
        close_fails: bool,
    }

    impl FlakyStorage {
        fn new(inner: MemStorage, mounts_left: usize) -> FlakyStorage {
            FlakyStorage {
                inner,
                mounts_left,
                close_fails: false,
            }
        }

        fn busy() -> io::Error {
            io::Error::new(io::ErrorKind::Other, "flash busy")
        }
    }

    impl Storage for FlakyStorage {
        fn mount(&mut self) -> io::Result<()> {
            if self.mounts_left == 0 {
                return Err(FlakyStorage::busy());
            }
            self.mounts_left -= 1;
            self.inner.mount()
        }

        fn open(&mut self, path: &str, flags: OpenFlags) -> io::Result<()> {
            self.inner.open(path, flags)
        }

        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }

        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.inner.write(buf)
        }

        fn close(&mut self) -> io::Result<()> {
            self.inner.close()?;
            if self.close_fails {
                return Err(FlakyStorage::busy());
            }
            Ok(())
        }

        fn stat(&mut self, path: &str) -> io::Result<u64> {
            self.inner.stat(path)
        }

        fn remove(&mut self, path: &str) -> io::Result<()> {
            self.inner.remove(path)
        }

        fn list(&mut self, path: &str) -> io::Result<Vec<String>> {
            self.inner.list(path)
        }
    }

    fn flaky(program: &str, mounts: usize) -> Device<MemPort, FlakyStorage, MemBoard> {
        let inner = MemStorage::new().with_file("main.bas", program.as_bytes());
        let storage = FlakyStorage::new(inner, mounts);
        let mut device = Device::new(Config::default(), MemPort::new(), storage, MemBoard::new());
        device.boot().unwrap();
        device
    }

    fn upload(name: &str, contents: &str) -> String {
        let mut s = format!("upload {} {}\r\n", name, contents.len());
        for b in contents.bytes() {
            s.push_str(&format!("{}\r\n", b));
        }
        s
    }

    #[test]
    fn test_runs_script_to_idle() {
        let mut device = device_with("print 1+2\nprint \"done\"\n");
        assert_eq!(device.state(), &State::Running);
        steps(&mut device, 3);
        assert_eq!(device.state(), &State::Idle);
        assert_eq!(device.port_mut().take_output(), "3\ndone\n");
    }

    #[test]
    fn test_missing_script_is_idle() {
        let mut device = device(MemStorage::unformatted());
        assert_eq!(device.state(), &State::Idle);
        assert_eq!(device.storage().formats(), 1);
        steps(&mut device, 5);
        assert_eq!(device.board().slept(), Duration::from_millis(50));
        assert_eq!(device.port_mut().take_output(), "");
    }

    #[test]
    fn test_gosub_overflow_holds_and_answers_escape() {
        let mut device = device_with("a:\ngosub a:\n");
        steps(&mut device, 25);
        let error = match device.state() {
            State::Halted(e) => e.to_string(),
            s => panic!("{:?}", s),
        };
        assert_eq!(error, "OUT OF MEMORY IN 2; GOSUB STACK EXHAUSTED");
        assert_eq!(device.port_mut().take_output(), format!("?{}\n", error));
        device.port_mut().feed([0x03, b' ']);
        device.port_mut().feed("exit\n");
        steps(&mut device, 1);
        assert_eq!(device.port_mut().take_output(), format!("{}\n+OK\n", BANNER));
        assert!(matches!(device.state(), State::Halted(_)));
    }

    #[test]
    fn test_held_state_reannounces() {
        let mut device = device_with("print 1/0\n");
        steps(&mut device, 1);
        assert_eq!(
            device.port_mut().take_output(),
            "?DIVISION BY ZERO IN 1\n"
        );
        steps(&mut device, 9);
        assert_eq!(device.port_mut().take_output(), "");
        steps(&mut device, 1);
        assert_eq!(
            device.port_mut().take_output(),
            "?DIVISION BY ZERO IN 1\n"
        );
        assert_eq!(device.board().slept(), Duration::from_millis(5000));
    }

    #[test]
    fn test_upload_then_reboot_runs_new_script() {
        let mut device = device(MemStorage::new());
        assert_eq!(device.state(), &State::Idle);
        device.port_mut().feed([0x03, 0x03]);
        device.port_mut().feed(upload("main.bas", "print 7\n"));
        device.port_mut().feed("exit\r\n");
        steps(&mut device, 1);
        assert_eq!(device.board().resets(), 1);
        assert_eq!(device.state(), &State::Running);
        assert_eq!(device.storage().file("main.bas"), Some(&b"print 7\n"[..]));
        device.port_mut().take_output();
        steps(&mut device, 2);
        assert_eq!(device.port_mut().take_output(), "7\n");
        assert_eq!(device.state(), &State::Idle);
    }

    #[test]
    fn test_escape_between_statements() {
        let mut device = device_with("a:\nprint 1\ngoto a:\n");
        steps(&mut device, 4);
        device.port_mut().feed([0x03, b'!']);
        device.port_mut().feed("reboot\n");
        steps(&mut device, 1);
        assert_eq!(device.board().resets(), 1);
        assert_eq!(device.state(), &State::Running);
        assert!(device.port_mut().take_output().ends_with("+OK\n"));
    }

    #[test]
    fn test_pins_and_sleep() {
        let mut device = device_with("gpioinit 25\ngpiodirout 25\ngpioon 25\nsleep 2\ngpiooff 25\n");
        steps(&mut device, 6);
        assert_eq!(
            device.board().calls(),
            &["init 25", "out 25", "on 25", "off 25"]
        );
        assert_eq!(device.board().slept(), Duration::from_secs(2));
    }

    #[test]
    fn test_os_is_gated() {
        let mut device = device_with("os \"ls\"\n");
        steps(&mut device, 1);
        assert_eq!(
            device.port_mut().take_output(),
            "?ILLEGAL FUNCTION CALL IN 1; OS NOT AVAILABLE\n"
        );

        let config = Config {
            allow_os: true,
            ..Config::default()
        };
        let storage = MemStorage::new().with_file("main.bas", b"os \"ls\"\n");
        let mut device = Device::new(config, MemPort::new(), storage, MemBoard::new());
        device.boot().unwrap();
        steps(&mut device, 2);
        assert_eq!(device.board().calls(), &["os ls"]);
        assert_eq!(device.state(), &State::Idle);
    }

    #[test]
    fn test_failed_mount_on_reboot_leaves_device_reachable() {
        let mut device = flaky("a:\ngoto a:\n", 1);
        assert_eq!(device.state(), &State::Running);
        device.port_mut().feed([0x03, b'x']);
        device.port_mut().feed("reboot\n");
        steps(&mut device, 1);
        assert_eq!(device.board().resets(), 1);
        assert_eq!(device.state(), &State::Idle);
        steps(&mut device, 3);
        device.port_mut().take_output();
        device.port_mut().feed([0x03, b'x']);
        device.port_mut().feed("exit\n");
        steps(&mut device, 1);
        assert_eq!(device.port_mut().take_output(), format!("{}\n+OK\n", BANNER));
        assert_eq!(device.state(), &State::Idle);
    }

    #[test]
    fn test_failed_mount_at_boot_is_idle() {
        let device = flaky("print 1\n", 0);
        assert_eq!(device.state(), &State::Idle);
    }

    #[test]
    fn test_failed_close_during_upload_is_answered() {
        let mut device = flaky("a:\ngoto a:\n", 1);
        device.storage.close_fails = true;
        device.port_mut().feed([0x03, b'x']);
        device.port_mut().feed("upload b.bas 2\n1\nxyz\nupload c.bas 1\n65\nexit\n");
        steps(&mut device, 1);
        let out = device.port_mut().take_output();
        assert!(out.contains("-ERR xyz\n"), "{}", out);
        assert!(out.contains("-ERR upload\n"), "{}", out);
        assert!(out.ends_with("+OK\n"));
        assert_eq!(device.board().resets(), 0);
        assert_eq!(device.state(), &State::Running);
    }
}
