use std::io;
use std::time::Duration;

/// ## Hardware capabilities
///
/// Pins, the clock, the reset line and the host shell. Everything a
/// program can do to the world outside the serial line goes through here.
pub trait Board {
    fn pin_init(&mut self, pin: i32);
    fn pin_dir_in(&mut self, pin: i32);
    fn pin_dir_out(&mut self, pin: i32);
    fn pin_on(&mut self, pin: i32);
    fn pin_off(&mut self, pin: i32);
    fn sleep(&mut self, duration: Duration);
    /// Resets the processor. The caller boots again afterwards.
    fn reset(&mut self);
    /// Runs a command through the host shell and returns what it printed.
    fn os(&mut self, command: &str) -> io::Result<String>;
}

/// Records every call and never blocks. Sleeping advances a virtual clock.
#[derive(Debug, Default)]
pub struct MemBoard {
    calls: Vec<String>,
    slept: Duration,
    resets: usize,
}

impl MemBoard {
    pub fn new() -> MemBoard {
        MemBoard::default()
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn slept(&self) -> Duration {
        self.slept
    }

    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Board for MemBoard {
    fn pin_init(&mut self, pin: i32) {
        self.calls.push(format!("init {}", pin));
    }
    fn pin_dir_in(&mut self, pin: i32) {
        self.calls.push(format!("in {}", pin));
    }
    fn pin_dir_out(&mut self, pin: i32) {
        self.calls.push(format!("out {}", pin));
    }
    fn pin_on(&mut self, pin: i32) {
        self.calls.push(format!("on {}", pin));
    }
    fn pin_off(&mut self, pin: i32) {
        self.calls.push(format!("off {}", pin));
    }
    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
    fn reset(&mut self) {
        self.resets += 1;
        self.calls.push("reset".to_string());
    }
    fn os(&mut self, command: &str) -> io::Result<String> {
        self.calls.push(format!("os {}", command));
        Ok(String::new())
    }
}

/// The machine this process runs on. Pins only show up in the log.
#[derive(Debug, Default)]
pub struct HostBoard;

impl Board for HostBoard {
    fn pin_init(&mut self, pin: i32) {
        log::info!("pin {} init", pin);
    }
    fn pin_dir_in(&mut self, pin: i32) {
        log::info!("pin {} input", pin);
    }
    fn pin_dir_out(&mut self, pin: i32) {
        log::info!("pin {} output", pin);
    }
    fn pin_on(&mut self, pin: i32) {
        log::info!("pin {} on", pin);
    }
    fn pin_off(&mut self, pin: i32) {
        log::info!("pin {} off", pin);
    }
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
    fn reset(&mut self) {
        log::info!("reset");
    }
    fn os(&mut self, command: &str) -> io::Result<String> {
        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()?;
        let mut s = String::from_utf8_lossy(&output.stdout).to_string();
        s.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(s)
    }
}
