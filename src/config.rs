use std::time::Duration;

/// ## Device configuration
///
/// Timing windows and switches shared by the protocol engine and the
/// device loop. The defaults are what a board runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// First byte of the CMD mode escape sequence.
    pub escape_byte: u8,
    /// How long to wait for the second byte after the escape byte.
    pub escape_window: Duration,
    /// How long a `\r` waits for a following `\n`.
    pub crlf_window: Duration,
    /// Poll interval in the held state.
    pub halt_poll: Duration,
    /// The held state prints its error on every Nth poll.
    pub announce_every: u32,
    /// Poll interval while no script is loaded.
    pub idle_poll: Duration,
    /// Script loaded at boot.
    pub script: String,
    /// Echo session input back to the host.
    pub echo: bool,
    /// Let the `os` statement reach the board's shell.
    pub allow_os: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            escape_byte: 0x03,
            escape_window: Duration::from_millis(500),
            crlf_window: Duration::from_millis(500),
            halt_poll: Duration::from_millis(500),
            announce_every: 10,
            idle_poll: Duration::from_millis(10),
            script: "main.bas".to_string(),
            echo: false,
            allow_os: false,
        }
    }
}
