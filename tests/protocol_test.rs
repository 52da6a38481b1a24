use basic::cmd::{Escape, LineReader, Outcome, Session, BANNER};
use basic::config::Config;
use basic::dev::{MemBoard, MemPort, MemStorage};
use basic::device::{Device, State};
use std::time::Duration;

fn session(input: &[u8], storage: &mut MemStorage) -> (Outcome, String) {
    let mut port = MemPort::new();
    port.feed(input);
    let reader = LineReader::new(Duration::from_millis(500), false);
    let outcome = Session::new(&mut port, storage, reader).run().unwrap();
    (outcome, port.take_output())
}

#[test]
fn test_upload_round_trip() {
    for ending in &["\n", "\r", "\r\n"] {
        let input = ["upload x.bas 3", "72", "101", "108", "exit", ""].join(ending);
        let mut storage = MemStorage::new();
        let (outcome, out) = session(input.as_bytes(), &mut storage);
        assert_eq!(storage.file("x.bas"), Some(&[72u8, 101, 108][..]), "{:?}", ending);
        assert!(out.starts_with(BANNER));
        assert!(out.ends_with("+OK\n"));
        assert_eq!(outcome, Outcome::Reboot);
    }
}

#[test]
fn test_upload_stops_after_size_lines() {
    let mut storage = MemStorage::new();
    let (_, out) = session(b"upload x 1\n65\n66\n", &mut storage);
    assert_eq!(storage.file("x"), Some(&b"A"[..]));
    assert!(out.ends_with("-ERR 66\n"));
}

#[test]
fn test_escape_needs_second_byte() {
    let escape = Escape::new(0x03, Duration::from_millis(500));
    let mut port = MemPort::new();
    port.feed(b"\x03");
    assert!(!escape.check(&mut port).unwrap());
    port.feed(b"\x03\x03");
    assert!(escape.check(&mut port).unwrap());
}

#[test]
fn test_broken_script_recovered_by_upload() {
    let storage = MemStorage::new().with_file("main.bas", b"goto nowhere:\n");
    let mut device = Device::new(Config::default(), MemPort::new(), storage, MemBoard::new());
    device.boot().unwrap();
    device.step().unwrap();
    assert!(matches!(device.state(), State::Halted(_)));

    let script = "print \"fixed\"\n";
    let mut input = format!("\x03\x03upload main.bas {}\n", script.len());
    for b in script.bytes() {
        input.push_str(&format!("{}\n", b));
    }
    input.push_str("exit\n");
    device.port_mut().feed(input);
    device.step().unwrap();
    assert_eq!(device.state(), &State::Running);
    assert_eq!(device.board().resets(), 1);

    device.port_mut().take_output();
    device.step().unwrap();
    assert_eq!(device.port_mut().take_output(), "fixed\n");
}
