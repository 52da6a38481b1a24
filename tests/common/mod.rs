#![allow(dead_code)]
use basic::mach::{Event, Runtime};

pub fn runtime(program: &str) -> Runtime {
    let mut r = Runtime::default();
    r.init(program).unwrap();
    r
}

pub fn run(program: &str) -> String {
    exec(&mut runtime(program))
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Side effects other than printing are written inline as `<...>`.
pub fn exec_n(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    for _ in 0..cycles {
        match runtime.run() {
            Event::Stopped => return s,
            Event::Running => {}
            Event::Print(ps) => s.push_str(&ps),
            Event::Sleep(d) => s.push_str(&format!("<sleep {}ms>", d.as_millis())),
            Event::Pin(pin, n) => s.push_str(&format!("<{:?} {}>", pin, n)),
            Event::Os(command) => s.push_str(&format!("<os {}>", command)),
            Event::Error(error) => {
                s.push_str(&format!("?{}\n", error));
                return s;
            }
        }
    }
    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
    s
}
