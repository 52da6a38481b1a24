use crate::mach::{Event, Runtime};

mod jump_test;

fn runtime(program: &str) -> Runtime {
    let mut r = Runtime::default();
    r.init(program).unwrap();
    r
}

fn run(runtime: &mut Runtime) -> String {
    run_cycles(runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    for _ in 0..cycles {
        match runtime.run() {
            Event::Stopped => return s,
            Event::Print(ps) => s.push_str(&ps),
            Event::Error(error) => {
                s.push_str(&format!("?{}\n", error));
                return s;
            }
            _ => {}
        }
    }
    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
    s
}
