mod common;
use common::*;

#[test]
fn test_fn_not_zero() {
    assert_eq!(run("print not(0), not(5), zero()\n"), "1 0 0\n");
}

#[test]
fn test_fn_len() {
    assert_eq!(run("print len(\"hello\")\n"), "5\n");
    assert_eq!(run("a$ = \"\"\nprint len(a$)\n"), "0\n");
}

#[test]
fn test_fn_float() {
    assert_eq!(run("print sqr(16.0)\n"), "4.0\n");
    assert_eq!(run("print abs(-2.5)\n"), "2.5\n");
    assert_eq!(run("print cos(0.0)\n"), "1.0\n");
}

#[test]
fn test_fn_time() {
    assert_eq!(run("a = time()\nif a > 1600000000 then print \"ok\"\n"), "ok\n");
}

#[test]
fn test_randint_sequence() {
    let program = "print randint()\nprint randint()\n";
    assert_eq!(run(program), "1527239318\n496027619\n");
    assert_eq!(run("randomize 1\nprint randint(), randint()\n"), "431506 260720721\n");
}

#[test]
fn test_seed_resets_on_init() {
    let mut r = runtime("print randint()\n");
    let first = exec(&mut r);
    r.init("print randint()\n").unwrap();
    assert_eq!(exec(&mut r), first);
}
