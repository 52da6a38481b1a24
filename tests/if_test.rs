mod common;
use common::*;

#[test]
fn test_if_then_else() {
    assert_eq!(run("if 5<7 then print 111 else print 0\n"), "111\n");
    assert_eq!(run("if 7<5 then print 111 else print 0\n"), "0\n");
}

#[test]
fn test_if_without_else() {
    assert_eq!(run("if 0 then print 1\nprint 2\n"), "2\n");
    assert_eq!(run("a = 3\nif a = 3 then print \"yes\"\n"), "yes\n");
}

#[test]
fn test_if_then_goto() {
    let program = "if 1 then goto done:\nprint 1\ndone:\nprint 2\n";
    assert_eq!(run(program), "2\n");
}

#[test]
fn test_else_goto() {
    let program = "if 0 then print 1 else goto x:\nprint 2\nx:\nprint 3\n";
    assert_eq!(run(program), "3\n");
}

#[test]
fn test_if_needs_then() {
    assert_eq!(
        run("if 1 print 1\n"),
        "?SYNTAX ERROR IN 1; EXPECTED then FOUND print\n"
    );
}
