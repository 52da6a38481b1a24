use super::*;

#[test]
fn test_goto_forward_rescans() {
    let mut r = runtime("goto skip:\nprint 1\nskip:\nprint 2\n");
    assert_eq!(run(&mut r), "2\n");
    let lines: Vec<usize> = r.index().entries().iter().map(|e| e.line_number).collect();
    assert_eq!(lines, vec![1, 3, 4]);
    assert_eq!(r.index().find_by_label("skip"), r.index().find(3));
}

#[test]
fn test_goto_backward_uses_index() {
    let mut r = runtime("i = 0\nagain:\ni = i + 1\nif i < 3 then goto again:\nprint i\n");
    assert_eq!(run(&mut r), "3\n");
    assert_eq!(r.index().len(), 5);
}

#[test]
fn test_gosub_returns_to_next_line() {
    let mut r = runtime("gosub sub:\nprint 2\nend\nsub:\nprint 1\nreturn\n");
    assert_eq!(run(&mut r), "1\n2\n");
    assert_eq!(r.gosub_depth(), 0);
}

#[test]
fn test_gosub_from_if() {
    let mut r = runtime("if 1 then gosub sub: else print 0\nprint 2\nend\nsub:\nprint 1\nreturn\n");
    assert_eq!(run(&mut r), "1\n2\n");
}

#[test]
fn test_undefined_label() {
    let mut r = runtime("print 1\ngoto nowhere:\n");
    assert_eq!(
        run(&mut r),
        "1\n?UNDEFINED LINE IN 2; LABEL nowhere NOT FOUND\n"
    );
}

#[test]
fn test_gosub_stack_exhausted() {
    let mut r = runtime("deep:\ngosub deep:\n");
    assert_eq!(run(&mut r), "?OUT OF MEMORY IN 2; GOSUB STACK EXHAUSTED\n");
    assert_eq!(r.gosub_depth(), 10);
}

#[test]
fn test_return_without_gosub() {
    let mut r = runtime("return\n");
    assert_eq!(run(&mut r), "?RETURN WITHOUT GOSUB IN 1\n");
}

#[test]
fn test_comment_lines_are_not_counted() {
    let mut r = runtime("rem header\nprint 1\n// note\nfoo\n");
    assert_eq!(run(&mut r), "1\n?SYNTAX ERROR IN 2; EXPECTED = FOUND o\n");
}

#[test]
fn test_label_must_end_line() {
    let mut r = runtime("here: print 1\n");
    assert_eq!(run(&mut r), "?SYNTAX ERROR IN 1; EXPECTED END OF LINE FOUND print\n");
}
