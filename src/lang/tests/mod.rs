use super::token::*;
use super::*;
use std::rc::Rc;


fn lexer(s: &str) -> Lexer {
    match Lexer::new(Rc::from(s.as_bytes())) {
        Ok(lexer) => lexer,
        Err(e) => panic!("{}", e),
    }
}

fn tokens(s: &str) -> Vec<Token> {
    let mut lexer = lexer(s);
    let mut v = vec![];
    while !lexer.finished() {
        v.push(lexer.token().clone());
        lexer.advance().unwrap();
    }
    v
}

fn lex_error(s: &str) -> Error {
    let mut lexer = match Lexer::new(Rc::from(s.as_bytes())) {
        Ok(lexer) => lexer,
        Err(e) => return e,
    };
    loop {
        if lexer.finished() {
            panic!("no error lexing {:?}", s);
        }
        if let Err(e) = lexer.advance() {
            return e;
        }
    }
}
