use std::ops::Range;

/// ## Lexical units
///
/// A token carries its decoded payload so the evaluator never has to
/// go back to the source bytes, except for string literals and labels
/// which keep their byte range into the program.

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    EndOfInput,
    Error,
    Cr,
    Literal(Literal),
    Ident(Ident),
    Label(Range<usize>),
    Word(Word),
    Function(Function),
    Operator(Operator),
    Comma,
    Semicolon,
    Hash,
    LParen,
    RParen,
}

impl Token {
    pub fn from_char(ch: u8) -> Option<Token> {
        use Operator::*;
        Some(match ch {
            b'\n' => Token::Cr,
            b',' => Token::Comma,
            b';' => Token::Semicolon,
            b'#' => Token::Hash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'+' => Token::Operator(Plus),
            b'-' => Token::Operator(Minus),
            b'&' => Token::Operator(And),
            b'|' => Token::Operator(Or),
            b'*' => Token::Operator(Multiply),
            b'/' => Token::Operator(Divide),
            b'%' => Token::Operator(Modulo),
            b'<' => Token::Operator(Less),
            b'>' => Token::Operator(Greater),
            b'=' => Token::Operator(Equal),
            _ => return None,
        })
    }

    /// Ends a statement. `else` is included so an embedded statement
    /// can stop in front of it.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Token::Cr | Token::EndOfInput | Token::Word(Word::Else)
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            EndOfInput => write!(f, "END OF INPUT"),
            Error => write!(f, "?"),
            Cr => write!(f, "NEWLINE"),
            Literal(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Label(r) => write!(f, "LABEL@{}", r.start),
            Word(s) => write!(f, "{}", s),
            Function(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            Hash => write!(f, "#"),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(i32),
    Float(f64),
    String(Range<usize>),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            Float(n) => write!(f, "{}", n),
            String(r) => write!(f, "STRING@{}", r.start),
        }
    }
}

/// Variable reference: the bank is the variant, the payload is the
/// slot number `letter - 'a'`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Ident {
    Integer(usize),
    Float(usize),
    String(usize),
}

impl Ident {
    pub fn slot(&self) -> usize {
        match self {
            Ident::Integer(n) | Ident::Float(n) | Ident::String(n) => *n,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Ident::*;
        let letter = |n: &usize| (b'a' + *n as u8) as char;
        match self {
            Integer(n) => write!(f, "{}", letter(n)),
            Float(n) => write!(f, "{}#", letter(n)),
            String(n) => write!(f, "{}$", letter(n)),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Let,
    Print,
    If,
    Then,
    Else,
    For,
    To,
    Next,
    Goto,
    Gosub,
    Return,
    Call,
    Rem,
    Peek,
    Poke,
    End,
    Delay,
    Sleep,
    Randomize,
    Push,
    Pop,
    Os,
    GpioInit,
    GpioDirIn,
    GpioDirOut,
    GpioOn,
    GpioOff,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Function {
    Zero,
    Not,
    Randint,
    Time,
    Rnd,
    Abs,
    Atn,
    Cos,
    Exp,
    Log,
    Sin,
    Sqr,
    Tan,
    Len,
}

impl Function {
    pub fn is_integer(&self) -> bool {
        use Function::*;
        matches!(self, Zero | Not | Randint | Time)
    }
    pub fn is_float(&self) -> bool {
        use Function::*;
        matches!(self, Rnd | Abs | Atn | Cos | Exp | Log | Sin | Sqr | Tan)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    And,
    Or,
    Multiply,
    Divide,
    Modulo,
    Less,
    Greater,
    Equal,
}

/// Every keyword the lexer recognizes. Lookup takes the longest entry
/// that prefixes the input.
pub const KEYWORDS: &[(&str, Token)] = &[
    ("let", Token::Word(Word::Let)),
    ("print", Token::Word(Word::Print)),
    ("if", Token::Word(Word::If)),
    ("then", Token::Word(Word::Then)),
    ("else", Token::Word(Word::Else)),
    ("for", Token::Word(Word::For)),
    ("to", Token::Word(Word::To)),
    ("next", Token::Word(Word::Next)),
    ("goto", Token::Word(Word::Goto)),
    ("gosub", Token::Word(Word::Gosub)),
    ("return", Token::Word(Word::Return)),
    ("call", Token::Word(Word::Call)),
    ("rem", Token::Word(Word::Rem)),
    ("peek", Token::Word(Word::Peek)),
    ("poke", Token::Word(Word::Poke)),
    ("end", Token::Word(Word::End)),
    ("delay", Token::Word(Word::Delay)),
    ("sleep", Token::Word(Word::Sleep)),
    ("zero", Token::Function(Function::Zero)),
    ("not", Token::Function(Function::Not)),
    ("randomize", Token::Word(Word::Randomize)),
    ("randint", Token::Function(Function::Randint)),
    ("rnd", Token::Function(Function::Rnd)),
    ("time", Token::Function(Function::Time)),
    ("push", Token::Word(Word::Push)),
    ("pop", Token::Word(Word::Pop)),
    ("abs", Token::Function(Function::Abs)),
    ("atn", Token::Function(Function::Atn)),
    ("cos", Token::Function(Function::Cos)),
    ("exp", Token::Function(Function::Exp)),
    ("log", Token::Function(Function::Log)),
    ("tan", Token::Function(Function::Tan)),
    ("sin", Token::Function(Function::Sin)),
    ("sqr", Token::Function(Function::Sqr)),
    ("len", Token::Function(Function::Len)),
    ("os", Token::Word(Word::Os)),
    ("gpioinit", Token::Word(Word::GpioInit)),
    ("gpiodirin", Token::Word(Word::GpioDirIn)),
    ("gpiodirout", Token::Word(Word::GpioDirOut)),
    ("gpioon", Token::Word(Word::GpioOn)),
    ("gpiooff", Token::Word(Word::GpioOff)),
    ("//", Token::Word(Word::Rem)),
];

fn keyword_text(token: &Token) -> &'static str {
    KEYWORDS
        .iter()
        .find(|(_, t)| t == token)
        .map(|(s, _)| *s)
        .unwrap_or("?")
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", keyword_text(&Token::Word(*self)))
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", keyword_text(&Token::Function(*self)))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        let s = match self {
            Plus => "+",
            Minus => "-",
            And => "&",
            Or => "|",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Less => "<",
            Greater => ">",
            Equal => "=",
        };
        write!(f, "{}", s)
    }
}
