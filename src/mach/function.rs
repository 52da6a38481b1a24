use crate::error;
use crate::lang::token::Function as Name;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_SEED: u32 = 123_456_789;

/// ## Linear congruential generator
///
/// Shared by `randint` and `rnd`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lcg {
    seed: u32,
}

impl Default for Lcg {
    fn default() -> Lcg {
        Lcg { seed: DEFAULT_SEED }
    }
}

impl Lcg {
    pub fn seed(&mut self, seed: u32) {
        self.seed = seed;
    }

    pub fn next_int(&mut self) -> i32 {
        self.seed = self.seed.wrapping_mul(69069).wrapping_add(362_437);
        (self.seed as i32).saturating_abs()
    }

    pub fn next_float(&mut self) -> f64 {
        self.next_int() as f64 / i32::max_value() as f64
    }
}

/// ## Built-in functions

pub struct Function {}

impl Function {
    pub fn integer(name: Name, arg: i32, rng: &mut Lcg) -> Result<i32> {
        use Name::*;
        match name {
            Zero => Ok(0),
            Not => Ok((arg == 0) as i32),
            Randint => Ok(rng.next_int()),
            Time => Ok(chrono::Utc::now().timestamp() as i32),
            _ => Err(error!(InternalError; "NOT AN INTEGER FUNCTION")),
        }
    }

    pub fn float(name: Name, arg: f64, rng: &mut Lcg) -> Result<f64> {
        use Name::*;
        match name {
            Rnd => Ok(rng.next_float()),
            Abs => Ok(arg.abs()),
            Atn => Ok(arg.atan()),
            Cos => Ok(arg.cos()),
            Exp => Ok(arg.exp()),
            Log => Ok(arg.ln()),
            Sin => Ok(arg.sin()),
            Sqr => Ok(arg.sqrt()),
            Tan => Ok(arg.tan()),
            _ => Err(error!(InternalError; "NOT A FLOAT FUNCTION")),
        }
    }

    /// `len` gives the byte length written out as decimal text so it can
    /// take part in a string expression.
    pub fn string(name: Name, arg: &[u8]) -> Result<Vec<u8>> {
        match name {
            Name::Len => Ok(arg.len().to_string().into_bytes()),
            _ => Err(error!(InternalError; "NOT A STRING FUNCTION")),
        }
    }
}
