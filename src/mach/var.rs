use super::Val;
use crate::error;
use crate::lang::token::Ident;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub const VAR_SLOTS: usize = 26;

/// ## Variable memory
///
/// Three banks of 26 slots, one per letter. String slots own their
/// buffer outright; storing drops whatever the slot held before.

#[derive(Debug, Default)]
pub struct Var {
    integers: [i32; VAR_SLOTS],
    floats: [f64; VAR_SLOTS],
    strings: [Option<Vec<u8>>; VAR_SLOTS],
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.integers = [0; VAR_SLOTS];
        self.floats = [0.0; VAR_SLOTS];
        for s in self.strings.iter_mut() {
            *s = None;
        }
    }

    pub fn integer(&self, slot: usize) -> i32 {
        self.integers.get(slot).copied().unwrap_or_default()
    }

    pub fn float(&self, slot: usize) -> f64 {
        self.floats.get(slot).copied().unwrap_or_default()
    }

    /// Unset slots read as the empty string.
    pub fn string(&self, slot: usize) -> &[u8] {
        match self.strings.get(slot) {
            Some(Some(s)) => s,
            _ => &[],
        }
    }

    pub fn is_set(&self, slot: usize) -> bool {
        matches!(self.strings.get(slot), Some(Some(_)))
    }

    pub fn store_integer(&mut self, slot: usize, value: i32) {
        if let Some(v) = self.integers.get_mut(slot) {
            *v = value;
        }
    }

    pub fn store_float(&mut self, slot: usize, value: f64) {
        if let Some(v) = self.floats.get_mut(slot) {
            *v = value;
        }
    }

    pub fn store_string(&mut self, slot: usize, value: Vec<u8>) {
        if let Some(v) = self.strings.get_mut(slot) {
            v.take();
            *v = Some(value);
        }
    }

    pub fn fetch(&self, ident: &Ident) -> Val {
        match ident {
            Ident::Integer(n) => Val::Integer(self.integer(*n)),
            Ident::Float(n) => Val::Float(self.float(*n)),
            Ident::String(n) => Val::String(self.string(*n).to_vec()),
        }
    }

    pub fn store(&mut self, ident: &Ident, value: Val) -> Result<()> {
        match (ident, value) {
            (Ident::Integer(n), Val::Integer(v)) => self.store_integer(*n, v),
            (Ident::Integer(n), Val::Float(v)) => self.store_integer(*n, v as i32),
            (Ident::Float(n), Val::Float(v)) => self.store_float(*n, v),
            (Ident::Float(n), Val::Integer(v)) => self.store_float(*n, v as f64),
            (Ident::String(n), Val::String(v)) => self.store_string(*n, v),
            (_, _) => return Err(error!(SyntaxError; "TYPE MISMATCH")),
        }
        Ok(())
    }
}
