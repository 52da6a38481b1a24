/*!
## Rust Machine Module

This Rust module executes BASIC directly from program text. There is
no compile step: statements are dispatched and expressions evaluated
while the tokens go by.

*/

mod expr;
mod function;
mod index;
mod jump;
mod runtime;
mod stack;
mod statement;
mod val;
mod var;

pub use function::Function;
pub use function::Lcg;
pub use index::Entry;
pub use index::Index;
pub use runtime::Event;
pub use runtime::ForFrame;
pub use runtime::Pin;
pub use runtime::Runtime;
pub use runtime::{PeekFn, PokeFn};
pub use runtime::{FOR_DEPTH, GOSUB_DEPTH, INT_STACK_DEPTH};
pub use stack::Stack;
pub use val::Val;
pub use var::Var;

#[cfg(test)]
mod tests;
