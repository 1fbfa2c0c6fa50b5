//! Low-level lexical layer: ASCII constants, character classes and the
//! token productions shared by the address grammar.

pub mod ascii;
pub mod classes;
pub mod quoted;
pub mod whitespace;
pub mod words;
