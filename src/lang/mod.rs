/*!
# Redcode Language Module

This Rust module provides lexical analysis and compilation of Redcode
warrior source into a battle-ready champion.

*/

#[macro_use]
mod error;
mod ast;
mod link;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use parse::parse;
