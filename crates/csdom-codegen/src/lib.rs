pub mod ast;
pub mod error;
pub mod generator;

pub use ast::*;
pub use error::{GenError, Result};
pub use generator::{escape_string, CSharpGenerator};
