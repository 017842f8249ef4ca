pub mod quote;
pub mod tokenize;
pub mod types;

pub use quote::{quote_arg, quote_line, shell_join};
pub use tokenize::parse;
pub use types::{Argument, Line, Segment};
