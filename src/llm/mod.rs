pub mod backend;
pub mod client;
pub mod parse;
pub mod prompts;

pub use backend::*;
pub use client::*;
pub use parse::*;
pub use prompts::*;
