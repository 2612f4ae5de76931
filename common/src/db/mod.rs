pub mod core;
pub mod parser;
pub mod writer;
