pub mod builtin;
pub mod story;
pub mod tree;
