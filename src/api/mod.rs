pub mod todos;

pub use todos::config;
