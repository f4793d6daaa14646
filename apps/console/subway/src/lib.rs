// Library exports for testing
// The binary (main.rs) imports these as well

pub mod commands;
pub mod console;
pub mod error;
pub mod logger;
pub mod terminal_view;

#[cfg(test)]
mod tests;
