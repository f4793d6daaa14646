mod console;
mod error;
mod logger;
mod terminal_view;
