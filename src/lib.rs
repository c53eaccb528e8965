pub mod command;
pub mod config;
pub mod debugger;
pub mod error;
pub mod event;
pub mod log;
pub mod output;
pub mod protocol;
pub mod session;
pub mod source;
pub mod symbol;
pub mod thread;
