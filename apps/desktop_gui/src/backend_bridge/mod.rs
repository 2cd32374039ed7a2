//! Backend worker: runs analysis requests off the UI thread.

pub mod commands;
pub mod runtime;
