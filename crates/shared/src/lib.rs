//! Wire protocol and domain types shared by the analyzer client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
