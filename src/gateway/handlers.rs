//! HTTP handlers, one submodule per resource

mod account;
mod entry;
mod health;
mod transfer;

pub use account::*;
pub use entry::*;
pub use health::*;
pub use transfer::*;
