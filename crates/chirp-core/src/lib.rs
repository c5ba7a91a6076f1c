pub mod config;
pub mod corpus;
pub mod cursor;
pub mod error;
pub mod io;
pub mod parse;
pub mod phrase;
pub mod publisher;
pub mod sequential;
pub mod store;
pub mod template;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{ChirpError, Result};
