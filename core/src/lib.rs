//! Core of the daily quote app: quote models, the durable favorites store,
//! quote selection, the remote quote provider and the share adapter.

pub mod badge;
pub mod corpus;
pub mod error;
pub mod models;
pub mod remote;
pub mod selection;
pub mod share;
pub mod storage;

pub use error::{Error, Result};
