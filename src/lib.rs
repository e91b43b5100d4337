//! oanda-v20 - typed client for the OANDA v20 REST and streaming API

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod lifecycle;
pub mod stream;
pub mod types;

pub use client::Client;
pub use config::{Config, Environment};
pub use error::{Error, Rejection, Result, VariantFamily};
pub use stream::{EventStream, StreamEvent};
pub use types::*;
