#![allow(non_snake_case)]

pub mod api;
pub mod auth;
pub mod error;

pub use api::ApiClient;
pub use auth::{AuthClient, SignInOutcome};
pub use error::ClientError;
pub use reqwest;
