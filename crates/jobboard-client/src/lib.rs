//! Typed gateway to the job-board REST API.
//!
//! [`Gateway`] is the contract the view controllers are written against;
//! [`HttpGateway`] implements it over `reqwest`.

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;

pub use auth::AccessToken;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use gateway::{Gateway, ResumeUpload};
pub use http::HttpGateway;
