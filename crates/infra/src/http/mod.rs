//! HTTP client implementations

pub mod batch_client;
pub mod client;

pub use batch_client::BatchEndpointClient;
pub use client::{HttpClient, HttpClientBuilder};
