//! Daytimer Network Library
//!
//! Client for the external document generation service that turns report
//! text into a PDF.
//!
//! # Usage
//!
//! ```ignore
//! let client = GammaClient::new(api_url, api_key)?;
//! let request = GenerationRequest::new(report_text, &options);
//! let generation_id = client.submit(&request).await?;
//!
//! // Later
//! let status = client.poll_status(&generation_id).await?;
//! ```

pub mod client;
pub mod error;
pub mod protocol;

pub use client::GammaClient;
pub use error::{Error, Result};
pub use protocol::{GenerationCreated, GenerationRequest, RenderOptions};
