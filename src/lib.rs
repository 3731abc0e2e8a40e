//! sonar-opendata library
//!
//! This crate provides the core functionality for the `sonar-opendata` binary.
//!
//! ## Overview
//!
//! The Rapid7 Open Data portal has no API key; its Sonar DNS files sit behind a federated
//! SSO login. The library drives that login and reads the file listing:
//!
//! - [`handshake`] - The six-step login and discovery sequence
//! - [`markup`] - Link and SAML form-field extraction from HTML pages
//! - [`session`] - HTTP transport and the cookie-carrying session
//! - [`config`] - Sectioned TOML settings and credentials
//! - [`jobs`] - Job-status records updated around a discovery run
//! - [`models`] - List kinds, file categories and discovery results
//! - [`cli`] - Command-line interface
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use sonar_opendata::config::{Credentials, Settings};
//! use sonar_opendata::errors::AppResult;
//! use sonar_opendata::handshake::Handshake;
//! use sonar_opendata::models::ListKind;
//! use std::path::Path;
//!
//! # async fn example() -> AppResult<()> {
//! let settings = Settings::from_toml_file(Path::new("connector.toml"))?;
//! let credentials = Credentials::from_settings(&settings);
//!
//! let handshake = Handshake::connect(credentials, settings.request_timeout())?;
//! let result = handshake.discover_files(ListKind::ReverseDns).await?;
//! if let Some(url) = result.rdns_url() {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod handshake;
pub mod jobs;
pub mod logging;
pub mod markup;
pub mod models;
pub mod session;
