//! Selectel VPC gateway for vpcflow
//!
//! This crate implements the [`vpcflow_cloud::LicenseGateway`] trait on top of
//! the Selectel VPC resell API (v2).
//!
//! # Requirements
//!
//! - An API token (`SEL_TOKEN`), sent as the `X-token` header
//! - Optionally an API base URL (`SEL_URL`), defaults to [`DEFAULT_BASE_URL`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use vpcflow_cloud::LicenseGateway;
//! use vpcflow_selectel::{SelectelClient, SelectelGateway, DEFAULT_BASE_URL};
//!
//! let client = SelectelClient::new(DEFAULT_BASE_URL, token, Duration::from_secs(30))?;
//! let gateway = SelectelGateway::new(client);
//!
//! let licenses = gateway.list_licenses(None, true).await?;
//! ```

pub mod client;
pub mod error;
pub mod gateway;

pub use client::{
    AddLicenseRequest, ApiLicense, ApiProject, ApiServer, DEFAULT_BASE_URL, SelectelClient,
};
pub use error::{Result, SelectelError};
pub use gateway::SelectelGateway;
