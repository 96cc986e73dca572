//! Selectel VPC resell API client
//!
//! Direct API implementation for the license and project endpoints.
//! Authenticates with the `X-token` header.

use crate::error::{Result, SelectelError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.selectel.ru/vpc/resell";
const API_VERSION: &str = "v2";
const TOKEN_HEADER: &str = "X-token";

/// Selectel resell API client
pub struct SelectelClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for SelectelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectelClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl SelectelClient {
    /// Create a client; an empty token is rejected up front
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SelectelError::MissingToken);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path)
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, request: reqwest::RequestBuilder, resource: &str) -> Result<String> {
        let response = request.header(TOKEN_HEADER, &self.token).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SelectelError::NotFound(resource.to_string()));
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(SelectelError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        let body = self.execute(request, resource).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// List all licenses visible to the token
    pub async fn list_licenses(&self, detailed: bool) -> Result<Vec<ApiLicense>> {
        let url = self.url("licenses");
        tracing::debug!("GET {} (detailed={})", url, detailed);

        let request = self
            .client
            .get(&url)
            .query(&[("detailed", detailed.to_string())]);
        let response: LicensesEnvelope = self.get_json(request, "licenses").await?;
        Ok(response.licenses)
    }

    /// Get a license by id
    pub async fn get_license(&self, license_id: &str, detailed: bool) -> Result<ApiLicense> {
        let url = self.url(&format!("licenses/{}", license_id));
        tracing::debug!("GET {}", url);

        let request = self
            .client
            .get(&url)
            .query(&[("detailed", detailed.to_string())]);
        let response: LicenseEnvelope = self.get_json(request, license_id).await?;
        Ok(response.license)
    }

    /// Add licenses to a project
    pub async fn add_licenses(
        &self,
        project_id: &str,
        licenses: Vec<AddLicenseRequest>,
    ) -> Result<Vec<ApiLicense>> {
        let url = self.url(&format!("projects/{}/licenses", project_id));
        tracing::debug!("POST {} ({} entries)", url, licenses.len());

        let request = self
            .client
            .post(&url)
            .json(&AddLicensesBody { licenses });
        let response: LicensesEnvelope = self.get_json(request, project_id).await?;
        Ok(response.licenses)
    }

    /// Delete a license
    pub async fn delete_license(&self, license_id: &str) -> Result<()> {
        let url = self.url(&format!("licenses/{}", license_id));
        tracing::debug!("DELETE {}", url);

        self.execute(self.client.delete(&url), license_id).await?;
        Ok(())
    }

    /// List all projects
    pub async fn list_projects(&self) -> Result<Vec<ApiProject>> {
        let url = self.url("projects");
        tracing::debug!("GET {}", url);

        let response: ProjectsEnvelope = self
            .get_json(self.client.get(&url), "projects")
            .await?;
        Ok(response.projects)
    }

    /// Find a project by exact name
    pub async fn find_project(&self, name: &str) -> Result<Option<ApiProject>> {
        let projects = self.list_projects().await?;
        Ok(projects.into_iter().find(|p| p.name == name))
    }
}

/// Pull a human readable message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|e| e.error.or(e.message))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

/// Render a JSON id (number or string) as a string
fn id_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicensesEnvelope {
    #[serde(default)]
    licenses: Vec<ApiLicense>,
}

#[derive(Debug, Deserialize)]
struct LicenseEnvelope {
    license: ApiLicense,
}

#[derive(Debug, Deserialize)]
struct ProjectsEnvelope {
    #[serde(default)]
    projects: Vec<ApiProject>,
}

#[derive(Debug, Serialize)]
struct AddLicensesBody {
    licenses: Vec<AddLicenseRequest>,
}

/// One entry of an add-licenses request
#[derive(Debug, Clone, Serialize)]
pub struct AddLicenseRequest {
    pub region: String,
    pub quantity: u64,
    #[serde(rename = "type")]
    pub license_type: String,
}

/// License as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiLicense {
    pub id: serde_json::Value,
    pub project_id: String,
    pub region: String,
    #[serde(rename = "type")]
    pub license_type: String,
    pub status: String,
    #[serde(default)]
    pub servers: Vec<ApiServer>,
}

impl ApiLicense {
    pub fn id_str(&self) -> String {
        id_string(&self.id)
    }
}

/// Server attached to a license
#[derive(Debug, Clone, Deserialize)]
pub struct ApiServer {
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiServer {
    pub fn id_str(&self) -> String {
        id_string(&self.id)
    }
}

/// Project as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProject {
    pub id: String,
    pub name: String,
}
