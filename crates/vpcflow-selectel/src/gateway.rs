//! Selectel implementation of [`LicenseGateway`]

use crate::client::{AddLicenseRequest, ApiLicense, SelectelClient};
use async_trait::async_trait;
use vpcflow_cloud::{LicenseError, LicenseGateway, LicenseRecord, LicenseStatus, ServerRef};

/// Selectel VPC gateway
pub struct SelectelGateway {
    client: SelectelClient,
}

impl SelectelGateway {
    pub fn new(client: SelectelClient) -> Self {
        Self { client }
    }
}

impl From<ApiLicense> for LicenseRecord {
    fn from(license: ApiLicense) -> Self {
        Self {
            id: license.id_str(),
            project_id: license.project_id,
            region: license.region,
            license_type: license.license_type,
            status: LicenseStatus::from(license.status),
            servers: license
                .servers
                .into_iter()
                .map(|server| ServerRef {
                    id: server.id_str(),
                    name: server.name,
                    status: server.status,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LicenseGateway for SelectelGateway {
    fn name(&self) -> &str {
        "selectel"
    }

    async fn list_licenses(
        &self,
        project_id: Option<&str>,
        detailed: bool,
    ) -> vpcflow_cloud::Result<Vec<LicenseRecord>> {
        let licenses = self.client.list_licenses(detailed).await?;

        Ok(licenses
            .into_iter()
            .filter(|l| project_id.is_none_or(|p| l.project_id == p))
            .map(LicenseRecord::from)
            .collect())
    }

    async fn show_license(
        &self,
        license_id: &str,
        detailed: bool,
    ) -> vpcflow_cloud::Result<LicenseRecord> {
        let license = self.client.get_license(license_id, detailed).await?;
        Ok(license.into())
    }

    async fn create_licenses(
        &self,
        project_id: &str,
        region: &str,
        license_type: &str,
        quantity: u64,
    ) -> vpcflow_cloud::Result<Vec<LicenseRecord>> {
        let request = AddLicenseRequest {
            region: region.to_string(),
            quantity,
            license_type: license_type.to_string(),
        };

        let created = self.client.add_licenses(project_id, vec![request]).await?;
        tracing::debug!(
            "Selectel created {} license(s) in project {}",
            created.len(),
            project_id
        );
        Ok(created.into_iter().map(LicenseRecord::from).collect())
    }

    async fn delete_license(&self, license_id: &str) -> vpcflow_cloud::Result<()> {
        self.client.delete_license(license_id).await?;
        Ok(())
    }

    async fn resolve_project_by_name(&self, name: &str) -> vpcflow_cloud::Result<String> {
        match self.client.find_project(name).await? {
            Some(project) => {
                tracing::debug!("Resolved project {} -> {}", name, project.id);
                Ok(project.id)
            }
            None => Err(LicenseError::ProjectNotFound(name.to_string())),
        }
    }
}
