use async_trait::async_trait;
use std::sync::Mutex;
use vpcflow_cloud::{LicenseError, LicenseGateway, LicenseRecord, LicenseStatus, Result};

/// In-memory gateway recording every call it receives
pub struct FakeGateway {
    projects: Vec<(String, String)>,
    licenses: Mutex<Vec<LicenseRecord>>,
    calls: Mutex<Vec<String>>,
    next_id: Mutex<u64>,
    /// Call (as recorded by [`FakeGateway::calls`]) that fails with a provider error
    pub fail_on: Option<String>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            projects: vec![("p1".to_string(), "staging".to_string())],
            licenses: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(100),
            fail_on: None,
        }
    }

    pub fn with_license(self, id: &str, project: &str, region: &str, status: &str) -> Self {
        self.licenses.lock().unwrap().push(LicenseRecord {
            id: id.to_string(),
            project_id: project.to_string(),
            region: region.to_string(),
            license_type: "office".to_string(),
            status: LicenseStatus::from(status.to_string()),
            servers: Vec::new(),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("create") || c.starts_with("delete"))
            .collect()
    }

    pub fn license_ids(&self) -> Vec<String> {
        self.licenses
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.id.clone())
            .collect()
    }

    fn record(&self, call: String) -> Result<()> {
        let fails = self.fail_on.as_deref() == Some(call.as_str());
        self.calls.lock().unwrap().push(call);
        if fails {
            return Err(LicenseError::Provider("quota exceeded".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LicenseGateway for FakeGateway {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_licenses(
        &self,
        project_id: Option<&str>,
        detailed: bool,
    ) -> Result<Vec<LicenseRecord>> {
        let suffix = if detailed { " detailed" } else { "" };
        self.record(format!("list {}{}", project_id.unwrap_or("*"), suffix))?;
        Ok(self
            .licenses
            .lock()
            .unwrap()
            .iter()
            .filter(|l| project_id.is_none_or(|p| l.project_id == p))
            .cloned()
            .collect())
    }

    async fn show_license(&self, license_id: &str, _detailed: bool) -> Result<LicenseRecord> {
        self.record(format!("show {}", license_id))?;
        self.licenses
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == license_id)
            .cloned()
            .ok_or_else(|| LicenseError::NotFound(license_id.to_string()))
    }

    async fn create_licenses(
        &self,
        project_id: &str,
        region: &str,
        license_type: &str,
        quantity: u64,
    ) -> Result<Vec<LicenseRecord>> {
        self.record(format!("create {} {}/{} {}", project_id, region, license_type, quantity))?;

        let mut created = Vec::new();
        for _ in 0..quantity {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            created.push(LicenseRecord {
                id: next_id.to_string(),
                project_id: project_id.to_string(),
                region: region.to_string(),
                license_type: license_type.to_string(),
                status: LicenseStatus::Other("DOWN".to_string()),
                servers: Vec::new(),
            });
        }
        self.licenses.lock().unwrap().extend(created.clone());
        Ok(created)
    }

    async fn delete_license(&self, license_id: &str) -> Result<()> {
        self.record(format!("delete {}", license_id))?;
        let mut licenses = self.licenses.lock().unwrap();
        let before = licenses.len();
        licenses.retain(|l| l.id != license_id);
        if licenses.len() == before {
            return Err(LicenseError::NotFound(license_id.to_string()));
        }
        Ok(())
    }

    async fn resolve_project_by_name(&self, name: &str) -> Result<String> {
        self.record(format!("resolve {}", name))?;
        self.projects
            .iter()
            .find(|(_, n)| n == name)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| LicenseError::ProjectNotFound(name.to_string()))
    }
}
