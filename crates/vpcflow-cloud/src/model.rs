//! License data model
//!
//! Desired state is expressed as [`LicenseRequirement`]s, actual state as
//! [`LicenseRecord`]s reported by the provider. Both collapse into counts per
//! [`LicenseKey`] before reconciliation.

use crate::error::{LicenseError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Counts per (region, type) key
pub type LicenseCounts = BTreeMap<LicenseKey, u64>;

/// (region, type) pair identifying a kind of license
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LicenseKey {
    pub region: String,
    #[serde(rename = "type")]
    pub license_type: String,
}

impl LicenseKey {
    pub fn new(region: impl Into<String>, license_type: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            license_type: license_type.into(),
        }
    }
}

impl std::fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.region, self.license_type)
    }
}

/// Desired quantity of one license type in one region
///
/// `quantity` is signed so that negative operator input can be rejected by
/// [`validate_requirements`] instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRequirement {
    pub region: String,
    #[serde(rename = "type")]
    pub license_type: String,
    pub quantity: i64,
}

impl LicenseRequirement {
    pub fn new(region: impl Into<String>, license_type: impl Into<String>, quantity: i64) -> Self {
        Self {
            region: region.into(),
            license_type: license_type.into(),
            quantity,
        }
    }

    pub fn key(&self) -> LicenseKey {
        LicenseKey::new(&self.region, &self.license_type)
    }
}

/// Reject any requirement with a negative quantity
pub fn validate_requirements(requirements: &[LicenseRequirement]) -> Result<()> {
    match requirements.iter().find(|r| r.quantity < 0) {
        Some(invalid) => Err(LicenseError::InvalidQuantity {
            key: invalid.key(),
            quantity: invalid.quantity,
        }),
        None => Ok(()),
    }
}

/// Collapse requirements into desired counts, summing duplicate keys
pub fn desired_counts(requirements: &[LicenseRequirement]) -> Result<LicenseCounts> {
    validate_requirements(requirements)?;

    let mut counts = LicenseCounts::new();
    for requirement in requirements {
        let key = requirement.key();
        let total = counts.entry(key.clone()).or_insert(0);
        *total = total
            .checked_add(requirement.quantity as u64)
            .ok_or(LicenseError::QuantityOverflow { key })?;
    }
    Ok(counts)
}

/// Provider-reported status of a license
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseStatus {
    Active,
    Other(String),
}

impl LicenseStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, LicenseStatus::Active)
    }
}

impl From<String> for LicenseStatus {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("ACTIVE") {
            LicenseStatus::Active
        } else {
            LicenseStatus::Other(value)
        }
    }
}

impl From<LicenseStatus> for String {
    fn from(status: LicenseStatus) -> Self {
        match status {
            LicenseStatus::Active => "ACTIVE".to_string(),
            LicenseStatus::Other(value) => value,
        }
    }
}

impl std::fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseStatus::Active => write!(f, "ACTIVE"),
            LicenseStatus::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Server a license is attached to (detailed listings only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A single provisioned license unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub id: String,
    pub project_id: String,
    pub region: String,
    #[serde(rename = "type")]
    pub license_type: String,
    pub status: LicenseStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerRef>,
}

impl LicenseRecord {
    pub fn key(&self) -> LicenseKey {
        LicenseKey::new(&self.region, &self.license_type)
    }
}

/// Records of one project grouped by key
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    groups: BTreeMap<LicenseKey, Vec<LicenseRecord>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the records that belong to `project_id`; others are ignored
    pub fn for_project(project_id: &str, records: impl IntoIterator<Item = LicenseRecord>) -> Self {
        let mut inventory = Self::new();
        for record in records {
            if record.project_id == project_id {
                inventory.add(record);
            }
        }
        inventory
    }

    pub fn add(&mut self, record: LicenseRecord) {
        self.groups.entry(record.key()).or_default().push(record);
    }

    pub fn count(&self, key: &LicenseKey) -> u64 {
        self.groups.get(key).map_or(0, |records| records.len() as u64)
    }

    pub fn active_count(&self, key: &LicenseKey) -> usize {
        self.records(key).iter().filter(|r| r.status.is_active()).count()
    }

    pub fn has_active(&self, key: &LicenseKey) -> bool {
        self.active_count(key) > 0
    }

    pub fn records(&self, key: &LicenseKey) -> &[LicenseRecord] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &LicenseKey> {
        self.groups.keys()
    }

    pub fn counts(&self) -> LicenseCounts {
        self.groups
            .iter()
            .map(|(key, records)| (key.clone(), records.len() as u64))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Pick `quantity` records of `key` to delete
    ///
    /// Non-ACTIVE records go first, ties broken by id.
    pub fn select_for_deletion(&self, key: &LicenseKey, quantity: u64) -> Vec<&LicenseRecord> {
        let mut candidates: Vec<&LicenseRecord> = self.records(key).iter().collect();
        candidates.sort_by(|a, b| {
            a.status
                .is_active()
                .cmp(&b.status.is_active())
                .then_with(|| a.id.cmp(&b.id))
        });
        candidates.truncate(quantity as usize);
        candidates
    }
}

/// Serialize a count map as a list of `{region, type, quantity}` entries
///
/// JSON object keys must be strings, so the struct key is flattened.
pub(crate) fn serialize_counts<S>(
    counts: &LicenseCounts,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    #[derive(Serialize)]
    struct Entry<'a> {
        region: &'a str,
        #[serde(rename = "type")]
        license_type: &'a str,
        quantity: u64,
    }

    serializer.collect_seq(counts.iter().map(|(key, quantity)| Entry {
        region: &key.region,
        license_type: &key.license_type,
        quantity: *quantity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, project: &str, region: &str, status: &str) -> LicenseRecord {
        LicenseRecord {
            id: id.to_string(),
            project_id: project.to_string(),
            region: region.to_string(),
            license_type: "office".to_string(),
            status: LicenseStatus::from(status.to_string()),
            servers: Vec::new(),
        }
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let requirements = vec![
            LicenseRequirement::new("ru-1", "office", 1),
            LicenseRequirement::new("ru-2", "office", -1),
        ];

        match validate_requirements(&requirements) {
            Err(LicenseError::InvalidQuantity { key, quantity }) => {
                assert_eq!(key, LicenseKey::new("ru-2", "office"));
                assert_eq!(quantity, -1);
            }
            other => panic!("Expected InvalidQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_desired_counts_sums_duplicates() {
        let requirements = vec![
            LicenseRequirement::new("ru-1", "office", 1),
            LicenseRequirement::new("ru-1", "office", 2),
            LicenseRequirement::new("ru-2", "office", 0),
        ];

        let counts = desired_counts(&requirements).unwrap();
        assert_eq!(counts.get(&LicenseKey::new("ru-1", "office")), Some(&3));
        assert_eq!(counts.get(&LicenseKey::new("ru-2", "office")), Some(&0));
    }

    #[test]
    fn test_desired_counts_overflow_rejected() {
        let requirements = vec![LicenseRequirement::new("ru-1", "office", i64::MAX); 3];

        match desired_counts(&requirements) {
            Err(LicenseError::QuantityOverflow { key }) => {
                assert_eq!(key, LicenseKey::new("ru-1", "office"));
            }
            other => panic!("Expected QuantityOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_status_from_provider_string() {
        assert!(LicenseStatus::from("ACTIVE".to_string()).is_active());
        assert_eq!(
            LicenseStatus::from("DOWN".to_string()),
            LicenseStatus::Other("DOWN".to_string())
        );
        assert_eq!(String::from(LicenseStatus::Active), "ACTIVE");
    }

    #[test]
    fn test_record_deserialize() {
        let json = serde_json::json!({
            "id": "42",
            "project_id": "p1",
            "region": "ru-1",
            "type": "license_windows_2012_standard",
            "status": "ACTIVE"
        });

        let record: LicenseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.license_type, "license_windows_2012_standard");
        assert!(record.status.is_active());
        assert!(record.servers.is_empty());
    }

    #[test]
    fn test_inventory_filters_project() {
        let inventory = Inventory::for_project(
            "p1",
            vec![
                record("1", "p1", "ru-1", "ACTIVE"),
                record("2", "p1", "ru-1", "DOWN"),
                record("3", "p2", "ru-1", "ACTIVE"),
            ],
        );

        let key = LicenseKey::new("ru-1", "office");
        assert_eq!(inventory.count(&key), 2);
        assert_eq!(inventory.active_count(&key), 1);
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_select_for_deletion_prefers_inactive() {
        let inventory = Inventory::for_project(
            "p1",
            vec![
                record("1", "p1", "ru-1", "ACTIVE"),
                record("3", "p1", "ru-1", "DOWN"),
                record("2", "p1", "ru-1", "DOWN"),
            ],
        );

        let key = LicenseKey::new("ru-1", "office");
        let ids: Vec<&str> = inventory
            .select_for_deletion(&key, 2)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3"]);

        let all = inventory.select_for_deletion(&key, 5);
        assert_eq!(all.len(), 3);
    }
}
