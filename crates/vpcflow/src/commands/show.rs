use super::Prepared;
use vpcflow_cloud::Invocation;

pub fn prepare(license_id: String, detailed: bool) -> Prepared {
    Prepared::new(
        Invocation {
            license_id: Some(license_id),
            detailed,
            ..Default::default()
        },
        false,
    )
}
