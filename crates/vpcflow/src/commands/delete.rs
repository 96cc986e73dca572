use super::Prepared;
use vpcflow_cloud::{Invocation, State};

pub fn prepare(license_id: String, check: bool) -> Prepared {
    Prepared::new(
        Invocation {
            state: State::Absent,
            license_id: Some(license_id),
            ..Default::default()
        },
        check,
    )
}
