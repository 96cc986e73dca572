use super::Prepared;
use vpcflow_cloud::Invocation;

pub fn prepare(detailed: bool) -> Prepared {
    Prepared::new(
        Invocation {
            list: true,
            detailed,
            ..Default::default()
        },
        false,
    )
}
