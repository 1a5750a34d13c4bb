use crate::domain::{common::FilterConfig, record::ports::RecordRepository};

#[derive(Clone)]
pub struct Service<RR>
where
    RR: RecordRepository,
{
    pub record_repository: RR,
    pub filter_config: FilterConfig,
}

impl<RR> Service<RR>
where
    RR: RecordRepository,
{
    pub fn new(record_repository: RR, filter_config: FilterConfig) -> Self {
        Self {
            record_repository,
            filter_config,
        }
    }
}
