use std::sync::Arc;

use populus_core::application::PopulusService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: PopulusService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PopulusService) -> Self {
        Self { args, service }
    }
}
