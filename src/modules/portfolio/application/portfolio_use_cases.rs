use std::sync::Arc;

use crate::modules::portfolio::application::ports::incoming::use_cases::{
    EditPortfolioUseCase, GetPortfolioUseCase, SavePortfolioUseCase,
};

#[derive(Clone)]
pub struct PortfolioUseCases {
    pub get: Arc<dyn GetPortfolioUseCase + Send + Sync>,
    pub save: Arc<dyn SavePortfolioUseCase + Send + Sync>,
    pub edit: Arc<dyn EditPortfolioUseCase + Send + Sync>,
}
