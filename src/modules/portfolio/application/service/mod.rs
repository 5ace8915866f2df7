mod edit_portfolio_service;
mod get_portfolio_service;
mod portfolio_store;
mod save_portfolio_service;

pub use edit_portfolio_service::EditPortfolioService;
pub use get_portfolio_service::GetPortfolioService;
pub use portfolio_store::PortfolioStore;
pub use save_portfolio_service::SavePortfolioService;

#[cfg(test)]
pub(crate) use portfolio_store::tests::MemoryBackend;
