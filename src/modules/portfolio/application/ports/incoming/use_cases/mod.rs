mod edit_portfolio;
mod get_portfolio;
mod save_portfolio;

pub use edit_portfolio::{EditCommand, EditPortfolioError, EditPortfolioUseCase, EditResult, Edited};
pub use get_portfolio::GetPortfolioUseCase;
pub use save_portfolio::{SavePortfolioError, SavePortfolioUseCase};
