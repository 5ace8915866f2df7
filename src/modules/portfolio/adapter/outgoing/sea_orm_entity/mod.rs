pub mod portfolio_documents;
