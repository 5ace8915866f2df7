pub mod admin_config;
pub mod jwt;
pub mod security;
