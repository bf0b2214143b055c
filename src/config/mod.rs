/// Database connection and table creation
pub mod database;

/// Application configuration loading from storefront.toml and the environment
pub mod site;
