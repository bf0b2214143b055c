//! Database configuration module for the storefront.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models
//! without hand-written SQL. Creation is idempotent (`IF NOT EXISTS`) so it can run on
//! every startup against a persistent file.

use crate::entities::{
    AboutSection, FooterContent, HeroSection, NavigationItem, NewsArticle, PortfolioItem,
    PortfolioSection, Service, ServicesSection, SiteSettings, Testimonial,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default database location when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first, so a fresh
/// checkout can start without any manual setup.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(parent) = sqlite_file_parent(database_url) {
        debug!("Ensuring database directory {:?} exists", parent);
        tokio::fs::create_dir_all(parent).await?;
    }

    let db = Database::connect(database_url).await?;
    info!("Database connection established");
    Ok(db)
}

/// Returns the directory holding a file-backed `SQLite` database, if the URL names one.
fn sqlite_file_parent(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Creates all content tables from the entity definitions, skipping existing ones.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    create_table(db, &schema, SiteSettings).await?;
    create_table(db, &schema, HeroSection).await?;
    create_table(db, &schema, AboutSection).await?;
    create_table(db, &schema, ServicesSection).await?;
    create_table(db, &schema, Service).await?;
    create_table(db, &schema, PortfolioSection).await?;
    create_table(db, &schema, PortfolioItem).await?;
    create_table(db, &schema, Testimonial).await?;
    create_table(db, &schema, NavigationItem).await?;
    create_table(db, &schema, FooterContent).await?;
    create_table(db, &schema, NewsArticle).await?;

    debug!("Content tables ensured");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        hero_section::Model as HeroModel, navigation_item::Model as NavigationModel,
        news_article::Model as NewsModel, site_settings::Model as SettingsModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<SettingsModel> = SiteSettings::find().limit(1).all(&db).await?;
        let _: Vec<HeroModel> = HeroSection::find().limit(1).all(&db).await?;
        let _: Vec<NavigationModel> = NavigationItem::find().limit(1).all(&db).await?;
        let _: Vec<NewsModel> = NewsArticle::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_parent() {
        assert_eq!(
            sqlite_file_parent("sqlite://data/storefront.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_file_parent("sqlite::memory:"), None);
        assert_eq!(sqlite_file_parent("sqlite://site.sqlite"), None);
        assert_eq!(sqlite_file_parent("postgres://localhost/site"), None);
    }
}
