//! Shared test utilities for the storefront.
//!
//! This module provides helpers for setting up test databases and building section
//! shells, items and navigation rows with sensible defaults. The `*_model` builders
//! return detached models for pure tests; the `create_test_*` helpers insert them.

use crate::{
    core::section::SectionVariant,
    entities::{
        about_section, hero_section, navigation_item, portfolio_section, service,
        services_section, testimonial,
    },
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output through the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// An enabled hero shell with only a title set.
pub fn hero_model(title: &str, display_order: i32) -> hero_section::Model {
    let now = Utc::now();
    hero_section::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        subtitle: None,
        primary_cta_text: None,
        primary_cta_link: None,
        secondary_cta_text: None,
        secondary_cta_link: None,
        background_image_url: None,
        background_overlay_color: None,
        background_overlay_opacity: None,
        title_color: None,
        subtitle_color: None,
        subtitle_alignment: None,
        primary_cta_text_color: None,
        primary_cta_bg_color: None,
        secondary_cta_text_color: None,
        secondary_cta_bg_color: None,
        section_name: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// An enabled about shell with placeholder content.
pub fn about_model(title: &str, display_order: i32) -> about_section::Model {
    let now = Utc::now();
    about_section::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        subtitle: None,
        content: "We build things.".to_string(),
        image_url: None,
        title_color: None,
        subtitle_color: None,
        content_color: None,
        content_font_size: None,
        section_name: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// An enabled services shell using the default headings.
pub fn services_section_model(display_order: i32) -> services_section::Model {
    let now = Utc::now();
    services_section::Model {
        id: Uuid::new_v4(),
        title: None,
        subtitle: None,
        title_color: None,
        subtitle_color: None,
        section_name: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// An enabled portfolio shell using the default headings.
pub fn portfolio_section_model(display_order: i32) -> portfolio_section::Model {
    let now = Utc::now();
    portfolio_section::Model {
        id: Uuid::new_v4(),
        title: None,
        subtitle: None,
        title_color: None,
        subtitle_color: None,
        section_name: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// An enabled service item.
pub fn service_model(title: &str, display_order: i32) -> service::Model {
    let now = Utc::now();
    service::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{title} for growing teams"),
        icon: None,
        title_color: None,
        description_color: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// An enabled five-star testimonial.
pub fn testimonial_model(author: &str, display_order: i32) -> testimonial::Model {
    let now = Utc::now();
    testimonial::Model {
        id: Uuid::new_v4(),
        quote: "Great work.".to_string(),
        author_name: author.to_string(),
        author_role: None,
        author_company: None,
        author_image_url: None,
        rating: Some(5),
        quote_color: None,
        author_name_color: None,
        author_role_color: None,
        section_name: None,
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// A stored navigation row for `variant`.
pub fn nav_model(variant: SectionVariant, label: &str, display_order: i32) -> navigation_item::Model {
    let now = Utc::now();
    navigation_item::Model {
        id: Uuid::new_v4(),
        label: label.to_string(),
        section_id: variant.as_str().to_string(),
        enabled: true,
        display_order,
        created_at: now,
        updated_at: now,
    }
}

/// Inserts a hero shell.
pub async fn create_test_hero(
    db: &DatabaseConnection,
    title: &str,
    display_order: i32,
) -> Result<hero_section::Model> {
    let active = hero_model(title, display_order).into_active_model().reset_all();
    Ok(active.insert(db).await?)
}

/// Inserts an about shell.
pub async fn create_test_about(
    db: &DatabaseConnection,
    title: &str,
    display_order: i32,
) -> Result<about_section::Model> {
    let active = about_model(title, display_order).into_active_model().reset_all();
    Ok(active.insert(db).await?)
}

/// Inserts a services shell.
pub async fn create_test_services_section(
    db: &DatabaseConnection,
    display_order: i32,
) -> Result<services_section::Model> {
    let active = services_section_model(display_order)
        .into_active_model()
        .reset_all();
    Ok(active.insert(db).await?)
}

/// Inserts a testimonial row.
pub async fn create_test_testimonial(
    db: &DatabaseConnection,
    author: &str,
    display_order: i32,
) -> Result<testimonial::Model> {
    let active = testimonial_model(author, display_order)
        .into_active_model()
        .reset_all();
    Ok(active.insert(db).await?)
}

/// Inserts a service item.
pub async fn create_test_service(
    db: &DatabaseConnection,
    title: &str,
    display_order: i32,
) -> Result<service::Model> {
    let active = service_model(title, display_order).into_active_model().reset_all();
    Ok(active.insert(db).await?)
}
