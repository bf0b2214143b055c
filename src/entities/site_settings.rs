//! Site settings entity - The singleton company profile row.
//!
//! Holds company identity, theme colors, header style, contact details and social
//! links. Exactly one row is expected, stored under [`SINGLETON_ID`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Well-known primary key of the singleton settings row.
pub const SINGLETON_ID: Uuid = Uuid::nil();

/// Site settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    /// Always [`SINGLETON_ID`]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Company display name, used in the header, footer and page title
    pub company_name: String,
    /// Short tagline shown in the page description and footer
    pub company_tagline: Option<String>,
    /// Header logo image URL
    pub logo_url: Option<String>,
    /// Favicon URL
    pub favicon_url: Option<String>,
    /// Primary brand color
    pub primary_color: String,
    /// Secondary brand color
    pub secondary_color: String,
    pub background_color: Option<String>,
    pub background_color_dark: Option<String>,
    pub text_color: Option<String>,
    pub text_color_dark: Option<String>,
    pub accent_color: Option<String>,
    pub accent_color_hover: Option<String>,
    pub border_color: Option<String>,
    pub border_color_dark: Option<String>,
    /// Navigation bar background
    pub header_background_color: Option<String>,
    /// Navigation bar text color
    pub header_text_color: Option<String>,
    /// Font family name, e.g. `"Inter"`
    pub font_family: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_address: Option<String>,
    pub social_facebook: Option<String>,
    pub social_twitter: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_instagram: Option<String>,
    /// When the row was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

/// `SiteSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
