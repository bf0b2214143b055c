//! About section entity - Company story with an optional side image.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// About section database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about_section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Heading; a blank title hides the whole heading block
    pub title: String,
    pub subtitle: Option<String>,
    /// Body copy (markdown)
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image_url: Option<String>,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    pub content_color: Option<String>,
    /// CSS font size for the body copy, e.g. `"1.125rem"`
    pub content_font_size: Option<String>,
    pub section_name: Option<String>,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
