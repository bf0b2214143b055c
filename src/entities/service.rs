//! Service item entity - One offering listed inside the services block.
//!
//! Ordered by its own `display_order`, local to the `services` collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Emoji or short glyph shown above the title
    pub icon: Option<String>,
    pub title_color: Option<String>,
    pub description_color: Option<String>,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
