//! Portfolio item entity - One project card inside the portfolio block.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Portfolio item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolio_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// External link rendered as "View Project"
    pub project_url: Option<String>,
    pub category: Option<String>,
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
