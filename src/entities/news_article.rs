//! News article entity - Markdown articles with a publish flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// News article database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    /// URL slug, unique across articles
    #[sea_orm(unique)]
    pub slug: String,
    /// Article body (markdown)
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub author_id: Option<String>,
    pub published: bool,
    /// Set when published, cleared when unpublished
    pub published_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
