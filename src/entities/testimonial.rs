//! Testimonial entity - Client quotes.
//!
//! Testimonials have no separate shell: the rows are the items of the block, and
//! the lowest-ordered enabled row stands in for the whole block in the global
//! section order (its `display_order` and `section_name` are the block's).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Testimonial database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub quote: String,
    pub author_name: String,
    pub author_role: Option<String>,
    pub author_company: Option<String>,
    pub author_image_url: Option<String>,
    /// Star rating; not range-checked on write
    pub rating: Option<i32>,
    pub quote_color: Option<String>,
    pub author_name_color: Option<String>,
    pub author_role_color: Option<String>,
    pub section_name: Option<String>,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
