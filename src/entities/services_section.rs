//! Services section entity - Heading and placement shell for the services block.
//!
//! The repeated entries shown inside the block live in their own collection and
//! are ordered independently; this row only governs global position, visibility
//! and heading styling.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Services section shell database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services_section")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Heading; a default heading is rendered when absent
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    pub section_name: Option<String>,
    pub enabled: bool,
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
