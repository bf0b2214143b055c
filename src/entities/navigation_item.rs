//! Navigation item entity - Membership of a section variant in the navigation bar.
//!
//! `section_id` holds the section *variant* (`"hero"`, `"about"`, ...), not a
//! record id, so there is at most one row per variant. The synthetic contact entry
//! is never stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Navigation item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "navigation_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Cached label, kept equal to the representative section's name
    pub label: String,
    /// Section variant this entry links to
    #[sea_orm(unique)]
    pub section_id: String,
    pub enabled: bool,
    /// Mirrors the representative section's global `display_order`
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
