//! Hero section entity - The full-height banner shell at the top of the page.
//!
//! Besides its copy and calls to action, a hero carries most of the per-section
//! visual overrides: background image, overlay color and opacity, and text colors.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hero section database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_section")]
pub struct Model {
    /// Unique within `hero_section` only
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Headline (markdown)
    pub title: String,
    /// Optional sub-headline (markdown)
    pub subtitle: Option<String>,
    pub primary_cta_text: Option<String>,
    pub primary_cta_link: Option<String>,
    pub secondary_cta_text: Option<String>,
    pub secondary_cta_link: Option<String>,
    /// Cover image; the overlay is only ever drawn on top of one
    pub background_image_url: Option<String>,
    pub background_overlay_color: Option<String>,
    /// Overlay opacity, meaningful only in `(0, 1]`
    pub background_overlay_opacity: Option<f64>,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    /// `left`, `justify` or `center` (anything else renders centered)
    pub subtitle_alignment: Option<String>,
    pub primary_cta_text_color: Option<String>,
    pub primary_cta_bg_color: Option<String>,
    pub secondary_cta_text_color: Option<String>,
    pub secondary_cta_bg_color: Option<String>,
    /// Navigation label override
    pub section_name: Option<String>,
    pub enabled: bool,
    /// Position in the global section order
    pub display_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
