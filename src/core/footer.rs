//! Footer blocks, one optional row per [`FooterKind`].

use crate::{
    core::editor::blank_to_none,
    entities::{FooterContent, footer_content},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{info, instrument};

/// The three footer blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterKind {
    About,
    Links,
    Contact,
}

impl FooterKind {
    pub const ALL: [Self; 3] = [Self::About, Self::Links, Self::Contact];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Links => "links",
            Self::Contact => "contact",
        }
    }

    const fn position(self) -> i32 {
        match self {
            Self::About => 0,
            Self::Links => 1,
            Self::Contact => 2,
        }
    }
}

impl fmt::Display for FooterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FooterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown footer section: {s}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub enabled: Option<String>,
}

/// Enabled footer rows in display order.
pub async fn list_footer_content<C>(db: &C) -> Result<Vec<footer_content::Model>>
where
    C: ConnectionTrait,
{
    Ok(FooterContent::find()
        .filter(footer_content::Column::Enabled.eq(true))
        .order_by_asc(footer_content::Column::DisplayOrder)
        .all(db)
        .await?)
}

/// The row for one block, enabled or not.
pub async fn find_footer<C>(db: &C, kind: FooterKind) -> Result<Option<footer_content::Model>>
where
    C: ConnectionTrait,
{
    Ok(FooterContent::find()
        .filter(footer_content::Column::SectionType.eq(kind.as_str()))
        .one(db)
        .await?)
}

/// Creates or replaces the row for one block.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `kind` - Footer block to write
/// * `form` - Submitted form; blank strings are stored as NULL
///
/// # Returns
/// The stored row
#[instrument(skip(db, form))]
pub async fn upsert_footer<C>(
    db: &C,
    kind: FooterKind,
    form: &FooterForm,
) -> Result<footer_content::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let title = blank_to_none(form.title.as_ref());
    let content = blank_to_none(form.content.as_ref());
    let enabled = form.enabled.is_some();

    let model = if let Some(existing) = find_footer(db, kind).await? {
        let mut active: footer_content::ActiveModel = existing.into();
        active.title = Set(title);
        active.content = Set(content);
        active.enabled = Set(enabled);
        active.updated_at = Set(now);
        active.update(db).await?
    } else {
        footer_content::ActiveModel {
            id: Set(Uuid::new_v4()),
            section_type: Set(kind.as_str().to_string()),
            title: Set(title),
            content: Set(content),
            enabled: Set(enabled),
            display_order: Set(kind.position()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?
    };

    info!(%kind, enabled, "Footer content saved");
    Ok(model)
}
