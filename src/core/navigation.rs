//! Navigation synchronization - derives the navigation bar from section membership.
//!
//! A stored [`navigation_item`] row only records that a section *variant* is "in
//! navigation". What the bar shows is derived from the variant's representative
//! section (its lowest-ordered enabled shell): the label is the representative's
//! `section_name` (or the capitalized variant name) and the position is the
//! representative's global `display_order`.
//!
//! Reads are split in two phases so each can be checked on its own:
//! [`plan_navigation`] is pure and reports stale stored labels as [`LabelRepair`]s,
//! and [`reconcile_labels`] writes those repairs back.

use crate::{
    core::{
        aggregator,
        section::{SectionRecord, SectionVariant},
        store::{self, Visibility},
    },
    entities::{NavigationItem, navigation_item},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Anchor id of the synthetic contact entry.
pub const CONTACT_SECTION_ID: &str = "contact";

/// One entry of the rendered navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    /// Stored row id; `None` for the synthetic contact entry
    pub id: Option<Uuid>,
    pub label: String,
    /// Page anchor the entry scrolls to (the variant tag)
    pub section_id: String,
    pub display_order: i32,
}

impl NavigationEntry {
    /// The contact entry the page layer appends after every stored entry.
    #[must_use]
    pub fn contact() -> Self {
        Self {
            id: None,
            label: "Contact".to_string(),
            section_id: CONTACT_SECTION_ID.to_string(),
            display_order: i32::MAX,
        }
    }
}

/// A stored label that no longer matches its representative section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRepair {
    pub entry_id: Uuid,
    pub variant: SectionVariant,
    pub label: String,
}

/// Result of the read phase: what to show, and which stored labels are stale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPlan {
    pub entries: Vec<NavigationEntry>,
    pub repairs: Vec<LabelRepair>,
}

/// Picks one representative per variant: the first enabled shell in `sections`.
///
/// `sections` must already be in global order (as produced by the aggregator), so
/// the first enabled shell of a variant is its lowest-ordered one. The result keeps
/// that global order.
#[must_use]
pub fn representatives(sections: &[SectionRecord]) -> Vec<&SectionRecord> {
    let mut seen: Vec<SectionVariant> = Vec::with_capacity(SectionVariant::ALL.len());
    sections
        .iter()
        .filter(|record| record.enabled())
        .filter(|record| {
            if seen.contains(&record.variant()) {
                false
            } else {
                seen.push(record.variant());
                true
            }
        })
        .collect()
}

/// Builds the navigation entries for the variants present both among the
/// representatives and in the stored membership set.
#[must_use]
pub fn plan_navigation(
    sections: &[SectionRecord],
    stored: &[navigation_item::Model],
) -> NavigationPlan {
    let mut plan = NavigationPlan::default();

    for representative in representatives(sections) {
        let variant = representative.variant();
        let Some(member) = stored
            .iter()
            .find(|item| item.enabled && item.section_id == variant.as_str())
        else {
            continue;
        };

        let label = representative.nav_label();
        if member.label != label {
            plan.repairs.push(LabelRepair {
                entry_id: member.id,
                variant,
                label: label.clone(),
            });
        }
        plan.entries.push(NavigationEntry {
            id: Some(member.id),
            label,
            section_id: variant.as_str().to_string(),
            display_order: representative.display_order(),
        });
    }

    plan
}

/// Writes repaired labels back to the stored entries. Only labels change.
pub async fn reconcile_labels<C>(db: &C, repairs: &[LabelRepair]) -> Result<usize>
where
    C: ConnectionTrait,
{
    for repair in repairs {
        NavigationItem::update_many()
            .col_expr(
                navigation_item::Column::Label,
                Expr::value(repair.label.clone()),
            )
            .col_expr(navigation_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(navigation_item::Column::Id.eq(repair.entry_id))
            .exec(db)
            .await?;
        debug!(variant = %repair.variant, label = %repair.label, "Repaired navigation label");
    }
    Ok(repairs.len())
}

/// Reads the stored membership rows that are switched on.
pub async fn load_members<C>(db: &C) -> Result<Vec<navigation_item::Model>>
where
    C: ConnectionTrait,
{
    Ok(NavigationItem::find()
        .filter(navigation_item::Column::Enabled.eq(true))
        .order_by_asc(navigation_item::Column::DisplayOrder)
        .all(db)
        .await?)
}

/// Returns the navigation entries for the public page.
///
/// Stale stored labels are repaired as a side effect. Read failures yield an empty
/// bar and repair failures are only logged: navigation never breaks a page render.
#[instrument(skip(db))]
pub async fn list_navigation_items<C>(db: &C) -> Vec<NavigationEntry>
where
    C: ConnectionTrait,
{
    let (sections, stored) = tokio::join!(aggregator::list_ordered_sections(db), load_members(db));
    let stored = stored.unwrap_or_else(|e| {
        warn!("Navigation items unavailable: {}", e);
        Vec::new()
    });

    let plan = plan_navigation(&sections, &stored);
    if let Err(e) = reconcile_labels(db, &plan.repairs).await {
        warn!("Failed to repair navigation labels: {}", e);
    }
    plan.entries
}

/// Variants currently in navigation.
pub async fn member_variants<C>(db: &C) -> Result<Vec<SectionVariant>>
where
    C: ConnectionTrait,
{
    Ok(load_members(db)
        .await?
        .iter()
        .filter_map(|item| item.section_id.parse().ok())
        .collect())
}

/// Adds `variant` to the navigation if absent, removes it otherwise.
///
/// A new entry is placed after every existing one and labelled from the variant's
/// current representative.
///
/// # Arguments
/// * `db` - Database connection
/// * `variant` - Section variant whose navigation entry is flipped
///
/// # Returns
/// `true` if the variant is now in the navigation
///
/// # Errors
/// `Database` when the entries can't be read or written; nothing is changed then.
#[instrument(skip(db))]
pub async fn toggle_navigation_membership(
    db: &DatabaseConnection,
    variant: SectionVariant,
) -> Result<bool> {
    let txn = db.begin().await?;

    let existing = NavigationItem::find()
        .filter(navigation_item::Column::SectionId.eq(variant.as_str()))
        .all(&txn)
        .await?;

    if !existing.is_empty() {
        NavigationItem::delete_many()
            .filter(navigation_item::Column::SectionId.eq(variant.as_str()))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        info!(%variant, "Removed section from navigation");
        return Ok(false);
    }

    let max_order: Option<i32> = NavigationItem::find()
        .select_only()
        .column_as(navigation_item::Column::DisplayOrder.max(), "max_order")
        .into_tuple::<Option<i32>>()
        .one(&txn)
        .await?
        .flatten();

    let shells = store::load_variant(&txn, variant, Visibility::EnabledOnly).await?;
    let label = shells.first().map_or_else(
        || variant.default_label().to_string(),
        SectionRecord::nav_label,
    );

    let now = Utc::now();
    navigation_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        label: Set(label),
        section_id: Set(variant.as_str().to_string()),
        enabled: Set(true),
        display_order: Set(max_order.map_or(0, |order| order + 1)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(%variant, "Added section to navigation");
    Ok(true)
}

/// Copies each representative's global position onto its stored navigation entry.
///
/// `sections` is the full, freshly renumbered shell list. Entries whose variant has no
/// enabled shell keep their stored order. Returns the number of entries rewritten.
pub async fn sync_navigation_order<C>(db: &C, sections: &[SectionRecord]) -> Result<usize>
where
    C: ConnectionTrait,
{
    let stored = NavigationItem::find().all(db).await?;
    let representatives = representatives(sections);
    let mut rewritten = 0;

    for entry in stored {
        let Some(representative) = representatives
            .iter()
            .find(|r| r.variant().as_str() == entry.section_id)
        else {
            continue;
        };
        if entry.display_order == representative.display_order() {
            continue;
        }
        NavigationItem::update_many()
            .col_expr(
                navigation_item::Column::DisplayOrder,
                Expr::value(representative.display_order()),
            )
            .col_expr(navigation_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(navigation_item::Column::Id.eq(entry.id))
            .exec(db)
            .await?;
        rewritten += 1;
    }

    Ok(rewritten)
}

/// Brings one variant's stored entry (if any) in line with its representative:
/// label and position both. Used right after a section edit.
pub async fn sync_variant<C>(db: &C, variant: SectionVariant) -> Result<()>
where
    C: ConnectionTrait,
{
    let Some(entry) = NavigationItem::find()
        .filter(navigation_item::Column::SectionId.eq(variant.as_str()))
        .one(db)
        .await?
    else {
        return Ok(());
    };

    let shells = store::load_variant(db, variant, Visibility::EnabledOnly).await?;
    let Some(representative) = shells.first() else {
        return Ok(());
    };

    let label = representative.nav_label();
    let order = representative.display_order();
    if entry.label == label && entry.display_order == order {
        return Ok(());
    }

    let mut active: navigation_item::ActiveModel = entry.into();
    active.label = Set(label);
    active.display_order = Set(order);
    active.updated_at = Set(Utc::now());
    active.update(db).await?;
    debug!(%variant, "Navigation entry synced after section edit");
    Ok(())
}

/// Deletes the stored entry for `variant`.
///
/// # Returns
/// `true` if an entry existed
pub async fn remove_variant<C>(db: &C, variant: SectionVariant) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = NavigationItem::delete_many()
        .filter(navigation_item::Column::SectionId.eq(variant.as_str()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
