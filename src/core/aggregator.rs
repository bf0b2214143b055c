//! Section aggregation - merges the five shell collections into one page order.
//!
//! Each collection stores its own `display_order`, but the values are meant to be
//! compared across collections: the page order is the union of all shells sorted by
//! that column. The testimonials collection holds the block's items as well, so it is
//! collapsed to a single entry standing in for the whole block.

use crate::{
    core::{
        section::{SectionRecord, SectionVariant},
        store::{self, Visibility},
    },
    errors::Result,
};
use sea_orm::ConnectionTrait;
use tracing::{debug, instrument, warn};

/// Returns the enabled sections of every variant in global page order.
///
/// A collection that cannot be read contributes nothing; the remaining variants are
/// still returned. This function never fails, so the public page always renders.
#[instrument(skip(db))]
pub async fn list_ordered_sections<C>(db: &C) -> Vec<SectionRecord>
where
    C: ConnectionTrait,
{
    let batches = load_batches(db, Visibility::EnabledOnly).await;
    let batches = batches
        .into_iter()
        .filter_map(|(variant, batch)| match batch {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(%variant, "Section collection unavailable, rendering without it: {}", e);
                None
            }
        })
        .collect();

    let ordered = merge_ordered(batches);
    debug!("Aggregated {} enabled sections", ordered.len());
    ordered
}

/// Returns every shell (enabled or not) in global order, testimonials collapsed.
///
/// Unlike [`list_ordered_sections`] any read failure is returned to the caller, since
/// the reordering engine must not renumber from a partial picture.
pub async fn list_all_sections<C>(db: &C) -> Result<Vec<SectionRecord>>
where
    C: ConnectionTrait,
{
    let mut batches = Vec::with_capacity(SectionVariant::ALL.len());
    for (_, batch) in load_batches(db, Visibility::All).await {
        batches.push(batch?);
    }
    Ok(merge_ordered(batches))
}

/// Returns every shell of every variant in global order, without collapsing the
/// testimonials block. Used to pick navigation representatives inside a transaction.
pub async fn list_all_shells<C>(db: &C) -> Result<Vec<SectionRecord>>
where
    C: ConnectionTrait,
{
    let mut shells = Vec::new();
    for (_, batch) in load_batches(db, Visibility::All).await {
        shells.extend(batch?);
    }
    shells.sort_by_key(|record| (record.display_order(), record.variant()));
    Ok(shells)
}

/// Reads all five collections concurrently.
async fn load_batches<C>(
    db: &C,
    visibility: Visibility,
) -> Vec<(SectionVariant, Result<Vec<SectionRecord>>)>
where
    C: ConnectionTrait,
{
    let (hero, about, services, portfolio, testimonials) = tokio::join!(
        store::load_variant(db, SectionVariant::Hero, visibility),
        store::load_variant(db, SectionVariant::About, visibility),
        store::load_variant(db, SectionVariant::Services, visibility),
        store::load_variant(db, SectionVariant::Portfolio, visibility),
        store::load_variant(db, SectionVariant::Testimonials, visibility),
    );

    vec![
        (SectionVariant::Hero, hero),
        (SectionVariant::About, about),
        (SectionVariant::Services, services),
        (SectionVariant::Portfolio, portfolio),
        (SectionVariant::Testimonials, testimonials),
    ]
}

/// Merges per-variant batches into one list sorted by `display_order`.
///
/// Testimonial rows collapse into their lowest-ordered enabled row, or the lowest row
/// when every row is disabled. The public page only sees enabled rows, so both views
/// put the block in the same place. Ties between variants fall back to variant
/// declaration order.
#[must_use]
pub fn merge_ordered(batches: Vec<Vec<SectionRecord>>) -> Vec<SectionRecord> {
    let mut merged: Vec<SectionRecord> = Vec::new();
    let mut testimonial_block: Option<SectionRecord> = None;

    for record in batches.into_iter().flatten() {
        if record.variant() == SectionVariant::Testimonials {
            let replace = testimonial_block
                .as_ref()
                .is_none_or(|current| block_rank(&record) < block_rank(current));
            if replace {
                testimonial_block = Some(record);
            }
        } else {
            merged.push(record);
        }
    }
    merged.extend(testimonial_block);

    merged.sort_by_key(|record| (record.display_order(), record.variant()));
    merged
}

fn block_rank(record: &SectionRecord) -> (bool, i32) {
    (!record.enabled(), record.display_order())
}
