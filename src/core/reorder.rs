//! Reordering engine - moves one section a single step through the global page order.
//!
//! All shells live in one global order (`display_order` compared across collections)
//! with the testimonials block occupying a single slot. A move swaps the section with
//! its neighbour and renumbers every slot densely from zero, then copies the new
//! positions onto the navigation entries. Everything runs in one transaction.
//!
//! The testimonials slot is as wide as the block: its rows are packed onto
//! consecutive orders so no other shell sits between two of them.

use crate::{
    core::{
        aggregator, navigation,
        section::{Direction, SectionKey, SectionRecord, SectionVariant, neighbour_index},
        store::{self, Visibility},
    },
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Whether a move request changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOutcome {
    Moved,
    /// The section was already first (moving up) or last (moving down)
    Unchanged,
}

/// One slot whose `display_order` has to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    pub key: SectionKey,
    pub from: i32,
    pub to: i32,
}

/// Computes the order changes for moving `target` one step in `direction`.
///
/// `slots` is the full global order with testimonials collapsed (see
/// [`aggregator::list_all_sections`]). Any testimonial key addresses the block slot,
/// which takes `block_width` consecutive orders. The block is always part of the
/// result so its rows can be packed. Returns an empty list when the move would cross
/// a boundary.
///
/// # Errors
/// `NotFound` when `target` is not among `slots`.
pub fn plan_move(
    slots: &[SectionRecord],
    block_width: i32,
    target: SectionKey,
    direction: Direction,
) -> Result<Vec<OrderChange>> {
    let index = slots
        .iter()
        .position(|slot| {
            slot.key() == target
                || (target.variant == SectionVariant::Testimonials
                    && slot.variant() == SectionVariant::Testimonials)
        })
        .ok_or_else(|| Error::not_found("section", target))?;

    let Some(neighbour) = neighbour_index(index, slots.len(), direction) else {
        return Ok(Vec::new());
    };

    let mut keys: Vec<(SectionKey, i32)> = slots
        .iter()
        .map(|slot| (slot.key(), slot.display_order()))
        .collect();
    keys.swap(index, neighbour);

    let mut next = 0;
    let mut changes = Vec::new();
    for (key, from) in keys {
        let to = next;
        if key.variant == SectionVariant::Testimonials {
            next += block_width.max(1);
            changes.push(OrderChange { key, from, to });
        } else {
            next += 1;
            if from != to {
                changes.push(OrderChange { key, from, to });
            }
        }
    }
    Ok(changes)
}

/// Moves a section one step up or down the page.
///
/// # Arguments
/// * `db` - Database connection
/// * `key` - Section to move; for testimonials any row of the block
/// * `direction` - `Up` towards the top of the page, `Down` towards the bottom
///
/// # Returns
/// [`MoveOutcome::Unchanged`] at a boundary, otherwise [`MoveOutcome::Moved`].
#[instrument(skip(db))]
pub async fn move_section(
    db: &DatabaseConnection,
    key: SectionKey,
    direction: Direction,
) -> Result<MoveOutcome> {
    let txn = db.begin().await?;

    let slots = aggregator::list_all_sections(&txn).await?;
    let rows = store::load_variant(&txn, SectionVariant::Testimonials, Visibility::All).await?;
    let block_width = i32::try_from(rows.len()).unwrap_or(i32::MAX);
    let changes = plan_move(&slots, block_width, key, direction)?;
    if changes.is_empty() {
        debug!(%key, ?direction, "Section already at the boundary");
        return Ok(MoveOutcome::Unchanged);
    }

    for change in &changes {
        if change.key.variant == SectionVariant::Testimonials {
            store::place_testimonials(&txn, change.to).await?;
        } else {
            store::set_display_order(&txn, change.key, change.to).await?;
        }
    }

    let shells = aggregator::list_all_shells(&txn).await?;
    let synced = navigation::sync_navigation_order(&txn, &shells).await?;

    txn.commit().await?;
    info!(
        %key,
        ?direction,
        renumbered = changes.len(),
        navigation_synced = synced,
        "Section moved"
    );
    Ok(MoveOutcome::Moved)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::NavigationItem;
    use crate::test_utils::{
        about_model, create_test_about, create_test_hero, create_test_services_section,
        create_test_testimonial, hero_model, setup_test_db,
    };
    use sea_orm::EntityTrait;
    use uuid::Uuid;

    async fn page_order(db: &DatabaseConnection) -> Result<Vec<(SectionVariant, i32)>> {
        Ok(aggregator::list_all_sections(db)
            .await?
            .iter()
            .map(|s| (s.variant(), s.display_order()))
            .collect())
    }

    #[test]
    fn test_plan_move_swaps_and_renumbers() {
        let slots = vec![
            SectionRecord::Hero(hero_model("Hero", 0)),
            SectionRecord::About(about_model("About", 4)),
        ];
        let about = slots[1].key();
        let changes = plan_move(&slots, 1, about, Direction::Up).unwrap();
        assert_eq!(
            changes,
            vec![
                OrderChange { key: about, from: 4, to: 0 },
                OrderChange { key: slots[0].key(), from: 0, to: 1 },
            ]
        );
    }

    #[test]
    fn test_plan_move_at_boundary_is_empty() {
        let slots = vec![
            SectionRecord::Hero(hero_model("Hero", 0)),
            SectionRecord::About(about_model("About", 1)),
        ];
        assert!(plan_move(&slots, 1, slots[0].key(), Direction::Up).unwrap().is_empty());
        assert!(plan_move(&slots, 1, slots[1].key(), Direction::Down).unwrap().is_empty());
    }

    #[test]
    fn test_plan_move_unknown_section() {
        let slots = vec![SectionRecord::Hero(hero_model("Hero", 0))];
        let missing = SectionKey::new(SectionVariant::Hero, Uuid::new_v4());
        assert!(matches!(
            plan_move(&slots, 1, missing, Direction::Down),
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_move_about_up_updates_order_and_navigation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_hero(&db, "Welcome", 0).await?;
        let about = create_test_about(&db, "About us", 1).await?;
        create_test_services_section(&db, 2).await?;
        navigation::toggle_navigation_membership(&db, SectionVariant::Hero).await?;

        let outcome = move_section(
            &db,
            SectionKey::new(SectionVariant::About, about.id),
            Direction::Up,
        )
        .await?;
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(
            page_order(&db).await?,
            vec![
                (SectionVariant::About, 0),
                (SectionVariant::Hero, 1),
                (SectionVariant::Services, 2),
            ]
        );

        let nav = NavigationItem::find().all(&db).await?;
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].display_order, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_move_down_then_up_restores_order() -> Result<()> {
        let db = setup_test_db().await?;
        let hero = create_test_hero(&db, "Welcome", 0).await?;
        create_test_about(&db, "About us", 1).await?;
        create_test_services_section(&db, 2).await?;
        let key = SectionKey::new(SectionVariant::Hero, hero.id);

        let before = page_order(&db).await?;
        move_section(&db, key, Direction::Down).await?;
        assert_ne!(page_order(&db).await?, before);
        move_section(&db, key, Direction::Up).await?;
        assert_eq!(page_order(&db).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_boundary_moves_are_noops() -> Result<()> {
        let db = setup_test_db().await?;
        let hero = create_test_hero(&db, "Welcome", 0).await?;
        let about = create_test_about(&db, "About us", 1).await?;

        let up = move_section(&db, SectionKey::new(SectionVariant::Hero, hero.id), Direction::Up)
            .await?;
        let down = move_section(
            &db,
            SectionKey::new(SectionVariant::About, about.id),
            Direction::Down,
        )
        .await?;
        assert_eq!(up, MoveOutcome::Unchanged);
        assert_eq!(down, MoveOutcome::Unchanged);
        assert_eq!(
            page_order(&db).await?,
            vec![(SectionVariant::Hero, 0), (SectionVariant::About, 1)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_testimonial_block_moves_as_one() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_hero(&db, "Welcome", 0).await?;
        let first = create_test_testimonial(&db, "Ada", 1).await?;
        create_test_testimonial(&db, "Grace", 2).await?;

        move_section(
            &db,
            SectionKey::new(SectionVariant::Testimonials, first.id),
            Direction::Up,
        )
        .await?;

        // The block spans one order per row
        assert_eq!(
            page_order(&db).await?,
            vec![(SectionVariant::Testimonials, 0), (SectionVariant::Hero, 2)]
        );
        let rows: Vec<(String, i32)> =
            store::load_variant(&db, SectionVariant::Testimonials, Visibility::All)
                .await?
                .iter()
                .map(|r| (r.summary(), r.display_order()))
                .collect();
        // Item order inside the block is preserved
        assert_eq!(rows, vec![("Ada".to_string(), 0), ("Grace".to_string(), 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_sections_keep_their_slot() -> Result<()> {
        let db = setup_test_db().await?;
        let hero = create_test_hero(&db, "Welcome", 0).await?;
        create_test_about(&db, "About us", 1).await?;
        let services = create_test_services_section(&db, 2).await?;
        store::set_enabled(&db, SectionKey::new(SectionVariant::Hero, hero.id), false).await?;

        move_section(
            &db,
            SectionKey::new(SectionVariant::Services, services.id),
            Direction::Up,
        )
        .await?;
        assert_eq!(
            page_order(&db).await?,
            vec![
                (SectionVariant::Hero, 0),
                (SectionVariant::Services, 1),
                (SectionVariant::About, 2),
            ]
        );
        Ok(())
    }
}
