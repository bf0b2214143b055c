//! Content store adapter for section shells.
//!
//! Maps each [`SectionVariant`] to its `SeaORM` entity so callers never pick a table by
//! name. Every function is generic over [`ConnectionTrait`] so the same calls work on a
//! plain connection or inside a transaction.

use crate::{
    core::section::{SectionKey, SectionRecord, SectionVariant},
    entities::{
        AboutSection, HeroSection, PortfolioSection, ServicesSection, Testimonial, about_section,
        hero_section, portfolio_section, services_section, testimonial,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    QueryOrder, QuerySelect,
    prelude::*,
    sea_query::{Expr, SimpleExpr},
};

/// Which shells a read should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only `enabled = true` rows (public rendering)
    EnabledOnly,
    /// Every row (admin listings, reordering)
    All,
}

/// Reads one variant's shells ordered by `display_order`.
pub async fn load_variant<C>(
    db: &C,
    variant: SectionVariant,
    visibility: Visibility,
) -> Result<Vec<SectionRecord>>
where
    C: ConnectionTrait,
{
    let records = match variant {
        SectionVariant::Hero => select_shells::<_, HeroSection>(
            db,
            hero_section::Column::Enabled,
            hero_section::Column::DisplayOrder,
            visibility,
        )
        .await?
        .into_iter()
        .map(SectionRecord::Hero)
        .collect(),
        SectionVariant::About => select_shells::<_, AboutSection>(
            db,
            about_section::Column::Enabled,
            about_section::Column::DisplayOrder,
            visibility,
        )
        .await?
        .into_iter()
        .map(SectionRecord::About)
        .collect(),
        SectionVariant::Services => select_shells::<_, ServicesSection>(
            db,
            services_section::Column::Enabled,
            services_section::Column::DisplayOrder,
            visibility,
        )
        .await?
        .into_iter()
        .map(SectionRecord::Services)
        .collect(),
        SectionVariant::Portfolio => select_shells::<_, PortfolioSection>(
            db,
            portfolio_section::Column::Enabled,
            portfolio_section::Column::DisplayOrder,
            visibility,
        )
        .await?
        .into_iter()
        .map(SectionRecord::Portfolio)
        .collect(),
        SectionVariant::Testimonials => select_shells::<_, Testimonial>(
            db,
            testimonial::Column::Enabled,
            testimonial::Column::DisplayOrder,
            visibility,
        )
        .await?
        .into_iter()
        .map(SectionRecord::Testimonials)
        .collect(),
    };
    Ok(records)
}

async fn select_shells<C, E>(
    db: &C,
    enabled: E::Column,
    display_order: E::Column,
    visibility: Visibility,
) -> Result<Vec<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut query = E::find();
    if visibility == Visibility::EnabledOnly {
        query = query.filter(enabled.eq(true));
    }
    Ok(query.order_by_asc(display_order).all(db).await?)
}

/// Fetches a single shell by key, enabled or not.
pub async fn find_section<C>(db: &C, key: SectionKey) -> Result<Option<SectionRecord>>
where
    C: ConnectionTrait,
{
    let record = match key.variant {
        SectionVariant::Hero => HeroSection::find_by_id(key.id)
            .one(db)
            .await?
            .map(SectionRecord::Hero),
        SectionVariant::About => AboutSection::find_by_id(key.id)
            .one(db)
            .await?
            .map(SectionRecord::About),
        SectionVariant::Services => ServicesSection::find_by_id(key.id)
            .one(db)
            .await?
            .map(SectionRecord::Services),
        SectionVariant::Portfolio => PortfolioSection::find_by_id(key.id)
            .one(db)
            .await?
            .map(SectionRecord::Portfolio),
        SectionVariant::Testimonials => Testimonial::find_by_id(key.id)
            .one(db)
            .await?
            .map(SectionRecord::Testimonials),
    };
    Ok(record)
}

/// Like [`find_section`] but a missing row is an error.
pub async fn get_section<C>(db: &C, key: SectionKey) -> Result<SectionRecord>
where
    C: ConnectionTrait,
{
    find_section(db, key)
        .await?
        .ok_or_else(|| Error::not_found("section", key))
}

/// Writes a new `display_order` for one shell.
pub async fn set_display_order<C>(db: &C, key: SectionKey, order: i32) -> Result<()>
where
    C: ConnectionTrait,
{
    let affected = match key.variant {
        SectionVariant::Hero => {
            update_column::<_, HeroSection>(
                db,
                hero_section::Column::Id,
                hero_section::Column::DisplayOrder,
                hero_section::Column::UpdatedAt,
                key.id,
                Expr::value(order),
            )
            .await?
        }
        SectionVariant::About => {
            update_column::<_, AboutSection>(
                db,
                about_section::Column::Id,
                about_section::Column::DisplayOrder,
                about_section::Column::UpdatedAt,
                key.id,
                Expr::value(order),
            )
            .await?
        }
        SectionVariant::Services => {
            update_column::<_, ServicesSection>(
                db,
                services_section::Column::Id,
                services_section::Column::DisplayOrder,
                services_section::Column::UpdatedAt,
                key.id,
                Expr::value(order),
            )
            .await?
        }
        SectionVariant::Portfolio => {
            update_column::<_, PortfolioSection>(
                db,
                portfolio_section::Column::Id,
                portfolio_section::Column::DisplayOrder,
                portfolio_section::Column::UpdatedAt,
                key.id,
                Expr::value(order),
            )
            .await?
        }
        SectionVariant::Testimonials => {
            update_column::<_, Testimonial>(
                db,
                testimonial::Column::Id,
                testimonial::Column::DisplayOrder,
                testimonial::Column::UpdatedAt,
                key.id,
                Expr::value(order),
            )
            .await?
        }
    };
    ensure_affected(affected, key)
}

/// Writes the `enabled` flag for one shell.
pub async fn set_enabled<C>(db: &C, key: SectionKey, enabled: bool) -> Result<()>
where
    C: ConnectionTrait,
{
    let affected = match key.variant {
        SectionVariant::Hero => {
            update_column::<_, HeroSection>(
                db,
                hero_section::Column::Id,
                hero_section::Column::Enabled,
                hero_section::Column::UpdatedAt,
                key.id,
                Expr::value(enabled),
            )
            .await?
        }
        SectionVariant::About => {
            update_column::<_, AboutSection>(
                db,
                about_section::Column::Id,
                about_section::Column::Enabled,
                about_section::Column::UpdatedAt,
                key.id,
                Expr::value(enabled),
            )
            .await?
        }
        SectionVariant::Services => {
            update_column::<_, ServicesSection>(
                db,
                services_section::Column::Id,
                services_section::Column::Enabled,
                services_section::Column::UpdatedAt,
                key.id,
                Expr::value(enabled),
            )
            .await?
        }
        SectionVariant::Portfolio => {
            update_column::<_, PortfolioSection>(
                db,
                portfolio_section::Column::Id,
                portfolio_section::Column::Enabled,
                portfolio_section::Column::UpdatedAt,
                key.id,
                Expr::value(enabled),
            )
            .await?
        }
        SectionVariant::Testimonials => {
            update_column::<_, Testimonial>(
                db,
                testimonial::Column::Id,
                testimonial::Column::Enabled,
                testimonial::Column::UpdatedAt,
                key.id,
                Expr::value(enabled),
            )
            .await?
        }
    };
    ensure_affected(affected, key)
}

/// Lays the testimonial rows out on consecutive orders starting at `start`.
///
/// The testimonials block occupies one slot in the global order but spans one value
/// per row. Rows keep their relative item order. Returns the number of rows written.
pub async fn place_testimonials<C>(db: &C, start: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    let rows: Vec<(Uuid, i32)> = Testimonial::find()
        .select_only()
        .column(testimonial::Column::Id)
        .column(testimonial::Column::DisplayOrder)
        .order_by_asc(testimonial::Column::DisplayOrder)
        .order_by_asc(testimonial::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    let mut written = 0;
    for ((id, from), to) in rows.into_iter().zip(start..) {
        if from == to {
            continue;
        }
        written += update_column::<_, Testimonial>(
            db,
            testimonial::Column::Id,
            testimonial::Column::DisplayOrder,
            testimonial::Column::UpdatedAt,
            id,
            Expr::value(to),
        )
        .await?;
    }
    Ok(written)
}

/// Pushes every non-testimonial shell at or after `at` down by `width`, leaving room
/// for the testimonials block to grow.
pub async fn open_gap<C>(db: &C, at: i32, width: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    if width <= 0 {
        return Ok(0);
    }
    let shifted = shift_from::<_, HeroSection>(
        db,
        hero_section::Column::DisplayOrder,
        hero_section::Column::UpdatedAt,
        at,
        width,
    )
    .await?
        + shift_from::<_, AboutSection>(
            db,
            about_section::Column::DisplayOrder,
            about_section::Column::UpdatedAt,
            at,
            width,
        )
        .await?
        + shift_from::<_, ServicesSection>(
            db,
            services_section::Column::DisplayOrder,
            services_section::Column::UpdatedAt,
            at,
            width,
        )
        .await?
        + shift_from::<_, PortfolioSection>(
            db,
            portfolio_section::Column::DisplayOrder,
            portfolio_section::Column::UpdatedAt,
            at,
            width,
        )
        .await?;
    Ok(shifted)
}

/// Deletes one shell.
pub async fn delete_section<C>(db: &C, key: SectionKey) -> Result<()>
where
    C: ConnectionTrait,
{
    let affected = match key.variant {
        SectionVariant::Hero => HeroSection::delete_by_id(key.id).exec(db).await?,
        SectionVariant::About => AboutSection::delete_by_id(key.id).exec(db).await?,
        SectionVariant::Services => ServicesSection::delete_by_id(key.id).exec(db).await?,
        SectionVariant::Portfolio => PortfolioSection::delete_by_id(key.id).exec(db).await?,
        SectionVariant::Testimonials => Testimonial::delete_by_id(key.id).exec(db).await?,
    }
    .rows_affected;
    ensure_affected(affected, key)
}

async fn update_column<C, E>(
    db: &C,
    id_column: E::Column,
    column: E::Column,
    updated_at: E::Column,
    id: Uuid,
    value: SimpleExpr,
) -> Result<u64>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let result = E::update_many()
        .col_expr(column, value)
        .col_expr(updated_at, Expr::value(Utc::now()))
        .filter(id_column.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn shift_from<C, E>(
    db: &C,
    display_order: E::Column,
    updated_at: E::Column,
    at: i32,
    width: i32,
) -> Result<u64>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let result = E::update_many()
        .col_expr(display_order, Expr::col(display_order).add(width))
        .col_expr(updated_at, Expr::value(Utc::now()))
        .filter(display_order.gte(at))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

fn ensure_affected(affected: u64, key: SectionKey) -> Result<()> {
    if affected == 0 {
        return Err(Error::not_found("section", key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        create_test_about, create_test_hero, create_test_testimonial, setup_test_db,
    };

    #[tokio::test]
    async fn test_load_variant_respects_visibility() -> Result<()> {
        let db = setup_test_db().await?;
        let shown = create_test_hero(&db, "Shown", 1).await?;
        let hidden = create_test_hero(&db, "Hidden", 0).await?;
        set_enabled(&db, SectionKey::new(SectionVariant::Hero, hidden.id), false).await?;

        let enabled = load_variant(&db, SectionVariant::Hero, Visibility::EnabledOnly).await?;
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id(), shown.id);

        let all = load_variant(&db, SectionVariant::Hero, Visibility::All).await?;
        assert_eq!(all.len(), 2);
        // Ordered by display_order, so the hidden one (0) comes first
        assert_eq!(all[0].id(), hidden.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_display_order_on_missing_row_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let key = SectionKey::new(SectionVariant::About, Uuid::new_v4());
        let result = set_display_order(&db, key, 3).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_place_testimonials_packs_rows_in_order() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_testimonial(&db, "Ada", 2).await?;
        create_test_testimonial(&db, "Grace", 5).await?;

        let written = place_testimonials(&db, 0).await?;
        assert_eq!(written, 2);

        let rows: Vec<(String, i32)> =
            load_variant(&db, SectionVariant::Testimonials, Visibility::All)
                .await?
                .iter()
                .map(|r| (r.summary(), r.display_order()))
                .collect();
        assert_eq!(rows, vec![("Ada".to_string(), 0), ("Grace".to_string(), 1)]);

        // Already in place
        assert_eq!(place_testimonials(&db, 0).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_gap_skips_testimonials() -> Result<()> {
        let db = setup_test_db().await?;
        let before = create_test_hero(&db, "Before", 0).await?;
        let after = create_test_about(&db, "After", 2).await?;
        let ada = create_test_testimonial(&db, "Ada", 2).await?;

        assert_eq!(open_gap(&db, 2, 3).await?, 1);

        for (key, expected) in [
            (SectionKey::new(SectionVariant::Hero, before.id), 0),
            (SectionKey::new(SectionVariant::About, after.id), 5),
            (SectionKey::new(SectionVariant::Testimonials, ada.id), 2),
        ] {
            assert_eq!(get_section(&db, key).await?.display_order(), expected);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_section() -> Result<()> {
        let db = setup_test_db().await?;
        let hero = create_test_hero(&db, "Gone", 0).await?;
        let key = SectionKey::new(SectionVariant::Hero, hero.id);

        delete_section(&db, key).await?;
        assert!(find_section(&db, key).await?.is_none());
        assert!(matches!(
            delete_section(&db, key).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
