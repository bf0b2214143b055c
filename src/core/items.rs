//! Item collections - the repeated content shown inside services, portfolio and
//! testimonials sections.
//!
//! Items are ordered locally within their own collection; their `display_order` never
//! takes part in the global section order. Moving an item exchanges its position with
//! its neighbour's.

use crate::{
    core::{
        aggregator,
        editor::{self, blank_to_none, require},
        navigation,
        reorder::MoveOutcome,
        section::{Direction, SectionKey, SectionVariant, neighbour_index},
        store::{self, Visibility},
    },
    entities::{PortfolioItem, Service, Testimonial, portfolio_item, service, testimonial},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, SimpleExpr},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{info, instrument};

/// A locally ordered item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCollection {
    Services,
    PortfolioItems,
    Testimonials,
}

impl ItemCollection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::PortfolioItems => "portfolio_items",
            Self::Testimonials => "testimonials",
        }
    }
}

impl fmt::Display for ItemCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCollection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "services" => Ok(Self::Services),
            "portfolio_items" => Ok(Self::PortfolioItems),
            "testimonials" => Ok(Self::Testimonials),
            other => Err(Error::validation(format!("Unknown collection: {other}"))),
        }
    }
}

/// Admin form for services and portfolio items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Service icon (emoji or short text)
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub project_url: Option<String>,
    pub category: Option<String>,
    pub title_color: Option<String>,
    pub description_color: Option<String>,
    pub enabled: Option<String>,
}

impl ItemForm {
    #[must_use]
    pub fn from_service(model: &service::Model) -> Self {
        Self {
            title: Some(model.title.clone()),
            description: Some(model.description.clone()),
            icon: model.icon.clone(),
            title_color: model.title_color.clone(),
            description_color: model.description_color.clone(),
            enabled: model.enabled.then(|| "on".to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_portfolio_item(model: &portfolio_item::Model) -> Self {
        Self {
            title: Some(model.title.clone()),
            description: model.description.clone(),
            image_url: model.image_url.clone(),
            project_url: model.project_url.clone(),
            category: model.category.clone(),
            title_color: model.title_color.clone(),
            description_color: model.description_color.clone(),
            enabled: model.enabled.then(|| "on".to_string()),
            ..Self::default()
        }
    }
}

/// Items of the services block.
pub async fn list_services<C>(db: &C, visibility: Visibility) -> Result<Vec<service::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Service::find();
    if visibility == Visibility::EnabledOnly {
        query = query.filter(service::Column::Enabled.eq(true));
    }
    Ok(query
        .order_by_asc(service::Column::DisplayOrder)
        .all(db)
        .await?)
}

/// Items of the portfolio block.
pub async fn list_portfolio_items<C>(
    db: &C,
    visibility: Visibility,
) -> Result<Vec<portfolio_item::Model>>
where
    C: ConnectionTrait,
{
    let mut query = PortfolioItem::find();
    if visibility == Visibility::EnabledOnly {
        query = query.filter(portfolio_item::Column::Enabled.eq(true));
    }
    Ok(query
        .order_by_asc(portfolio_item::Column::DisplayOrder)
        .all(db)
        .await?)
}

/// Testimonial rows as block items.
pub async fn list_testimonials<C>(
    db: &C,
    visibility: Visibility,
) -> Result<Vec<testimonial::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Testimonial::find();
    if visibility == Visibility::EnabledOnly {
        query = query.filter(testimonial::Column::Enabled.eq(true));
    }
    Ok(query
        .order_by_asc(testimonial::Column::DisplayOrder)
        .order_by_asc(testimonial::Column::Id)
        .all(db)
        .await?)
}

pub async fn get_service<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<service::Model> {
    Service::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("service", id))
}

pub async fn get_portfolio_item<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<portfolio_item::Model> {
    PortfolioItem::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("portfolio item", id))
}

/// Creates a service at the end of the collection.
///
/// # Errors
/// `Validation` when `title` or `description` is blank.
#[instrument(skip(db, form))]
pub async fn create_service(db: &DatabaseConnection, form: &ItemForm) -> Result<service::Model> {
    let title = require(form.title.as_ref(), "Title")?;
    let description = require(form.description.as_ref(), "Description")?;
    let order = next_order::<_, Service>(db, service::Column::DisplayOrder).await?;
    let now = Utc::now();

    let model = service::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        description: Set(description),
        icon: Set(blank_to_none(form.icon.as_ref())),
        title_color: Set(blank_to_none(form.title_color.as_ref())),
        description_color: Set(blank_to_none(form.description_color.as_ref())),
        enabled: Set(form.enabled.is_some()),
        display_order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(id = %model.id, title = %model.title, "Service created");
    Ok(model)
}

#[instrument(skip(db, form))]
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    form: &ItemForm,
) -> Result<service::Model> {
    let title = require(form.title.as_ref(), "Title")?;
    let description = require(form.description.as_ref(), "Description")?;

    let mut active: service::ActiveModel = get_service(db, id).await?.into();
    active.title = Set(title);
    active.description = Set(description);
    active.icon = Set(blank_to_none(form.icon.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.description_color = Set(blank_to_none(form.description_color.as_ref()));
    active.enabled = Set(form.enabled.is_some());
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Creates a portfolio item at the end of the collection.
#[instrument(skip(db, form))]
pub async fn create_portfolio_item(
    db: &DatabaseConnection,
    form: &ItemForm,
) -> Result<portfolio_item::Model> {
    let title = require(form.title.as_ref(), "Title")?;
    let order = next_order::<_, PortfolioItem>(db, portfolio_item::Column::DisplayOrder).await?;
    let now = Utc::now();

    let model = portfolio_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        description: Set(blank_to_none(form.description.as_ref())),
        image_url: Set(blank_to_none(form.image_url.as_ref())),
        project_url: Set(blank_to_none(form.project_url.as_ref())),
        category: Set(blank_to_none(form.category.as_ref())),
        title_color: Set(blank_to_none(form.title_color.as_ref())),
        description_color: Set(blank_to_none(form.description_color.as_ref())),
        enabled: Set(form.enabled.is_some()),
        display_order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(id = %model.id, title = %model.title, "Portfolio item created");
    Ok(model)
}

#[instrument(skip(db, form))]
pub async fn update_portfolio_item(
    db: &DatabaseConnection,
    id: Uuid,
    form: &ItemForm,
) -> Result<portfolio_item::Model> {
    let title = require(form.title.as_ref(), "Title")?;

    let mut active: portfolio_item::ActiveModel = get_portfolio_item(db, id).await?.into();
    active.title = Set(title);
    active.description = Set(blank_to_none(form.description.as_ref()));
    active.image_url = Set(blank_to_none(form.image_url.as_ref()));
    active.project_url = Set(blank_to_none(form.project_url.as_ref()));
    active.category = Set(blank_to_none(form.category.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.description_color = Set(blank_to_none(form.description_color.as_ref()));
    active.enabled = Set(form.enabled.is_some());
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Flips an item's `enabled` flag and returns the new value.
///
/// Testimonials are section rows too, so they go through the section editor.
#[instrument(skip(db))]
pub async fn toggle_item_enabled(
    db: &DatabaseConnection,
    collection: ItemCollection,
    id: Uuid,
) -> Result<bool> {
    match collection {
        ItemCollection::Services => {
            let enabled = !get_service(db, id).await?.enabled;
            set_item_column::<_, Service>(
                db,
                service::Column::Id,
                service::Column::Enabled,
                service::Column::UpdatedAt,
                id,
                Expr::value(enabled),
            )
            .await?;
            Ok(enabled)
        }
        ItemCollection::PortfolioItems => {
            let enabled = !get_portfolio_item(db, id).await?.enabled;
            set_item_column::<_, PortfolioItem>(
                db,
                portfolio_item::Column::Id,
                portfolio_item::Column::Enabled,
                portfolio_item::Column::UpdatedAt,
                id,
                Expr::value(enabled),
            )
            .await?;
            Ok(enabled)
        }
        ItemCollection::Testimonials => {
            editor::toggle_section_enabled(db, SectionKey::new(SectionVariant::Testimonials, id))
                .await
        }
    }
}

/// Deletes an item.
///
/// # Errors
/// `NotFound` when `id` is not in `collection`.
#[instrument(skip(db))]
pub async fn delete_item(
    db: &DatabaseConnection,
    collection: ItemCollection,
    id: Uuid,
) -> Result<()> {
    let affected = match collection {
        ItemCollection::Services => Service::delete_by_id(id).exec(db).await?.rows_affected,
        ItemCollection::PortfolioItems => {
            PortfolioItem::delete_by_id(id).exec(db).await?.rows_affected
        }
        ItemCollection::Testimonials => {
            return editor::delete_section(
                db,
                SectionKey::new(SectionVariant::Testimonials, id),
            )
            .await;
        }
    };
    if affected == 0 {
        return Err(Error::not_found(collection.as_str(), id));
    }
    info!(%collection, %id, "Item deleted");
    Ok(())
}

/// New `display_order` values for moving `id` one step.
///
/// Neighbours exchange their values. When both share a value the exchange would be
/// invisible, so the whole collection is renumbered densely from its lowest value
/// instead.
/// Returns `None` when `id` is unknown and an empty list at a boundary.
#[must_use]
pub fn plan_item_move(
    orders: &[(Uuid, i32)],
    id: Uuid,
    direction: Direction,
) -> Option<Vec<(Uuid, i32)>> {
    let index = orders.iter().position(|(item, _)| *item == id)?;
    let Some(neighbour) = neighbour_index(index, orders.len(), direction) else {
        return Some(Vec::new());
    };

    let (target_id, target_order) = orders[index];
    let (neighbour_id, neighbour_order) = orders[neighbour];
    if target_order != neighbour_order {
        return Some(vec![
            (target_id, neighbour_order),
            (neighbour_id, target_order),
        ]);
    }

    let mut swapped = orders.to_vec();
    swapped.swap(index, neighbour);
    let start = orders[0].1;
    Some(
        swapped
            .into_iter()
            .zip(start..)
            .filter(|((_, from), to)| from != to)
            .map(|((item, _), to)| (item, to))
            .collect(),
    )
}

/// Moves an item one step up or down within its collection.
///
/// The global section order never changes: moving a testimonial reorders rows inside
/// the block only.
///
/// # Arguments
/// * `db` - Database connection
/// * `collection` - Collection the item lives in
/// * `id` - Item to move
/// * `direction` - `Up` towards the start of the collection, `Down` towards the end
///
/// # Returns
/// [`MoveOutcome::Unchanged`] at a boundary, otherwise [`MoveOutcome::Moved`].
///
/// # Errors
/// `NotFound` when `id` is not in `collection`.
#[instrument(skip(db))]
pub async fn move_item(
    db: &DatabaseConnection,
    collection: ItemCollection,
    id: Uuid,
    direction: Direction,
) -> Result<MoveOutcome> {
    let txn = db.begin().await?;

    let orders = match collection {
        ItemCollection::Services => {
            ordered_ids::<_, Service>(&txn, service::Column::Id, service::Column::DisplayOrder)
                .await?
        }
        ItemCollection::PortfolioItems => {
            ordered_ids::<_, PortfolioItem>(
                &txn,
                portfolio_item::Column::Id,
                portfolio_item::Column::DisplayOrder,
            )
            .await?
        }
        ItemCollection::Testimonials => {
            ordered_ids::<_, Testimonial>(
                &txn,
                testimonial::Column::Id,
                testimonial::Column::DisplayOrder,
            )
            .await?
        }
    };

    let writes = plan_item_move(&orders, id, direction)
        .ok_or_else(|| Error::not_found(collection.as_str(), id))?;
    if writes.is_empty() {
        return Ok(MoveOutcome::Unchanged);
    }

    // A dense renumber can widen the testimonials block past its last row
    if collection == ItemCollection::Testimonials {
        let last = orders.last().map_or(0, |(_, order)| *order);
        let widest = writes.iter().map(|(_, order)| *order).max().unwrap_or(last);
        store::open_gap(&txn, last + 1, widest - last).await?;
    }

    for (item, order) in &writes {
        let value = Expr::value(*order);
        match collection {
            ItemCollection::Services => {
                set_item_column::<_, Service>(
                    &txn,
                    service::Column::Id,
                    service::Column::DisplayOrder,
                    service::Column::UpdatedAt,
                    *item,
                    value,
                )
                .await?;
            }
            ItemCollection::PortfolioItems => {
                set_item_column::<_, PortfolioItem>(
                    &txn,
                    portfolio_item::Column::Id,
                    portfolio_item::Column::DisplayOrder,
                    portfolio_item::Column::UpdatedAt,
                    *item,
                    value,
                )
                .await?;
            }
            ItemCollection::Testimonials => {
                set_item_column::<_, Testimonial>(
                    &txn,
                    testimonial::Column::Id,
                    testimonial::Column::DisplayOrder,
                    testimonial::Column::UpdatedAt,
                    *item,
                    value,
                )
                .await?;
            }
        }
    }

    // The block's first row names the testimonials navigation entry
    if collection == ItemCollection::Testimonials {
        navigation::sync_variant(&txn, SectionVariant::Testimonials).await?;
        let shells = aggregator::list_all_shells(&txn).await?;
        navigation::sync_navigation_order(&txn, &shells).await?;
    }

    txn.commit().await?;
    info!(%collection, %id, ?direction, "Item moved");
    Ok(MoveOutcome::Moved)
}

async fn ordered_ids<C, E>(
    db: &C,
    id: E::Column,
    display_order: E::Column,
) -> Result<Vec<(Uuid, i32)>>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    Ok(E::find()
        .select_only()
        .column(id)
        .column(display_order)
        .order_by_asc(display_order)
        .order_by_asc(id)
        .into_tuple::<(Uuid, i32)>()
        .all(db)
        .await?)
}

async fn next_order<C, E>(db: &C, display_order: E::Column) -> Result<i32>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let max: Option<i32> = E::find()
        .select_only()
        .column_as(display_order.max(), "max_order")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    Ok(max.map_or(0, |max| max + 1))
}

async fn set_item_column<C, E>(
    db: &C,
    id_column: E::Column,
    column: E::Column,
    updated_at: E::Column,
    id: Uuid,
    value: SimpleExpr,
) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    E::update_many()
        .col_expr(column, value)
        .col_expr(updated_at, Expr::value(Utc::now()))
        .filter(id_column.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::section::SectionRecord;
    use crate::test_utils::{
        create_test_about, create_test_hero, create_test_service, create_test_testimonial,
        setup_test_db,
    };

    fn service_form(title: &str) -> ItemForm {
        ItemForm {
            title: Some(title.to_string()),
            description: Some(format!("{title} description")),
            enabled: Some("on".to_string()),
            ..ItemForm::default()
        }
    }

    #[test]
    fn test_plan_item_move_exchanges_values() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let orders = vec![(a, 0), (b, 5), (c, 9)];

        assert_eq!(
            plan_item_move(&orders, c, Direction::Up).unwrap(),
            vec![(c, 5), (b, 9)]
        );
        assert!(plan_item_move(&orders, a, Direction::Up).unwrap().is_empty());
        assert!(plan_item_move(&orders, Uuid::new_v4(), Direction::Up).is_none());
    }

    #[test]
    fn test_plan_item_move_renumbers_ties() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let orders = vec![(a, 0), (b, 0)];
        // b keeps 0, a moves after it
        assert_eq!(
            plan_item_move(&orders, a, Direction::Down).unwrap(),
            vec![(a, 1)]
        );
    }

    #[test]
    fn test_plan_item_move_renumbers_from_lowest_value() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let orders = vec![(a, 5), (b, 5), (c, 6)];
        assert_eq!(
            plan_item_move(&orders, b, Direction::Up).unwrap(),
            vec![(a, 6), (c, 7)]
        );
    }

    #[test]
    fn test_collection_tags() {
        for collection in [
            ItemCollection::Services,
            ItemCollection::PortfolioItems,
            ItemCollection::Testimonials,
        ] {
            assert_eq!(collection.as_str().parse::<ItemCollection>().unwrap(), collection);
        }
        assert!("news".parse::<ItemCollection>().is_err());
    }

    #[tokio::test]
    async fn test_create_service_requires_description() -> Result<()> {
        let db = setup_test_db().await?;
        let mut form = service_form("Design");
        form.description = None;
        assert!(matches!(
            create_service(&db, &form).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_services_are_ordered_locally() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_service(&db, &service_form("Design")).await?;
        let second = create_service(&db, &service_form("Build")).await?;
        assert_eq!((first.display_order, second.display_order), (0, 1));

        let outcome = move_item(&db, ItemCollection::Services, second.id, Direction::Up).await?;
        assert_eq!(outcome, MoveOutcome::Moved);

        let titles: Vec<String> = list_services(&db, Visibility::All)
            .await?
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Build".to_string(), "Design".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_items_are_hidden_from_public_list() -> Result<()> {
        let db = setup_test_db().await?;
        let service = create_test_service(&db, "Hosting", 0).await?;
        assert!(!toggle_item_enabled(&db, ItemCollection::Services, service.id).await?);

        assert!(list_services(&db, Visibility::EnabledOnly).await?.is_empty());
        assert_eq!(list_services(&db, Visibility::All).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_testimonial_move_keeps_block_slot() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_testimonial(&db, "Ada", 3).await?;
        let grace = create_test_testimonial(&db, "Grace", 4).await?;

        move_item(&db, ItemCollection::Testimonials, grace.id, Direction::Up).await?;

        let rows = list_testimonials(&db, Visibility::All).await?;
        let authors: Vec<(&str, i32)> = rows
            .iter()
            .map(|t| (t.author_name.as_str(), t.display_order))
            .collect();
        assert_eq!(authors, vec![("Grace", 3), ("Ada", 4)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_tied_testimonial_move_keeps_page_order() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_hero(&db, "Welcome", 0).await?;
        create_test_about(&db, "About", 1).await?;
        create_test_testimonial(&db, "Ada", 5).await?;
        create_test_testimonial(&db, "Bob", 5).await?;

        let page = |sections: Vec<SectionRecord>| -> Vec<SectionVariant> {
            sections.iter().map(SectionRecord::variant).collect()
        };
        let before = page(aggregator::list_ordered_sections(&db).await);

        let second = list_testimonials(&db, Visibility::All).await?[1].id;
        let outcome = move_item(&db, ItemCollection::Testimonials, second, Direction::Up).await?;
        assert_eq!(outcome, MoveOutcome::Moved);

        let rows = list_testimonials(&db, Visibility::All).await?;
        assert_eq!(rows[0].id, second);
        assert_eq!((rows[0].display_order, rows[1].display_order), (5, 6));
        assert_eq!(page(aggregator::list_ordered_sections(&db).await), before);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_portfolio_item() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_portfolio_item(
            &db,
            &ItemForm {
                title: Some("Harbour app".to_string()),
                ..ItemForm::default()
            },
        )
        .await?;
        assert!(!created.enabled);

        let mut form = ItemForm::from_portfolio_item(&created);
        form.category = Some("Mobile".to_string());
        form.enabled = Some("on".to_string());
        let updated = update_portfolio_item(&db, created.id, &form).await?;
        assert_eq!(updated.category.as_deref(), Some("Mobile"));
        assert!(updated.enabled);

        delete_item(&db, ItemCollection::PortfolioItems, created.id).await?;
        assert!(matches!(
            get_portfolio_item(&db, created.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
