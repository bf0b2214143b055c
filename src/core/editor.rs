//! Section editor - create, edit, toggle and delete section shells from admin forms.
//!
//! Every mutation keeps the navigation in step eagerly: the edited variant's stored
//! entry is re-synced to its representative inside the same transaction, and deleting
//! the last shell of a variant removes the variant from navigation.

use crate::{
    core::{
        aggregator, navigation,
        section::{SectionKey, SectionRecord, SectionVariant},
        store::{self, Visibility},
    },
    entities::{about_section, hero_section, portfolio_section, services_section, testimonial},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Accepted values for `subtitle_alignment`.
pub const SUBTITLE_ALIGNMENTS: [&str; 3] = ["left", "center", "justify"];

/// Admin section form, shared by all variants.
///
/// Fields a variant doesn't have are ignored. Every value arrives as text; blank
/// strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionForm {
    pub section_name: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    pub subtitle_alignment: Option<String>,
    pub content_color: Option<String>,
    pub content_font_size: Option<String>,
    pub primary_cta_text: Option<String>,
    pub primary_cta_link: Option<String>,
    pub primary_cta_text_color: Option<String>,
    pub primary_cta_bg_color: Option<String>,
    pub secondary_cta_text: Option<String>,
    pub secondary_cta_link: Option<String>,
    pub secondary_cta_text_color: Option<String>,
    pub secondary_cta_bg_color: Option<String>,
    pub background_image_url: Option<String>,
    pub background_overlay_color: Option<String>,
    pub background_overlay_opacity: Option<String>,
    pub quote: Option<String>,
    pub author_name: Option<String>,
    pub author_role: Option<String>,
    pub author_company: Option<String>,
    pub author_image_url: Option<String>,
    pub rating: Option<String>,
    pub quote_color: Option<String>,
    pub author_name_color: Option<String>,
    pub author_role_color: Option<String>,
    /// Checkbox: present (any value) means enabled
    pub enabled: Option<String>,
}

/// Trims a form value; blank becomes `None`.
#[must_use]
pub fn blank_to_none(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Returns the trimmed value of a required field.
pub fn require(value: Option<&String>, field: &str) -> Result<String> {
    blank_to_none(value).ok_or_else(|| Error::validation(format!("{field} is required")))
}

impl SectionForm {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.is_some()
    }

    /// Pre-fills a form from a stored shell, for the edit page.
    #[must_use]
    pub fn from_record(record: &SectionRecord) -> Self {
        let on = |enabled: bool| enabled.then(|| "on".to_string());
        match record {
            SectionRecord::Hero(m) => Self {
                section_name: m.section_name.clone(),
                title: Some(m.title.clone()),
                subtitle: m.subtitle.clone(),
                title_color: m.title_color.clone(),
                subtitle_color: m.subtitle_color.clone(),
                subtitle_alignment: m.subtitle_alignment.clone(),
                primary_cta_text: m.primary_cta_text.clone(),
                primary_cta_link: m.primary_cta_link.clone(),
                primary_cta_text_color: m.primary_cta_text_color.clone(),
                primary_cta_bg_color: m.primary_cta_bg_color.clone(),
                secondary_cta_text: m.secondary_cta_text.clone(),
                secondary_cta_link: m.secondary_cta_link.clone(),
                secondary_cta_text_color: m.secondary_cta_text_color.clone(),
                secondary_cta_bg_color: m.secondary_cta_bg_color.clone(),
                background_image_url: m.background_image_url.clone(),
                background_overlay_color: m.background_overlay_color.clone(),
                background_overlay_opacity: m.background_overlay_opacity.map(|o| o.to_string()),
                enabled: on(m.enabled),
                ..Self::default()
            },
            SectionRecord::About(m) => Self {
                section_name: m.section_name.clone(),
                title: Some(m.title.clone()),
                subtitle: m.subtitle.clone(),
                content: Some(m.content.clone()),
                image_url: m.image_url.clone(),
                title_color: m.title_color.clone(),
                subtitle_color: m.subtitle_color.clone(),
                content_color: m.content_color.clone(),
                content_font_size: m.content_font_size.clone(),
                enabled: on(m.enabled),
                ..Self::default()
            },
            SectionRecord::Services(m) => Self {
                section_name: m.section_name.clone(),
                title: m.title.clone(),
                subtitle: m.subtitle.clone(),
                title_color: m.title_color.clone(),
                subtitle_color: m.subtitle_color.clone(),
                enabled: on(m.enabled),
                ..Self::default()
            },
            SectionRecord::Portfolio(m) => Self {
                section_name: m.section_name.clone(),
                title: m.title.clone(),
                subtitle: m.subtitle.clone(),
                title_color: m.title_color.clone(),
                subtitle_color: m.subtitle_color.clone(),
                enabled: on(m.enabled),
                ..Self::default()
            },
            SectionRecord::Testimonials(m) => Self {
                section_name: m.section_name.clone(),
                quote: Some(m.quote.clone()),
                author_name: Some(m.author_name.clone()),
                author_role: m.author_role.clone(),
                author_company: m.author_company.clone(),
                author_image_url: m.author_image_url.clone(),
                rating: m.rating.map(|r| r.to_string()),
                quote_color: m.quote_color.clone(),
                author_name_color: m.author_name_color.clone(),
                author_role_color: m.author_role_color.clone(),
                enabled: on(m.enabled),
                ..Self::default()
            },
        }
    }

    /// Checks the variant's required fields and the numeric fields.
    pub fn validate(&self, variant: SectionVariant) -> Result<()> {
        match variant {
            SectionVariant::Hero => {
                require(self.title.as_ref(), "Title")?;
                self.overlay_opacity()?;
                self.alignment()?;
            }
            SectionVariant::About => {
                require(self.title.as_ref(), "Title")?;
                require(self.content.as_ref(), "Content")?;
            }
            SectionVariant::Testimonials => {
                require(self.quote.as_ref(), "Quote")?;
                require(self.author_name.as_ref(), "Author name")?;
                self.rating()?;
            }
            SectionVariant::Services | SectionVariant::Portfolio => {}
        }
        Ok(())
    }

    /// Parsed overlay opacity; must be a number in `[0, 1]`.
    pub fn overlay_opacity(&self) -> Result<Option<f64>> {
        let Some(raw) = blank_to_none(self.background_overlay_opacity.as_ref()) else {
            return Ok(None);
        };
        let value: f64 = raw
            .parse()
            .map_err(|_| Error::validation("Overlay opacity must be a number"))?;
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(Error::validation("Overlay opacity must be between 0 and 1"));
        }
        Ok(Some(value))
    }

    /// Parsed star rating. Any integer is stored; rendering clamps it.
    pub fn rating(&self) -> Result<Option<i32>> {
        blank_to_none(self.rating.as_ref())
            .map(|raw| {
                raw.parse()
                    .map_err(|_| Error::validation("Rating must be a whole number"))
            })
            .transpose()
    }

    fn alignment(&self) -> Result<Option<String>> {
        match blank_to_none(self.subtitle_alignment.as_ref()) {
            Some(a) if !SUBTITLE_ALIGNMENTS.contains(&a.as_str()) => Err(Error::validation(
                format!("Unknown subtitle alignment: {a}"),
            )),
            other => Ok(other),
        }
    }
}

fn apply_hero(form: &SectionForm, active: &mut hero_section::ActiveModel) -> Result<()> {
    active.title = Set(require(form.title.as_ref(), "Title")?);
    active.subtitle = Set(blank_to_none(form.subtitle.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.subtitle_color = Set(blank_to_none(form.subtitle_color.as_ref()));
    active.subtitle_alignment = Set(form.alignment()?);
    active.primary_cta_text = Set(blank_to_none(form.primary_cta_text.as_ref()));
    active.primary_cta_link = Set(blank_to_none(form.primary_cta_link.as_ref()));
    active.primary_cta_text_color = Set(blank_to_none(form.primary_cta_text_color.as_ref()));
    active.primary_cta_bg_color = Set(blank_to_none(form.primary_cta_bg_color.as_ref()));
    active.secondary_cta_text = Set(blank_to_none(form.secondary_cta_text.as_ref()));
    active.secondary_cta_link = Set(blank_to_none(form.secondary_cta_link.as_ref()));
    active.secondary_cta_text_color =
        Set(blank_to_none(form.secondary_cta_text_color.as_ref()));
    active.secondary_cta_bg_color = Set(blank_to_none(form.secondary_cta_bg_color.as_ref()));
    active.background_image_url = Set(blank_to_none(form.background_image_url.as_ref()));
    active.background_overlay_color =
        Set(blank_to_none(form.background_overlay_color.as_ref()));
    active.background_overlay_opacity = Set(form.overlay_opacity()?);
    active.section_name = Set(blank_to_none(form.section_name.as_ref()));
    active.enabled = Set(form.is_enabled());
    active.updated_at = Set(Utc::now());
    Ok(())
}

fn apply_about(form: &SectionForm, active: &mut about_section::ActiveModel) -> Result<()> {
    active.title = Set(require(form.title.as_ref(), "Title")?);
    active.subtitle = Set(blank_to_none(form.subtitle.as_ref()));
    active.content = Set(require(form.content.as_ref(), "Content")?);
    active.image_url = Set(blank_to_none(form.image_url.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.subtitle_color = Set(blank_to_none(form.subtitle_color.as_ref()));
    active.content_color = Set(blank_to_none(form.content_color.as_ref()));
    active.content_font_size = Set(blank_to_none(form.content_font_size.as_ref()));
    active.section_name = Set(blank_to_none(form.section_name.as_ref()));
    active.enabled = Set(form.is_enabled());
    active.updated_at = Set(Utc::now());
    Ok(())
}

fn apply_services(form: &SectionForm, active: &mut services_section::ActiveModel) {
    active.title = Set(blank_to_none(form.title.as_ref()));
    active.subtitle = Set(blank_to_none(form.subtitle.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.subtitle_color = Set(blank_to_none(form.subtitle_color.as_ref()));
    active.section_name = Set(blank_to_none(form.section_name.as_ref()));
    active.enabled = Set(form.is_enabled());
    active.updated_at = Set(Utc::now());
}

fn apply_portfolio(form: &SectionForm, active: &mut portfolio_section::ActiveModel) {
    active.title = Set(blank_to_none(form.title.as_ref()));
    active.subtitle = Set(blank_to_none(form.subtitle.as_ref()));
    active.title_color = Set(blank_to_none(form.title_color.as_ref()));
    active.subtitle_color = Set(blank_to_none(form.subtitle_color.as_ref()));
    active.section_name = Set(blank_to_none(form.section_name.as_ref()));
    active.enabled = Set(form.is_enabled());
    active.updated_at = Set(Utc::now());
}

fn apply_testimonial(form: &SectionForm, active: &mut testimonial::ActiveModel) -> Result<()> {
    active.quote = Set(require(form.quote.as_ref(), "Quote")?);
    active.author_name = Set(require(form.author_name.as_ref(), "Author name")?);
    active.author_role = Set(blank_to_none(form.author_role.as_ref()));
    active.author_company = Set(blank_to_none(form.author_company.as_ref()));
    active.author_image_url = Set(blank_to_none(form.author_image_url.as_ref()));
    active.rating = Set(form.rating()?);
    active.quote_color = Set(blank_to_none(form.quote_color.as_ref()));
    active.author_name_color = Set(blank_to_none(form.author_name_color.as_ref()));
    active.author_role_color = Set(blank_to_none(form.author_role_color.as_ref()));
    active.section_name = Set(blank_to_none(form.section_name.as_ref()));
    active.enabled = Set(form.is_enabled());
    active.updated_at = Set(Utc::now());
    Ok(())
}

/// Order for a new shell: after everything on the page. A new testimonial joins the
/// end of the existing block instead, pushing later shells down so the block stays
/// contiguous.
async fn next_display_order<C>(db: &C, variant: SectionVariant) -> Result<i32>
where
    C: ConnectionTrait,
{
    if variant == SectionVariant::Testimonials {
        let rows = store::load_variant(db, variant, Visibility::All).await?;
        if let Some(last) = rows.last() {
            let order = last.display_order() + 1;
            let shifted = store::open_gap(db, order, 1).await?;
            debug!(order, shifted, "Testimonials block extended");
            return Ok(order);
        }
    }
    let shells = aggregator::list_all_shells(db).await?;
    Ok(shells
        .iter()
        .map(SectionRecord::display_order)
        .max()
        .map_or(0, |max| max + 1))
}

/// Lists one variant's shells for the admin, disabled ones included.
pub async fn list_variant_sections<C>(db: &C, variant: SectionVariant) -> Result<Vec<SectionRecord>>
where
    C: ConnectionTrait,
{
    store::load_variant(db, variant, Visibility::All).await
}

/// Creates a new shell of `variant` from a submitted form.
///
/// The shell goes after everything on the page; a testimonial joins the end of the
/// block. The variant's navigation entry, if any, is re-synced in the same transaction.
///
/// # Arguments
/// * `db` - Database connection
/// * `variant` - Which collection the shell belongs to
/// * `form` - Submitted admin form; fields the variant doesn't have are ignored
///
/// # Returns
/// The stored record
///
/// # Errors
/// `Validation` when a required field is blank or a numeric field doesn't parse.
#[instrument(skip(db, form))]
pub async fn create_section(
    db: &DatabaseConnection,
    variant: SectionVariant,
    form: &SectionForm,
) -> Result<SectionRecord> {
    form.validate(variant)?;
    let txn = db.begin().await?;

    let id = Uuid::new_v4();
    let order = next_display_order(&txn, variant).await?;
    let now = Utc::now();

    let record = match variant {
        SectionVariant::Hero => {
            let mut active = hero_section::ActiveModel {
                id: Set(id),
                display_order: Set(order),
                created_at: Set(now),
                ..Default::default()
            };
            apply_hero(form, &mut active)?;
            SectionRecord::Hero(active.insert(&txn).await?)
        }
        SectionVariant::About => {
            let mut active = about_section::ActiveModel {
                id: Set(id),
                display_order: Set(order),
                created_at: Set(now),
                ..Default::default()
            };
            apply_about(form, &mut active)?;
            SectionRecord::About(active.insert(&txn).await?)
        }
        SectionVariant::Services => {
            let mut active = services_section::ActiveModel {
                id: Set(id),
                display_order: Set(order),
                created_at: Set(now),
                ..Default::default()
            };
            apply_services(form, &mut active);
            SectionRecord::Services(active.insert(&txn).await?)
        }
        SectionVariant::Portfolio => {
            let mut active = portfolio_section::ActiveModel {
                id: Set(id),
                display_order: Set(order),
                created_at: Set(now),
                ..Default::default()
            };
            apply_portfolio(form, &mut active);
            SectionRecord::Portfolio(active.insert(&txn).await?)
        }
        SectionVariant::Testimonials => {
            let mut active = testimonial::ActiveModel {
                id: Set(id),
                display_order: Set(order),
                created_at: Set(now),
                ..Default::default()
            };
            apply_testimonial(form, &mut active)?;
            SectionRecord::Testimonials(active.insert(&txn).await?)
        }
    };

    navigation::sync_variant(&txn, variant).await?;
    if variant == SectionVariant::Testimonials {
        let shells = aggregator::list_all_shells(&txn).await?;
        navigation::sync_navigation_order(&txn, &shells).await?;
    }
    txn.commit().await?;
    info!(key = %record.key(), order, "Section created");
    Ok(record)
}

/// Overwrites a shell's editable fields from a submitted form. Position is untouched.
///
/// # Errors
/// `Validation` for a bad form, `NotFound` when `key` names no shell.
#[instrument(skip(db, form))]
pub async fn update_section(
    db: &DatabaseConnection,
    key: SectionKey,
    form: &SectionForm,
) -> Result<SectionRecord> {
    form.validate(key.variant)?;
    let txn = db.begin().await?;

    let record = match store::get_section(&txn, key).await? {
        SectionRecord::Hero(model) => {
            let mut active: hero_section::ActiveModel = model.into();
            apply_hero(form, &mut active)?;
            SectionRecord::Hero(active.update(&txn).await?)
        }
        SectionRecord::About(model) => {
            let mut active: about_section::ActiveModel = model.into();
            apply_about(form, &mut active)?;
            SectionRecord::About(active.update(&txn).await?)
        }
        SectionRecord::Services(model) => {
            let mut active: services_section::ActiveModel = model.into();
            apply_services(form, &mut active);
            SectionRecord::Services(active.update(&txn).await?)
        }
        SectionRecord::Portfolio(model) => {
            let mut active: portfolio_section::ActiveModel = model.into();
            apply_portfolio(form, &mut active);
            SectionRecord::Portfolio(active.update(&txn).await?)
        }
        SectionRecord::Testimonials(model) => {
            let mut active: testimonial::ActiveModel = model.into();
            apply_testimonial(form, &mut active)?;
            SectionRecord::Testimonials(active.update(&txn).await?)
        }
    };

    navigation::sync_variant(&txn, key.variant).await?;
    txn.commit().await?;
    info!(%key, "Section updated");
    Ok(record)
}

/// Flips a shell's `enabled` flag. The slot in the page order is kept.
///
/// # Returns
/// The new `enabled` value
///
/// # Errors
/// `NotFound` when `key` names no shell.
#[instrument(skip(db))]
pub async fn toggle_section_enabled(db: &DatabaseConnection, key: SectionKey) -> Result<bool> {
    let txn = db.begin().await?;
    let enabled = !store::get_section(&txn, key).await?.enabled();
    store::set_enabled(&txn, key, enabled).await?;
    navigation::sync_variant(&txn, key.variant).await?;
    txn.commit().await?;
    info!(%key, enabled, "Section visibility toggled");
    Ok(enabled)
}

/// Deletes a shell. The variant leaves navigation once its last shell is gone.
#[instrument(skip(db))]
pub async fn delete_section(db: &DatabaseConnection, key: SectionKey) -> Result<()> {
    let txn = db.begin().await?;
    store::delete_section(&txn, key).await?;

    let remaining = store::load_variant(&txn, key.variant, Visibility::All).await?;
    if remaining.is_empty() {
        navigation::remove_variant(&txn, key.variant).await?;
    } else {
        navigation::sync_variant(&txn, key.variant).await?;
    }

    txn.commit().await?;
    info!(%key, "Section deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::navigation::{load_members, toggle_navigation_membership};
    use crate::core::reorder::{MoveOutcome, move_section};
    use crate::core::section::Direction;
    use crate::test_utils::{
        create_test_about, create_test_hero, create_test_testimonial, setup_test_db,
    };

    fn hero_form(title: &str) -> SectionForm {
        SectionForm {
            title: Some(title.to_string()),
            enabled: Some("on".to_string()),
            ..SectionForm::default()
        }
    }

    async fn public_variants(db: &DatabaseConnection) -> Vec<SectionVariant> {
        aggregator::list_ordered_sections(db)
            .await
            .iter()
            .map(SectionRecord::variant)
            .collect()
    }

    #[test]
    fn test_validate_required_fields() {
        assert!(SectionForm::default().validate(SectionVariant::Services).is_ok());
        assert!(SectionForm::default().validate(SectionVariant::Hero).is_err());

        let about = SectionForm {
            title: Some("About".to_string()),
            content: Some("   ".to_string()),
            ..SectionForm::default()
        };
        let err = about.validate(SectionVariant::About).unwrap_err();
        assert_eq!(err.to_string(), "Content is required");

        let testimonial = SectionForm {
            quote: Some("Great work".to_string()),
            ..SectionForm::default()
        };
        assert!(testimonial.validate(SectionVariant::Testimonials).is_err());
    }

    #[test]
    fn test_overlay_opacity_parsing() {
        let mut form = hero_form("Hero");
        form.background_overlay_opacity = Some("0.5".to_string());
        assert_eq!(form.overlay_opacity().unwrap(), Some(0.5));

        form.background_overlay_opacity = Some(String::new());
        assert_eq!(form.overlay_opacity().unwrap(), None);

        for bad in ["1.5", "-0.1", "NaN", "dark"] {
            form.background_overlay_opacity = Some(bad.to_string());
            assert!(form.validate(SectionVariant::Hero).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_rating_accepts_any_integer() {
        let form = SectionForm {
            rating: Some("7".to_string()),
            ..SectionForm::default()
        };
        assert_eq!(form.rating().unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_create_section_appends_to_page() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_hero(&db, "Welcome", 0).await?;
        create_test_about(&db, "About", 4).await?;

        let mut form = hero_form("Second hero");
        form.subtitle = Some("  ".to_string());
        let created = create_section(&db, SectionVariant::Hero, &form).await?;

        assert_eq!(created.display_order(), 5);
        assert!(created.enabled());
        match created {
            SectionRecord::Hero(hero) => assert_eq!(hero.subtitle, None),
            other => panic!("unexpected record {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_testimonial_block_places_the_same_in_admin_and_public() -> Result<()> {
        let db = setup_test_db().await?;
        let testimonial = |author: &str| SectionForm {
            quote: Some(format!("{author} was delighted")),
            author_name: Some(author.to_string()),
            enabled: Some("on".to_string()),
            ..SectionForm::default()
        };
        let about = SectionForm {
            title: Some("About".to_string()),
            content: Some("We build things.".to_string()),
            enabled: Some("on".to_string()),
            ..SectionForm::default()
        };

        create_section(&db, SectionVariant::Hero, &hero_form("Welcome")).await?;
        let first = create_section(&db, SectionVariant::Testimonials, &testimonial("Ada")).await?;
        create_section(&db, SectionVariant::About, &about).await?;
        create_section(&db, SectionVariant::Testimonials, &testimonial("Grace")).await?;
        toggle_section_enabled(&db, first.key()).await?;

        let admin: Vec<SectionVariant> = aggregator::list_all_sections(&db)
            .await?
            .iter()
            .filter(|record| record.enabled())
            .map(SectionRecord::variant)
            .collect();
        let before = public_variants(&db).await;
        assert_eq!(
            before,
            vec![
                SectionVariant::Hero,
                SectionVariant::Testimonials,
                SectionVariant::About,
            ]
        );
        assert_eq!(admin, before);

        let outcome = move_section(&db, first.key(), Direction::Down).await?;
        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(
            public_variants(&db).await,
            vec![
                SectionVariant::Hero,
                SectionVariant::About,
                SectionVariant::Testimonials,
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_new_testimonial_does_not_share_an_order() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_testimonial(&db, "Ada", 0).await?;
        let about = create_test_about(&db, "About", 1).await?;

        let form = SectionForm {
            quote: Some("Lovely".to_string()),
            author_name: Some("Grace".to_string()),
            ..SectionForm::default()
        };
        let grace = create_section(&db, SectionVariant::Testimonials, &form).await?;

        assert_eq!(grace.display_order(), 1);
        let about = store::get_section(&db, SectionKey::new(SectionVariant::About, about.id)).await?;
        assert_eq!(about.display_order(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_resyncs_navigation_label() -> Result<()> {
        let db = setup_test_db().await?;
        let hero = create_test_hero(&db, "Welcome", 0).await?;
        toggle_navigation_membership(&db, SectionVariant::Hero).await?;

        let mut form = hero_form("Welcome");
        form.section_name = Some("Home".to_string());
        update_section(&db, SectionKey::new(SectionVariant::Hero, hero.id), &form).await?;

        let members = load_members(&db).await?;
        assert_eq!(members[0].label, "Home");
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_section_enabled() -> Result<()> {
        let db = setup_test_db().await?;
        let about = create_test_about(&db, "About", 0).await?;
        let key = SectionKey::new(SectionVariant::About, about.id);

        assert!(!toggle_section_enabled(&db, key).await?);
        assert!(!store::get_section(&db, key).await?.enabled());
        assert!(toggle_section_enabled(&db, key).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_last_shell_removes_navigation_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_hero(&db, "First", 0).await?;
        let second = create_test_hero(&db, "Second", 1).await?;
        toggle_navigation_membership(&db, SectionVariant::Hero).await?;

        delete_section(&db, SectionKey::new(SectionVariant::Hero, first.id)).await?;
        let members = load_members(&db).await?;
        assert_eq!(members.len(), 1);
        // Re-synced to the new representative's position
        assert_eq!(members[0].display_order, 1);

        delete_section(&db, SectionKey::new(SectionVariant::Hero, second.id)).await?;
        assert!(load_members(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_section_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let key = SectionKey::new(SectionVariant::Hero, Uuid::new_v4());
        let result = update_section(&db, key, &hero_form("Ghost")).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }
}
