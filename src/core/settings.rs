//! Site settings - the singleton company profile and its fallback values.
//!
//! The page never fails for lack of settings: reads degrade to the fallback model
//! built from [`DEFAULT_SITE_SETTINGS`] once at startup and carried in the app state.

use crate::{
    entities::{SiteSettings, site_settings},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Columns a patch may never touch.
const PROTECTED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Fallback values for the company profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteDefaults {
    pub company_name: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub background_color: &'static str,
    pub background_color_dark: &'static str,
    pub text_color: &'static str,
    pub text_color_dark: &'static str,
    pub accent_color: &'static str,
    pub accent_color_hover: &'static str,
    pub border_color: &'static str,
    pub border_color_dark: &'static str,
    pub font_family: &'static str,
}

/// Shown whenever no settings row can be read.
pub const DEFAULT_SITE_SETTINGS: SiteDefaults = SiteDefaults {
    company_name: "Your Company",
    primary_color: "#2563eb",
    secondary_color: "#1e40af",
    background_color: "#ffffff",
    background_color_dark: "#0a0a0a",
    text_color: "#171717",
    text_color_dark: "#ededed",
    accent_color: "#2563eb",
    accent_color_hover: "#1e40af",
    border_color: "#e5e7eb",
    border_color_dark: "#374151",
    font_family: "Inter",
};

impl SiteDefaults {
    /// The fallback as a settings row under the singleton id.
    #[must_use]
    pub fn to_model(&self) -> site_settings::Model {
        let epoch = DateTime::<Utc>::default();
        site_settings::Model {
            id: site_settings::SINGLETON_ID,
            company_name: self.company_name.to_string(),
            company_tagline: None,
            logo_url: None,
            favicon_url: None,
            primary_color: self.primary_color.to_string(),
            secondary_color: self.secondary_color.to_string(),
            background_color: Some(self.background_color.to_string()),
            background_color_dark: Some(self.background_color_dark.to_string()),
            text_color: Some(self.text_color.to_string()),
            text_color_dark: Some(self.text_color_dark.to_string()),
            accent_color: Some(self.accent_color.to_string()),
            accent_color_hover: Some(self.accent_color_hover.to_string()),
            border_color: Some(self.border_color.to_string()),
            border_color_dark: Some(self.border_color_dark.to_string()),
            header_background_color: None,
            header_text_color: None,
            font_family: Some(self.font_family.to_string()),
            contact_email: None,
            contact_phone: None,
            contact_address: None,
            social_facebook: None,
            social_twitter: None,
            social_linkedin: None,
            social_instagram: None,
            created_at: epoch,
            updated_at: epoch,
        }
    }
}

/// Reads the stored settings row, if there is one.
pub async fn find_site_settings<C>(db: &C) -> Result<Option<site_settings::Model>>
where
    C: ConnectionTrait,
{
    Ok(SiteSettings::find_by_id(site_settings::SINGLETON_ID)
        .one(db)
        .await?)
}

/// Returns the stored settings, or `fallback` when the row is missing or unreadable.
#[instrument(skip_all)]
pub async fn get_site_settings<C>(db: &C, fallback: &site_settings::Model) -> site_settings::Model
where
    C: ConnectionTrait,
{
    match find_site_settings(db).await {
        Ok(Some(settings)) => settings,
        Ok(None) => fallback.clone(),
        Err(e) => {
            warn!("Site settings unavailable, using defaults: {}", e);
            fallback.clone()
        }
    }
}

/// Inserts the fallback row if the singleton doesn't exist yet.
///
/// # Returns
/// `true` if a row was created
pub async fn seed_site_settings<C>(db: &C, fallback: &site_settings::Model) -> Result<bool>
where
    C: ConnectionTrait,
{
    if find_site_settings(db).await?.is_some() {
        return Ok(false);
    }
    let mut model = fallback.clone();
    let now = Utc::now();
    model.created_at = now;
    model.updated_at = now;
    model.into_active_model().reset_all().insert(db).await?;
    info!("Seeded default site settings");
    Ok(true)
}

/// Merges a JSON object onto the settings row and returns the updated row.
///
/// `id` and the timestamps are ignored; unknown fields and type mismatches are
/// rejected. When no row exists yet the patch is applied to `fallback` and inserted.
///
/// # Errors
/// `Validation` for a non-object body, an unknown field, a wrong type or a blank
/// company name.
#[instrument(skip_all)]
pub async fn merge_site_settings<C>(
    db: &C,
    fallback: &site_settings::Model,
    patch: Value,
) -> Result<site_settings::Model>
where
    C: ConnectionTrait,
{
    let Value::Object(patch) = patch else {
        return Err(Error::validation("Request body must be a JSON object"));
    };

    let stored = find_site_settings(db).await?;
    let exists = stored.is_some();
    let current = stored.unwrap_or_else(|| fallback.clone());

    let mut merged = apply_patch(&current, patch)?;
    merged.id = site_settings::SINGLETON_ID;
    merged.created_at = if exists { current.created_at } else { Utc::now() };
    merged.updated_at = Utc::now();

    if merged.company_name.trim().is_empty() {
        return Err(Error::validation("Company name is required"));
    }

    let active = merged.into_active_model().reset_all();
    let saved = if exists {
        active.update(db).await?
    } else {
        active.insert(db).await?
    };

    info!(company = %saved.company_name, "Site settings updated");
    Ok(saved)
}

/// Overlays `patch` onto `current` field by field.
fn apply_patch(
    current: &site_settings::Model,
    patch: Map<String, Value>,
) -> Result<site_settings::Model> {
    let Value::Object(mut fields) = serde_json::to_value(current)? else {
        return Err(Error::validation("Site settings did not serialize to an object"));
    };

    for (key, value) in patch {
        if PROTECTED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if !fields.contains_key(&key) {
            return Err(Error::validation(format!("Unknown site settings field: {key}")));
        }
        fields.insert(key, value);
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| Error::validation(format!("Invalid site settings: {e}")))
}

/// Turns a submitted profile form into a patch. Blank values clear the field.
#[must_use]
pub fn profile_form_patch(form: &HashMap<String, String>) -> Value {
    Value::Object(
        form.iter()
            .map(|(key, value)| {
                let value = value.trim();
                let value = if value.is_empty() {
                    Value::Null
                } else {
                    Value::String(value.to_string())
                };
                (key.clone(), value)
            })
            .collect(),
    )
}
