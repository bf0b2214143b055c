//! Admin area handlers. Every route here sits behind [`require_admin_page`].

use crate::{
    core::{
        aggregator::list_all_sections,
        editor::{self, SectionForm, list_variant_sections},
        footer::{FooterForm, FooterKind, find_footer, upsert_footer},
        items::{self, ItemCollection, ItemForm},
        navigation::{member_variants, toggle_navigation_membership},
        news::{self, ArticleForm},
        reorder::move_section,
        section::{Direction, SectionKey, SectionVariant},
        settings::{get_site_settings, merge_site_settings, profile_form_patch},
        store::{Visibility, get_section},
    },
    errors::{Error, Result},
    render::admin::{
        Flash, ItemRow, SectionsTab, SectionsView, render_article_form, render_contact_info,
        render_footer_forms, render_item_form, render_items_manager, render_news_list,
        render_profile, render_section_form, render_sections_manager,
    },
    storage::Bucket,
    web::{
        error::{ApiError, PageError},
        state::AppState,
    },
};
use axum::{
    Form, Json,
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

type PageResult = std::result::Result<Response, PageError>;

/// Anonymous callers go to the login page, signed-in non-admins to the home page.
pub async fn require_admin_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.authorize(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(Error::Unauthorized) => {
            debug!(path = %request.uri().path(), "Anonymous admin request");
            Redirect::to(&state.config.login_url).into_response()
        }
        Err(_) => Redirect::to("/").into_response(),
    }
}

fn html(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

/// Re-renders a form with the validation message; other errors propagate.
fn form_failure(error: Error, render: impl FnOnce(&str) -> Markup) -> PageResult {
    match error {
        Error::Validation { message } => {
            Ok((StatusCode::BAD_REQUEST, Html(render(&message).into_string())).into_response())
        }
        other => Err(PageError(other)),
    }
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::validation(format!("Invalid id: {raw}")))
}

fn section_key(variant: &str, id: &str) -> Result<SectionKey> {
    Ok(SectionKey::new(variant.parse()?, parse_uuid(id)?))
}

fn sections_tab_url(variant: SectionVariant) -> String {
    format!("/admin/sections?tab={variant}")
}

#[derive(Debug, Deserialize)]
pub struct MoveForm {
    pub direction: Direction,
}

// Company profile

/// `GET /admin`
pub async fn profile(State(state): State<AppState>) -> Response {
    let settings = get_site_settings(&state.db, &state.fallback_settings).await;
    html(render_profile(&settings, None))
}

/// `POST /admin`
pub async fn save_profile(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> PageResult {
    match merge_site_settings(&state.db, &state.fallback_settings, profile_form_patch(&form)).await {
        Ok(settings) => Ok(html(render_profile(&settings, Some(Flash::Notice("Profile saved."))))),
        Err(error) => {
            let settings = get_site_settings(&state.db, &state.fallback_settings).await;
            form_failure(error, |message| render_profile(&settings, Some(Flash::Error(message))))
        }
    }
}

// Sections

#[derive(Debug, Default, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

/// `GET /admin/sections?tab=`
pub async fn sections(State(state): State<AppState>, Query(query): Query<TabQuery>) -> PageResult {
    let tab = SectionsTab::from_query(query.tab.as_deref());
    let ordered = list_all_sections(&state.db).await?;
    let nav_members = member_variants(&state.db).await?;
    let variant_rows = match tab {
        SectionsTab::Variant(variant) => list_variant_sections(&state.db, variant).await?,
        SectionsTab::Order => Vec::new(),
    };

    Ok(html(render_sections_manager(&SectionsView {
        tab,
        ordered: &ordered,
        variant_rows: &variant_rows,
        nav_members: &nav_members,
        flash: None,
    })))
}

/// `GET /admin/sections/:variant/new`
pub async fn new_section(Path(variant): Path<String>) -> PageResult {
    let variant: SectionVariant = variant.parse()?;
    Ok(html(render_section_form(variant, None, &SectionForm::default(), None)))
}

/// `POST /admin/sections/:variant`
pub async fn create_section(
    State(state): State<AppState>,
    Path(variant): Path<String>,
    Form(form): Form<SectionForm>,
) -> PageResult {
    let variant: SectionVariant = variant.parse()?;
    match editor::create_section(&state.db, variant, &form).await {
        Ok(_) => Ok(Redirect::to(&sections_tab_url(variant)).into_response()),
        Err(error) => form_failure(error, |message| {
            render_section_form(variant, None, &form, Some(Flash::Error(message)))
        }),
    }
}

/// `GET /admin/sections/:variant/:id`
pub async fn edit_section(
    State(state): State<AppState>,
    Path((variant, id)): Path<(String, String)>,
) -> PageResult {
    let key = section_key(&variant, &id)?;
    let record = get_section(&state.db, key).await?;
    let form = SectionForm::from_record(&record);
    Ok(html(render_section_form(key.variant, Some(key), &form, None)))
}

/// `POST /admin/sections/:variant/:id`
pub async fn update_section(
    State(state): State<AppState>,
    Path((variant, id)): Path<(String, String)>,
    Form(form): Form<SectionForm>,
) -> PageResult {
    let key = section_key(&variant, &id)?;
    match editor::update_section(&state.db, key, &form).await {
        Ok(_) => Ok(Redirect::to(&sections_tab_url(key.variant)).into_response()),
        Err(error) => form_failure(error, |message| {
            render_section_form(key.variant, Some(key), &form, Some(Flash::Error(message)))
        }),
    }
}

/// `POST /admin/sections/:variant/:id/toggle`
pub async fn toggle_section(
    State(state): State<AppState>,
    Path((variant, id)): Path<(String, String)>,
) -> PageResult {
    let key = section_key(&variant, &id)?;
    editor::toggle_section_enabled(&state.db, key).await?;
    Ok(Redirect::to(&sections_tab_url(key.variant)).into_response())
}

/// `POST /admin/sections/:variant/:id/delete`
pub async fn delete_section(
    State(state): State<AppState>,
    Path((variant, id)): Path<(String, String)>,
) -> PageResult {
    let key = section_key(&variant, &id)?;
    editor::delete_section(&state.db, key).await?;
    Ok(Redirect::to(&sections_tab_url(key.variant)).into_response())
}

/// `POST /admin/sections/:variant/:id/move`
pub async fn move_section_handler(
    State(state): State<AppState>,
    Path((variant, id)): Path<(String, String)>,
    Form(form): Form<MoveForm>,
) -> PageResult {
    let key = section_key(&variant, &id)?;
    let outcome = move_section(&state.db, key, form.direction).await?;
    debug!(%key, ?outcome, "Section move handled");
    Ok(Redirect::to("/admin/sections").into_response())
}

/// `POST /admin/navigation/:variant/toggle`
pub async fn toggle_navigation(
    State(state): State<AppState>,
    Path(variant): Path<String>,
) -> PageResult {
    let variant: SectionVariant = variant.parse()?;
    toggle_navigation_membership(&state.db, variant).await?;
    Ok(Redirect::to("/admin/sections").into_response())
}

// Item collections

async fn item_rows(state: &AppState, collection: ItemCollection) -> Result<Vec<ItemRow>> {
    let db = &state.db;
    let rows = match collection {
        ItemCollection::Services => items::list_services(db, Visibility::All)
            .await?
            .into_iter()
            .map(|m| ItemRow {
                id: m.id,
                title: m.title,
                detail: m.icon,
                enabled: m.enabled,
            })
            .collect(),
        ItemCollection::PortfolioItems => items::list_portfolio_items(db, Visibility::All)
            .await?
            .into_iter()
            .map(|m| ItemRow {
                id: m.id,
                title: m.title,
                detail: m.category,
                enabled: m.enabled,
            })
            .collect(),
        ItemCollection::Testimonials => items::list_testimonials(db, Visibility::All)
            .await?
            .into_iter()
            .map(|m| ItemRow {
                id: m.id,
                title: m.author_name,
                detail: m.author_company,
                enabled: m.enabled,
            })
            .collect(),
    };
    Ok(rows)
}

fn items_url(collection: ItemCollection) -> String {
    format!("/admin/items/{collection}")
}

/// `GET /admin/items/:collection`
pub async fn items_index(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    let rows = item_rows(&state, collection).await?;
    Ok(html(render_items_manager(collection, &rows, None)))
}

/// `GET /admin/items/:collection/new`
pub async fn new_item(Path(collection): Path<String>) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    if collection == ItemCollection::Testimonials {
        return Ok(Redirect::to("/admin/sections/testimonials/new").into_response());
    }
    Ok(html(render_item_form(collection, None, &ItemForm::default(), None)))
}

/// `POST /admin/items/:collection`
pub async fn create_item(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Form(form): Form<ItemForm>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    let created = match collection {
        ItemCollection::Services => items::create_service(&state.db, &form).await.map(|_| ()),
        ItemCollection::PortfolioItems => {
            items::create_portfolio_item(&state.db, &form).await.map(|_| ())
        }
        ItemCollection::Testimonials => {
            return Err(Error::validation("Testimonials are created as sections").into());
        }
    };
    match created {
        Ok(()) => Ok(Redirect::to(&items_url(collection)).into_response()),
        Err(error) => form_failure(error, |message| {
            render_item_form(collection, None, &form, Some(Flash::Error(message)))
        }),
    }
}

/// `GET /admin/items/:collection/:id`
pub async fn edit_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    let id = parse_uuid(&id)?;
    let form = match collection {
        ItemCollection::Services => ItemForm::from_service(&items::get_service(&state.db, id).await?),
        ItemCollection::PortfolioItems => {
            ItemForm::from_portfolio_item(&items::get_portfolio_item(&state.db, id).await?)
        }
        ItemCollection::Testimonials => {
            return Ok(Redirect::to(&format!("/admin/sections/testimonials/{id}")).into_response());
        }
    };
    Ok(html(render_item_form(collection, Some(id), &form, None)))
}

/// `POST /admin/items/:collection/:id`
pub async fn update_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Form(form): Form<ItemForm>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    let id = parse_uuid(&id)?;
    let updated = match collection {
        ItemCollection::Services => items::update_service(&state.db, id, &form).await.map(|_| ()),
        ItemCollection::PortfolioItems => items::update_portfolio_item(&state.db, id, &form)
            .await
            .map(|_| ()),
        ItemCollection::Testimonials => {
            return Err(Error::validation("Testimonials are edited as sections").into());
        }
    };
    match updated {
        Ok(()) => Ok(Redirect::to(&items_url(collection)).into_response()),
        Err(error) => form_failure(error, |message| {
            render_item_form(collection, Some(id), &form, Some(Flash::Error(message)))
        }),
    }
}

/// `POST /admin/items/:collection/:id/toggle`
pub async fn toggle_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    items::toggle_item_enabled(&state.db, collection, parse_uuid(&id)?).await?;
    Ok(Redirect::to(&items_url(collection)).into_response())
}

/// `POST /admin/items/:collection/:id/delete`
pub async fn delete_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    items::delete_item(&state.db, collection, parse_uuid(&id)?).await?;
    Ok(Redirect::to(&items_url(collection)).into_response())
}

/// `POST /admin/items/:collection/:id/move`
pub async fn move_item(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Form(form): Form<MoveForm>,
) -> PageResult {
    let collection: ItemCollection = collection.parse()?;
    items::move_item(&state.db, collection, parse_uuid(&id)?, form.direction).await?;
    Ok(Redirect::to(&items_url(collection)).into_response())
}

// News

/// `GET /admin/news`
pub async fn news_index(State(state): State<AppState>) -> PageResult {
    let articles = news::list_articles(&state.db).await?;
    Ok(html(render_news_list(&articles, None)))
}

/// `GET /admin/news/new`
pub async fn new_article() -> Response {
    html(render_article_form(None, &ArticleForm::default(), None))
}

/// `POST /admin/news`
pub async fn create_article(
    State(state): State<AppState>,
    Form(form): Form<ArticleForm>,
) -> PageResult {
    match news::create_article(&state.db, &form).await {
        Ok(_) => Ok(Redirect::to("/admin/news").into_response()),
        Err(error) => form_failure(error, |message| {
            render_article_form(None, &form, Some(Flash::Error(message)))
        }),
    }
}

/// `GET /admin/news/:id`
pub async fn edit_article(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let id = parse_uuid(&id)?;
    let article = news::get_article(&state.db, id).await?;
    Ok(html(render_article_form(Some(id), &ArticleForm::from_model(&article), None)))
}

/// `POST /admin/news/:id`
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ArticleForm>,
) -> PageResult {
    let id = parse_uuid(&id)?;
    match news::update_article(&state.db, id, &form).await {
        Ok(_) => Ok(Redirect::to("/admin/news").into_response()),
        Err(error) => form_failure(error, |message| {
            render_article_form(Some(id), &form, Some(Flash::Error(message)))
        }),
    }
}

/// `POST /admin/news/:id/publish`
pub async fn toggle_article(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    news::toggle_published(&state.db, parse_uuid(&id)?).await?;
    Ok(Redirect::to("/admin/news").into_response())
}

/// `POST /admin/news/:id/delete`
pub async fn delete_article(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    news::delete_article(&state.db, parse_uuid(&id)?).await?;
    Ok(Redirect::to("/admin/news").into_response())
}

// Footer and contact

async fn footer_blocks(state: &AppState) -> Result<Vec<(FooterKind, FooterForm)>> {
    let mut blocks = Vec::with_capacity(FooterKind::ALL.len());
    for kind in FooterKind::ALL {
        let form = find_footer(&state.db, kind)
            .await?
            .map(|row| FooterForm {
                title: row.title,
                content: row.content,
                enabled: row.enabled.then(|| "on".to_string()),
            })
            .unwrap_or_else(|| FooterForm {
                enabled: Some("on".to_string()),
                ..FooterForm::default()
            });
        blocks.push((kind, form));
    }
    Ok(blocks)
}

/// `GET /admin/footer`
pub async fn footer(State(state): State<AppState>) -> PageResult {
    let blocks = footer_blocks(&state).await?;
    Ok(html(render_footer_forms(&blocks, None)))
}

/// `POST /admin/footer/:kind`
pub async fn save_footer(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Form(form): Form<FooterForm>,
) -> PageResult {
    let kind: FooterKind = kind.parse()?;
    let message = match upsert_footer(&state.db, kind, &form).await {
        Ok(_) => Flash::Notice("Footer saved."),
        Err(Error::Validation { message }) => {
            let blocks = footer_blocks(&state).await?;
            let page = render_footer_forms(&blocks, Some(Flash::Error(&message)));
            return Ok((StatusCode::BAD_REQUEST, Html(page.into_string())).into_response());
        }
        Err(other) => return Err(other.into()),
    };
    let blocks = footer_blocks(&state).await?;
    Ok(html(render_footer_forms(&blocks, Some(message))))
}

/// `GET /admin/contact`
pub async fn contact_info() -> Response {
    html(render_contact_info())
}

// Uploads

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: String,
    pub folder: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUploadQuery {
    pub url: String,
}

/// `POST /admin/uploads/:bucket` - raw request body in, public URL out.
pub async fn upload(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> std::result::Result<Json<Value>, ApiError> {
    let bucket: Bucket = bucket.parse()?;
    let url = state
        .blobs
        .upload(&body, &query.file_name, bucket, query.folder.as_deref())
        .await?;
    info!(%bucket, %url, "Upload stored via admin");
    Ok(Json(json!({ "url": url })))
}

/// `DELETE /admin/uploads/:bucket?url=`
pub async fn delete_upload(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<DeleteUploadQuery>,
) -> std::result::Result<StatusCode, ApiError> {
    let bucket: Bucket = bucket.parse()?;
    state.blobs.delete(&query.url, bucket).await?;
    Ok(StatusCode::NO_CONTENT)
}
