//! Public site handlers. Page reads degrade to fallback content instead of failing.

use crate::{
    core::{
        aggregator::list_ordered_sections,
        contact::{ContactForm, submit},
        footer::list_footer_content,
        items::{list_portfolio_items, list_services, list_testimonials},
        navigation::{NavigationEntry, list_navigation_items},
        news::{find_published_by_slug, list_published},
        settings::get_site_settings,
        store::Visibility,
    },
    entities::{footer_content, site_settings},
    errors::Result,
    render::{
        page::{
            ContactStatus, HomePage, PageChrome, render_article, render_home, render_news_index,
            render_not_found,
        },
        sections::SectionContent,
    },
    web::state::AppState,
};
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

/// Logs a failed read and substitutes an empty list.
fn or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|error| {
        warn!(%error, "Failed to load {what}; rendering without it");
        Vec::new()
    })
}

/// Owned data behind a [`PageChrome`].
struct Chrome {
    settings: site_settings::Model,
    navigation: Vec<NavigationEntry>,
    footer: Vec<footer_content::Model>,
}

impl Chrome {
    async fn load(state: &AppState) -> Self {
        let (settings, navigation, footer) = tokio::join!(
            get_site_settings(&state.db, &state.fallback_settings),
            list_navigation_items(&state.db),
            list_footer_content(&state.db),
        );
        Self {
            settings,
            navigation,
            footer: or_empty(footer, "footer content"),
        }
    }

    fn view(&self) -> PageChrome<'_> {
        PageChrome {
            settings: &self.settings,
            navigation: &self.navigation,
            footer: &self.footer,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub contact: Option<String>,
}

/// `GET /` - the single-page site.
pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Html<String> {
    let db = &state.db;
    let (chrome, sections, services, portfolio_items, testimonials) = tokio::join!(
        Chrome::load(&state),
        list_ordered_sections(db),
        list_services(db, Visibility::EnabledOnly),
        list_portfolio_items(db, Visibility::EnabledOnly),
        list_testimonials(db, Visibility::EnabledOnly),
    );
    let services = or_empty(services, "services");
    let portfolio_items = or_empty(portfolio_items, "portfolio items");
    let testimonials = or_empty(testimonials, "testimonials");

    let page = HomePage {
        chrome: chrome.view(),
        sections: &sections,
        content: SectionContent {
            services: &services,
            portfolio_items: &portfolio_items,
            testimonials: &testimonials,
        },
        contact_status: ContactStatus::from_query(query.contact.as_deref()),
    };
    Html(render_home(&page).into_string())
}

/// `POST /contact` - hands the submission to the contact transport and redirects back.
pub async fn contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Redirect {
    match submit(state.contact.as_ref(), &form) {
        Ok(submission) => {
            info!(email = %submission.email, "Contact form submitted");
            Redirect::to("/?contact=sent#contact")
        }
        Err(error) => {
            warn!(%error, "Contact form rejected");
            Redirect::to("/?contact=error#contact")
        }
    }
}

/// `GET /news` - published articles, newest first.
pub async fn news_index(State(state): State<AppState>) -> Html<String> {
    let (chrome, articles) = tokio::join!(Chrome::load(&state), list_published(&state.db));
    let articles = or_empty(articles, "news articles");
    Html(render_news_index(&chrome.view(), &articles).into_string())
}

/// `GET /news/:slug` - one published article, or 404.
pub async fn news_article(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let (chrome, article) = tokio::join!(
        Chrome::load(&state),
        find_published_by_slug(&state.db, &slug)
    );
    match article {
        Ok(Some(article)) => Html(render_article(&chrome.view(), &article).into_string()).into_response(),
        Ok(None) => not_found(&chrome.settings),
        Err(error) => {
            warn!(%error, %slug, "Failed to load article");
            not_found(&chrome.settings)
        }
    }
}

fn not_found(settings: &site_settings::Model) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(render_not_found(settings).into_string()),
    )
        .into_response()
}
