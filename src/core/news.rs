//! News articles - markdown posts with a draft/published flag.

use crate::{
    core::editor::{blank_to_none, require},
    entities::{NewsArticle, news_article},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Admin article form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    /// Checkbox
    pub published: Option<String>,
}

impl ArticleForm {
    #[must_use]
    pub fn from_model(article: &news_article::Model) -> Self {
        Self {
            title: Some(article.title.clone()),
            slug: Some(article.slug.clone()),
            content: Some(article.content.clone()),
            excerpt: article.excerpt.clone(),
            featured_image: article.featured_image.clone(),
            published: article.published.then(|| "on".to_string()),
        }
    }
}

/// Slugs are lowercase ASCII letters, digits and hyphens.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

struct ValidArticle {
    title: String,
    slug: String,
    content: String,
    excerpt: Option<String>,
    featured_image: Option<String>,
    published: bool,
}

fn validate(form: &ArticleForm) -> Result<ValidArticle> {
    let title = require(form.title.as_ref(), "Title")?;
    let slug = require(form.slug.as_ref(), "Slug")?;
    if !is_valid_slug(&slug) {
        return Err(Error::validation(
            "Slug may only contain lowercase letters, numbers and hyphens",
        ));
    }
    Ok(ValidArticle {
        title,
        slug,
        content: require(form.content.as_ref(), "Content")?,
        excerpt: blank_to_none(form.excerpt.as_ref()),
        featured_image: blank_to_none(form.featured_image.as_ref()),
        published: form.published.is_some(),
    })
}

async fn ensure_slug_free<C>(db: &C, slug: &str, except: Option<Uuid>) -> Result<()>
where
    C: ConnectionTrait,
{
    let taken = NewsArticle::find()
        .filter(news_article::Column::Slug.eq(slug))
        .one(db)
        .await?
        .is_some_and(|existing| Some(existing.id) != except);
    if taken {
        return Err(Error::validation(format!("Slug already in use: {slug}")));
    }
    Ok(())
}

/// All articles for the admin, newest first.
pub async fn list_articles<C: ConnectionTrait>(db: &C) -> Result<Vec<news_article::Model>> {
    Ok(NewsArticle::find()
        .order_by_desc(news_article::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Published articles, most recently published first.
pub async fn list_published<C: ConnectionTrait>(db: &C) -> Result<Vec<news_article::Model>> {
    Ok(NewsArticle::find()
        .filter(news_article::Column::Published.eq(true))
        .order_by_desc(news_article::Column::PublishedAt)
        .all(db)
        .await?)
}

pub async fn get_article<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<news_article::Model> {
    NewsArticle::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("article", id))
}

/// A published article by slug; drafts are not found.
pub async fn find_published_by_slug<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<Option<news_article::Model>> {
    Ok(NewsArticle::find()
        .filter(news_article::Column::Slug.eq(slug))
        .filter(news_article::Column::Published.eq(true))
        .one(db)
        .await?)
}

#[instrument(skip(db, form))]
pub async fn create_article<C: ConnectionTrait>(
    db: &C,
    form: &ArticleForm,
) -> Result<news_article::Model> {
    let article = validate(form)?;
    ensure_slug_free(db, &article.slug, None).await?;

    let now = Utc::now();
    let model = news_article::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(article.title),
        slug: Set(article.slug),
        content: Set(article.content),
        excerpt: Set(article.excerpt),
        featured_image: Set(article.featured_image),
        author_id: Set(None),
        published: Set(article.published),
        published_at: Set(article.published.then_some(now)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!(slug = %model.slug, published = model.published, "Article created");
    Ok(model)
}

/// Saves an edited article. Publishing stamps `published_at` once; unpublishing clears it.
#[instrument(skip(db, form))]
pub async fn update_article<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    form: &ArticleForm,
) -> Result<news_article::Model> {
    let article = validate(form)?;
    let current = get_article(db, id).await?;
    ensure_slug_free(db, &article.slug, Some(id)).await?;

    let now = Utc::now();
    let published_at = match (current.published, article.published) {
        (_, false) => None,
        (false, true) => Some(now),
        (true, true) => current.published_at.or(Some(now)),
    };

    let mut active: news_article::ActiveModel = current.into();
    active.title = Set(article.title);
    active.slug = Set(article.slug);
    active.content = Set(article.content);
    active.excerpt = Set(article.excerpt);
    active.featured_image = Set(article.featured_image);
    active.published = Set(article.published);
    active.published_at = Set(published_at);
    active.updated_at = Set(now);
    Ok(active.update(db).await?)
}

/// Flips the publish flag, stamping or clearing `published_at` with it.
///
/// # Returns
/// `true` if the article is now published
///
/// # Errors
/// `NotFound` when no article has `id`.
#[instrument(skip(db))]
pub async fn toggle_published<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool> {
    let current = get_article(db, id).await?;
    let published = !current.published;
    let now = Utc::now();

    let mut active: news_article::ActiveModel = current.into();
    active.published = Set(published);
    active.published_at = Set(published.then_some(now));
    active.updated_at = Set(now);
    active.update(db).await?;

    info!(%id, published, "Article publish state toggled");
    Ok(published)
}

#[instrument(skip(db))]
pub async fn delete_article<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<()> {
    let result = NewsArticle::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("article", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn article(slug: &str, published: bool) -> ArticleForm {
        ArticleForm {
            title: Some(format!("About {slug}")),
            slug: Some(slug.to_string()),
            content: Some("# Hello\n\nBody".to_string()),
            published: published.then(|| "on".to_string()),
            ..ArticleForm::default()
        }
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("spring-launch-2024"));
        assert!(!is_valid_slug("Spring Launch"));
        assert!(!is_valid_slug("café"));
        assert!(!is_valid_slug(""));
    }

    #[tokio::test]
    async fn test_publish_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let draft = create_article(&db, &article("launch", false)).await?;
        assert!(draft.published_at.is_none());
        assert!(find_published_by_slug(&db, "launch").await?.is_none());

        assert!(toggle_published(&db, draft.id).await?);
        let published = find_published_by_slug(&db, "launch").await?.unwrap();
        assert!(published.published_at.is_some());
        assert_eq!(list_published(&db).await?.len(), 1);

        assert!(!toggle_published(&db, draft.id).await?);
        assert!(get_article(&db, draft.id).await?.published_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_slug_must_be_unique() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_article(&db, &article("launch", true)).await?;
        assert!(matches!(
            create_article(&db, &article("launch", false)).await,
            Err(Error::Validation { .. })
        ));

        // Saving an article under its own slug is fine
        let mut form = ArticleForm::from_model(&first);
        form.title = Some("Launch day".to_string());
        let updated = update_article(&db, first.id, &form).await?;
        assert_eq!(updated.published_at, first.published_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_article() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_article(&db, &article("gone", false)).await?;
        delete_article(&db, created.id).await?;
        assert!(matches!(
            delete_article(&db, created.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
