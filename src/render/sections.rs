//! Section renderer - one ordered section shell to markup.
//!
//! Dispatches on the section variant. The presentation rules that carry logic
//! (overlay gating, subtitle alignment, star ratings, empty-block suppression) are
//! exposed as small functions so they can be checked without parsing HTML.

use crate::{
    core::section::SectionRecord,
    entities::{
        about_section, hero_section, portfolio_item, portfolio_section, service,
        services_section, testimonial,
    },
    render::{
        markdown::render_markdown,
        theme::{color_chain, or_literal},
    },
};
use maud::{Markup, html};

/// Item collections a section may draw on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionContent<'a> {
    pub services: &'a [service::Model],
    pub portfolio_items: &'a [portfolio_item::Model],
    pub testimonials: &'a [testimonial::Model],
}

/// Horizontal alignment of the hero subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Justify,
    Center,
}

impl Alignment {
    /// `left` and `justify` are honoured; anything else centers.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("left") => Self::Left,
            Some("justify") => Self::Justify,
            _ => Self::Center,
        }
    }

    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Justify => "justify",
            Self::Center => "center",
        }
    }
}

/// Opacity of the hero overlay, or `None` if no overlay element should exist.
///
/// An overlay needs a background image and an opacity in `(0, 1]`.
#[must_use]
pub fn overlay_opacity(background_image: Option<&str>, opacity: Option<f64>) -> Option<f64> {
    background_image.filter(|url| !url.trim().is_empty())?;
    opacity.filter(|value| value.is_finite() && *value > 0.0 && *value <= 1.0)
}

/// `(filled, empty)` star counts; `None` renders no stars at all.
#[must_use]
pub fn star_counts(rating: Option<i32>) -> Option<(usize, usize)> {
    let filled = usize::try_from(rating?.clamp(0, 5)).ok()?;
    (filled > 0).then_some((filled, 5 - filled))
}

/// Renders one section. Services and portfolio blocks without items render nothing.
#[must_use]
pub fn render_section(record: &SectionRecord, content: &SectionContent<'_>) -> Markup {
    match record {
        SectionRecord::Hero(hero) => render_hero(hero),
        SectionRecord::About(about) => render_about(about),
        SectionRecord::Services(shell) => render_services(shell, content.services),
        SectionRecord::Portfolio(shell) => render_portfolio(shell, content.portfolio_items),
        SectionRecord::Testimonials(_) => render_testimonials(content.testimonials),
    }
}

fn style_color(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("color: {v}"))
}

fn render_hero(hero: &hero_section::Model) -> Markup {
    let image = hero
        .background_image_url
        .as_deref()
        .filter(|url| !url.trim().is_empty());
    let background = image.map(|url| {
        format!(
            "background-image: url('{}'); background-size: cover; background-position: center; background-repeat: no-repeat",
            url.replace('\'', "%27")
        )
    });
    let overlay = overlay_opacity(image, hero.background_overlay_opacity);
    let alignment = Alignment::from_stored(hero.subtitle_alignment.as_deref());
    let subtitle_style = match style_color(hero.subtitle_color.as_deref()) {
        Some(color) => format!("text-align: {}; {color}", alignment.css()),
        None => format!("text-align: {}", alignment.css()),
    };

    html! {
        section #hero .section.hero .has-image[image.is_some()] style=[background] {
            @if let Some(opacity) = overlay {
                div.hero-overlay aria-hidden="true"
                    style={
                        "background-color: " (or_literal(hero.background_overlay_color.as_deref(), "#000000"))
                        "; opacity: " (opacity)
                    } {}
            }
            div.container.hero-content {
                div.hero-title style=[style_color(hero.title_color.as_deref())] {
                    (render_markdown(&hero.title))
                }
                @if let Some(subtitle) = hero.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
                    div.hero-subtitle style=(subtitle_style) {
                        (render_markdown(subtitle))
                    }
                }
                @if hero.primary_cta_text.is_some() || hero.secondary_cta_text.is_some() {
                    div.hero-ctas {
                        @if let Some(text) = &hero.primary_cta_text {
                            a.button.primary
                                href=(or_literal(hero.primary_cta_link.as_deref(), "#contact"))
                                style={
                                    "background-color: " (color_chain(hero.primary_cta_bg_color.as_deref(), "accent-color", "#2563eb"))
                                    "; color: " (or_literal(hero.primary_cta_text_color.as_deref(), "#ffffff"))
                                } { (text) }
                        }
                        @if let Some(text) = &hero.secondary_cta_text {
                            @let accent = color_chain(hero.secondary_cta_text_color.as_deref(), "accent-color", "#2563eb");
                            a.button.secondary
                                href=(or_literal(hero.secondary_cta_link.as_deref(), "#about"))
                                style={
                                    "background-color: " (color_chain(hero.secondary_cta_bg_color.as_deref(), "background-color", "#ffffff"))
                                    "; color: " (accent) "; border-color: " (accent)
                                } { (text) }
                        }
                    }
                }
            }
        }
    }
}

fn render_about(about: &about_section::Model) -> Markup {
    let content_style = [
        style_color(about.content_color.as_deref()),
        about
            .content_font_size
            .as_deref()
            .filter(|size| !size.trim().is_empty())
            .map(|size| format!("font-size: {size}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("; ");

    html! {
        section #about .section.about {
            div.container {
                @if !about.title.trim().is_empty() {
                    div.section-heading {
                        div.section-title style=[style_color(about.title_color.as_deref())] {
                            (render_markdown(&about.title))
                        }
                        @if let Some(subtitle) = &about.subtitle {
                            div.section-subtitle style=[style_color(about.subtitle_color.as_deref())] {
                                (render_markdown(subtitle))
                            }
                        }
                    }
                }
                div.about-grid {
                    div.about-content style=[(!content_style.is_empty()).then_some(content_style)] {
                        (render_markdown(&about.content))
                    }
                    div.about-image {
                        @if let Some(url) = &about.image_url {
                            img src=(url) alt=(about.title);
                        } @else {
                            p.placeholder { "[Image Placeholder]" }
                        }
                    }
                }
            }
        }
    }
}

/// Heading shared by the item blocks; stored text wins over the built-in copy.
fn block_heading(
    title: Option<&str>,
    title_color: Option<&str>,
    subtitle: Option<&str>,
    subtitle_color: Option<&str>,
    default_title: &str,
    default_subtitle: &str,
) -> Markup {
    html! {
        div.section-heading {
            div.section-title style=[style_color(title_color)] {
                (render_markdown(or_literal(title, default_title)))
            }
            div.section-subtitle style=[style_color(subtitle_color)] {
                (render_markdown(or_literal(subtitle, default_subtitle)))
            }
        }
    }
}

fn render_services(shell: &services_section::Model, services: &[service::Model]) -> Markup {
    if services.is_empty() {
        return html! {};
    }
    html! {
        section #services .section.services {
            div.container {
                (block_heading(
                    shell.title.as_deref(),
                    shell.title_color.as_deref(),
                    shell.subtitle.as_deref(),
                    shell.subtitle_color.as_deref(),
                    "Our Services",
                    "Comprehensive solutions tailored to your needs",
                ))
                div.card-grid {
                    @for item in services {
                        div.card.service {
                            @if let Some(icon) = &item.icon {
                                div.service-icon { (icon) }
                            }
                            div.card-title style=[style_color(item.title_color.as_deref())] {
                                (render_markdown(&item.title))
                            }
                            div.card-text style=[style_color(item.description_color.as_deref())] {
                                (render_markdown(&item.description))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_portfolio(
    shell: &portfolio_section::Model,
    items: &[portfolio_item::Model],
) -> Markup {
    if items.is_empty() {
        return html! {};
    }
    html! {
        section #portfolio .section.portfolio {
            div.container {
                (block_heading(
                    shell.title.as_deref(),
                    shell.title_color.as_deref(),
                    shell.subtitle.as_deref(),
                    shell.subtitle_color.as_deref(),
                    "Our Portfolio",
                    "Showcasing our best work and successful projects",
                ))
                div.card-grid {
                    @for item in items {
                        div.card.portfolio-item {
                            @if let Some(url) = &item.image_url {
                                div.card-image { img src=(url) alt=(item.title); }
                            }
                            div.card-body {
                                @if let Some(category) = &item.category {
                                    span.category { (category) }
                                }
                                h3.card-title style=[style_color(item.title_color.as_deref())] {
                                    (render_markdown(&item.title))
                                }
                                @if let Some(description) = &item.description {
                                    div.card-text style=[style_color(item.description_color.as_deref())] {
                                        (render_markdown(description))
                                    }
                                }
                                @if let Some(url) = &item.project_url {
                                    a.project-link href=(url) target="_blank" rel="noopener noreferrer" {
                                        "View Project →"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_testimonials(testimonials: &[testimonial::Model]) -> Markup {
    if testimonials.is_empty() {
        return html! {};
    }
    html! {
        section #testimonials .section.testimonials {
            div.container {
                div.section-heading {
                    h2.section-title { "What Our Clients Say" }
                    p.section-subtitle { "Trusted by businesses worldwide" }
                }
                div.card-grid {
                    @for item in testimonials {
                        div.card.testimonial {
                            @if let Some((filled, empty)) = star_counts(item.rating) {
                                div.stars aria-label={ (filled) " out of 5" } {
                                    ("★".repeat(filled)) ("☆".repeat(empty))
                                }
                            }
                            div.quote style=[style_color(item.quote_color.as_deref())] {
                                (render_markdown(&format!("\"{}\"", item.quote)))
                            }
                            div.author {
                                div.author-name style=[style_color(item.author_name_color.as_deref())] {
                                    (render_markdown(&item.author_name))
                                }
                                @let role = [item.author_role.as_deref(), item.author_company.as_deref()]
                                    .into_iter()
                                    .flatten()
                                    .filter(|part| !part.trim().is_empty())
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                @if !role.is_empty() {
                                    p.author-role style=[style_color(item.author_role_color.as_deref())] { (role) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        about_model, hero_model, portfolio_section_model, service_model, services_section_model,
        testimonial_model,
    };

    fn hero_with(image: Option<&str>, opacity: Option<f64>) -> String {
        let mut hero = hero_model("Welcome", 0);
        hero.background_image_url = image.map(ToString::to_string);
        hero.background_overlay_opacity = opacity;
        render_section(&SectionRecord::Hero(hero), &SectionContent::default()).into_string()
    }

    #[test]
    fn test_overlay_rules() {
        assert_eq!(overlay_opacity(Some("/a.jpg"), Some(0.5)), Some(0.5));
        assert_eq!(overlay_opacity(Some("/a.jpg"), Some(1.0)), Some(1.0));
        assert_eq!(overlay_opacity(Some("/a.jpg"), Some(0.0)), None);
        assert_eq!(overlay_opacity(Some("/a.jpg"), Some(1.5)), None);
        assert_eq!(overlay_opacity(Some("/a.jpg"), Some(f64::NAN)), None);
        assert_eq!(overlay_opacity(Some("/a.jpg"), None), None);
        assert_eq!(overlay_opacity(None, Some(0.5)), None);
    }

    #[test]
    fn test_hero_overlay_element_count() {
        let count = |html: &str| html.matches("hero-overlay").count();
        assert_eq!(count(&hero_with(Some("/bg.jpg"), Some(0.0))), 0);
        assert_eq!(count(&hero_with(Some("/bg.jpg"), Some(1.5))), 0);
        assert_eq!(count(&hero_with(None, Some(0.5))), 0);

        let html = hero_with(Some("/bg.jpg"), Some(0.5));
        assert_eq!(count(&html), 1);
        assert!(html.contains("opacity: 0.5"));
        assert!(html.contains("background-image: url('/bg.jpg')"));
    }

    #[test]
    fn test_subtitle_alignment() {
        assert_eq!(Alignment::from_stored(Some("left")), Alignment::Left);
        assert_eq!(Alignment::from_stored(Some("justify")), Alignment::Justify);
        assert_eq!(Alignment::from_stored(Some("right")), Alignment::Center);
        assert_eq!(Alignment::from_stored(None), Alignment::Center);

        let mut hero = hero_model("Welcome", 0);
        hero.subtitle = Some("We ship".to_string());
        hero.subtitle_alignment = Some("justify".to_string());
        let html = render_section(&SectionRecord::Hero(hero), &SectionContent::default())
            .into_string();
        assert!(html.contains("text-align: justify"));
    }

    #[test]
    fn test_about_without_title_omits_heading() {
        let mut about = about_model("   ", 1);
        about.subtitle = Some("Ignored".to_string());
        let html =
            render_section(&SectionRecord::About(about), &SectionContent::default()).into_string();
        assert!(!html.contains("section-heading"));
        assert!(html.contains("about-content"));

        let html = render_section(
            &SectionRecord::About(about_model("Our story", 1)),
            &SectionContent::default(),
        )
        .into_string();
        assert!(html.contains("section-heading"));
    }

    #[test]
    fn test_empty_item_blocks_render_nothing() {
        let services = SectionRecord::Services(services_section_model(2));
        let portfolio = SectionRecord::Portfolio(portfolio_section_model(3));
        let testimonials = SectionRecord::Testimonials(testimonial_model("Ada", 4));
        let empty = SectionContent::default();
        for record in [&services, &portfolio, &testimonials] {
            assert!(render_section(record, &empty).into_string().is_empty());
        }

        let items = vec![service_model("Design", 0)];
        let content = SectionContent {
            services: &items,
            ..SectionContent::default()
        };
        let html = render_section(&services, &content).into_string();
        assert!(html.contains("Our Services"));
        assert!(html.contains("Design"));
    }

    #[test]
    fn test_star_counts() {
        assert_eq!(star_counts(Some(4)), Some((4, 1)));
        assert_eq!(star_counts(Some(5)), Some((5, 0)));
        assert_eq!(star_counts(Some(9)), Some((5, 0)));
        assert_eq!(star_counts(Some(0)), None);
        assert_eq!(star_counts(Some(-2)), None);
        assert_eq!(star_counts(None), None);
    }

    #[test]
    fn test_testimonial_stars_rendered() {
        let mut item = testimonial_model("Ada", 0);
        item.rating = Some(3);
        let items = vec![item.clone()];
        let content = SectionContent {
            testimonials: &items,
            ..SectionContent::default()
        };
        let html = render_section(&SectionRecord::Testimonials(item), &content).into_string();
        assert!(html.contains("★★★☆☆"));
    }

    #[test]
    fn test_color_override_chain_on_cta() {
        let mut hero = hero_model("Welcome", 0);
        hero.primary_cta_text = Some("Start".to_string());
        let html = render_section(&SectionRecord::Hero(hero.clone()), &SectionContent::default())
            .into_string();
        assert!(html.contains("background-color: var(--accent-color, #2563eb)"));

        hero.primary_cta_bg_color = Some("#ff6600".to_string());
        let html =
            render_section(&SectionRecord::Hero(hero), &SectionContent::default()).into_string();
        assert!(html.contains("background-color: #ff6600"));
    }
}
