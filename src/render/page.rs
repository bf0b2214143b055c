//! Public page composition: document shell, navigation bar, footer, contact block
//! and the news pages.

use crate::{
    core::{navigation::NavigationEntry, section::SectionRecord},
    entities::{footer_content, news_article, site_settings},
    render::{
        markdown::render_markdown,
        sections::{SectionContent, render_section},
        theme::{
            DEFAULT_HEADER_BACKGROUND, DEFAULT_HEADER_TEXT, font_stylesheet_url, or_literal,
            theme_css,
        },
    },
};
use chrono::{Datelike, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Footer blurb when neither a footer row nor a tagline provides one.
const DEFAULT_FOOTER_BLURB: &str = "Building modern, responsive websites that make a difference.";

const STYLESHEET: &str = r"
*{box-sizing:border-box}
body{margin:0;line-height:1.6;background:var(--background-color);color:var(--text-color);font-family:var(--font-family)}
a{color:var(--accent-color)}
a:hover{color:var(--accent-color-hover)}
.container{max-width:80rem;margin:0 auto;padding:0 1.5rem}
.site-nav{position:fixed;top:0;left:0;right:0;z-index:50;box-shadow:0 1px 4px rgba(0,0,0,.1)}
.site-nav .container{display:flex;align-items:center;justify-content:space-between;height:5rem}
.site-nav ul{display:flex;gap:1.5rem;list-style:none;margin:0;padding:0}
.site-nav a{color:inherit;text-decoration:none;font-weight:500}
.brand{display:flex;align-items:center;gap:.75rem;font-size:1.5rem;font-weight:700}
.brand img{height:2.5rem}
.nav-contact{margin-left:auto}
.section{padding:5rem 0;scroll-margin-top:5rem}
.section-heading{text-align:center;margin-bottom:4rem}
.section-title{font-size:2.5rem;font-weight:700}
.section-subtitle{font-size:1.25rem;opacity:.8}
.hero{min-height:100vh;margin-top:5rem;display:flex;align-items:center;justify-content:center;position:relative;text-align:center}
.hero-overlay{position:absolute;inset:0;pointer-events:none;z-index:0}
.hero-content{position:relative;z-index:1}
.hero-title{font-size:3.5rem;font-weight:700}
.hero-subtitle{font-size:1.5rem;max-width:48rem;margin:0 auto 2rem}
.hero-ctas{display:flex;gap:1rem;justify-content:center;flex-wrap:wrap}
.button{padding:.75rem 2rem;border-radius:.5rem;font-weight:600;text-decoration:none;border:2px solid transparent}
.about-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(20rem,1fr));gap:3rem;align-items:center}
.about-image img{max-width:100%;height:auto}
.card-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(18rem,1fr));gap:2rem}
.card{padding:2rem;border-radius:.5rem;border:1px solid var(--border-color);overflow:hidden}
.card-image img{width:100%;aspect-ratio:16/9;object-fit:cover}
.stars{color:#facc15;font-size:1.5rem}
.quote{font-style:italic}
.contact-form{display:grid;gap:1rem;max-width:48rem;margin:0 auto}
.contact-form input,.contact-form textarea{width:100%;padding:.75rem;border:1px solid var(--border-color);border-radius:.5rem}
.status{padding:1rem;border-radius:.5rem}
.status.ok{background:#dcfce7}.status.error{background:#fee2e2}
.site-footer{background:#111827;color:#d1d5db;padding:3rem 0}
.site-footer a{color:inherit}
.footer-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:2rem}
.copyright{border-top:1px solid #1f2937;margin-top:2rem;padding-top:2rem;text-align:center}
.news{margin-top:5rem}
.article-meta{opacity:.7}
";

/// Outcome of a contact form post, echoed back through the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Sent,
    Error,
}

impl ContactStatus {
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value {
            Some("sent") => Some(Self::Sent),
            Some("error") => Some(Self::Error),
            _ => None,
        }
    }
}

/// What every public page shows around its content.
#[derive(Debug, Clone, Copy)]
pub struct PageChrome<'a> {
    pub settings: &'a site_settings::Model,
    /// Stored navigation entries; the contact entry is appended when rendering
    pub navigation: &'a [NavigationEntry],
    pub footer: &'a [footer_content::Model],
}

/// Everything the home page needs.
#[derive(Debug, Clone, Copy)]
pub struct HomePage<'a> {
    pub chrome: PageChrome<'a>,
    pub sections: &'a [SectionRecord],
    pub content: SectionContent<'a>,
    pub contact_status: Option<ContactStatus>,
}

/// The document shell: head with theme variables, then `content`.
#[must_use]
pub fn base_document(settings: &site_settings::Model, title: &str, content: Markup) -> Markup {
    let description = or_literal(
        settings.company_tagline.as_deref(),
        "Modern responsive website",
    );
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                @if let Some(favicon) = &settings.favicon_url {
                    link rel="icon" href=(favicon);
                }
                link rel="stylesheet" href=(font_stylesheet_url(settings.font_family.as_deref()));
                style { (PreEscaped(theme_css(settings))) (PreEscaped(STYLESHEET)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The fixed navigation bar. `anchor_base` is `""` on the home page and `"/"` elsewhere.
#[must_use]
pub fn render_navigation(
    settings: &site_settings::Model,
    entries: &[NavigationEntry],
    anchor_base: &str,
) -> Markup {
    let background = or_literal(
        settings.header_background_color.as_deref(),
        DEFAULT_HEADER_BACKGROUND,
    );
    let text = or_literal(settings.header_text_color.as_deref(), DEFAULT_HEADER_TEXT);
    let contact = NavigationEntry::contact();

    html! {
        nav.site-nav style={ "background-color: " (background) "; color: " (text) } {
            div.container {
                a.brand href={ (anchor_base) "#hero" } style={ "color: " (text) } {
                    @if let Some(logo) = &settings.logo_url {
                        img src=(logo) alt=(settings.company_name);
                    }
                    span { (settings.company_name) }
                }
                ul {
                    @for entry in entries {
                        li { a href={ (anchor_base) "#" (entry.section_id) } { (entry.label) } }
                    }
                    li.nav-contact {
                        a href={ (anchor_base) "#" (contact.section_id) } { (contact.label) }
                    }
                }
            }
        }
    }
}

fn footer_row<'a>(rows: &'a [footer_content::Model], kind: &str) -> Option<&'a footer_content::Model> {
    rows.iter().find(|row| row.section_type == kind)
}

/// Footer: about blurb, quick links (when a links row exists), contact details.
#[must_use]
pub fn render_footer(chrome: &PageChrome<'_>, anchor_base: &str) -> Markup {
    let settings = chrome.settings;
    let about = footer_row(chrome.footer, "about");
    let links = footer_row(chrome.footer, "links");
    let contact = footer_row(chrome.footer, "contact");

    let about_title = or_literal(
        about.and_then(|row| row.title.as_deref()),
        &settings.company_name,
    );
    let about_text = about
        .and_then(|row| row.content.as_deref())
        .or(settings.company_tagline.as_deref())
        .unwrap_or(DEFAULT_FOOTER_BLURB);
    let has_contact = settings.contact_email.is_some()
        || settings.contact_phone.is_some()
        || settings.contact_address.is_some();

    html! {
        footer.site-footer {
            div.container {
                div.footer-grid {
                    div {
                        h3 { (about_title) }
                        p { (about_text) }
                    }
                    @if let Some(links) = links {
                        div {
                            h4 { (or_literal(links.title.as_deref(), "Quick Links")) }
                            ul {
                                @for entry in chrome.navigation.iter().skip(1).take(4) {
                                    li { a href={ (anchor_base) "#" (entry.section_id) } { (entry.label) } }
                                }
                            }
                        }
                    }
                    div {
                        h4 { (or_literal(contact.and_then(|row| row.title.as_deref()), "Contact")) }
                        ul {
                            @if let Some(email) = &settings.contact_email { li { "Email: " (email) } }
                            @if let Some(phone) = &settings.contact_phone { li { "Phone: " (phone) } }
                            @if let Some(address) = &settings.contact_address { li { "Address: " (address) } }
                            @if !has_contact { li.muted { "Contact information coming soon" } }
                        }
                    }
                }
                p.copyright {
                    "© " (Utc::now().year()) " " (settings.company_name) ". All rights reserved."
                }
            }
        }
    }
}

/// The contact block that always closes the home page.
#[must_use]
pub fn render_contact(status: Option<ContactStatus>) -> Markup {
    html! {
        section #contact .section.contact {
            div.container {
                div.section-heading {
                    h2.section-title { "Get In Touch" }
                    p.section-subtitle { "Ready to start your project? Let's talk!" }
                }
                @match status {
                    Some(ContactStatus::Sent) => {
                        p.status.ok { "Thank you! Your message has been sent successfully." }
                    }
                    Some(ContactStatus::Error) => {
                        p.status.error { "Sorry, there was an error sending your message. Please try again." }
                    }
                    None => {}
                }
                form.contact-form method="post" action="/contact" {
                    label for="name" { "Name" }
                    input #name type="text" name="name" required placeholder="Your Name";
                    label for="email" { "Email" }
                    input #email type="email" name="email" required placeholder="your.email@example.com";
                    label for="subject" { "Subject" }
                    input #subject type="text" name="subject" required placeholder="Subject";
                    label for="message" { "Message" }
                    textarea #message name="message" rows="6" required placeholder="Your message here..." {}
                    button.button.primary type="submit" { "Send Message" }
                }
            }
        }
    }
}

/// The single-page site: navigation, ordered sections, contact, footer.
#[must_use]
pub fn render_home(page: &HomePage<'_>) -> Markup {
    let chrome = &page.chrome;
    let content = html! {
        (render_navigation(chrome.settings, chrome.navigation, ""))
        main {
            @for section in page.sections {
                (render_section(section, &page.content))
            }
            (render_contact(page.contact_status))
        }
        (render_footer(chrome, ""))
    };
    base_document(chrome.settings, &chrome.settings.company_name, content)
}

/// Published article list.
#[must_use]
pub fn render_news_index(chrome: &PageChrome<'_>, articles: &[news_article::Model]) -> Markup {
    let content = html! {
        (render_navigation(chrome.settings, chrome.navigation, "/"))
        main.news.section {
            div.container {
                div.section-heading { h1.section-title { "News" } }
                @if articles.is_empty() {
                    p { "No news yet." }
                }
                @for article in articles {
                    article.card {
                        h2 { a href={ "/news/" (article.slug) } { (article.title) } }
                        @if let Some(published) = article.published_at {
                            p.article-meta { (published.format("%B %-d, %Y").to_string()) }
                        }
                        @if let Some(excerpt) = &article.excerpt {
                            p { (excerpt) }
                        }
                    }
                }
            }
        }
        (render_footer(chrome, "/"))
    };
    let title = format!("News | {}", chrome.settings.company_name);
    base_document(chrome.settings, &title, content)
}

/// One published article.
#[must_use]
pub fn render_article(chrome: &PageChrome<'_>, article: &news_article::Model) -> Markup {
    let content = html! {
        (render_navigation(chrome.settings, chrome.navigation, "/"))
        main.news.section {
            article.container {
                p { a href="/news" { "← All news" } }
                h1 { (article.title) }
                @if let Some(published) = article.published_at {
                    p.article-meta { (published.format("%B %-d, %Y").to_string()) }
                }
                @if let Some(image) = &article.featured_image {
                    img src=(image) alt=(article.title) style="max-width:100%";
                }
                (render_markdown(&article.content))
            }
        }
        (render_footer(chrome, "/"))
    };
    let title = format!("{} | {}", article.title, chrome.settings.company_name);
    base_document(chrome.settings, &title, content)
}

/// Minimal not-found page.
#[must_use]
pub fn render_not_found(settings: &site_settings::Model) -> Markup {
    base_document(
        settings,
        "Not found",
        html! {
            main.section { div.container {
                h1 { "Page not found" }
                p { a href="/" { "Back to " (settings.company_name) } }
            } }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::DEFAULT_SITE_SETTINGS;
    use crate::test_utils::{about_model, hero_model};

    fn entry(section_id: &str, label: &str, order: i32) -> NavigationEntry {
        NavigationEntry {
            id: None,
            label: label.to_string(),
            section_id: section_id.to_string(),
            display_order: order,
        }
    }

    #[test]
    fn test_contact_is_always_last_in_navigation() {
        let settings = DEFAULT_SITE_SETTINGS.to_model();
        let entries = vec![entry("hero", "Home", 0), entry("about", "About", 1)];
        let html = render_navigation(&settings, &entries, "").into_string();

        let home = html.find("#hero\">Home").unwrap_or(usize::MAX);
        let about = html.find("#about\">About").unwrap_or(usize::MAX);
        let contact = html.find("#contact\">Contact").unwrap_or(usize::MAX);
        assert!(home < about && about < contact && contact != usize::MAX);
        assert!(html.contains("background-color: #ffffff"));
    }

    #[test]
    fn test_home_renders_sections_in_given_order() {
        let settings = DEFAULT_SITE_SETTINGS.to_model();
        let sections = vec![
            SectionRecord::About(about_model("Our story", 0)),
            SectionRecord::Hero(hero_model("Welcome", 1)),
        ];
        let page = HomePage {
            chrome: PageChrome {
                settings: &settings,
                navigation: &[],
                footer: &[],
            },
            sections: &sections,
            content: SectionContent::default(),
            contact_status: Some(ContactStatus::Sent),
        };
        let html = render_home(&page).into_string();

        let about = html.find("id=\"about\"").unwrap_or(usize::MAX);
        let hero = html.find("id=\"hero\"").unwrap_or(usize::MAX);
        let contact = html.find("id=\"contact\"").unwrap_or(usize::MAX);
        assert!(about < hero && hero < contact && contact != usize::MAX);
        assert!(html.contains("Your message has been sent"));
        assert!(html.contains("<title>Your Company</title>"));
    }

    #[test]
    fn test_footer_fallbacks() {
        let settings = DEFAULT_SITE_SETTINGS.to_model();
        let chrome = PageChrome {
            settings: &settings,
            navigation: &[],
            footer: &[],
        };
        let html = render_footer(&chrome, "").into_string();
        assert!(html.contains("Your Company"));
        assert!(html.contains(DEFAULT_FOOTER_BLURB));
        assert!(html.contains("Contact information coming soon"));
        assert!(!html.contains("Quick Links"));
    }

    #[test]
    fn test_contact_status_from_query() {
        assert_eq!(ContactStatus::from_query(Some("sent")), Some(ContactStatus::Sent));
        assert_eq!(ContactStatus::from_query(Some("error")), Some(ContactStatus::Error));
        assert_eq!(ContactStatus::from_query(Some("other")), None);
    }
}
