//! Admin area markup: layout, section manager, item and article editors, footer and
//! company profile forms.
//!
//! Every page is a plain HTML form posting back to the admin routes; failed writes
//! re-render the same form with the message shown above it.

use crate::{
    core::{
        editor::{SUBTITLE_ALIGNMENTS, SectionForm},
        footer::{FooterForm, FooterKind},
        items::{ItemCollection, ItemForm},
        news::ArticleForm,
        section::{SectionKey, SectionRecord, SectionVariant},
    },
    entities::{news_article, site_settings},
    render::theme::font_families,
};
use maud::{DOCTYPE, Markup, html};
use uuid::Uuid;

const ADMIN_CSS: &str = r"
body{margin:0;font-family:system-ui,sans-serif;background:#f3f4f6;color:#111827;display:flex;min-height:100vh}
aside{width:14rem;background:#111827;color:#f9fafb;padding:1.5rem}
aside a{display:block;color:inherit;text-decoration:none;padding:.5rem 0}
aside a.active{font-weight:700}
main{flex:1;padding:2rem;max-width:64rem}
.tabs a{margin-right:1rem}.tabs a.active{font-weight:700}
table{width:100%;border-collapse:collapse;background:#fff}
td,th{padding:.5rem;border-bottom:1px solid #e5e7eb;text-align:left}
form.inline{display:inline}
.field{display:grid;gap:.25rem;margin-bottom:1rem}
.field input,.field textarea,.field select{padding:.5rem;border:1px solid #d1d5db;border-radius:.25rem}
.notice{background:#dcfce7;padding:.75rem}
.error{background:#fee2e2;padding:.75rem}
.badge{font-size:.75rem;padding:.1rem .5rem;border-radius:999px;background:#e5e7eb}
.badge.off{background:#fee2e2}
";

/// Admin pages, for the sidebar highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    Profile,
    Sections,
    News,
    Footer,
    Contact,
}

impl AdminPage {
    const NAV: [(Self, &'static str, &'static str); 5] = [
        (Self::Profile, "/admin", "Company Profile"),
        (Self::Sections, "/admin/sections", "Sections"),
        (Self::News, "/admin/news", "News"),
        (Self::Footer, "/admin/footer", "Footer"),
        (Self::Contact, "/admin/contact", "Contact Form"),
    ];
}

/// Transient message shown above a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash<'a> {
    Notice(&'a str),
    Error(&'a str),
}

fn flash(message: Option<Flash<'_>>) -> Markup {
    html! {
        @match message {
            Some(Flash::Notice(text)) => { p.notice { (text) } }
            Some(Flash::Error(text)) => { p.error role="alert" { (text) } }
            None => {}
        }
    }
}

/// Wraps an admin page body in the sidebar layout.
#[must_use]
pub fn admin_layout(title: &str, page: AdminPage, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) " | Admin" }
                style { (ADMIN_CSS) }
            }
            body {
                aside {
                    h2 { "Admin" }
                    nav {
                        @for (entry, href, label) in AdminPage::NAV {
                            a.active[entry == page] href=(href) { (label) }
                        }
                        a href="/" { "View site" }
                    }
                }
                main {
                    h1 { (title) }
                    (body)
                }
            }
        }
    }
}

fn text_field(label: &str, name: &str, value: Option<&String>, required: bool) -> Markup {
    html! {
        label.field {
            span { (label) @if required { " *" } }
            input type="text" name=(name) value=[value] required[required];
        }
    }
}

fn textarea_field(label: &str, name: &str, value: Option<&String>, required: bool) -> Markup {
    html! {
        label.field {
            span { (label) @if required { " *" } }
            textarea name=(name) rows="6" required[required] {
                @if let Some(value) = value { (value) }
            }
        }
    }
}

fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        label.field {
            span { input type="checkbox" name=(name) checked[checked]; " " (label) }
        }
    }
}

fn post_button(action: &str, label: &str) -> Markup {
    html! {
        form.inline method="post" action=(action) {
            button type="submit" { (label) }
        }
    }
}

fn move_buttons(action: &str) -> Markup {
    html! {
        form.inline method="post" action=(action) {
            button type="submit" name="direction" value="up" title="Move up" { "↑" }
            button type="submit" name="direction" value="down" title="Move down" { "↓" }
        }
    }
}

fn enabled_badge(enabled: bool) -> Markup {
    html! {
        @if enabled { span.badge { "Enabled" } } @else { span.badge.off { "Disabled" } }
    }
}

/// Which tab of the section manager is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionsTab {
    /// The unified global order across all variants
    Order,
    Variant(SectionVariant),
}

impl SectionsTab {
    /// Parses `?tab=`; anything unrecognised opens the order tab.
    #[must_use]
    pub fn from_query(tab: Option<&str>) -> Self {
        tab.and_then(|t| t.parse().ok())
            .map_or(Self::Order, Self::Variant)
    }
}

/// Data for the section manager.
#[derive(Debug, Clone, Copy)]
pub struct SectionsView<'a> {
    pub tab: SectionsTab,
    /// Every slot of the global order, disabled shells included
    pub ordered: &'a [SectionRecord],
    /// Rows of the open variant tab
    pub variant_rows: &'a [SectionRecord],
    /// Variants currently in navigation
    pub nav_members: &'a [SectionVariant],
    pub flash: Option<Flash<'a>>,
}

fn section_path(key: SectionKey) -> String {
    format!("/admin/sections/{}/{}", key.variant, key.id)
}

/// The section manager with its order tab and one tab per variant.
#[must_use]
pub fn render_sections_manager(view: &SectionsView<'_>) -> Markup {
    let body = html! {
        nav.tabs {
            a.active[view.tab == SectionsTab::Order] href="/admin/sections" { "Order" }
            @for variant in SectionVariant::ALL {
                a.active[view.tab == SectionsTab::Variant(variant)]
                    href={ "/admin/sections?tab=" (variant.as_str()) } { (variant.default_label()) }
            }
        }
        (flash(view.flash))
        @match view.tab {
            SectionsTab::Order => { (render_order_tab(view)) }
            SectionsTab::Variant(variant) => { (render_variant_tab(variant, view.variant_rows)) }
        }
    };
    admin_layout("Sections", AdminPage::Sections, body)
}

fn render_order_tab(view: &SectionsView<'_>) -> Markup {
    html! {
        p { "Sections appear on the home page in this order. Testimonials move as one block." }
        table {
            thead { tr { th { "#" } th { "Section" } th { "Type" } th { "Status" } th { "Navigation" } th { "Move" } } }
            tbody {
                @for (position, record) in view.ordered.iter().enumerate() {
                    @let key = record.key();
                    @let in_nav = view.nav_members.contains(&key.variant);
                    tr {
                        td { (position + 1) }
                        td { a href=(section_path(key)) { (record.summary()) } }
                        td { (key.variant.default_label()) }
                        td { (enabled_badge(record.enabled())) }
                        td {
                            form.inline method="post" action={ "/admin/navigation/" (key.variant.as_str()) "/toggle" } {
                                button type="submit" {
                                    @if in_nav { "Remove from navigation" } @else { "Add to navigation" }
                                }
                            }
                        }
                        td { (move_buttons(&format!("{}/move", section_path(key)))) }
                    }
                }
            }
        }
        @if view.ordered.is_empty() {
            p { "No sections yet." }
        }
    }
}

fn render_variant_tab(variant: SectionVariant, rows: &[SectionRecord]) -> Markup {
    let items = match variant {
        SectionVariant::Services => Some(ItemCollection::Services),
        SectionVariant::Portfolio => Some(ItemCollection::PortfolioItems),
        SectionVariant::Testimonials => Some(ItemCollection::Testimonials),
        SectionVariant::Hero | SectionVariant::About => None,
    };
    html! {
        p {
            a href={ "/admin/sections/" (variant.as_str()) "/new" } { "Add " (variant.default_label()) " section" }
            @if let Some(collection) = items {
                " · " a href={ "/admin/items/" (collection.as_str()) } { "Manage items" }
            }
        }
        table {
            thead { tr { th { "Section" } th { "Order" } th { "Status" } th { "Actions" } } }
            tbody {
                @for record in rows {
                    @let path = section_path(record.key());
                    tr {
                        td { a href=(path) { (record.summary()) } }
                        td { (record.display_order()) }
                        td { (enabled_badge(record.enabled())) }
                        td {
                            (post_button(&format!("{path}/toggle"), if record.enabled() { "Disable" } else { "Enable" }))
                            " "
                            (post_button(&format!("{path}/delete"), "Delete"))
                        }
                    }
                }
            }
        }
    }
}

/// Create or edit form for one section. `key` is `None` when creating.
#[must_use]
pub fn render_section_form(
    variant: SectionVariant,
    key: Option<SectionKey>,
    form: &SectionForm,
    message: Option<Flash<'_>>,
) -> Markup {
    let action = key.map_or_else(|| format!("/admin/sections/{variant}"), section_path);
    let title = match key {
        Some(_) => format!("Edit {} section", variant.default_label()),
        None => format!("New {} section", variant.default_label()),
    };
    let checked = key.is_none() || form.is_enabled();

    let body = html! {
        (flash(message))
        form method="post" action=(action) {
            (text_field("Navigation label", "section_name", form.section_name.as_ref(), false))
            @match variant {
                SectionVariant::Hero => { (hero_fields(form)) }
                SectionVariant::About => { (about_fields(form)) }
                SectionVariant::Services | SectionVariant::Portfolio => {
                    (text_field("Title", "title", form.title.as_ref(), false))
                    (text_field("Subtitle", "subtitle", form.subtitle.as_ref(), false))
                    (text_field("Title color", "title_color", form.title_color.as_ref(), false))
                    (text_field("Subtitle color", "subtitle_color", form.subtitle_color.as_ref(), false))
                }
                SectionVariant::Testimonials => { (testimonial_fields(form)) }
            }
            (checkbox("Enabled", "enabled", checked))
            button type="submit" { "Save" }
            " " a href={ "/admin/sections?tab=" (variant.as_str()) } { "Cancel" }
        }
    };
    admin_layout(&title, AdminPage::Sections, body)
}

fn hero_fields(form: &SectionForm) -> Markup {
    let alignment = form.subtitle_alignment.as_deref().unwrap_or("center");
    html! {
        (textarea_field("Title (markdown)", "title", form.title.as_ref(), true))
        (textarea_field("Subtitle (markdown)", "subtitle", form.subtitle.as_ref(), false))
        (text_field("Title color", "title_color", form.title_color.as_ref(), false))
        (text_field("Subtitle color", "subtitle_color", form.subtitle_color.as_ref(), false))
        label.field {
            span { "Subtitle alignment" }
            select name="subtitle_alignment" {
                @for choice in SUBTITLE_ALIGNMENTS {
                    option value=(choice) selected[choice == alignment] { (choice) }
                }
            }
        }
        (text_field("Primary button text", "primary_cta_text", form.primary_cta_text.as_ref(), false))
        (text_field("Primary button link", "primary_cta_link", form.primary_cta_link.as_ref(), false))
        (text_field("Primary button text color", "primary_cta_text_color", form.primary_cta_text_color.as_ref(), false))
        (text_field("Primary button background", "primary_cta_bg_color", form.primary_cta_bg_color.as_ref(), false))
        (text_field("Secondary button text", "secondary_cta_text", form.secondary_cta_text.as_ref(), false))
        (text_field("Secondary button link", "secondary_cta_link", form.secondary_cta_link.as_ref(), false))
        (text_field("Secondary button text color", "secondary_cta_text_color", form.secondary_cta_text_color.as_ref(), false))
        (text_field("Secondary button background", "secondary_cta_bg_color", form.secondary_cta_bg_color.as_ref(), false))
        (text_field("Background image URL", "background_image_url", form.background_image_url.as_ref(), false))
        (text_field("Overlay color", "background_overlay_color", form.background_overlay_color.as_ref(), false))
        (text_field("Overlay opacity (0 to 1)", "background_overlay_opacity", form.background_overlay_opacity.as_ref(), false))
    }
}

fn about_fields(form: &SectionForm) -> Markup {
    html! {
        (text_field("Title", "title", form.title.as_ref(), true))
        (text_field("Subtitle", "subtitle", form.subtitle.as_ref(), false))
        (textarea_field("Content (markdown)", "content", form.content.as_ref(), true))
        (text_field("Image URL", "image_url", form.image_url.as_ref(), false))
        (text_field("Title color", "title_color", form.title_color.as_ref(), false))
        (text_field("Subtitle color", "subtitle_color", form.subtitle_color.as_ref(), false))
        (text_field("Content color", "content_color", form.content_color.as_ref(), false))
        (text_field("Content font size", "content_font_size", form.content_font_size.as_ref(), false))
    }
}

fn testimonial_fields(form: &SectionForm) -> Markup {
    html! {
        (textarea_field("Quote", "quote", form.quote.as_ref(), true))
        (text_field("Author name", "author_name", form.author_name.as_ref(), true))
        (text_field("Author role", "author_role", form.author_role.as_ref(), false))
        (text_field("Author company", "author_company", form.author_company.as_ref(), false))
        (text_field("Author image URL", "author_image_url", form.author_image_url.as_ref(), false))
        (text_field("Rating (0 to 5)", "rating", form.rating.as_ref(), false))
        (text_field("Quote color", "quote_color", form.quote_color.as_ref(), false))
        (text_field("Author name color", "author_name_color", form.author_name_color.as_ref(), false))
        (text_field("Author role color", "author_role_color", form.author_role_color.as_ref(), false))
    }
}

/// One line of an item listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: Uuid,
    pub title: String,
    pub detail: Option<String>,
    pub enabled: bool,
}

/// Where an item's edit and create links point. Testimonials are edited as sections.
fn item_edit_base(collection: ItemCollection) -> String {
    match collection {
        ItemCollection::Testimonials => "/admin/sections/testimonials".to_string(),
        other => format!("/admin/items/{other}"),
    }
}

fn collection_title(collection: ItemCollection) -> &'static str {
    match collection {
        ItemCollection::Services => "Services",
        ItemCollection::PortfolioItems => "Portfolio items",
        ItemCollection::Testimonials => "Testimonials",
    }
}

/// Listing of one item collection with move, toggle and delete controls.
#[must_use]
pub fn render_items_manager(
    collection: ItemCollection,
    rows: &[ItemRow],
    message: Option<Flash<'_>>,
) -> Markup {
    let edit_base = item_edit_base(collection);
    let body = html! {
        (flash(message))
        p { a href={ (edit_base) "/new" } { "Add item" } }
        table {
            thead { tr { th { "Title" } th { "Details" } th { "Status" } th { "Move" } th { "Actions" } } }
            tbody {
                @for row in rows {
                    @let path = format!("/admin/items/{collection}/{}", row.id);
                    tr {
                        td { a href={ (edit_base) "/" (row.id.to_string()) } { (row.title) } }
                        td { @if let Some(detail) = &row.detail { (detail) } }
                        td { (enabled_badge(row.enabled)) }
                        td { (move_buttons(&format!("{path}/move"))) }
                        td {
                            (post_button(&format!("{path}/toggle"), if row.enabled { "Disable" } else { "Enable" }))
                            " "
                            (post_button(&format!("{path}/delete"), "Delete"))
                        }
                    }
                }
            }
        }
        @if rows.is_empty() {
            p { "No items yet." }
        }
    };
    admin_layout(collection_title(collection), AdminPage::Sections, body)
}

/// Create or edit form for a service or portfolio item.
#[must_use]
pub fn render_item_form(
    collection: ItemCollection,
    id: Option<Uuid>,
    form: &ItemForm,
    message: Option<Flash<'_>>,
) -> Markup {
    let action = id.map_or_else(
        || format!("/admin/items/{collection}"),
        |id| format!("/admin/items/{collection}/{id}"),
    );
    let services = collection == ItemCollection::Services;
    let checked = id.is_none() || form.enabled.is_some();

    let body = html! {
        (flash(message))
        form method="post" action=(action) {
            (text_field("Title", "title", form.title.as_ref(), true))
            (textarea_field("Description", "description", form.description.as_ref(), services))
            @if services {
                (text_field("Icon", "icon", form.icon.as_ref(), false))
            } @else {
                (text_field("Image URL", "image_url", form.image_url.as_ref(), false))
                (text_field("Project URL", "project_url", form.project_url.as_ref(), false))
                (text_field("Category", "category", form.category.as_ref(), false))
            }
            (text_field("Title color", "title_color", form.title_color.as_ref(), false))
            (text_field("Description color", "description_color", form.description_color.as_ref(), false))
            (checkbox("Enabled", "enabled", checked))
            button type="submit" { "Save" }
            " " a href={ "/admin/items/" (collection.as_str()) } { "Cancel" }
        }
    };
    admin_layout(collection_title(collection), AdminPage::Sections, body)
}

/// All articles, newest first.
#[must_use]
pub fn render_news_list(articles: &[news_article::Model], message: Option<Flash<'_>>) -> Markup {
    let body = html! {
        (flash(message))
        p { a href="/admin/news/new" { "New article" } }
        table {
            thead { tr { th { "Title" } th { "Slug" } th { "Status" } th { "Actions" } } }
            tbody {
                @for article in articles {
                    @let path = format!("/admin/news/{}", article.id);
                    tr {
                        td { a href=(path) { (article.title) } }
                        td { code { (article.slug) } }
                        td {
                            @if article.published { span.badge { "Published" } }
                            @else { span.badge.off { "Draft" } }
                        }
                        td {
                            (post_button(&format!("{path}/publish"), if article.published { "Unpublish" } else { "Publish" }))
                            " "
                            (post_button(&format!("{path}/delete"), "Delete"))
                        }
                    }
                }
            }
        }
    };
    admin_layout("News", AdminPage::News, body)
}

/// Create or edit form for an article.
#[must_use]
pub fn render_article_form(id: Option<Uuid>, form: &ArticleForm, message: Option<Flash<'_>>) -> Markup {
    let action = id.map_or_else(|| "/admin/news".to_string(), |id| format!("/admin/news/{id}"));
    let body = html! {
        (flash(message))
        form method="post" action=(action) {
            (text_field("Title", "title", form.title.as_ref(), true))
            (text_field("Slug (a-z, 0-9, -)", "slug", form.slug.as_ref(), true))
            (textarea_field("Excerpt", "excerpt", form.excerpt.as_ref(), false))
            (textarea_field("Content (markdown)", "content", form.content.as_ref(), true))
            (text_field("Featured image URL", "featured_image", form.featured_image.as_ref(), false))
            (checkbox("Published", "published", form.published.is_some()))
            button type="submit" { "Save" }
            " " a href="/admin/news" { "Cancel" }
        }
    };
    admin_layout(if id.is_some() { "Edit article" } else { "New article" }, AdminPage::News, body)
}

/// One form per footer block.
#[must_use]
pub fn render_footer_forms(blocks: &[(FooterKind, FooterForm)], message: Option<Flash<'_>>) -> Markup {
    let body = html! {
        (flash(message))
        @for (kind, form) in blocks {
            section {
                h2 { (kind.as_str()) }
                form method="post" action={ "/admin/footer/" (kind.as_str()) } {
                    (text_field("Title", "title", form.title.as_ref(), false))
                    (textarea_field("Content", "content", form.content.as_ref(), false))
                    (checkbox("Enabled", "enabled", form.enabled.is_some()))
                    button type="submit" { "Save" }
                }
            }
        }
    };
    admin_layout("Footer", AdminPage::Footer, body)
}

/// Describes what the public contact form collects and where it goes.
#[must_use]
pub fn render_contact_info() -> Markup {
    let body = html! {
        p { "The contact section at the bottom of the home page collects:" }
        ul {
            li { strong { "Name" } " (required)" }
            li { strong { "Email" } " (required, must be a valid address)" }
            li { strong { "Subject" } " (required)" }
            li { strong { "Message" } " (required)" }
        }
        p { "Submissions are handed to the configured contact transport. The default transport records them in the server log." }
        p { "Contact details shown in the footer are edited on the " a href="/admin" { "Company Profile" } " page." }
    };
    admin_layout("Contact Form", AdminPage::Contact, body)
}

/// The company profile form. Field names match the settings columns.
#[must_use]
pub fn render_profile(settings: &site_settings::Model, message: Option<Flash<'_>>) -> Markup {
    let text = |label: &str, name: &str, value: Option<&String>| text_field(label, name, value, false);
    let current_font = settings.font_family.as_deref().unwrap_or("Inter");

    let body = html! {
        (flash(message))
        form method="post" action="/admin" {
            h2 { "Company" }
            (text_field("Company name", "company_name", Some(&settings.company_name), true))
            (text("Tagline", "company_tagline", settings.company_tagline.as_ref()))
            (text("Logo URL", "logo_url", settings.logo_url.as_ref()))
            (text("Favicon URL", "favicon_url", settings.favicon_url.as_ref()))
            h2 { "Theme" }
            (text_field("Primary color", "primary_color", Some(&settings.primary_color), true))
            (text_field("Secondary color", "secondary_color", Some(&settings.secondary_color), true))
            (text("Background color", "background_color", settings.background_color.as_ref()))
            (text("Background color (dark)", "background_color_dark", settings.background_color_dark.as_ref()))
            (text("Text color", "text_color", settings.text_color.as_ref()))
            (text("Text color (dark)", "text_color_dark", settings.text_color_dark.as_ref()))
            (text("Accent color", "accent_color", settings.accent_color.as_ref()))
            (text("Accent hover color", "accent_color_hover", settings.accent_color_hover.as_ref()))
            (text("Border color", "border_color", settings.border_color.as_ref()))
            (text("Border color (dark)", "border_color_dark", settings.border_color_dark.as_ref()))
            (text("Header background", "header_background_color", settings.header_background_color.as_ref()))
            (text("Header text color", "header_text_color", settings.header_text_color.as_ref()))
            label.field {
                span { "Font family" }
                select name="font_family" {
                    @for family in font_families() {
                        option value=(family) selected[family == current_font] { (family) }
                    }
                }
            }
            h2 { "Contact details" }
            (text("Email", "contact_email", settings.contact_email.as_ref()))
            (text("Phone", "contact_phone", settings.contact_phone.as_ref()))
            (text("Address", "contact_address", settings.contact_address.as_ref()))
            h2 { "Social links" }
            (text("Facebook", "social_facebook", settings.social_facebook.as_ref()))
            (text("Twitter", "social_twitter", settings.social_twitter.as_ref()))
            (text("LinkedIn", "social_linkedin", settings.social_linkedin.as_ref()))
            (text("Instagram", "social_instagram", settings.social_instagram.as_ref()))
            button type="submit" { "Save profile" }
        }
    };
    admin_layout("Company Profile", AdminPage::Profile, body)
}
