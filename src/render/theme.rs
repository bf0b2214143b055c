//! Theme values derived from the site settings.
//!
//! Colors resolve through a chain: the explicitly stored value, then the theme's CSS
//! custom property, then a hardcoded fallback baked into the `var()` expression.

use crate::{core::settings::DEFAULT_SITE_SETTINGS, entities::site_settings};

/// Header background when none is configured.
pub const DEFAULT_HEADER_BACKGROUND: &str = "#ffffff";
/// Header text color when none is configured.
pub const DEFAULT_HEADER_TEXT: &str = "#171717";

const FONT_STYLESHEETS: [(&str, &str); 15] = [
    ("Inter", "Inter:wght@400;500;600;700"),
    ("Roboto", "Roboto:wght@400;500;700"),
    ("Open Sans", "Open+Sans:wght@400;600;700"),
    ("Lato", "Lato:wght@400;700"),
    ("Montserrat", "Montserrat:wght@400;600;700"),
    ("Poppins", "Poppins:wght@400;600;700"),
    ("Raleway", "Raleway:wght@400;600;700"),
    ("Playfair Display", "Playfair+Display:wght@400;700"),
    ("Merriweather", "Merriweather:wght@400;700"),
    ("Source Sans Pro", "Source+Sans+Pro:wght@400;600;700"),
    ("Nunito", "Nunito:wght@400;600;700"),
    ("Ubuntu", "Ubuntu:wght@400;500;700"),
    ("Crimson Text", "Crimson+Text:wght@400;600"),
    ("Lora", "Lora:wght@400;700"),
    ("PT Sans", "PT+Sans:wght@400;700"),
];

/// Names of the selectable font families.
pub fn font_families() -> impl Iterator<Item = &'static str> {
    FONT_STYLESHEETS.iter().map(|(name, _)| *name)
}

/// Google Fonts stylesheet for `family`; unknown families load Inter.
#[must_use]
pub fn font_stylesheet_url(family: Option<&str>) -> String {
    let query = FONT_STYLESHEETS
        .iter()
        .find(|(name, _)| Some(*name) == family)
        .or_else(|| FONT_STYLESHEETS.first())
        .map_or("Inter:wght@400;500;600;700", |(_, query)| query);
    format!("https://fonts.googleapis.com/css2?family={query}&display=swap")
}

/// A trimmed, non-empty stored value.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolves a color: the stored value if set, else `var(--{css_var}, {fallback})`.
#[must_use]
pub fn color_chain(explicit: Option<&str>, css_var: &str, fallback: &str) -> String {
    present(explicit).map_or_else(
        || format!("var(--{css_var}, {fallback})"),
        ToString::to_string,
    )
}

/// A stored value or a literal fallback, no CSS variable in between.
#[must_use]
pub fn or_literal<'a>(explicit: Option<&'a str>, fallback: &'a str) -> &'a str {
    present(explicit).unwrap_or(fallback)
}

/// The `:root` block defining the theme custom properties.
#[must_use]
pub fn theme_css(settings: &site_settings::Model) -> String {
    let defaults = &DEFAULT_SITE_SETTINGS;
    let primary = or_literal(Some(&settings.primary_color), defaults.primary_color);
    let secondary = or_literal(Some(&settings.secondary_color), defaults.secondary_color);
    let font = or_literal(settings.font_family.as_deref(), defaults.font_family);

    let vars = [
        ("primary-color", primary),
        ("secondary-color", secondary),
        (
            "background-color",
            or_literal(settings.background_color.as_deref(), defaults.background_color),
        ),
        (
            "background-color-dark",
            or_literal(
                settings.background_color_dark.as_deref(),
                defaults.background_color_dark,
            ),
        ),
        (
            "text-color",
            or_literal(settings.text_color.as_deref(), defaults.text_color),
        ),
        (
            "text-color-dark",
            or_literal(settings.text_color_dark.as_deref(), defaults.text_color_dark),
        ),
        // Accent falls back to the brand colors before the built-in default
        (
            "accent-color",
            or_literal(settings.accent_color.as_deref(), primary),
        ),
        (
            "accent-color-hover",
            or_literal(settings.accent_color_hover.as_deref(), secondary),
        ),
        (
            "border-color",
            or_literal(settings.border_color.as_deref(), defaults.border_color),
        ),
        (
            "border-color-dark",
            or_literal(settings.border_color_dark.as_deref(), defaults.border_color_dark),
        ),
    ];

    let mut css = String::from(":root {\n");
    for (name, value) in vars {
        css.push_str(&format!("  --{name}: {};\n", sanitize_css_value(value)));
    }
    css.push_str(&format!(
        "  --font-family: '{}', sans-serif;\n}}\n",
        sanitize_css_value(font).replace('\'', "")
    ));
    css
}

/// Strips characters that could close the declaration or the style element.
#[must_use]
pub fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        .collect()
}
