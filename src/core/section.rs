//! Section types - the five section variants and the tagged record that carries them.
//!
//! A section *shell* is the row that governs where a section sits in the page, whether
//! it is visible, and how its heading looks. Each variant lives in its own collection,
//! so record ids are only unique within a variant: a [`SectionKey`] (variant + id) is
//! what identifies a shell globally.

use crate::{
    entities::{about_section, hero_section, portfolio_section, services_section, testimonial},
    errors::{Error, Result},
};
use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the five section schemas.
///
/// The declaration order is also the tie-break order when two shells of different
/// variants share a `display_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
    /// Full-height banner with calls to action
    Hero,
    /// Company story
    About,
    /// Services block; items come from `services`
    Services,
    /// Portfolio block; items come from `portfolio_items`
    Portfolio,
    /// Testimonials block; rows are both the block and its items
    Testimonials,
}

impl SectionVariant {
    /// Every variant, in tie-break order.
    pub const ALL: [Self; 5] = [
        Self::Hero,
        Self::About,
        Self::Services,
        Self::Portfolio,
        Self::Testimonials,
    ];

    /// Lowercase tag, also used as the page anchor and as `navigation_items.section_id`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Services => "services",
            Self::Portfolio => "portfolio",
            Self::Testimonials => "testimonials",
        }
    }

    /// Capitalized variant name, the navigation label of last resort.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::About => "About",
            Self::Services => "Services",
            Self::Portfolio => "Portfolio",
            Self::Testimonials => "Testimonials",
        }
    }
}

impl fmt::Display for SectionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown section type: {s}")))
    }
}

/// Globally unique identity of a section shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionKey {
    pub variant: SectionVariant,
    pub id: Uuid,
}

impl SectionKey {
    #[must_use]
    pub const fn new(variant: SectionVariant, id: Uuid) -> Self {
        Self { variant, id }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.variant, self.id)
    }
}

/// A section shell tagged with its variant.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum SectionRecord {
    Hero(hero_section::Model),
    About(about_section::Model),
    Services(services_section::Model),
    Portfolio(portfolio_section::Model),
    Testimonials(testimonial::Model),
}

impl SectionRecord {
    #[must_use]
    pub const fn variant(&self) -> SectionVariant {
        match self {
            Self::Hero(_) => SectionVariant::Hero,
            Self::About(_) => SectionVariant::About,
            Self::Services(_) => SectionVariant::Services,
            Self::Portfolio(_) => SectionVariant::Portfolio,
            Self::Testimonials(_) => SectionVariant::Testimonials,
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Hero(m) => m.id,
            Self::About(m) => m.id,
            Self::Services(m) => m.id,
            Self::Portfolio(m) => m.id,
            Self::Testimonials(m) => m.id,
        }
    }

    #[must_use]
    pub const fn key(&self) -> SectionKey {
        SectionKey::new(self.variant(), self.id())
    }

    #[must_use]
    pub const fn display_order(&self) -> i32 {
        match self {
            Self::Hero(m) => m.display_order,
            Self::About(m) => m.display_order,
            Self::Services(m) => m.display_order,
            Self::Portfolio(m) => m.display_order,
            Self::Testimonials(m) => m.display_order,
        }
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        match self {
            Self::Hero(m) => m.enabled,
            Self::About(m) => m.enabled,
            Self::Services(m) => m.enabled,
            Self::Portfolio(m) => m.enabled,
            Self::Testimonials(m) => m.enabled,
        }
    }

    /// The stored label override, if any.
    #[must_use]
    pub fn section_name(&self) -> Option<&str> {
        match self {
            Self::Hero(m) => m.section_name.as_deref(),
            Self::About(m) => m.section_name.as_deref(),
            Self::Services(m) => m.section_name.as_deref(),
            Self::Portfolio(m) => m.section_name.as_deref(),
            Self::Testimonials(m) => m.section_name.as_deref(),
        }
    }

    /// Navigation label: the trimmed `section_name`, else the capitalized variant name.
    #[must_use]
    pub fn nav_label(&self) -> String {
        self.section_name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.variant().default_label())
            .to_string()
    }

    /// Short human label for admin listings.
    #[must_use]
    pub fn summary(&self) -> String {
        let text = match self {
            Self::Hero(m) => Some(m.title.as_str()),
            Self::About(m) => Some(m.title.as_str()),
            Self::Services(m) => m.title.as_deref(),
            Self::Portfolio(m) => m.title.as_deref(),
            Self::Testimonials(m) => Some(m.author_name.as_str()),
        };
        text.map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| self.nav_label(), ToString::to_string)
    }
}

/// Direction of a single-step move in an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(Error::validation(format!("Unknown direction: {other}"))),
        }
    }
}

/// Index of the neighbour `index` would swap with, or `None` at the list boundary.
#[must_use]
pub const fn neighbour_index(index: usize, len: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up if index > 0 => Some(index - 1),
        Direction::Down if index + 1 < len => Some(index + 1),
        _ => None,
    }
}
