//! HTML rendering with maud: the public single-page site, news pages and the admin area.

pub mod admin;
pub mod markdown;
pub mod page;
pub mod sections;
pub mod theme;
