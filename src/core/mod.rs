//! Core business logic.
//!
//! Section ordering and navigation live in [`aggregator`], [`navigation`] and
//! [`reorder`]; [`store`] maps section variants onto their collections. The remaining
//! modules cover the conventional content CRUD around them.

pub mod aggregator;
pub mod contact;
pub mod editor;
pub mod footer;
pub mod items;
pub mod navigation;
pub mod news;
pub mod reorder;
pub mod section;
pub mod settings;
pub mod store;
