//! Entity module - Contains all SeaORM entity definitions for the content store.
//! Each collection the site reads or the admin area edits has one module here,
//! with a Model struct for data and an Entity struct for operations.

pub mod about_section;
pub mod footer_content;
pub mod hero_section;
pub mod navigation_item;
pub mod news_article;
pub mod portfolio_item;
pub mod portfolio_section;
pub mod service;
pub mod services_section;
pub mod site_settings;
pub mod testimonial;

// Re-export specific types to avoid conflicts
pub use about_section::{Entity as AboutSection, Model as AboutSectionModel};
pub use footer_content::{Entity as FooterContent, Model as FooterContentModel};
pub use hero_section::{Entity as HeroSection, Model as HeroSectionModel};
pub use navigation_item::{Entity as NavigationItem, Model as NavigationItemModel};
pub use news_article::{Entity as NewsArticle, Model as NewsArticleModel};
pub use portfolio_item::{Entity as PortfolioItem, Model as PortfolioItemModel};
pub use portfolio_section::{Entity as PortfolioSection, Model as PortfolioSectionModel};
pub use service::{Entity as Service, Model as ServiceModel};
pub use services_section::{Entity as ServicesSection, Model as ServicesSectionModel};
pub use site_settings::{Entity as SiteSettings, Model as SiteSettingsModel};
pub use testimonial::{Entity as Testimonial, Model as TestimonialModel};
