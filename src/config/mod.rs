//! Configuration module

mod site;

pub use site::normalize_base_path;
pub use site::HighlightConfig;
pub use site::SiteConfig;
pub use site::ENV_VAR;
