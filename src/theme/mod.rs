//! Theme module - template engine, template loading and static assets

mod loader;
pub mod template;

pub use loader::ThemeLoader;
pub use template::{render, Context, Template, Value};
