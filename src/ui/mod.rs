pub mod css;
pub mod ha_theme;
pub mod style;

pub use css::{render_root_css, render_stylesheet};
pub use style::{project_style_tokens, StyleTokens};
