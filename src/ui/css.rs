use std::fmt::Write as _;

use super::style::StyleTokens;

/// Renders the token table as a `:root` block of `--mirage-*` custom properties.
///
/// With `motion_enabled` off, a rule suppressing every transition and animation is
/// appended.
pub fn render_root_css(tokens: &StyleTokens, motion_enabled: bool) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in tokens.entries() {
        let _ = writeln!(css, "  --mirage-{name}: {value};");
    }
    css.push_str("}\n");

    if !motion_enabled {
        css.push_str(
            "
* {
  transition: none !important;
  animation: none !important;
}
",
        );
    }
    css
}

/// Card surface rules for each card style, reading the projected custom properties.
pub fn render_card_css(dark: bool) -> String {
    let mode = if dark { "dark" } else { "light" };
    format!(
        "
.mirage-card {{
  border-radius: var(--mirage-border-radius);
  color: var(--mirage-card-primary-text-color);
  font-family: var(--mirage-font-family);
  transition: background-color var(--mirage-transition-duration) ease,
              box-shadow var(--mirage-transition-duration) ease;
}}
.mirage-card.glass {{
  background: var(--mirage-glass-bg-color-{mode});
  border: var(--mirage-border-width) solid var(--mirage-glass-border-color-{mode});
  box-shadow: var(--mirage-glass-shadow-{mode});
  backdrop-filter: blur(var(--mirage-glass-blur));
}}
.mirage-card.solid {{
  background: var(--mirage-solid-bg-color-{mode});
  border: var(--mirage-border-width) solid var(--mirage-solid-border-color-{mode});
  box-shadow: var(--mirage-solid-shadow-{mode});
}}
.mirage-card.paper {{
  background: var(--mirage-paper-bg-color-{mode});
  border: var(--mirage-border-width) solid var(--mirage-paper-border-color-{mode});
  box-shadow: var(--mirage-paper-shadow-{mode});
}}
.mirage-card.floating {{
  background: var(--mirage-floating-bg-color-{mode});
  border: none;
  box-shadow: var(--mirage-floating-shadow-{mode});
}}
.mirage-card .separator {{
  border-top: var(--mirage-separator-width) solid var(--mirage-glass-border-color-{mode});
}}
.mirage-card .secondary {{
  color: var(--mirage-card-secondary-text-color);
}}
",
        mode = mode,
    )
}

/// Full style sheet for one render: the `:root` block followed by the card rules.
pub fn render_stylesheet(tokens: &StyleTokens, dark: bool, motion_enabled: bool) -> String {
    let mut css = render_root_css(tokens, motion_enabled);
    css.push_str(&render_card_css(dark));
    css
}
