use serde::{Deserialize, Serialize};

mod tables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::De, Locale::Fr];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Parses `de`, `de-DE`, `fr_FR.UTF-8` and similar; `None` when unsupported.
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code
            .split(|c: char| matches!(c, '-' | '_' | '.'))
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == language)
    }

    /// Unsupported codes fall back to English.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::debug!(code, "unsupported locale; falling back to en");
            Self::default()
        })
    }

    /// A supported saved preference wins, then the system locale, then English.
    pub fn detect(saved: Option<&str>, system: Option<&str>) -> Self {
        saved
            .and_then(Self::from_code)
            .or_else(|| system.and_then(Self::from_code))
            .unwrap_or_default()
    }

    /// Reads the POSIX locale variables in priority order.
    pub fn system_code() -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => tables::EN,
            Self::De => tables::DE,
            Self::Fr => tables::FR,
        }
    }

    fn lookup(self, key: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(*v))
    }
}

/// Looks `key` up for `locale`, falling back to English and then to the key itself.
/// Each `{name}` placeholder is replaced by the matching value.
pub fn translate(locale: Locale, key: &str, replacements: &[(&str, &str)]) -> String {
    let mut text = locale
        .lookup(key)
        .or_else(|| Locale::En.lookup(key))
        .unwrap_or(key)
        .to_string();
    for (placeholder, value) in replacements {
        text = text.replace(&format!("{{{placeholder}}}"), value);
    }
    text
}
