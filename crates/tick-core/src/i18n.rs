use tracing::debug;

/// Fallback language when no config or an unknown code is given.
pub const DEFAULT_LANGUAGE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("Todos", "Todos"),
    ("What needs to be done?", "What needs to be done?"),
    ("Add", "Add"),
    ("all", "all"),
    ("active", "active"),
    ("completed", "completed"),
    ("Clear completed", "Clear completed"),
    ("item(s) left", "item(s) left"),
    ("Edit To-Do", "Edit To-Do"),
    ("Delete To-Do", "Delete To-Do"),
    ("Update To-Do", "Update To-Do"),
];

const JA: &[(&str, &str)] = &[
    ("Todos", "タスク"),
    ("What needs to be done?", "何をしますか？"),
    ("Add", "追加"),
    ("all", "すべて"),
    ("active", "アクティブ"),
    ("completed", "完了"),
    ("Clear completed", "完了済みをクリア"),
    ("item(s) left", "個のアイテムが残っています"),
    ("Edit To-Do", "タスクを編集"),
    ("Delete To-Do", "タスクを削除"),
    ("Update To-Do", "タスクを更新"),
];

pub fn known_codes() -> &'static [&'static str] {
    &["en", "ja"]
}

/// One language's UI strings. Static data, immutable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    code: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl Catalog {
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Looks up a UI string. Unknown keys echo back, so a renderer never
    /// loses a label to a missing entry.
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| *value)
            .unwrap_or(key)
    }
}

fn lookup(code: &str) -> Option<Catalog> {
    match code {
        "en" => Some(Catalog {
            code: "en",
            entries: EN,
        }),
        "ja" => Some(Catalog {
            code: "ja",
            entries: JA,
        }),
        _ => None,
    }
}

/// Language table handed to the controller at construction. Resolution
/// never fails: unknown or empty codes land on the default language.
#[derive(Debug, Clone)]
pub struct Localizer {
    default_code: String,
}

impl Localizer {
    pub fn new(default_code: &str) -> Self {
        let default_code = if lookup(default_code).is_some() {
            default_code.to_string()
        } else {
            debug!(code = %default_code, "unknown default language; using built-in default");
            DEFAULT_LANGUAGE.to_string()
        };
        Self { default_code }
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Known code → that catalog; anything else → the default language,
    /// silently. Callers that need to detect the fallback compare the
    /// returned catalog's code with what they asked for.
    pub fn resolve(&self, code: &str) -> Catalog {
        if let Some(catalog) = lookup(code) {
            return catalog;
        }

        debug!(requested = %code, fallback = %self.default_code, "unknown language code");
        lookup(&self.default_code).unwrap_or(Catalog {
            code: DEFAULT_LANGUAGE,
            entries: EN,
        })
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LANGUAGE, Localizer, known_codes};

    #[test]
    fn resolve_falls_back_to_default_on_unknown_codes() {
        let localizer = Localizer::default();
        assert_eq!(localizer.resolve("xx").code(), DEFAULT_LANGUAGE);
        assert_eq!(localizer.resolve("").code(), DEFAULT_LANGUAGE);
        assert_eq!(localizer.resolve("ja").code(), "ja");
    }

    #[test]
    fn unknown_default_language_lands_on_the_built_in() {
        let localizer = Localizer::new("tlh");
        assert_eq!(localizer.default_code(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn japanese_catalog_translates_known_keys() {
        let localizer = Localizer::default();
        let catalog = localizer.resolve("ja");
        assert_eq!(catalog.get("Todos"), "タスク");
        assert_eq!(catalog.get("Clear completed"), "完了済みをクリア");
    }

    #[test]
    fn unknown_keys_echo_back() {
        let localizer = Localizer::default();
        let catalog = localizer.resolve("en");
        assert_eq!(catalog.get("no such key"), "no such key");
    }

    #[test]
    fn every_known_code_resolves_to_itself() {
        let localizer = Localizer::default();
        for code in known_codes() {
            assert_eq!(localizer.resolve(code).code(), *code);
        }
    }
}
