use std::path::Path;

use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// English messages compiled into the binary, used when no `.ftl` file can be read.
const BUILTIN_EN: &str = include_str!("../../resources/en.ftl");

const SUPPORTED: [&str; 2] = ["en", "de"];

/// Fluent-based internationalization.
pub struct I18n {
    bundle: FluentBundle<FluentResource>,
    lang: String,
}

impl I18n {
    /// Load the translation matching the system locale from `dir`.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let sys_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        Self::for_language(dir, &sys_lang)
    }

    /// Load `<lang>.ftl` from `dir`, falling back to English on disk and
    /// then to the built-in English messages.
    pub fn for_language<P: AsRef<Path>>(dir: P, locale: &str) -> Self {
        let dir = dir.as_ref();
        let locale = locale.to_lowercase();
        let lang = SUPPORTED
            .iter()
            .find(|code| locale.starts_with(*code))
            .copied()
            .unwrap_or("en");

        let candidates = if lang == "en" { vec!["en"] } else { vec![lang, "en"] };
        for code in candidates {
            let path = dir.join(format!("{}.ftl", code));
            match std::fs::read_to_string(&path) {
                Ok(source) => {
                    if let Some(i18n) = Self::from_source(code, source) {
                        return i18n;
                    }
                    warn!(path = %path.display(), "invalid translation file");
                }
                Err(e) => warn!(path = %path.display(), error = %e, "translation not found"),
            }
        }
        Self::builtin()
    }

    pub fn builtin() -> Self {
        Self::from_source("en", BUILTIN_EN.to_string()).unwrap_or_else(|| Self {
            bundle: FluentBundle::new(vec![LanguageIdentifier::default()]),
            lang: "en".to_string(),
        })
    }

    fn from_source(lang: &str, source: String) -> Option<Self> {
        let resource = FluentResource::try_new(source).ok()?;
        let langid: LanguageIdentifier = lang.parse().ok()?;
        let mut bundle = FluentBundle::new(vec![langid]);
        // Labels are plain GTK text; no bidi isolation marks around arguments.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).ok()?;
        Some(Self {
            bundle,
            lang: lang.to_string(),
        })
    }

    /// Get a translated message by its identifier.
    pub fn t(&self, id: &str) -> String {
        self.format(id, None)
    }

    /// Get a translated message with a single argument.
    pub fn t_arg<'a>(&self, id: &str, name: &'a str, value: impl Into<FluentValue<'a>>) -> String {
        let mut args = FluentArgs::new();
        args.set(name, value);
        self.format(id, Some(&args))
    }

    fn format(&self, id: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(id).and_then(|m| m.value()) else {
            return id.to_string();
        };
        let mut errors = vec![];
        self.bundle
            .format_pattern(pattern, args, &mut errors)
            .to_string()
    }

    pub fn current_language(&self) -> &str {
        &self.lang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> &'static str {
        concat!(env!("CARGO_MANIFEST_DIR"), "/resources")
    }

    #[test]
    fn builtin_has_english_messages() {
        let i18n = I18n::builtin();
        assert_eq!(i18n.t("app-title"), "Tic-Tac-Toe");
        assert_eq!(i18n.t("result-draw"), "Draw!");
    }

    #[test]
    fn unknown_id_echoes_id() {
        assert_eq!(I18n::builtin().t("no-such-message"), "no-such-message");
    }

    #[test]
    fn arguments_are_substituted() {
        let i18n = I18n::builtin();
        assert_eq!(i18n.t_arg("result-win", "player", "O"), "O Wins!");
        assert_eq!(i18n.t_arg("stats-games", "count", 12u32), "Total Games: 12");
    }

    #[test]
    fn german_locale_loads_german() {
        let i18n = I18n::for_language(resources(), "de_DE");
        assert_eq!(i18n.current_language(), "de");
        assert_eq!(i18n.t("menu-play"), "Spielen");
    }

    #[test]
    fn unsupported_locale_falls_back_to_english() {
        let i18n = I18n::for_language(resources(), "fr-FR");
        assert_eq!(i18n.current_language(), "en");
        assert_eq!(i18n.t("menu-play"), "Play");
    }

    #[test]
    fn missing_directory_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let i18n = I18n::for_language(dir.path(), "de");
        assert_eq!(i18n.current_language(), "en");
        assert_eq!(i18n.t("menu-exit"), "Exit");
    }
}
