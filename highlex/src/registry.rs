//! Language lookup by name or alias.

use crate::error::HighlexError;
use crate::highlighter::Highlighter;
use crate::tree::Highlight;
use indexmap::IndexMap;
use smartstring::alias::String;

/// A set of compiled languages.
///
/// Names and aliases are matched case-insensitively. Registering a language
/// whose name or alias is already taken replaces the earlier mapping for
/// that key.
#[derive(Debug, Default)]
pub struct Registry<'h> {
    languages: Vec<&'h Highlighter>,
    keys: IndexMap<String, usize>,
}

fn key(name: &str) -> String {
    name.to_lowercase().into()
}

impl<'h> Registry<'h> {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
            keys: IndexMap::new(),
        }
    }

    pub fn register(&mut self, highlighter: &'h Highlighter) {
        let index = self.languages.len();
        self.languages.push(highlighter);
        self.keys.insert(key(highlighter.name()), index);
        for alias in highlighter.aliases() {
            self.keys.insert(key(alias), index);
        }
        log::debug!(
            "registered language {:?} (aliases {:?})",
            highlighter.name(),
            highlighter.aliases()
        );
    }

    pub fn get(&self, name: &str) -> Option<&'h Highlighter> {
        self.keys.get(&key(name)).map(|&i| self.languages[i])
    }

    /// Names of the registered languages, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.languages.iter().map(|hl| hl.name())
    }

    pub fn highlight<'s>(
        &self,
        name: &str,
        source: &'s str,
    ) -> Result<Highlight<'s>, HighlexError> {
        self.get(name)
            .ok_or_else(|| HighlexError::UnknownLanguage(name.into()))?
            .highlight(source)
    }

    /// Highlight with every registered language and keep the most relevant
    /// result. Languages that reject the source as illegal are skipped; on a
    /// tie the earlier registration wins.
    pub fn highlight_auto<'s>(&self, source: &'s str) -> Option<Highlight<'s>> {
        let mut best: Option<Highlight<'s>> = None;
        for hl in &self.languages {
            match hl.highlight(source) {
                Ok(out) => {
                    log::trace!("AUTO: {:?} relevance {}", hl.name(), out.relevance());
                    if best.as_ref().is_none_or(|b| out.relevance() > b.relevance()) {
                        best = Some(out);
                    }
                }
                Err(e) => log::trace!("AUTO: {:?} rejected: {}", hl.name(), e),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Contained, Keywords, Language, Rule, base};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const WORDS: Language = Language {
        name: "Words",
        aliases: &["w", "wd"],
        keywords: Keywords {
            keyword: &["alpha", "beta"],
            ..Keywords::EMPTY
        },
        illegal: None,
        contains: &[],
    };

    const COMMENTS: Language = Language {
        name: "Comments",
        aliases: &["c"],
        keywords: Keywords::EMPTY,
        illegal: Some("#"),
        contains: &[Contained::Rule(Rule::Nested(base::C_LINE_COMMENT))],
    };

    #[test]
    fn lookup_by_name_and_alias() {
        init_logger();
        let words = Highlighter::new(&WORDS).unwrap();
        let mut reg = Registry::new();
        reg.register(&words);
        assert_eq!(reg.get("words").map(|h| h.name()), Some("Words"));
        assert_eq!(reg.get("WD").map(|h| h.name()), Some("Words"));
        assert!(reg.get("nope").is_none());
        assert_eq!(reg.names().collect::<Vec<_>>(), ["Words"]);

        let err = reg.highlight("nope", "x").unwrap_err();
        assert!(matches!(err, HighlexError::UnknownLanguage(_)));
        assert_eq!(reg.highlight("w", "alpha").unwrap().relevance(), 1);
    }

    #[test]
    fn auto_detection_prefers_relevance_and_skips_illegal() {
        init_logger();
        let words = Highlighter::new(&WORDS).unwrap();
        let comments = Highlighter::new(&COMMENTS).unwrap();
        let mut reg = Registry::new();
        reg.register(&comments);
        reg.register(&words);

        let out = reg.highlight_auto("// x").unwrap();
        assert_eq!(out.language(), "Comments");

        let out = reg.highlight_auto("alpha beta").unwrap();
        assert_eq!(out.language(), "Words");

        // Illegal for Comments, zero relevance for Words.
        let out = reg.highlight_auto("# gamma").unwrap();
        assert_eq!(out.language(), "Words");
    }
}
