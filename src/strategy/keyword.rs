// ============================================================
// Layer 4 - Keyword Replacement Strategy
// ============================================================
// Finds a legal term from the entity synonym groups and swaps
// it for another member of the same group.
//
//   question    - first matching term, one occurrence replaced
//   explanation - every occurrence of that same term replaced
//                 with the same synonym
//   options     - each option resolves its own match and its
//                 own random synonym, one occurrence each
//   answer      - untouched
//
// Matching is plain substring search: groups in table order,
// label before synonyms. A short term can therefore match inside
// a longer word.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::sync::Arc;

use super::{DerivationContext, DerivationStrategy};
use crate::domain::knowledge::{DomainTables, EntityGroup};
use crate::domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};

pub struct KeywordReplacement {
    tables: Arc<DomainTables>,
}

impl KeywordReplacement {
    pub fn new(tables: Arc<DomainTables>) -> Self {
        Self { tables }
    }

    /// The first group member found anywhere in `text`
    fn find_term(&self, text: &str) -> Option<(&EntityGroup, &str)> {
        self.tables.entity_groups.iter().find_map(|g| {
            g.members().find(|m| text.contains(m)).map(|m| (g, m))
        })
    }

    /// Pick a synonym for `text`'s first term, if it has one
    fn pick_replacement(&self, text: &str, rng: &mut dyn RngCore) -> Option<(&str, &str)> {
        let (group, term) = self.find_term(text)?;
        let replacement = group.alternatives(term).choose(rng).copied()?;
        Some((term, replacement))
    }

    /// Replace one term in a standalone string, or return it unchanged
    fn replace_once(&self, text: &str, rng: &mut dyn RngCore) -> String {
        match self.pick_replacement(text, rng) {
            Some((term, replacement)) => text.replacen(term, replacement, 1),
            None => text.to_string(),
        }
    }
}

impl DerivationStrategy for KeywordReplacement {
    fn method(&self) -> DerivationMethod {
        DerivationMethod::KeywordReplacement
    }

    fn attempt(&self, source: &SourceQuestion, ctx: &mut DerivationContext<'_>) -> Option<DerivedQuestion> {
        let (term, replacement) = self.pick_replacement(&source.question, ctx.rng())?;

        let mut derived = DerivedQuestion::from_source(source, self.method());
        derived.question = source.question.replacen(term, replacement, 1);
        derived.explanation = source.explanation.as_ref().map(|e| e.replace(term, replacement));
        derived.options = source.options.as_ref().map(|opts| {
            opts.iter().map(|o| self.replace_once(o, ctx.rng())).collect()
        });

        tracing::debug!("keyword_replacement: '{}' -> '{}'", term, replacement);
        Some(derived).filter(|d| d.differs_from(source))
    }
}
