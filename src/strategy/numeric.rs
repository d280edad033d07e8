// ============================================================
// Layer 4 - Number Replacement Strategy
// ============================================================
// Perturbs the first number in the question text.
//
// The number's magnitude picks a band from the knowledge tables.
// With the default tables:
//
//   n < 100         → likely a number of days
//                     uniform in [max(1, n-10), n+10]
//   100 <= n < 1000 → likely a small fine in yuan
//                     uniform in [max(100, n-200), n+200]
//   n >= 1000       → a large amount
//                     round(n * m), m uniform in [0.8, 1.2]
//
// A digit run too long for u64 is still at least 1000, so it takes
// the last band; a scale rule is applied in f64 there.
//
// The literal digit string is replaced once in the question and
// once in the explanation (first occurrence each, substring
// match). Options and answer are left alone.
//
// Example:
//   "应当在15日内缴纳罚款" → "应当在22日内缴纳罚款"
//
// Reference: rand crate documentation (Rng::gen_range)

use rand::{Rng, RngCore};
use std::sync::Arc;

use super::{DerivationContext, DerivationStrategy};
use crate::domain::knowledge::{BandRule, DomainTables};
use crate::domain::question::{DerivationMethod, DerivedQuestion, SourceQuestion};

pub struct NumberReplacement {
    tables: Arc<DomainTables>,
}

impl NumberReplacement {
    pub fn new(tables: Arc<DomainTables>) -> Self {
        Self { tables }
    }
}

/// The first run of ASCII digits in `text`, as written.
/// ASCII digits are one byte each, so byte slicing is safe here.
pub fn first_number(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest  = &text[start..];
    let len   = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Draw a new value for `n` according to its band rule.
pub fn perturb(rule: &BandRule, n: u64, rng: &mut dyn RngCore) -> u64 {
    match *rule {
        BandRule::Jitter { spread, floor } => {
            let lo = n.saturating_sub(spread).max(floor);
            // A floor above n + spread would make an empty range
            let hi = n.saturating_add(spread).max(lo);
            rng.gen_range(lo..=hi)
        }
        BandRule::Scale { min, max } => {
            let m: f64 = rng.gen_range(min..=max);
            // Float to int casts saturate, so huge values cannot wrap
            (n as f64 * m).round() as u64
        }
    }
}

/// Perturb a digit run that does not fit in u64.
/// Only a scale rule can be applied; f64 keeps the magnitude.
fn perturb_wide(rule: &BandRule, literal: &str, rng: &mut dyn RngCore) -> Option<String> {
    match *rule {
        BandRule::Scale { min, max } => {
            let n: f64 = literal.parse().ok().filter(|n: &f64| n.is_finite())?;
            let m: f64 = rng.gen_range(min..=max);
            Some(format!("{:.0}", (n * m).round()))
        }
        BandRule::Jitter { .. } => None,
    }
}

impl DerivationStrategy for NumberReplacement {
    fn method(&self) -> DerivationMethod {
        DerivationMethod::NumberReplacement
    }

    fn attempt(&self, source: &SourceQuestion, ctx: &mut DerivationContext<'_>) -> Option<DerivedQuestion> {
        let literal = first_number(&source.question)?;

        let new_literal = match literal.parse::<u64>() {
            Ok(n) => {
                let band = self.tables.band_for(n)?;
                perturb(&band.rule, n, ctx.rng()).to_string()
            }
            Err(e) => {
                tracing::debug!("number_replacement: '{}' exceeds u64 ({}), scaling as f64", literal, e);
                let band = self.tables.band_for(u64::MAX)?;
                perturb_wide(&band.rule, literal, ctx.rng())?
            }
        };
        if new_literal == literal {
            tracing::debug!("number_replacement: {} drew itself, no change", literal);
            return None;
        }

        let mut derived = DerivedQuestion::from_source(source, self.method());
        derived.question = source.question.replacen(literal, &new_literal, 1);
        derived.explanation = source
            .explanation
            .as_ref()
            .map(|e| e.replacen(literal, &new_literal, 1));

        tracing::debug!("number_replacement: {} -> {}", literal, new_literal);
        Some(derived).filter(|d| d.differs_from(source))
    }
}
