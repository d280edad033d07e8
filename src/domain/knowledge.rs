// ============================================================
// Layer 3 - Domain Knowledge Tables
// ============================================================
// Static linguistic knowledge every strategy reads from:
//
//   entity_groups   - interchangeable legal terms
//   scenarios       - operational enforcement domains
//   numeric_bands   - how a number of a given size is perturbed
//   polarity        - affirmative term -> negated counterpart
//   true_false      - the two answer labels of true/false items
//
// The tables are built once (see infra::tables_store), checked
// with validate(), then shared behind an Arc. Nothing writes to
// them afterwards.
//
// Reference: Rust Book §8 (Collections), §9 (Error Handling)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// A canonical label plus its interchangeable terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub label: String,
    pub synonyms: Vec<String>,
}

impl EntityGroup {
    /// Label first, then synonyms, in table order.
    /// This is also the scan order when looking for a match.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.label.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }

    /// Every member that could replace `term`
    pub fn alternatives<'a>(&'a self, term: &'a str) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        for m in self.members() {
            if m != term && !out.contains(&m) {
                out.push(m);
            }
        }
        out
    }
}

/// How a number inside a band gets perturbed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BandRule {
    /// Uniform integer in [max(floor, n - spread), n + spread]
    Jitter { spread: u64, floor: u64 },
    /// round(n * m) with m uniform in [min, max]
    Scale { min: f64, max: f64 },
}

/// One magnitude class. `below` is the exclusive upper bound;
/// the last band is open-ended (`None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericBand {
    pub below: Option<u64>,
    pub rule: BandRule,
}

impl NumericBand {
    pub fn contains(&self, n: u64) -> bool {
        self.below.map_or(true, |b| n < b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarityPair {
    pub term: String,
    pub inverse: String,
}

/// The two answer labels of a true/false question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrueFalseLabels {
    pub affirmative: String,
    pub negative: String,
}

impl TrueFalseLabels {
    /// Affirmative becomes negative; any other answer becomes affirmative.
    pub fn flip(&self, answer: &str) -> String {
        if answer == self.affirmative {
            self.negative.clone()
        } else {
            self.affirmative.clone()
        }
    }
}

/// All knowledge tables, immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainTables {
    pub entity_groups: Vec<EntityGroup>,
    pub scenarios: Vec<String>,
    pub scenario_delimiter: String,
    /// Sub-terms shorter than this (in characters) never match
    pub min_scenario_term_chars: usize,
    pub numeric_bands: Vec<NumericBand>,
    pub polarity: Vec<PolarityPair>,
    pub true_false: TrueFalseLabels,
}

impl DomainTables {
    /// The band that classifies `n`: the first whose bound exceeds it
    pub fn band_for(&self, n: u64) -> Option<&NumericBand> {
        self.numeric_bands.iter().find(|b| b.contains(n))
    }

    /// Sub-terms of the scenario at `idx`, in catalog order
    pub fn scenario_terms(&self, idx: usize) -> Vec<&str> {
        match self.scenarios.get(idx) {
            Some(s) => s
                .split(self.scenario_delimiter.as_str())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first sub-term, used as the replacement text
    pub fn primary_term(&self, idx: usize) -> Option<&str> {
        self.scenario_terms(idx).into_iter().next()
    }

    /// Whether a sub-term is long enough to take part in matching
    pub fn is_eligible_scenario_term(&self, term: &str) -> bool {
        term.chars().count() >= self.min_scenario_term_chars
    }

    /// Check the structural rules every strategy relies on.
    pub fn validate(&self) -> Result<()> {
        if self.entity_groups.is_empty() {
            bail!("entity_groups must not be empty");
        }
        for g in &self.entity_groups {
            if g.members().any(str::is_empty) {
                bail!("entity group '{}' contains an empty term", g.label);
            }
            if g.alternatives(&g.label).is_empty() {
                bail!("entity group '{}' needs at least two distinct terms", g.label);
            }
        }

        if self.scenario_delimiter.is_empty() {
            bail!("scenario_delimiter must not be empty");
        }
        if self.scenarios.len() < 2 {
            bail!("scenario catalog needs at least two scenarios, found {}", self.scenarios.len());
        }
        for (i, s) in self.scenarios.iter().enumerate() {
            if self.primary_term(i).is_none() {
                bail!("scenario #{} ('{}') has no primary term", i, s);
            }
        }

        if self.numeric_bands.is_empty() {
            bail!("numeric_bands must not be empty");
        }
        let last = self.numeric_bands.len() - 1;
        let mut prev_bound: Option<u64> = None;
        for (i, band) in self.numeric_bands.iter().enumerate() {
            match (band.below, i == last) {
                (None, false) => bail!("only the last numeric band may be open-ended"),
                (Some(_), true) => bail!("the last numeric band must be open-ended"),
                (Some(b), false) => {
                    if prev_bound.is_some_and(|p| b <= p) {
                        bail!("numeric band bounds must increase (found {} after {:?})", b, prev_bound);
                    }
                    prev_bound = Some(b);
                }
                (None, true) => {}
            }
            match band.rule {
                BandRule::Jitter { spread, .. } if spread == 0 => {
                    bail!("numeric band #{} has a zero jitter spread", i);
                }
                BandRule::Scale { min, max }
                    if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) =>
                {
                    bail!("numeric band #{} has an invalid scale range [{}, {}]", i, min, max);
                }
                _ => {}
            }
        }

        for p in &self.polarity {
            if p.term.is_empty() || p.term == p.inverse {
                bail!("polarity pair '{}' -> '{}' is not an inversion", p.term, p.inverse);
            }
        }

        let tf = &self.true_false;
        if tf.affirmative.is_empty() || tf.negative.is_empty() || tf.affirmative == tf.negative {
            bail!("true_false labels must be two distinct, non-empty strings");
        }

        Ok(())
    }
}
