//! Table-name singularization for foreign key matching.
//!
//! The default strategy strips a single trailing `s`, which is what existing
//! saved schemas were inferred with (`customers` → `customer`, but also
//! `categories` → `categorie`). The `inflector` strategy handles irregular and
//! `-ies`/`-es` plurals and is opt-in through settings.

use inflector::Inflector;
use serde::{Deserialize, Serialize};

/// Known irregular plurals that inflector doesn't handle well for table names.
static IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("diagnosis", "diagnoses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

/// How table names are reduced to their singular form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Singularization {
    /// Strip one trailing `s`.
    #[default]
    Naive,
    /// Irregular table first, then the `inflector` crate.
    Inflector,
}

impl Singularization {
    pub fn singularize(&self, word: &str) -> String {
        match self {
            Singularization::Naive => strip_trailing_s(word).to_string(),
            Singularization::Inflector => singularize(word),
        }
    }
}

/// Remove a single trailing `s`, if present.
pub fn strip_trailing_s(word: &str) -> &str {
    word.strip_suffix('s').unwrap_or(word)
}

/// Singularize a word, handling irregulars first then falling back to inflector.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();

    for (singular, plural) in IRREGULAR_PLURALS {
        if lower == *plural || lower == *singular {
            return singular.to_string();
        }
    }

    word.to_singular()
}
