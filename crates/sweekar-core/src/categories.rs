//! Category profiles: which keywords to search for and which place types
//! count as a match for each support-resource category.
//!
//! The built-in table is constructed once at start-up and never mutated
//! afterwards. A YAML file can add categories or replace built-in ones before
//! the table is handed to the discovery pipeline.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Keyword used when a category is unknown.
pub const FALLBACK_KEYWORD: &str = "women health services";

/// Search keywords and acceptable place types for one category.
///
/// An empty `acceptable_types` list disables type filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub acceptable_types: Vec<String>,
}

impl CategoryProfile {
    fn from_static(keywords: &[&str], types: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            acceptable_types: types.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// The generic profile returned for unknown categories.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            keywords: vec![FALLBACK_KEYWORD.to_string()],
            acceptable_types: Vec::new(),
        }
    }

    /// `true` when `types` satisfies this profile's type constraint.
    #[must_use]
    pub fn accepts_types<S: AsRef<str>>(&self, types: &[S]) -> bool {
        self.acceptable_types.is_empty()
            || types
                .iter()
                .any(|t| self.acceptable_types.iter().any(|a| a == t.as_ref()))
    }
}

#[derive(Debug, Deserialize)]
struct CategoryFile {
    categories: HashMap<String, CategoryProfile>,
}

/// Immutable lookup table from category key to [`CategoryProfile`].
#[derive(Debug, Clone)]
pub struct CategoryTable {
    profiles: HashMap<String, CategoryProfile>,
}

impl CategoryTable {
    /// The table shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let profiles = BUILTIN
            .iter()
            .map(|(key, keywords, types)| {
                ((*key).to_string(), CategoryProfile::from_static(keywords, types))
            })
            .collect();
        Self { profiles }
    }

    /// Built-in table with entries from a YAML file layered on top.
    ///
    /// The file holds a single `categories` map keyed by category. Entries
    /// replace built-in profiles with the same (lower-cased) key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CategoryFile`] if the file cannot be read,
    /// does not parse, or names a category without keywords.
    pub fn builtin_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoryFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::builtin().merge_yaml(path, &raw)
    }

    fn merge_yaml(mut self, path: &Path, raw: &str) -> Result<Self, ConfigError> {
        let rejected = |reason: String| ConfigError::CategoryFile {
            path: path.display().to_string(),
            reason,
        };
        let file: CategoryFile = serde_yaml::from_str(raw).map_err(|e| rejected(e.to_string()))?;
        for (key, profile) in file.categories {
            if profile.keywords.is_empty() {
                return Err(rejected(format!("category '{key}' has no keywords")));
            }
            self.profiles.insert(key.to_lowercase(), profile);
        }
        Ok(self)
    }

    /// Looks up a category, falling back to [`CategoryProfile::fallback`]
    /// when the key is missing or unknown. Keys are case-insensitive.
    #[must_use]
    pub fn lookup(&self, key: Option<&str>) -> CategoryProfile {
        key.and_then(|k| self.profiles.get(&k.trim().to_lowercase()))
            .cloned()
            .unwrap_or_else(CategoryProfile::fallback)
    }

    /// `true` if `key` names a category in the table.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(&key.trim().to_lowercase())
    }

    /// All category keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

type StaticProfile = (&'static str, &'static [&'static str], &'static [&'static str]);

const HEALTH_TYPES: &[&str] = &["hospital", "health", "doctor", "clinic"];
const MENTAL_HEALTH_TYPES: &[&str] = &["health", "doctor", "hospital", "physiotherapist"];
const LEGAL_TYPES: &[&str] = &["lawyer", "local_government_office"];
const EDUCATION_TYPES: &[&str] = &["school", "university"];
const WELLNESS_TYPES: &[&str] = &["gym", "spa", "health"];
const ESTABLISHMENT: &[&str] = &["establishment"];

const BUILTIN: &[StaticProfile] = &[
    (
        "healthcare",
        &[
            "women's health services",
            "gynecology clinics",
            "obstetrics care",
            "reproductive health",
            "breast health screening",
            "prenatal care",
            "family planning services",
        ],
        HEALTH_TYPES,
    ),
    (
        "mentalhealth",
        &[
            "mental health resources",
            "mental wellness",
            "emotional well-being",
            "psychological support",
            "behavioral health services",
            "depression support",
            "therapy services",
            "counseling centers",
            "group therapy",
            "self-help programs",
        ],
        MENTAL_HEALTH_TYPES,
    ),
    (
        "legal",
        &[
            "legal aid for women",
            "family law assistance",
            "domestic violence legal help",
            "women rights advocacy",
            "child custody legal aid",
            "sexual harassment legal resources",
            "legal counseling for women",
        ],
        LEGAL_TYPES,
    ),
    (
        "safety",
        &[
            "domestic violence shelters",
            "police stations",
            "she teams",
            "women crisis centers",
            "safety planning for women",
            "self-defense classes",
            "stalking support services",
            "intimate partner violence resources",
        ],
        &["police", "fire_station"],
    ),
    (
        "childcare",
        &[
            "affordable daycare",
            "single mother childcare assistance",
            "early childhood education",
            "after-school programs",
            "nanny services",
            "childcare providers",
        ],
        &["school", "day_care", "establishment"],
    ),
    (
        "education",
        &[
            "women education programs",
            "scholarships for women",
            "STEM programs for girls",
            "adult education for women",
            "women vocational training",
            "career training for women",
        ],
        EDUCATION_TYPES,
    ),
    (
        "career",
        &[
            "job search assistance for women",
            "career counseling for women",
            "networking events for women",
            "career advancement",
            "entrepreneurship for women",
        ],
        &["university", "establishment"],
    ),
    (
        "financial",
        &[
            "financial planning for women",
            "women investment groups",
            "retirement planning for women",
            "grants for women",
            "microloans for women entrepreneurs",
        ],
        &["bank", "finance"],
    ),
    (
        "leadership",
        &[
            "female leadership development",
            "women in leadership conferences",
            "mentorship programs for women",
            "leadership coaching for women",
            "public speaking for women",
        ],
        ESTABLISHMENT,
    ),
    (
        "wellness",
        &[
            "fitness classes for women",
            "nutrition advice for women",
            "yoga classes for women",
            "women health retreats",
            "mindfulness for women",
            "stress reduction techniques",
        ],
        WELLNESS_TYPES,
    ),
    (
        "supportgroups",
        &[
            "support groups for women",
            "community support",
            "group therapy for women",
        ],
        ESTABLISHMENT,
    ),
    (
        "lgbtq_healthcare",
        &[
            "LGBTQIA+ friendly clinics",
            "LGBTQ health centers",
            "transgender health services",
        ],
        HEALTH_TYPES,
    ),
    (
        "lgbtq_mentalhealth",
        &[
            "LGBTQIA+ counseling",
            "LGBTQ therapy services",
            "queer mental health support",
        ],
        MENTAL_HEALTH_TYPES,
    ),
    (
        "lgbtq_legalaid",
        &[
            "LGBTQIA+ legal aid",
            "LGBTQ rights organizations",
            "gender identity legal services",
        ],
        LEGAL_TYPES,
    ),
    (
        "lgbtq_supportgroups",
        &[
            "LGBTQIA+ support groups",
            "queer community centers",
            "LGBTQ peer support",
        ],
        ESTABLISHMENT,
    ),
    (
        "lgbtq_education",
        &[
            "LGBTQIA+ education programs",
            "queer studies programs",
            "LGBTQ scholarships",
        ],
        EDUCATION_TYPES,
    ),
    (
        "lgbtq_career",
        &[
            "LGBTQIA+ job support",
            "queer professional networks",
            "LGBTQ friendly employers",
        ],
        ESTABLISHMENT,
    ),
    (
        "lgbtq_safety",
        &[
            "LGBTQIA+ safe spaces",
            "anti-violence projects",
            "hate crime support services",
        ],
        &["police", "establishment"],
    ),
    (
        "lgbtq_leadership",
        &[
            "LGBTQIA+ leadership programs",
            "queer leadership conferences",
        ],
        ESTABLISHMENT,
    ),
    (
        "lgbtq_wellness",
        &[
            "LGBTQIA+ wellness programs",
            "queer fitness groups",
            "LGBTQ yoga classes",
        ],
        WELLNESS_TYPES,
    ),
];

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
