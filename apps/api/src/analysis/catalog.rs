//! Section catalog and weight table.
//!
//! The catalog decides which heading lines open which section; the weight table
//! decides how strongly a keyword found in that section counts. Both are built
//! once at startup, validated against each other, and injected into the
//! segmenter and weighter.

use std::collections::HashMap;

use crate::errors::AnalysisError;

/// Key of the implicit leading section every document starts in.
pub const HEADER_SECTION: &str = "header";

/// One synonym group. The first synonym is the canonical section name.
#[derive(Debug, Clone)]
pub struct SectionGroup {
    synonyms: Vec<String>,
}

impl SectionGroup {
    pub fn canonical(&self) -> &str {
        &self.synonyms[0]
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    /// True if the lowercased line contains any synonym of this group.
    pub fn matches(&self, line_lower: &str) -> bool {
        self.synonyms.iter().any(|s| line_lower.contains(s.as_str()))
    }
}

/// Ordered list of synonym groups, scanned in order when matching headings.
#[derive(Debug, Clone)]
pub struct SectionCatalog {
    groups: Vec<SectionGroup>,
}

impl SectionCatalog {
    pub fn new<I, G, S>(groups: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut built: Vec<SectionGroup> = Vec::new();
        for group in groups {
            let synonyms: Vec<String> = group
                .into_iter()
                .map(|s| Into::<String>::into(s).trim().to_lowercase())
                .collect();
            if synonyms.is_empty() || synonyms.iter().any(|s| s.is_empty()) {
                return Err(AnalysisError::Configuration(
                    "section synonym groups must be non-empty and contain no blank synonyms"
                        .to_string(),
                ));
            }
            if synonyms[0] == HEADER_SECTION {
                return Err(AnalysisError::Configuration(format!(
                    "'{HEADER_SECTION}' is reserved and cannot be a catalog section"
                )));
            }
            if built
                .iter()
                .any(|g| g.canonical() == synonyms[0])
            {
                return Err(AnalysisError::Configuration(format!(
                    "duplicate canonical section '{}'",
                    synonyms[0]
                )));
            }
            built.push(SectionGroup { synonyms });
        }
        Ok(Self { groups: built })
    }

    pub fn groups(&self) -> &[SectionGroup] {
        &self.groups
    }

    /// First group (in catalog order) whose synonyms appear in `line` and whose
    /// canonical name `is_open` does not report as already used.
    pub fn match_heading(&self, line: &str, is_open: impl Fn(&str) -> bool) -> Option<&str> {
        let lower = line.to_lowercase();
        self.groups
            .iter()
            .find(|g| !is_open(g.canonical()) && g.matches(&lower))
            .map(SectionGroup::canonical)
    }
}

/// Canonical section name → positive weight.
#[derive(Debug, Clone)]
pub struct SectionWeightTable {
    weights: HashMap<String, f64>,
}

impl SectionWeightTable {
    pub fn new<I, S>(weights: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (name, weight) in weights {
            let name: String = name.into();
            if !(weight > 0.0 && weight.is_finite()) {
                return Err(AnalysisError::Configuration(format!(
                    "section '{name}' has non-positive weight {weight}"
                )));
            }
            map.insert(name, weight);
        }
        Ok(Self { weights: map })
    }

    pub fn weight(&self, section: &str) -> Option<f64> {
        self.weights.get(section).copied()
    }

    /// Like [`weight`](Self::weight) but a missing entry is a configuration error.
    pub fn require(&self, section: &str) -> Result<f64, AnalysisError> {
        self.weight(section).ok_or_else(|| {
            AnalysisError::Configuration(format!("section '{section}' has no weight"))
        })
    }
}

/// Catalog and weight table, checked to agree with each other.
#[derive(Debug, Clone)]
pub struct SectionConfig {
    pub catalog: SectionCatalog,
    pub weights: SectionWeightTable,
}

impl SectionConfig {
    /// Fails if the header or any canonical catalog section lacks a weight.
    pub fn new(
        catalog: SectionCatalog,
        weights: SectionWeightTable,
    ) -> Result<Self, AnalysisError> {
        weights.require(HEADER_SECTION)?;
        for group in catalog.groups() {
            weights.require(group.canonical())?;
        }
        Ok(Self { catalog, weights })
    }

    pub fn builtin() -> Result<Self, AnalysisError> {
        let catalog = SectionCatalog::new([
            vec!["about", "profile", "introduction", "summary", "objective"],
            vec![
                "qualification",
                "skill",
                "certification",
                "competenc",
                "expertise",
                "technologies",
            ],
            vec![
                "experience",
                "employment",
                "work history",
                "career",
                "professional background",
            ],
            vec!["education", "academic", "degree", "university", "coursework"],
        ])?;
        let weights = SectionWeightTable::new([
            (HEADER_SECTION, 1.0),
            ("about", 2.0),
            ("qualification", 4.0),
            ("experience", 4.0),
            ("education", 1.0),
        ])?;
        Self::new(catalog, weights)
    }
}
