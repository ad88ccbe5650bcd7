use serde::{Deserialize, Serialize};

/// Categorical severity of the health risk attached to a canonical record.
///
/// Lexicon files occasionally carry levels outside the known set; those
/// deserialize to `Unknown` rather than failing the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardLevel {
    High,
    Medium,
    Low,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Classified level for one environmental attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    High,
    Moderate,
    Low,
    Variable,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ImpactLevel {
    /// Classifies free text like "Moderate (toxic to fish)" by
    /// case-insensitive substring, first match winning in the order
    /// high > moderate > low > variable > unknown.
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        for (needle, level) in [
            ("high", Self::High),
            ("moderate", Self::Moderate),
            ("low", Self::Low),
            ("variable", Self::Variable),
            ("unknown", Self::Unknown),
        ] {
            if lowered.contains(needle) {
                return level;
            }
        }
        Self::Unknown
    }
}

/// Raw environmental notes as they appear in the lexicon. Each field is
/// free text ("High (many fragrance compounds toxic to aquatic life)")
/// and is classified on demand via [`ImpactProfile::classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    #[serde(default)]
    pub persistence: String,
    #[serde(default)]
    pub aquatic_toxicity: String,
    #[serde(default)]
    pub bioaccumulation: String,
}

/// The three environmental attributes reduced to categorical levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactProfile {
    pub persistence: ImpactLevel,
    pub aquatic_toxicity: ImpactLevel,
    pub bioaccumulation: ImpactLevel,
}

impl ImpactProfile {
    pub fn classify(raw: &EnvironmentalImpact) -> Self {
        Self {
            persistence: ImpactLevel::classify(&raw.persistence),
            aquatic_toxicity: ImpactLevel::classify(&raw.aquatic_toxicity),
            bioaccumulation: ImpactLevel::classify(&raw.bioaccumulation),
        }
    }

    pub fn any_high(&self) -> bool {
        [self.persistence, self.aquatic_toxicity, self.bioaccumulation]
            .contains(&ImpactLevel::High)
    }
}

/// Canonical hazard entry. One record per ingredient identity; aliases in
/// the alias index fan in to these by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cas: Vec<String>,
    #[serde(default)]
    pub hazard_level: HazardLevel,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default, rename = "regulatory_CA")]
    pub regulatory_ca: String,
    #[serde(default, rename = "regulatory_EU")]
    pub regulatory_eu: String,
    #[serde(default)]
    pub prop65: bool,
    #[serde(default)]
    pub source_regulatory: String,
    #[serde(default)]
    pub source_scientific: String,
    #[serde(default)]
    pub source_consumer: String,
    #[serde(default)]
    pub environmental_impact: EnvironmentalImpact,
}
