use super::resolver::ResolvedMatch;
use super::score;
use crate::lexicon::{HazardLevel, ImpactLevel, ImpactProfile};
use serde::{Deserialize, Serialize};

/// One resolved, deduplicated ingredient in the analysis output. Record
/// fields are copied through so the result stands alone once the request
/// completes; `environmental_impact` carries the classified levels, not
/// the lexicon's raw notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisItem {
    pub query: String,
    pub matched_alias: Option<String>,
    pub id: String,
    pub name: String,
    pub cas: Vec<String>,
    pub hazard_level: HazardLevel,
    pub recommendation: String,
    pub categories: Vec<String>,
    pub reasons: Vec<String>,
    #[serde(rename = "regulatory_CA")]
    pub regulatory_ca: String,
    #[serde(rename = "regulatory_EU")]
    pub regulatory_eu: String,
    pub prop65: bool,
    pub source_regulatory: String,
    pub source_scientific: String,
    pub source_consumer: String,
    pub confidence: f64,
    pub environmental_impact: ImpactProfile,
}

impl AnalysisItem {
    pub(crate) fn from_match(query: &str, matched: ResolvedMatch<'_>) -> Self {
        let record = matched.record;
        Self {
            query: query.to_string(),
            matched_alias: Some(matched.matched_alias),
            id: record.id.clone(),
            name: record.name.clone(),
            cas: record.cas.clone(),
            hazard_level: record.hazard_level,
            recommendation: record.recommendation.clone(),
            categories: record.categories.clone(),
            reasons: record.reasons.clone(),
            regulatory_ca: record.regulatory_ca.clone(),
            regulatory_eu: record.regulatory_eu.clone(),
            prop65: record.prop65,
            source_regulatory: record.source_regulatory.clone(),
            source_scientific: record.source_scientific.clone(),
            source_consumer: record.source_consumer.clone(),
            confidence: round_confidence(matched.confidence),
            environmental_impact: ImpactProfile::classify(&record.environmental_impact),
        }
    }
}

/// Hazard-level counts over the analysis items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

/// Per-attribute level tally. Unknown classifications are deliberately
/// absent here; they still weigh into the environment score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTally {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub variable: usize,
}

impl LevelTally {
    fn record(&mut self, level: ImpactLevel) {
        match level {
            ImpactLevel::High => self.high += 1,
            ImpactLevel::Moderate => self.moderate += 1,
            ImpactLevel::Low => self.low += 1,
            ImpactLevel::Variable => self.variable += 1,
            ImpactLevel::Unknown => {}
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCounts {
    pub persistence: LevelTally,
    pub aquatic_toxicity: LevelTally,
    pub bioaccumulation: LevelTally,
    pub ingredients_with_any_high_env_flag: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub health: HealthCounts,
    pub environment: EnvironmentCounts,
    pub health_score: u8,
    pub environment_score: u8,
}

/// The aggregate engine output: resolved items in first-occurrence order
/// of their canonical ids, plus the categorical and scored summary.
///
/// Output contract: unresolved tokens are dropped, so `analysis` holds
/// exactly one entry per distinct canonical id matched by the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis: Vec<AnalysisItem>,
    pub summary: AnalysisSummary,
}

pub(crate) fn summarize(items: &[AnalysisItem]) -> AnalysisSummary {
    let mut health = HealthCounts::default();
    let mut environment = EnvironmentCounts::default();

    for item in items {
        match item.hazard_level {
            HazardLevel::High => health.high += 1,
            HazardLevel::Medium => health.medium += 1,
            HazardLevel::Low => health.low += 1,
            HazardLevel::Unknown => {}
        }
        health.total += 1;

        let profile = item.environmental_impact;
        environment.persistence.record(profile.persistence);
        environment.aquatic_toxicity.record(profile.aquatic_toxicity);
        environment.bioaccumulation.record(profile.bioaccumulation);
        if profile.any_high() {
            environment.ingredients_with_any_high_env_flag += 1;
        }
    }

    AnalysisSummary {
        health,
        environment,
        health_score: score::health_score(items),
        environment_score: score::environment_score(items),
    }
}

fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(hazard_level: HazardLevel, profile: ImpactProfile) -> AnalysisItem {
        AnalysisItem {
            query: "q".to_string(),
            matched_alias: Some("q".to_string()),
            id: "ing_q".to_string(),
            name: "Q".to_string(),
            cas: vec![],
            hazard_level,
            recommendation: String::new(),
            categories: vec![],
            reasons: vec![],
            regulatory_ca: String::new(),
            regulatory_eu: String::new(),
            prop65: false,
            source_regulatory: String::new(),
            source_scientific: String::new(),
            source_consumer: String::new(),
            confidence: 0.99,
            environmental_impact: profile,
        }
    }

    #[test]
    fn summarize_counts_hazard_levels_and_total() {
        let items = vec![
            item(HazardLevel::High, ImpactProfile::default()),
            item(HazardLevel::Medium, ImpactProfile::default()),
            item(HazardLevel::Unknown, ImpactProfile::default()),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.health.high, 1);
        assert_eq!(summary.health.medium, 1);
        assert_eq!(summary.health.low, 0);
        // Unknown is not bucketed but still contributes to the total.
        assert_eq!(summary.health.total, 3);
    }

    #[test]
    fn summarize_excludes_unknown_from_environment_tallies() {
        let profile = ImpactProfile {
            persistence: ImpactLevel::High,
            aquatic_toxicity: ImpactLevel::Unknown,
            bioaccumulation: ImpactLevel::Variable,
        };
        let summary = summarize(&[item(HazardLevel::Low, profile)]);
        assert_eq!(summary.environment.persistence.high, 1);
        assert_eq!(summary.environment.bioaccumulation.variable, 1);
        let aquatic = summary.environment.aquatic_toxicity;
        assert_eq!(
            aquatic.high + aquatic.moderate + aquatic.low + aquatic.variable,
            0
        );
        assert_eq!(summary.environment.ingredients_with_any_high_env_flag, 1);
    }

    #[test]
    fn confidence_rounds_to_two_decimals() {
        assert_eq!(round_confidence(0.9411764705882353), 0.94);
        assert_eq!(round_confidence(0.866), 0.87);
        assert_eq!(round_confidence(0.99), 0.99);
    }
}
