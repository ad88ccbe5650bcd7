use super::report::AnalysisItem;
use crate::lexicon::{HazardLevel, ImpactLevel};

const ENDOCRINE_BUMP: f64 = 0.15;
const PROP65_BUMP: f64 = 0.2;

const fn health_weight(level: HazardLevel) -> f64 {
    match level {
        HazardLevel::High => 1.0,
        HazardLevel::Medium => 0.6,
        HazardLevel::Low | HazardLevel::Unknown => 0.3,
    }
}

const fn environment_weight(level: ImpactLevel) -> f64 {
    match level {
        ImpactLevel::High => 1.0,
        ImpactLevel::Moderate | ImpactLevel::Variable => 0.6,
        ImpactLevel::Low => 0.2,
        ImpactLevel::Unknown => 0.5,
    }
}

/// Composite 0-100 health risk: per item, the hazard-level weight plus
/// bumps for endocrine-tagged categories and Prop 65 listing, clamped to
/// [0, 1]; then the mean across items scaled to 100.
pub fn health_score(items: &[AnalysisItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let sum: f64 = items
        .iter()
        .map(|item| {
            let mut risk = health_weight(item.hazard_level);
            if item
                .categories
                .iter()
                .any(|category| category.to_lowercase().contains("endocrine"))
            {
                risk += ENDOCRINE_BUMP;
            }
            if item.prop65 {
                risk += PROP65_BUMP;
            }
            risk.clamp(0.0, 1.0)
        })
        .sum();
    ((sum / items.len() as f64) * 100.0).round() as u8
}

/// Composite 0-100 environmental risk: each item averages the weights of
/// its three classified attributes (Unknown contributes 0.5 even though
/// it is absent from the summary tallies), then the mean across items is
/// scaled to 100.
pub fn environment_score(items: &[AnalysisItem]) -> u8 {
    if items.is_empty() {
        return 0;
    }
    let sum: f64 = items
        .iter()
        .map(|item| {
            let profile = item.environmental_impact;
            (environment_weight(profile.persistence)
                + environment_weight(profile.aquatic_toxicity)
                + environment_weight(profile.bioaccumulation))
                / 3.0
        })
        .sum();
    ((sum / items.len() as f64) * 100.0).round() as u8
}
