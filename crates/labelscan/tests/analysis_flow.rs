use labelscan::analysis::{analyze, AnalysisInput, AnalysisResult};
use labelscan::lexicon::{HazardLevel, ImpactLevel, LexiconStore};
use std::io::Write;

fn sample_lexicon_json() -> (&'static str, &'static str) {
    let aliases = r#"{
        "retinyl palmitate": "ing_retinyl_palmitate",
        "retinol palmitate": "ing_retinyl_palmitate",
        "parabens": "ing_parabens",
        "methylparaben": "ing_parabens",
        "fragrance": "ing_fragrance",
        "parfum": "ing_fragrance"
    }"#;
    let hazards = r#"[
        {
            "id": "ing_retinyl_palmitate",
            "name": "Retinyl Palmitate (Vitamin A Palmitate)",
            "cas": ["79-81-2"],
            "hazard_level": "High",
            "recommendation": "Avoid in daytime leave-on products",
            "categories": ["photosensitizer"],
            "reasons": ["Photocarcinogenicity concern in sunlight"],
            "regulatory_CA": "allowed",
            "regulatory_EU": "restricted (SCCS limits)",
            "prop65": true,
            "source_regulatory": "EU SCCS opinion on Vitamin A",
            "source_scientific": "NTP photocarcinogenicity study",
            "source_consumer": "EWG Skin Deep",
            "environmental_impact": {
                "persistence": "Low",
                "aquatic_toxicity": "Moderate",
                "bioaccumulation": "Unknown"
            }
        },
        {
            "id": "ing_parabens",
            "name": "Parabens (Methyl-, Ethyl-, Propyl-, Butyl-)",
            "cas": ["99-76-3", "120-47-8"],
            "hazard_level": "High",
            "recommendation": "Restricted",
            "categories": ["endocrine_disruptor", "preservative"],
            "reasons": ["Endocrine activity; restrictions in certain regions"],
            "regulatory_CA": "restricted",
            "regulatory_EU": "restricted",
            "prop65": false,
            "source_regulatory": "Health Canada Hotlist; EU SCCS opinions",
            "source_scientific": "SCCS opinions on parabens",
            "source_consumer": "EWG Skin Deep",
            "environmental_impact": {
                "persistence": "Moderate (partially biodegradable)",
                "aquatic_toxicity": "Moderate (toxic to algae/fish at higher concentrations)",
                "bioaccumulation": "Low"
            }
        },
        {
            "id": "ing_fragrance",
            "name": "Fragrance / Parfum (allergens)",
            "cas": [],
            "hazard_level": "Medium",
            "recommendation": "Restricted",
            "categories": ["allergen", "sensitizer", "mixture"],
            "reasons": ["Undisclosed mixture; EU allergen labeling list"],
            "regulatory_CA": "allowed (labeling)",
            "regulatory_EU": "restricted (Annex III allergens)",
            "prop65": false,
            "source_regulatory": "EU Annex III Fragrance allergens; IFRA",
            "source_scientific": "SCCS fragrance allergen opinions",
            "source_consumer": "EWG Skin Deep",
            "environmental_impact": {
                "persistence": "Variable (depends on components)",
                "aquatic_toxicity": "High (many fragrance compounds toxic to aquatic life)",
                "bioaccumulation": "Moderate"
            }
        }
    ]"#;
    (aliases, hazards)
}

fn sample_store() -> LexiconStore {
    let (aliases, hazards) = sample_lexicon_json();
    LexiconStore::from_readers(aliases.as_bytes(), hazards.as_bytes()).expect("lexicon loads")
}

#[test]
fn store_loads_from_files_on_disk() {
    let (aliases, hazards) = sample_lexicon_json();
    let dir = tempfile::tempdir().expect("temp dir");
    let alias_path = dir.path().join("alias_index.json");
    let hazard_path = dir.path().join("hazards.json");
    std::fs::File::create(&alias_path)
        .and_then(|mut f| f.write_all(aliases.as_bytes()))
        .expect("write aliases");
    std::fs::File::create(&hazard_path)
        .and_then(|mut f| f.write_all(hazards.as_bytes()))
        .expect("write hazards");

    let store = LexiconStore::load(&alias_path, &hazard_path).expect("store loads");
    assert_eq!(store.record_count(), 3);
    assert_eq!(store.alias_count(), 6);
}

#[test]
fn exact_hit_plus_unresolved_token_scores_the_resolved_set() {
    let store = sample_store();
    let input = AnalysisInput::IngredientList(vec![
        "Retinyl Palmitate".to_string(),
        "Water".to_string(),
    ]);
    let result = analyze(&store, &input);

    assert_eq!(result.analysis.len(), 1);
    let item = &result.analysis[0];
    assert_eq!(item.id, "ing_retinyl_palmitate");
    assert_eq!(item.matched_alias.as_deref(), Some("retinyl palmitate"));
    assert_eq!(item.confidence, 0.99);
    assert_eq!(item.hazard_level, HazardLevel::High);
    assert!(item.prop65);
    assert_eq!(item.environmental_impact.persistence, ImpactLevel::Low);

    let health = result.summary.health;
    assert_eq!((health.high, health.medium, health.low, health.total), (1, 0, 0, 1));
    // weight 1.0 + 0.2 prop65 bump clamps to 1.0.
    assert_eq!(result.summary.health_score, 100);
}

#[test]
fn repeated_ingredient_in_free_text_dedupes_to_one_entry() {
    let store = sample_store();
    let input = AnalysisInput::FreeText("Parabens, Fragrance, Parabens".to_string());
    let result = analyze(&store, &input);

    let paraben_entries = result
        .analysis
        .iter()
        .filter(|item| item.id == "ing_parabens")
        .count();
    assert_eq!(paraben_entries, 1);
    assert_eq!(result.analysis.len(), 2);
    assert_eq!(result.summary.health.total, 2);
}

#[test]
fn fuzzy_spelling_variant_resolves_with_its_similarity() {
    let store = sample_store();
    // Not an alias, but a token-set reordering of one.
    let input = AnalysisInput::FreeText("palmitate retinyl".to_string());
    let result = analyze(&store, &input);

    assert_eq!(result.analysis.len(), 1);
    let item = &result.analysis[0];
    assert_eq!(item.id, "ing_retinyl_palmitate");
    assert_eq!(item.matched_alias.as_deref(), Some("retinyl palmitate"));
    assert_eq!(item.confidence, 1.0);
}

#[test]
fn environment_summary_tallies_classified_levels() {
    let store = sample_store();
    let input = AnalysisInput::FreeText("Parabens; Fragrance".to_string());
    let result = analyze(&store, &input);

    let env = result.summary.environment;
    assert_eq!(env.persistence.moderate, 1);
    assert_eq!(env.persistence.variable, 1);
    assert_eq!(env.aquatic_toxicity.moderate, 1);
    assert_eq!(env.aquatic_toxicity.high, 1);
    assert_eq!(env.bioaccumulation.low, 1);
    assert_eq!(env.bioaccumulation.moderate, 1);
    assert_eq!(env.ingredients_with_any_high_env_flag, 1);

    // Parabens: (0.6 + 0.6 + 0.2) / 3; fragrance: (0.6 + 1.0 + 0.6) / 3.
    // Mean 0.6 -> 60.
    assert_eq!(result.summary.environment_score, 60);
}

#[test]
fn analysis_result_round_trips_through_serde() {
    let store = sample_store();
    let input = AnalysisInput::FreeText("methylparaben, palmitate retinyl, parfum".to_string());
    let result = analyze(&store, &input);
    assert_eq!(result.analysis.len(), 3);

    let serialized = serde_json::to_string(&result).expect("serializes");
    let reparsed: AnalysisResult = serde_json::from_str(&serialized).expect("parses back");
    assert_eq!(reparsed, result);

    // The wire format keeps the uppercase regional suffixes.
    let value: serde_json::Value = serde_json::from_str(&serialized).expect("json value");
    assert!(value["analysis"][0].get("regulatory_CA").is_some());
    assert!(value["summary"].get("health_score").is_some());
}
