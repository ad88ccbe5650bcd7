use clap::Args;
use labelscan::analysis::{analyze, AnalysisInput, InputError};
use labelscan::config::AppConfig;
use labelscan::error::AppError;
use labelscan::lexicon::LexiconStore;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Ingredient to check; repeat the flag for a full list
    #[arg(long = "ingredient")]
    pub(crate) ingredients: Vec<String>,
    /// Raw label text with ingredients separated by commas, semicolons,
    /// or line breaks
    #[arg(long, conflicts_with = "ingredients")]
    pub(crate) text: Option<String>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let input = if !args.ingredients.is_empty() {
        AnalysisInput::IngredientList(args.ingredients)
    } else if let Some(text) = args.text {
        AnalysisInput::FreeText(text)
    } else {
        return Err(InputError::Missing.into());
    };

    let config = AppConfig::load()?;
    let store = LexiconStore::load(&config.lexicon.alias_file, &config.lexicon.hazard_file)?;
    let result = analyze(&store, &input);
    println!(
        "{}",
        serde_json::to_string_pretty(&result).map_err(std::io::Error::other)?
    );
    Ok(())
}
