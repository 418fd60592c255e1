use serde::Serialize;

use crate::category::{choose_category, Category};
use crate::data::ModelRecord;
use crate::enrichments::Enrichments;
use crate::presentation::{
    assign_difficulty, format_context_window, model_link, provider_badge, title_case_id,
    Difficulty,
};

/// How many use-case prompts a card shows at most.
const MAX_USE_CASES: usize = 4;

/// Everything a frontend needs to draw one model card. Built fresh on each
/// render pass; the source records are never touched.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub display_name: String,
    pub id_line: String,
    pub provider_label: String,
    pub provider_logo: String,
    pub category: Category,
    #[serde(serialize_with = "serialize_difficulty")]
    pub difficulty: Difficulty,
    pub context_line: String,
    pub use_cases: Vec<String>,
    pub link: String,
}

fn serialize_difficulty<S: serde::Serializer>(
    difficulty: &Difficulty,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(difficulty.tag())
}

pub fn build_card(model: &ModelRecord, enrichments: &Enrichments) -> Card {
    let badge = provider_badge(model, enrichments);
    let category = choose_category(model);

    let display_name = model
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| {
            model
                .id
                .as_deref()
                .map(title_case_id)
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| "Unnamed Model".to_string());

    let id_line = model
        .id
        .clone()
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| "Unknown model id".to_string());

    let use_cases = enrichments
        .use_cases_for(category)
        .iter()
        .take(MAX_USE_CASES)
        .cloned()
        .collect();

    Card {
        display_name,
        id_line,
        provider_label: badge.label,
        provider_logo: badge.logo,
        category,
        difficulty: assign_difficulty(model.context_length),
        context_line: format_context_window(model.context_length),
        use_cases,
        link: model_link(model),
    }
}

/// One card per record, in input order. Sorting happened upstream; the
/// renderer never reorders.
pub fn build_cards(models: &[ModelRecord], enrichments: &Enrichments) -> Vec<Card> {
    models.iter().map(|m| build_card(m, enrichments)).collect()
}

pub fn status_line(count: usize) -> String {
    format!("Showing {} free models.", count)
}

pub fn empty_status() -> &'static str {
    "No models match this filter yet. Try another use case."
}

pub fn fetching_status() -> &'static str {
    "Fetching live models from OpenRouter..."
}

pub fn failure_status() -> &'static str {
    "Couldn't load live models right now. Please refresh in a moment."
}
