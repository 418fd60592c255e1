use crate::data::ModelRecord;
use crate::enrichments::{Enrichments, ProviderBadge};

const MODEL_PAGE_URL: &str = "https://openrouter.ai/models";
const PLAYGROUND_URL: &str = "https://openrouter.ai/playground";

/// Tokens a rough "page" of text is worth, for the context explainer.
const TOKENS_PER_PAGE: u64 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Power,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "🟢 Beginner Friendly",
            Difficulty::Intermediate => "🟡 Intermediate",
            Difficulty::Power => "🔴 Power User",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Power => "power",
        }
    }
}

/// Tier thresholds are inclusive on the low side.
pub fn assign_difficulty(context_length: Option<u64>) -> Difficulty {
    let tokens = context_length.unwrap_or(0);
    if tokens <= 32_000 {
        Difficulty::Beginner
    } else if tokens <= 128_000 {
        Difficulty::Intermediate
    } else {
        Difficulty::Power
    }
}

/// Explains a context window in plain terms: grouped token count plus a
/// book-pages estimate (never below one page).
pub fn format_context_window(context_length: Option<u64>) -> String {
    let tokens = match context_length {
        Some(t) if t > 0 => t,
        _ => return "Context window unavailable".to_string(),
    };

    let pages = ((tokens as f64 / TOKENS_PER_PAGE as f64).round() as u64).max(1);
    format!(
        "{} tokens · Can read about a {}-page book at once",
        group_thousands(tokens),
        pages
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Derives a readable name from a model id: the segment after the last `/`,
/// split on `-`/`_`/`:`, each piece capitalized.
pub fn title_case_id(id: &str) -> String {
    id.rsplit('/')
        .next()
        .unwrap_or("")
        .split(['-', '_', ':'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonical model page when an id exists, otherwise a playground link
/// keyed by the encoded name.
pub fn model_link(model: &ModelRecord) -> String {
    match model.id.as_deref() {
        Some(id) if !id.is_empty() => format!("{}/{}", MODEL_PAGE_URL, id),
        _ => format!(
            "{}?model={}",
            PLAYGROUND_URL,
            urlencoding::encode(model.name.as_deref().unwrap_or(""))
        ),
    }
}

/// First provider keyword found in `id + " " + name` wins; unrecognized
/// models get the Community badge.
pub fn provider_badge(model: &ModelRecord, enrichments: &Enrichments) -> ProviderBadge {
    let source = format!(
        "{} {}",
        model.id.as_deref().unwrap_or(""),
        model.name.as_deref().unwrap_or("")
    )
    .to_lowercase();

    enrichments
        .providers
        .iter()
        .find(|(keyword, _)| source.contains(keyword.as_str()))
        .map(|(_, badge)| badge.clone())
        .unwrap_or_else(ProviderBadge::community)
}
