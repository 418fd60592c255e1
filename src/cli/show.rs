use anyhow::Result;
use std::time::Duration;

use crate::api;
use crate::config::Config;
use crate::data::free_models_sorted;
use crate::enrichments::Enrichments;
use crate::render;

/// Prints the full card for one free model, looked up by id.
pub fn model(config: &Config, model_id: &str, json: bool) -> Result<()> {
    let records = api::fetch_models(
        &config.api.url,
        Duration::from_secs(config.api.timeout_seconds),
    )?;
    let free = free_models_sorted(records);

    let record = free
        .iter()
        .find(|m| m.id.as_deref() == Some(model_id))
        .ok_or_else(|| anyhow::anyhow!("Free model '{}' not found", model_id))?;

    let enrichments = Enrichments::builtin();
    let card = render::build_card(record, &enrichments);

    if json {
        println!("{}", serde_json::to_string_pretty(&card)?);
        return Ok(());
    }

    println!("{} {}  {}", card.provider_logo, card.provider_label, card.difficulty.label());
    println!();
    println!("{}", card.display_name);
    println!("{}", card.id_line);
    println!("{}", card.context_line);
    println!();
    println!("Use cases ({}):", card.category);
    for use_case in &card.use_cases {
        println!("  {}", use_case);
    }
    println!();
    println!("Try it: {}", card.link);

    Ok(())
}
