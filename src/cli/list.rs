use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use std::time::Duration;

use crate::api;
use crate::category::Category;
use crate::config::Config;
use crate::data::free_models_sorted;
use crate::render::{self, Card};

pub fn free_models(config: &Config, category: Option<Category>, json: bool) -> Result<()> {
    let records = api::fetch_models(
        &config.api.url,
        Duration::from_secs(config.api.timeout_seconds),
    )?;
    let free = free_models_sorted(records);

    let enrichments = crate::enrichments::Enrichments::builtin();
    let cards: Vec<Card> = render::build_cards(&free, &enrichments)
        .into_iter()
        .filter(|card| category.map_or(true, |c| card.category == c))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if cards.is_empty() {
        println!("{}", render::empty_status());
        return Ok(());
    }

    println!("{}", render::status_line(cards.len()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Name",
        "Model ID",
        "Provider",
        "Category",
        "Difficulty",
        "Context",
    ]);

    for card in cards {
        table.add_row(vec![
            card.display_name,
            card.id_line,
            card.provider_label,
            card.category.to_string(),
            card.difficulty.label().to_string(),
            card.context_line,
        ]);
    }

    println!("{table}");
    Ok(())
}
