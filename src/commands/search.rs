use poise::serenity_prelude as serenity;
use tracing::info;

use crate::cards::filter::SearchFilters;
use crate::cards::mappings;
use crate::cards::types::CardData;
use crate::commands::lookup::autocomplete_rarity;
use crate::state::Context;

/// Results listed inline before summarising the rest.
const INLINE_RESULTS: usize = 10;

/// Search for cards with filters
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Text to search in card name"] query: Option<String>,
    #[description = "Character Name"]
    #[autocomplete = "autocomplete_character"]
    character: Option<String>,
    #[description = "Unit Name"]
    #[autocomplete = "autocomplete_unit"]
    unit: Option<String>,
    #[description = "Group Name"]
    #[autocomplete = "autocomplete_group"]
    group: Option<String>,
    #[description = "Rarity"]
    #[autocomplete = "autocomplete_rarity"]
    rarity: Option<String>,
) -> Result<(), anyhow::Error> {
    let given = [&query, &character, &unit, &group, &rarity];
    if given.iter().all(|f| f.as_deref().map_or(true, str::is_empty)) {
        ctx.send(
            poise::CreateReply::default()
                .content(
                    "Please provide at least one search filter (Query, Character, Unit, etc.).\n\
                     Use `/advanced_search` to open the interactive dashboard.",
                )
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    ctx.defer().await?;

    // Typed English names that skipped autocomplete still resolve.
    let filters = SearchFilters::legacy(
        query.clone(),
        resolve(character.as_deref(), mappings::character_name),
        resolve(unit.as_deref(), mappings::unit_name),
        resolve(group.as_deref(), mappings::group_name),
        rarity.clone(),
    );

    let repo = ctx.data().cards().await;
    let results = repo.search_cards(&filters, repo.config().search_limit)?;

    info!(
        user = %ctx.author().name,
        results = results.len(),
        "Card search"
    );

    let labels = [
        ("Query", &query),
        ("Char", &character),
        ("Unit", &unit),
        ("Group", &group),
        ("Rarity", &rarity),
    ];
    let summary = labels
        .iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}: `{}`", name, v))
        })
        .collect::<Vec<_>>()
        .join(", ");

    ctx.send(poise::CreateReply::default().embed(results_embed(&results, &summary)))
        .await?;
    Ok(())
}

fn resolve(input: Option<&str>, map: fn(&str) -> Option<&'static str>) -> Option<String> {
    let input = input?;
    Some(map(input).unwrap_or(input).to_string())
}

/// One result line: `` `PL!-bp4-003-R` **南ことり** (R) ``.
pub fn result_line(card: &CardData) -> String {
    let number: &str = if card.card_number.is_empty() { "???" } else { &card.card_number };
    let name: &str = if card.name.is_empty() { "Unknown" } else { &card.name };
    let rarity: &str = if card.rarity.is_empty() { "?" } else { &card.rarity };
    format!("`{}` **{}** ({})\n", number, name, rarity)
}

fn results_description(results: &[&CardData], summary: &str) -> String {
    let mut description = format!("Filters: {}\n\n", summary);
    if results.is_empty() {
        description.push_str("No cards found matching the criteria.");
        return description;
    }
    for card in results.iter().take(INLINE_RESULTS) {
        description.push_str(&result_line(card));
    }
    if results.len() > INLINE_RESULTS {
        description.push_str(&format!(
            "\n*...and {} more.*",
            results.len() - INLINE_RESULTS
        ));
    }
    description
}

fn results_embed(results: &[&CardData], summary: &str) -> serenity::CreateEmbed {
    let colour = if results.is_empty() {
        serenity::Colour::RED
    } else {
        serenity::Colour::DARK_GREEN
    };
    serenity::CreateEmbed::new()
        .title(format!("Search Results: {} found", results.len()))
        .description(results_description(results, summary))
        .colour(colour)
}

async fn autocomplete_character(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let limit = ctx.data().config().await.autocomplete_limit;
    mappings::character_choices(partial, limit)
        .into_iter()
        .map(|(label, name)| serenity::AutocompleteChoice::new(label, name))
        .collect()
}

async fn autocomplete_unit(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let limit = ctx.data().config().await.autocomplete_limit;
    mappings::unit_choices(partial, limit)
        .into_iter()
        .map(String::from)
        .collect()
}

async fn autocomplete_group(
    _ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    mappings::group_choices(partial)
        .into_iter()
        .map(|(label, name)| serenity::AutocompleteChoice::new(label, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(number: &str, name: &str, rarity: &str) -> CardData {
        CardData {
            card_number: number.into(),
            name: name.into(),
            rarity: rarity.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_maps_known_aliases() {
        assert_eq!(
            resolve(Some("Honoka"), mappings::character_name).as_deref(),
            Some("高坂穂乃果")
        );
        assert_eq!(
            resolve(Some("高坂穂乃果"), mappings::character_name).as_deref(),
            Some("高坂穂乃果")
        );
        assert_eq!(resolve(None, mappings::unit_name), None);
    }

    #[test]
    fn test_result_line_placeholders() {
        assert_eq!(
            result_line(&card("PL!-bp4-003-R", "南ことり", "R")),
            "`PL!-bp4-003-R` **南ことり** (R)\n"
        );
        assert_eq!(result_line(&CardData::default()), "`???` **Unknown** (?)\n");
    }

    #[test]
    fn test_results_description_summarises_overflow() {
        let cards: Vec<CardData> = (0..12)
            .map(|i| card(&format!("A-b-{:03}-C", i), "x", "C"))
            .collect();
        let refs: Vec<&CardData> = cards.iter().collect();
        let desc = results_description(&refs, "Unit: `X`");
        assert!(desc.starts_with("Filters: Unit: `X`\n\n"));
        assert_eq!(desc.matches("**x**").count(), 10);
        assert!(desc.ends_with("*...and 2 more.*"));

        let desc = results_description(&[], "");
        assert!(desc.ends_with("No cards found matching the criteria."));
    }
}
