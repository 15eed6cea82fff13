use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{debug, info};

use crate::cards::types::CardData;
use crate::commands::dashboard::{FilterState, Pager, BLADE_HEARTS, CARD_TYPES, HEART_COLORS};
use crate::commands::range::{parse_range, Bounds};
use crate::commands::search::result_line;
use crate::error::BotError;
use crate::state::Context;

/// Dashboard closes after this long without a click.
const DASHBOARD_TIMEOUT: Duration = Duration::from_secs(300);
const RESULTS_PER_PAGE: usize = 10;
const ALL_TYPES: &str = "ALL";

#[derive(Debug, poise::Modal)]
#[name = "Text Filters"]
struct TextFilterModal {
    #[name = "Name / Text Query"]
    #[max_length = 100]
    text: Option<String>,
    #[name = "Card Number (Partial)"]
    #[max_length = 20]
    number: Option<String>,
}

#[derive(Debug, poise::Modal)]
#[name = "Numeric Ranges"]
struct RangeFilterModal {
    #[name = "Cost Range (e.g. 1-3, 4+, <=2)"]
    #[placeholder = "Min-Max"]
    cost: Option<String>,
    #[name = "Blades Range (e.g. 2-2)"]
    #[placeholder = "Min-Max"]
    blades: Option<String>,
}

enum Screen {
    Filters,
    Hearts { color: String },
    Results { pager: Pager },
}

/// Rendered dashboard message, sent either as a reply edit or as an
/// interaction update.
struct View {
    embed: serenity::CreateEmbed,
    components: Vec<serenity::CreateActionRow>,
}

impl View {
    fn reply(self) -> poise::CreateReply {
        poise::CreateReply::default()
            .content("Advanced Search Dashboard")
            .embed(self.embed)
            .components(self.components)
            .ephemeral(true)
    }

    fn update(self) -> serenity::CreateInteractionResponse {
        serenity::CreateInteractionResponse::UpdateMessage(
            serenity::CreateInteractionResponseMessage::new()
                .embed(self.embed)
                .components(self.components),
        )
    }
}

/// Open the Advanced Search Dashboard
#[poise::command(slash_command)]
pub async fn advanced_search(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let ctx_id = ctx.id();
    let repo = ctx.data().cards().await;
    let limit = repo.config().search_limit;

    let mut state = FilterState::default();
    let mut screen = Screen::Filters;
    let mut results: Vec<&CardData> = Vec::new();

    let reply = ctx.send(render(ctx_id, &state, &screen, &results).reply()).await?;

    while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&format!("{}:", ctx_id)))
        .timeout(DASHBOARD_TIMEOUT)
        .await
    {
        let action = press
            .data
            .custom_id
            .split_once(':')
            .map(|(_, a)| a.to_string())
            .unwrap_or_default();
        debug!(action = %action, "Dashboard interaction");

        match action.as_str() {
            // Modals answer the interaction themselves, so the dashboard is
            // refreshed through the original reply instead.
            "text" => {
                let defaults = TextFilterModal {
                    text: state.text_query.clone(),
                    number: state.card_number.clone(),
                };
                let submitted = poise::execute_modal_on_component_interaction(
                    ctx,
                    press.clone(),
                    Some(defaults),
                    Some(DASHBOARD_TIMEOUT),
                )
                .await?;
                if let Some(modal) = submitted {
                    state.set_text(modal.text, modal.number);
                    screen = Screen::Filters;
                    reply
                        .edit(ctx, render(ctx_id, &state, &screen, &results).reply())
                        .await?;
                }
                continue;
            }
            "ranges" => {
                let submitted = poise::execute_modal_on_component_interaction::<RangeFilterModal>(
                    ctx,
                    press.clone(),
                    None,
                    Some(DASHBOARD_TIMEOUT),
                )
                .await?;
                let Some(modal) = submitted else { continue };
                match (range_input(modal.cost), range_input(modal.blades)) {
                    (Ok((cost_min, cost_max)), Ok((blades_min, blades_max))) => {
                        state.cost_min = cost_min;
                        state.cost_max = cost_max;
                        state.blades_min = blades_min;
                        state.blades_max = blades_max;
                        screen = Screen::Filters;
                        reply
                            .edit(ctx, render(ctx_id, &state, &screen, &results).reply())
                            .await?;
                    }
                    (Err(e), _) | (_, Err(e)) => {
                        ctx.send(
                            poise::CreateReply::default()
                                .content(e.to_string())
                                .ephemeral(true),
                        )
                        .await?;
                    }
                }
                continue;
            }
            "type" => {
                let value = selected(&press).into_iter().next();
                state.card_type = value.filter(|v| v != ALL_TYPES);
            }
            "blade" => state.blade_hearts = selected(&press),
            "hearts" => {
                screen = Screen::Hearts {
                    color: HEART_COLORS[0].0.to_string(),
                }
            }
            "color" => {
                if let (Screen::Hearts { color }, Some(value)) =
                    (&mut screen, selected(&press).into_iter().next())
                {
                    *color = value;
                }
            }
            "h1" | "h2" | "h3" | "h4" => {
                if let Screen::Hearts { color } = &screen {
                    let min = action[1..].parse::<u32>().unwrap_or(1);
                    state.hearts.insert(color.clone(), min);
                }
            }
            "hclear" => {
                if let Screen::Hearts { color } = &screen {
                    state.hearts.remove(color);
                }
            }
            "clear" => state = FilterState::default(),
            "back" => screen = Screen::Filters,
            "search" => {
                results = repo.search_cards(&state.to_filters(), limit)?;
                info!(
                    user = %ctx.author().name,
                    results = results.len(),
                    "Advanced search"
                );
                screen = Screen::Results {
                    pager: Pager::new(results.len(), RESULTS_PER_PAGE),
                };
            }
            "first" | "prev" | "next" | "last" => {
                if let Screen::Results { pager } = &mut screen {
                    match action.as_str() {
                        "first" => pager.first(),
                        "prev" => pager.prev(),
                        "next" => pager.next(),
                        _ => pager.last(),
                    }
                }
            }
            _ => {}
        }

        press
            .create_response(
                ctx.serenity_context(),
                render(ctx_id, &state, &screen, &results).update(),
            )
            .await?;
    }

    // Timed out: leave the last screen up without live components.
    let closed = poise::CreateReply::default().components(vec![]);
    reply.edit(ctx, closed).await?;
    Ok(())
}

fn range_input(input: Option<String>) -> Result<Bounds, BotError> {
    let raw = input.unwrap_or_default();
    parse_range(&raw).ok_or_else(|| {
        BotError::InvalidFilterInput(format!(
            "Could not read range `{}`. Use forms like `4`, `2-4`, `4+`, `>=4` or `<3`.",
            raw.trim()
        ))
    })
}

fn selected(press: &serenity::ComponentInteraction) -> Vec<String> {
    match &press.data.kind {
        serenity::ComponentInteractionDataKind::StringSelect { values } => values.clone(),
        _ => Vec::new(),
    }
}

fn custom_id(ctx_id: u64, action: &str) -> String {
    format!("{}:{}", ctx_id, action)
}

fn button(
    ctx_id: u64,
    action: &str,
    label: &str,
    style: serenity::ButtonStyle,
) -> serenity::CreateButton {
    serenity::CreateButton::new(custom_id(ctx_id, action))
        .label(label)
        .style(style)
}

fn render(ctx_id: u64, state: &FilterState, screen: &Screen, results: &[&CardData]) -> View {
    match screen {
        Screen::Filters => View {
            embed: serenity::CreateEmbed::new()
                .title("Advanced Search Filters")
                .description(format!("```\n{}\n```", state.describe()))
                .colour(serenity::Colour::BLUE),
            components: filter_components(ctx_id, state),
        },
        Screen::Hearts { color } => View {
            embed: serenity::CreateEmbed::new()
                .title("Configure Heart Requirements")
                .description(format!(
                    "Current Settings:\n```\n{}\n```\n**Instructions:** Select a Color below, \
                     then click a Number to set minimum requirement for that color.",
                    state.describe()
                ))
                .colour(serenity::Colour::MAGENTA)
                .footer(serenity::CreateEmbedFooter::new(format!(
                    "Selected Color: {}",
                    HEART_COLORS
                        .iter()
                        .find(|(k, _)| *k == color.as_str())
                        .map_or(color.as_str(), |(_, l)| *l)
                ))),
            components: heart_components(ctx_id, color),
        },
        Screen::Results { pager } => View {
            embed: results_embed(state, results, pager),
            components: results_components(ctx_id, pager),
        },
    }
}

fn filter_components(ctx_id: u64, state: &FilterState) -> Vec<serenity::CreateActionRow> {
    let current_type = state.card_type.as_deref().unwrap_or(ALL_TYPES);
    let mut type_options = vec![serenity::CreateSelectMenuOption::new("All Types", ALL_TYPES)
        .default_selection(current_type == ALL_TYPES)];
    type_options.extend(CARD_TYPES.iter().map(|(value, label)| {
        serenity::CreateSelectMenuOption::new(*label, *value)
            .default_selection(current_type == *value)
    }));

    let blade_options = BLADE_HEARTS
        .iter()
        .map(|(value, label)| {
            serenity::CreateSelectMenuOption::new(*label, *value)
                .default_selection(state.blade_hearts.iter().any(|b| b == value))
        })
        .collect();

    vec![
        serenity::CreateActionRow::SelectMenu(
            serenity::CreateSelectMenu::new(
                custom_id(ctx_id, "type"),
                serenity::CreateSelectMenuKind::String {
                    options: type_options,
                },
            )
            .placeholder("Filter by Card Type..."),
        ),
        serenity::CreateActionRow::Buttons(vec![
            button(ctx_id, "text", "Edit Text/Number", serenity::ButtonStyle::Secondary),
            button(ctx_id, "ranges", "Set Cost/Blades", serenity::ButtonStyle::Secondary),
        ]),
        serenity::CreateActionRow::SelectMenu(
            serenity::CreateSelectMenu::new(
                custom_id(ctx_id, "blade"),
                serenity::CreateSelectMenuKind::String {
                    options: blade_options,
                },
            )
            .placeholder("Blade Hearts (Match ANY)...")
            .min_values(0)
            .max_values(BLADE_HEARTS.len() as u8),
        ),
        serenity::CreateActionRow::Buttons(vec![button(
            ctx_id,
            "hearts",
            "Configure Hearts",
            serenity::ButtonStyle::Primary,
        )]),
        serenity::CreateActionRow::Buttons(vec![
            button(ctx_id, "search", "Search", serenity::ButtonStyle::Success),
            button(ctx_id, "clear", "Clear All", serenity::ButtonStyle::Danger),
        ]),
    ]
}

fn heart_components(ctx_id: u64, color: &str) -> Vec<serenity::CreateActionRow> {
    let options = HEART_COLORS
        .iter()
        .map(|(value, label)| {
            serenity::CreateSelectMenuOption::new(*label, *value).default_selection(*value == color)
        })
        .collect();

    vec![
        serenity::CreateActionRow::SelectMenu(
            serenity::CreateSelectMenu::new(
                custom_id(ctx_id, "color"),
                serenity::CreateSelectMenuKind::String { options },
            )
            .placeholder("Select Color to Configure..."),
        ),
        serenity::CreateActionRow::Buttons(vec![
            button(ctx_id, "h1", "1", serenity::ButtonStyle::Secondary),
            button(ctx_id, "h2", "2", serenity::ButtonStyle::Secondary),
            button(ctx_id, "h3", "3", serenity::ButtonStyle::Secondary),
            button(ctx_id, "h4", "4+", serenity::ButtonStyle::Secondary),
            button(ctx_id, "hclear", "Clear This Color", serenity::ButtonStyle::Danger),
        ]),
        serenity::CreateActionRow::Buttons(vec![button(
            ctx_id,
            "back",
            "<< Back to Dashboard",
            serenity::ButtonStyle::Primary,
        )]),
    ]
}

fn results_embed(
    state: &FilterState,
    results: &[&CardData],
    pager: &Pager,
) -> serenity::CreateEmbed {
    let range = pager.range();
    let mut description = format!("**Filters:**\n{}\n", state.describe());
    for card in &results[range.clone()] {
        description.push_str(&result_line(card));
    }

    let colour = if results.is_empty() {
        serenity::Colour::RED
    } else {
        serenity::Colour::DARK_GREEN
    };

    serenity::CreateEmbed::new()
        .title(format!("Search Results: {} found", results.len()))
        .description(description)
        .colour(colour)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Showing items {}-{} of {}",
            (range.start + 1).min(results.len()),
            range.end,
            results.len()
        )))
}

fn results_components(ctx_id: u64, pager: &Pager) -> Vec<serenity::CreateActionRow> {
    let nav = serenity::ButtonStyle::Secondary;
    vec![
        serenity::CreateActionRow::Buttons(vec![
            button(ctx_id, "first", "<<", nav).disabled(pager.is_first()),
            button(ctx_id, "prev", "<", nav).disabled(pager.is_first()),
            button(
                ctx_id,
                "page",
                &format!("Page {}/{} ({})", pager.page + 1, pager.pages(), pager.total),
                nav,
            )
            .disabled(true),
            button(ctx_id, "next", ">", nav).disabled(pager.is_last()),
            button(ctx_id, "last", ">>", nav).disabled(pager.is_last()),
        ]),
        serenity::CreateActionRow::Buttons(vec![button(
            ctx_id,
            "back",
            "Back to Search",
            serenity::ButtonStyle::Primary,
        )]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_input_accepts_blank() {
        assert_eq!(range_input(None).unwrap(), (None, None));
        assert_eq!(range_input(Some("2-4".into())).unwrap(), (Some(2), Some(4)));
    }

    #[test]
    fn test_range_input_rejects_garbage() {
        let err = range_input(Some(" lots ".into())).unwrap_err();
        assert!(matches!(err, BotError::InvalidFilterInput(_)));
        assert!(err.to_string().contains("`lots`"));
    }

    #[test]
    fn test_custom_id_scoped_to_invocation() {
        assert_eq!(custom_id(42, "search"), "42:search");
    }
}
