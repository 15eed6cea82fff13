use poise::serenity_prelude as serenity;
use tracing::info;

use crate::cards::types::{CardData, HeartCounts};
use crate::error::BotError;
use crate::state::Context;

/// Discord embed field values are capped at 1024 characters.
const FIELD_LIMIT: usize = 1024;

/// Look up a Love Live! OCG card
#[poise::command(slash_command)]
pub async fn card(
    ctx: Context<'_>,
    #[description = "Card Series (e.g. PL!N)"]
    #[autocomplete = "autocomplete_series"]
    series: String,
    #[description = "Product Code (e.g. bp4)"]
    #[autocomplete = "autocomplete_product"]
    product: String,
    #[description = "Card Number (e.g. 032)"]
    #[autocomplete = "autocomplete_number"]
    number: String,
    #[description = "Rarity (e.g. L+)"]
    #[autocomplete = "autocomplete_rarity"]
    rarity: String,
) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    let number = format_number(&number)?;
    let repo = ctx.data().cards().await;

    let Some(card) = repo.get_card(&series, &product, &number, &rarity) else {
        info!(user = %ctx.author().name, series, product, number, rarity, "Card not found");
        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "Card not found: `{}-{}-{}-{}`.\nPlease check the ID components.",
                    series, product, number, rarity
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    ctx.send(poise::CreateReply::default().embed(card_embed(card)))
        .await?;
    Ok(())
}

/// Card numbers are stored zero-padded to three digits. Purely numeric
/// input is padded; anything else is passed through trimmed.
pub fn format_number(raw: &str) -> Result<String, BotError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BotError::InvalidLookupArgs(
            "Card number must not be empty.".to_string(),
        ));
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(raw.to_string());
    }
    let n: u32 = raw.parse().map_err(|_| {
        BotError::InvalidLookupArgs(format!("Card number `{}` is out of range.", raw))
    })?;
    Ok(format!("{:03}", n))
}

fn card_embed(card: &CardData) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(format!("{} ({})", card.name, card.rarity))
        .description(format!("**Set**: {}\n**Type**: {}", card.set, card.card_type))
        .colour(serenity::Colour::BLUE)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "ID: {}",
            card.card_number
        )));

    if !card.img_url.is_empty() {
        embed = embed.image(encode_image_url(&card.img_url));
    }

    if let Some(unit) = card.unit.as_deref().filter(|u| !u.is_empty()) {
        embed = embed.field("Unit", unit, true);
    }
    if !card.group.is_empty() {
        embed = embed.field("Group", card.group.join(", "), true);
    }
    if let Some(cost) = card.cost.as_deref().filter(|c| !c.is_empty()) {
        embed = embed.field("Cost", cost, true);
    }
    if let Some(score) = card.score.as_deref().filter(|s| !s.is_empty()) {
        embed = embed.field("Score", score, true);
    }
    if let Some(stats) = heart_stats(card) {
        embed = embed.field("Heart Stats", stats, false);
    }
    if let Some(text) = ability_text(card) {
        embed = embed.field("Ability", text, false);
    }

    embed
}

/// Percent-encode the path of an image URL. Reserved characters such as
/// `!` are left alone; some image hosts reject them encoded.
pub fn encode_image_url(raw: &str) -> String {
    url::Url::parse(raw)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn format_counts(counts: &HeartCounts) -> String {
    counts
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn heart_stats(card: &CardData) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(hearts) = card.hearts.as_ref().filter(|h| !h.is_empty()) {
        lines.push(format!("Hearts: {}", format_counts(hearts)));
    }
    if let Some(required) = card.required_hearts.as_ref().filter(|h| !h.is_empty()) {
        lines.push(format!("Req. Hearts: {}", format_counts(required)));
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn ability_text(card: &CardData) -> Option<String> {
    let lines = card.info_text.as_ref().filter(|t| !t.is_empty())?;
    Some(truncate_chars(&lines.join("\n"), FIELD_LIMIT))
}

/// Cut to at most `max` characters, marking the cut with `...`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

async fn autocomplete_series(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().cards().await.search_series(partial)
}

async fn autocomplete_product(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().cards().await.search_product(partial)
}

async fn autocomplete_number(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().cards().await.search_number(partial)
}

pub async fn autocomplete_rarity(ctx: Context<'_>, partial: &str) -> Vec<String> {
    ctx.data().cards().await.search_rarity(partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, &str)]) -> Option<HeartCounts> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_format_number_pads() {
        assert_eq!(format_number("32").unwrap(), "032");
        assert_eq!(format_number(" 1 ").unwrap(), "001");
        assert_eq!(format_number("032").unwrap(), "032");
        assert_eq!(format_number("1234").unwrap(), "1234");
        assert_eq!(format_number("P01").unwrap(), "P01");
    }

    #[test]
    fn test_format_number_rejects_bad_input() {
        assert!(matches!(
            format_number("  "),
            Err(BotError::InvalidLookupArgs(_))
        ));
        assert!(matches!(
            format_number("99999999999"),
            Err(BotError::InvalidLookupArgs(_))
        ));
    }

    #[test]
    fn test_encode_image_url_keeps_bang() {
        let url = "https://llofficial-cardgame.com/wordpress/wp-content/images/cardlist/BP04/PL!-bp4-003-R.png";
        assert_eq!(encode_image_url(url), url);
    }

    #[test]
    fn test_encode_image_url_escapes_path() {
        assert_eq!(
            encode_image_url("https://example.com/cards/L+ 1.png"),
            "https://example.com/cards/L+%201.png"
        );
        assert_eq!(encode_image_url("not a url"), "not a url");
    }

    #[test]
    fn test_heart_stats() {
        let card = CardData {
            hearts: counts(&[("heart01", "2"), ("heart03", "1")]),
            required_hearts: counts(&[("heart02", "3")]),
            ..Default::default()
        };
        assert_eq!(
            heart_stats(&card).unwrap(),
            "Hearts: heart01: 2, heart03: 1\nReq. Hearts: heart02: 3"
        );
        assert!(heart_stats(&CardData::default()).is_none());
    }

    #[test]
    fn test_ability_text_truncated() {
        let card = CardData {
            info_text: Some(vec!["あ".repeat(600), "い".repeat(600)]),
            ..Default::default()
        };
        let text = ability_text(&card).unwrap();
        assert_eq!(text.chars().count(), FIELD_LIMIT);
        assert!(text.ends_with("..."));

        let short = CardData {
            info_text: Some(vec!["one".into(), "two".into()]),
            ..Default::default()
        };
        assert_eq!(ability_text(&short).unwrap(), "one\ntwo");
        assert!(ability_text(&CardData::default()).is_none());
    }
}
