//! Plain-text rendering of catalog entries for the terminal.

use std::fmt::Write as _;

use steamshop_client::HistoryLine;
use steamshop_core::{format_price, Game};

/// One catalog line: id, title, price (with discount), likes.
pub(crate) fn game_line(game: &Game) -> String {
    let mut line = format!("{:>4}  {:<32}", game.id, game.title);
    if game.on_sale() {
        let _ = write!(
            line,
            " {} (was {}, -{}%)",
            format_price(game.discounted_price()),
            format_price(game.price),
            game.discount.normalize()
        );
    } else {
        let _ = write!(line, " {}", format_price(game.price));
    }
    let heart = if game.liked { "liked" } else { "likes" };
    let _ = write!(line, "  [{heart}: {}]", game.likes);
    line
}

pub(crate) fn game_detail(game: &Game) -> String {
    let mut out = game_line(game);
    let _ = writeln!(out);
    if !game.description.is_empty() {
        let _ = writeln!(out, "\n{}", game.description);
    }
    if !game.long_description.is_empty() {
        let _ = writeln!(out, "\n{}", game.long_description);
    }
    let _ = writeln!(out);
    let rows = [
        ("developer", game.developer.clone()),
        ("publisher", game.publisher.clone()),
        ("released", game.release_date.clone().unwrap_or_default()),
        ("categories", game.category.join(", ")),
        ("platforms", game.platform.join(", ")),
        ("features", game.features.join(", ")),
        ("views", game.views.to_string()),
        ("in stock", game.quantity.to_string()),
    ];
    for (label, value) in rows.iter().filter(|(_, v)| !v.is_empty()) {
        let _ = writeln!(out, "{label:<11} {value}");
    }
    out
}

pub(crate) fn history_line(line: &HistoryLine) -> String {
    let record = &line.record;
    let adjusted = line
        .adjusted_total
        .map_or_else(|| "n/a".to_string(), format_price);
    format!(
        "{:<32} x{:<3} paid {}  now {}",
        record.title,
        record.quantity,
        format_price(record.total_price),
        adjusted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(discount: u32, liked: bool) -> Game {
        let mut game: Game = serde_json::from_value(serde_json::json!({
            "id": 5,
            "title": "Skyforge",
            "price": 100,
            "discount": discount,
            "likes": 3,
            "quantity": 2,
            "developer": "Forge Works"
        }))
        .unwrap();
        game.liked = liked;
        game
    }

    #[test]
    fn game_line_shows_discount() {
        let line = game_line(&game(20, false));
        assert!(line.contains("$80.00 (was $100.00, -20%)"), "{line}");
        assert!(line.ends_with("[likes: 3]"));
    }

    #[test]
    fn game_line_marks_liked() {
        let line = game_line(&game(0, true));
        assert!(line.contains("$100.00"));
        assert!(line.ends_with("[liked: 3]"));
    }

    #[test]
    fn game_detail_skips_empty_fields() {
        let detail = game_detail(&game(0, false));
        assert!(detail.contains("developer   Forge Works"));
        assert!(!detail.contains("publisher"));
        assert!(detail.contains("in stock    2"));
    }
}
