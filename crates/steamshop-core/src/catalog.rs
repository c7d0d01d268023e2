//! Catalog view-model operations: joining like records onto the product list,
//! applying like toggles, and the category/search filters used by the
//! catalog tabs and the header search box.

use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use crate::types::{Game, GameId, LikeRecord, LikeToggle};

/// Annotates every product with the current user's like flag.
///
/// Builds a map from stringified product id to `liked` (a later record for the
/// same id overrides an earlier one), then sets `liked` on each product,
/// defaulting to `false`. `likes = None` means the user is anonymous and every
/// product comes back unliked. Source order and length are preserved.
#[must_use]
pub fn merge_likes(products: Vec<Game>, likes: Option<&[LikeRecord]>) -> Vec<Game> {
    let liked_by_id: HashMap<&str, bool> = likes
        .unwrap_or_default()
        .iter()
        .map(|record| (record.product_id.as_str(), record.liked))
        .collect();

    products
        .into_iter()
        .map(|mut game| {
            game.liked = liked_by_id
                .get(game.id.as_str())
                .copied()
                .unwrap_or(false);
            game
        })
        .collect()
}

/// Writes a server toggle response onto the matching product.
///
/// Returns `false` when no product has `id`; the list is then untouched.
pub fn apply_like_toggle(products: &mut [Game], id: &GameId, toggle: LikeToggle) -> bool {
    match products.iter_mut().find(|game| &game.id == id) {
        Some(game) => {
            game.likes = toggle.likes;
            game.liked = toggle.liked;
            true
        }
        None => false,
    }
}

/// Flips `liked` on the matching product and moves `likes` by one in the same
/// direction, without consulting the server.
///
/// Returns `false` when no product has `id`.
pub fn toggle_local(products: &mut [Game], id: &GameId) -> bool {
    match products.iter_mut().find(|game| &game.id == id) {
        Some(game) => {
            game.likes += if game.liked { -1 } else { 1 };
            game.liked = !game.liked;
            true
        }
        None => false,
    }
}

/// Catalog tab selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => game
                .category
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(wanted)),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Category(trimmed.to_owned()))
        }
    }
}

/// Products in the selected tab, in source order.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Game], filter: &CategoryFilter) -> Vec<&'a Game> {
    products.iter().filter(|game| filter.matches(game)).collect()
}

/// Case-insensitive title search. A blank query returns every product.
#[must_use]
pub fn search_local<'a>(products: &'a [Game], query: &str) -> Vec<&'a Game> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|game| needle.is_empty() || game.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn game(id: i64, title: &str, categories: &[&str], likes: i64) -> Game {
        Game {
            id: GameId::from(id),
            title: title.to_string(),
            description: String::new(),
            category: categories.iter().map(|c| (*c).to_string()).collect(),
            price: Decimal::from(30),
            discount: Decimal::ZERO,
            views: 0,
            likes,
            liked: false,
            quantity: 5,
            image_src: String::new(),
            release_date: None,
            developer: String::new(),
            publisher: String::new(),
            platform: Vec::new(),
            features: Vec::new(),
            long_description: String::new(),
        }
    }

    fn like(id: &str, liked: bool) -> LikeRecord {
        LikeRecord {
            product_id: GameId::from(id),
            liked,
            likes: 0,
        }
    }

    fn catalog() -> Vec<Game> {
        vec![
            game(1, "Skyforge", &["action"], 10),
            game(2, "Ember Saga", &["RPG"], 4),
            game(3, "Tiny Farms", &["casual"], 0),
        ]
    }

    #[test]
    fn merge_preserves_length_and_order() {
        let merged = merge_likes(catalog(), Some(&[like("2", true)]));
        let ids: Vec<&str> = merged.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn merge_sets_liked_from_records_and_defaults_false() {
        let merged = merge_likes(catalog(), Some(&[like("2", true), like("3", false)]));
        assert!(!merged[0].liked);
        assert!(merged[1].liked);
        assert!(!merged[2].liked);
    }

    #[test]
    fn merge_without_likes_marks_everything_unliked() {
        let mut products = catalog();
        products[0].liked = true;
        let merged = merge_likes(products, None);
        assert!(merged.iter().all(|g| !g.liked));
    }

    #[test]
    fn merge_ignores_records_for_unknown_products() {
        let merged = merge_likes(catalog(), Some(&[like("99", true)]));
        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|g| !g.liked));
    }

    #[test]
    fn merge_last_record_wins_for_duplicate_ids() {
        let merged = merge_likes(catalog(), Some(&[like("1", true), like("1", false)]));
        assert!(!merged[0].liked);
    }

    #[test]
    fn apply_like_toggle_replaces_only_matching_entry() {
        let mut products = catalog();
        let before = products.clone();
        let hit = apply_like_toggle(
            &mut products,
            &GameId::from(2),
            LikeToggle {
                likes: 5,
                liked: true,
            },
        );
        assert!(hit);
        assert_eq!(products[1].likes, 5);
        assert!(products[1].liked);
        assert_eq!(products[0], before[0]);
        assert_eq!(products[2], before[2]);
    }

    #[test]
    fn apply_like_toggle_unknown_id_is_noop() {
        let mut products = catalog();
        let before = products.clone();
        let hit = apply_like_toggle(
            &mut products,
            &GameId::from(42),
            LikeToggle {
                likes: 1,
                liked: true,
            },
        );
        assert!(!hit);
        assert_eq!(products, before);
    }

    #[test]
    fn toggle_local_flips_and_adjusts_by_one() {
        let mut products = catalog();
        let before = products.clone();

        assert!(toggle_local(&mut products, &GameId::from(1)));
        assert!(products[0].liked);
        assert_eq!(products[0].likes, 11);
        assert_eq!(products[1..], before[1..]);

        assert!(toggle_local(&mut products, &GameId::from(1)));
        assert!(!products[0].liked);
        assert_eq!(products[0].likes, 10);
    }

    #[test]
    fn category_filter_parses_all_and_tags() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "rpg".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Category("rpg".to_string())
        );
    }

    #[test]
    fn filter_by_category_is_case_insensitive() {
        let products = catalog();
        let rpg = filter_by_category(&products, &CategoryFilter::Category("rpg".to_string()));
        assert_eq!(rpg.len(), 1);
        assert_eq!(rpg[0].title, "Ember Saga");
        assert_eq!(filter_by_category(&products, &CategoryFilter::All).len(), 3);
    }

    #[test]
    fn search_local_matches_title_substring() {
        let products = catalog();
        let hits = search_local(&products, "  FARM ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, GameId::from(3));
        assert_eq!(search_local(&products, "").len(), 3);
    }
}
