//! Catalog and purchase command handlers.

use std::io::{self, BufRead, Write};

use steamshop_client::{purchase_history_view, CatalogStore, ClientError, Notice, StoreClient};
use steamshop_core::{
    filter_by_category, format_price, quantity_options, CategoryFilter, Game, GameId,
    PurchaseDialog, Session,
};

use crate::{render, report};

fn print_games<'a>(games: impl IntoIterator<Item = &'a Game>) {
    let mut count = 0_usize;
    for game in games {
        println!("{}", render::game_line(game));
        count += 1;
    }
    if count == 0 {
        println!("No games found.");
    }
}

pub(crate) async fn run_games(
    client: &StoreClient,
    session: &Session,
    category: &str,
    search: Option<&str>,
    remote: bool,
) -> anyhow::Result<()> {
    let filter: CategoryFilter = category.parse()?;

    if let (Some(query), true) = (search, remote) {
        let found = report("Search", client.search_products(query).await)?;
        print_games(filter_by_category(&found, &filter));
        return Ok(());
    }

    let mut store = CatalogStore::new();
    report("Loading games", store.refresh(client, session).await)?;
    let shown: Vec<&Game> = match search {
        Some(query) => store
            .search(query)
            .into_iter()
            .filter(|game| filter.matches(game))
            .collect(),
        None => store.by_category(&filter),
    };
    print_games(shown);
    Ok(())
}

pub(crate) async fn run_game(
    client: &StoreClient,
    session: &Session,
    id: &GameId,
) -> anyhow::Result<()> {
    let game = report(
        "Loading game",
        CatalogStore::load_detail(client, session, id).await,
    )?;
    print!("{}", render::game_detail(&game));
    Ok(())
}

pub(crate) async fn run_like(
    client: &StoreClient,
    session: &Session,
    id: &GameId,
) -> anyhow::Result<()> {
    report("Like", session.require_token().map_err(ClientError::from))?;
    let mut store = CatalogStore::new();
    report("Loading games", store.refresh(client, session).await)?;
    let toggle = report("Like", store.toggle_like(client, session, id).await)?;

    let title = store.get(id).map_or(id.as_str(), |game| game.title.as_str());
    let (heading, verb) = if toggle.liked {
        ("Liked", "added to")
    } else {
        ("Like removed", "removed from")
    };
    println!(
        "{}",
        Notice::success(heading, format!("{title} {verb} your likes ({} total)", toggle.likes))
    );
    Ok(())
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub(crate) async fn run_buy(
    client: &StoreClient,
    session: &Session,
    id: &GameId,
    quantity: u32,
    assume_yes: bool,
) -> anyhow::Result<()> {
    report("Purchase", session.require_token().map_err(ClientError::from))?;
    let game = report(
        "Loading game",
        CatalogStore::load_detail(client, session, id).await,
    )?;
    let mut dialog = PurchaseDialog::new(&game);
    // out of stock is reported before any quantity check
    dialog.open()?;
    if let Err(e) = dialog.select_quantity(quantity) {
        let options = quantity_options(dialog.inventory());
        anyhow::bail!(
            "{e} (choose {}..={} for {})",
            options.start(),
            options.end(),
            game.title
        );
    }

    let message = dialog.confirmation_message();
    if !assume_yes && !confirm(&message)? {
        dialog.dismiss();
        println!("Purchase cancelled.");
        return Ok(());
    }

    let total = dialog.total();
    let store = CatalogStore::from_games(vec![game]);
    report("Purchase", store.purchase(client, session, &mut dialog).await)?;
    tracing::info!(product_id = %id, quantity, total = %total, "purchase completed");
    println!(
        "{}",
        Notice::success(
            "Purchase complete",
            format!("Paid {} for {quantity} pcs.", format_price(total))
        )
    );
    Ok(())
}

pub(crate) async fn run_history(client: &StoreClient, session: &Session) -> anyhow::Result<()> {
    let lines = report(
        "Loading purchase history",
        purchase_history_view(client, session).await,
    )?;
    if lines.is_empty() {
        println!("No purchases yet.");
    }
    for line in &lines {
        println!("{}", render::history_line(line));
    }
    Ok(())
}

pub(crate) async fn run_recommend(client: &StoreClient, session: &Session) -> anyhow::Result<()> {
    let store = report(
        "Loading recommendations",
        CatalogStore::recommended(client, session).await,
    )?;
    print_games(store.games());
    Ok(())
}

#[cfg(test)]
#[path = "shop_test.rs"]
mod tests;
