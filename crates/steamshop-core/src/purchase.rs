//! Purchase confirmation flow for a single game.
//!
//! The dialog moves `Closed -> Open -> Submitting` and then back to `Closed`
//! on success or to `Open` on failure, so a failed request leaves the dialog
//! up for a manual retry or dismissal. Nothing here touches inventory.

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{format_price, purchase_total};
use crate::types::{Game, GameId};

/// Upper bound on units per order regardless of inventory.
pub const MAX_PER_ORDER: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PurchaseError {
    #[error("\"{title}\" is out of stock")]
    OutOfStock { title: String },

    #[error("quantity {requested} is outside 1..={max}")]
    QuantityOutOfRange { requested: u32, max: u32 },

    #[error("purchase dialog is {0}, expected {1}")]
    InvalidState(&'static str, &'static str),
}

/// Selectable quantities for a game with `inventory` units left.
///
/// Empty when nothing is in stock.
#[must_use]
pub fn quantity_options(inventory: u32) -> RangeInclusive<u32> {
    1..=inventory.min(MAX_PER_ORDER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogState {
    Closed,
    Open,
    Submitting,
}

impl DialogState {
    fn name(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Submitting => "submitting",
        }
    }
}

/// The single request a confirmed dialog issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub product_id: GameId,
    pub quantity: u32,
}

/// Quantity picker plus confirmation dialog for one game.
#[derive(Debug, Clone)]
pub struct PurchaseDialog {
    product_id: GameId,
    title: String,
    price: Decimal,
    discount: Decimal,
    inventory: u32,
    quantity: u32,
    state: DialogState,
}

impl PurchaseDialog {
    /// Starts closed with a quantity of one.
    #[must_use]
    pub fn new(game: &Game) -> Self {
        Self {
            product_id: game.id.clone(),
            title: game.title.clone(),
            price: game.price,
            discount: game.discount,
            inventory: game.quantity,
            quantity: 1,
            state: DialogState::Closed,
        }
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.state == DialogState::Submitting
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == DialogState::Closed
    }

    /// Inventory as it was when the dialog was built.
    #[must_use]
    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    /// Picks a quantity from [`quantity_options`].
    ///
    /// # Errors
    ///
    /// [`PurchaseError::QuantityOutOfRange`] when `quantity` is not selectable,
    /// [`PurchaseError::InvalidState`] while a request is in flight.
    pub fn select_quantity(&mut self, quantity: u32) -> Result<(), PurchaseError> {
        if self.state == DialogState::Submitting {
            return Err(PurchaseError::InvalidState(self.state.name(), "closed or open"));
        }
        let options = quantity_options(self.inventory);
        if !options.contains(&quantity) {
            return Err(PurchaseError::QuantityOutOfRange {
                requested: quantity,
                max: *options.end(),
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Opens the confirmation dialog.
    ///
    /// # Errors
    ///
    /// [`PurchaseError::OutOfStock`] when inventory is zero,
    /// [`PurchaseError::InvalidState`] unless the dialog is closed.
    pub fn open(&mut self) -> Result<(), PurchaseError> {
        if self.inventory == 0 {
            return Err(PurchaseError::OutOfStock {
                title: self.title.clone(),
            });
        }
        if self.state != DialogState::Closed {
            return Err(PurchaseError::InvalidState(self.state.name(), "closed"));
        }
        self.state = DialogState::Open;
        Ok(())
    }

    /// Discounted unit price times the selected quantity, in cents.
    #[must_use]
    pub fn total(&self) -> Decimal {
        purchase_total(self.price, self.discount, self.quantity)
    }

    #[must_use]
    pub fn confirmation_message(&self) -> String {
        format!(
            "Purchase {} ({} pcs.) for {}?",
            self.title,
            self.quantity,
            format_price(self.total())
        )
    }

    /// Confirms the dialog and hands out the request to send.
    ///
    /// # Errors
    ///
    /// [`PurchaseError::InvalidState`] unless the dialog is open.
    pub fn begin_submit(&mut self) -> Result<PurchaseRequest, PurchaseError> {
        if self.state != DialogState::Open {
            return Err(PurchaseError::InvalidState(self.state.name(), "open"));
        }
        self.state = DialogState::Submitting;
        Ok(PurchaseRequest {
            product_id: self.product_id.clone(),
            quantity: self.quantity,
        })
    }

    /// The request succeeded; the dialog closes.
    pub fn complete(&mut self) {
        if self.state == DialogState::Submitting {
            self.state = DialogState::Closed;
        }
    }

    /// The request failed; the dialog stays up with the same quantity.
    pub fn fail(&mut self) {
        if self.state == DialogState::Submitting {
            self.state = DialogState::Open;
        }
    }

    pub fn dismiss(&mut self) {
        self.state = DialogState::Closed;
    }
}
