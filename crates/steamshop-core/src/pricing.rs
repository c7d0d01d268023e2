//! Price arithmetic shared by the catalog, the purchase dialog, and the
//! purchase history view.
//!
//! All amounts are [`Decimal`]; totals are rounded to cents with
//! midpoint-away-from-zero, which is how the storefront has always displayed
//! them.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::PurchaseRecord;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `price - price * discount / 100`, unrounded.
#[must_use]
pub fn discounted_unit_price(price: Decimal, discount_pct: Decimal) -> Decimal {
    price - price * discount_pct / HUNDRED
}

/// Total shown in the purchase confirmation: discounted unit price times
/// `quantity`, rounded to cents.
#[must_use]
pub fn purchase_total(price: Decimal, discount_pct: Decimal, quantity: u32) -> Decimal {
    to_cents(discounted_unit_price(price, discount_pct) * Decimal::from(quantity))
}

/// Re-prices a historical purchase with the product's current discount.
///
/// The stored `total_price` is split back into a unit price, the discount is
/// applied to that unit price, and the result is multiplied out again. A
/// record with zero quantity is returned as-is.
#[must_use]
pub fn adjusted_history_total(record: &PurchaseRecord, current_discount_pct: Decimal) -> Decimal {
    if record.quantity == 0 {
        return to_cents(record.total_price);
    }
    let quantity = Decimal::from(record.quantity);
    let unit = record.total_price / quantity;
    let discounted = unit * (Decimal::ONE - current_discount_pct / HUNDRED);
    to_cents(discounted * quantity)
}

/// Renders an amount as dollars with exactly two decimals, e.g. `"$240.00"`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let mut cents = to_cents(amount);
    cents.rescale(2);
    format!("${cents}")
}
