use super::domain::{PriceAdvice, PriceInput};
use super::tables::{round_half_up, sector_base_price};

pub(crate) const DISCOUNTED_VINTAGE_BEFORE: i32 = 2022;

const SDG_BONUS_PER_GOAL: f64 = 15.0;
const VINTAGE_DISCOUNT: f64 = -50.0;
const RANGE_LOW: f64 = 0.85;
const RANGE_HIGH: f64 = 1.15;

/// Suggest a per-credit price. The result is not floored at zero.
pub fn suggest_price(input: &PriceInput) -> PriceAdvice {
    let base = sector_base_price(&input.sector);
    let score_multiplier = 0.8 + (f64::from(input.integrity_score) / 100.0) * 0.4;
    let sdg_bonus = input.sdg_goals.len() as f64 * SDG_BONUS_PER_GOAL;
    let vintage_discount = if input.vintage < DISCOUNTED_VINTAGE_BEFORE {
        VINTAGE_DISCOUNT
    } else {
        0.0
    };

    let suggested_price = round_half_up(base * score_multiplier + sdg_bonus + vintage_discount);
    let suggested = suggested_price as f64;

    PriceAdvice {
        suggested_price,
        price_range: (
            round_half_up(suggested * RANGE_LOW),
            round_half_up(suggested * RANGE_HIGH),
        ),
    }
}
