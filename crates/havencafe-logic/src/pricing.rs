//! Pure pricing logic - dish prices, ingredient resale, and tips.

/// Price multiplier for a dish quality star rating (1-5).
pub fn quality_multiplier(quality: u8) -> f32 {
    match quality.clamp(1, 5) {
        1 => 0.6,
        2 => 0.8,
        3 => 1.0,
        4 => 1.25,
        _ => 1.5,
    }
}

/// Reputation price bonus: +5% per full 100 reputation points.
pub fn reputation_multiplier(reputation: u32) -> f32 {
    1.0 + (reputation / 100) as f32 * 0.05
}

/// Final selling price for a dish.
pub fn dish_price(base_price: u32, quality: u8, reputation: u32) -> u32 {
    let price = base_price as f32 * quality_multiplier(quality) * reputation_multiplier(reputation);
    (price as u32).max(1)
}

/// Resale price for a raw ingredient. Ingredients sell at 70% of value,
/// scaled by the item's quality multiplier (0.7-1.3).
pub fn ingredient_sell_price(base_price: u32, quality: f32) -> u32 {
    ((base_price as f32 * quality * 0.7) as u32).max(1)
}

const TIP_BASE_PERCENT: f32 = 0.10;
const TIP_SATISFACTION_BONUS: f32 = 0.05;
const TIP_MAX_PERCENT: f32 = 0.30;

/// Tip for a dish, based on satisfaction (1.0-5.0). Customers below
/// neutral satisfaction leave nothing.
pub fn tip(dish_price: u32, satisfaction: f32) -> u32 {
    if satisfaction < 3.0 {
        return 0;
    }
    let mut percent = TIP_BASE_PERCENT;
    if satisfaction > 3.0 {
        percent += (satisfaction - 3.0) * TIP_SATISFACTION_BONUS;
    }
    (dish_price as f32 * percent.min(TIP_MAX_PERCENT)) as u32
}

/// Reputation delta when a customer leaves, keyed on satisfaction.
pub fn reputation_change(satisfaction: f32) -> i32 {
    if satisfaction >= 5.0 {
        5
    } else if satisfaction >= 4.0 {
        3
    } else if satisfaction >= 2.0 {
        0
    } else {
        -5
    }
}
