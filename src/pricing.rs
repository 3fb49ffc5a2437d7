//! Inverse target transform and price presentation.
//!
//! The pipeline regresses on log1p(price), so the raw output is mapped back
//! with `exp(y) - 1`, clamped at zero (linear extrapolation can go negative),
//! and rounded to the nearest 100 EUR for display.

use serde::Serialize;

pub const PREMIUM_FLOOR_EUR: f64 = 100_000.0;
pub const MID_RANGE_FLOOR_EUR: f64 = 45_000.0;

/// Display bucket for a rounded price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Budget,
    #[serde(rename = "Mid-Range")]
    MidRange,
    Premium,
}

impl Tier {
    pub fn for_price(rounded_eur: f64) -> Self {
        if rounded_eur >= PREMIUM_FLOOR_EUR {
            Tier::Premium
        } else if rounded_eur >= MID_RANGE_FLOOR_EUR {
            Tier::MidRange
        } else {
            Tier::Budget
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Budget => "Budget",
            Tier::MidRange => "Mid-Range",
            Tier::Premium => "Premium",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Tier::Budget => "Budget-Friendly EV",
            Tier::MidRange => "Mid-Range Market EV",
            Tier::Premium => "Premium Segment EV",
        }
    }

    pub fn accent_color(self) -> &'static str {
        match self {
            Tier::Budget => "#8b0000",
            Tier::MidRange => "#ff8c00",
            Tier::Premium => "#008000",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::Budget => "\u{1f4b8}",
            Tier::MidRange => "\u{1f4c8}",
            Tier::Premium => "\u{1f48e}",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PriceEstimate {
    /// Price after the inverse transform and the zero clamp, before rounding.
    pub raw_eur: f64,
    /// Rounded to the nearest 100 EUR; what the user sees.
    pub rounded_eur: f64,
    pub tier: Tier,
}

/// Map the regression output (log1p space) to a displayable estimate.
pub fn estimate(y_log1p: f64) -> PriceEstimate {
    let raw_eur = y_log1p.exp_m1().max(0.0);
    let rounded_eur = (raw_eur / 100.0).round() * 100.0;
    PriceEstimate {
        raw_eur,
        rounded_eur,
        tier: Tier::for_price(rounded_eur),
    }
}

/// `59900.0` -> `"59,900 €"`. Rounded prices are exact multiples of 100, so
/// the integer cast loses nothing.
pub fn format_eur(rounded_eur: f64) -> String {
    let s = (rounded_eur as u64).to_string();
    let mut grouped = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = grouped.chars().rev().collect();
    out.push_str(" \u{20ac}");
    out
}
