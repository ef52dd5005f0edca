//! Rounding of owed amounts to the display unit.
//!
//! Owed amounts are computed at full precision. Rounding each one on its own
//! can make the displayed amounts add up to a cent more or less than the
//! rounded exact sum, so [`quantize_owed`] repairs the difference one atomic
//! unit at a time:
//! 1. Every amount is snapped to a guard scale, then rounded to the
//!    configured scale
//! 2. `V = Σ rounded - round(Σ exact)` is computed in atomic units
//! 3. `|V|` members receive a one-unit adjustment, picking those whose
//!    rounding moved them furthest in the direction of the violation

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::model::{Money, OwedAmounts};

/// Rounding mode for the final display step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (0.125 -> 0.13).
    #[default]
    HalfUp,
    /// Round half to even, banker's rounding (0.125 -> 0.12).
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// How amounts are rounded for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayContext {
    /// Number of decimal places of the atomic unit (2 for cents).
    pub scale: u32,
    pub rounding_mode: RoundingMode,
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self::cents()
    }
}

impl DisplayContext {
    pub fn cents() -> Self {
        Self {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
        }
    }

    pub fn with_rounding_mode(self, rounding_mode: RoundingMode) -> Self {
        Self {
            rounding_mode,
            ..self
        }
    }

    fn atomic_unit(self) -> Decimal {
        Decimal::new(1, self.scale)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DisplayRoundingError {
    #[error("owed amount for '{member}' is negative ({amount})")]
    NegativeAmount { member: String, amount: Money },
    #[error("display scale {scale} exceeds the supported maximum of {max_supported}")]
    UnsupportedScale { scale: u32, max_supported: u32 },
    #[error("rounding adjustment of {count} units cannot be spread over {member_count} members")]
    InvalidAdjustmentCount { count: i64, member_count: usize },
}

const MAX_DISPLAY_SCALE: u32 = 10;

/// Even splits keep 28 significant digits, so a sum of shares can sit a few
/// units in the last place below a midpoint that the unsplit amount hits
/// exactly. Amounts are snapped to this scale before display rounding.
const GUARD_SCALE: u32 = 20;

pub fn round_amount(amount: Money, context: DisplayContext) -> Money {
    let guarded = amount
        .as_decimal()
        .round_dp_with_strategy(GUARD_SCALE, RoundingStrategy::MidpointNearestEven);
    Money::from_decimal(
        guarded.round_dp_with_strategy(context.scale, context.rounding_mode.strategy()),
    )
}

/// Rounds every owed amount so that the rounded values add up to the rounded
/// exact sum.
///
/// Members keep their order. Ties between equally good adjustment candidates
/// go to the member listed first.
pub fn quantize_owed<'a>(
    owed: &OwedAmounts<'a>,
    context: DisplayContext,
) -> Result<OwedAmounts<'a>, DisplayRoundingError> {
    if context.scale > MAX_DISPLAY_SCALE {
        return Err(DisplayRoundingError::UnsupportedScale {
            scale: context.scale,
            max_supported: MAX_DISPLAY_SCALE,
        });
    }

    if let Some((member, amount)) = owed.iter().find(|(_, amount)| amount.is_negative()) {
        return Err(DisplayRoundingError::NegativeAmount {
            member: (*member).to_owned(),
            amount: *amount,
        });
    }

    let atomic_unit = context.atomic_unit();
    let exact_sum: Money = owed.values().sum();
    let target = round_amount(exact_sum, context);

    let mut entries: Vec<(&'a str, Money, Decimal)> = owed
        .iter()
        .map(|(member, amount)| {
            let rounded = round_amount(*amount, context);
            let diff = rounded.as_decimal() - amount.as_decimal();
            (*member, rounded, diff)
        })
        .collect();

    let rounded_sum: Money = entries.iter().map(|(_, rounded, _)| *rounded).sum();
    let violation = ((rounded_sum - target).as_decimal() / atomic_unit)
        .round()
        .to_i64()
        .ok_or(DisplayRoundingError::InvalidAdjustmentCount {
            count: i64::MAX,
            member_count: entries.len(),
        })?;

    if violation != 0 {
        let adjustment_count = violation.unsigned_abs() as usize;
        if adjustment_count > entries.len() {
            tracing::error!(
                violation,
                member_count = entries.len(),
                exact_sum = %exact_sum,
                rounded_sum = %rounded_sum,
                "Rounding adjustment exceeds member count"
            );
            return Err(DisplayRoundingError::InvalidAdjustmentCount {
                count: violation,
                member_count: entries.len(),
            });
        }

        // V > 0: take back from those who gained most; V < 0: give to those who lost most.
        let score_sign = if violation > 0 {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };
        let mut ranked: Vec<(usize, Decimal)> = entries
            .iter()
            .enumerate()
            .map(|(idx, (_, _, diff))| (idx, *diff * score_sign))
            .collect();
        ranked.sort_by(|(idx_a, score_a), (idx_b, score_b)| {
            score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
        });

        let adjustment = if violation > 0 {
            Money::from_decimal(-atomic_unit)
        } else {
            Money::from_decimal(atomic_unit)
        };
        let mut selected = Vec::with_capacity(adjustment_count);
        for (idx, _) in ranked.iter().take(adjustment_count) {
            entries[*idx].1 += adjustment;
            selected.push(entries[*idx].0);
        }

        tracing::debug!(
            violation,
            adjustment_count,
            selected = ?selected,
            exact_sum = %exact_sum,
            rounded_sum = %rounded_sum,
            target = %target,
            "Repaired display rounding drift"
        );
    }

    Ok(entries
        .into_iter()
        .map(|(member, rounded, _)| (member, rounded))
        .collect())
}
