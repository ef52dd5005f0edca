#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Assignment, Item, MemberSet, Money, OwedAmounts, Receipt, ReceiptBuildError, Roster,
    RosterError, SplitInput, SurchargeFlags, SurchargeRateError, SurchargeRates,
};
pub use services::{
    AllocationCalculator, AllocationError, DisplayContext, DisplayRoundingError, RoundingMode,
    TotalCalculator,
};
