pub mod allocation_calculator;
pub mod display_rounding;
pub mod total_calculator;

pub use allocation_calculator::{AllocationCalculator, AllocationError};
pub use display_rounding::{
    DisplayContext, DisplayRoundingError, RoundingMode, quantize_owed, round_amount,
};
pub use total_calculator::TotalCalculator;
