mod amount;
mod errors;
mod format;

pub use amount::Amount;
pub use errors::AmountError;
pub use format::{format_currency, format_integer, format_percentage};
