use rust_decimal::Decimal;

/// Monetary amount in the depot's single working currency.
pub type Amount = Decimal;
