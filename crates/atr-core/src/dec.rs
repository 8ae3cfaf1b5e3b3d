// ─────────────────────────────────────────────────────────────────
// Truncating fixed-point helpers
// ─────────────────────────────────────────────────────────────────
// Every replica must compute bit-identical allocations from the same
// votes, so all multiply/divide steps truncate toward zero at a fixed
// number of fractional digits. Truncation (never rounding up) also
// guarantees that the sum of the parts never exceeds the whole.
// ─────────────────────────────────────────────────────────────────

use rust_decimal::Decimal;

/// Fractional digits carried by internal bookkeeping amounts.
pub const DECIMAL_PLACES: u32 = 18;

/// `a × b`, truncated toward zero at [`DECIMAL_PLACES`] fractional digits.
pub fn mul_truncate(a: Decimal, b: Decimal) -> Decimal {
    (a * b).trunc_with_scale(DECIMAL_PLACES)
}

/// `a ÷ b`, truncated toward zero at [`DECIMAL_PLACES`] fractional digits.
/// Division by zero is a caller bug; the engine guards the zero-power
/// case before ever dividing.
pub fn quo_truncate(a: Decimal, b: Decimal) -> Decimal {
    (a / b).trunc_with_scale(DECIMAL_PLACES)
}
