use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Assert two decimals agree to eight places.
pub fn assert_close(actual: Decimal, expected: Decimal) {
    assert!(
        (actual - expected).abs() < dec!(0.00000001),
        "expected {expected}, got {actual}"
    );
}

/// n choose 2.
pub fn pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
