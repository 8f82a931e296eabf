//! Rounding shared by every figure shown to a driver.

/// Round to one decimal place, the precision used for kilometres.
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to the u32 range before the cast"
)]
fn saturating_round(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Round to whole minutes, saturating at the ends of the `u32` range.
pub(crate) fn whole_minutes(value: f64) -> u32 {
    saturating_round(value)
}

/// Round to a whole percentage.
pub(crate) fn whole_percent(value: f64) -> u32 {
    saturating_round(value)
}

/// Round to whole minutes keeping the sign, for deltas.
#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the i32 range before the cast"
)]
pub(crate) fn signed_minutes(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value
        .round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.04, 1.0)]
    #[case(1.05, 1.1)]
    #[case(12.349, 12.3)]
    #[case(-0.26, -0.3)]
    fn rounds_to_tenths(#[case] input: f64, #[case] expected: f64) {
        assert!((round_tenth(input) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(2.5, 3)]
    #[case(-4.0, 0)]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, u32::MAX)]
    fn whole_minutes_saturates(#[case] input: f64, #[case] expected: u32) {
        assert_eq!(whole_minutes(input), expected);
    }

    #[rstest]
    #[case(-3.4, -3)]
    #[case(7.6, 8)]
    fn signed_minutes_keeps_sign(#[case] input: f64, #[case] expected: i32) {
        assert_eq!(signed_minutes(input), expected);
    }
}
