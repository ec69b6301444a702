//! Pixel to viewport arithmetic.

use crate::matcher::UnitMatch;

/// Round `number` to `precision` fractional digits.
///
/// The value is first floored at `precision + 1` digits and only then
/// rounded to `precision`, so binary representation noise past the extra
/// digit can never bump the last kept digit.
///
/// # Example
///
/// ```
/// use horizon_lattice_viewport::convert::to_fixed;
///
/// assert_eq!(to_fixed(4.6875, 2), 4.69);
/// assert_eq!(to_fixed(2.816901408450704, 5), 2.8169);
/// ```
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let exponent = i32::try_from(precision).unwrap_or(i32::MAX).saturating_add(1);
    let multiplier = 10f64.powi(exponent);
    let whole = (number * multiplier).floor();
    (whole / 10.0).round() * 10.0 / multiplier
}

/// Express `pixels` as a percentage of `reference`, rounded with
/// [`to_fixed`].
pub fn px_to_viewport(pixels: f64, reference: f64, precision: u32) -> f64 {
    to_fixed(pixels / reference * 100.0, precision)
}

/// Print a converted length. Zero prints as a bare `0`.
pub fn format_length(value: f64, unit: &str) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}{}", value, unit)
    }
}

/// Parameters for rewriting unit tokens into one viewport unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion<'a> {
    /// Unit to emit (`vw`, `vh`, `vmin`, `vmax`).
    pub unit: &'a str,
    /// Reference viewport size in pixels.
    pub reference: f64,
    /// Fractional digits to keep.
    pub precision: u32,
    /// Tokens whose magnitude is at or below this are left alone.
    pub min_pixel_value: f64,
}

impl Conversion<'_> {
    /// Rewrite one matched token, or return `None` to keep it as written.
    pub fn apply(&self, token: &UnitMatch<'_>) -> Option<String> {
        let pixels: f64 = token.number.parse().ok()?;
        if pixels <= self.min_pixel_value {
            return None;
        }

        let converted = px_to_viewport(pixels, self.reference, self.precision);
        let length = format_length(converted, self.unit);
        if token.negative && converted != 0.0 {
            Some(format!("-{}", length))
        } else {
            Some(length)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::UnitPattern;

    fn convert_text(text: &str, conversion: Conversion<'_>) -> String {
        let pattern = UnitPattern::new("px").unwrap();
        pattern
            .replace_all(text, |token| conversion.apply(token))
            .into_owned()
    }

    fn vw(reference: f64, precision: u32, min_pixel_value: f64) -> Conversion<'static> {
        Conversion {
            unit: "vw",
            reference,
            precision,
            min_pixel_value,
        }
    }

    #[test]
    fn reference_widths() {
        assert_eq!(px_to_viewport(15.0, 320.0, 5), 4.6875);
        assert_eq!(px_to_viewport(15.0, 480.0, 5), 3.125);
        assert_eq!(px_to_viewport(16.0, 568.0, 5), 2.8169);
        assert_eq!(px_to_viewport(5.0, 568.0, 5), 0.88028);
        assert_eq!(px_to_viewport(15.0, 568.0, 5), 2.64085);
        assert_eq!(px_to_viewport(15.0, 768.0, 5), 1.95313);
    }

    #[test]
    fn floors_before_rounding() {
        assert_eq!(to_fixed(1.2345, 3), 1.235);
        assert_eq!(to_fixed(1.23449, 3), 1.234);
        assert_eq!(to_fixed(0.125, 2), 0.13);
        assert_eq!(to_fixed(4.6875, 2), 4.69);
    }

    #[test]
    fn huge_precision_does_not_overflow() {
        assert!(!to_fixed(2.5, i32::MAX as u32).is_finite());
        assert!(!to_fixed(2.5, u32::MAX).is_finite());
    }

    #[test]
    fn results_have_bounded_digits() {
        for pixels in 1..200 {
            let value = px_to_viewport(pixels as f64 + 0.37, 375.0, 3);
            let text = value.to_string();
            let digits = text.split('.').nth(1).map_or(0, str::len);
            assert!(digits <= 3, "{} has too many digits", text);
        }
    }

    #[test]
    fn zero_is_unitless() {
        assert_eq!(format_length(0.0, "vw"), "0");
        assert_eq!(convert_text("0.001px", vw(320.0, 2, 0.0)), "0");
        assert_eq!(convert_text("-0.001px", vw(320.0, 2, 0.0)), "0");
    }

    #[test]
    fn threshold_keeps_small_values() {
        assert_eq!(convert_text("1px solid #000", vw(320.0, 5, 1.0)), "1px solid #000");
        assert_eq!(convert_text("1px 10px", vw(320.0, 5, 2.0)), "1px 3.125vw");
    }

    #[test]
    fn negative_values_use_magnitude() {
        assert_eq!(
            convert_text("0.5rem .5px -0.2px -.2em", vw(320.0, 5, 0.0)),
            "0.5rem 0.15625vw -0.0625vw -.2em"
        );
    }
}
