//! Label text for the HUD
//!
//! Number formatting for the statistics panel and the lane counter, plus the
//! localization seam. Localized text is an opaque key → string lookup; the
//! host supplies the real table.

use std::collections::HashMap;

pub const KEY_MODE_MANUAL: &str = "tramline_mode_manual";
pub const KEY_MODE_SEMI: &str = "tramline_mode_semi";
pub const KEY_MODE_AUTO: &str = "tramline_mode_auto";

/// Key → display string lookup
pub trait Localization {
    /// Localized text for `key`, if the table has it
    fn lookup(&self, key: &str) -> Option<String>;

    /// Localized text for `key`, falling back to the key itself
    fn text(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_else(|| key.to_string())
    }
}

/// Built-in English labels
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocalization;

impl Localization for DefaultLocalization {
    fn lookup(&self, key: &str) -> Option<String> {
        let text = match key {
            KEY_MODE_MANUAL => "Manual",
            KEY_MODE_SEMI => "Semi-automatic",
            KEY_MODE_AUTO => "Automatic",
            _ => return None,
        };
        Some(text.to_string())
    }
}

impl Localization for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Format with a fixed number of decimals, rounding half away from zero
///
/// Rounding works on the shortest decimal form of the value (what `{}`
/// prints), so 1.005 becomes "1.01" even though its binary value sits just
/// below the midpoint.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    let kept = frac_part.len().min(decimals);
    digits.extend(frac_part[..kept].bytes());
    digits.resize(int_part.len() + decimals, b'0');

    if frac_part.len() > decimals && frac_part.as_bytes()[decimals] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|d| *d != b'0') {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| *d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
    }
    out
}

/// Round half away from zero at a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    format_fixed(value, decimals as usize).parse().unwrap_or(value)
}

/// `"<total>ha"` with one decimal
pub fn format_total_hectares(total: f64) -> String {
    format!("{}ha", format_fixed(total, 1))
}

/// `"<session>ha (<rate> ha/h)"` with two and one decimals
pub fn format_session_hectares(session: f64, rate: f64) -> String {
    format!("{}ha ({} ha/h)", format_fixed(session, 2), format_fixed(rate, 1))
}

/// `"<seed>l"` with two decimals
pub fn format_seed_usage(liters: f64) -> String {
    format!("{}l", format_fixed(liters, 2))
}

/// Number of working widths that fit into the tram line distance
///
/// No rounding is applied. The working width must be positive.
pub fn lanes_for_distance(distance: f64, working_width: f64) -> f64 {
    distance / working_width
}

/// `"<current lane> / <lanes for distance>"`
pub fn format_lane_counter(current_lane: i32, lanes: f64) -> String {
    format!("{} / {}", current_lane, lanes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hectare_formatting() {
        assert_eq!(format_total_hectares(12.34), "12.3ha");
        assert_eq!(format_total_hectares(0.0), "0.0ha");
        assert_eq!(format_session_hectares(1.005, 3.2), "1.01ha (3.2 ha/h)");
        assert_eq!(format_seed_usage(250.456), "250.46l");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(2.675, 2), 2.68);
        assert_eq!(round_to(-0.25, 1), -0.3);
        assert_eq!(round_to(1.005, 2), 1.01);
    }

    #[test]
    fn test_format_fixed_edges() {
        assert_eq!(format_fixed(1.005, 2), "1.01");
        assert_eq!(format_fixed(9.995, 2), "10.00");
        assert_eq!(format_fixed(99.96, 1), "100.0");
        assert_eq!(format_fixed(3.0, 2), "3.00");
        assert_eq!(format_fixed(-0.004, 2), "0.00");
        assert_eq!(format_fixed(-1.25, 1), "-1.3");
        assert_eq!(format_fixed(7.5, 0), "8");
        assert_eq!(format_fixed(f64::NAN, 1), "NaN");
    }

    #[test]
    fn test_lane_counter() {
        let lanes = lanes_for_distance(24.0, 6.0);
        assert_eq!(lanes, 4.0);
        assert_eq!(format_lane_counter(2, lanes), "2 / 4");

        let lanes = lanes_for_distance(20.0, 8.0);
        assert_eq!(format_lane_counter(1, lanes), "1 / 2.5");
    }

    #[test]
    fn test_localization_fallback() {
        let default = DefaultLocalization;
        assert_eq!(default.text(KEY_MODE_SEMI), "Semi-automatic");
        assert_eq!(default.text("unknown_key"), "unknown_key");

        let mut table = HashMap::new();
        table.insert(KEY_MODE_AUTO.to_string(), "Automatik".to_string());
        assert_eq!(table.text(KEY_MODE_AUTO), "Automatik");
        assert_eq!(table.text(KEY_MODE_MANUAL), KEY_MODE_MANUAL);
    }
}
