//! Number formatting for rendered statements and reports

/// Money figure at two decimal places
///
/// Rounds to the nearest cent of the exact binary value. A value lying
/// exactly halfway between two cents rounds away from zero.
///
/// # Example
/// ```
/// use commission_engine_core_rs::statements::format::format_money;
///
/// assert_eq!(format_money(0.3), "0.30");
/// assert_eq!(format_money(30_000.0), "30000.00");
/// assert_eq!(format_money(0.125), "0.13");
/// // 0.075 is stored just below the halfway point
/// assert_eq!(format_money(0.075), "0.07");
/// ```
pub fn format_money(value: f64) -> String {
    match halfway_cents(value) {
        Some(cents) => {
            let sign = if value < 0.0 { "-" } else { "" };
            format!("{}{}.{:02}", sign, cents / 100, cents % 100)
        }
        None => format!("{:.2}", value),
    }
}

/// Value as persisted: the nearest `f64` to its two-decimal rendering
///
/// # Example
/// ```
/// use commission_engine_core_rs::statements::format::round_money;
///
/// assert_eq!(round_money(0.125), 0.13);
/// assert_eq!(round_money(0.30000000000000004), 0.3);
/// ```
pub fn round_money(value: f64) -> f64 {
    format_money(value).parse().unwrap_or(value)
}

/// Cent count rounded up in magnitude, if `value` sits exactly on a half cent
///
/// `{:.40}` prints the exact expansion for any double near a half cent, so
/// a tie shows as a `5` followed only by zeros.
fn halfway_cents(value: f64) -> Option<u128> {
    if !value.is_finite() {
        return None;
    }

    let exact = format!("{:.40}", value.abs());
    let (int_part, frac_part) = exact.split_once('.')?;
    let (cents, rest) = frac_part.split_at(2);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return None;
    }

    format!("{}{}", int_part, cents)
        .parse::<u128>()
        .ok()
        .map(|c| c + 1)
}

/// Shortest plain rendering (`2.5`, `3`, `600000`)
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Integer digits grouped in threes with `separator`; any fraction is kept as-is
///
/// # Example
/// ```
/// use commission_engine_core_rs::statements::format::format_grouped;
///
/// assert_eq!(format_grouped(300_000.0, '_'), "300_000");
/// assert_eq!(format_grouped(1_500_000.5, ','), "1,500,000.5");
/// assert_eq!(format_grouped(999.0, '_'), "999");
/// ```
pub fn format_grouped(value: f64, separator: char) -> String {
    let plain = format_number(value);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    format!("{}{}{}", sign, group_digits(int_part, separator), frac_part)
}

/// Money figure with thousands grouping and two decimals (`1,234.56`)
pub fn format_money_grouped(value: f64, separator: char) -> String {
    let fixed = format_money(value.abs());
    let (int_part, frac_part) = fixed.split_at(fixed.len() - 3);
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{}{}{}", sign, group_digits(int_part, separator), frac_part)
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_lengths() {
        assert_eq!(format_grouped(0.0, '_'), "0");
        assert_eq!(format_grouped(1_000.0, '_'), "1_000");
        assert_eq!(format_grouped(12_345.0, '_'), "12_345");
        assert_eq!(format_grouped(123_456.0, '_'), "123_456");
        assert_eq!(format_grouped(1_234_567.0, '_'), "1_234_567");
    }

    #[test]
    fn test_grouping_negative() {
        assert_eq!(format_grouped(-1_500_000.0, '_'), "-1_500_000");
    }

    #[test]
    fn test_number_drops_trailing_zero() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(600_000.0), "600000");
    }

    #[test]
    fn test_money_halfway_rounds_away_from_zero() {
        assert_eq!(format_money(0.125), "0.13");
        assert_eq!(format_money(-0.125), "-0.13");
        assert_eq!(format_money(1.125), "1.13");
        assert_eq!(format_money(0.005), "0.01");
        assert_eq!(format_money(62_500.125), "62500.13");
    }

    #[test]
    fn test_money_below_halfway_rounds_down() {
        // Stored as 1.00499..., 2.67499..., 0.07499...
        assert_eq!(format_money(1.005), "1.00");
        assert_eq!(format_money(2.675), "2.67");
        assert_eq!(format_money(0.075), "0.07");
        assert_eq!(format_money(0.1 + 0.2), "0.30");
    }

    #[test]
    fn test_round_money_matches_rendering() {
        for value in [0.125, 0.075, 1.005, 0.30000000000000004, 75_000.0, -2.345] {
            assert_eq!(format_money(round_money(value)), format_money(value));
        }
        assert_eq!(round_money(0.125), 0.13);
        assert_eq!(round_money(75_000.0), 75_000.0);
    }

    #[test]
    fn test_money_grouped() {
        assert_eq!(format_money_grouped(1_234.5, ','), "1,234.50");
        assert_eq!(format_money_grouped(75_000.0, ','), "75,000.00");
        assert_eq!(format_money_grouped(0.5, ','), "0.50");
        assert_eq!(format_money_grouped(-2_000.0, ','), "-2,000.00");
    }
}
