//! Presentation helpers: labels, colours and number formatting.
//!
//! The data model carries no presentation; everything that turns a
//! [`Direction`] or a P&L figure into text and colour lives here.

use ratatui::style::Color;
use rust_decimal::Decimal;

use crate::positions::Direction;

/// Label and colour for a position side.
pub fn direction_label(direction: Direction) -> (&'static str, Color) {
    match direction {
        Direction::Long => ("▲ LONG", Color::Green),
        Direction::Short => ("▼ SHORT", Color::Red),
    }
}

/// Green for flat or positive, red for negative.
pub fn signed_color(value: Decimal) -> Color {
    if value.is_sign_negative() && !value.is_zero() {
        Color::Red
    } else {
        Color::Green
    }
}

/// `$12,345.67`, `-$1,234.50`.
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(rounded.abs(), 2))
}

/// `+$150.00`, `-$42.10`.
pub fn format_signed_usd(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format_usd(rounded)
    } else {
        format!("+{}", format_usd(rounded))
    }
}

/// Position size with 4 decimals.
pub fn format_size(size: Decimal) -> String {
    format!("{:.4}", size.round_dp(4))
}

/// `+5.00%`, `-10.00%`.
pub fn format_percent(pct: Decimal) -> String {
    let rounded = pct.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded:.2}%")
    } else {
        format!("+{:.2}%", rounded.abs())
    }
}

/// `0x12345678...abcdef` for addresses longer than 16 characters.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 16 {
        return address.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{head}...{tail}")
}

/// Non-negative decimal with `dp` decimals and comma-grouped integer part.
fn group_thousands(value: Decimal, dp: usize) -> String {
    let text = format!("{value:.dp$}");
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(999.999)), "$1,000.00");
        assert_eq!(format_usd(dec!(12345.678)), "$12,345.68");
        assert_eq!(format_usd(dec!(1234567)), "$1,234,567.00");
        assert_eq!(format_usd(dec!(-1234.5)), "-$1,234.50");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_signed_usd() {
        assert_eq!(format_signed_usd(dec!(150)), "+$150.00");
        assert_eq!(format_signed_usd(dec!(-42.1)), "-$42.10");
        assert_eq!(format_signed_usd(dec!(0)), "+$0.00");
    }

    #[test]
    fn test_format_size_and_percent() {
        assert_eq!(format_size(dec!(2.5)), "2.5000");
        assert_eq!(format_size(dec!(0.123456)), "0.1235");
        assert_eq!(format_percent(dec!(-10)), "-10.00%");
        assert_eq!(format_percent(dec!(5)), "+5.00%");
    }

    #[test]
    fn test_direction_and_pnl_colors() {
        assert_eq!(direction_label(Direction::Long), ("▲ LONG", Color::Green));
        assert_eq!(direction_label(Direction::Short), ("▼ SHORT", Color::Red));
        assert_eq!(signed_color(dec!(-0.01)), Color::Red);
        assert_eq!(signed_color(dec!(0)), Color::Green);
        assert_eq!(signed_color(dec!(3)), Color::Green);
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x12345678...345678"
        );
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }
}
