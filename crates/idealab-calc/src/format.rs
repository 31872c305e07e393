//! Display formatting for calculation results.

use crate::types::Value;

/// Render a value for display in an output slot.
pub fn display(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Text(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Integral values get thousands separators and no decimal point; anything
/// with a fractional part is fixed to two decimals.
pub fn format_number(n: f64) -> String {
    if n.fract() != 0.0 {
        return format!("{:.2}", n);
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{:.0}", n.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers_are_grouped() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(12000.0), "12,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn negatives_keep_sign() {
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.5), "-0.50");
    }

    #[test]
    fn fractions_use_two_decimals() {
        assert_eq!(format_number(2.5), "2.50");
        assert_eq!(format_number(1.0 / 3.0), "0.33");
        assert_eq!(format_number(1234.5), "1234.50");
    }

    #[test]
    fn non_numbers_use_natural_form() {
        assert_eq!(display(&Value::Text("Senior".into())), "Senior");
        assert_eq!(display(&Value::Bool(true)), "true");
        assert_eq!(display(&Value::Null), "null");
    }
}
