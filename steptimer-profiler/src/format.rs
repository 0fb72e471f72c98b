//! Number formatting and column layout shared by [`Timer`](crate::Timer)
//! and [`Step`](crate::Step) dumps.

/// Decimals printed for every time value in a dump
pub const TIME_DECIMALS: usize = 3;

/// Width of the elapsed and duration numbers, brackets excluded
pub const TIME_WIDTH: usize = TIME_DECIMALS + 5;

/// Width of a bracketed time column
pub const COLUMN_WIDTH: usize = TIME_WIDTH + 2;

/// Width reserved for a label when it is followed by info
pub const LABEL_WIDTH: usize = 20;

/// Left margin of message lines and nested timer titles, both time columns and their separators
pub const MARGIN_WIDTH: usize = (TIME_DECIMALS + 5 + 3) * 2;

/// Formats `value` with a fixed number of decimals, grouping the integer
/// part with `thousands` when given.
///
/// Rounds half away from zero, and a value that rounds to zero never keeps
/// its minus sign.
pub fn number_format(value: f64, decimals: usize, thousands: Option<char>) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let factor = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let digits = format!("{:.*}", decimals, rounded);

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);

    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }

    let len = integer.len();
    for (index, digit) in integer.chars().enumerate() {
        if let Some(separator) = thousands {
            if index > 0 && (len - index) % 3 == 0 {
                out.push(separator);
            }
        }

        out.push(digit);
    }

    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

/// Formats seconds the way step columns show them (`1,234.500`)
pub fn seconds(value: f64) -> String {
    number_format(value, TIME_DECIMALS, Some(','))
}

/// Formats seconds the way timer totals show them (`1234.500`)
pub fn total_seconds(value: f64) -> String {
    number_format(value, TIME_DECIMALS, None)
}

/// Removes the console markup tags (`<info>`, `<comment>`, `</>`) from a dump line
pub fn strip_markup(line: &str) -> String {
    line.replace("<info>", "")
        .replace("<comment>", "")
        .replace("</>", "")
}
