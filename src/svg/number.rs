//! Compact number formatting shared by the path and transform rewriters.

/// Round `value` to `precision` decimal places.
pub fn round(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a number as briefly as possible: `0.50` → `.5`, `-0.25` → `-.25`.
pub fn format(value: f64, precision: u8) -> String {
    let rounded = round(value, precision);
    let mut text = format!("{:.*}", precision as usize, rounded);

    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }

    if let Some(rest) = text.strip_prefix("0.") {
        text = format!(".{}", rest);
    } else if let Some(rest) = text.strip_prefix("-0.") {
        text = format!("-.{}", rest);
    }

    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Append `number` to `out`, adding a separator only where one is needed.
pub fn push_number(out: &mut String, number: &str) {
    let needs_space = match out.chars().last() {
        None => false,
        Some(last) if last.is_ascii_alphabetic() && last != 'e' => false,
        Some(_) if number.starts_with('-') => false,
        Some(_) if number.starts_with('.') => {
            let previous = last_number(out);
            !(previous.contains('.') && !previous.contains('e'))
        }
        Some(_) => true,
    };
    if needs_space {
        out.push(' ');
    }
    out.push_str(number);
}

/// Parse a list of numbers separated by whitespace and/or commas.
pub fn parse_list(text: &str) -> Option<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok())
        .collect()
}

fn last_number(out: &str) -> &str {
    let start = out
        .rfind(|c: char| !(c.is_ascii_digit() || c == '.' || c == 'e' || c == '-'))
        .map(|i| i + 1)
        .unwrap_or(0);
    let tail = &out[start..];
    // A minus sign in the middle starts a new number.
    match tail.rfind('-') {
        Some(i) if i > 0 && !tail[..i].ends_with('e') => &tail[i..],
        _ => tail,
    }
}
