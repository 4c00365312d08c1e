// Money and percentage formatting shared by the presenters

/// `$1,234.56` style, with a leading minus for negatives.
pub fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, whole, cents % 100)
}

/// Whole-number percentage, like the static pie chart labels.
pub fn percent_rounded(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// One decimal place, like the interactive hover text.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

/// Horizontal bar scaled to `max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(-1513.38), "-$1,513.38");
        assert_eq!(money(1_000_000.0), "$1,000,000.00");
        assert_eq!(money(999.999), "$1,000.00");
        assert_eq!(money(-0.001), "$0.00");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(percent_rounded(82.42), "82%");
        assert_eq!(percent_rounded(1.5), "2%");
        assert_eq!(percent(16.483), "16.5%");
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 5);
        assert_eq!(bar(0.1, 100.0, 10).chars().count(), 1);
        assert_eq!(bar(100.0, 100.0, 10).chars().count(), 10);
        assert_eq!(bar(0.0, 100.0, 10), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Subscriptions and memberships", 10), "Subscri...");
    }
}
