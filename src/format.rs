use crate::models::StreakSnapshot;
use serde::{Deserialize, Serialize};

/// Upper bound on a stored custom template, counted in chars so an emoji
/// costs one unit. Rendered output may exceed this once digits land.
pub const CUSTOM_MAX_CHARS: usize = 15;

/// Built-in display formats. Each pattern carries exactly one `%d`
/// placeholder bound to the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinFormat {
    Flame,
    Days,
    Streak,
    Plain,
}

impl BuiltinFormat {
    pub const ALL: [Self; 4] = [Self::Flame, Self::Days, Self::Streak, Self::Plain];

    pub fn pattern(self) -> &'static str {
        match self {
            Self::Flame => "\u{1f525} %d",
            Self::Days => "%d days",
            Self::Streak => "%d day streak",
            Self::Plain => "%d",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Flame => "flame",
            Self::Days => "days",
            Self::Streak => "streak",
            Self::Plain => "plain",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Flame => "Flame",
            Self::Days => "Days",
            Self::Streak => "Day streak",
            Self::Plain => "Number only",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|format| *format == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// How a snapshot is rendered: a built-in format tag, or a user-authored
/// pattern mixing literal text with `%d`, `%l`, `%t` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTemplate {
    Builtin(BuiltinFormat),
    Custom(String),
}

impl Default for DisplayTemplate {
    fn default() -> Self {
        Self::Builtin(BuiltinFormat::Flame)
    }
}

/// Accepted custom templates carry at least one placeholder; a pattern
/// without one would render the same text forever. Checked at the write
/// boundary, not by `render`.
pub fn has_placeholder(text: &str) -> bool {
    text.as_bytes()
        .windows(2)
        .any(|pair| pair[0] == b'%' && matches!(pair[1], b'd' | b'l' | b't'))
}

pub fn render(snapshot: &StreakSnapshot, template: &DisplayTemplate) -> String {
    match template {
        DisplayTemplate::Builtin(format) => substitute(format.pattern(), snapshot),
        DisplayTemplate::Custom(text) => substitute(text, snapshot),
    }
}

// Single left-to-right scan, so digits written for one placeholder are
// never re-read as part of another.
fn substitute(pattern: &str, snapshot: &StreakSnapshot) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('d') => {
                chars.next();
                out.push_str(&snapshot.current_streak.to_string());
            }
            Some('l') => {
                chars.next();
                out.push_str(&snapshot.longest_streak.to_string());
            }
            Some('t') => {
                chars.next();
                out.push_str(&snapshot.total_count.to_string());
            }
            _ => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current: u32, longest: u32, total: u64) -> StreakSnapshot {
        StreakSnapshot {
            current_streak: current,
            longest_streak: longest,
            total_count: total,
        }
    }

    #[test]
    fn custom_substitutes_all_three_placeholders() {
        let text = render(&snapshot(3, 10, 500), &DisplayTemplate::Custom("%d|%l|%t".into()));
        assert_eq!(text, "3|10|500");
    }

    #[test]
    fn bare_current_placeholder_round_trips() {
        let text = render(&snapshot(7, 9, 40), &DisplayTemplate::Custom("%d".into()));
        assert_eq!(text, "7");
    }

    #[test]
    fn literal_text_is_untouched() {
        let text = render(&snapshot(7, 9, 40), &DisplayTemplate::Custom("on a %d run!".into()));
        assert_eq!(text, "on a 7 run!");
    }

    #[test]
    fn placeholder_free_template_echoes_verbatim() {
        let text = render(&snapshot(7, 9, 40), &DisplayTemplate::Custom("no digits".into()));
        assert_eq!(text, "no digits");
    }

    #[test]
    fn unknown_escape_and_trailing_percent_pass_through() {
        let text = render(&snapshot(1, 2, 3), &DisplayTemplate::Custom("%x %d %".into()));
        assert_eq!(text, "%x 1 %");
    }

    #[test]
    fn substituted_digits_are_not_reinterpreted() {
        let text = render(&snapshot(2, 5, 1), &DisplayTemplate::Custom("%t%d".into()));
        assert_eq!(text, "12");
    }

    #[test]
    fn repeated_placeholder_substitutes_each_occurrence() {
        let text = render(&snapshot(4, 4, 4), &DisplayTemplate::Custom("%d+%d".into()));
        assert_eq!(text, "4+4");
    }

    #[test]
    fn builtins_bind_current_streak_only() {
        let snap = snapshot(12, 30, 999);
        for format in BuiltinFormat::ALL {
            let text = render(&snap, &DisplayTemplate::Builtin(format));
            assert!(text.contains("12"), "{format:?} missed the streak: {text}");
            assert!(!text.contains("30"));
            assert!(!text.contains("999"));
        }
    }

    #[test]
    fn builtin_cycle_visits_every_format_and_wraps() {
        let mut format = BuiltinFormat::Flame;
        let mut seen = Vec::new();
        for _ in 0..BuiltinFormat::ALL.len() {
            seen.push(format);
            format = format.next();
        }
        assert_eq!(seen, BuiltinFormat::ALL);
        assert_eq!(format, BuiltinFormat::Flame);
    }

    #[test]
    fn placeholder_detection() {
        assert!(has_placeholder("%d"));
        assert!(has_placeholder("best %l of %t"));
        assert!(!has_placeholder("plain text"));
        assert!(!has_placeholder("%x%"));
        assert!(!has_placeholder(""));
    }

    #[test]
    fn template_tags_serialize_tagged() {
        let builtin = serde_json::to_string(&DisplayTemplate::Builtin(BuiltinFormat::Days)).unwrap();
        assert_eq!(builtin, r#"{"builtin":"days"}"#);
        let custom: DisplayTemplate = serde_json::from_str(r#"{"custom":"%d!"}"#).unwrap();
        assert_eq!(custom, DisplayTemplate::Custom("%d!".into()));
    }
}
