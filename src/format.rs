//! Display Formatting
//!
//! Pure helpers used by the presentational components.

use chrono::{DateTime, Datelike, Utc};

use crate::models::Note;

/// First letter of the first two words, uppercased ("ada lovelace" -> "AL")
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First `max_chars` characters of `content`
pub fn preview(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((end, _)) => &content[..end],
        None => content,
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long date, e.g. "October 19th, 2026"
pub fn format_long_date(date: DateTime<Utc>) -> String {
    let day = date.day();
    format!("{} {}{}, {}", date.format("%B"), day, ordinal_suffix(day), date.year())
}

/// Card date; notes without one show today
pub fn note_date(note: &Note, now: DateTime<Utc>) -> String {
    format_long_date(note.date.unwrap_or(now))
}

/// Case-insensitive match on title, content or any tag. Empty query keeps all.
pub fn filter_notes(notes: &[Note], query: &str) -> Vec<Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.to_vec();
    }
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
                || note.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: u32, title: &str, content: &str, tags: &[&str]) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_pinned: false,
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("Grace Brewster Hopper"), "GB");
        assert_eq!(initials("  plato "), "P");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        assert_eq!(preview(&long, 100).chars().count(), 100);
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn test_long_date() {
        let date = |d| Utc.with_ymd_and_hms(2026, 10, d, 9, 0, 0).unwrap();
        assert_eq!(format_long_date(date(19)), "October 19th, 2026");
        assert_eq!(format_long_date(date(1)), "October 1st, 2026");
        assert_eq!(format_long_date(date(2)), "October 2nd, 2026");
        assert_eq!(format_long_date(date(3)), "October 3rd, 2026");
        assert_eq!(format_long_date(date(11)), "October 11th, 2026");
        assert_eq!(format_long_date(date(12)), "October 12th, 2026");
        assert_eq!(format_long_date(date(22)), "October 22nd, 2026");
    }

    #[test]
    fn test_missing_date_uses_now() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        assert_eq!(note_date(&note(1, "a", "b", &[]), now), "October 19th, 2026");
    }

    #[test]
    fn test_filter_notes() {
        let notes = vec![
            note(1, "Groceries", "milk", &["home"]),
            note(2, "Sprint", "demo prep", &["Work"]),
            note(3, "Ideas", "work on garden", &[]),
        ];

        let ids = |found: Vec<Note>| found.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_notes(&notes, "WORK")), vec![2, 3]);
        assert_eq!(ids(filter_notes(&notes, "groc")), vec![1]);
        assert_eq!(ids(filter_notes(&notes, "  ")), vec![1, 2, 3]);
        assert!(filter_notes(&notes, "zzz").is_empty());
    }
}
