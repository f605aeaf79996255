use super::rolls::RollFailure;
use thiserror::Error;

/// More options than this are cut off.
pub const MAX_CHOICES: usize = 50;

/// Splits the options of a choice. Newlines take precedence over `|`, which
/// takes precedence over `,`. Blank entries are dropped.
pub fn parse_choices(text: &str) -> Vec<String> {
    let raw = text.trim();
    let parts: Vec<&str> = if raw.contains('\n') {
        raw.lines().collect()
    } else if raw.contains('|') {
        raw.split('|').collect()
    } else {
        raw.split(',').collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(MAX_CHOICES)
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub options: Vec<String>,
    pub pick: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("give at least two options, e.g. `A,B,C`")]
    TooFewOptions,
    #[error(transparent)]
    Roller(#[from] RollFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_separators() {
        assert_eq!(parse_choices("A,B,C"), strings(&["A", "B", "C"]));
        assert_eq!(parse_choices(" A | B,1 | C "), strings(&["A", "B,1", "C"]));
        assert_eq!(
            parse_choices("first, with comma\nsecond | bar\r\nthird"),
            strings(&["first, with comma", "second | bar", "third"])
        );
    }

    #[test]
    fn test_blank_entries() {
        assert_eq!(parse_choices(""), Vec::<String>::new());
        assert_eq!(parse_choices("  "), Vec::<String>::new());
        assert_eq!(parse_choices("A,,  ,B,"), strings(&["A", "B"]));
        assert_eq!(parse_choices("\n\nA\n\n"), strings(&["A"]));
    }

    #[test]
    fn test_limit() {
        let many: Vec<String> = (0..80).map(|i| i.to_string()).collect();
        let parsed = parse_choices(&many.join(","));
        assert_eq!(parsed.len(), MAX_CHOICES);
        assert_eq!(parsed[49], "49");
    }
}
