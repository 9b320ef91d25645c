//! Parsing of the `ollama list` table.
//!
//! ```text
//! NAME                     ID              SIZE      MODIFIED
//! llama3.2:3b              a80c4f17acd5    2.0 GB    3 weeks ago
//! nomic-embed-text:latest  0a109f422b47    274 MB    2 months ago
//! ```

use lmarc_domain::inventory::ModelEntry;
use lmarc_domain::round2;

const HEADER: &str = "NAME";

/// Decimal units, as the listing prints them.
const UNITS: [(&str, f64); 5] =
    [("B", 1e-9), ("KB", 1e-6), ("MB", 1e-3), ("GB", 1.0), ("TB", 1e3)];

/// Parses the listing into entries, in listing order.
///
/// Lines that carry nothing but a name still yield an entry. Sizes are converted
/// to GB and rounded to two decimals.
#[must_use]
pub fn parse_listing(stdout: &str) -> Vec<ModelEntry> {
    let mut lines = stdout.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();
    if lines.peek().is_some_and(|first| first.split_whitespace().next() == Some(HEADER)) {
        lines.next();
    }

    lines.filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ModelEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (name, rest) = tokens.split_first()?;

    let mut entry = ModelEntry::new(*name);
    entry.purpose = infer_purpose(name).map(str::to_owned);

    let Some((id, rest)) = rest.split_first() else {
        return Some(entry);
    };
    entry.id = Some((*id).to_owned());

    let (size, rest) = match rest {
        [value, unit, tail @ ..] if size_in_gb(value, unit).is_some() => {
            (size_in_gb(value, unit), tail)
        },
        [joined, tail @ ..] => match split_joined(joined) {
            Some((value, unit)) => (size_in_gb(value, unit), tail),
            None => (None, rest),
        },
        [] => (None, rest),
    };
    entry.size_gb = size;

    if !rest.is_empty() {
        entry.modified = Some(rest.join(" "));
    }
    Some(entry)
}

fn size_in_gb(value: &str, unit: &str) -> Option<f64> {
    let value: f64 = value.parse().ok()?;
    let factor = UNITS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(unit))
        .map(|(_, factor)| *factor)?;
    Some(round2(value * factor))
}

/// `4.7GB` -> (`4.7`, `GB`).
fn split_joined(token: &str) -> Option<(&str, &str)> {
    let at = token.find(|c: char| c.is_ascii_alphabetic())?;
    (at > 0).then(|| token.split_at(at))
}

/// Guesses what a model is for from its name.
#[must_use]
pub fn infer_purpose(name: &str) -> Option<&'static str> {
    const RULES: &[(&[&str], &str)] = &[
        (&["embed", "bge", "minilm"], "Text embeddings"),
        (&["coder", "code", "starcoder", "codestral"], "Code generation"),
        (&["llava", "vision", "moondream", "-vl", "bakllava"], "Vision / multimodal"),
        (&["-r1", "qwq", "reason", "think"], "Reasoning"),
        (&["llama", "mistral", "gemma", "qwen", "phi", "deepseek", "tinyllama", "granite"], "General chat"),
    ];

    let name = name.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(_, purpose)| *purpose)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
NAME                       ID              SIZE      MODIFIED
llama3.2:3b                a80c4f17acd5    2.0 GB    3 weeks ago
nomic-embed-text:latest    0a109f422b47    274 MB    2 months ago
qwen2.5-coder:7b           2b0496514337    4.7 GB    5 days ago

";

    #[test]
    fn parses_columns_and_converts_units() {
        let entries = parse_listing(LISTING);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "llama3.2:3b");
        assert_eq!(entries[0].id.as_deref(), Some("a80c4f17acd5"));
        assert_eq!(entries[0].size_gb, Some(2.0));
        assert_eq!(entries[0].modified.as_deref(), Some("3 weeks ago"));

        assert_eq!(entries[1].size_gb, Some(0.27));
        assert_eq!(entries[2].purpose.as_deref(), Some("Code generation"));
    }

    #[test]
    fn name_only_lines_still_yield_entries() {
        let entries = parse_listing("NAME ID SIZE MODIFIED\nmystery-model\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "mystery-model");
        assert!(entries[0].id.is_none() && entries[0].size_gb.is_none());
    }

    #[test]
    fn joined_units_and_missing_sizes() {
        let entries = parse_listing("phi3:mini abc123 2.2GB now\ngemma:2b def456 yesterday\n");
        assert_eq!(entries[0].size_gb, Some(2.2));
        assert_eq!(entries[0].modified.as_deref(), Some("now"));
        assert_eq!(entries[1].size_gb, None);
        assert_eq!(entries[1].modified.as_deref(), Some("yesterday"));
    }

    #[test]
    fn empty_listing_has_no_entries() {
        assert!(parse_listing("NAME    ID    SIZE    MODIFIED\n").is_empty());
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn purposes_follow_keywords() {
        assert_eq!(infer_purpose("nomic-embed-text:latest"), Some("Text embeddings"));
        assert_eq!(infer_purpose("llava:7b"), Some("Vision / multimodal"));
        assert_eq!(infer_purpose("deepseek-r1:8b"), Some("Reasoning"));
        assert_eq!(infer_purpose("deepseek-coder:6.7b"), Some("Code generation"));
        assert_eq!(infer_purpose("Mistral:7b"), Some("General chat"));
        assert_eq!(infer_purpose("my-custom-model"), None);
    }
}
