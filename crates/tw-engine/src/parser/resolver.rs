//! Name matching and verb suggestions.

use strsim::jaro_winkler;
use tw_core::Vocabulary;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Case-insensitive substring match of a player target against a display name.
pub fn name_matches(name: &str, target: &str) -> bool {
    name.to_lowercase().contains(&target.to_lowercase())
}

/// Find the first candidate whose name contains the target.
///
/// Candidates are `(key, name)` pairs in search order.
pub fn find_by_name<'n, K>(
    candidates: impl IntoIterator<Item = (K, &'n str)>,
    target: &str,
) -> Option<K> {
    candidates
        .into_iter()
        .find(|(_, name)| name_matches(name, target))
        .map(|(key, _)| key)
}

/// Find candidates similar to the input with a score above the threshold.
///
/// Returns `(candidate, score)` sorted by score descending.
pub fn fuzzy_match<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    input: &str,
    threshold: f64,
) -> Vec<(&'a str, f64)> {
    let input_lower = input.to_lowercase();
    let mut matches: Vec<(&str, f64)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = jaro_winkler(&input_lower, &candidate.to_lowercase());
            (score >= threshold).then_some((candidate, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    matches
}

/// Suggest a known command for unrecognized input.
///
/// The first word is compared against verbs and alias keys; the rest of the
/// input is kept. Returns `None` if nothing is close enough.
pub fn suggest_command(vocabulary: &Vocabulary, input: &str) -> Option<String> {
    let normalized = tw_core::normalize(input);
    let (head, rest) = match normalized.split_once(' ') {
        Some((head, rest)) => (head, Some(rest)),
        None => (normalized.as_str(), None),
    };
    if head.is_empty() {
        return None;
    }

    let candidates = vocabulary
        .verbs()
        .map(|(verb, _)| verb)
        .chain(vocabulary.aliases().map(|(alias, _)| alias));
    let (best, _) = fuzzy_match(candidates, head, FUZZY_THRESHOLD)
        .into_iter()
        .find(|(candidate, _)| *candidate != head)?;

    Some(match rest {
        Some(rest) => format!("{best} {rest}"),
        None => best.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vocabulary {
        serde_json::from_value(serde_json::json!({
            "verbs": {
                "gehe": {"description": "Bewege dich"},
                "nimm": {"description": "Nimm etwas"},
                "schaue": {"description": "Schau dich um"}
            },
            "aliases": {"umsehen": "schaue"},
            "defaultResponses": {}
        }))
        .unwrap()
    }

    #[test]
    fn substring_match_ignores_case() {
        assert!(name_matches("Alter Schlüssel", "schlüssel"));
        assert!(name_matches("Alter Schlüssel", "ALTER"));
        assert!(!name_matches("Alter Schlüssel", "truhe"));
    }

    #[test]
    fn find_respects_search_order() {
        let candidates = [("fackel", "Fackel"), ("fackelhalter", "Fackelhalter")];
        assert_eq!(find_by_name(candidates, "fackel"), Some("fackel"));
        assert_eq!(find_by_name(candidates, "halter"), Some("fackelhalter"));
        assert_eq!(find_by_name(candidates, "seil"), None);
    }

    #[test]
    fn fuzzy_match_sorted_by_score() {
        let matches = fuzzy_match(["schaue", "schau", "nimm"], "schaue", 0.8);
        assert_eq!(matches[0].0, "schaue");
        assert!(matches.iter().all(|(c, _)| *c != "nimm"));
    }

    #[test]
    fn suggest_close_verb() {
        let vocab = vocabulary();
        assert_eq!(
            suggest_command(&vocab, "gehr norden"),
            Some("gehe norden".to_string())
        );
        assert_eq!(suggest_command(&vocab, "schuae"), Some("schaue".to_string()));
    }

    #[test]
    fn no_suggestion_for_garbage() {
        let vocab = vocabulary();
        assert_eq!(suggest_command(&vocab, "xyzzy"), None);
        assert_eq!(suggest_command(&vocab, ""), None);
    }
}
