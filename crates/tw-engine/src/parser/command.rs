//! Command parsing for player input.

use tw_core::{VerbAction, Vocabulary};

/// A parsed player command.
///
/// `None` targets mean the player typed the verb alone; handlers answer
/// those with a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Walk through an exit, by direction or destination name.
    Move {
        /// Direction or room name.
        target: Option<String>,
    },
    /// Look around or examine something.
    Look {
        /// Optional target to examine.
        target: Option<String>,
    },
    /// Pick up an item.
    Take {
        /// The item name.
        item: Option<String>,
    },
    /// Use a held item.
    Use {
        /// The item name.
        item: Option<String>,
    },
    /// Talk to an NPC.
    Talk {
        /// The NPC name.
        npc: Option<String>,
    },
    /// List held items.
    Inventory,
    /// List the verb table.
    Help,
    /// Answer a puzzle.
    Solve {
        /// The puzzle name.
        puzzle: Option<String>,
        /// The answer, verbatim after `mit`.
        answer: Option<String>,
    },
    /// Ask for the next hint of a puzzle.
    Hint {
        /// The puzzle name.
        puzzle: Option<String>,
    },
    /// Combine two held items.
    Combine {
        /// The first item name.
        first: Option<String>,
        /// The second item name.
        second: Option<String>,
    },
    /// The verb is not in the vocabulary.
    Unknown {
        /// The normalized input.
        input: String,
    },
}

impl Command {
    /// The handler this command dispatches to.
    pub fn action(&self) -> Option<VerbAction> {
        match self {
            Self::Move { .. } => Some(VerbAction::Move),
            Self::Look { .. } => Some(VerbAction::Look),
            Self::Take { .. } => Some(VerbAction::Take),
            Self::Use { .. } => Some(VerbAction::Use),
            Self::Talk { .. } => Some(VerbAction::Talk),
            Self::Inventory => Some(VerbAction::Inventory),
            Self::Help => Some(VerbAction::Help),
            Self::Solve { .. } => Some(VerbAction::Solve),
            Self::Hint { .. } => Some(VerbAction::Hint),
            Self::Combine { .. } => Some(VerbAction::Combine),
            Self::Unknown { .. } => None,
        }
    }
}

/// Words skipped at the start of a target: articles and prepositions.
const FILLERS: &[&str] = &[
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem", "einer", "mit",
    "zu", "zur", "zum", "nach", "auf",
];

/// Joins two names in `löse` and `kombiniere`.
const JOINER: &str = "mit";

/// Parse a player input string into a command.
///
/// The input is normalized and run through the alias table first. Verbs
/// that the vocabulary does not list are unknown, even well-known ones.
pub fn parse_command(vocabulary: &Vocabulary, input: &str) -> Command {
    let resolved = vocabulary.resolve(input);
    let words: Vec<&str> = resolved.split(' ').filter(|w| !w.is_empty()).collect();
    let Some((verb, rest)) = words.split_first() else {
        return Command::Unknown { input: resolved };
    };

    let Some(action) = vocabulary.action(verb) else {
        return Command::Unknown { input: resolved };
    };

    match action {
        VerbAction::Move => Command::Move {
            target: target(rest),
        },
        VerbAction::Look => parse_look(rest),
        VerbAction::Take => Command::Take { item: target(rest) },
        VerbAction::Use => Command::Use { item: target(rest) },
        VerbAction::Talk => Command::Talk { npc: target(rest) },
        VerbAction::Inventory => Command::Inventory,
        VerbAction::Help => Command::Help,
        VerbAction::Solve => {
            let (puzzle, answer) = split_joined(rest);
            Command::Solve {
                puzzle: target(puzzle),
                answer: joined(answer),
            }
        }
        VerbAction::Hint => Command::Hint {
            puzzle: target(rest),
        },
        VerbAction::Combine => {
            let (first, second) = split_joined(rest);
            Command::Combine {
                first: target(first),
                second: target(second),
            }
        }
    }
}

fn parse_look(rest: &[&str]) -> Command {
    match target(rest).as_deref() {
        None | Some("um") | Some("dich um") => Command::Look { target: None },
        Some(t) => Command::Look {
            target: Some(t.to_string()),
        },
    }
}

/// Strip leading fillers and join the remaining words.
fn target(words: &[&str]) -> Option<String> {
    let start = words
        .iter()
        .position(|w| !FILLERS.contains(w))
        .unwrap_or(words.len());
    joined(&words[start..])
}

fn joined(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Split at the first `mit` that follows at least one word.
fn split_joined<'a, 'b>(words: &'b [&'a str]) -> (&'b [&'a str], &'b [&'a str]) {
    match words.iter().skip(1).position(|w| *w == JOINER) {
        Some(pos) => (&words[..pos + 1], &words[pos + 2..]),
        None => (words, &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocabulary() -> Vocabulary {
        let json = serde_json::json!({
            "verbs": {
                "gehe": {"description": "Bewege dich"},
                "schaue": {"description": "Schau dich um"},
                "nimm": {"description": "Nimm etwas"},
                "benutze": {"description": "Benutze etwas"},
                "sprich": {"description": "Sprich mit jemandem"},
                "inventar": {"description": "Zeige Inventar"},
                "hilfe": {"description": "Zeige Hilfe"},
                "löse": {"description": "Löse ein Rätsel"},
                "tipp": {"description": "Erhalte einen Tipp"},
                "kombiniere": {"description": "Kombiniere Gegenstände"},
                "untersuche": {"description": "Untersuche etwas", "action": "look"},
                "tanze": {"description": "Tanze"}
            },
            "aliases": {"n": "gehe norden", "i": "inventar", "l": "schaue"},
            "defaultResponses": {}
        });
        serde_json::from_value(json).unwrap()
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn parse_move() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "gehe norden"),
            Command::Move {
                target: some("norden")
            }
        );
        assert_eq!(
            parse_command(&vocab, "gehe nach oben"),
            Command::Move {
                target: some("oben")
            }
        );
        assert_eq!(
            parse_command(&vocab, "gehe"),
            Command::Move { target: None }
        );
    }

    #[test]
    fn parse_alias() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "N"),
            parse_command(&vocab, "gehe norden")
        );
        assert_eq!(parse_command(&vocab, "  i "), Command::Inventory);
    }

    #[test]
    fn parse_look() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "schaue"),
            Command::Look { target: None }
        );
        assert_eq!(
            parse_command(&vocab, "schaue um"),
            Command::Look { target: None }
        );
        assert_eq!(
            parse_command(&vocab, "schaue dich um"),
            Command::Look { target: None }
        );
        assert_eq!(
            parse_command(&vocab, "schaue auf die Truhe"),
            Command::Look {
                target: some("truhe")
            }
        );
    }

    #[test]
    fn explicit_action_overrides_name() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "untersuche fackel"),
            Command::Look {
                target: some("fackel")
            }
        );
    }

    #[test]
    fn parse_talk_strips_fillers() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "sprich mit dem Wächter"),
            Command::Talk {
                npc: some("wächter")
            }
        );
    }

    #[test]
    fn parse_take_and_use() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "nimm den alten   Schlüssel"),
            Command::Take {
                item: some("alten schlüssel")
            }
        );
        assert_eq!(
            parse_command(&vocab, "benutze"),
            Command::Use { item: None }
        );
    }

    #[test]
    fn parse_solve() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "löse das Rätsel mit Die Zeit"),
            Command::Solve {
                puzzle: some("rätsel"),
                answer: some("die zeit"),
            }
        );
        assert_eq!(
            parse_command(&vocab, "löse rätsel"),
            Command::Solve {
                puzzle: some("rätsel"),
                answer: None,
            }
        );
    }

    #[test]
    fn parse_combine() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "kombiniere seil mit dem haken"),
            Command::Combine {
                first: some("seil"),
                second: some("haken"),
            }
        );
        assert_eq!(
            parse_command(&vocab, "kombiniere seil"),
            Command::Combine {
                first: some("seil"),
                second: None,
            }
        );
    }

    #[test]
    fn parse_unknown() {
        let vocab = vocabulary();
        assert_eq!(
            parse_command(&vocab, "springe hoch"),
            Command::Unknown {
                input: "springe hoch".to_string()
            }
        );
        assert_eq!(
            parse_command(&vocab, "   "),
            Command::Unknown {
                input: String::new()
            }
        );
        // In the table, but without a handler.
        assert_eq!(parse_command(&vocab, "tanze").action(), None);
    }

    proptest! {
        #[test]
        fn case_and_spacing_do_not_matter(verb in "(gehe|nimm|schaue|sprich)", target in "[a-zäöü]{1,8}") {
            let vocab = vocabulary();
            let plain = parse_command(&vocab, &format!("{verb} {target}"));
            let noisy = parse_command(&vocab, &format!("  {}   {}  ", verb.to_uppercase(), target.to_uppercase()));
            prop_assert_eq!(plain, noisy);
        }

        #[test]
        fn parsing_never_panics(input in "\\PC{0,40}") {
            let vocab = vocabulary();
            let _ = parse_command(&vocab, &input);
        }
    }
}
