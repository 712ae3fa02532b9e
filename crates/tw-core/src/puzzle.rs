//! Puzzles, their solutions, and rewards.
//!
//! A [`Solution`] decides whether a player's answer is right. Answers are
//! compared case-insensitively; list-shaped solutions accept tokens separated
//! by whitespace or commas.

use serde::Deserialize;

use crate::value::Scalar;

/// Genre of a puzzle. Informational only; the solution decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    /// Bring the right items.
    Inventory,
    /// A riddle.
    Logic,
    /// Match a pattern.
    Pattern,
    /// Reproduce an ordered sequence.
    Sequence,
    /// Find an unordered combination.
    Combination,
    /// Hit a value in time.
    Timing,
}

/// Difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    #[default]
    Medium,
    /// Hard.
    Hard,
}

/// How an answer is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionKind {
    /// Same text, ignoring case and surrounding whitespace.
    Exact,
    /// Glob pattern with `*` and `?`.
    Pattern,
    /// Same tokens in the same order.
    Sequence,
    /// Same tokens in any order.
    Combination,
    /// A number within the tolerance.
    Timing,
}

/// The expected value of a solution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SolutionValue {
    /// A number.
    Number(f64),
    /// A text.
    Text(String),
    /// A list of strings or numbers.
    List(Vec<Scalar>),
}

impl SolutionValue {
    fn tokens(&self) -> Vec<String> {
        match self {
            Self::Number(n) => vec![Scalar::Float(*n).to_string()],
            Self::Text(s) => tokens(s),
            Self::List(items) => items
                .iter()
                .flat_map(|item| tokens(&item.to_string()))
                .collect(),
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Number(n) => Scalar::Float(*n).to_string(),
            Self::Text(s) => s.clone(),
            Self::List(_) => self.tokens().join(" "),
        }
    }

    fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(items) => match items.as_slice() {
                [single] => single.as_number(),
                _ => None,
            },
        }
    }
}

/// The solution descriptor of a puzzle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Solution {
    /// Comparison kind.
    #[serde(rename = "type")]
    pub kind: SolutionKind,
    /// Expected value.
    pub value: SolutionValue,
    /// Allowed deviation for `timing`.
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl Solution {
    /// Check an answer.
    pub fn matches(&self, answer: &str) -> bool {
        match self.kind {
            SolutionKind::Exact => {
                collapse(&self.value.text()).to_lowercase() == collapse(answer).to_lowercase()
            }
            SolutionKind::Pattern => glob(
                &collapse(&self.value.text()).to_lowercase(),
                &collapse(answer).to_lowercase(),
            ),
            SolutionKind::Sequence => {
                let expected = self.value.tokens();
                !expected.is_empty() && expected == tokens(answer)
            }
            SolutionKind::Combination => {
                let mut expected = self.value.tokens();
                let mut given = tokens(answer);
                expected.sort();
                given.sort();
                !expected.is_empty() && expected == given
            }
            SolutionKind::Timing => {
                let tolerance = self.tolerance.unwrap_or(0.0).abs();
                match (self.value.number(), answer.trim().replace(',', ".").parse::<f64>()) {
                    (Some(expected), Ok(given)) => (expected - given).abs() <= tolerance,
                    _ => false,
                }
            }
        }
    }
}

/// What solving a puzzle grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Item key put into the inventory.
    Item,
    /// Lock target to unlock.
    Unlock,
    /// `name` or `name=value`; a bare name is set to `true`.
    Variable,
    /// Room key to move to.
    Teleport,
}

/// A puzzle reward.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reward {
    /// Reward kind.
    #[serde(rename = "type")]
    pub kind: RewardKind,
    /// Parameter, interpreted by kind.
    pub value: Scalar,
    /// Text shown when the reward is granted.
    #[serde(default)]
    pub message: String,
}

impl Reward {
    /// The reward's value as a key.
    pub fn key(&self) -> String {
        self.value.to_string().trim().to_string()
    }

    /// For variable rewards: the variable name and the value to store.
    pub fn variable(&self) -> Option<(String, Scalar)> {
        if self.kind != RewardKind::Variable {
            return None;
        }
        let raw = self.value.to_string();
        let (name, value) = match raw.split_once('=') {
            Some((name, value)) => (name.trim(), Scalar::parse(value)),
            None => (raw.trim(), Scalar::Boolean(true)),
        };
        (!name.is_empty()).then(|| (name.to_string(), value))
    }
}

/// A puzzle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    /// Optional inner id; must equal the map key if present.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name, matched by player input.
    pub name: String,
    /// Text shown when the puzzle is examined.
    #[serde(default)]
    pub description: String,
    /// Genre.
    #[serde(rename = "type")]
    pub kind: PuzzleKind,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Already solved in the initial snapshot.
    #[serde(default)]
    pub is_solved: bool,
    /// Listed by `look` and solvable.
    #[serde(default = "visible")]
    pub is_visible: bool,
    /// Room key.
    #[serde(default)]
    pub location: String,
    /// Items the player must hold to attempt it.
    #[serde(default)]
    pub required_items: Vec<String>,
    /// Puzzles that must be solved first.
    #[serde(default)]
    pub required_puzzles: Vec<String>,
    /// How answers are checked.
    pub solution: Solution,
    /// Hints, revealed one at a time.
    #[serde(default)]
    pub hints: Vec<String>,
    /// Granted on success.
    #[serde(default)]
    pub reward: Option<Reward>,
    /// Turn budget for the conversational layer. Not enforced here.
    #[serde(default)]
    pub time_limit: Option<u64>,
}

fn visible() -> bool {
    true
}

/// Lowercased tokens split on whitespace and commas.
fn tokens(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Match `text` against a glob `pattern` where `*` is any run and `?` any one char.
fn glob(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if let Some((star, matched)) = backtrack {
            pi = star + 1;
            ti = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}
