//! Condition evaluation for events and dialogue branches.
//!
//! Conditions are a small closed grammar interpreted against [`GameState`];
//! documents can never supply code to run.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::state::GameState;
use crate::value::Scalar;

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal (or "present" for membership checks).
    #[default]
    Equals,
    /// Not equal (or "absent" for membership checks).
    #[serde(alias = "notEquals")]
    NotEquals,
    /// Strictly greater, numeric only.
    #[serde(alias = "greaterThan")]
    GreaterThan,
    /// Strictly less, numeric only.
    #[serde(alias = "lessThan")]
    LessThan,
}

impl Operator {
    fn name(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
        }
    }

    fn holds(&self, ordering: Option<Ordering>) -> bool {
        match self {
            Self::Equals => ordering == Some(Ordering::Equal),
            Self::NotEquals => ordering != Some(Ordering::Equal),
            Self::GreaterThan => ordering == Some(Ordering::Greater),
            Self::LessThan => ordering == Some(Ordering::Less),
        }
    }
}

/// A condition that can be evaluated against the game state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCondition")]
pub enum Condition {
    /// The player holds (or, negated, does not hold) an item.
    HasItem {
        /// Item key.
        item: String,
        /// Invert the check.
        negated: bool,
    },
    /// A puzzle is (or is not) solved.
    HasPuzzle {
        /// Puzzle key.
        puzzle: String,
        /// Invert the check.
        negated: bool,
    },
    /// A room has (or has not) been visited.
    HasVisited {
        /// Room key.
        room: String,
        /// Invert the check.
        negated: bool,
    },
    /// Compare a game variable.
    ///
    /// Without an operand the variable is tested for truthiness.
    Variable {
        /// Variable name.
        name: String,
        /// Comparison operator.
        operator: Operator,
        /// Value to compare against.
        operand: Option<Scalar>,
    },
    /// Compare the elapsed turn counter.
    TimeCheck {
        /// Comparison operator.
        operator: Operator,
        /// Number of turns.
        turns: u64,
    },
}

impl Condition {
    /// Evaluate the condition against the current state.
    pub fn evaluate(&self, state: &GameState) -> bool {
        match self {
            Condition::HasItem { item, negated } => state.has_item(item) != *negated,
            Condition::HasPuzzle { puzzle, negated } => state.has_completed(puzzle) != *negated,
            Condition::HasVisited { room, negated } => state.has_visited(room) != *negated,
            Condition::Variable {
                name,
                operator,
                operand,
            } => {
                let current = state.variable(name);
                match operand {
                    None => {
                        let set = current.is_some_and(Scalar::is_truthy);
                        match operator {
                            Operator::NotEquals => !set,
                            _ => set,
                        }
                    }
                    Some(expected) => match operator {
                        Operator::Equals => current.is_some_and(|v| v.loosely_equals(expected)),
                        Operator::NotEquals => !current.is_some_and(|v| v.loosely_equals(expected)),
                        _ => operator.holds(current.and_then(|v| v.numeric_cmp(expected))),
                    },
                }
            }
            Condition::TimeCheck { operator, turns } => {
                operator.holds(Some(state.time_elapsed.cmp(turns)))
            }
        }
    }

    /// The collection and key this condition refers to, for validation.
    pub fn reference(&self) -> Option<(&'static str, &str)> {
        match self {
            Condition::HasItem { item, .. } => Some(("items", item)),
            Condition::HasPuzzle { puzzle, .. } => Some(("puzzles", puzzle)),
            Condition::HasVisited { room, .. } => Some(("rooms", room)),
            Condition::Variable { .. } | Condition::TimeCheck { .. } => None,
        }
    }

    /// Check that every condition holds.
    pub fn all(conditions: &[Condition], state: &GameState) -> bool {
        conditions.iter().all(|c| c.evaluate(state))
    }
}

#[derive(Debug, Deserialize)]
enum RawKind {
    #[serde(rename = "has_item", alias = "hasItem")]
    HasItem,
    #[serde(rename = "has_puzzle", alias = "hasPuzzle")]
    HasPuzzle,
    #[serde(rename = "has_variable", alias = "hasVariable")]
    HasVariable,
    #[serde(rename = "has_visited", alias = "hasVisited")]
    HasVisited,
    #[serde(rename = "time_check", alias = "timeCheck")]
    TimeCheck,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    #[serde(rename = "type")]
    kind: RawKind,
    value: Scalar,
    #[serde(default)]
    operator: Option<Operator>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = String;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let value = raw.value.to_string();
        let membership = |kind: &str| -> Result<bool, String> {
            match raw.operator.unwrap_or_default() {
                Operator::Equals => Ok(false),
                Operator::NotEquals => Ok(true),
                op => Err(format!("operator {} is not valid for {kind}", op.name())),
            }
        };

        match raw.kind {
            RawKind::HasItem => Ok(Condition::HasItem {
                negated: membership("has_item")?,
                item: value,
            }),
            RawKind::HasPuzzle => Ok(Condition::HasPuzzle {
                negated: membership("has_puzzle")?,
                puzzle: value,
            }),
            RawKind::HasVisited => Ok(Condition::HasVisited {
                negated: membership("has_visited")?,
                room: value,
            }),
            RawKind::HasVariable => {
                let (name, operand) = match value.split_once('=') {
                    Some((name, operand)) => (name.trim(), Some(Scalar::parse(operand))),
                    None => (value.trim(), None),
                };
                if name.is_empty() {
                    return Err("has_variable needs a variable name".to_string());
                }
                let operator = raw.operator.unwrap_or_default();
                if operand.is_none()
                    && matches!(operator, Operator::GreaterThan | Operator::LessThan)
                {
                    return Err(format!(
                        "has_variable \"{name}\" needs `name=value` for {}",
                        operator.name()
                    ));
                }
                Ok(Condition::Variable {
                    name: name.to_string(),
                    operator,
                    operand,
                })
            }
            RawKind::TimeCheck => {
                let turns = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| format!("time_check needs a turn count, got \"{value}\""))?;
                Ok(Condition::TimeCheck {
                    operator: raw.operator.unwrap_or_default(),
                    turns,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Condition, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn has_item_both_spellings() {
        let snake = parse(r#"{"type": "has_item", "value": "key"}"#).unwrap();
        let camel = parse(r#"{"type": "hasItem", "value": "key"}"#).unwrap();
        assert_eq!(snake, camel);

        let mut state = GameState::new("start");
        assert!(!snake.evaluate(&state));
        state.add_item("key");
        assert!(snake.evaluate(&state));
    }

    #[test]
    fn negated_membership() {
        let cond = parse(r#"{"type": "has_visited", "value": "vault", "operator": "not_equals"}"#)
            .unwrap();
        let mut state = GameState::new("start");
        assert!(cond.evaluate(&state));
        state.visit("vault");
        assert!(!cond.evaluate(&state));
    }

    #[test]
    fn ordering_operator_rejected_for_membership() {
        let err = parse(r#"{"type": "has_puzzle", "value": "riddle", "operator": "greater_than"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("greater_than"));
    }

    #[test]
    fn variable_truthiness() {
        let cond = parse(r#"{"type": "has_variable", "value": "tor_offen"}"#).unwrap();
        let mut state = GameState::new("start");
        assert!(!cond.evaluate(&state));
        state.set_variable("tor_offen", Scalar::Boolean(true));
        assert!(cond.evaluate(&state));
        state.set_variable("tor_offen", Scalar::Boolean(false));
        assert!(!cond.evaluate(&state));
    }

    #[test]
    fn variable_comparisons() {
        let gt = parse(r#"{"type": "has_variable", "value": "mut=3", "operator": "greater_than"}"#)
            .unwrap();
        let eq = parse(r#"{"type": "has_variable", "value": "farbe=rot"}"#).unwrap();
        let mut state = GameState::new("start");

        assert!(!gt.evaluate(&state));
        state.set_variable("mut", Scalar::Integer(5));
        assert!(gt.evaluate(&state));

        state.set_variable("farbe", Scalar::from("Rot"));
        assert!(eq.evaluate(&state));
    }

    #[test]
    fn variable_ordering_needs_operand() {
        assert!(
            parse(r#"{"type": "has_variable", "value": "mut", "operator": "less_than"}"#).is_err()
        );
    }

    #[test]
    fn time_check() {
        let cond =
            parse(r#"{"type": "time_check", "value": 2, "operator": "greater_than"}"#).unwrap();
        let mut state = GameState::new("start");
        state.time_elapsed = 2;
        assert!(!cond.evaluate(&state));
        state.time_elapsed = 3;
        assert!(cond.evaluate(&state));

        assert!(parse(r#"{"type": "time_check", "value": "bald"}"#).is_err());
    }

    #[test]
    fn references_for_validation() {
        let cond = parse(r#"{"type": "has_puzzle", "value": "riddle"}"#).unwrap();
        assert_eq!(cond.reference(), Some(("puzzles", "riddle")));
        let cond = parse(r#"{"type": "has_variable", "value": "x"}"#).unwrap();
        assert_eq!(cond.reference(), None);
    }
}
