//! Inverse-printer for rule trees.

use crate::engine::text::board_text::print_board_fragment;
use crate::prelude::*;

/// Prints a rule to its canonical textual form.
///
/// `OneOf([])` and greedy (final-frontier) `Repeat` have no textual spelling (per
/// the design note on `"nil"` being declared non-parsable): both are constructible
/// only via the API and both error here rather than print something unparsable.
/// The quantifiers `*`/`+`/`?`/`{n,m}` always denote the non-greedy union form,
/// matching the source library's `RepeatRule._apply`.
pub fn print_rule(rule: &Rule) -> Result<String> {
    match rule {
        Rule::FindReplace { pattern, replacement } => Ok(format!(
            "{} -> {}",
            print_board_fragment(pattern),
            print_board_fragment(replacement)
        )),

        Rule::OneOf(rules) => {
            if rules.is_empty() {
                return Err(Error::MalformedRuleText(
                    "OneOf([]) has no textual form; construct it via the API".into(),
                ));
            }
            let parts = rules
                .iter()
                .map(|r| Ok(format!("({})", print_rule(r)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(" | "))
        }

        Rule::Sequence(rules) => {
            if rules.is_empty() {
                return Err(Error::MalformedRuleText(
                    "Sequence([]) has no textual form; construct it via the API".into(),
                ));
            }
            let parts = rules
                .iter()
                .map(|r| Ok(format!("({})", print_rule(r)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(""))
        }

        Rule::PieceOfInterest { piece, body } => {
            Ok(format!("%{}: ({})", piece, print_rule(body)?))
        }

        Rule::Repeat { body, at_least, at_most, greedy } => {
            if *greedy {
                return Err(Error::MalformedRuleText(
                    "greedy (final-frontier) Repeat has no textual form; construct it via the API".into(),
                ));
            }
            let inner = format!("({})", print_rule(body)?);
            let suffix = match (*at_least, *at_most) {
                (0, None) => "*".to_string(),
                (1, None) => "+".to_string(),
                (0, Some(1)) => "?".to_string(),
                (n, Some(m)) if n == m => format!("{{{n}}}"),
                (n, None) => format!("{{{n},}}"),
                (n, Some(m)) => format!("{{{n},{m}}}"),
            };
            Ok(inner + &suffix)
        }
    }
}
