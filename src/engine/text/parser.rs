//! Recursive-descent parser for rule expression text.
//!
//! Precedence, tightest first: atom, postfix quantifier, implicit concatenation
//! (`Sequence`), infix `|` (`OneOf`). Uses an explicit token cursor rather than
//! recursion-through-tokenize, per the "unbounded recursion in parser" design note:
//! only rule *nesting* recurses, never token scanning.

use crate::engine::text::board_text::parse_board_fragment;
use crate::engine::text::tokenizer::{tokenize, Token};
use crate::prelude::*;

/// Parses a complete rule expression; errors if trailing tokens remain.
pub fn parse_rule(input: &str) -> Result<Rule> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let rule = parser.parse_oneof()?;
    if parser.pos != parser.tokens.len() {
        return Err(Error::MalformedRuleText(format!(
            "unexpected trailing token at position {}",
            parser.pos
        )));
    }
    Ok(rule)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, expected: &Token) -> Result<()> {
        match self.advance() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(Error::MalformedRuleText(format!("expected {expected:?}, found {t:?}"))),
            None => Err(Error::MalformedRuleText(format!("expected {expected:?}, found end of input"))),
        }
    }

    fn starts_atom(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::LParen)
                | Some(Token::PieceBinder(_))
                | Some(Token::BoardFragment(_))
                | Some(Token::Arrow)
        )
    }

    fn parse_oneof(&mut self) -> Result<Rule> {
        let mut rules = vec![self.parse_sequence()?];
        while matches!(self.peek(), Some(Token::Pipe)) {
            self.advance();
            rules.push(self.parse_sequence()?);
        }
        Ok(if rules.len() == 1 { rules.pop().unwrap() } else { Rule::OneOf(rules) })
    }

    fn parse_sequence(&mut self) -> Result<Rule> {
        let mut rules = vec![self.parse_postfix()?];
        while self.starts_atom() {
            rules.push(self.parse_postfix()?);
        }
        Ok(if rules.len() == 1 { rules.pop().unwrap() } else { Rule::Sequence(rules) })
    }

    fn parse_postfix(&mut self) -> Result<Rule> {
        let atom = self.parse_atom()?;
        match self.peek() {
            Some(Token::Star) => {
                self.advance();
                Rule::repeat(atom, 0, None, false)
            }
            Some(Token::Plus) => {
                self.advance();
                Rule::repeat(atom, 1, None, false)
            }
            Some(Token::Question) => {
                self.advance();
                Rule::repeat(atom, 0, Some(1), false)
            }
            Some(Token::Brace { lo, hi }) => {
                let (lo, hi) = (*lo, *hi);
                self.advance();
                Rule::repeat(atom, lo, hi, false)
            }
            _ => Ok(atom),
        }
    }

    fn parse_atom(&mut self) -> Result<Rule> {
        match self.peek() {
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_oneof()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::PieceBinder(c)) => {
                let c = *c;
                self.advance();
                let body = self.parse_oneof()?;
                Rule::piece_of_interest(c, body)
            }
            Some(Token::BoardFragment(_)) | Some(Token::Arrow) => self.parse_find_replace(),
            Some(other) => Err(Error::MalformedRuleText(format!("unexpected token {other:?}"))),
            None => Err(Error::MalformedRuleText("unexpected end of input".into())),
        }
    }

    fn parse_find_replace(&mut self) -> Result<Rule> {
        let pattern = match self.peek() {
            Some(Token::BoardFragment(s)) => {
                let s = s.clone();
                self.advance();
                parse_board_fragment(&s)?
            }
            _ => Board::new(),
        };
        self.expect(&Token::Arrow)?;
        let replacement = match self.peek() {
            Some(Token::BoardFragment(s)) => {
                let s = s.clone();
                self.advance();
                parse_board_fragment(&s)?
            }
            _ => Board::new(),
        };
        Ok(Rule::FindReplace { pattern, replacement })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_findreplace() {
        let r = parse_rule("p. -> .p").unwrap();
        assert!(matches!(r, Rule::FindReplace { .. }));
    }

    #[test]
    fn parses_oneof_and_sequence() {
        let r = parse_rule("(a -> b)(c -> d) | (e -> f)").unwrap();
        match r {
            Rule::OneOf(rules) => {
                assert_eq!(rules.len(), 2);
                assert!(matches!(rules[0], Rule::Sequence(_)));
                assert!(matches!(rules[1], Rule::FindReplace { .. }));
            }
            other => panic!("expected OneOf, got {other:?}"),
        }
    }

    #[test]
    fn parses_repeat_quantifiers() {
        // Textual quantifiers always denote the non-greedy union form, matching
        // the source library's RepeatRule._apply.
        assert!(matches!(
            parse_rule("(a -> b)*").unwrap(),
            Rule::Repeat { at_least: 0, at_most: None, greedy: false, .. }
        ));
        assert!(matches!(
            parse_rule("(a -> b)+").unwrap(),
            Rule::Repeat { at_least: 1, at_most: None, greedy: false, .. }
        ));
        assert!(matches!(
            parse_rule("(a -> b)?").unwrap(),
            Rule::Repeat { at_least: 0, at_most: Some(1), greedy: false, .. }
        ));
        assert!(matches!(
            parse_rule("(a -> b){2,4}").unwrap(),
            Rule::Repeat { at_least: 2, at_most: Some(4), greedy: false, .. }
        ));
    }

    #[test]
    fn parses_piece_of_interest() {
        let r = parse_rule("%p: (a -> b)").unwrap();
        assert!(matches!(r, Rule::PieceOfInterest { piece: 'p', .. }));
    }

    #[test]
    fn piece_binder_binds_the_full_following_rule() {
        // %c: binds a full rule expression, not just the next quantified atom, so
        // a piece-of-interest binder followed by a sequence scopes the whole
        // sequence to one chosen piece rather than just its first step.
        let r = parse_rule("%p: (a -> b)(c -> d)").unwrap();
        match r {
            Rule::PieceOfInterest { piece: 'p', body } => {
                assert!(matches!(*body, Rule::Sequence(ref rules) if rules.len() == 2));
            }
            other => panic!("expected PieceOfInterest wrapping a Sequence, got {other:?}"),
        }
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(matches!(parse_rule("(a -> b))"), Err(Error::MalformedRuleText(_))));
    }

    #[test]
    fn rejects_unclosed_paren() {
        assert!(matches!(parse_rule("(a -> b"), Err(Error::MalformedRuleText(_))));
    }
}
