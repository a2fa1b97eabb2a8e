//! Field validation
//!
//! Applies a field's ordered validation rules to its current value and
//! collects the messages of the rules that fail.
//!
//! # Rule semantics
//!
//! | Kind | Fails when |
//! |---|---|
//! | `required` | value is absent or a blank string |
//! | `minLength` | value is a non-empty string shorter than the bound |
//! | `maxLength` | value is a non-empty string longer than the bound |
//! | `email` | value is a non-empty string not shaped like `local@domain.tld` |
//! | `password` | value is a non-empty string under 8 characters or without a digit |
//!
//! `0` and `false` count as present. Length rules only look at strings, so a
//! number never fails them. Rules of unknown kind, and length rules without a
//! numeric bound, always pass.
//!
//! # Examples
//!
//! ```rust
//! use formbuilder_core::{ValidationRule, Value};
//! use formbuilder_engine::RuleEvaluator;
//!
//! let rules = vec![
//!     ValidationRule::required("Email is required"),
//!     ValidationRule::email("Not a valid email"),
//! ];
//!
//! let errors = RuleEvaluator::evaluate(Some(&Value::from("jane@")), &rules);
//! assert_eq!(errors, vec!["Not a valid email".to_string()]);
//!
//! let errors = RuleEvaluator::evaluate(None, &rules);
//! assert_eq!(errors, vec!["Email is required".to_string()]);
//! ```

use formbuilder_core::{RuleKind, ValidationRule, Value};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Printable ASCII except `@`
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[!-?A-~]+@[!-?A-~]+\.[!-?A-~]+$").expect("email pattern is valid")
});

/// Minimum password length
const PASSWORD_MIN_CHARS: usize = 8;

/// Stateless rule evaluator
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// Evaluate `rules` against `value` in order.
    ///
    /// Returns one message per failing rule, in rule order. `None` and
    /// `Some(Value::Null)` both mean the field has no value.
    pub fn evaluate(value: Option<&Value>, rules: &[ValidationRule]) -> Vec<String> {
        let value = value.unwrap_or(&Value::Null);

        rules
            .iter()
            .filter(|rule| !Self::passes(rule, value))
            .map(|rule| {
                trace!(kind = %rule.kind, "validation rule failed");
                rule.message.clone()
            })
            .collect()
    }

    /// Whether a single rule accepts `value`
    pub fn passes(rule: &ValidationRule, value: &Value) -> bool {
        match rule.kind {
            RuleKind::Required => !value.is_blank(),
            RuleKind::MinLength => match (non_empty_str(value), rule.bound()) {
                (Some(s), Some(bound)) => (char_len(s) as f64) >= bound,
                _ => true,
            },
            RuleKind::MaxLength => match (non_empty_str(value), rule.bound()) {
                (Some(s), Some(bound)) => (char_len(s) as f64) <= bound,
                _ => true,
            },
            RuleKind::Email => non_empty_str(value).map_or(true, is_email),
            RuleKind::Password => non_empty_str(value).map_or(true, is_strong_password),
            RuleKind::Unknown => true,
        }
    }
}

/// Whether `s` looks like `local@domain.tld`
pub fn is_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

/// At least 8 characters, at least one ASCII digit
pub fn is_strong_password(s: &str) -> bool {
    char_len(s) >= PASSWORD_MIN_CHARS && s.chars().any(|c| c.is_ascii_digit())
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbuilder_core::RuleBound;

    fn eval(value: Value, rules: &[ValidationRule]) -> Vec<String> {
        RuleEvaluator::evaluate(Some(&value), rules)
    }

    #[test]
    fn test_required() {
        let rules = vec![ValidationRule::required("m")];
        assert_eq!(eval(Value::from(""), &rules), vec!["m"]);
        assert_eq!(eval(Value::from("   "), &rules), vec!["m"]);
        assert_eq!(eval(Value::Null, &rules), vec!["m"]);
        assert_eq!(RuleEvaluator::evaluate(None, &rules), vec!["m"]);
        assert!(eval(Value::from("x"), &rules).is_empty());
    }

    #[test]
    fn test_required_accepts_zero_and_false() {
        let rules = vec![ValidationRule::required("m")];
        assert!(eval(Value::Number(0.0), &rules).is_empty());
        assert!(eval(Value::Bool(false), &rules).is_empty());
    }

    #[test]
    fn test_min_length() {
        let rules = vec![ValidationRule::min_length(3, "short")];
        assert_eq!(eval(Value::from("ab"), &rules), vec!["short"]);
        assert!(eval(Value::from("abc"), &rules).is_empty());
        assert!(eval(Value::from("abcd"), &rules).is_empty());
        assert!(eval(Value::from(""), &rules).is_empty());
        assert!(eval(Value::Number(1.0), &rules).is_empty());
    }

    #[test]
    fn test_max_length() {
        let rules = vec![ValidationRule::max_length(3, "long")];
        assert_eq!(eval(Value::from("abcd"), &rules), vec!["long"]);
        assert!(eval(Value::from("abc"), &rules).is_empty());
        assert!(eval(Value::Number(12345.0), &rules).is_empty());
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = vec![ValidationRule::max_length(4, "long")];
        assert!(eval(Value::from("héé!"), &rules).is_empty());
    }

    #[test]
    fn test_length_rule_without_bound_passes() {
        let rules = vec![ValidationRule::new(RuleKind::MinLength, "short")];
        assert!(eval(Value::from("a"), &rules).is_empty());

        let rules = vec![ValidationRule::new(RuleKind::MinLength, "short")
            .with_bound(RuleBound::Text("lots".to_string()))];
        assert!(eval(Value::from("a"), &rules).is_empty());
    }

    #[test]
    fn test_string_bound() {
        let rules = vec![ValidationRule::new(RuleKind::MinLength, "short")
            .with_bound(RuleBound::Text("3".to_string()))];
        assert_eq!(eval(Value::from("ab"), &rules), vec!["short"]);
    }

    #[test]
    fn test_email() {
        let rules = vec![ValidationRule::email("bad")];
        assert_eq!(eval(Value::from("not-an-email"), &rules), vec!["bad"]);
        assert_eq!(eval(Value::from("a@b"), &rules), vec!["bad"]);
        assert_eq!(eval(Value::from("a b@c.com"), &rules), vec!["bad"]);
        assert_eq!(eval(Value::from("a@@b.com"), &rules), vec!["bad"]);
        assert!(eval(Value::from("a@b.com"), &rules).is_empty());
        assert!(eval(Value::from("first.last@mail.example.org"), &rules).is_empty());
        assert!(eval(Value::from(""), &rules).is_empty());
        assert!(eval(Value::Null, &rules).is_empty());
    }

    #[test]
    fn test_password() {
        let rules = vec![ValidationRule::password("weak")];
        assert_eq!(eval(Value::from("abc1"), &rules), vec!["weak"]);
        assert_eq!(eval(Value::from("abcdefgh"), &rules), vec!["weak"]);
        assert!(eval(Value::from("abcdefg1"), &rules).is_empty());
        assert!(eval(Value::from(""), &rules).is_empty());
    }

    #[test]
    fn test_unknown_kind_passes() {
        let rules = vec![ValidationRule::new(RuleKind::Unknown, "never")];
        assert!(eval(Value::from(""), &rules).is_empty());
    }

    #[test]
    fn test_errors_follow_rule_order() {
        let rules = vec![
            ValidationRule::password("weak"),
            ValidationRule::min_length(10, "short"),
            ValidationRule::required("needed"),
            ValidationRule::email("bad"),
        ];
        assert_eq!(eval(Value::from("abc"), &rules), vec!["weak", "short", "bad"]);
    }

    #[test]
    fn test_idempotent() {
        let rules = vec![
            ValidationRule::required("needed"),
            ValidationRule::max_length(2, "long"),
        ];
        let value = Value::from("abc");
        assert_eq!(eval(value.clone(), &rules), eval(value, &rules));
    }
}
