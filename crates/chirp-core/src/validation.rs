//! Declarative request validation.
//!
//! A rule set is an ordered slice of [`Rule`]s. [`validate`] runs every rule against the
//! input and collects one message per failing rule; the request is rejected with
//! [`AppError::ValidationError`] if any rule failed.
//!
//! A field is *falsy* when it is missing or the empty string. Only [`Check::Required`]
//! reports falsy fields; every other check passes on them, so a missing field yields a
//! single message.
//!
//! Lengths are counted with [`char_len`]: Unicode scalar values, not counting the emoji
//! presentation selectors U+FE0E and U+FE0F.

use crate::error::AppError;
use crate::models::{MAX_TWEET_CHARS, MAX_USERNAME_CHARS};

/// Named access to the string fields of a request body.
pub trait Fields {
    fn field(&self, name: &str) -> Option<&str>;
}

/// The predicate a [`Rule`] applies to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Present and non-empty.
    Required,
    /// At most this many characters, as counted by [`char_len`].
    MaxChars(usize),
    /// No U+0000, which PostgreSQL text columns cannot store.
    NoNul,
    /// Syntactically valid email address.
    Email,
}

/// One check on one field, with the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl Rule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::Required,
            message,
        }
    }

    pub const fn max_chars(field: &'static str, max: usize, message: &'static str) -> Self {
        Self {
            field,
            check: Check::MaxChars(max),
            message,
        }
    }

    pub const fn no_nul(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::NoNul,
            message,
        }
    }

    pub const fn email(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::Email,
            message,
        }
    }

    /// Returns true if `value` satisfies this rule.
    pub fn passes(&self, value: Option<&str>) -> bool {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return self.check != Check::Required,
        };

        match self.check {
            Check::Required => true,
            Check::MaxChars(max) => char_len(value) <= max,
            Check::NoNul => !value.contains('\0'),
            Check::Email => is_valid_email(value),
        }
    }
}

/// Rules for creating or updating a tweet.
pub const TWEET_RULES: &[Rule] = &[
    Rule::required("message", "Your tweet can't be empty"),
    Rule::max_chars(
        "message",
        MAX_TWEET_CHARS,
        "Your tweet can't be longer than 280 characters",
    ),
    Rule::no_nul("message", "Your tweet can't contain null characters"),
];

/// Rules for registering a user.
pub const USER_RULES: &[Rule] = &[
    Rule::required("username", "Please provide a username"),
    Rule::max_chars(
        "username",
        MAX_USERNAME_CHARS,
        "Your username can't be longer than 255 characters",
    ),
    Rule::no_nul("username", "Your username can't contain null characters"),
    Rule::required("email", "Please provide a valid email."),
    Rule::email("email", "Please provide a valid email."),
    Rule::required("password", "Please provide a password."),
];

/// Apply `rules` in order and collect the messages of the failing ones.
pub fn validate<F: Fields + ?Sized>(input: &F, rules: &[Rule]) -> Result<(), AppError> {
    let errors: Vec<String> = rules
        .iter()
        .filter(|rule| !rule.passes(input.field(rule.field)))
        .map(|rule| rule.message.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(?errors, "request failed validation");
        Err(AppError::ValidationError(errors))
    }
}

/// Length of `value` in characters, ignoring U+FE0E and U+FE0F.
///
/// A heart written as U+2764 U+FE0F counts as one character.
pub fn char_len(value: &str) -> usize {
    value
        .chars()
        .filter(|c| !matches!(c, '\u{FE0E}' | '\u{FE0F}'))
        .count()
}

/// Syntactic email check: `local@domain.tld`, no whitespace, sane label lengths.
pub fn is_valid_email(address: &str) -> bool {
    if address.len() > 254 {
        return false;
    }

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.len() > 64
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || local.chars().any(|c| c.is_whitespace() || c == '@' || c.is_control())
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    labels_ok && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
