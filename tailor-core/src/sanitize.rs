//! Redaction policy for error messages that leave the process.
//!
//! Upstream failures routinely embed connection strings, account e-mails, or
//! provider API keys in their messages. Anything returned to a client goes
//! through [`sanitize_message`] first. Filesystem paths are useful while
//! developing, so they are only stripped in production mode.

/// How aggressive redaction should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Redact secrets and PII, keep filesystem paths.
    Development,
    /// Additionally redact absolute filesystem paths.
    Production,
}

const CONNECTION_SCHEMES: &[&str] = &[
    "postgres://",
    "postgresql://",
    "mysql://",
    "redis://",
    "mongodb://",
];

const REDACTED_CONNECTION: &str = "[redacted-connection-string]";
const REDACTED_EMAIL: &str = "[redacted-email]";
const REDACTED_SECRET: &str = "[redacted-secret]";
const REDACTED_PATH: &str = "[redacted-path]";

/// Redact sensitive fragments from an error message.
///
/// Connection-string URLs, e-mail addresses, and bearer/API-key tokens are
/// always removed; absolute paths only under [`SanitizeMode::Production`].
/// Whitespace runs collapse to single spaces.
pub fn sanitize_message(message: &str, mode: SanitizeMode) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut after_bearer = false;

    for word in message.split_whitespace() {
        let (prefix, core, suffix) = split_punctuation(word);

        let replacement = if after_bearer {
            after_bearer = false;
            Some(REDACTED_SECRET)
        } else if is_connection_string(core) {
            Some(REDACTED_CONNECTION)
        } else if is_email(core) {
            Some(REDACTED_EMAIL)
        } else if is_api_key(core) {
            Some(REDACTED_SECRET)
        } else if mode == SanitizeMode::Production && is_absolute_path(core) {
            Some(REDACTED_PATH)
        } else {
            None
        };

        if core.eq_ignore_ascii_case("bearer") {
            after_bearer = true;
        }

        match replacement {
            Some(marker) => out.push(format!("{prefix}{marker}{suffix}")),
            None => out.push(word.to_string()),
        }
    }

    out.join(" ")
}

/// Strip wrapping punctuation so `(postgres://...)` still classifies.
fn split_punctuation(word: &str) -> (&str, &str, &str) {
    let start = word
        .find(|c: char| !matches!(c, '(' | '[' | '{' | '"' | '\''))
        .unwrap_or(word.len());
    let end = word
        .rfind(|c: char| !matches!(c, ')' | ']' | '}' | '"' | '\'' | ',' | ';' | '.'))
        .map(|i| i + word[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(start);
    let end = end.max(start);
    (&word[..start], &word[start..end], &word[end..])
}

fn is_connection_string(word: &str) -> bool {
    CONNECTION_SCHEMES
        .iter()
        .any(|scheme| word.len() > scheme.len() && word.starts_with(scheme))
}

fn is_email(word: &str) -> bool {
    let Some(at) = word.find('@') else {
        return false;
    };
    let (local, domain) = word.split_at(at);
    let domain = &domain[1..];
    !local.is_empty() && domain.contains('.') && !domain.ends_with('.') && !domain.contains('@')
}

fn is_api_key(word: &str) -> bool {
    // Provider key shapes: "sk-..." (LLM APIs), "key_..." with a long tail.
    (word.starts_with("sk-") && word.len() >= 12)
        || (word.starts_with("key_") && word.len() >= 16)
}

fn is_absolute_path(word: &str) -> bool {
    word.len() > 1 && word.starts_with('/') && !word[1..].starts_with('/')
}
