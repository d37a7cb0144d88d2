const FALLBACK_USERNAME: &str = "user";

/// Where the default branch pattern came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultPattern {
    Username(String),
    /// The login name couldn't be determined
    Fallback(String),
}

impl DefaultPattern {
    pub fn into_pattern(self) -> String {
        match self {
            Self::Username(pattern) | Self::Fallback(pattern) => pattern,
        }
    }
}

/// The default branch pattern: the current user's login name.
///
/// Branch naming conventions vary in the separator after the author's name
/// (`alice/`, `alice-`, `alice:`), so the separator isn't included. Pass
/// `--pattern` to be more specific.
pub fn default_pattern() -> DefaultPattern {
    let username = ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty());

    match username {
        Some(name) => DefaultPattern::Username(without_domain(name.trim()).to_string()),
        None => DefaultPattern::Fallback(FALLBACK_USERNAME.to_string()),
    }
}

/// Strip a Windows-style `DOMAIN\` prefix from a login name
pub fn without_domain(username: &str) -> &str {
    match username.split_once('\\') {
        Some((_, name)) if !name.contains('\\') => name,
        _ => username,
    }
}
