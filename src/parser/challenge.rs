//! `WWW-Authenticate` challenge grammar.
//!
//! A header value is a sequence of entries, each a scheme token optionally
//! followed by whitespace and a comma-separated auth-param list:
//!
//! ```text
//! tchar      = [A-Za-z0-9_!#$%&'*+.^\|~-]
//! token      = tchar+
//! auth-param = token \s* = \s* ( token | "[^"]*" )
//! entry      = token ( \s+ ( "," | auth-param ) ( \s* "," ( \s* auth-param )? )* )?
//! ```
//!
//! After an entry is consumed the scan resumes at the next token, so entries
//! separated by commas (`Basic realm="x", Bearer realm=...`) are all found.
//! Quoted values are taken verbatim: `\"` escapes are not recognised.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

const TCHAR: &str = r"[A-Za-z0-9_!#$%\&'*+.^\\|~\-]";

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let token = format!("{TCHAR}+");
    let param = format!(r#"{token}\s*=\s*(?:{token}|"[^"]*")"#);
    Regex::new(&format!(
        r"({token})(?:\s+((?:,|{param})(?:\s*,(?:\s*{param})?)*))?"
    ))
    .expect("challenge entry pattern is valid")
});

static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let token = format!("{TCHAR}+");
    Regex::new(&format!(r#"({token})\s*=\s*(?:({token})|"([^"]*)")"#))
        .expect("auth-param pattern is valid")
});

/// One scheme entry of a challenge, names lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthScheme {
    pub name: String,
    pub parameters: HashMap<String, String>,
}

impl AuthScheme {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// Parse a challenge into its scheme entries, in order of appearance.
///
/// Never fails: text that does not fit the grammar is skipped.
pub fn parse(challenge: &str) -> Vec<AuthScheme> {
    let schemes: Vec<AuthScheme> = ENTRY_RE
        .captures_iter(challenge)
        .map(|caps| AuthScheme {
            name: caps[1].to_lowercase(),
            parameters: caps
                .get(2)
                .map(|params| parse_params(params.as_str()))
                .unwrap_or_default(),
        })
        .collect();

    debug!(
        schemes = ?schemes.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "parsed challenge"
    );
    schemes
}

fn parse_params(list: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for caps in PARAM_RE.captures_iter(list) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        // later duplicates overwrite earlier ones
        params.insert(caps[1].to_lowercase(), value.to_owned());
    }
    params
}
