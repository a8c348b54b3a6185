use std::env::VarError;

use crate::error::Error;

const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Interpret one environment lookup. Unset is `None`; blank or non-UTF-8 values are errors.
fn token_from_lookup(name: &str, lookup: Result<String, VarError>) -> Result<Option<String>, Error> {
    let raw = match lookup {
        Ok(raw) => raw,
        Err(VarError::NotPresent) => return Ok(None),
        Err(VarError::NotUnicode(_)) => {
            return Err(Error::ConfigInvalid(format!("{name} is not valid UTF-8")));
        }
    };
    match raw.trim() {
        "" => Err(Error::ConfigInvalid(format!("{name} is set but blank"))),
        token => Ok(Some(token.to_string())),
    }
}

/// Resolve the GitHub token: the configured value first, then `GITHUB_TOKEN`.
pub fn resolve_token(configured: &str) -> Result<String, Error> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    token_from_lookup(TOKEN_ENV, std::env::var(TOKEN_ENV))?.ok_or_else(|| {
        Error::ConfigInvalid(format!(
            "github.access_token must be set (or export {TOKEN_ENV})"
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    #[test]
    fn configured_token_wins_and_is_trimmed() {
        assert_eq!(resolve_token("  ghp_abc \n").unwrap(), "ghp_abc");
    }

    #[test]
    fn unset_variable_is_none() {
        let got = token_from_lookup(TOKEN_ENV, Err(VarError::NotPresent)).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn env_token_is_trimmed() {
        let got = token_from_lookup(TOKEN_ENV, Ok(" ghp_env\n".into())).unwrap();
        assert_eq!(got.as_deref(), Some("ghp_env"));
    }

    #[test]
    fn blank_env_token_is_rejected() {
        let err = token_from_lookup(TOKEN_ENV, Ok("  ".into())).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN is set but blank"));
    }

    #[test]
    fn non_utf8_env_token_is_rejected() {
        let lookup = Err(VarError::NotUnicode(OsString::from("ghp_\u{fffd}")));
        let err = token_from_lookup(TOKEN_ENV, lookup).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid(msg) if msg.contains("not valid UTF-8")));
    }
}
