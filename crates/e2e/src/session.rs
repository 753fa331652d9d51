//! Bearer credential carried across cases

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Token adopted by the login case. Starts empty and is never cleared mid-run.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Authorization: Bearer <token>`, or an empty map when not logged in so
    /// the server answers with its own 401.
    pub fn auth_header(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            // A token with control characters cannot be sent; treat it as absent.
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_has_no_header() {
        let session = Session::new();
        assert!(session.token().is_none());
        assert!(session.auth_header().is_empty());
    }

    #[test]
    fn test_later_token_replaces_earlier() {
        let mut session = Session::new();
        session.set_token("first");
        session.set_token("second");
        assert_eq!(session.token(), Some("second"));
        assert_eq!(
            session.auth_header().get(AUTHORIZATION).unwrap(),
            "Bearer second"
        );
    }
}
