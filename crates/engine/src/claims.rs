//! Bearer credential and claim set.
//!
//! Every scoped operation takes an explicit [`Identity`] instead of fishing
//! a token out of ambient request context, so the authorization dependency
//! is visible at each call site.
//!
//! The credential is a JWT whose payload is decoded **without verifying the
//! signature**: verification is delegated to the identity issuer sitting in
//! front of this engine. Do not expose the engine without that layer.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::{EngineError, ResultEngine};

/// Role suffix that marks an administrator in the issuer's group list.
const ADMIN_ROLE_SUFFIX: &str = "FrAdmins";

/// The caller's credential, threaded explicitly through every scoped call.
#[derive(Clone)]
pub struct Identity {
    token: Option<String>,
}

impl Identity {
    /// Identity carrying a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Identity with no credential. Every scoped operation rejects it.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Decodes the claim set from the bearer token.
    ///
    /// A missing or undecodable token fails with
    /// [`EngineError::Unauthenticated`].
    pub fn claims(&self) -> ResultEngine<Claims> {
        let token = self.token.as_deref().ok_or_else(|| {
            EngineError::Unauthenticated("required token not found".to_string())
        })?;
        Claims::from_unverified_token(token)
    }
}

// The token must never end up in logs or error text.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token {
            Some(_) => f.write_str("Identity(bearer <redacted>)"),
            None => f.write_str("Identity(anonymous)"),
        }
    }
}

/// Claim set recovered from the credential payload.
#[derive(Clone, Debug, Deserialize)]
pub struct Claims {
    #[serde(rename = "preferred_username", default)]
    pub uid: String,
    #[serde(rename = "groups", default)]
    pub roles: Vec<String>,
    #[serde(rename = "name", default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl Claims {
    /// Parses the payload segment of a JWT without checking the signature.
    fn from_unverified_token(token: &str) -> ResultEngine<Claims> {
        let invalid = || EngineError::Unauthenticated("invalid token".to_string());

        let payload = token.split('.').nth(1).ok_or_else(invalid)?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.as_bytes())
            .map_err(|_| invalid())?;
        serde_json::from_slice(&bytes).map_err(|_| invalid())
    }

    /// Returns `true` if the role list carries the admin marker.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.ends_with(ADMIN_ROLE_SUFFIX))
    }

    /// Returns `true` if the claimed identity matches `uid`.
    pub fn matches_uid(&self, uid: &str) -> bool {
        self.uid == uid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forge(uid: &str, roles: &[&str]) -> String {
        let payload = serde_json::json!({
            "preferred_username": uid,
            "groups": roles,
            "name": "Test User",
        });
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn decodes_uid_and_roles() {
        let claims = Identity::bearer(forge("fruser1", &["T27FrSellers"]))
            .claims()
            .unwrap();
        assert_eq!(claims.uid, "fruser1");
        assert!(!claims.is_admin());
        assert!(claims.matches_uid("fruser1"));
        assert!(!claims.matches_uid("fruser2"));
    }

    #[test]
    fn admin_marker_is_a_suffix_match() {
        let claims = Identity::bearer(forge("boss", &["T27FrAdmins"]))
            .claims()
            .unwrap();
        assert!(claims.is_admin());
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let err = Identity::anonymous().claims().unwrap_err();
        assert!(matches!(err, EngineError::Unauthenticated(_)));
    }

    #[test]
    fn garbled_token_is_unauthenticated() {
        let err = Identity::bearer("not-a-jwt").claims().unwrap_err();
        assert!(matches!(err, EngineError::Unauthenticated(_)));

        let err = Identity::bearer("a.%%%%.c").claims().unwrap_err();
        assert!(matches!(err, EngineError::Unauthenticated(_)));
    }

    #[test]
    fn debug_never_prints_the_token() {
        let identity = Identity::bearer("secret-token");
        assert!(!format!("{identity:?}").contains("secret-token"));
    }
}
