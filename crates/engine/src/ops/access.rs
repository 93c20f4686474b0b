//! Authorization gates. Both run entirely on the decoded claim set,
//! before any store access.

use crate::{Claims, EngineError, Identity, ResultEngine};

pub(crate) fn require_admin(identity: &Identity) -> ResultEngine<Claims> {
    let claims = identity.claims()?;
    if !claims.is_admin() {
        return Err(EngineError::Forbidden("not an admin user".to_string()));
    }
    Ok(claims)
}

pub(crate) fn require_owner_or_admin(identity: &Identity, owner_id: &str) -> ResultEngine<Claims> {
    let claims = identity.claims()?;
    if claims.is_admin() || claims.matches_uid(owner_id) {
        return Ok(claims);
    }
    Err(EngineError::Forbidden(format!(
        "user {} is not an admin and does not own {owner_id}",
        claims.uid
    )))
}
