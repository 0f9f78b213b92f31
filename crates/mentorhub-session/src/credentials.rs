//! Login, lookup, and teardown of session credentials.
//!
//! These helpers speak in terms of [`SessionCredentials`] and the key names
//! in [`crate::keys`], so callers never touch raw key strings.

use std::time::Duration;

use tracing::{debug, warn};

use mentorhub_core::result::AppResult;
use mentorhub_core::traits::SessionStore;
use mentorhub_core::types::{SessionCredentials, UserType};

use crate::keys;

/// Persist freshly issued credentials.
///
/// Only the access token carries `access_ttl`; the other keys live until
/// they are explicitly removed.
pub async fn persist_login(
    store: &dyn SessionStore,
    credentials: &SessionCredentials,
    access_ttl: Duration,
) -> AppResult<()> {
    store
        .set(keys::ACCESS_TOKEN, &credentials.access_token, Some(access_ttl))
        .await?;
    store
        .set(keys::REFRESH_TOKEN, &credentials.refresh_token, None)
        .await?;
    store.set(keys::USER_ID, &credentials.user_id, None).await?;
    store
        .set(keys::USER_TYPE, credentials.user_type.as_str(), None)
        .await?;
    debug!(user_id = %credentials.user_id, "Session credentials stored");
    Ok(())
}

/// Read the full credential set, or `None` if any part is missing.
pub async fn read_credentials(store: &dyn SessionStore) -> AppResult<Option<SessionCredentials>> {
    let access_token = store.get(keys::ACCESS_TOKEN).await?;
    let refresh_token = store.get(keys::REFRESH_TOKEN).await?;
    let user_id = store.get(keys::USER_ID).await?;
    let user_type = stored_user_type(store).await?;

    Ok(match (access_token, refresh_token, user_id, user_type) {
        (Some(access_token), Some(refresh_token), Some(user_id), Some(user_type)) => {
            Some(SessionCredentials {
                access_token,
                refresh_token,
                user_id,
                user_type,
            })
        }
        _ => None,
    })
}

/// Read the stored user type.
///
/// An unparsable (blank) value is logged and treated as absent.
pub async fn stored_user_type(store: &dyn SessionStore) -> AppResult<Option<UserType>> {
    let Some(raw) = store.get(keys::USER_TYPE).await? else {
        return Ok(None);
    };

    match raw.parse::<UserType>() {
        Ok(user_type) => Ok(Some(user_type)),
        Err(e) => {
            warn!(value = %raw, error = %e, "Ignoring unparsable stored user type");
            Ok(None)
        }
    }
}

/// Tear the session down: remove the access token, refresh token, and user id.
pub async fn clear_session(store: &dyn SessionStore) -> AppResult<()> {
    store.remove_many(&keys::TEARDOWN_KEYS).await?;
    debug!("Session credentials cleared");
    Ok(())
}
