//! Conformance suite for [`SessionStore`] backends.

use crate::error::SessionError;
use crate::store::{SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

/// Run the full session store conformance test suite.
///
/// Call this from a backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub fn run_session_store_conformance_tests(
    store: &dyn SessionStore,
) -> Result<(), SessionError> {
    test_get_missing(store)?;
    test_set_and_get(store)?;
    test_overwrite(store)?;
    test_remove(store)?;
    test_keys_are_independent(store)?;
    Ok(())
}

fn test_get_missing(store: &dyn SessionStore) -> Result<(), SessionError> {
    let val = store.get("conformance-missing")?;
    assert!(val.is_none(), "get on missing key should return None");
    Ok(())
}

fn test_set_and_get(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.set(ACCESS_TOKEN_KEY, "tok-abc")?;
    let val = store.get(ACCESS_TOKEN_KEY)?;
    assert_eq!(val.as_deref(), Some("tok-abc"));
    Ok(())
}

fn test_overwrite(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.set(ACCESS_TOKEN_KEY, "tok-1")?;
    store.set(ACCESS_TOKEN_KEY, "tok-2")?;
    let val = store.get(ACCESS_TOKEN_KEY)?;
    assert_eq!(val.as_deref(), Some("tok-2"), "set should overwrite");
    Ok(())
}

fn test_remove(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.set(REFRESH_TOKEN_KEY, "ref-1")?;
    let existed = store.remove(REFRESH_TOKEN_KEY)?;
    assert!(existed, "remove should return true for existing key");
    assert!(store.get(REFRESH_TOKEN_KEY)?.is_none());

    let existed = store.remove(REFRESH_TOKEN_KEY)?;
    assert!(!existed, "remove on missing key should return false");
    Ok(())
}

fn test_keys_are_independent(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.set(ACCESS_TOKEN_KEY, "tok")?;
    store.set(REFRESH_TOKEN_KEY, "ref")?;
    store.set(USER_KEY, r#"{"username":"alice"}"#)?;

    store.remove(ACCESS_TOKEN_KEY)?;
    assert_eq!(
        store.get(REFRESH_TOKEN_KEY)?.as_deref(),
        Some("ref"),
        "removing one key must not disturb the others"
    );
    assert!(store.get(USER_KEY)?.is_some());
    Ok(())
}
