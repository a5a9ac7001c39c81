//! Key-value persistence
//!
//! LocalStorage in the browser. Native builds keep values in a per-thread map
//! so the same load/save paths run headless and under test.

use crate::error::StorageError;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(StorageError::Unavailable)
}

/// Read a raw value. `Ok(None)` means the key is absent.
#[cfg(target_arch = "wasm32")]
pub fn get(key: &str) -> Result<Option<String>, StorageError> {
    local_storage()?
        .get_item(key)
        .map_err(|_| StorageError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|_| StorageError::WriteRejected(key.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) -> Result<(), StorageError> {
    local_storage()?
        .remove_item(key)
        .map_err(|_| StorageError::WriteRejected(key.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
mod memory {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        pub static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get(key: &str) -> Result<Option<String>, StorageError> {
    Ok(memory::STORE.with(|s| s.borrow().get(key).cloned()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set(key: &str, value: &str) -> Result<(), StorageError> {
    memory::STORE.with(|s| s.borrow_mut().insert(key.to_string(), value.to_string()));
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(key: &str) -> Result<(), StorageError> {
    memory::STORE.with(|s| s.borrow_mut().remove(key));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        assert_eq!(get("storage_test_key").unwrap(), None);
        set("storage_test_key", "[1,2]").unwrap();
        assert_eq!(get("storage_test_key").unwrap().as_deref(), Some("[1,2]"));
        remove("storage_test_key").unwrap();
        assert_eq!(get("storage_test_key").unwrap(), None);
    }
}
