//! Binding resolution through the public API

use r6s_stats::{
    commands::{
        bind::{bind, unbind},
        resolve_username,
    },
    config::{BindingBackend, Settings},
    storage::{open_binding_store, BindingStore, JsonBindingStore},
    ChatUserId,
};
use tempfile::TempDir;

#[test]
fn test_json_bindings_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bindings.json");
    let user = ChatUserId::new("10001");

    {
        let mut store = JsonBindingStore::new(&path);
        bind(&mut store, &user, "MacieJay").unwrap();
    }

    let store = JsonBindingStore::new(&path);
    let name = resolve_username(None, Some(&user), Some(&store), "Default").unwrap();
    assert_eq!(name, "MacieJay");
}

#[test]
fn test_sqlite_backend_from_settings() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::from_lookup(|key| match key {
        "R6S_CACHE_DIR" => Some(dir.path().display().to_string()),
        "R6S_BINDINGS" => Some("sqlite".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(settings.bindings, BindingBackend::Sqlite);

    let user = ChatUserId::new("10001");
    let mut store = open_binding_store(&settings).unwrap();
    bind(store.as_mut(), &user, "Beaulo").unwrap();
    assert_eq!(store.get(&user).unwrap().as_deref(), Some("Beaulo"));

    assert!(unbind(store.as_mut(), &user).unwrap());
    let name = resolve_username(None, Some(&user), Some(store.as_ref()), &settings.default_name).unwrap();
    assert_eq!(name, "MacieJay");
}
