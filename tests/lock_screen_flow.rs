//! End-to-end flows through the public API, the way the application's
//! bootstrap and lock screen drive it.

use ledgerlock::prelude::*;

fn fast_params() -> KdfParams {
    KdfParams {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

#[test]
fn first_launch_create_unlock_and_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    // First launch: no credential, the app routes to PIN creation
    let sealed = {
        let store = FileStore::open(&path).unwrap();
        let mut ctx = SecurityContext::with_params(Box::new(store), fast_params());
        ctx.initialize().unwrap();
        assert!(!ctx.has_credential().unwrap());

        ctx.set_credential("2468").unwrap();
        assert!(ctx.verify_credential("2468").unwrap());

        ctx.encrypt(b"march rent: 900.00").unwrap()
    };

    // Second launch: credential exists, the app routes to the lock screen
    let store = FileStore::open(&path).unwrap();
    let mut ctx = SecurityContext::with_params(Box::new(store), fast_params());
    ctx.initialize().unwrap();
    assert!(ctx.has_credential().unwrap());
    assert!(!ctx.is_authenticated());

    // Wrong PIN first, as users do
    assert!(!ctx.verify_credential("0000").unwrap());
    assert!(ctx.verify_credential("2468").unwrap());

    assert_eq!(ctx.decrypt(&sealed).unwrap(), b"march rent: 900.00");
}

#[test]
fn export_moves_data_to_a_fresh_install() {
    let payload = br#"{"transactions":[{"amount":-42.1}],"budgets":{"food":300}}"#;

    // Old device: export with a password
    let envelope = {
        let mut ctx = SecurityContext::with_params(Box::new(MemoryStore::new()), fast_params());
        ctx.initialize().unwrap();
        ctx.export_with_password(payload, "moving day").unwrap()
    };

    // New device: different store, different database key
    let mut ctx = SecurityContext::with_params(Box::new(MemoryStore::new()), fast_params());
    ctx.initialize().unwrap();

    let imported = ctx.import_with_password(&envelope, "moving day").unwrap();
    assert_eq!(imported, payload);

    assert!(matches!(
        ctx.import_with_password(&envelope, "wrong password"),
        Err(SecurityError::InvalidExportPassword)
    ));
}

#[test]
fn forgotten_pin_reset_wipes_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let sealed = {
        let store = FileStore::open(&path).unwrap();
        let mut ctx = SecurityContext::with_params(Box::new(store), fast_params());
        ctx.initialize().unwrap();
        ctx.set_credential("1357").unwrap();
        ctx.verify_credential("1357").unwrap();
        let sealed = ctx.encrypt(b"gone after reset").unwrap();

        ctx.reset().unwrap();
        sealed
    };

    // The restart after reset looks like a first launch
    let store = FileStore::open(&path).unwrap();
    let mut ctx = SecurityContext::with_params(Box::new(store), fast_params());
    ctx.initialize().unwrap();
    assert!(!ctx.has_credential().unwrap());

    // And the old data is unrecoverable under the new database key
    ctx.set_credential("1357").unwrap();
    ctx.verify_credential("1357").unwrap();
    assert!(matches!(
        ctx.decrypt(&sealed),
        Err(SecurityError::DecryptionError)
    ));
}
