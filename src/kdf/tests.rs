use super::*;

fn test_params() -> KdfParams {
    // Minimal costs so the suite stays fast; cost handling itself is
    // covered by test_different_params_change_the_key
    KdfParams {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

#[test]
fn test_derive_key_is_deterministic() {
    let salt = generate_salt().unwrap();
    let params = test_params();

    let key1 = derive_key("1234", &salt, &params).unwrap();
    let key2 = derive_key("1234", &salt, &params).unwrap();

    assert_eq!(&key1[..], &key2[..]);
    assert_eq!(key1.len(), KEY_LEN);
}

#[test]
fn test_different_salts_change_the_key() {
    let params = test_params();
    let salt1 = generate_salt().unwrap();
    let salt2 = generate_salt().unwrap();

    let key1 = derive_key("1234", &salt1, &params).unwrap();
    let key2 = derive_key("1234", &salt2, &params).unwrap();

    assert_ne!(&key1[..], &key2[..]);
}

#[test]
fn test_different_secrets_change_the_key() {
    let params = test_params();
    let salt = generate_salt().unwrap();

    let key1 = derive_key("1234", &salt, &params).unwrap();
    let key2 = derive_key("0000", &salt, &params).unwrap();

    assert_ne!(&key1[..], &key2[..]);
}

#[test]
fn test_different_params_change_the_key() {
    let salt = generate_salt().unwrap();

    let key1 = derive_key("1234", &salt, &test_params()).unwrap();
    let key2 = derive_key(
        "1234",
        &salt,
        &KdfParams {
            memory_cost: 2048,
            time_cost: 1,
            parallelism: 1,
        },
    )
    .unwrap();

    assert_ne!(&key1[..], &key2[..]);
}

#[test]
fn test_generate_salt_length_and_uniqueness() {
    let salt1 = generate_salt().unwrap();
    let salt2 = generate_salt().unwrap();

    assert_eq!(salt1.len(), SALT_LEN);
    assert_ne!(salt1, salt2);
}

#[test]
fn test_short_salt_is_rejected() {
    let result = derive_key("1234", &[0u8; 4], &test_params());
    assert!(result.is_err());
}

#[test]
fn test_database_key_is_random() {
    let key1 = generate_database_key().unwrap();
    let key2 = generate_database_key().unwrap();

    assert_eq!(key1.len(), KEY_LEN);
    assert_ne!(&key1[..], &key2[..]);
}

#[test]
fn test_kdf_params_serialization_roundtrip() {
    let params = KdfParams::interactive();
    let raw = serde_json::to_string(&params).unwrap();
    let parsed: KdfParams = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, params);
}
