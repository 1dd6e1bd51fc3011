use snippetbox_core::password::{hash_password, hash_password_with_cost, verify_password};

const FAST_COST: u32 = 4;

#[test]
fn test_hash_password_uses_default_cost() {
    let hash = hash_password("testpassword123").unwrap();

    assert!(hash.starts_with("$2b$12$"));
    assert_eq!(hash.len(), 60);
}

#[test]
fn test_verify_password_correct() {
    let password = "correctpassword";
    let hash = hash_password_with_cost(password, FAST_COST).unwrap();

    assert!(verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_incorrect() {
    let hash = hash_password_with_cost("correctpassword", FAST_COST).unwrap();

    assert!(!verify_password("wrongpassword", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash() {
    let result = verify_password("testpassword", "not_a_valid_bcrypt_hash");

    assert!(result.is_err());
}

#[test]
fn test_hash_generates_unique_hashes() {
    let password = "samepassword";
    let hash1 = hash_password_with_cost(password, FAST_COST).unwrap();
    let hash2 = hash_password_with_cost(password, FAST_COST).unwrap();

    assert_ne!(hash1, hash2);
    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

#[test]
fn test_hash_unicode_characters() {
    let password = "пароль密码🔒";
    let hash = hash_password_with_cost(password, FAST_COST).unwrap();

    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("пароль", &hash).unwrap());
}
