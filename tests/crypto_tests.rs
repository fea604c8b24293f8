//! Integration tests for the passman crypto module.

use passman::crypto::{derive_key, generate_salt, open, seal, NONCE_LEN, TAG_LEN};
use passman::errors::PassmanError;

// ---------------------------------------------------------------------------
// Seal / open round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_open_roundtrip() {
    let salt = generate_salt();
    let key = derive_key(b"correct horse", &salt);
    let plaintext = br#"{"entries":{"github":{"password":"p@ss"}},"encrypted":false}"#;

    let (nonce, ciphertext) = seal(&key, plaintext).expect("seal should succeed");

    // Ciphertext carries the 16-byte tag on top of the plaintext.
    assert_eq!(ciphertext.len(), plaintext.len() + TAG_LEN);
    assert_eq!(nonce.len(), NONCE_LEN);

    let recovered = open(&key, &nonce, &ciphertext).expect("open should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn roundtrip_with_any_salt_and_payload() {
    let payloads: [&[u8]; 4] = [b"", b"x", &[0u8; 1000], "ünïcødé 🔐".as_bytes()];
    for payload in payloads {
        let salt = generate_salt();
        let key = derive_key(b"pw", &salt);
        let (nonce, ct) = seal(&key, payload).unwrap();
        assert_eq!(open(&key, &nonce, &ct).unwrap(), payload);
    }
}

#[test]
fn seal_uses_fresh_nonce_each_time() {
    let key = derive_key(b"pw", &[7u8; 16]);
    let (n1, c1) = seal(&key, b"same").unwrap();
    let (n2, c2) = seal(&key, b"same").unwrap();

    assert_ne!(n1, n2, "nonces must not repeat");
    assert_ne!(c1, c2);
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn flipping_any_bit_fails_open() {
    let key = derive_key(b"tamper-test", &[1u8; 16]);
    let (nonce, ciphertext) = seal(&key, b"short secret").unwrap();

    for byte in 0..ciphertext.len() {
        for bit in 0..8 {
            let mut tampered = ciphertext.clone();
            tampered[byte] ^= 1 << bit;
            let result = open(&key, &nonce, &tampered);
            assert!(
                matches!(result, Err(PassmanError::DecryptionFailed)),
                "flip of byte {byte} bit {bit} was not detected"
            );
        }
    }
}

#[test]
fn flipping_nonce_bit_fails_open() {
    let key = derive_key(b"tamper-test", &[1u8; 16]);
    let (mut nonce, ciphertext) = seal(&key, b"short secret").unwrap();
    nonce[0] ^= 0x80;
    assert!(open(&key, &nonce, &ciphertext).is_err());
}

#[test]
fn truncated_ciphertext_fails_open() {
    let key = derive_key(b"pw", &[2u8; 16]);
    let (nonce, ciphertext) = seal(&key, b"some data").unwrap();

    for len in [0, 1, TAG_LEN - 1, ciphertext.len() - 1] {
        assert!(open(&key, &nonce, &ciphertext[..len]).is_err(), "len {len}");
    }
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derive_key_is_deterministic() {
    let salt = [0x42u8; 16];
    let a = derive_key(b"password", &salt);
    let b = derive_key(b"password", &salt);
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn derive_key_depends_on_salt_and_password() {
    let base = derive_key(b"password", &[0u8; 16]);
    let other_salt = derive_key(b"password", &[1u8; 16]);
    let other_password = derive_key(b"passwore", &[0u8; 16]);

    assert_ne!(base.as_bytes(), other_salt.as_bytes());
    assert_ne!(base.as_bytes(), other_password.as_bytes());
}

#[test]
fn empty_password_still_derives() {
    let key = derive_key(b"", &[0u8; 16]);
    assert_eq!(key.as_bytes().len(), 32);
}

#[test]
fn wrong_password_fails_open() {
    let salt = generate_salt();
    for i in 0..10 {
        let right = format!("right-{i}");
        let wrong = format!("wrong-{i}");

        let (nonce, ct) = seal(&derive_key(right.as_bytes(), &salt), b"secret").unwrap();
        let result = open(&derive_key(wrong.as_bytes(), &salt), &nonce, &ct);
        assert!(matches!(result, Err(PassmanError::DecryptionFailed)));
    }
}
