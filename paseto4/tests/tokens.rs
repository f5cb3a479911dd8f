use jiff::{SignedDuration, Timestamp};
use paseto4::core::V4;
use paseto4::{
    Claims, DecryptOptions, EncryptOptions, GeneratedKeys, KeyData, KeyFormat, KeyKind, KeyPair,
    PasetoError, Purpose, RawKey, SignOptions, SizeLimits, VerifyOptions,
};
use paseto4_core::{base64, tokens};
use serde_json::json;

const SECRET_KEY: &str = "k4.secret.LMThyMVJEesfQX93MJsB77ISs8Ya9YnaEw3Qk-lZvlD7QjtJYfpqqXLflv8Oa82ganJzicoFxwgtcjdc5jMCYA";
const PUBLIC_KEY: &str = "k4.public.-0I7SWH6aqly35b_DmvNoGpyc4nKBccILXI3XOYzAmA";

fn local_key() -> KeyData {
    match paseto4::generate_keys(Purpose::Local, KeyFormat::Paserk).unwrap() {
        GeneratedKeys::Local(key) => key,
        GeneratedKeys::Public { .. } => unreachable!(),
    }
}

fn key_pair(format: KeyFormat) -> (KeyData, KeyData) {
    match paseto4::generate_keys(Purpose::Public, format).unwrap() {
        GeneratedKeys::Public {
            secret_key,
            public_key,
        } => (secret_key, public_key),
        GeneratedKeys::Local(_) => unreachable!(),
    }
}

fn replace_footer(token: &str, footer: &[u8]) -> String {
    let mut segments: Vec<&str> = token.split('.').take(3).collect();
    let footer = base64::encode(footer);
    segments.push(&footer);
    segments.join(".")
}

#[test]
fn local_token_has_three_segments() {
    let key = local_key();
    let token = paseto4::encrypt(
        &key,
        json!({"sub": "a"}),
        EncryptOptions::default().add_exp(false),
    )
    .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], "v4");
    assert_eq!(segments[1], "local");
}

#[test]
fn local_round_trip() {
    let key = local_key();
    let claims = Claims::new()
        .for_subject("johndoe")
        .from_issuer("paseto.example")
        .with_claim("scopes", json!(["read", "write"]));

    let token = paseto4::encrypt(
        &key,
        claims,
        EncryptOptions::default()
            .with_footer(json!({"kid": "k4.lid.example"}))
            .with_assertion("user-42"),
    )
    .unwrap();
    assert!(token.starts_with("v4.local."));

    let opened = paseto4::decrypt(
        &key,
        &token,
        DecryptOptions::default().with_assertion("user-42"),
    )
    .unwrap();
    assert_eq!(opened.claims.subject(), Some("johndoe"));
    assert_eq!(opened.claims.issuer(), Some("paseto.example"));
    assert_eq!(opened.claims.get("scopes"), Some(&json!(["read", "write"])));
    assert!(opened.claims.issued_at().is_some());
    assert!(opened.claims.expiration().is_some());
    assert_eq!(opened.footer_str(), Some(r#"{"kid":"k4.lid.example"}"#));

    let footer = opened
        .footer_claims(&SizeLimits::default())
        .unwrap()
        .unwrap();
    assert_eq!(footer.get("kid"), Some(&json!("k4.lid.example")));
}

#[test]
fn local_rejects_wrong_key_and_assertion() {
    let key = local_key();
    let token = paseto4::encrypt(
        &key,
        json!({"sub": "a"}),
        EncryptOptions::default().with_assertion("i"),
    )
    .unwrap();

    assert!(matches!(
        paseto4::decrypt(&local_key(), &token, DecryptOptions::default().with_assertion("i")),
        Err(PasetoError::TokenInvalid)
    ));
    assert!(matches!(
        paseto4::decrypt(&key, &token, DecryptOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));
    assert!(matches!(
        paseto4::decrypt(&key, &token, DecryptOptions::default().with_assertion("j")),
        Err(PasetoError::TokenInvalid)
    ));
}

#[test]
fn local_rejects_modified_footer() {
    let key = local_key();
    let token = paseto4::encrypt(
        &key,
        json!({"sub": "a"}),
        EncryptOptions::default().with_footer("footer"),
    )
    .unwrap();
    assert!(paseto4::decrypt(&key, &token, DecryptOptions::default()).is_ok());

    let tampered = replace_footer(&token, b"footes");
    assert!(matches!(
        paseto4::decrypt(&key, &tampered, DecryptOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));

    let stripped: Vec<&str> = token.split('.').take(3).collect();
    assert!(matches!(
        paseto4::decrypt(&key, stripped.join("."), DecryptOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));
}

#[test]
fn expired_tokens_fail_after_authenticating() {
    let key = local_key();
    let issued: Timestamp = "2020-01-01T00:00:00Z".parse().unwrap();
    let token = paseto4::encrypt(
        &key,
        json!({"sub": "a"}),
        EncryptOptions::default().valid_at(issued),
    )
    .unwrap();

    // still valid at the time it was issued
    assert!(
        paseto4::decrypt(
            &key,
            &token,
            DecryptOptions::default().valid_at(issued + SignedDuration::from_mins(30))
        )
        .is_ok()
    );
    assert!(matches!(
        paseto4::decrypt(&key, &token, DecryptOptions::default()),
        Err(PasetoError::ClaimInvalid(_))
    ));
}

#[test]
fn relative_expiry_never_outlives_the_token() {
    let secret_key = RawKey::parse(KeyKind::Secret, SECRET_KEY).unwrap();
    let payload =
        paseto4::public::seal::<V4>(&secret_key, br#"{"sub":"a","exp":"1 hour"}"#, b"", b"")
            .unwrap();
    let token = tokens::join(Purpose::Public, &payload, None);

    let far_future = Timestamp::now() + SignedDuration::from_hours(24 * 365 * 100);
    for options in [
        VerifyOptions::default(),
        VerifyOptions::default().valid_at(far_future),
    ] {
        assert!(matches!(
            paseto4::verify(PUBLIC_KEY, &token, options),
            Err(PasetoError::ClaimInvalid(_))
        ));
    }

    let key = RawKey::new(KeyKind::Local, &[7; 32]).unwrap();
    let payload = paseto4::local::dangerous_seal_with_nonce::<V4>(
        &key,
        &[1; 32],
        br#"{"exp":"1 hour"}"#,
        b"",
        b"",
    )
    .unwrap();
    let token = tokens::join(Purpose::Local, &payload, None);
    assert!(matches!(
        paseto4::decrypt(&key, &token, DecryptOptions::default()),
        Err(PasetoError::ClaimInvalid(_))
    ));
}

#[test]
fn not_yet_valid_tokens_fail() {
    let (secret_key, public_key) = key_pair(KeyFormat::Paserk);
    let now = Timestamp::now();
    let token = paseto4::sign(
        &secret_key,
        Claims::new().valid_from(now + SignedDuration::from_hours(2)),
        SignOptions::default()
            .add_iat(false)
            .add_exp(false)
            .valid_at(now + SignedDuration::from_hours(3)),
    )
    .unwrap();

    assert!(matches!(
        paseto4::verify(&public_key, &token, VerifyOptions::default()),
        Err(PasetoError::ClaimInvalid(_))
    ));
    assert!(
        paseto4::verify(
            &public_key,
            &token,
            VerifyOptions::default().valid_at(now + SignedDuration::from_hours(3))
        )
        .is_ok()
    );
}

#[test]
fn public_round_trip() {
    for format in [KeyFormat::Paserk, KeyFormat::Buffer] {
        let (secret_key, public_key) = key_pair(format);
        let token = paseto4::sign(
            &secret_key,
            r#"{"sub":"napoleon","role":"emperor"}"#,
            SignOptions::default()
                .with_footer("some footer")
                .with_assertion(json!({"device": 7})),
        )
        .unwrap();
        assert!(token.starts_with("v4.public."));
        assert_eq!(token.split('.').count(), 4);

        let verified = paseto4::verify(
            &public_key,
            &token,
            VerifyOptions::default().with_assertion(json!({"device": 7})),
        )
        .unwrap();
        assert_eq!(verified.claims.subject(), Some("napoleon"));
        assert_eq!(verified.claims.get("role"), Some(&json!("emperor")));
        assert_eq!(verified.footer.as_deref(), Some(&b"some footer"[..]));
        assert!(
            verified
                .footer_claims(&SizeLimits::default())
                .is_err()
        );
    }
}

#[test]
fn public_rejects_tampering() {
    let (secret_key, public_key) = key_pair(KeyFormat::Paserk);
    let token = paseto4::sign(
        &secret_key,
        json!({"sub": "a"}),
        SignOptions::default().with_footer("footer"),
    )
    .unwrap();

    let (_, other_public_key) = key_pair(KeyFormat::Paserk);
    assert!(matches!(
        paseto4::verify(&other_public_key, &token, VerifyOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));

    let segments: Vec<&str> = token.split('.').collect();
    let payload = base64::decode(segments[2]).unwrap();
    for i in [0, payload.len() / 2, payload.len() - 1] {
        let mut tampered = payload.clone();
        tampered[i] ^= 0x01;
        let token = format!("v4.public.{}.{}", base64::encode(&tampered), segments[3]);
        assert!(matches!(
            paseto4::verify(&public_key, &token, VerifyOptions::default()),
            Err(PasetoError::TokenInvalid)
        ));
    }

    let tampered = replace_footer(&token, b"Footer");
    assert!(matches!(
        paseto4::verify(&public_key, &tampered, VerifyOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));

    let extended = format!("{token}.extra");
    assert!(matches!(
        paseto4::verify(&public_key, &extended, VerifyOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));
}

#[test]
fn known_signature() {
    let token = paseto4::sign(
        SECRET_KEY,
        r#"{"sub":"johndoe","iat":"2023-01-09T15:34:46.865Z"}"#,
        SignOptions::default().add_iat(false).add_exp(false),
    )
    .unwrap();
    assert_eq!(
        token,
        "v4.public.eyJzdWIiOiJqb2huZG9lIiwiaWF0IjoiMjAyMy0wMS0wOVQxNTozNDo0Ni44NjVaIn3YmulzSdjSqbwRUYM5jnwa3pKM1X95RPDFp0DVuCUQ6kO7i6cqxMiqmLJtxnTdzRHZaKbKL1QfW6KNE33678MA"
    );

    let verified = paseto4::verify(PUBLIC_KEY, &token, VerifyOptions::default()).unwrap();
    assert_eq!(verified.claims.subject(), Some("johndoe"));
    assert_eq!(verified.footer, None);
}

#[test]
fn verifies_token_from_another_implementation() {
    let public_key = "k4.public.gX_9QndMMg2u-p_ojdKho9L2mEruUF3WYW4-ZVFoZMg";
    let token = "v4.public.eyJzdWIiOiJuYXBvbGVvbiIsImlhdCI6IjIwMjMtMDEtMTNUMTQ6MTU6NDYuNjQ4WiIsImV4cCI6IjMwMjMtMDEtMDlUMTU6MzQ6NDYuODY1WiJ9sMzd6MAe67mw9cpHxQk8VeEVua-90CoRnl6ubAcDUnfpKhu-tWkW2igPi2DZPrSO8GwWzp4cxMo-vgqaQ2OhCg";

    let verified = paseto4::verify(public_key, token, VerifyOptions::default()).unwrap();
    let keys: Vec<&str> = verified.claims.as_map().keys().map(String::as_str).collect();
    assert_eq!(keys, ["sub", "iat", "exp"]);
    assert_eq!(verified.claims.subject(), Some("napoleon"));
}

#[test]
fn keys_are_bound_to_their_purpose() {
    let local = local_key();
    let (secret_key, public_key) = key_pair(KeyFormat::Paserk);
    let payload = json!({"sub": "a"});

    assert!(matches!(
        paseto4::sign(&local, payload.clone(), SignOptions::default()),
        Err(PasetoError::KeyInvalid)
    ));
    assert!(matches!(
        paseto4::sign(&public_key, payload.clone(), SignOptions::default()),
        Err(PasetoError::KeyInvalid)
    ));
    assert!(matches!(
        paseto4::encrypt(&secret_key, payload.clone(), EncryptOptions::default()),
        Err(PasetoError::KeyInvalid)
    ));

    let token = paseto4::sign(&secret_key, payload.clone(), SignOptions::default()).unwrap();
    assert!(matches!(
        paseto4::verify(&secret_key, &token, VerifyOptions::default()),
        Err(PasetoError::KeyInvalid)
    ));
    assert!(matches!(
        paseto4::decrypt(&local, &token, DecryptOptions::default()),
        Err(PasetoError::TokenInvalid)
    ));

    assert!(matches!(
        paseto4::encrypt("", payload, EncryptOptions::default()),
        Err(PasetoError::TypeInvalid(_))
    ));
}

#[test]
fn payloads_must_be_objects() {
    let key = local_key();
    for payload in [json!([1, 2, 3]), json!("text"), json!(null)] {
        assert!(matches!(
            paseto4::encrypt(&key, payload, EncryptOptions::default()),
            Err(PasetoError::PayloadInvalid(_))
        ));
    }
}

#[test]
fn opened_payloads_are_bounded() {
    let key = local_key();
    let token = paseto4::encrypt(
        &key,
        json!({"a": {"b": {"c": {"d": 1}}}}),
        EncryptOptions::default(),
    )
    .unwrap();

    let limits = SizeLimits {
        max_depth: 4,
        max_keys: 0,
    };
    assert!(matches!(
        paseto4::decrypt(&key, &token, DecryptOptions::default().with_limits(limits)),
        Err(PasetoError::SizeExceeded(_))
    ));
    assert!(paseto4::decrypt(&key, &token, DecryptOptions::default()).is_ok());
}

#[test]
fn generated_key_lengths() {
    let GeneratedKeys::Local(key) = paseto4::generate_keys(Purpose::Local, KeyFormat::Paserk).unwrap()
    else {
        unreachable!()
    };
    let key = key.as_paserk().unwrap();
    assert!(key.starts_with("k4.local."));
    assert_eq!(key.len(), 9 + 43);

    let (secret_key, public_key) = key_pair(KeyFormat::Paserk);
    assert_eq!(secret_key.as_paserk().unwrap().len(), 10 + 86);
    assert_eq!(public_key.as_paserk().unwrap().len(), 10 + 43);

    let GeneratedKeys::Local(key) = paseto4::generate_keys(Purpose::Local, KeyFormat::Buffer).unwrap()
    else {
        unreachable!()
    };
    assert_eq!(key.as_buffer().unwrap().len(), 41);

    let (secret_key, public_key) = key_pair(KeyFormat::Buffer);
    assert_eq!(secret_key.as_buffer().unwrap().len(), 74);
    assert_eq!(public_key.as_buffer().unwrap().len(), 42);
    assert!(secret_key.as_bytes().starts_with(b"k4.secret."));
}

#[test]
fn key_pair_from_secret() {
    let secret_key = RawKey::parse(KeyKind::Secret, SECRET_KEY).unwrap();
    let pair = KeyPair::from_secret::<V4>(secret_key).unwrap();
    assert_eq!(pair.public_key.to_paserk(), PUBLIC_KEY);
}
