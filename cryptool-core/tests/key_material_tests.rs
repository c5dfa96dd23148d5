#![allow(missing_docs)]
use std::collections::HashSet;
use std::thread;

use cryptool_core::key_material::{KeyMaterial, random_bytes};

#[test]
fn test_generate_exact_lengths() {
    let cbc = KeyMaterial::generate(32, 16).expect("key material");
    assert_eq!(cbc.key().len(), 32);
    assert_eq!(cbc.iv().len(), 16);

    let gcm = KeyMaterial::generate(32, 12).expect("key material");
    assert_eq!(gcm.key().len(), 32);
    assert_eq!(gcm.iv().len(), 12);
}

#[test]
fn test_successive_generations_never_collide() {
    let mut keys = HashSet::new();
    let mut ivs = HashSet::new();
    for _ in 0..10_000 {
        let material = KeyMaterial::generate(32, 16).expect("key material");
        assert!(keys.insert(material.key().to_vec()), "key collision");
        assert!(ivs.insert(material.iv().to_vec()), "iv collision");
    }
}

#[test]
fn test_key_and_iv_are_independent() {
    let material = KeyMaterial::generate(16, 16).expect("key material");
    assert_ne!(material.key(), material.iv());
}

#[test]
fn test_concurrent_generation_is_uncorrelated() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..250)
                    .map(|_| KeyMaterial::generate(32, 12).expect("key material").key().to_vec())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for key in handle.join().expect("worker panicked") {
            assert!(seen.insert(key), "key collision across threads");
        }
    }
    assert_eq!(seen.len(), 8 * 250);
}

#[test]
fn test_debug_output_hides_bytes() {
    let material = KeyMaterial::generate(32, 16).expect("key material");
    let rendered = format!("{material:?}");
    assert!(rendered.contains("key_len: 32"));
    assert!(!rendered.contains(&format!("{:?}", material.key())));
}

#[test]
fn test_random_bytes_length() {
    assert!(random_bytes(0).expect("random bytes").is_empty());
    assert_eq!(random_bytes(64).expect("random bytes").len(), 64);
}
