#![allow(missing_docs)]
use std::thread;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use cryptool_core::primitive::{Primitive, PrimitiveOutput};
use cryptool_core::{
    Config, CryptoError, CryptoResult, Dispatcher, Envelope, ErrorKind, InputOrigin, Operation,
    OperationRequest, OperationResult,
};

fn request(json: &str) -> OperationRequest {
    serde_json::from_str(json).expect("valid request json")
}

#[test]
fn test_aes_scenario_quick_brown_fox() {
    let dispatcher = Dispatcher::default();
    let req = request(r#"{"data":"The quick brown fox","name":"text_input.txt","size":19,"type":"text"}"#);

    let envelope = dispatcher.dispatch(Operation::AeadGcm, &req).to_envelope();
    assert!(envelope.success);
    assert_eq!(envelope.original_name.as_deref(), Some("text_input.txt"));
    assert_eq!(envelope.original_size, Some(19));
    assert_eq!(envelope.encrypted_size, Some(19 + 16));
    assert_eq!(envelope.iv.as_deref().map(str::len), Some(24));
    assert!(envelope.encrypt_time.is_some());

    let ciphertext = STANDARD.decode(envelope.encrypted.unwrap()).unwrap();
    assert_eq!(ciphertext.len(), 35);
}

#[test]
fn test_cbc_envelope_pads_to_blocks() {
    let dispatcher = Dispatcher::default();

    let envelope = dispatcher
        .dispatch(Operation::BlockCipherCbc, &OperationRequest::text("t.txt", "The quick brown fox"))
        .to_envelope();
    assert!(envelope.success);
    assert_eq!(envelope.encrypted_size, Some(32));
    assert_eq!(envelope.iv.as_deref().map(str::len), Some(32));

    let envelope = dispatcher
        .dispatch(Operation::BlockCipherCbc, &OperationRequest::file("b.bin", &[0u8; 16]))
        .to_envelope();
    assert_eq!(envelope.encrypted_size, Some(32));
}

#[test]
fn test_rsa_rejects_300_bytes_with_limit_in_message() {
    let dispatcher = Dispatcher::default();
    let req = OperationRequest::file("big.bin", &[0xAB; 300]);

    let result = dispatcher.dispatch(Operation::AsymmetricOaep, &req);
    assert_eq!(result.error_kind(), Some(ErrorKind::PreconditionViolated));

    let envelope = result.to_envelope();
    assert!(!envelope.success);
    let message = envelope.error.unwrap();
    assert!(message.contains("190"), "message was: {message}");
    assert!(message.contains("300"), "message was: {message}");
}

#[test]
fn test_rsa_boundary_191_rejected_190_accepted() {
    let dispatcher = Dispatcher::default();

    let too_big = OperationRequest::text("m.txt", "x".repeat(191));
    assert_eq!(
        dispatcher.dispatch(Operation::AsymmetricOaep, &too_big).error_kind(),
        Some(ErrorKind::PreconditionViolated)
    );

    let fits = OperationRequest::text("m.txt", "x".repeat(190));
    let envelope = dispatcher.dispatch(Operation::AsymmetricOaep, &fits).to_envelope();
    assert!(envelope.success, "error: {:?}", envelope.error);
    assert_eq!(envelope.encrypted_size, Some(256));
    assert!(envelope.keygen_time.is_some());
    assert!(envelope.iv.is_none());
}

#[test]
fn test_limit_uses_decoded_length_not_declared_size() {
    let dispatcher = Dispatcher::default();
    let mut req = OperationRequest::text("m.txt", "short");
    req.size = 10_000;
    let result = dispatcher.dispatch(Operation::Hash, &req);
    assert!(result.is_success());
    assert_eq!(result.to_envelope().original_size, Some(10_000));
}

#[test]
fn test_global_input_limit() {
    let dispatcher = Dispatcher::new(Config {
        max_input_bytes: 8,
        ..Config::default()
    });
    let result = dispatcher.dispatch(Operation::Hash, &OperationRequest::text("a", "123456789"));
    assert_eq!(result.error_kind(), Some(ErrorKind::PreconditionViolated));

    let result = dispatcher.dispatch(Operation::Hash, &OperationRequest::text("a", "12345678"));
    assert!(result.is_success());
}

#[test]
fn test_empty_text_is_invalid_input() {
    let dispatcher = Dispatcher::default();
    for op in [Operation::AeadGcm, Operation::BlockCipherCbc, Operation::Hash] {
        let result = dispatcher.dispatch(op, &OperationRequest::text("e.txt", "   "));
        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
    }
}

#[test]
fn test_malformed_base64_is_invalid_input() {
    let dispatcher = Dispatcher::default();
    let req = OperationRequest {
        data: "data:application/octet-stream;base64,@@@".to_string(),
        name: "bad.bin".to_string(),
        size: 3,
        origin: InputOrigin::File,
    };
    let result = dispatcher.dispatch(Operation::AeadGcm, &req);
    assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
    assert!(!result.to_envelope().success);
}

#[test]
fn test_hash_envelope() {
    let dispatcher = Dispatcher::default();
    let req = request(r#"{"data":"data:text/plain;base64,YWJj","name":"abc.txt","size":3,"type":"file"}"#);
    let envelope = dispatcher.dispatch(Operation::Hash, &req).to_envelope();
    assert!(envelope.success);
    assert_eq!(
        envelope.hash.as_deref(),
        Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert!(envelope.hash_time.is_some());
    assert!(envelope.encrypted.is_none());
}

#[test]
fn test_hash_of_empty_file() {
    let dispatcher = Dispatcher::default();
    let envelope = dispatcher
        .dispatch(Operation::Hash, &OperationRequest::file("empty.bin", &[]))
        .to_envelope();
    assert_eq!(
        envelope.hash.as_deref(),
        Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
    );
}

#[test]
fn test_hash_is_deterministic_through_dispatcher() {
    let dispatcher = Dispatcher::default();
    let req = OperationRequest::text("same.txt", "repeatable");
    let first = dispatcher.dispatch(Operation::Hash, &req).to_envelope();
    let second = dispatcher.dispatch(Operation::Hash, &req).to_envelope();
    assert_eq!(first.hash, second.hash);
}

#[test]
fn test_ecdh_ignores_payload() {
    let dispatcher = Dispatcher::default();
    let envelope = dispatcher
        .dispatch(Operation::KeyAgreement, &request(r#"{"type":"text"}"#))
        .to_envelope();
    assert!(envelope.success, "error: {:?}", envelope.error);
    assert_eq!(envelope.key_agreement, Some(true));
    assert_eq!(envelope.shared_key_length, Some(32));
    assert_eq!(envelope.shared_key.as_deref().map(str::len), Some(64));
}

#[test]
fn test_failure_envelope_never_leaks_material() {
    let dispatcher = Dispatcher::default();
    let req = OperationRequest::file("big.bin", &[0x00; 500]);
    let json = serde_json::to_value(dispatcher.dispatch(Operation::AsymmetricOaep, &req).to_envelope())
        .unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["error".to_string(), "success".to_string()]);
}

#[test]
fn test_envelope_roundtrips_through_json() {
    let dispatcher = Dispatcher::default();
    let envelope = dispatcher
        .dispatch(Operation::AeadGcm, &OperationRequest::text("r.txt", "roundtrip"))
        .to_envelope();
    let json = serde_json::to_string(&envelope).unwrap();
    assert!(json.contains("\"encryptedSize\":25"));
    let parsed: Envelope = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, envelope);
}

#[test]
fn test_concurrent_dispatch() {
    let dispatcher = Dispatcher::default();
    let results: Vec<OperationResult> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dispatcher = &dispatcher;
                scope.spawn(move || {
                    dispatcher.dispatch(Operation::AeadGcm, &OperationRequest::text("c.txt", format!("message {i}")))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut ivs: Vec<_> = results
        .iter()
        .map(|r| r.to_envelope().iv.expect("iv present"))
        .collect();
    ivs.sort();
    ivs.dedup();
    assert_eq!(ivs.len(), 8);
}

struct FailingPrimitive {
    operation: Operation,
    error: CryptoError,
}

impl Primitive for FailingPrimitive {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn label(&self) -> String {
        "failing".to_string()
    }

    fn invoke(&self, _input: &[u8]) -> CryptoResult<PrimitiveOutput> {
        Err(self.error.clone())
    }
}

#[test]
fn test_invoke_errors_become_failures_without_material() {
    let dispatcher = Dispatcher::default();
    let cases = [
        (Operation::KeyAgreement, CryptoError::KeyAgreementMismatch, ErrorKind::KeyAgreementMismatch),
        (Operation::AeadGcm, CryptoError::AuthenticationFailed, ErrorKind::AuthenticationFailed),
        (
            Operation::AsymmetricOaep,
            CryptoError::KeyGenerationFailed("entropy unavailable".to_string()),
            ErrorKind::KeyGenerationFailed,
        ),
        (
            Operation::BlockCipherCbc,
            CryptoError::PrimitiveFailure("cipher fault".to_string()),
            ErrorKind::PrimitiveFailure,
        ),
    ];

    for (operation, error, kind) in cases {
        let primitive = FailingPrimitive { operation, error: error.clone() };
        let req = OperationRequest::text("in.txt", "payload");
        let result = dispatcher.dispatch_primitive(&primitive, &req);
        assert_eq!(result.error_kind(), Some(kind));

        let envelope = result.to_envelope();
        assert_eq!(envelope.error, Some(error.to_string()));

        let json = serde_json::to_value(&envelope).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["error".to_string(), "success".to_string()]);
        assert_eq!(json["success"], false);
    }
}

#[test]
fn test_key_agreement_mismatch_is_not_reported_as_success() {
    let primitive = FailingPrimitive {
        operation: Operation::KeyAgreement,
        error: CryptoError::KeyAgreementMismatch,
    };
    let envelope = Dispatcher::default()
        .dispatch_primitive(&primitive, &OperationRequest::default())
        .to_envelope();
    assert!(!envelope.success);
    assert!(envelope.key_agreement.is_none());
    assert!(envelope.shared_key.is_none());
    assert!(envelope.error.unwrap().contains("mismatch"));
}
