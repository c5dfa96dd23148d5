//! Step-by-step replay of a finished operation.
//!
//! Everything shown here is read from the response envelope; nothing is
//! recomputed and no key bytes are ever available to print.

use cryptool_core::{Envelope, OperationRequest};
use std::thread;
use std::time::Duration;

/// Describes `envelope` as numbered steps.
pub(crate) fn render(label: &str, request: &OperationRequest, envelope: &Envelope) -> Vec<String> {
    let mut lines = Vec::new();
    let mut step = 0;
    let mut next = |title: &str| {
        step += 1;
        format!("Step {step}: {title}")
    };

    lines.push(next("Input"));
    lines.push(format!(
        "  {} ({} bytes, {:?})",
        request.name, request.size, request.origin
    ));
    lines.push(next(&format!("Running {label}")));

    if !envelope.success {
        lines.push(next("Failed"));
        lines.push(format!(
            "  {}",
            envelope.error.as_deref().unwrap_or("unknown error")
        ));
        return lines;
    }

    if envelope.iv.is_some() || envelope.keygen_time.is_some() {
        lines.push(next("Key material"));
        lines.push("  Fresh key generated for this request (never shown)".to_string());
        if let Some(iv) = &envelope.iv {
            lines.push(format!("  IV (hex): {iv}"));
        }
        if let Some(ms) = &envelope.keygen_time {
            lines.push(format!("  Key pair generated in {ms} ms"));
        }
    }

    if let Some(encrypted) = &envelope.encrypted {
        lines.push(next("Ciphertext"));
        if let Some(size) = envelope.encrypted_size {
            lines.push(format!("  {size} bytes"));
        }
        lines.push(format!("  Base64: {encrypted}"));
    }
    if let Some(hash) = &envelope.hash {
        lines.push(next("Digest"));
        lines.push(format!("  SHA-256: {hash}"));
    }
    if let Some(shared) = &envelope.shared_key {
        lines.push(next("Shared secret"));
        lines.push(format!(
            "  Both parties agree: {}",
            envelope.key_agreement.unwrap_or(false)
        ));
        lines.push(format!(
            "  {} bytes: {shared}",
            envelope.shared_key_length.unwrap_or_default()
        ));
    }

    if let Some(ms) = envelope.encrypt_time.as_ref().or(envelope.hash_time.as_ref()) {
        lines.push(next("Timing"));
        lines.push(format!("  Completed in {ms} ms"));
    }

    lines.push("***Complete***".to_string());
    lines
}

/// Prints `lines`, pausing `delay` after each step heading.
pub(crate) fn replay(lines: &[String], delay: Duration) {
    for line in lines {
        println!("{line}");
        if !delay.is_zero() && line.starts_with("Step ") {
            thread::sleep(delay);
        }
    }
}
