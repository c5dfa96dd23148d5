// File:    dispatcher.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Turns one client request into one operation result: normalize, check limits, invoke, wrap.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The request dispatcher.
//!
//! A [`Dispatcher`] holds only its [`Config`]. Each call to
//! [`Dispatcher::dispatch`] runs to completion on the calling thread and
//! returns a self-contained [`OperationResult`]; failures are never retried.

use std::time::Instant;

use log::{debug, info, warn};

use crate::config::Config;
use crate::envelope::{Metrics, OperationResult};
use crate::error::{CryptoError, CryptoResult};
use crate::input::{OperationRequest, PlaintextBuffer};
use crate::primitive::{Operation, Primitive};

/// Stateless request handler; cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    /// A dispatcher using `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `operation` over the payload of `request`.
    ///
    /// Every error is folded into [`OperationResult::Failure`]; this never
    /// panics on client input.
    #[must_use]
    pub fn dispatch(&self, operation: Operation, request: &OperationRequest) -> OperationResult {
        let primitive = operation.primitive(&self.config);
        self.dispatch_primitive(primitive.as_ref(), request)
    }

    /// Runs an already built `primitive` over the payload of `request`.
    ///
    /// This is the whole pipeline behind [`dispatch`](Self::dispatch):
    /// normalize, check limits, invoke, wrap. Errors returned by
    /// [`Primitive::invoke`] become failures carrying only their message.
    #[must_use]
    pub fn dispatch_primitive(
        &self,
        primitive: &dyn Primitive,
        request: &OperationRequest,
    ) -> OperationResult {
        let operation = primitive.operation();
        let tag = operation.tag();
        debug!(
            "[{tag}] Request received: type {:?}, declared size {}",
            request.origin, request.size
        );

        let input = if operation.consumes_input() {
            match PlaintextBuffer::from_request(request) {
                Ok(buffer) => buffer,
                Err(e) => return fail(tag, &CryptoError::from(e)),
            }
        } else {
            PlaintextBuffer::empty(request.origin, request.size)
        };

        if let Err(e) = self.check_limits(primitive, input.len()) {
            return fail(tag, &e);
        }

        let started = Instant::now();
        let outcome = primitive.invoke(input.bytes());
        let elapsed = started.elapsed();

        match outcome {
            Ok(output) => {
                info!(
                    "[{tag}] {} successful: {} -> {} bytes",
                    primitive.label(),
                    input.len(),
                    output.payload.len()
                );
                OperationResult::Success {
                    metrics: Metrics {
                        original_name: request.name.clone(),
                        original_size: request.size,
                        elapsed,
                        auxiliary: output.auxiliary,
                    },
                    payload: output.payload,
                }
            }
            Err(e) => fail(tag, &e),
        }
    }

    fn check_limits(&self, primitive: &dyn Primitive, len: usize) -> CryptoResult<()> {
        let limit = primitive
            .max_input_len()
            .map_or(self.config.max_input_bytes, |l| l.min(self.config.max_input_bytes));
        if len > limit {
            return Err(CryptoError::PreconditionViolated {
                algorithm: primitive.label(),
                limit,
                actual: len,
            });
        }
        Ok(())
    }
}

fn fail(tag: &str, error: &CryptoError) -> OperationResult {
    warn!("[{tag}] Error: {error}");
    OperationResult::failure(error)
}
