//! Result/fallback strategy for generator calls.
//!
//! Every model-assisted step goes through `attempt_json`, which turns every
//! way a generator call can go wrong into an explicit `Attempt::Fallback`
//! carrying the reason. Only cancellation escapes as an error.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::cv::cancel::CancelToken;
use crate::llm_client::{parse_json, TextGenerator};

/// Why a model-assisted step is taking its rule-based path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    /// Network, auth, quota or empty response from the generator.
    #[error("generator unavailable: {0}")]
    GeneratorUnavailable(String),

    /// The generator answered, but not with the requested structure.
    #[error("malformed generator output: {0}")]
    MalformedOutput(String),

    #[error("generator timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
}

/// Outcome of one model-assisted step.
#[derive(Debug)]
pub enum Attempt<T> {
    Produced(T),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cancellation requested")]
pub struct Cancelled;

/// Calls the generator and parses its output into `T`.
///
/// The call is bounded by `timeout` and raced against `cancel`. Cancellation
/// wins over a result that is ready at the same moment.
pub async fn attempt_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    system_prompt: &str,
    timeout: Duration,
    cancel: &CancelToken,
) -> Result<Attempt<T>, Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }

    let call = tokio::time::timeout(timeout, generator.generate(prompt, Some(system_prompt)));
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Cancelled),
        outcome = call => outcome,
    };

    let text = match outcome {
        Err(_elapsed) => return Ok(Attempt::Fallback(FallbackReason::TimedOut(timeout))),
        Ok(Err(e)) => {
            return Ok(Attempt::Fallback(FallbackReason::GeneratorUnavailable(
                e.to_string(),
            )))
        }
        Ok(Ok(text)) => text,
    };

    Ok(match parse_json::<T>(&text) {
        Ok(value) => Attempt::Produced(value),
        Err(e) => Attempt::Fallback(FallbackReason::MalformedOutput(e.to_string())),
    })
}
