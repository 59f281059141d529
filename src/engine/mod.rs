//! Talking to the model: prompt, wire format, client, request lifecycle and background jobs.

mod client;
mod error;
#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod fakes;
mod messages;
mod prompt;
mod session;
mod worker;

pub use client::{AnalysisProvider, GeminiClient, build_request, parse_result_text};
pub use error::{ANALYSIS_FAILED_MESSAGE, AnalysisError};
pub use messages::{GenerateContentRequest, GenerateContentResponse};
pub use prompt::{build_instruction, response_schema};
pub use session::{AnalysisSession, Completed, RequestState, Ticket};
pub use worker::{JobRequest, JobResult, SharedProvider, spawn_analysis};
