pub mod chat;
pub mod failure;
pub mod orchestrator;


pub use chat::{ChatMessage, ChatRole, ChatSession, ChatTranscript, MemoryTranscript};
pub use failure::{classify_reply, user_message, LOAD_ERROR_PREFIX};
pub use orchestrator::{FetchOrchestrator, ValueAnalysisTargets, ViewState};
