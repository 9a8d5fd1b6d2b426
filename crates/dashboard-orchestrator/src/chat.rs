use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashboard_core::format::truthy_text;
use dashboard_core::ChatBackend;
use serde::Serialize;
use serde_json::Value;

use crate::failure::classify_reply;

pub const GREETING: &str = "Hallo! Ich bin dein Smart Trading Assistant. Frag mich z.B.:\n\
• Wie ist mein heutiger Gewinn/Verlust?\n\
• Welche offenen Orders sind riskant?\n\
• Wie hat sich der Nasdaq heute entwickelt?";
pub const UNEXPECTED_REPLY: &str = "Unerwartete Antwort vom Server.";
pub const REQUEST_FAILED: &str =
    "Es ist ein Fehler bei der Anfrage aufgetreten. Bitte versuche es später erneut.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Where the chat window shows its messages.
pub trait ChatTranscript: Send + Sync {
    fn append(&self, message: &ChatMessage);

    /// The input is disabled while a request is in flight.
    fn set_input_enabled(&self, _enabled: bool) {}
}

/// The assistant chat widget next to the dashboard.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    transcript: Arc<dyn ChatTranscript>,
}

impl ChatSession {
    /// Binds the widget and posts the greeting.
    pub fn start(backend: Arc<dyn ChatBackend>, transcript: Arc<dyn ChatTranscript>) -> Self {
        transcript.append(&ChatMessage::new(ChatRole::Assistant, GREETING));
        Self {
            backend,
            transcript,
        }
    }

    /// Sends one message and appends the assistant's answer. Blank input is
    /// ignored and returns `None`.
    pub async fn submit(&self, input: &str) -> Option<ChatMessage> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript
            .append(&ChatMessage::new(ChatRole::User, message));
        self.transcript.set_input_enabled(false);

        let text = match self
            .backend
            .send_message(message)
            .await
            .and_then(classify_reply)
        {
            Ok(body) => reply_text(&body),
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                REQUEST_FAILED.to_string()
            }
        };

        let answer = ChatMessage::new(ChatRole::Assistant, text);
        self.transcript.append(&answer);
        self.transcript.set_input_enabled(true);
        Some(answer)
    }
}

fn reply_text(body: &Value) -> String {
    if let Some(reply) = truthy_text(body.get("reply")) {
        reply
    } else if let Some(error) = truthy_text(body.get("error")) {
        format!("Fehler: {}", error)
    } else {
        UNEXPECTED_REPLY.to_string()
    }
}

/// In-memory transcript for tests and the CLI.
#[derive(Debug)]
pub struct MemoryTranscript {
    messages: Mutex<Vec<ChatMessage>>,
    input_enabled: AtomicBool,
}

impl Default for MemoryTranscript {
    fn default() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            input_enabled: AtomicBool::new(true),
        }
    }
}

impl MemoryTranscript {
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled.load(Ordering::SeqCst)
    }
}

impl ChatTranscript for MemoryTranscript {
    fn append(&self, message: &ChatMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.clone());
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.input_enabled.store(enabled, Ordering::SeqCst);
    }
}
