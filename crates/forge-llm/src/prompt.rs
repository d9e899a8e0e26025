//! Prompt assembly.
//!
//! The wire format is plain role blocks, one per message:
//!
//! ```text
//! SYSTEM:
//! <system prompt>
//!
//! USER:
//! <message>
//!
//! ASSISTANT:
//! ```
//!
//! The trailing `ASSISTANT:` header cues the model to answer.

use std::fmt::Write as _;

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The human.
    User,
    /// The model.
    Assistant,
}

impl ChatRole {
    fn header(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Assistant => "ASSISTANT",
        }
    }
}

/// One prior exchange in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Who said it.
    pub role: ChatRole,
    /// What was said.
    pub text: String,
}

/// Default system prompt when the user has not provided one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a game development assistant.

Capabilities:
- Write C# scripts for Unity
- Write GDScript for Godot
- Write C++ for Unreal Engine
- Explain game development concepts
- Debug code and fix errors
- Suggest game architecture

Guidelines:
- Keep code clean and well-commented
- Follow engine-specific conventions
- Provide complete, working code
- Be concise but thorough";

/// Assemble the full prompt for one generation.
///
/// `history` is bounded to its last `max_history` messages; the project
/// context, when present, becomes a second system block.
#[must_use]
pub fn assemble(
    system_prompt: &str,
    context: Option<&str>,
    history: &[ChatMessage],
    user_message: &str,
    max_history: usize,
) -> String {
    let mut out = String::new();
    push_block(&mut out, "SYSTEM", system_prompt);
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        push_block(&mut out, "SYSTEM", &format!("Context: {context}"));
    }
    let skip = history.len().saturating_sub(max_history);
    for message in &history[skip..] {
        push_block(&mut out, message.role.header(), &message.text);
    }
    push_block(&mut out, "USER", user_message);
    out.push_str("ASSISTANT:\n");
    out
}

fn push_block(out: &mut String, role: &str, content: &str) {
    let _ = write!(out, "{role}:\n{content}\n\n");
}
