//! Assistant (agent) coarse state
//!
//! Opaque to the layout rules; carried through to the audio indicator tile so
//! the renderer can animate listening/thinking/speaking.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    #[default]
    Disconnected,
    Connecting,
    Initializing,
    Listening,
    Thinking,
    Speaking,
}

impl AgentState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Initializing => "initializing",
            Self::Listening => "listening",
            Self::Thinking => "thinking",
            Self::Speaking => "speaking",
        }
    }

    /// Agent has finished joining and is taking part in the conversation
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Listening | Self::Thinking | Self::Speaking)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_state_serde_names() {
        let json = serde_json::to_string(&AgentState::Speaking).unwrap();
        assert_eq!(json, "\"speaking\"");
        let parsed: AgentState = serde_json::from_str("\"thinking\"").unwrap();
        assert_eq!(parsed, AgentState::Thinking);
        assert_eq!(parsed.to_string(), "thinking");
    }

    #[test]
    fn test_agent_state_activity() {
        assert!(!AgentState::default().is_active());
        assert!(!AgentState::Initializing.is_active());
        assert!(AgentState::Listening.is_active());
    }
}
