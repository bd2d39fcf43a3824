//! Session errors
//!
//! Resolution never fails; these only come from mutating the in-memory session.

use thiserror::Error;
use vista_core::{ParticipantId, TrackSid};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Participant not in session: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Track not published: {0}")]
    UnknownTrack(TrackSid),

    #[error("Participant name already taken: {0}")]
    DuplicateParticipant(String),

    #[error("Participant {0} is not an agent")]
    NotAnAgent(ParticipantId),

    #[error("Local participant cannot leave its own session")]
    LocalParticipant,
}

pub type SessionResult<T> = Result<T, SessionError>;
