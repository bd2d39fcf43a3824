//! Shared test helpers

use proptest::prelude::*;
use vista_core::{AgentState, ParticipantId, SignalSet, SourceKind, TrackRef, TrackSid, TrackSignal};

pub fn signal(kind: SourceKind, sid: u64, muted: bool) -> TrackSignal {
    let participant = if kind.is_assistant() { 2 } else { 1 };
    TrackSignal::new(
        kind,
        TrackRef::new(ParticipantId::new(participant), TrackSid::new(sid)),
        muted,
    )
}

fn arb_slot(kind: SourceKind) -> impl Strategy<Value = Option<TrackSignal>> {
    proptest::option::of((1u64..4, any::<bool>()).prop_map(move |(sid, muted)| signal(kind, sid, muted)))
}

fn arb_agent_state() -> impl Strategy<Value = AgentState> {
    prop_oneof![
        Just(AgentState::Disconnected),
        Just(AgentState::Listening),
        Just(AgentState::Thinking),
        Just(AgentState::Speaking),
    ]
}

pub fn arb_signals() -> impl Strategy<Value = SignalSet> {
    (
        arb_slot(SourceKind::LocalCamera),
        arb_slot(SourceKind::LocalScreenShare),
        arb_slot(SourceKind::RemoteAssistantAudio),
        arb_slot(SourceKind::RemoteAssistantVideo),
        arb_agent_state(),
    )
        .prop_map(|(camera, screen, audio, video, state)| {
            let mut signals = SignalSet::new().with_agent_state(state);
            signals.put(SourceKind::LocalCamera, camera);
            signals.put(SourceKind::LocalScreenShare, screen);
            signals.put(SourceKind::RemoteAssistantAudio, audio);
            signals.put(SourceKind::RemoteAssistantVideo, video);
            signals
        })
}
