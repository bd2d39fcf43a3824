//! Benchmarks for layout derivation and composition

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vista_core::{FrameTime, ParticipantId, SignalSet, SourceKind, TrackRef, TrackSid, TrackSignal};
use vista_layout::{derive_layout, CompositionController};

fn signal(kind: SourceKind, sid: u64, muted: bool) -> TrackSignal {
    TrackSignal::new(
        kind,
        TrackRef::new(ParticipantId::new(1), TrackSid::new(sid)),
        muted,
    )
}

fn full_signals() -> SignalSet {
    SignalSet::new()
        .with(signal(SourceKind::LocalCamera, 1, false))
        .with(signal(SourceKind::LocalScreenShare, 2, false))
        .with(signal(SourceKind::RemoteAssistantAudio, 3, false))
        .with(signal(SourceKind::RemoteAssistantVideo, 4, true))
}

fn bench_derive_layout(c: &mut Criterion) {
    let signals = full_signals();

    c.bench_function("derive_layout", |b| {
        b.iter(|| black_box(derive_layout(black_box(&signals))))
    });
}

fn bench_apply_flicker(c: &mut Criterion) {
    let mut controller = CompositionController::new();
    let on = full_signals();
    let off = SignalSet::new();
    let mut now = FrameTime::ZERO;
    let mut toggle = false;

    c.bench_function("controller_apply_flicker", |b| {
        b.iter(|| {
            now = now + Duration::from_millis(16);
            toggle = !toggle;
            let signals = if toggle { &on } else { &off };
            black_box(controller.apply(signals, now))
        })
    });
}

fn bench_composition(c: &mut Criterion) {
    let mut controller = CompositionController::new();
    controller.apply(&full_signals(), FrameTime::ZERO);
    let now = FrameTime::from_millis(100);

    c.bench_function("controller_composition", |b| {
        b.iter(|| black_box(controller.composition(black_box(now))))
    });
}

criterion_group!(
    benches,
    bench_derive_layout,
    bench_apply_flicker,
    bench_composition
);
criterion_main!(benches);
