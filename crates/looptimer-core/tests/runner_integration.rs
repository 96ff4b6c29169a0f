//! Runner scenarios driven through the store.

use looptimer_core::{
    EventType, LoopNode, Node, RunnerEvent, RunnerStatus, SoundCue, TimerStore,
    COUNTDOWN_DURATION,
};

/// Two events: 2s work, 1s rest.
fn store_with_two_events() -> TimerStore {
    let root = LoopNode::new(
        "root",
        1,
        vec![
            Node::atomic("1", EventType::Work, 2, "Work 1"),
            Node::atomic("2", EventType::Rest, 1, "Rest 1"),
        ],
    );
    let mut store = TimerStore::in_memory();
    store.create_workout(Some(root), Some("Test Workout"));
    store
}

fn tick_n(store: &mut TimerStore, n: u64) {
    for _ in 0..n {
        store.tick();
    }
}

#[test]
fn countdown_to_running_boundary() {
    let mut store = store_with_two_events();
    store.start_runner().expect("runner should start");
    tick_n(&mut store, COUNTDOWN_DURATION);

    let runner = store.runner();
    assert_eq!(runner.status(), RunnerStatus::Running);
    assert_eq!(runner.remaining(), 2);
    assert_eq!(runner.index(), 0);
}

#[test]
fn event_transition_reloads_full_duration() {
    let mut store = store_with_two_events();
    store.start_runner();
    tick_n(&mut store, COUNTDOWN_DURATION);
    tick_n(&mut store, 2);

    assert_eq!(store.runner().index(), 1);
    assert_eq!(store.runner().remaining(), 1);
}

#[test]
fn last_event_completes_run() {
    let mut store = store_with_two_events();
    store.start_runner();
    tick_n(&mut store, COUNTDOWN_DURATION + 2);
    assert_eq!(store.runner().remaining(), 1);

    let event = store.tick();
    assert!(matches!(event, Some(RunnerEvent::Completed { .. })));
    assert_eq!(store.runner().status(), RunnerStatus::Completed);
    assert_eq!(store.runner().remaining(), 0);
    assert_eq!(store.elapsed_duration(), store.total_duration());

    assert!(store.tick().is_none());
}

#[test]
fn pause_freezes_ticks() {
    let mut store = store_with_two_events();
    store.start_runner();
    tick_n(&mut store, COUNTDOWN_DURATION);

    store.toggle_pause();
    let (index, remaining) = (store.runner().index(), store.runner().remaining());
    assert!(store.tick().is_none());
    assert_eq!(store.runner().index(), index);
    assert_eq!(store.runner().remaining(), remaining);

    store.toggle_pause();
    assert_eq!(store.runner().status(), RunnerStatus::Running);
    store.tick();
    assert_eq!(store.runner().remaining(), remaining - 1);
}

#[test]
fn exit_returns_to_idle() {
    let mut store = store_with_two_events();
    store.start_runner();
    store.exit_runner();
    assert_eq!(store.runner().status(), RunnerStatus::Idle);
    assert!(store.runner().queue().is_empty());
    assert_eq!(store.total_duration(), 0);
}

#[test]
fn restart_after_completion() {
    let mut store = store_with_two_events();
    store.start_runner();
    store.skip_to_next();
    store.skip_to_next();
    store.skip_to_next();
    assert_eq!(store.runner().status(), RunnerStatus::Completed);

    store.start_runner();
    assert_eq!(store.runner().status(), RunnerStatus::Countdown);
    assert_eq!(store.runner().remaining(), COUNTDOWN_DURATION);
    assert_eq!(store.runner().index(), 0);
}

#[test]
fn navigation_is_ignored_when_idle() {
    let mut store = store_with_two_events();
    assert!(store.skip_to_next().is_none());
    assert!(store.skip_to_previous().is_none());
    assert!(store.toggle_pause().is_none());
    assert_eq!(store.runner().status(), RunnerStatus::Idle);
}

#[test]
fn cues_follow_the_run() {
    let mut store = store_with_two_events();
    store.start_runner();

    let mut cues = Vec::new();
    while store.runner().status().is_ticking() {
        cues.push(store.runner().cue());
        store.tick();
    }

    assert_eq!(
        cues,
        vec![
            Some(SoundCue::LeadIn),
            Some(SoundCue::LeadIn),
            Some(SoundCue::LeadIn),
            Some(SoundCue::LeadIn),
            Some(SoundCue::Go),
            Some(SoundCue::Tick),
            Some(SoundCue::Switch),
            Some(SoundCue::Switch),
        ]
    );
}

#[test]
fn muting_does_not_change_transitions() {
    let mut muted = store_with_two_events();
    let mut loud = store_with_two_events();
    muted.toggle_mute();
    muted.start_runner();
    loud.start_runner();
    for _ in 0..6 {
        muted.tick();
        loud.tick();
        assert_eq!(muted.runner().status(), loud.runner().status());
        assert_eq!(muted.runner().remaining(), loud.runner().remaining());
        assert_eq!(muted.runner().cue(), None);
    }
}
