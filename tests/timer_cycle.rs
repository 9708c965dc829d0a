//! End-to-end runs through the real countdown engine on paused tokio time

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::{sleep, Instant};

use cogi_timer::{
    services::CompletionNotifier,
    state::{TimerMode, TimerRunState, TimerSettings},
    storage::MemoryStore,
    tasks::spawn_timer,
};

#[derive(Default)]
struct CountingNotifier(AtomicUsize);

impl CompletionNotifier for CountingNotifier {
    fn notify_completion(&self, _finished: TimerMode) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn settings(auto_start_timer: bool) -> TimerSettings {
    TimerSettings {
        work_duration: 5,
        break_duration: 3,
        long_break_duration: 10,
        sessions_before_long_break: 2,
        auto_start_timer,
    }
}

#[tokio::test(start_paused = true)]
async fn full_cycle_with_manual_starts() {
    let store = Arc::new(MemoryStore::with_settings(settings(false)));
    let notifier = Arc::new(CountingNotifier::default());
    let runtime = spawn_timer(store.clone(), notifier.clone());
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    let begun = Instant::now();
    controller.lock().unwrap().start_timer();
    let state = updates
        .wait_for(|s| s.mode == TimerMode::Break)
        .await
        .unwrap()
        .clone();
    // five ticks down to zero, completion on the sixth period
    assert_eq!(begun.elapsed(), Duration::from_secs(6));
    assert_eq!(
        state,
        TimerRunState {
            time_remaining: 3,
            is_active: false,
            mode: TimerMode::Break,
            completed_sessions: 1,
        }
    );

    controller.lock().unwrap().start_timer();
    let state = updates
        .wait_for(|s| s.mode == TimerMode::Work)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.time_remaining, 5);
    assert_eq!(state.completed_sessions, 1);

    controller.lock().unwrap().start_timer();
    let state = updates
        .wait_for(|s| s.mode == TimerMode::LongBreak)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.time_remaining, 10);
    assert_eq!(state.completed_sessions, 2);
    assert!(!state.is_active);

    controller.lock().unwrap().start_timer();
    let state = updates
        .wait_for(|s| s.mode == TimerMode::Work)
        .await
        .unwrap()
        .clone();
    assert_eq!(state.time_remaining, 5);
    assert_eq!(state.completed_sessions, 0);
    assert!(!state.is_active);

    assert_eq!(notifier.0.load(Ordering::SeqCst), 4);
    assert_eq!(store.saved_sessions().len(), 4);

    // nothing runs until the next start
    sleep(Duration::from_secs(30)).await;
    assert_eq!(controller.lock().unwrap().state(), &state);
}

#[tokio::test(start_paused = true)]
async fn auto_start_chains_intervals() {
    let store = Arc::new(MemoryStore::with_settings(settings(true)));
    let notifier = Arc::new(CountingNotifier::default());
    let runtime = spawn_timer(store.clone(), notifier.clone());
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    controller.lock().unwrap().start_timer();

    let state = updates
        .wait_for(|s| s.mode == TimerMode::Break && s.time_remaining == 1)
        .await
        .unwrap()
        .clone();
    assert!(state.is_active);

    let state = updates
        .wait_for(|s| s.mode == TimerMode::LongBreak)
        .await
        .unwrap()
        .clone();
    assert!(state.is_active);
    assert_eq!(state.completed_sessions, 2);

    let state = updates
        .wait_for(|s| s.mode == TimerMode::Work && s.completed_sessions == 0 && s.time_remaining < 5)
        .await
        .unwrap()
        .clone();
    assert!(state.is_active);

    assert_eq!(notifier.0.load(Ordering::SeqCst), 4);
    // only the manual start is logged
    assert_eq!(store.saved_sessions().len(), 1);
    runtime.shutdown();
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_the_mirror_and_resume_continues() {
    let store = Arc::new(MemoryStore::with_settings(settings(false)));
    let runtime = spawn_timer(store, Arc::new(CountingNotifier::default()));
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 3).await.unwrap();
    controller.lock().unwrap().pause_timer();

    sleep(Duration::from_secs(20)).await;
    let state = controller.lock().unwrap().state().clone();
    assert_eq!(state.time_remaining, 3);
    assert!(!state.is_active);

    let resumed = Instant::now();
    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 2).await.unwrap();
    assert_eq!(resumed.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn settings_change_snaps_the_running_countdown() {
    let store = Arc::new(MemoryStore::with_settings(settings(false)));
    let runtime = spawn_timer(store.clone(), Arc::new(CountingNotifier::default()));
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 2).await.unwrap();

    controller
        .lock()
        .unwrap()
        .update_settings(TimerSettings {
            work_duration: 60,
            ..settings(false)
        })
        .unwrap();

    sleep(Duration::from_secs(10)).await;
    let state = controller.lock().unwrap().state().clone();
    assert_eq!(state.time_remaining, 60);
    assert!(!state.is_active);
    assert_eq!(store.saved_settings().unwrap().work_duration, 60);
}

#[tokio::test(start_paused = true)]
async fn restarted_engine_drops_the_old_countdown() {
    let store = Arc::new(MemoryStore::with_settings(TimerSettings {
        work_duration: 100,
        ..settings(false)
    }));
    let notifier = Arc::new(CountingNotifier::default());
    let runtime = spawn_timer(store, notifier.clone());
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 98).await.unwrap();

    let id = runtime.restart_engine().unwrap();
    assert_eq!(id, 2);
    assert_eq!(controller.lock().unwrap().engine_id(), 2);

    sleep(Duration::from_secs(10)).await;
    let state = controller.lock().unwrap().state().clone();
    assert_eq!(state.time_remaining, 98);
    assert!(!state.is_active);

    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 97).await.unwrap();
    assert_eq!(notifier.0.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_ticking() {
    let store = Arc::new(MemoryStore::with_settings(settings(false)));
    let runtime = spawn_timer(store, Arc::new(CountingNotifier::default()));
    let controller = runtime.controller();
    let mut updates = controller.lock().unwrap().subscribe();

    controller.lock().unwrap().start_timer();
    updates.wait_for(|s| s.time_remaining == 4).await.unwrap();
    runtime.shutdown();

    sleep(Duration::from_secs(10)).await;
    let state = controller.lock().unwrap().state().clone();
    assert_eq!(state.time_remaining, 4);
    assert!(!state.is_active);
    assert_eq!(state.mode, TimerMode::Work);
}
