use std::sync::Arc;

use chrono::Duration;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use session_cell::{Intent, Outcome, PageKind, SessionError, SessionStore};
use shared_utils::clock::ManualClock;
use shared_utils::ids::SequentialIds;
use shared_utils::test_utils::{TestConfig, TestDates, TestUser};

fn store(config: TestConfig) -> SessionStore {
    SessionStore::new(
        &config.to_app_config(),
        Arc::new(TestDates::early_clock()),
        Arc::new(SequentialIds::starting_at(100)),
    )
}

#[tokio::test]
async fn test_today_follows_clock() {
    let store = store(TestConfig::default());

    assert_eq!(store.today(), TestDates::ymd(2025, 11, 1));
}

#[tokio::test]
async fn test_create_and_remove() {
    let store = store(TestConfig::default());
    let (id, state) = store.create().await;

    assert_eq!(state.kind(), PageKind::Login);
    assert_eq!(store.len().await, 1);

    assert_ok!(store.remove(id).await);
    assert!(store.is_empty().await);
    assert_eq!(store.remove(id).await, Err(SessionError::NotFound(id)));
}

#[tokio::test]
async fn test_dispatch_persists_state() {
    let store = store(TestConfig::unseeded());
    let (id, _) = store.create().await;

    let user = TestUser::default().to_user();
    let (outcome, state) = assert_ok!(store.dispatch(id, Intent::Login(user)).await);

    assert_eq!(outcome, Outcome::applied(PageKind::Specialty));
    assert_eq!(state, assert_ok!(store.get(id).await));
    assert!(state.appointments.is_empty());
}

#[tokio::test]
async fn test_dispatch_to_unknown_session() {
    let store = store(TestConfig::default());

    assert_err!(store.dispatch(Uuid::new_v4(), Intent::Logout).await);
}

fn store_on(clock: &Arc<ManualClock>, idle_minutes: u32) -> SessionStore {
    let config = TestConfig {
        session_idle_minutes: idle_minutes,
        ..TestConfig::default()
    };
    SessionStore::new(
        &config.to_app_config(),
        Arc::<ManualClock>::clone(clock),
        Arc::new(SequentialIds::starting_at(100)),
    )
}

#[tokio::test]
async fn test_idle_session_is_evicted_on_next_create() {
    let clock = Arc::new(ManualClock::on(TestDates::seed_day()));
    let store = store_on(&clock, 30);
    let (abandoned, _) = store.create().await;

    clock.advance(Duration::minutes(31));
    let (fresh, _) = store.create().await;

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get(abandoned).await, Err(SessionError::NotFound(abandoned)));
    assert_ok!(store.get(fresh).await);
}

#[tokio::test]
async fn test_intents_keep_a_session_alive() {
    let clock = Arc::new(ManualClock::on(TestDates::seed_day()));
    let store = store_on(&clock, 30);
    let (active, _) = store.create().await;

    for _ in 0..3 {
        clock.advance(Duration::minutes(20));
        assert_ok!(store.dispatch(active, Intent::Logout).await);
    }
    store.create().await;

    assert_eq!(store.len().await, 2);
    assert_ok!(store.get(active).await);
}

#[tokio::test]
async fn test_idle_session_rejects_intents() {
    let clock = Arc::new(ManualClock::on(TestDates::seed_day()));
    let store = store_on(&clock, 30);
    let (id, _) = store.create().await;

    clock.advance(Duration::minutes(30));

    assert_eq!(
        store.dispatch(id, Intent::Logout).await,
        Err(SessionError::NotFound(id))
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_abandoned_sessions_do_not_accumulate() {
    let clock = Arc::new(ManualClock::on(TestDates::seed_day()));
    let store = store_on(&clock, 30);

    for _ in 0..500 {
        store.create().await;
        clock.advance(Duration::minutes(1));
    }

    assert!(store.len().await <= 31);
}
