use std::sync::Arc;
use std::time::Duration;

use login_throttle_application::{
    AttemptStore, BAN_DURATION, Clock, LoginThrottlePolicy, LoginThrottleService,
};
use login_throttle_domain::{AttemptRecord, ClientKey};

use super::InMemoryAttemptStore;
use crate::ManualClock;

fn key(value: &str) -> ClientKey {
    ClientKey::new(value).unwrap_or_else(|_| unreachable!())
}

fn throttle() -> (LoginThrottleService, Arc<InMemoryAttemptStore>, Arc<ManualClock>) {
    let store = Arc::new(InMemoryAttemptStore::new());
    let clock = Arc::new(ManualClock::new());
    let service = LoginThrottleService::new(
        store.clone(),
        clock.clone(),
        LoginThrottlePolicy::default(),
    );
    (service, store, clock)
}

#[test]
fn first_failure_creates_record() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();
    let client = key("10.0.0.1");

    let record = store.record_failure(&client, clock.now(), BAN_DURATION);

    assert_eq!(record.count(), 1);
    assert_eq!(store.tracked_clients(), 1);
}

#[test]
fn write_slides_expiry_forward() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();
    let client = key("10.0.0.1");

    store.record_failure(&client, clock.now(), BAN_DURATION);
    clock.advance(Duration::from_secs(200));
    store.record_failure(&client, clock.now(), BAN_DURATION);
    clock.advance(Duration::from_secs(200));

    let record = store.find_active(&client, clock.now(), BAN_DURATION);
    assert_eq!(record.map(|record| record.count()), Some(2));
}

#[test]
fn expired_record_reads_as_absent_and_is_removed() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();
    let client = key("10.0.0.1");

    store.record_failure(&client, clock.now(), BAN_DURATION);
    clock.advance(BAN_DURATION);

    assert!(store.find_active(&client, clock.now(), BAN_DURATION).is_none());
    assert_eq!(store.tracked_clients(), 0);
}

#[test]
fn write_after_expiry_starts_from_one() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();
    let client = key("10.0.0.1");

    for _ in 0..5 {
        store.record_failure(&client, clock.now(), BAN_DURATION);
    }
    clock.advance(BAN_DURATION + Duration::from_secs(1));

    let record = store.record_failure(&client, clock.now(), BAN_DURATION);
    assert_eq!(record.count(), 1);
}

#[test]
fn unbounded_ban_duration_does_not_overflow() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();
    let client = key("10.0.0.1");
    let unbounded = Duration::from_secs(u64::MAX);

    store.record_failure(&client, clock.now(), unbounded);
    clock.advance(Duration::from_secs(86_400));
    store.record_failure(&client, clock.now(), unbounded);

    let record = store.find_active(&client, clock.now(), unbounded);
    assert_eq!(record.map(|record| record.count()), Some(2));
    assert_eq!(store.purge_expired(clock.now(), unbounded), 0);
}

#[test]
fn purge_removes_only_expired_records() {
    let store = InMemoryAttemptStore::new();
    let clock = ManualClock::new();

    store.record_failure(&key("old"), clock.now(), BAN_DURATION);
    clock.advance(Duration::from_secs(250));
    store.record_failure(&key("new"), clock.now(), BAN_DURATION);
    clock.advance(Duration::from_secs(60));

    assert_eq!(store.purge_expired(clock.now(), BAN_DURATION), 1);
    assert_eq!(store.tracked_clients(), 1);
    assert!(
        store
            .find_active(&key("new"), clock.now(), BAN_DURATION)
            .is_some()
    );
}

#[test]
fn reference_scenario_through_service() {
    let (service, _store, clock) = throttle();
    let client = key("10.0.0.1");

    service.record_failure(&client);
    assert!(!service.is_blocked(&client));

    service.record_failure(&client);
    service.record_failure(&client);
    assert!(service.is_blocked(&client));

    clock.advance(BAN_DURATION + Duration::from_secs(1));
    assert!(!service.is_blocked(&client));
}

#[test]
fn blocking_one_client_leaves_others_alone() {
    let (service, _store, _clock) = throttle();
    let first = key("A");
    let second = key("B");

    for _ in 0..3 {
        service.record_failure(&first);
    }

    assert!(service.is_blocked(&first));
    assert!(!service.is_blocked(&second));
}

#[test]
fn concurrent_failures_on_one_key_are_all_counted() {
    let (service, store, clock) = throttle();
    let client = key("10.0.0.1");

    std::thread::scope(|scope| {
        for _ in 0..50 {
            scope.spawn(|| {
                for _ in 0..10 {
                    service.record_failure(&client);
                }
            });
        }
    });

    let record = store.find_active(&client, clock.now(), BAN_DURATION);
    assert_eq!(record.map(|record| record.count()), Some(500));
}

#[test]
fn concurrent_readers_never_see_torn_records() {
    let (service, store, clock) = throttle();
    let client = key("10.0.0.1");

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    clock.advance(Duration::from_millis(10));
                    service.record_failure(&client);
                }
            });
        }

        for _ in 0..8 {
            scope.spawn(|| {
                let mut previous: Option<AttemptRecord> = None;
                for _ in 0..200 {
                    let Some(record) = store.find_active(&client, clock.now(), BAN_DURATION)
                    else {
                        continue;
                    };
                    assert!(record.count() >= 1);
                    assert!(record.last_write_at() <= clock.now());

                    if let Some(previous) = previous {
                        assert!(record.count() >= previous.count());
                        assert!(record.last_write_at() >= previous.last_write_at());
                        if record.count() == previous.count() {
                            assert_eq!(record.last_write_at(), previous.last_write_at());
                        }
                    }
                    if record.count() >= 3 {
                        assert!(service.is_blocked(&client));
                    }
                    previous = Some(record);
                }
            });
        }
    });

    assert_eq!(service.status(&client).failed_attempts, 800);
}

#[test]
fn concurrent_failures_on_distinct_keys_stay_separate() {
    let (service, _store, _clock) = throttle();

    std::thread::scope(|scope| {
        for index in 0..50 {
            let service = service.clone();
            scope.spawn(move || {
                let client = key(&format!("10.0.1.{index}"));
                for _ in 0..2 {
                    service.record_failure(&client);
                }
            });
        }
    });

    assert_eq!(service.tracked_clients(), 50);
    assert!(!service.is_blocked(&key("10.0.1.7")));
}
