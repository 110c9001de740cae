//! Tests for the expiry sweep and its cross-instance lease.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use rust_decimal_macros::dec;

use super::*;
use crate::domain::ports::{
    AvailabilityStore, BookingRepository as _, MockAvailabilityStore, UnitRepository as _,
    UserRepository as _,
};
use crate::domain::{
    AccommodationType, AvailabilityService, BookingDraft, BookingPorts, BookingStatus, DateRange,
    MarkupPolicy, Unit, UnitEventRecorder, UnitEventType, UnitId, User, UserId,
};
use crate::outbound::memory::{
    InMemoryAvailabilityStore, InMemoryBookingRepository, InMemoryPaymentRepository,
    InMemorySweeperLease, InMemoryUnitEventRepository, InMemoryUnitRepository,
    InMemoryUserRepository,
};

struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    fn advance(&self, by: ChronoDuration) {
        let mut now = self.0.lock().expect("clock poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock poisoned")
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn stay() -> DateRange {
    DateRange::try_new(date(2025, 12, 20), date(2025, 12, 25)).expect("chronological")
}

struct Harness {
    service: BookingService,
    sweeper: ExpirySweeper,
    availability: AvailabilityService,
    bookings: Arc<InMemoryBookingRepository>,
    events: Arc<InMemoryUnitEventRepository>,
    lease: Arc<InMemorySweeperLease>,
    units: Arc<InMemoryUnitRepository>,
    clock: Arc<FixedClock>,
    user: User,
}

async fn harness() -> Harness {
    let now = Utc
        .with_ymd_and_hms(2025, 12, 1, 10, 0, 0)
        .single()
        .expect("valid time");
    let clock = Arc::new(FixedClock::at(now));

    let index = Arc::new(InMemoryAvailabilityStore::new());
    let bookings = Arc::new(InMemoryBookingRepository::new());
    let units = Arc::new(InMemoryUnitRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let lease = Arc::new(InMemorySweeperLease::new());
    let events = Arc::new(InMemoryUnitEventRepository::new());

    let user = User {
        id: UserId::random(),
        username: "guest".to_owned(),
        created_at: now,
    };
    users.save(&user).await.expect("user saved");

    let availability = AvailabilityService::new(
        Arc::clone(&index) as Arc<dyn AvailabilityStore>,
        Arc::clone(&bookings) as _,
        Arc::clone(&units) as _,
    );
    let service = BookingService::new(
        BookingPorts {
            bookings: Arc::clone(&bookings) as _,
            units: Arc::clone(&units) as _,
            users: Arc::clone(&users) as _,
            payments: Arc::new(InMemoryPaymentRepository::new()) as _,
            availability: availability.clone(),
            recorder: UnitEventRecorder::new(Arc::clone(&events) as _),
            clock: Arc::clone(&clock) as _,
        },
        MarkupPolicy::new(dec!(10)).expect("valid percent"),
        ChronoDuration::minutes(15),
    );
    let sweeper = ExpirySweeper::new(
        service.clone(),
        Arc::clone(&lease) as _,
        ExpirySweeperRuntime::default(),
        ExpirySweeperConfig::default(),
    );

    Harness {
        service,
        sweeper,
        availability,
        bookings,
        events,
        lease,
        units,
        clock,
        user,
    }
}

async fn catalogued_unit(h: &Harness) -> Unit {
    let unit = Unit {
        id: UnitId::random(),
        number_of_rooms: 2,
        accommodation_type: AccommodationType::Flat,
        floor: 1,
        base_cost: dec!(100.00),
        description: None,
        created_at: h.clock.utc(),
    };
    h.units.save(&unit).await.expect("unit saved");
    unit
}

#[rstest]
#[tokio::test]
async fn sweep_expires_overdue_bookings_and_releases_their_days() {
    let h = harness().await;
    let mut overdue = Vec::new();
    for _ in 0..2 {
        let unit = catalogued_unit(&h).await;
        let booking = h
            .service
            .create(BookingDraft {
                unit_id: unit.id,
                user_id: h.user.id,
                date_range: stay(),
            })
            .await
            .expect("create succeeds");
        overdue.push(booking);
    }

    h.clock.advance(ChronoDuration::minutes(16));

    // Created after the deadline passed, so this one is still fresh.
    let fresh_unit = catalogued_unit(&h).await;
    let fresh = h
        .service
        .create(BookingDraft {
            unit_id: fresh_unit.id,
            user_id: h.user.id,
            date_range: stay(),
        })
        .await
        .expect("create succeeds");

    let run = h.sweeper.run_once().await.expect("sweep succeeds");
    assert_eq!(
        run,
        SweepRun::Completed(SweepOutcome {
            expired: 2,
            skipped: 0,
            failed: 0,
        })
    );

    for booking in &overdue {
        let stored = h
            .bookings
            .find_by_id(&booking.id)
            .await
            .expect("lookup succeeds")
            .expect("booking exists");
        assert_eq!(stored.status, BookingStatus::Expired);
        assert_eq!(stored.expires_at, None);
        assert!(
            h.availability
                .is_available(booking.unit_id, stay())
                .await
                .expect("query succeeds")
        );
    }

    let stored_fresh = h
        .bookings
        .find_by_id(&fresh.id)
        .await
        .expect("lookup succeeds")
        .expect("booking exists");
    assert_eq!(stored_fresh.status, BookingStatus::Pending);

    let expiry_events = h
        .events
        .recorded()
        .into_iter()
        .filter(|event| event.event_type == UnitEventType::BookingExpired)
        .count();
    assert_eq!(expiry_events, 2);
}

#[rstest]
#[tokio::test]
async fn expire_skips_a_booking_transitioned_concurrently() {
    let h = harness().await;
    let unit = catalogued_unit(&h).await;
    let booking = h
        .service
        .create(BookingDraft {
            unit_id: unit.id,
            user_id: h.user.id,
            date_range: stay(),
        })
        .await
        .expect("create succeeds");
    let stale = h
        .bookings
        .find_by_id(&booking.id)
        .await
        .expect("lookup succeeds")
        .expect("booking exists");

    // Another actor wins the race.
    h.service.cancel(booking.id).await.expect("cancel succeeds");

    let outcome = h.service.expire(stale).await.expect("expire tolerates the race");
    assert!(outcome.is_none());

    let stored = h
        .bookings
        .find_by_id(&booking.id)
        .await
        .expect("lookup succeeds")
        .expect("booking exists");
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[rstest]
#[tokio::test]
async fn sweep_isolates_a_booking_whose_release_fails() {
    let now = Utc
        .with_ymd_and_hms(2025, 12, 1, 10, 0, 0)
        .single()
        .expect("valid time");
    let clock = Arc::new(FixedClock::at(now));

    let bookings = Arc::new(InMemoryBookingRepository::new());
    let units = Arc::new(InMemoryUnitRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let events = Arc::new(InMemoryUnitEventRepository::new());

    let user = User {
        id: UserId::random(),
        username: "guest".to_owned(),
        created_at: now,
    };
    users.save(&user).await.expect("user saved");

    let mut unit_ids = Vec::new();
    for _ in 0..2 {
        let unit = Unit {
            id: UnitId::random(),
            number_of_rooms: 2,
            accommodation_type: AccommodationType::Flat,
            floor: 1,
            base_cost: dec!(100.00),
            description: None,
            created_at: now,
        };
        units.save(&unit).await.expect("unit saved");
        unit_ids.push(unit.id);
    }
    let healthy = unit_ids[0];
    let poison = unit_ids[1];

    // Releasing the poisoned unit's days fails; everything else works.
    let mut index = MockAvailabilityStore::new();
    index.expect_contains_unit().returning(|_, _| Ok(false));
    index.expect_add_unit().returning(|_, _| Ok(()));
    index.expect_remove_unit().returning(move |_, unit_id| {
        if unit_id == poison {
            Err(crate::domain::ports::AvailabilityStoreError::backend(
                "connection reset",
            ))
        } else {
            Ok(())
        }
    });

    let availability = AvailabilityService::new(
        Arc::new(index) as Arc<dyn AvailabilityStore>,
        Arc::clone(&bookings) as _,
        Arc::clone(&units) as _,
    );
    let service = BookingService::new(
        BookingPorts {
            bookings: Arc::clone(&bookings) as _,
            units: Arc::clone(&units) as _,
            users: Arc::clone(&users) as _,
            payments: Arc::new(InMemoryPaymentRepository::new()) as _,
            availability,
            recorder: UnitEventRecorder::new(Arc::clone(&events) as _),
            clock: Arc::clone(&clock) as _,
        },
        MarkupPolicy::new(dec!(10)).expect("valid percent"),
        ChronoDuration::minutes(15),
    );
    let sweeper = ExpirySweeper::new(
        service.clone(),
        Arc::new(InMemorySweeperLease::new()) as _,
        ExpirySweeperRuntime::default(),
        ExpirySweeperConfig::default(),
    );

    for unit_id in [healthy, poison] {
        service
            .create(BookingDraft {
                unit_id,
                user_id: user.id,
                date_range: stay(),
            })
            .await
            .expect("create succeeds");
    }

    clock.advance(ChronoDuration::minutes(16));

    let run = sweeper.run_once().await.expect("sweep succeeds");
    assert_eq!(
        run,
        SweepRun::Completed(SweepOutcome {
            expired: 1,
            skipped: 0,
            failed: 1,
        })
    );

    // Only the booking whose days were actually released is audited.
    let expiry_events: Vec<_> = events
        .recorded()
        .into_iter()
        .filter(|event| event.event_type == UnitEventType::BookingExpired)
        .collect();
    assert_eq!(expiry_events.len(), 1);
    assert_eq!(expiry_events[0].unit_id, healthy);
}

#[rstest]
#[tokio::test]
async fn sweep_is_single_flight_across_instances() {
    let h = harness().await;
    let config = ExpirySweeperConfig::default();

    let token = h
        .lease
        .try_acquire(&config.lease_name, config.lease_ttl)
        .await
        .expect("acquire succeeds")
        .expect("lease granted");

    let run = h.sweeper.run_once().await.expect("sweep succeeds");
    assert_eq!(run, SweepRun::Skipped);

    h.lease
        .release(&config.lease_name, &token)
        .await
        .expect("release succeeds");

    let rerun = h.sweeper.run_once().await.expect("sweep succeeds");
    assert!(matches!(rerun, SweepRun::Completed(_)));
}

#[rstest]
#[tokio::test]
async fn consecutive_sweeps_release_the_lease_between_runs() {
    let h = harness().await;

    let first = h.sweeper.run_once().await.expect("sweep succeeds");
    let second = h.sweeper.run_once().await.expect("sweep succeeds");
    assert!(matches!(first, SweepRun::Completed(_)));
    assert!(matches!(second, SweepRun::Completed(_)));
}

#[rstest]
#[tokio::test]
async fn sweep_with_nothing_overdue_is_a_no_op() {
    let h = harness().await;
    let run = h.sweeper.run_once().await.expect("sweep succeeds");
    assert_eq!(run, SweepRun::Completed(SweepOutcome::default()));
}
