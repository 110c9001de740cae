//! Startup data seeding.
//!
//! Populates the catalogue with random demo units and a handful of demo
//! users. Idempotent: generated units carry a marker description, and the
//! seeder only tops the pool up to the configured target, so repeated
//! startups (or several racing instances) converge on the same state.

use std::sync::Arc;

use mockable::Clock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::info;

use super::audit::UnitEventRecorder;
use super::ports::{UnitRepository, UserRepository};
use super::{
    AccommodationType, AvailabilityService, DomainError, Unit, UnitEvent, UnitEventType, UnitId,
    User, UserId,
};

/// Marker description identifying seeded units.
pub const GENERATED_UNIT_DESCRIPTION: &str = "Randomly generated unit";

const SEEDED_USERNAMES: [&str; 3] = ["demo-alice", "demo-bob", "demo-carol"];

/// Seeding behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Whether seeding runs at all.
    pub enabled: bool,
    /// Number of generated units the catalogue should contain.
    pub target_units: u64,
}

/// What a seeding run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Units created by this run.
    pub units_created: u64,
    /// Users created by this run.
    pub users_created: u64,
}

/// Seeds demo units and users at startup.
pub struct DataSeeder {
    units: Arc<dyn UnitRepository>,
    users: Arc<dyn UserRepository>,
    availability: AvailabilityService,
    recorder: UnitEventRecorder,
    clock: Arc<dyn Clock>,
}

impl DataSeeder {
    /// Build the seeder.
    pub fn new(
        units: Arc<dyn UnitRepository>,
        users: Arc<dyn UserRepository>,
        availability: AvailabilityService,
        recorder: UnitEventRecorder,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            units,
            users,
            availability,
            recorder,
            clock,
        }
    }

    /// Run the seed, topping the generated pool up to the target.
    pub async fn run(&self, config: &SeedConfig) -> Result<SeedOutcome, DomainError> {
        if !config.enabled {
            info!("data seeding disabled");
            return Ok(SeedOutcome::default());
        }

        let users_created = self.seed_users().await?;
        let units_created = self.seed_units(config.target_units).await?;
        Ok(SeedOutcome {
            units_created,
            users_created,
        })
    }

    async fn seed_users(&self) -> Result<u64, DomainError> {
        if self.users.count().await? > 0 {
            return Ok(0);
        }
        let now = self.clock.utc();
        for username in SEEDED_USERNAMES {
            let user = User {
                id: UserId::random(),
                username: username.to_owned(),
                created_at: now,
            };
            self.users.save(&user).await?;
        }
        Ok(SEEDED_USERNAMES.len() as u64)
    }

    async fn seed_units(&self, target: u64) -> Result<u64, DomainError> {
        let existing = self
            .units
            .count_by_description(GENERATED_UNIT_DESCRIPTION)
            .await?;
        info!(existing, target, "checking generated unit pool");
        if existing >= target {
            return Ok(0);
        }

        let to_create = target - existing;
        let mut rng = SmallRng::from_entropy();
        let now = self.clock.utc();

        for _ in 0..to_create {
            let unit = Unit {
                id: UnitId::random(),
                number_of_rooms: rng.gen_range(1..5),
                accommodation_type: AccommodationType::ALL
                    [rng.gen_range(0..AccommodationType::ALL.len())],
                floor: rng.gen_range(0..21),
                // Nightly cost in [50.00, 500.00), generated in cents.
                base_cost: Decimal::new(rng.gen_range(5_000..50_000), 2),
                description: Some(GENERATED_UNIT_DESCRIPTION.to_owned()),
                created_at: now,
            };
            self.units.save(&unit).await?;
            self.recorder
                .record(UnitEvent::for_unit(
                    unit.id,
                    UnitEventType::UnitCreated,
                    "unit generated by the startup seeder",
                    now,
                ))
                .await;
            self.availability.register_unit().await?;
        }

        info!(created = to_create, "seeded random units");
        Ok(to_create)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::ports::AvailabilityStore;
    use crate::outbound::memory::{
        InMemoryAvailabilityStore, InMemoryBookingRepository, InMemoryUnitEventRepository,
        InMemoryUnitRepository, InMemoryUserRepository,
    };

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock poisoned")
        }
    }

    struct Harness {
        seeder: DataSeeder,
        units: Arc<InMemoryUnitRepository>,
        users: Arc<InMemoryUserRepository>,
        index: Arc<InMemoryAvailabilityStore>,
    }

    fn harness() -> Harness {
        let now = Utc
            .with_ymd_and_hms(2025, 12, 1, 10, 0, 0)
            .single()
            .expect("valid time");
        let index = Arc::new(InMemoryAvailabilityStore::new());
        let units = Arc::new(InMemoryUnitRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let availability = AvailabilityService::new(
            Arc::clone(&index) as Arc<dyn AvailabilityStore>,
            Arc::new(InMemoryBookingRepository::new()) as _,
            Arc::clone(&units) as _,
        );
        let seeder = DataSeeder::new(
            Arc::clone(&units) as _,
            Arc::clone(&users) as _,
            availability,
            UnitEventRecorder::new(Arc::new(InMemoryUnitEventRepository::new()) as _),
            Arc::new(FixedClock(Mutex::new(now))) as _,
        );
        Harness {
            seeder,
            units,
            users,
            index,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_tops_up_to_the_target_and_is_idempotent() {
        let h = harness();
        let config = SeedConfig {
            enabled: true,
            target_units: 10,
        };

        let first = h.seeder.run(&config).await.expect("seed succeeds");
        assert_eq!(first.units_created, 10);
        assert_eq!(first.users_created, 3);
        assert_eq!(h.units.count().await.expect("count succeeds"), 10);
        assert_eq!(h.index.known_unit_count().await.expect("counter read"), 10);

        let second = h.seeder.run(&config).await.expect("seed succeeds");
        assert_eq!(second, SeedOutcome::default());
        assert_eq!(h.units.count().await.expect("count succeeds"), 10);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_ignores_manually_created_units() {
        let h = harness();
        let manual = Unit {
            id: UnitId::random(),
            number_of_rooms: 1,
            accommodation_type: AccommodationType::Room,
            floor: 0,
            base_cost: dec!(75.00),
            description: Some("penthouse".to_owned()),
            created_at: Utc::now(),
        };
        h.units.save(&manual).await.expect("unit saved");

        let config = SeedConfig {
            enabled: true,
            target_units: 2,
        };
        let outcome = h.seeder.run(&config).await.expect("seed succeeds");
        assert_eq!(outcome.units_created, 2);
        assert_eq!(h.units.count().await.expect("count succeeds"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn disabled_seeding_is_a_no_op() {
        let h = harness();
        let outcome = h
            .seeder
            .run(&SeedConfig {
                enabled: false,
                target_units: 10,
            })
            .await
            .expect("seed succeeds");
        assert_eq!(outcome, SeedOutcome::default());
        assert_eq!(h.units.count().await.expect("count succeeds"), 0);
        assert_eq!(h.users.count().await.expect("count succeeds"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn generated_costs_stay_inside_the_advertised_window() {
        let h = harness();
        h.seeder
            .run(&SeedConfig {
                enabled: true,
                target_units: 25,
            })
            .await
            .expect("seed succeeds");

        let all = h
            .units
            .find_matching(&crate::domain::UnitFilter::default())
            .await
            .expect("listing succeeds");
        for unit in all {
            assert!(unit.base_cost >= dec!(50.00) && unit.base_cost < dec!(500.00));
            assert!((1..5).contains(&unit.number_of_rooms));
            assert!(unit.floor < 21);
        }
    }
}
