//! Environment-driven application settings.

use std::env;
use std::net::SocketAddr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use rust_decimal::Decimal;
use tracing::warn;

use backend::domain::{ExpirySweeperConfig, SeedConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MARKUP_PERCENT: u32 = 10;
const DEFAULT_PAYMENT_WINDOW_MINUTES: i64 = 15;
const DEFAULT_SEED_TARGET_UNITS: u64 = 90;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_SWEEP_LEASE_TTL_SECS: u64 = 600;

/// Application settings resolved from the environment with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Percentage markup applied to quoted and booked costs.
    pub markup_percent: Decimal,
    /// How long a pending booking may stay unpaid.
    pub payment_window: Duration,
    /// Startup seeding behaviour.
    pub seed: SeedConfig,
    /// Force a rebuild of the availability index even when one exists.
    pub refresh_index_on_startup: bool,
    /// Expiry sweeper cadence and lease bounds.
    pub sweeper: ExpirySweeperConfig,
}

impl AppSettings {
    /// Resolve settings from the process environment.
    ///
    /// Unset or unparsable variables fall back to their defaults with a
    /// warning, so a bare environment always yields a runnable server.
    pub fn from_env() -> Self {
        let bind_addr = parse_or(
            "BOOKING_BIND_ADDR",
            env::var("BOOKING_BIND_ADDR").ok(),
            default_bind_addr(),
        );
        let markup_percent = Decimal::from(parse_or(
            "BOOKING_MARKUP_PERCENT",
            env::var("BOOKING_MARKUP_PERCENT").ok(),
            DEFAULT_MARKUP_PERCENT,
        ));
        let payment_window = Duration::minutes(parse_or(
            "BOOKING_PAYMENT_WINDOW_MINUTES",
            env::var("BOOKING_PAYMENT_WINDOW_MINUTES").ok(),
            DEFAULT_PAYMENT_WINDOW_MINUTES,
        ));
        let seed = SeedConfig {
            enabled: flag_or(env::var("BOOKING_SEED_DATA").ok(), true),
            target_units: parse_or(
                "BOOKING_SEED_TARGET_UNITS",
                env::var("BOOKING_SEED_TARGET_UNITS").ok(),
                DEFAULT_SEED_TARGET_UNITS,
            ),
        };
        let refresh_index_on_startup = flag_or(
            env::var("BOOKING_REFRESH_INDEX_ON_STARTUP").ok(),
            false,
        );
        let sweeper = ExpirySweeperConfig {
            interval: StdDuration::from_secs(parse_or(
                "BOOKING_SWEEP_INTERVAL_SECS",
                env::var("BOOKING_SWEEP_INTERVAL_SECS").ok(),
                DEFAULT_SWEEP_INTERVAL_SECS,
            )),
            lease_ttl: StdDuration::from_secs(parse_or(
                "BOOKING_SWEEP_LEASE_TTL_SECS",
                env::var("BOOKING_SWEEP_LEASE_TTL_SECS").ok(),
                DEFAULT_SWEEP_LEASE_TTL_SECS,
            )),
            ..ExpirySweeperConfig::default()
        };

        Self {
            bind_addr,
            markup_percent,
            payment_window,
            seed,
            refresh_index_on_startup,
            sweeper,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    match DEFAULT_BIND_ADDR.parse() {
        Ok(addr) => addr,
        // The literal above is well-formed; this arm is unreachable.
        Err(_) => SocketAddr::from(([0, 0, 0, 0], 8080)),
    }
}

/// Parse `raw` into `T`, falling back to `default` on absence or bad input.
fn parse_or<T: std::str::FromStr>(name: &'static str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => match value.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %value, "unparsable setting, using default");
                default
            }
        },
        None => default,
    }
}

/// Interpret `raw` as a boolean flag; `0` and `false` disable it.
fn flag_or(raw: Option<String>, default: bool) -> bool {
    raw.map_or(default, |value| {
        value != "0" && !value.eq_ignore_ascii_case("false")
    })
}
