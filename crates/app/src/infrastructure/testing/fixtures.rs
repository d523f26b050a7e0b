//! Simple test fixtures used across unit tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use countrylist_domain::Country;
use tokio::sync::Notify;

use crate::ports::outbound::{DirectoryError, DirectoryPort, LocationPort};

/// Country with only a common name; panics on a blank name.
pub fn country(name: &str) -> Country {
    match Country::named(name) {
        Ok(country) => country,
        Err(e) => panic!("invalid fixture country {name:?}: {e}"),
    }
}

/// A small directory listing in the order the service would return it.
pub fn sample_catalog() -> Vec<Country> {
    vec![
        country("USA")
            .with_official_name("United States of America")
            .with_capital("Washington, D.C.")
            .with_currency_name("United States dollar"),
        country("Canada")
            .with_capital("Ottawa")
            .with_currency_name("Canadian dollar"),
        country("Russia")
            .with_official_name("Russian Federation")
            .with_capital("Moscow")
            .with_currency_name("Russian ruble"),
        country("Egypt")
            .with_official_name("Arab Republic of Egypt")
            .with_capital("Cairo")
            .with_currency_name("Egyptian pound"),
        country("Germany")
            .with_official_name("Federal Republic of Germany")
            .with_capital("Berlin")
            .with_currency_name("Euro"),
        country("Japan")
            .with_capital("Tokyo")
            .with_currency_name("Japanese yen"),
        country("France")
            .with_official_name("French Republic")
            .with_capital("Paris")
            .with_currency_name("Euro"),
        country("Brazil")
            .with_official_name("Federative Republic of Brazil")
            .with_capital("Brasília")
            .with_currency_name("Brazilian real"),
    ]
}

/// Directory answering every fetch with the same result.
///
/// With a gate, each fetch waits for one `release()` before answering.
pub struct StubDirectory {
    result: Mutex<Result<Vec<Country>, DirectoryError>>,
    calls: AtomicU32,
    gate: Option<Arc<Notify>>,
}

impl StubDirectory {
    pub fn returning(countries: Vec<Country>) -> Self {
        Self {
            result: Mutex::new(Ok(countries)),
            calls: AtomicU32::new(0),
            gate: None,
        }
    }

    pub fn failing(error: DirectoryError) -> Self {
        Self {
            result: Mutex::new(Err(error)),
            calls: AtomicU32::new(0),
            gate: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    /// Let one waiting (or the next) fetch answer.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn set_result(&self, result: Result<Vec<Country>, DirectoryError>) {
        *self.result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryPort for StubDirectory {
    async fn fetch_all(&self) -> Result<Vec<Country>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.result.lock().unwrap().clone()
    }
}

/// Location that answers after a delay.
pub struct SlowLocation {
    pub delay: Duration,
    pub country: Option<String>,
}

#[async_trait]
impl LocationPort for SlowLocation {
    async fn resolve_country(&self) -> Option<String> {
        tokio::time::sleep(self.delay).await;
        self.country.clone()
    }
}
