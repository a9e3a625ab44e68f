//! Injected time and identifier sources.
//!
//! The builder never reads a global clock or RNG directly. Production wiring
//! uses `SystemClock` + `RandomIdGenerator`; tests use the fixed variants so
//! artifacts compare byte for byte.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Wall clock in UTC.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Random v4 UUID ids (`pz-<32 hex>`). Independent of puzzle content.
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        format!("pz-{}", Uuid::new_v4().simple())
    }
}

/// Always returns the same id.
pub struct FixedIdGenerator(pub String);

impl IdGenerator for FixedIdGenerator {
    fn next_id(&self) -> String {
        self.0.clone()
    }
}
