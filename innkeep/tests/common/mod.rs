//! Common test utilities for integration tests.
//!
//! This module provides fixtures for standing up an isolated booking
//! database and a notification queue stub that records what the engine
//! hands it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;
use innkeep::notify::DeliveryOutcome;
use innkeep::{
    CustomerId, Database, DatabaseConfig, HotelId, JobHandle, NotificationJob, NotificationQueue,
    RoomId, StayRange,
};

/// An isolated database file in a temporary directory.
///
/// Keeps the `TempDir` alive so multiple connections can be opened
/// against the same path, which the concurrency tests rely on.
pub struct TestStore {
    dir: tempfile::TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Path of the database file inside the store.
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("innkeep.db")
    }

    /// Opens a fresh connection to the store's database.
    pub fn open(&self) -> Database {
        open_database(&self.db_path())
    }
}

/// Opens a database with a generous lock timeout for concurrency tests.
pub fn open_database(path: &Path) -> Database {
    let config = DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(30));
    Database::open(config).unwrap()
}

/// Seeded hotel, room, and customer ids.
pub struct Fixture {
    pub hotel: HotelId,
    pub room: RoomId,
    pub customer: CustomerId,
}

/// Seeds one hotel with one room and one customer.
pub fn seed(db: &mut Database) -> Fixture {
    let hotel = db
        .add_hotel("Seaside Inn", "desk@seaside.example", None, None)
        .unwrap();
    let room = db.add_room(hotel.id(), 101, None).unwrap();
    let customer = db
        .add_customer("Ada Brook", "ada@example.com", None, None)
        .unwrap();
    Fixture {
        hotel: hotel.id(),
        room: room.id(),
        customer: customer.id(),
    }
}

pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

pub fn stay(from: u32, to: u32) -> StayRange {
    StayRange::new(june(from), june(to)).unwrap()
}

/// Queue stub that records enqueued jobs and resolves them immediately.
#[derive(Default)]
pub struct RecordingQueue {
    jobs: Mutex<Vec<NotificationJob>>,
    next_id: AtomicU64,
}

impl RecordingQueue {
    pub fn jobs(&self) -> Vec<NotificationJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl NotificationQueue for RecordingQueue {
    fn enqueue(&self, job: NotificationJob) -> JobHandle {
        self.jobs.lock().unwrap().push(job);
        let (handle, reporter) = JobHandle::pending(self.next_id.fetch_add(1, Ordering::SeqCst));
        reporter.resolve(DeliveryOutcome::Delivered { attempts: 1 });
        handle
    }
}
