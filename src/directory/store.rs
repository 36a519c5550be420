//! The screen's copy of the directory.
//!
//! Staff and departments are fetched on worker threads and handed back over
//! a channel; [`DirectoryStore::poll`] applies whatever has arrived. At most
//! one request per resource is in flight: asking again while one is running
//! marks the resource stale and a single follow-up fetch is issued when the
//! running one lands. Read failures are logged and the previous list is kept.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error};

use crate::api::DirectoryApi;
use crate::error::{DirError, Result};
use crate::model::{Department, Staff};

/// Which list a fetch refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Staff,
    Departments,
}

impl Resource {
    const fn label(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Departments => "departments",
        }
    }
}

/// Shared flag telling in-flight fetches their results are no longer wanted.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

enum FetchOutcome {
    Staff(Result<Vec<Staff>>),
    Departments(Result<Vec<Department>>),
}

impl FetchOutcome {
    fn failed(resource: Resource, err: DirError) -> Self {
        match resource {
            Resource::Staff => Self::Staff(Err(err)),
            Resource::Departments => Self::Departments(Err(err)),
        }
    }

    const fn resource(&self) -> Resource {
        match self {
            Self::Staff(_) => Resource::Staff,
            Self::Departments(_) => Resource::Departments,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct FetchSlot {
    in_flight: bool,
    stale: bool,
}

pub struct DirectoryStore {
    api: Arc<dyn DirectoryApi>,
    staff: Vec<Staff>,
    departments: Vec<Department>,
    staff_slot: FetchSlot,
    department_slot: FetchSlot,
    staff_updated_at: Option<DateTime<Local>>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    token: CancellationToken,
}

impl DirectoryStore {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            api,
            staff: Vec::new(),
            departments: Vec::new(),
            staff_slot: FetchSlot::default(),
            department_slot: FetchSlot::default(),
            staff_updated_at: None,
            tx,
            rx,
            token: CancellationToken::new(),
        }
    }

    /// Initial load when the screen starts.
    pub fn mount(&mut self) {
        debug!("Directory mounted");
        self.refresh_all();
    }

    /// Reload both lists when the screen regains focus.
    pub fn focus(&mut self) {
        debug!("Directory focused");
        self.refresh_all();
    }

    /// Fetch staff and departments independently.
    pub fn refresh_all(&mut self) {
        self.request(Resource::Staff);
        self.request(Resource::Departments);
    }

    /// Fetch staff only, e.g. after a record was created.
    pub fn refresh_staff(&mut self) {
        self.request(Resource::Staff);
    }

    #[must_use]
    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    #[must_use]
    pub fn api(&self) -> &dyn DirectoryApi {
        self.api.as_ref()
    }

    #[must_use]
    pub const fn staff_updated_at(&self) -> Option<DateTime<Local>> {
        self.staff_updated_at
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.staff_slot.in_flight || self.department_slot.in_flight
    }

    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Discard every result that has not been applied yet, and stop issuing
    /// requests.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Apply completed fetches. Returns whether either list changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            changed |= self.apply(outcome);
        }
        changed
    }

    /// Block until no fetch is in flight, applying results as they arrive.
    ///
    /// Returns `false` on timeout or cancellation.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_loading() {
            if self.token.is_cancelled() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    self.apply(outcome);
                }
                Err(_) => return false,
            }
        }
        true
    }

    const fn slot_mut(&mut self, resource: Resource) -> &mut FetchSlot {
        match resource {
            Resource::Staff => &mut self.staff_slot,
            Resource::Departments => &mut self.department_slot,
        }
    }

    fn request(&mut self, resource: Resource) {
        if self.token.is_cancelled() {
            return;
        }

        let slot = self.slot_mut(resource);
        if slot.in_flight {
            slot.stale = true;
            debug!(resource = resource.label(), "Refresh coalesced into in-flight fetch");
            return;
        }
        slot.in_flight = true;

        if let Err(err) = self.spawn_fetch(resource) {
            error!(resource = resource.label(), error = %err, "Failed to start fetch");
            self.slot_mut(resource).in_flight = false;
        }
    }

    fn spawn_fetch(&self, resource: Resource) -> std::io::Result<()> {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let token = self.token.clone();

        debug!(resource = resource.label(), "Fetching");
        thread::Builder::new()
            .name(format!("staffdir-fetch-{}", resource.label()))
            .spawn(move || {
                // A panicking client must still land an outcome, or the slot
                // stays in flight forever.
                let fetched = panic::catch_unwind(AssertUnwindSafe(|| match resource {
                    Resource::Staff => FetchOutcome::Staff(api.list_staff()),
                    Resource::Departments => FetchOutcome::Departments(api.list_departments()),
                }));
                let outcome = fetched.unwrap_or_else(|_| {
                    FetchOutcome::failed(
                        resource,
                        DirError::Http(format!("{} fetch panicked", resource.label())),
                    )
                });
                if token.is_cancelled() {
                    debug!(resource = resource.label(), "Dropping result of cancelled fetch");
                    return;
                }
                // The store may already be gone.
                let _ = tx.send(outcome);
            })?;
        Ok(())
    }

    fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let resource = outcome.resource();
        if self.token.is_cancelled() {
            return false;
        }

        self.slot_mut(resource).in_flight = false;

        let changed = match outcome {
            FetchOutcome::Staff(Ok(staff)) => {
                debug!(count = staff.len(), "Staff list updated");
                self.staff = staff;
                self.staff_updated_at = Some(Local::now());
                true
            }
            FetchOutcome::Departments(Ok(departments)) => {
                debug!(count = departments.len(), "Department list updated");
                self.departments = departments;
                true
            }
            FetchOutcome::Staff(Err(err)) => {
                error!(error = %err, "Error fetching staff data");
                false
            }
            FetchOutcome::Departments(Err(err)) => {
                error!(error = %err, "Error fetching departments");
                false
            }
        };

        let slot = self.slot_mut(resource);
        if slot.stale {
            slot.stale = false;
            self.request(resource);
        }

        changed
    }
}

impl Drop for DirectoryStore {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
