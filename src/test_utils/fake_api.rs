//! In-memory [`DirectoryApi`] for tests.
//!
//! Serves canned staff and departments, records every create call, and can
//! be told to fail reads or creates. Staff fetches can be held open with
//! [`FakeDirectoryApi::hold_staff_fetches`] to test overlapping refreshes.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use serde_json::Value;

use crate::api::DirectoryApi;
use crate::error::{DirError, Result};
use crate::model::{Department, NewStaff, RecordId, Staff};

#[derive(Debug, Default)]
pub struct FakeDirectoryApi {
    staff: Mutex<Vec<Staff>>,
    departments: Mutex<Vec<Department>>,
    created: Mutex<Vec<NewStaff>>,
    create_response: Mutex<Option<Value>>,
    staff_gate: Mutex<Option<Receiver<()>>>,
    fail_reads: AtomicBool,
    panic_reads: AtomicBool,
    fail_creates: AtomicBool,
    staff_calls: AtomicUsize,
    department_calls: AtomicUsize,
    next_id: AtomicI64,
}

impl FakeDirectoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(staff: Vec<Staff>, departments: Vec<Department>) -> Self {
        let api = Self::new();
        *api.staff.lock() = staff;
        *api.departments.lock() = departments;
        api
    }

    pub fn set_staff(&self, staff: Vec<Staff>) {
        *self.staff.lock() = staff;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every `list_staff` and `list_departments` panic.
    pub fn panic_reads(&self, panic: bool) {
        self.panic_reads.store(panic, Ordering::SeqCst);
    }

    /// Answer creates with `response` instead of the stored record.
    pub fn respond_to_creates_with(&self, response: Value) {
        *self.create_response.lock() = Some(response);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `list_staff` wait for one message on the
    /// returned sender before answering.
    pub fn hold_staff_fetches(&self) -> Sender<()> {
        let (tx, rx) = crossbeam_channel::unbounded();
        *self.staff_gate.lock() = Some(rx);
        tx
    }

    #[must_use]
    pub fn staff_calls(&self) -> usize {
        self.staff_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn department_calls(&self) -> usize {
        self.department_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.created.lock().len()
    }

    #[must_use]
    pub fn created_payloads(&self) -> Vec<NewStaff> {
        self.created.lock().clone()
    }
}

impl DirectoryApi for FakeDirectoryApi {
    fn list_staff(&self) -> Result<Vec<Staff>> {
        self.staff_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.staff_gate.lock().clone();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        if self.panic_reads.load(Ordering::SeqCst) {
            panic!("fake read panicked");
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DirError::Http("connection refused".to_string()));
        }
        Ok(self.staff.lock().clone())
    }

    fn list_departments(&self) -> Result<Vec<Department>> {
        self.department_calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_reads.load(Ordering::SeqCst) {
            panic!("fake read panicked");
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DirError::Http("connection refused".to_string()));
        }
        Ok(self.departments.lock().clone())
    }

    fn create_staff(&self, staff: &NewStaff) -> Result<Value> {
        self.created.lock().push(staff.clone());
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(DirError::Api {
                status: 500,
                body: "insert failed".to_string(),
            });
        }

        let department = self
            .departments
            .lock()
            .iter()
            .find(|d| d.id == staff.department_id)
            .cloned()
            .unwrap_or_else(|| Department {
                id: staff.department_id.clone(),
                name: String::new(),
            });
        let created = Staff {
            id: RecordId::Int(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: staff.name.clone(),
            phone: staff.phone.clone(),
            department,
            street: staff.street.clone(),
            city: staff.city.clone(),
            state: staff.state.clone(),
            zip: staff.zip.clone(),
            country: staff.country.clone(),
        };
        self.staff.lock().push(created.clone());
        match self.create_response.lock().clone() {
            Some(response) => Ok(response),
            None => Ok(serde_json::to_value(&created)?),
        }
    }
}
