//! httpmock-backed directory service for exercising the HTTP client.
//!
//! [`DirectoryServer`] serves a fixed staff and department list and accepts
//! creates, answering each with a canned record.

use httpmock::prelude::*;
use serde_json::{Value, json};

use crate::api::HttpDirectoryApi;
use crate::config::ApiConfig;
use crate::model::{Department, Staff};

pub struct DirectoryServer {
    server: MockServer,
}

impl DirectoryServer {
    /// Start a server on a random port with no routes.
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    /// Start a server already serving `staff` and `departments`.
    pub fn with_directory(staff: &[Staff], departments: &[Department]) -> Self {
        let server = Self::start();
        server.serve_staff(staff);
        server.serve_departments(departments);
        server
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    /// A client pointed at this server.
    pub fn api(&self) -> HttpDirectoryApi {
        HttpDirectoryApi::new(&ApiConfig {
            base_url: self.base_url(),
            timeout_secs: 5,
        })
        .expect("mock server url is valid")
    }

    pub fn serve_staff(&self, staff: &[Staff]) -> httpmock::Mock<'_> {
        let body = to_json(staff);
        self.server.mock(|when, then| {
            when.method(GET).path("/staff");
            then.status(200).json_body(body);
        })
    }

    pub fn serve_departments(&self, departments: &[Department]) -> httpmock::Mock<'_> {
        let body = to_json(departments);
        self.server.mock(|when, then| {
            when.method(GET).path("/department");
            then.status(200).json_body(body);
        })
    }

    /// Accept any `POST /staff` and answer with `created`.
    pub fn accept_creates(&self, created: &Staff) -> httpmock::Mock<'_> {
        let body = to_json(created);
        self.server.mock(|when, then| {
            when.method(POST).path("/staff");
            then.status(201).json_body(body);
        })
    }

    /// Answer `method path` with `status` and a JSON error body.
    pub fn fail(&self, method: httpmock::Method, path: &str, status: u16) -> httpmock::Mock<'_> {
        let path = path.to_string();
        self.server.mock(|when, then| {
            when.method(method).path(path);
            then.status(status)
                .json_body(json!({ "message": "mock failure", "status": status }));
        })
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DirectoryApi;
    use crate::error::DirError;
    use crate::model::{NewStaff, RecordId};
    use crate::test_utils::fixtures::{make_staff, sample_departments, sample_staff};

    #[test]
    fn test_serves_directory_over_http() {
        let server = DirectoryServer::with_directory(&sample_staff(), &sample_departments());
        let api = server.api();

        assert_eq!(api.list_staff().unwrap(), sample_staff());
        assert_eq!(api.list_departments().unwrap(), sample_departments());
    }

    #[test]
    fn test_accept_creates_answers_with_record() {
        let server = DirectoryServer::start();
        let created = make_staff(42, "Eve Park", "HR");
        let mock = server.accept_creates(&created);

        let payload = NewStaff {
            name: "Eve Park".into(),
            phone: "555-0142".into(),
            department_id: RecordId::Int(1),
            street: "42 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
            country: "USA".into(),
        };
        let returned = server.api().create_staff(&payload).unwrap();

        mock.assert();
        assert_eq!(returned, to_json(&created));
    }

    #[test]
    fn test_fail_route() {
        let server = DirectoryServer::start();
        server.fail(POST, "/staff", 422);

        let payload = NewStaff {
            name: "x".into(),
            phone: "x".into(),
            department_id: RecordId::Int(1),
            street: "x".into(),
            city: "x".into(),
            state: "x".into(),
            zip: "x".into(),
            country: "x".into(),
        };
        let err = server.api().create_staff(&payload).unwrap_err();
        assert!(matches!(err, DirError::Api { status: 422, .. }));
    }
}
