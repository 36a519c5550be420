//! Directory service client.
//!
//! [`DirectoryApi`] is the seam between the directory logic and the
//! transport. [`HttpDirectoryApi`] talks to the REST service with a blocking
//! reqwest client; tests substitute an in-memory fake.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{DirError, Result};
use crate::model::{Department, NewStaff, Staff};

pub const STAFF_LIST_PATH: &str = "/staff";
pub const DEPARTMENT_LIST_PATH: &str = "department";
pub const STAFF_CREATE_PATH: &str = "staff";

/// Operations the directory screen needs from the service.
pub trait DirectoryApi: Send + Sync {
    /// `GET /staff`
    fn list_staff(&self) -> Result<Vec<Staff>>;

    /// `GET department`
    fn list_departments(&self) -> Result<Vec<Department>>;

    /// `POST staff`. Any 2xx is success; the response body is returned
    /// as-is, or `Value::Null` when empty.
    fn create_staff(&self, staff: &NewStaff) -> Result<Value>;
}

/// REST implementation of [`DirectoryApi`].
pub struct HttpDirectoryApi {
    base_url: String,
    http_client: reqwest::blocking::Client,
}

impl std::fmt::Debug for HttpDirectoryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectoryApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpDirectoryApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(DirError::Config(
                "api base_url is empty; set [api].base_url or STAFFDIR_API_URL".to_string(),
            ));
        }

        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(concat!("staffdir/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| DirError::Config(format!("HTTP client error: {err}")))?;

        Ok(Self {
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let request_id = new_request_id();
        debug!(request_id = %request_id, url = %url, "GET");

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .header("X-Request-ID", &request_id)
            .send()
            .map_err(|e| DirError::Http(e.to_string()))?;

        decode(response)
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.url(path);
        let request_id = new_request_id();
        debug!(request_id = %request_id, url = %url, "POST");

        let response = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .header("X-Request-ID", &request_id)
            .json(body)
            .send()
            .map_err(|e| DirError::Http(e.to_string()))?;

        let body = success_body(response)?;
        Ok(lenient_json(&body))
    }
}

impl DirectoryApi for HttpDirectoryApi {
    fn list_staff(&self) -> Result<Vec<Staff>> {
        let staff: Vec<Staff> = self.get(STAFF_LIST_PATH)?;
        debug!(count = staff.len(), "Fetched staff");
        Ok(staff)
    }

    fn list_departments(&self) -> Result<Vec<Department>> {
        let departments: Vec<Department> = self.get(DEPARTMENT_LIST_PATH)?;
        debug!(count = departments.len(), "Fetched departments");
        Ok(departments)
    }

    fn create_staff(&self, staff: &NewStaff) -> Result<Value> {
        let created = self.post(STAFF_CREATE_PATH, staff)?;
        debug!(response = %created, "Created staff");
        Ok(created)
    }
}

fn new_request_id() -> String {
    format!(
        "staffdir-{}",
        Uuid::new_v4().to_string().split('-').next().unwrap_or("0")
    )
}

fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let body = success_body(response)?;
    Ok(serde_json::from_str(&body)?)
}

/// Body of a 2xx response; anything else becomes [`DirError::Api`].
fn success_body(response: reqwest::blocking::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| DirError::Http(format!("Failed to read response: {e}")))?;

    if !status.is_success() {
        return Err(DirError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

/// Parse `body` as JSON, keeping non-JSON text as a string.
fn lenient_json(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::model::RecordId;

    fn api_for(server: &MockServer) -> HttpDirectoryApi {
        HttpDirectoryApi::new(&ApiConfig {
            base_url: server.base_url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn staff_json(id: i64, name: &str, dept: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "phone": "555-0100",
            "department": { "id": 1, "name": dept },
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip": "62701",
            "country": "USA"
        })
    }

    #[test]
    fn test_list_staff() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/staff");
            then.status(200)
                .json_body(json!([staff_json(1, "Alice Lee", "HR"), staff_json(2, "Bob Tan", "Engineering")]));
        });

        let staff = api_for(&server).list_staff().unwrap();

        mock.assert();
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[1].department.name, "Engineering");
    }

    #[test]
    fn test_list_departments() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/department");
            then.status(200)
                .json_body(json!([{ "id": 1, "name": "HR" }, { "id": 2, "name": "Engineering" }]));
        });

        let departments = api_for(&server).list_departments().unwrap();

        mock.assert();
        assert_eq!(departments, vec![Department::new(1, "HR"), Department::new(2, "Engineering")]);
    }

    #[test]
    fn test_create_staff_posts_department_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/staff")
                .body_includes(r#""departmentId":2"#)
                .body_includes(r#""name":"Carol Ng""#);
            then.status(201).json_body(staff_json(3, "Carol Ng", "Engineering"));
        });

        let payload = NewStaff {
            name: "Carol Ng".into(),
            phone: "555-0101".into(),
            department_id: RecordId::Int(2),
            street: "2 Elm St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62702".into(),
            country: "USA".into(),
        };
        let created = api_for(&server).create_staff(&payload).unwrap();

        mock.assert();
        assert_eq!(created["id"], 3);
    }

    fn eve_payload() -> NewStaff {
        NewStaff {
            name: "Eve".into(),
            phone: "555-0109".into(),
            department_id: RecordId::Int(2),
            street: "9 Oak Ave".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62704".into(),
            country: "USA".into(),
        }
    }

    #[test]
    fn test_create_accepts_flat_response() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/staff");
            then.status(201)
                .json_body(json!({ "id": 9, "name": "Eve", "departmentId": 2, "zip": "62704" }));
        });

        let created = api_for(&server).create_staff(&eve_payload()).unwrap();

        mock.assert();
        assert_eq!(created["departmentId"], 2);
        assert!(created.get("department").is_none());
    }

    #[test]
    fn test_create_accepts_empty_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/staff");
            then.status(201);
        });

        let created = api_for(&server).create_staff(&eve_payload()).unwrap();
        assert_eq!(created, Value::Null);
    }

    #[test]
    fn test_create_keeps_plain_text_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/staff");
            then.status(200).body("Created");
        });

        let created = api_for(&server).create_staff(&eve_payload()).unwrap();
        assert_eq!(created, Value::String("Created".into()));
    }

    #[test]
    fn test_create_rejection_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/staff");
            then.status(422).body("bad zip");
        });

        let err = api_for(&server).create_staff(&eve_payload()).unwrap_err();
        assert!(matches!(err, DirError::Api { status: 422, .. }));
    }

    #[test]
    fn test_non_success_status_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/staff");
            then.status(500).body("boom");
        });

        let err = api_for(&server).list_staff().unwrap_err();
        match err {
            DirError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_json_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/department");
            then.status(200).body("not json");
        });

        let err = api_for(&server).list_departments().unwrap_err();
        assert!(matches!(err, DirError::Json(_)));
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let api = HttpDirectoryApi::new(&ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert!(matches!(api.list_staff().unwrap_err(), DirError::Http(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = HttpDirectoryApi::new(&ApiConfig {
            base_url: "http://example.test/api/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(api.url(STAFF_LIST_PATH), "http://example.test/api/staff");
        assert_eq!(api.url(DEPARTMENT_LIST_PATH), "http://example.test/api/department");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = HttpDirectoryApi::new(&ApiConfig {
            base_url: "  ".to_string(),
            timeout_secs: 1,
        })
        .unwrap_err();
        assert!(matches!(err, DirError::Config(_)));
    }
}
