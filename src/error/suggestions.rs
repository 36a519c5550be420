//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::FormInvalidDepartment => suggest_invalid_department(context),
        ErrorCode::ApiError => suggest_api_error(context),
        _ => code.suggestion().to_string(),
    }
}

fn suggest_invalid_department(context: Option<&Value>) -> String {
    let Some(department) = context
        .and_then(|c| c.get("department"))
        .and_then(Value::as_str)
    else {
        return ErrorCode::FormInvalidDepartment.suggestion().to_string();
    };

    format!(
        "No department is named '{department}'. Names must match exactly, including case. \
         Run `staffdir departments` to list them"
    )
}

fn suggest_api_error(context: Option<&Value>) -> String {
    match context
        .and_then(|c| c.get("status"))
        .and_then(Value::as_u64)
    {
        Some(401 | 403) => "The directory service refused the request. Check your access".to_string(),
        Some(404) => "The endpoint was not found. Check that [api].base_url points at the API root".to_string(),
        Some(status) if status >= 500 => {
            "The directory service failed internally. Try again later".to_string()
        }
        _ => ErrorCode::ApiError.suggestion().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_department_mentions_name() {
        let ctx = serde_json::json!({ "department": "engineering" });
        let suggestion = suggest_for_error(ErrorCode::FormInvalidDepartment, Some(&ctx));
        assert!(suggestion.contains("'engineering'"));
        assert!(suggestion.contains("case"));
    }

    #[test]
    fn test_invalid_department_without_context() {
        let suggestion = suggest_for_error(ErrorCode::FormInvalidDepartment, None);
        assert_eq!(suggestion, ErrorCode::FormInvalidDepartment.suggestion());
    }

    #[test]
    fn test_api_error_by_status() {
        let not_found = serde_json::json!({ "status": 404 });
        assert!(suggest_for_error(ErrorCode::ApiError, Some(&not_found)).contains("base_url"));

        let server = serde_json::json!({ "status": 503 });
        assert!(suggest_for_error(ErrorCode::ApiError, Some(&server)).contains("later"));
    }

    #[test]
    fn test_fallback_to_static() {
        assert_eq!(
            suggest_for_error(ErrorCode::IoError, None),
            ErrorCode::IoError.suggestion()
        );
    }
}
