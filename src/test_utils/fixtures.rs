use crate::model::{Department, RecordId, Staff};

/// Build a staff record with a placeholder address.
pub fn make_staff(id: i64, name: &str, department: &str) -> Staff {
    Staff {
        id: RecordId::Int(id),
        name: name.to_string(),
        phone: format!("555-01{:02}", id % 100),
        department: Department::new(department_id_for(department), department),
        street: format!("{id} Main St"),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        country: "USA".to_string(),
    }
}

/// Departments matching the ones used by [`sample_staff`].
pub fn sample_departments() -> Vec<Department> {
    vec![
        Department::new(1, "HR"),
        Department::new(2, "Engineering"),
        Department::new(3, "Finance"),
    ]
}

/// A small directory: two engineers, one HR, one finance.
pub fn sample_staff() -> Vec<Staff> {
    vec![
        make_staff(1, "Alice Lee", "HR"),
        make_staff(2, "Bob Tan", "Engineering"),
        make_staff(3, "Chen Wei", "Engineering"),
        make_staff(4, "Dana Engel", "Finance"),
    ]
}

fn department_id_for(name: &str) -> i64 {
    sample_departments()
        .into_iter()
        .find(|d| d.name == name)
        .and_then(|d| match d.id {
            RecordId::Int(id) => Some(id),
            RecordId::Text(_) => None,
        })
        .unwrap_or(99)
}
