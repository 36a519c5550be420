use proptest::prelude::*;

use crate::directory::form::StaffForm;
use crate::model::{Department, Staff};
use crate::test_utils::fixtures::make_staff;

/// Staff lists with short ASCII names and department names.
pub fn arb_staff_list() -> impl Strategy<Value = Vec<Staff>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z]{0,8}"), 0..20).prop_map(|rows| {
        rows.into_iter()
            .zip(1_i64..)
            .map(|((name, dept), id)| make_staff(id, &name, &dept))
            .collect()
    })
}

/// Non-empty department lists with ids counting up from 1.
pub fn arb_departments() -> impl Strategy<Value = Vec<Department>> {
    prop::collection::vec("[A-Za-z]{1,10}", 1..6).prop_map(|names| {
        names
            .iter()
            .zip(1_i64..)
            .map(|(name, id)| Department::new(id, name))
            .collect()
    })
}

/// A form with every field filled; the department is picked by the caller.
pub fn arb_filled_form() -> impl Strategy<Value = StaffForm> {
    (
        "[A-Za-z ]{1,20}",
        "[0-9-]{1,12}",
        "[A-Za-z0-9 ]{1,20}",
        "[A-Za-z ]{1,12}",
        "[A-Z]{1,2}",
        "[0-9]{1,5}",
        "[A-Za-z ]{1,12}",
    )
        .prop_map(|(name, phone, street, city, state, zip, country)| StaffForm {
            name,
            phone,
            department: String::new(),
            street,
            city,
            state,
            zip,
            country,
        })
}
