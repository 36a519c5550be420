//! The "Add New Staff" form and its submit action.

use tracing::{debug, error, info};

use crate::api::DirectoryApi;
use crate::error::{DirError, Result};
use crate::model::{CreatedStaff, Department, NewStaff};

/// Alert shown when the service rejects or never answers a create.
pub const CREATE_FAILED_ALERT: &str = "Failed to add staff";

/// One of the eight required form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Department,
    Street,
    City,
    State,
    Zip,
    Country,
}

impl FormField {
    /// Fields in on-screen order.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Phone,
        Self::Department,
        Self::Street,
        Self::City,
        Self::State,
        Self::Zip,
        Self::Country,
    ];

    /// Input placeholder shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Phone => "Phone Number",
            Self::Department => "Department",
            Self::Street => "Street Address",
            Self::City => "City",
            Self::State => "State",
            Self::Zip => "ZIP Code",
            Self::Country => "Country",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Values typed into the form. Client-side only until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffForm {
    pub name: String,
    pub phone: String,
    pub department: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl StaffForm {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Phone => &self.phone,
            FormField::Department => &self.department,
            FormField::Street => &self.street,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Zip => &self.zip,
            FormField::Country => &self.country,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Phone => &mut self.phone,
            FormField::Department => &mut self.department,
            FormField::Street => &mut self.street,
            FormField::City => &mut self.city,
            FormField::State => &mut self.state,
            FormField::Zip => &mut self.zip,
            FormField::Country => &mut self.country,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Clear all eight fields.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fields that are still empty, in on-screen order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }

    /// Check presence of every field and resolve the department name.
    ///
    /// Resolution takes the first department whose name equals the typed
    /// text exactly (case-sensitive).
    pub fn validate(&self, departments: &[Department]) -> Result<NewStaff> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, "Staff form incomplete");
            return Err(DirError::MissingField);
        }

        let department_id = departments
            .iter()
            .find(|dep| dep.name == self.department)
            .map(|dep| dep.id.clone())
            .ok_or_else(|| DirError::InvalidDepartment(self.department.clone()))?;

        Ok(NewStaff {
            name: self.name.clone(),
            phone: self.phone.clone(),
            department_id,
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            country: self.country.clone(),
        })
    }
}

/// Visibility of the creation modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalVisibility {
    #[default]
    Hidden,
    Visible,
}

/// The creation modal: form values plus whether it is showing.
#[derive(Debug, Clone, Default)]
pub struct CreationForm {
    form: StaffForm,
    visibility: ModalVisibility,
}

impl CreationForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn open(&mut self) {
        self.visibility = ModalVisibility::Visible;
    }

    /// Hide the modal. Typed values are kept in memory only.
    pub const fn close(&mut self) {
        self.visibility = ModalVisibility::Hidden;
    }

    #[must_use]
    pub const fn visibility(&self) -> ModalVisibility {
        self.visibility
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == ModalVisibility::Visible
    }

    #[must_use]
    pub const fn form(&self) -> &StaffForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut StaffForm {
        &mut self.form
    }

    /// Validate, resolve the department, and create the record.
    ///
    /// On success the modal is hidden and every field cleared; the caller
    /// refreshes the staff list. On any failure the modal and the typed
    /// values are left untouched so the user can correct and resubmit.
    pub fn submit(
        &mut self,
        api: &dyn DirectoryApi,
        departments: &[Department],
    ) -> Result<CreatedStaff> {
        let payload = self.form.validate(departments)?;

        match api.create_staff(&payload) {
            Ok(response) => {
                info!(name = %payload.name, response = %response, "Staff saved");
                self.visibility = ModalVisibility::Hidden;
                self.form.reset();
                Ok(CreatedStaff {
                    request: payload,
                    response,
                })
            }
            Err(err) => {
                error!(error = %err, "Error saving staff");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;
    use crate::test_utils::FakeDirectoryApi;

    fn departments() -> Vec<Department> {
        vec![
            Department::new(1, "HR"),
            Department::new(2, "Engineering"),
            Department::new(3, "Engineering"),
        ]
    }

    fn filled_form() -> StaffForm {
        StaffForm {
            name: "Carol Ng".into(),
            phone: "555-0101".into(),
            department: "Engineering".into(),
            street: "2 Elm St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62702".into(),
            country: "USA".into(),
        }
    }

    fn open_with(form: StaffForm) -> CreationForm {
        let mut creation = CreationForm::new();
        *creation.form_mut() = form;
        creation.open();
        creation
    }

    #[test]
    fn test_generic_setter_and_reset() {
        let mut form = StaffForm::default();
        for field in FormField::ALL {
            form.set(field, field.placeholder());
        }
        assert_eq!(form.get(FormField::Zip), "ZIP Code");
        assert!(form.missing_fields().is_empty());

        form.reset();
        assert_eq!(form, StaffForm::default());
        assert_eq!(form.missing_fields().len(), 8);
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(FormField::Name.next(), FormField::Phone);
        assert_eq!(FormField::Country.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Country);
    }

    #[test]
    fn test_each_missing_field_blocks_create() {
        for field in FormField::ALL {
            let mut form = filled_form();
            form.set(field, "");
            let mut creation = open_with(form.clone());
            let api = FakeDirectoryApi::new();

            let err = creation.submit(&api, &departments()).unwrap_err();

            assert!(matches!(err, DirError::MissingField), "{field:?}");
            assert_eq!(api.create_calls(), 0, "{field:?} reached the network");
            assert!(creation.is_visible());
            assert_eq!(creation.form(), &form);
        }
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let mut form = filled_form();
        form.set(FormField::Phone, " ");
        assert!(form.validate(&departments()).is_ok());
    }

    #[test]
    fn test_unknown_department_blocks_create() {
        let mut form = filled_form();
        form.set(FormField::Department, "Marketing");
        let mut creation = open_with(form);
        let api = FakeDirectoryApi::new();

        let err = creation.submit(&api, &departments()).unwrap_err();

        assert!(matches!(err, DirError::InvalidDepartment(ref name) if name == "Marketing"));
        assert_eq!(api.create_calls(), 0);
        assert!(creation.is_visible());
    }

    #[test]
    fn test_department_match_is_case_sensitive() {
        let mut form = filled_form();
        form.set(FormField::Department, "engineering");
        assert!(matches!(
            form.validate(&departments()),
            Err(DirError::InvalidDepartment(_))
        ));
    }

    #[test]
    fn test_department_resolves_to_first_match() {
        let payload = filled_form().validate(&departments()).unwrap();
        assert_eq!(payload.department_id, RecordId::Int(2));
    }

    #[test]
    fn test_successful_submit_clears_and_closes() {
        let mut creation = open_with(filled_form());
        let api = FakeDirectoryApi::new();

        let created = creation.submit(&api, &departments()).unwrap();

        assert_eq!(api.create_calls(), 1);
        let sent = api.created_payloads();
        assert_eq!(sent[0].department_id, RecordId::Int(2));
        assert_eq!(sent[0].name, "Carol Ng");
        assert_eq!(created.request.name, "Carol Ng");
        assert!(!creation.is_visible());
        assert_eq!(creation.form(), &StaffForm::default());
    }

    #[test]
    fn test_submit_succeeds_whatever_the_response_shape() {
        for response in [
            serde_json::json!({ "id": 9, "name": "Carol Ng", "departmentId": 2 }),
            serde_json::Value::Null,
        ] {
            let mut creation = open_with(filled_form());
            let api = FakeDirectoryApi::new();
            api.respond_to_creates_with(response.clone());

            let created = creation.submit(&api, &departments()).unwrap();

            assert_eq!(created.response, response);
            assert!(!creation.is_visible());
            assert_eq!(creation.form(), &StaffForm::default());
        }
    }

    #[test]
    fn test_failed_create_keeps_form_open_and_filled() {
        let mut creation = open_with(filled_form());
        let api = FakeDirectoryApi::new();
        api.fail_creates(true);

        let err = creation.submit(&api, &departments()).unwrap_err();

        assert!(!err.is_form_error());
        assert_eq!(api.create_calls(), 1);
        assert_eq!(creation.visibility(), ModalVisibility::Visible);
        assert_eq!(creation.form(), &filled_form());
    }

    #[test]
    fn test_close_keeps_values() {
        let mut creation = open_with(filled_form());
        creation.close();
        assert!(!creation.is_visible());
        assert_eq!(creation.form(), &filled_form());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;
        use crate::test_utils::arbitrary::{arb_departments, arb_filled_form};

        proptest! {
            #[test]
            fn filled_form_resolves_listed_department(
                (departments, pick) in arb_departments()
                    .prop_flat_map(|deps| { let len = deps.len(); (Just(deps), 0..len) }),
                mut form in arb_filled_form(),
            ) {
                form.department = departments[pick].name.clone();
                let payload = form.validate(&departments).unwrap();

                let first = departments
                    .iter()
                    .find(|dep| dep.name == form.department)
                    .unwrap();
                prop_assert_eq!(payload.department_id, first.id.clone());
                prop_assert_eq!(payload.name, form.name);
            }

            #[test]
            fn any_empty_field_fails_presence(
                departments in arb_departments(),
                mut form in arb_filled_form(),
                blank in 0..FormField::ALL.len(),
            ) {
                form.department = departments[0].name.clone();
                form.set(FormField::ALL[blank], "");
                prop_assert!(matches!(form.validate(&departments), Err(DirError::MissingField)));
            }
        }
    }
}
