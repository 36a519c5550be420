//! Directory logic behind the staff screen.
//!
//! - [`store`]: fetched staff and department lists, refreshed in the background
//! - [`filter`]: live search over the staff list
//! - [`form`]: the "Add New Staff" form and its submit action

pub mod filter;
pub mod form;
pub mod store;

pub use filter::{NO_RESULTS, filter_staff, matches};
pub use form::{CREATE_FAILED_ALERT, CreationForm, FormField, ModalVisibility, StaffForm};
pub use store::{CancellationToken, DirectoryStore, Resource};
