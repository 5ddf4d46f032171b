//! Contact Form
//!
//! The only stateful piece of the portfolio page: four text fields, a validation
//! contract, and a small submission state machine driving an email delivery client.

pub mod controller;
pub mod fields;
pub mod state;
pub mod validation;

pub use controller::ContactFormController;
pub use fields::{ContactSubmission, Field};
pub use state::{Notice, NoticeKind, SubmissionState};
pub use validation::FieldErrors;
