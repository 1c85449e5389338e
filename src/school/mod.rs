//! School record rules
//!
//! Pure functions over the demo records: statistics, dashboard summaries,
//! filtering and the create/update rules behind each form. Nothing here
//! touches the backend or the session store; handlers load the data, call
//! into these modules and write the result back into the caller's
//! [`Workspace`](crate::session::Workspace).

pub mod accounts;
pub mod assignments;
pub mod bulletin;
pub mod certifications;
pub mod grades;
pub mod library;
pub mod overview;
pub mod requests;
pub mod schedule;
