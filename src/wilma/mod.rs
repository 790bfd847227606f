//! Wilma client: session authentication, date-range expansion, and the
//! schedule download loop.
//!
//! [`auth`] turns a base URL and credentials into an authenticated
//! [`Session`]; [`date_range`] expands the textual `DD.MM.YYYY` bounds into
//! the inclusive day sequence; [`schedule`] walks that sequence and writes
//! one JSON file per date.

pub mod auth;
pub mod date_range;
pub mod schedule;

pub use auth::{login, normalize_base_url, Credentials, Session};
pub use date_range::expand_date_range;
pub use schedule::fetch_schedules;
