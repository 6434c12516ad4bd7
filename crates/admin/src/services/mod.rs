//! Business logic services for the dashboard.
//!
//! # Services
//!
//! - `export` - CSV rendering and downloads
//! - `fetch` - Loading state with stale-result protection
//! - `session` - Operator sign-in state and profile

pub mod export;
pub mod fetch;
pub mod session;

pub use export::{CsvExport, ExportError, NO_DATA_MESSAGE, to_csv};
pub use fetch::{FetchState, Resource, Settlement, Ticket};
pub use session::{Credentials, SessionContext, SessionError, SessionPhase, SessionSnapshot};
