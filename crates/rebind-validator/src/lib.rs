//! Rebind Validator - finding and repairing lost animation bindings
//!
//! A binding is lost when its stored path no longer resolves against the
//! hierarchy under the selected object, typically because a node was
//! renamed or moved. Recovery looks for the one node that still carries the
//! binding's leaf name and rewrites the path to it; ambiguous or missing
//! names are reported and left untouched.

mod recoverer;
mod report;
mod session;
mod validator;

pub use recoverer::{Recoverer, RecoverySummary};
pub use report::{ClipReport, FixState, LostBinding};
pub use session::ValidationSession;
pub use validator::Validator;
