//! Ask a remote authority whether the stored bearer credential is accepted.
//!
//! DESIGN
//! ======
//! [`AuthChecker`] issues a single `GET` with `Authorization: Bearer <token>`
//! and folds every outcome into a boolean. The token comes from an injected
//! [`CredentialSource`], normally a [`StoredCredential`] over the file-backed
//! [`LocalStorage`]. The [`gate`] module turns the answer into a navigation
//! decision for entry points and protected routes.

pub mod check;
pub mod config;
pub mod credential;
pub mod error;
pub mod gate;
pub mod storage;

pub use check::{AuthChecker, CheckOutcome};
pub use config::{AuthConfig, CheckEndpoint};
pub use credential::{CredentialSource, EnvCredential, StaticCredential, StoredCredential, bearer_value};
pub use error::AuthError;
pub use gate::{GateDecision, RouteGuard};
pub use storage::LocalStorage;
