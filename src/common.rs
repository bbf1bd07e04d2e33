pub mod error;
pub use error::{AuthError, AuthErrorKind, FetchError, StoreError, WrongCredential};
pub mod retry;
pub use retry::{RetryFailure, RetryPolicy};
