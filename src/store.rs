pub mod secure_store;
pub use secure_store::{CredentialStore, FileCredentialStore, KEY_FIRST_NAME, KEY_USER_TOKEN};
pub mod memory;
pub use memory::MemoryCredentialStore;
