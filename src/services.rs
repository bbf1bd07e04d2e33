pub mod session;
pub use session::SessionService;
pub mod tenancy;
pub use tenancy::TenancyService;
pub mod profile;
pub use profile::{ProfileData, ProfileService};
