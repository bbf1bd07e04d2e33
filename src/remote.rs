pub mod auth_api;
pub use auth_api::{AuthApi, HttpAuthApi};
pub mod profile_api;
pub use profile_api::{HttpProfileApi, ProfileApi};
pub mod tenancy_api;
pub use tenancy_api::{HttpTenancyApi, TenancyApi};

mod http;
