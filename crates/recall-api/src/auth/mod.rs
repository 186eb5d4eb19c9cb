pub mod extract;
pub mod routes;
pub mod token;

pub use extract::CurrentUser;
pub use routes::routes;
