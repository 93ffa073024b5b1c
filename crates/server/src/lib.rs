pub mod errors;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod startup;

pub use startup::run;
