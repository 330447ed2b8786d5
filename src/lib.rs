pub mod appstate;
pub mod config;
pub mod routes;
pub mod types;
pub mod upstream;

pub use appstate::AppState;
