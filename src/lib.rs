pub mod app;
pub mod clients;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod report;
pub mod state;
pub mod ui;

pub use app::router;
pub use ledger::Ledger;
pub use state::AppState;
