pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use self::core::*;
pub use errors::{ErrorStatusPolicy, SpeakError, SpeakResult};
pub use handlers::{ProxyEvent, ProxyResponse, SpeakService};
pub use state::AppState;
