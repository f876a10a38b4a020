//! POS back-office client core
//!
//! Everything between the remote POS API and the rendered screen: typed
//! configuration, session handling, the API client, and the workflow
//! services the back-office screens drive. Rendering, routing, cookie
//! storage, and widgets stay in the host.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;

pub use api::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult, ErrorDetail};
pub use session::{Session, SessionStatus, SessionStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber. Host binaries call this once at
/// startup; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pos_backoffice_client=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
