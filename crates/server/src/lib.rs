//! Phonebook Server - HTTP REST API over the contact store
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /api/persons` - List contacts
//! - `GET /api/persons/{id}` - Get contact by ID
//! - `POST /api/persons` - Create contact
//! - `DELETE /api/persons/{id}` - Delete contact
//! - `GET /api/info` - Record count and server time (HTML)
//!
//! Every other path is served from the static frontend bundle.
//!
//! # Configuration
//!
//! `PORT` and `MONGODB_URI` are read from the environment (a `.env` file is
//! honoured); a missing `MONGODB_URI` aborts startup. See [`ServerConfig`].

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
