//! HTTP surface for the USSD gateway callbacks

mod handlers;
mod types;

pub use handlers::create_router;

use crate::ussd::UssdEngine;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<UssdEngine>,
}

impl AppState {
    pub fn new(engine: UssdEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
