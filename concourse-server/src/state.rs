//! Shared application state

use std::sync::Arc;

use concourse_core::GraphStore;
use concourse_core::routing::{Frontier, RoutingOptions};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GraphStore>,
    pub frontier: Frontier,
}

impl AppState {
    pub fn new(store: Arc<GraphStore>, frontier: Frontier) -> Self {
        Self { store, frontier }
    }

    pub fn options(&self, step_free: bool) -> RoutingOptions {
        RoutingOptions {
            step_free,
            frontier: self.frontier,
        }
    }
}
