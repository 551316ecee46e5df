//! Application state for the web layer.

use std::sync::Arc;

use crate::bus::BusClient;
use crate::train::TrainClient;

/// Shared application state.
///
/// Both clients are built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Bus tracker client
    pub bus: Arc<BusClient>,

    /// Train tracker client
    pub train: Arc<TrainClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(bus: BusClient, train: TrainClient) -> Self {
        Self {
            bus: Arc::new(bus),
            train: Arc::new(train),
        }
    }
}
