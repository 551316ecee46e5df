//! Train tracker client.
//!
//! HTTP client for the rail tracking provider: arrival predictions by
//! station or platform, a single run's upcoming stops, and live train
//! positions per route.
//!
//! Every response is wrapped in a `ctatt` object carrying `errCd`/`errNm`;
//! `errCd` "0" means success. Lists with a single element are rendered as a
//! bare object, so all list payloads are decoded with that in mind.

mod client;
mod types;

pub use client::{TrainClient, TrainConfig};
pub use types::{Arrival, ArrivalTarget, LocatedTrain, RouteTrains, RunFollow, TrainPosition};
