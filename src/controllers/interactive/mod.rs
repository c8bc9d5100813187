//! Interactive exploration: viewport navigation and offloaded recomputation.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: [`ViewportAction`]s applied to a [`ViewportSession`], each
//!   yielding a fresh `ViewportParams` snapshot
//! - **Output**: the [`DeliveryPort`] trait receiving [`DeliveryEvent`]s
//! - **Core**: [`ComputeOffloader`] runs a `FieldComputer` from `core/` on a
//!   worker thread, cancelling superseded work

pub mod data;
pub mod errors;
pub mod events;
mod offloader;
pub mod ports;
mod session;

pub use data::field_delivery::{ComputeFailure, FieldDelivery};
pub use errors::submit::SubmitError;
pub use events::delivery::DeliveryEvent;
pub use offloader::{ComputeOffloader, OffloaderState};
pub use ports::delivery_port::DeliveryPort;
pub use session::{UnknownAction, ViewportAction, ViewportSession};
