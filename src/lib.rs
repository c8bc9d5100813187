pub mod config;
pub mod controllers;
pub mod core;
pub mod presenters;
pub mod protocol;

pub use config::{
    Config, ConfigError, NavigationConfig, NavigationConfigError, PaletteConfig, ViewportConfig,
};
pub use controllers::cli::explore::{ExploreController, ExploreError, ExploreSummary};
pub use controllers::cli::render::RenderController;
pub use controllers::interactive::{
    ComputeFailure, ComputeOffloader, DeliveryEvent, DeliveryPort, FieldDelivery,
    OffloaderState, SubmitError, ViewportAction, ViewportSession,
};
pub use crate::core::colour_mapping::factory::colour_map_factory;
pub use crate::core::colour_mapping::kinds::ColourMapKinds;
pub use crate::core::data::complex::ComplexPoint;
pub use crate::core::data::progression_field::{Progression, ProgressionField};
pub use crate::core::data::viewport_params::{ViewportParams, ViewportParamsError};
pub use presenters::file::ppm::PpmFilePresenter;
