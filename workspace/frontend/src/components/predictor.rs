mod endpoint;
mod result;
mod view;

pub use endpoint::EndpointSettings;
pub use view::PredictorPanel;
