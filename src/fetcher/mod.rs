pub mod api_client;
pub mod feature_source;

pub use api_client::ApiClient;
pub use feature_source::{FeatureSource, LoadedFeatures, StaticFeatureSource, load_features};
