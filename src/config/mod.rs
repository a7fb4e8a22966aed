//! Configuration: inference behaviour and cache defaults.

mod settings;

pub use settings::{
    CacheSettings, InferenceSettings, Settings, SettingsError, CONFIG_ENV_VAR,
};
