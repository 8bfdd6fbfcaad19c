//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration handling
//! - The domain model (snapshots, icon categories)
//! - Abstraction over the weather provider
//! - Location acquisition with a GeoIP implementation
//! - The widget lifecycle: state, refresh loop, teardown
//!
//! It is used by `widget-cli`, but can also be embedded in other front-ends.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod widget;

pub use config::Config;
pub use error::LocationError;
pub use location::{IpLocator, Locator};
pub use model::{Coordinates, Icon, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use widget::{
    LOCATION_FALLBACK_NOTICE, Notifier, Widget, WidgetHandle, WidgetState,
};
