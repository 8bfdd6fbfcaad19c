//! Widget lifecycle: mount, refresh loop, teardown.
//!
//! The widget owns one long-lived resource, the refresh task. State flows
//! out through a watch channel and is replaced wholesale on every
//! successful fetch; a failed fetch leaves the last snapshot on screen.

use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    location::Locator,
    model::{Coordinates, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Notice shown when location acquisition fails and the fallback is used.
pub const LOCATION_FALLBACK_NOTICE: &str =
    "Location access is unavailable. Allow the app to access your location \
     for real-time local weather; a default location is being used instead.";

/// What the widget is currently showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WidgetState {
    /// Before the first successful fetch.
    #[default]
    AwaitingLocation,
    /// A snapshot is on screen. The widget never leaves this state, even
    /// when later fetches fail.
    Displaying(WeatherSnapshot),
}

impl WidgetState {
    pub fn is_displaying(&self) -> bool {
        matches!(self, WidgetState::Displaying(_))
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            WidgetState::Displaying(snapshot) => Some(snapshot),
            WidgetState::AwaitingLocation => None,
        }
    }
}

/// Sink for one-shot user-facing notices, the widget's "blocking alert".
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub struct Widget;

impl Widget {
    /// Mount the widget: acquire a location once, then poll for weather
    /// until the returned handle is unmounted or dropped.
    ///
    /// A location failure never prevents mounting: the fallback coordinates
    /// are substituted and the notifier fires exactly once.
    pub fn mount(
        provider: Arc<dyn WeatherProvider>,
        locator: Arc<dyn Locator>,
        notifier: Arc<dyn Notifier>,
        fallback: Coordinates,
        poll_interval: Duration,
    ) -> WidgetHandle {
        let (tx, rx) = watch::channel(WidgetState::AwaitingLocation);

        let task = tokio::spawn(async move {
            let coordinates = match locator.locate().await {
                Ok(coordinates) => coordinates,
                Err(err) => {
                    tracing::warn!(%err, "location unavailable, using fallback coordinates");
                    notifier.notify(LOCATION_FALLBACK_NOTICE);
                    fallback
                }
            };

            poll_loop(provider, coordinates, poll_interval, tx).await;
        });

        WidgetHandle { state: rx, task }
    }

    /// Mount with known coordinates, skipping location acquisition.
    pub fn mount_at(
        provider: Arc<dyn WeatherProvider>,
        coordinates: Coordinates,
        poll_interval: Duration,
    ) -> WidgetHandle {
        let (tx, rx) = watch::channel(WidgetState::AwaitingLocation);
        let task = tokio::spawn(poll_loop(provider, coordinates, poll_interval, tx));

        WidgetHandle { state: rx, task }
    }
}

/// Fetch immediately, then on every tick. Fixed period, no backoff.
async fn poll_loop(
    provider: Arc<dyn WeatherProvider>,
    coordinates: Coordinates,
    period: Duration,
    state: watch::Sender<WidgetState>,
) {
    let mut ticker = tokio::time::interval(period);

    loop {
        ticker.tick().await;

        match provider.current(coordinates).await {
            Ok(snapshot) => {
                // Wholesale replacement; receivers never see a partial update.
                let _ = state.send(WidgetState::Displaying(snapshot));
            }
            Err(err) => {
                // Last snapshot stays up; the next tick tries again.
                tracing::error!(%err, "weather fetch failed");
            }
        }
    }
}

/// Owner of the widget's refresh task.
///
/// Dropping the handle aborts the task, so no update fires after teardown.
#[derive(Debug)]
pub struct WidgetHandle {
    state: watch::Receiver<WidgetState>,
    task: JoinHandle<()>,
}

impl WidgetHandle {
    /// Subscribe to state updates.
    pub fn state(&self) -> watch::Receiver<WidgetState> {
        self.state.clone()
    }

    /// Stop polling and release the refresh timer.
    pub fn unmount(self) {
        self.task.abort();
    }
}

impl Drop for WidgetHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
