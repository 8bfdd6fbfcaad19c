//! Terminal rendering of widget state.
//!
//! Mirrors the widget's two states: a "detecting your location" banner
//! until the first snapshot arrives, then city, icon, temperatures, a live
//! clock and a date line, redrawn once per second.

use std::io::{self, Write};
use std::time::Duration;

use chrono::{DateTime, Local};
use widget_core::{Icon, WeatherSnapshot, WidgetHandle};

const CLOCK_TICK: Duration = Duration::from_secs(1);

pub async fn render_loop(handle: WidgetHandle, once: bool) -> anyhow::Result<()> {
    let mut state = handle.state();

    if once {
        while !state.borrow_and_update().is_displaying() {
            state.changed().await?;
        }
        if let Some(snapshot) = state.borrow().snapshot() {
            print!("{}", frame(snapshot, Local::now()));
        }
        return Ok(());
    }

    let mut ticker = tokio::time::interval(CLOCK_TICK);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let text = match state.borrow().snapshot() {
                    Some(snapshot) => frame(snapshot, Local::now()),
                    None => detecting_banner(),
                };
                // Clear and redraw the whole frame in place.
                print!("\x1b[2J\x1b[H{text}");
                io::stdout().flush()?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.unmount();
    Ok(())
}

fn frame(snapshot: &WeatherSnapshot, now: DateTime<Local>) -> String {
    format!(
        "{city}, {country}\n{glyph}  {condition}\n{c}°C / {f}°F\n{clock}\n{date}\n",
        city = snapshot.city,
        country = snapshot.country,
        glyph = icon_glyph(snapshot.icon),
        condition = snapshot.condition,
        c = snapshot.temperature_c,
        f = snapshot.temperature_f,
        clock = now.format("%H:%M:%S"),
        date = date_line(now),
    )
}

/// e.g. "Friday, 28 August 2026"
fn date_line(now: DateTime<Local>) -> String {
    now.format("%A, %-d %B %Y").to_string()
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::ClearDay => "☀",
        Icon::Cloudy => "☁",
        Icon::Rain => "🌧",
        Icon::Snow => "❄",
        Icon::Wind => "🌪",
        Icon::Sleet => "🌨",
        Icon::Fog => "🌫",
    }
}

fn detecting_banner() -> String {
    "Detecting your location\n\
     Your current location will be displayed on the app\n\
     and used for calculating real-time weather.\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use widget_core::Coordinates;

    #[test]
    fn frame_shows_place_temperatures_clock_and_date() {
        let snapshot = WeatherSnapshot::from_observation(
            Coordinates { latitude: 28.67, longitude: 77.22 },
            "Delhi".into(),
            "IN".into(),
            "Rain".into(),
            30.0,
        );
        let now = Local.with_ymd_and_hms(2026, 8, 28, 14, 3, 22).unwrap();

        let text = frame(&snapshot, now);

        assert!(text.starts_with("Delhi, IN\n"));
        assert!(text.contains("Rain"));
        assert!(text.contains("30°C / 86°F"));
        assert!(text.contains("14:03:22"));
        assert!(text.contains("Friday, 28 August 2026"));
    }

    #[test]
    fn every_icon_has_a_glyph() {
        let icons = [
            Icon::ClearDay,
            Icon::Cloudy,
            Icon::Rain,
            Icon::Snow,
            Icon::Wind,
            Icon::Sleet,
            Icon::Fog,
        ];
        for icon in icons {
            assert!(!icon_glyph(icon).is_empty());
        }
    }

    #[test]
    fn banner_mentions_location_detection() {
        assert!(detecting_banner().starts_with("Detecting your location"));
    }
}
