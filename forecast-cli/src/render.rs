use chrono::{DateTime, Local, Utc};
use forecast_core::{ForecastEntry, TemperatureUnit, TodayReport, WeatherRecord, classify};
use std::fmt::Write;

fn or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn clock(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn slot_line(out: &mut String, label: String, entry: &ForecastEntry, units: TemperatureUnit) {
    let icon = classify(entry.condition_text.as_deref());
    let _ = writeln!(
        out,
        "  {label:<6} {:>8}  {:<14} {}",
        units.format(entry.temperature_celsius),
        icon.label(),
        entry.condition_text.as_deref().unwrap_or(""),
    );
}

pub fn today(report: &TodayReport, units: TemperatureUnit) -> String {
    let c = &report.current;
    let icon = classify(c.condition_text.as_deref());
    let mut out = String::new();

    let _ = writeln!(out, "{}", c.location_name);
    let _ = writeln!(
        out,
        "  {}  {} [{}]",
        units.format(c.temperature_celsius),
        c.condition_text.as_deref().unwrap_or("N/A"),
        icon.asset_name(),
    );
    let _ = writeln!(out, "  Wind speed: {} m/s", or_na(c.wind_speed_mps));
    let _ = writeln!(out, "  Humidity: {}%", or_na(c.humidity_pct));
    let _ = writeln!(out, "  Precipitation: {} mm", or_na(c.precipitation_1h_mm));
    let _ = writeln!(out, "  Sunrise: {}  Sunset: {}", clock(c.sunrise), clock(c.sunset));
    let _ = writeln!(out, "  Pressure: {} hPa", or_na(c.pressure_hpa));
    let _ = writeln!(out, "  Visibility: {} meters", or_na(c.visibility_m));

    let _ = writeln!(out, "\nHourly Forecast");
    if report.hourly.is_empty() {
        let _ = writeln!(out, "  (no more slots today)");
    }
    for entry in &report.hourly {
        slot_line(&mut out, clock(Some(entry.time)), entry, units);
    }

    let _ = writeln!(out, "\nDaily Outlook");
    for entry in &report.daily {
        let day = entry.time.with_timezone(&Local).format("%a").to_string();
        slot_line(&mut out, day, entry, units);
    }

    out
}

pub fn cards(records: &[WeatherRecord], units: TemperatureUnit) -> String {
    let mut out = String::new();
    for r in records {
        let icon = classify(r.condition_text.as_deref());
        let _ = writeln!(
            out,
            "{:<20} {:>8}  {:<24} [{}]",
            r.location_name,
            units.format(r.temperature_celsius),
            r.condition_text.as_deref().unwrap_or("N/A"),
            icon.asset_name(),
        );
    }
    out
}
