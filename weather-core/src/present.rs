use crate::{DisplayModel, WeatherData};

pub const NAME_PLACEHOLDER: &str = "–";
pub const TEMPERATURE_PLACEHOLDER: &str = "– °C";

pub fn present(weather: &WeatherData) -> DisplayModel {
    let condition = weather.condition();

    DisplayModel {
        name: weather.display_name().unwrap_or(NAME_PLACEHOLDER).to_string(),
        temperature: format_temperature(weather.temperature()),
        description: condition.description().to_string(),
        icon: condition.icon(),
        observed_at: weather.time().map(str::to_owned),
    }
}

/// Whole degrees, e.g. `"20 °C"`. Halves round up (`-2.5` → `-2`).
/// Non-finite input renders the placeholder.
pub fn format_temperature(celsius: f64) -> String {
    if !celsius.is_finite() {
        return TEMPERATURE_PLACEHOLDER.to_string();
    }

    // Going through i64 drops the sign of negative zero.
    format!("{} °C", (celsius + 0.5).floor() as i64)
}
