//! Everything the user sees: the result panel and the error panel.

use weather_core::{DisplayModel, LookupError};

pub fn result_panel(model: &DisplayModel) -> String {
    let mut out = format!(
        "{}\n  {}  {}\n  {}",
        model.name,
        model.icon.glyph(),
        model.temperature,
        model.description,
    );
    if let Some(time) = &model.observed_at {
        out.push_str(&format!("\n  as of {time}"));
    }
    out
}

pub fn error_panel(err: &LookupError) -> String {
    format!("Failed to fetch weather: {err}")
}

pub fn json(model: &DisplayModel) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// What a finished search shows: the result on stdout or the error on stderr.
#[derive(Debug, PartialEq, Eq)]
pub enum Panel {
    Result(String),
    Error(String),
}

pub fn outcome(result: &Result<DisplayModel, LookupError>, as_json: bool) -> anyhow::Result<Panel> {
    Ok(match result {
        Ok(model) if as_json => Panel::Result(json(model)?),
        Ok(model) => Panel::Result(result_panel(model)),
        Err(err) => Panel::Error(error_panel(err)),
    })
}
