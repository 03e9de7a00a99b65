use serde_json::Value as Json;

use crate::checker::AssetCheckResult;
use crate::checker::builtin::{FILE_SIZE, LINE_ENDINGS};

use super::{DetailsView, ViewRegistry};

/// Name under which [`builtin_views`] is available to settings files.
pub const BUILTIN_VIEW_PROVIDER: &str = "builtin";

/// Views for the records produced by the built-in checkers.
#[must_use]
pub fn builtin_views() -> ViewRegistry {
    let mut views = ViewRegistry::new();
    views.register(FileSizeView);
    views.register(LineEndingsView);
    views
}

struct FileSizeView;

impl DetailsView for FileSizeView {
    fn view_id(&self) -> &str {
        FILE_SIZE
    }

    fn render(&self, result: &AssetCheckResult) -> String {
        let data = result.custom_data.as_ref();
        let size = data.and_then(|d| d["size"].as_u64());
        let limit = data.and_then(|d| d["limit"].as_u64());
        match (size, limit) {
            (Some(size), Some(limit)) => format!(
                "Size:  {}\nLimit: {}\nOver by {}",
                human_bytes(size),
                human_bytes(limit),
                human_bytes(size.saturating_sub(limit))
            ),
            _ => result.details.clone(),
        }
    }
}

struct LineEndingsView;

impl DetailsView for LineEndingsView {
    fn view_id(&self) -> &str {
        LINE_ENDINGS
    }

    fn render(&self, result: &AssetCheckResult) -> String {
        let issues: Vec<&str> = result
            .custom_data
            .as_ref()
            .and_then(|d| d["issues"].as_array())
            .map(|issues| issues.iter().filter_map(Json::as_str).collect())
            .unwrap_or_default();
        if issues.is_empty() {
            return result.details.clone();
        }
        let mut text = String::from("Formatting issues:");
        for issue in issues {
            text.push_str("\n  [");
            text.push_str(if result.repairable { "fixable" } else { "manual" });
            text.push_str("] ");
            text.push_str(issue);
        }
        text
    }
}

#[allow(clippy::cast_precision_loss)]
fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
