//! Details rendering for result records.
//!
//! A record's `custom_view_id` names an alternate renderer. When the active
//! [`CustomViewProvider`] has a view for that id, the view renders the
//! record; otherwise the plain `details` text is shown.

mod builtin;
mod style;

pub use builtin::{BUILTIN_VIEW_PROVIDER, builtin_views};
pub use style::{ResultIconStyle, status_line};

use std::rc::Rc;

use indexmap::IndexMap;

use crate::checker::AssetCheckResult;

/// Renders the details of records tagged with one view id.
pub trait DetailsView {
    fn view_id(&self) -> &str;

    /// Render `result`. Only called for records carrying this view's id.
    fn render(&self, result: &AssetCheckResult) -> String;
}

pub trait CustomViewProvider {
    /// View registered for `view_id`, if any.
    fn details_view(&self, view_id: &str) -> Option<Rc<dyn DetailsView>>;
}

/// Views keyed by id.
#[derive(Default, Clone)]
pub struct ViewRegistry {
    views: IndexMap<String, Rc<dyn DetailsView>>,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<V: DetailsView + 'static>(&mut self, view: V) {
        self.views.insert(view.view_id().to_string(), Rc::new(view));
    }

    pub fn view_ids(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }
}

impl CustomViewProvider for ViewRegistry {
    fn details_view(&self, view_id: &str) -> Option<Rc<dyn DetailsView>> {
        self.views.get(view_id).cloned()
    }
}

/// Rendered details body of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedDetails {
    Custom { view_id: String, body: String },
    Plain(String),
}

impl RenderedDetails {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Custom { body, .. } => body,
            Self::Plain(text) => text,
        }
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

/// Render the details of `result`, preferring its custom view.
///
/// A custom view id that the provider cannot resolve is logged as an error
/// and rendered as plain text.
#[must_use]
pub fn render_details(
    result: &AssetCheckResult,
    provider: Option<&dyn CustomViewProvider>,
) -> RenderedDetails {
    let view_id = result.custom_view_id.as_deref().filter(|id| !id.is_empty());
    if let (Some(view_id), Some(provider)) = (view_id, provider) {
        match provider.details_view(view_id) {
            Some(view) if view.view_id() == view_id => {
                return RenderedDetails::Custom {
                    view_id: view_id.to_string(),
                    body: view.render(result),
                };
            }
            _ => tracing::error!(
                target: crate::LOG_TARGET,
                view_id,
                "Can not find custom details view"
            ),
        }
    }
    RenderedDetails::Plain(result.details.clone())
}

/// Join categories for display: the first verbatim, the rest trimmed with
/// empty entries skipped.
#[must_use]
pub fn format_categories(categories: &[String]) -> Option<String> {
    let (first, rest) = categories.split_first()?;
    let mut text = first.clone();
    for category in rest.iter().filter(|c| !c.is_empty()) {
        text.push_str(" | ");
        text.push_str(category.trim());
    }
    Some(text)
}

/// Everything a details panel shows for the selected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultDetails {
    pub title: String,
    pub type_name: &'static str,
    pub border_color: (u8, u8, u8),
    pub categories: Option<String>,
    pub body: RenderedDetails,
    pub can_recheck: bool,
    pub can_repair: bool,
}

impl ResultDetails {
    #[must_use]
    pub fn describe(result: &AssetCheckResult, provider: Option<&dyn CustomViewProvider>) -> Self {
        Self {
            title: result.title.clone(),
            type_name: result.result_type.display_name(),
            border_color: result.result_type.border_color(),
            categories: format_categories(&result.categories),
            body: render_details(result, provider),
            can_recheck: result.can_recheck(),
            can_repair: result.repairable,
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
