//! A checking session: the result collection a host window works against.
//!
//! The session owns the results of the last run, the active filters and the
//! icon style. Recheck and repair update the collection in place and notify
//! subscribed [`SessionObserver`]s. When a [`StateStore`] is attached, every
//! mutation is written through to it immediately.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::checker::{AssetCheckResult, CheckResultStats, ResultTypeMask};
use crate::config::Settings;
use crate::engine::{self, ExecutionStatus, RecheckOutcome, RepairOutcome};
use crate::error::{AssetCheckError, Result};
use crate::filter::{CategoryFilter, FilteredResults, ResultFilter};
use crate::state::{SaveOutcome, SessionState, StateStore, StoredCheckResult};
use crate::view::{ResultDetails, ResultIconStyle, status_line};

/// Receives result changes made through a [`CheckSession`].
pub trait SessionObserver {
    /// `new` is `None` when the recheck found no issue and `old` was removed.
    fn asset_rechecked(&self, new: Option<&AssetCheckResult>, old: &AssetCheckResult) {
        let _ = (new, old);
    }

    fn asset_repaired(&self, result: &AssetCheckResult, all_issues_repaired: bool) {
        let _ = (result, all_issues_repaired);
    }
}

pub struct CheckSession {
    settings: Settings,
    settings_path: Option<PathBuf>,
    results: Vec<AssetCheckResult>,
    null_result_count: usize,
    stats: CheckResultStats,
    filter: ResultFilter,
    filtered: FilteredResults,
    icon_style: ResultIconStyle,
    store: Option<StateStore>,
    observers: Vec<Rc<dyn SessionObserver>>,
}

impl CheckSession {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            settings_path: None,
            results: Vec::new(),
            null_result_count: 0,
            stats: CheckResultStats::default(),
            filter: ResultFilter::default(),
            filtered: FilteredResults::default(),
            icon_style: ResultIconStyle::default(),
            store: None,
            observers: Vec::new(),
        }
    }

    /// Session seeded from saved state.
    ///
    /// Stored results are rebound to the checkers of `settings` by name;
    /// results whose checker is no longer configured cannot be rechecked.
    #[must_use]
    pub fn from_state(settings: Settings, state: SessionState) -> Self {
        let results: Vec<AssetCheckResult> = state
            .results
            .into_iter()
            .map(|stored| stored.restore(|name| settings.checker(name).cloned()))
            .collect();
        let filter = ResultFilter::new(state.type_filter, state.category_filter);
        let filtered = filter.apply(&results);

        Self {
            stats: CheckResultStats::from_results(&results, state.stats.null_result),
            null_result_count: state.stats.null_result,
            settings,
            settings_path: state.settings_path,
            results,
            filter,
            filtered,
            icon_style: state.icon_style,
            store: None,
            observers: Vec::new(),
        }
    }

    /// Load saved state from `store` and keep writing through to it.
    ///
    /// # Errors
    /// Returns an error if the state file exists but cannot be read.
    pub fn load(settings: Settings, store: StateStore) -> Result<Self> {
        let state = store.load()?;
        Ok(Self::from_state(settings, state).with_store(store))
    }

    #[must_use]
    pub fn with_store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn subscribe(&mut self, observer: Rc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }

    /// Swap the active settings. Existing results are kept.
    ///
    /// Each result is rebound to the new settings' checker of the same
    /// name. Results whose checker was dropped can no longer be rechecked.
    pub fn set_settings(&mut self, settings: Settings, path: Option<PathBuf>) {
        for result in &mut self.results {
            if let Some(checker) = result.checker.take() {
                result.checker = settings.checker(checker.name()).cloned();
            }
        }
        self.settings = settings;
        self.settings_path = path;
        self.persist();
    }

    #[must_use]
    pub fn results(&self) -> &[AssetCheckResult] {
        &self.results
    }

    #[must_use]
    pub const fn stats(&self) -> &CheckResultStats {
        &self.stats
    }

    #[must_use]
    pub const fn filter(&self) -> &ResultFilter {
        &self.filter
    }

    #[must_use]
    pub const fn filtered(&self) -> &FilteredResults {
        &self.filtered
    }

    pub fn filtered_results(&self) -> impl Iterator<Item = &AssetCheckResult> {
        self.filtered.iter(&self.results)
    }

    #[must_use]
    pub fn category_choices(&self) -> Vec<String> {
        self.filtered.category_choices()
    }

    #[must_use]
    pub const fn icon_style(&self) -> ResultIconStyle {
        self.icon_style
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        status_line(&self.stats, self.filtered.len())
    }

    /// Details panel content for the result at `index`.
    #[must_use]
    pub fn details(&self, index: usize) -> Option<ResultDetails> {
        let result = self.results.get(index)?;
        Some(ResultDetails::describe(
            result,
            self.settings.custom_view_provider.as_deref(),
        ))
    }

    /// Clear the collection and run every configured checker over the
    /// provider's assets.
    ///
    /// # Errors
    /// Returns the configuration error that stopped the run. The previous
    /// results are gone either way.
    pub fn execute(&mut self) -> Result<ExecutionStatus> {
        self.results.clear();
        self.null_result_count = 0;

        let outcome = engine::execute(self.settings.provider.as_deref(), &self.settings.checkers);
        let status = outcome.map(|report| {
            self.results = report.results;
            self.null_result_count = report.null_result_count;
            report.status
        });

        self.refresh();
        status
    }

    /// Re-run the checker behind the result at `index`.
    ///
    /// # Errors
    /// Returns an error if `index` is out of range or the result has no
    /// (asset, checker) pair to re-run.
    pub fn recheck(&mut self, index: usize) -> Result<RecheckOutcome> {
        let old = self
            .results
            .get(index)
            .ok_or(AssetCheckError::ResultIndex(index))?;
        let outcome = engine::recheck(old).ok_or(AssetCheckError::NotRecheckable(index))?;

        let old = match &outcome {
            RecheckOutcome::Resolved => self.results.remove(index),
            RecheckOutcome::Updated(new) => std::mem::replace(&mut self.results[index], new.clone()),
        };
        self.refresh();

        let new = match &outcome {
            RecheckOutcome::Resolved => None,
            RecheckOutcome::Updated(new) => Some(new),
        };
        for observer in &self.observers {
            observer.asset_rechecked(new, &old);
        }
        Ok(outcome)
    }

    /// Repair the result at `index`; a fully repaired result is removed.
    ///
    /// # Errors
    /// Returns an error if `index` is out of range or the result is not
    /// repairable.
    pub fn repair(&mut self, index: usize) -> Result<RepairOutcome> {
        let record = self
            .results
            .get_mut(index)
            .ok_or(AssetCheckError::ResultIndex(index))?;
        if !record.repairable {
            return Err(AssetCheckError::NotRepairable(index));
        }

        let outcome = engine::repair(record);
        let repaired = if outcome.all_issues_repaired() {
            self.results.remove(index)
        } else {
            self.results[index].clone()
        };
        self.refresh();

        for observer in &self.observers {
            observer.asset_repaired(&repaired, outcome.all_issues_repaired());
        }
        Ok(outcome)
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.refresh();
    }

    pub fn set_type_filter(&mut self, types: ResultTypeMask) {
        self.filter.types = types;
        self.refresh();
    }

    /// Blank input selects every category.
    pub fn set_category_filter(&mut self, category: &str) {
        self.filter.category = CategoryFilter::parse(category);
        self.refresh();
    }

    pub fn set_icon_style(&mut self, icon_style: ResultIconStyle) {
        self.icon_style = icon_style;
        self.persist();
    }

    /// Snapshot of everything the session persists.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            settings_path: self.settings_path.clone(),
            profile: self.settings.profile.clone(),
            stats: self.stats,
            results: self.results.iter().map(StoredCheckResult::capture).collect(),
            type_filter: self.filter.types,
            category_filter: self.filter.category.clone(),
            icon_style: self.icon_style,
        }
    }

    fn refresh(&mut self) {
        self.stats = CheckResultStats::from_results(&self.results, self.null_result_count);
        self.filtered = self.filter.apply(&self.results);
        self.persist();
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        match store.save(&self.state()) {
            Ok(SaveOutcome::Saved | SaveOutcome::Skipped) => {}
            Err(e) => tracing::warn!(
                target: crate::LOG_TARGET,
                path = %store.path().display(),
                "Failed to save session state: {e}"
            ),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
