//! Compare dialog state machine.
//!
//! Drives the "add comparison" picker: free-text input with a debounced token
//! lookup, a result dropdown, and the add action's loading/error states. The
//! host feeds it input events with a timestamp and renders from its getters;
//! no timers run inside.

use std::time::{Duration, Instant};

use crate::domain::token::{TokenSearch, TokenSummary};
use crate::error::{ChartError, CompareError};

/// Quiet period after the last keystroke before a lookup is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest query that triggers a lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// What the dropdown under the input shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownStatus {
    Hidden,
    Searching,
    TypeMore,
    NoResults,
    Results,
}

impl DropdownStatus {
    /// Placeholder text for non-list states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            DropdownStatus::Searching => Some("Searching…"),
            DropdownStatus::TypeMore => Some("Type at least 2 characters"),
            DropdownStatus::NoResults => Some("No tokens found"),
            DropdownStatus::Hidden | DropdownStatus::Results => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompareDialog {
    open: bool,
    input: String,
    input_changed_at: Option<Instant>,
    debounced: String,
    /// Query the current `results` belong to.
    results_for: Option<String>,
    results: Vec<TokenSummary>,
    in_flight: Option<String>,
    selected: Option<TokenSummary>,
    dropdown_open: bool,
    loading: bool,
    error: Option<String>,
}

impl CompareDialog {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Visibility ───────────────────────────────────────────────────────

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.dropdown_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Input focused.
    pub fn focus(&mut self) {
        self.dropdown_open = true;
    }

    /// Click outside the dropdown.
    pub fn dismiss_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// User edited the input. Drops any selection and clears the error.
    pub fn set_input(&mut self, input: impl Into<String>, now: Instant) {
        self.input = input.into();
        self.input_changed_at = Some(now);
        self.selected = None;
        self.dropdown_open = true;
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Query after the debounce period, as of `now`.
    pub fn debounced_query(&mut self, now: Instant) -> &str {
        self.settle(now);
        &self.debounced
    }

    fn settle(&mut self, now: Instant) {
        if let Some(changed_at) = self.input_changed_at {
            if now.saturating_duration_since(changed_at) >= SEARCH_DEBOUNCE {
                self.debounced = self.input.clone();
                self.input_changed_at = None;
            }
        }
    }

    fn query_is_searchable(query: &str) -> bool {
        query.chars().count() >= MIN_QUERY_CHARS
    }

    // ── Lookup ───────────────────────────────────────────────────────────

    /// Query that should be looked up now, if any, and mark it in flight.
    pub fn begin_search(&mut self, now: Instant) -> Option<String> {
        self.settle(now);
        let query = &self.debounced;
        if !Self::query_is_searchable(query)
            || self.results_for.as_deref() == Some(query.as_str())
            || self.in_flight.as_deref() == Some(query.as_str())
        {
            return None;
        }
        self.in_flight = Some(query.clone());
        Some(query.clone())
    }

    /// Store lookup results. Results for a query the user has since moved
    /// away from are dropped.
    pub fn finish_search(&mut self, query: &str, result: Result<Vec<TokenSummary>, ChartError>) {
        if self.in_flight.as_deref() == Some(query) {
            self.in_flight = None;
        }
        if query != self.debounced {
            tracing::debug!(query, "dropping stale token search results");
            return;
        }
        match result {
            Ok(tokens) => self.results = tokens,
            Err(e) => {
                tracing::warn!(query, error = %e, "token search failed");
                self.results.clear();
            }
        }
        self.results_for = Some(query.to_string());
    }

    /// Run the pending lookup, if one is due. Returns whether a lookup ran.
    pub async fn search<S: TokenSearch>(&mut self, source: &S, now: Instant) -> bool {
        let Some(query) = self.begin_search(now) else {
            return false;
        };
        let result = source.search_tokens(&query).await;
        self.finish_search(&query, result);
        true
    }

    /// Results for the current debounced query.
    pub fn results(&self) -> &[TokenSummary] {
        if self.results_for.as_deref() == Some(self.debounced.as_str()) {
            &self.results
        } else {
            &[]
        }
    }

    pub fn dropdown_status(&self) -> DropdownStatus {
        let searchable = Self::query_is_searchable(&self.debounced);
        let fetched = self.results_for.as_deref() == Some(self.debounced.as_str());
        let searching = self.in_flight.is_some() || (searchable && !fetched);
        let results = self.results();

        if !self.dropdown_open || !(searching || !results.is_empty() || searchable) {
            return DropdownStatus::Hidden;
        }
        if searching {
            DropdownStatus::Searching
        } else if results.is_empty() {
            if searchable {
                DropdownStatus::NoResults
            } else {
                DropdownStatus::TypeMore
            }
        } else {
            DropdownStatus::Results
        }
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Pick the `index`-th visible result. The input shows its name.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<&TokenSummary> {
        let token = self.results().get(index)?.clone();
        self.input = token.name.clone();
        self.input_changed_at = Some(now);
        self.dropdown_open = false;
        self.error = None;
        self.selected = Some(token);
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&TokenSummary> {
        self.selected.as_ref()
    }

    /// Address to add: the selection's, else the trimmed free-text input.
    pub fn address(&self) -> Result<String, CompareError> {
        let address = match &self.selected {
            Some(token) => token.address.clone(),
            None => self.input.trim().to_string(),
        };
        if address.is_empty() {
            return Err(CompareError::NoSelection);
        }
        Ok(address)
    }

    // ── Submit ───────────────────────────────────────────────────────────

    /// Start the add action. On a missing address the error is shown and
    /// returned.
    pub fn begin_submit(&mut self) -> Result<String, CompareError> {
        match self.address() {
            Ok(address) => {
                self.error = None;
                self.loading = true;
                Ok(address)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Finish the add action: reset and close on success, show the error
    /// otherwise.
    pub fn finish_submit<T>(&mut self, result: &Result<T, CompareError>) {
        self.loading = false;
        match result {
            Ok(_) => {
                self.input.clear();
                self.input_changed_at = None;
                self.debounced.clear();
                self.selected = None;
                self.close();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn add_button_label(&self) -> &'static str {
        if self.loading {
            "Adding…"
        } else {
            "Add"
        }
    }
}
