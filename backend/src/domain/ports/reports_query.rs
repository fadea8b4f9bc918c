//! Driving port for catalog reads.
//!
//! Inbound adapters request single catalog queries or whole views (the
//! dashboard, analytics, claims and listings pages). Store failures never
//! surface as `Err` here: they are folded into an error [`Notice`] on the
//! affected panel so the remaining panels still render.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    Cell, Error, Notice, PanelKind, QueryParams, ReportKind, ReportQuery, ReportTable,
};

/// Result of one catalog query, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// Catalog entry.
    pub query: ReportKind,
    /// Display title.
    pub title: &'static str,
    /// Expected rendering.
    pub panel: PanelKind,
    /// Rows; empty when the query failed.
    pub table: ReportTable,
    /// Headline value for metric panels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Cell>,
    /// Empty-state or failure notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl QueryOutcome {
    /// Wrap a successful result, attaching the empty-state notice when
    /// there are no rows.
    pub fn from_table(kind: ReportKind, table: ReportTable) -> Self {
        let metric = kind
            .metric_column()
            .and_then(|column| table.value(0, column).cloned());
        let notice = table.is_empty().then(|| kind.empty_notice());
        Self {
            query: kind,
            title: kind.title(),
            panel: kind.panel(),
            table,
            metric,
            notice,
        }
    }

    /// Empty result carrying `notice` instead of rows.
    pub fn with_notice(kind: ReportKind, notice: Notice) -> Self {
        Self {
            query: kind,
            title: kind.title(),
            panel: kind.panel(),
            table: ReportTable::empty(kind.columns()),
            metric: None,
            notice: Some(notice),
        }
    }

    /// Whether the query failed.
    pub fn is_error(&self) -> bool {
        self.notice
            .as_ref()
            .is_some_and(|notice| notice.level == crate::domain::NoticeLevel::Error)
    }
}

/// Named group of panels rendered together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    /// View name (`dashboard`, `analytics`, ...).
    pub view: &'static str,
    /// City selected for city-scoped panels, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_city: Option<String>,
    /// Panels in display order.
    pub panels: Vec<QueryOutcome>,
}

impl ReportView {
    /// Panel for `kind`, if the view contains it.
    pub fn panel(&self, kind: ReportKind) -> Option<&QueryOutcome> {
        self.panels.iter().find(|panel| panel.query == kind)
    }
}

/// Use-case port for catalog reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsQuery: Send + Sync {
    /// Run one bound query.
    async fn run(&self, query: ReportQuery) -> QueryOutcome;

    /// Bind `params` to `kind` and run it. The expiry reference date
    /// defaults to today.
    ///
    /// Fails with an invalid-request error when a required parameter is
    /// missing.
    async fn run_named(&self, kind: ReportKind, params: QueryParams)
    -> Result<QueryOutcome, Error>;

    /// Headline totals and quantity per city.
    async fn dashboard(&self) -> ReportView;

    /// Every analytical panel. `city` selects the provider contact list;
    /// the first provider city is used when absent.
    async fn analytics(&self, city: Option<String>) -> ReportView;

    /// Claims joined with food and receiver names.
    async fn claims(&self) -> ReportView;

    /// Listing locations and the listings, optionally for one location.
    async fn food_listings(&self, city: Option<String>) -> ReportView;
}
