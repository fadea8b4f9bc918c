//! Domain primitives, ports and services.
//!
//! Purpose: model the food donation tables and the report catalog without
//! depending on transport or storage. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`ReportKind`] / [`ReportQuery`] / [`ReportTable`]: the query catalog.
//! - [`FoodListingDraft`] / [`NewFoodListing`]: listing inserts.
//! - [`SourceTable`] / [`TableBatch`]: bulk load inputs.
//! - [`ReportService`], [`FoodListingService`], [`BulkLoadService`].

pub mod bulk_load;
pub mod error;
pub mod food_listing;
pub mod food_listing_service;
pub mod ports;
pub mod report;
pub mod report_service;
pub mod trace_id;

pub use self::bulk_load::{
    BulkLoadReport, BulkLoadService, ClaimRecord, FoodListingRecord, ProviderRecord,
    ReceiverRecord, SourceTable, TableBatch, TableLoadOutcome, TableLoadStatus,
};
pub use self::error::{Error, ErrorCode};
pub use self::food_listing::{
    FoodId, FoodListingDraft, FoodListingValidationError, FoodType, MealType, NewFoodListing,
};
pub use self::food_listing_service::FoodListingService;
pub use self::report::{
    Cell, MissingQueryParameter, Notice, NoticeLevel, PanelKind, QueryParams, ReportKind,
    ReportQuery, ReportTable,
};
pub use self::report_service::ReportService;
pub use self::trace_id::TraceId;
