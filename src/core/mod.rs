//! Core query mapping and result normalization.
//!
//! Everything here is pure: no I/O, no clock reads except in
//! [`ComplaintQuery::to_params`].

pub mod complaint;
pub mod query;
pub mod reference;

pub use complaint::{Complaint, Guidance, SearchOutcome, normalize};
pub use query::{
    CfpbParams, ComplaintQuery, FieldRestrict, ResponseFormat, SortOrder, map_query,
    parse_calendar_date,
};
pub use reference::{PRODUCT_CATEGORIES, RECOGNIZED_BANKS};
