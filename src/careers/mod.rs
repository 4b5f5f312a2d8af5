//! Static career reference data, keyed by pathway.

mod catalog;

pub use catalog::{CareerCatalog, CareerRecord, FULL_PAGE, SHORT_PAGE};
