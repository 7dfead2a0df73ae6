// Model exports
pub mod domain;
pub mod snapshot;

pub use domain::{ContentMeta, CoordinateError, Event, NearbyRestaurant, Pairing, RecordError, Restaurant};
pub use snapshot::{ConfigDocument, MetaDocument, PublishedCollection, SearchParams};
