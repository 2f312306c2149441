//! One adapter per input table shape.
//!
//! Each adapter turns raw rows into [`EntityRecord`](crate::model::EntityRecord)s
//! carrying the adapter's implicit tags and hands them to the
//! [`RecordStore`](crate::store::RecordStore) with its own merge policy.

pub mod felon_housing;
pub mod felon_jobs;
pub mod standard;
pub mod weather_shelter;

pub use felon_housing::{HOUSING_FELON_FRIENDLY_TABLE, add_felon_friendly_housing};
pub use felon_jobs::{JOBS_FELON_FRIENDLY_TABLE, add_felon_friendly_jobs};
pub use standard::{
    FALLBACK_TAG_FILES, MASTER_TABLE, TAG_FILES, TagMap, add_fallback_entries, build_tag_map,
    load_master,
};
pub use weather_shelter::{WEATHER_SHELTER_TABLE, add_weather_shelters};
