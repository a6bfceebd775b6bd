//! Hard filter implementations.
//!
//! Each filter corresponds to one optional key of
//! [`HardFilters`](crate::HardFilters); present keys combine with logical
//! AND in the [`FilterPipeline`](crate::FilterPipeline).

mod exclude_types;
mod max_price;
mod min_rating;
mod open_now;
mod required_types;

pub use exclude_types::ExcludeTypesFilter;
pub use max_price::MaxPriceFilter;
pub use min_rating::MinRatingFilter;
pub use open_now::OpenNowFilter;
pub use required_types::RequiredTypesFilter;
