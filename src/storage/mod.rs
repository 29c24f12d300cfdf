pub mod csv;
pub mod memory;
pub mod review;

pub use self::csv::load_reviews;
pub use memory::ReviewStore;
pub use review::{Review, ReviewFilter, TimestampError};
