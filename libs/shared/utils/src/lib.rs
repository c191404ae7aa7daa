pub mod clock;
pub mod dates;
pub mod ids;
pub mod test_utils;

pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
