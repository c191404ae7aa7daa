pub mod availability;
pub mod consistency;
pub mod ledger;
pub mod schedule;

pub use availability::{
    day_availability, ensure_bookable, ensure_free, is_available, is_bookable_date,
    slot_availability,
};
pub use consistency::find_double_bookings;
pub use ledger::{new_block, new_booking, AppointmentLedger};
pub use schedule::{doctor_schedule, schedule_summary};
