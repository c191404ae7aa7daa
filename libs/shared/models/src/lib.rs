pub mod auth;
pub mod clinic;
pub mod error;
pub mod slot;

pub use auth::{User, UserType};
pub use clinic::{Appointment, AppointmentStatus, Doctor, Specialty, BLOCKED_PATIENT_NAME};
pub use error::AppError;
pub use slot::{SlotError, TimeSlot, SLOT_CATALOG};
