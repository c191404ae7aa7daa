use std::net::{IpAddr, Ipv4Addr};

use chrono::NaiveDate;

use shared_config::AppConfig;
use shared_models::auth::{User, UserType};

use crate::clock::FixedClock;

pub struct TestConfig {
    pub clinic_utc_offset_minutes: i32,
    pub seed_demo_appointment: bool,
    pub session_idle_minutes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            clinic_utc_offset_minutes: -180,
            seed_demo_appointment: true,
            session_idle_minutes: 30,
        }
    }
}

impl TestConfig {
    pub fn unseeded() -> Self {
        Self {
            seed_demo_appointment: false,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            clinic_utc_offset_minutes: self.clinic_utc_offset_minutes,
            seed_demo_appointment: self.seed_demo_appointment,
            session_idle_minutes: self.session_idle_minutes,
        }
    }
}

pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::patient("p1", "Ana Paciente")
    }
}

impl TestUser {
    pub fn new(id: &str, name: &str, user_type: UserType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@clinica.test", id),
            user_type,
        }
    }

    pub fn patient(id: &str, name: &str) -> Self {
        Self::new(id, name, UserType::Patient)
    }

    pub fn doctor(id: &str, name: &str) -> Self {
        Self::new(id, name, UserType::Doctor)
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            user_type: self.user_type,
        }
    }
}

pub struct TestDates;

impl TestDates {
    /// Day the demo appointment is booked on.
    pub fn seed_day() -> NaiveDate {
        Self::ymd(2025, 11, 15)
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    /// A clock stopped well before the seed day.
    pub fn early_clock() -> FixedClock {
        FixedClock::on(Self::ymd(2025, 11, 1))
    }
}
