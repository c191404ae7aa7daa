use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::{Duration, FixedOffset, Offset, Utc};
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
// America/Sao_Paulo, no DST
const DEFAULT_UTC_OFFSET_MINUTES: i32 = -180;
const DEFAULT_SESSION_IDLE_MINUTES: u32 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub clinic_utc_offset_minutes: i32,
    pub seed_demo_appointment: bool,
    pub session_idle_minutes: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            clinic_utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            seed_demo_appointment: true,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: parse_var("HOST").unwrap_or_else(|| {
                warn!("HOST not set or invalid, using {}", defaults.host);
                defaults.host
            }),
            port: parse_var("PORT").unwrap_or_else(|| {
                warn!("PORT not set or invalid, using {}", defaults.port);
                defaults.port
            }),
            clinic_utc_offset_minutes: parse_var("CLINIC_UTC_OFFSET_MINUTES")
                .filter(|minutes: &i32| offset_from_minutes(*minutes).is_some())
                .unwrap_or_else(|| {
                    warn!(
                        "CLINIC_UTC_OFFSET_MINUTES not set or invalid, using {}",
                        defaults.clinic_utc_offset_minutes
                    );
                    defaults.clinic_utc_offset_minutes
                }),
            seed_demo_appointment: parse_var("SEED_DEMO_APPOINTMENT").unwrap_or_else(|| {
                warn!("SEED_DEMO_APPOINTMENT not set or invalid, seeding enabled");
                defaults.seed_demo_appointment
            }),
            session_idle_minutes: parse_var("SESSION_IDLE_MINUTES")
                .filter(|minutes: &u32| *minutes > 0)
                .unwrap_or_else(|| {
                    warn!(
                        "SESSION_IDLE_MINUTES not set or invalid, using {}",
                        defaults.session_idle_minutes
                    );
                    defaults.session_idle_minutes
                }),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Offset used to decide which calendar day is "today" at the clinic.
    pub fn clinic_offset(&self) -> FixedOffset {
        offset_from_minutes(self.clinic_utc_offset_minutes).unwrap_or_else(|| Utc.fix())
    }

    /// How long a session may go without an intent before it is dropped.
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::minutes(i64::from(self.session_idle_minutes))
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
