use chrono::{DateTime, TimeZone, Utc};

use crate::routing::DEFAULT_LOOKUP_URL;

/// Read-only scope needed to list events
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events.readonly";

/// Settings for the calendar page
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    pub client_id: String,
    pub api_key: String,
    pub scope: String,
    pub auth_url: String,
    pub events_url: String,
    /// Events updated before this instant are not listed
    pub events_since: DateTime<Utc>,
    pub poll_interval_ms: u32,
    pub max_poll_attempts: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            api_key: String::new(),
            scope: CALENDAR_SCOPE.to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            events_url: "https://www.googleapis.com/calendar/v3/calendars/primary/events"
                .to_string(),
            events_since: Utc
                .with_ymd_and_hms(2022, 2, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            poll_interval_ms: 3000,
            max_poll_attempts: 20,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub routing_lookup_url: String,
    pub calendar: CalendarConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            routing_lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads settings baked in at build time.
    ///
    /// The browser has no process environment, so `ROUTING_LOOKUP_URL`,
    /// `GOOGLE_CLIENT_ID` and `GOOGLE_API_KEY` are captured when the crate is
    /// compiled. Unset variables fall back to the defaults.
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("ROUTING_LOOKUP_URL"),
            option_env!("GOOGLE_CLIENT_ID"),
            option_env!("GOOGLE_API_KEY"),
        )
    }

    fn from_vars(
        routing_lookup_url: Option<&str>,
        client_id: Option<&str>,
        api_key: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            routing_lookup_url: routing_lookup_url
                .filter(|url| !url.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.routing_lookup_url),
            calendar: CalendarConfig {
                client_id: client_id.unwrap_or_default().to_string(),
                api_key: api_key.unwrap_or_default().to_string(),
                ..defaults.calendar
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.routing_lookup_url, DEFAULT_LOOKUP_URL);
        assert_eq!(config.calendar.poll_interval_ms, 3000);
        assert_eq!(config.calendar.max_poll_attempts, 20);
        assert_eq!(
            config.calendar.events_since.to_rfc3339(),
            "2022-02-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_vars_override_defaults() {
        let config = AppConfig::from_vars(
            Some("http://localhost:9000/rn.json"),
            Some("client-123"),
            None,
        );
        assert_eq!(config.routing_lookup_url, "http://localhost:9000/rn.json");
        assert_eq!(config.calendar.client_id, "client-123");
        assert_eq!(config.calendar.api_key, "");
        assert_eq!(config.calendar.scope, CALENDAR_SCOPE);
    }

    #[test]
    fn test_empty_lookup_url_falls_back() {
        let config = AppConfig::from_vars(Some(""), None, None);
        assert_eq!(config.routing_lookup_url, DEFAULT_LOOKUP_URL);
    }
}
