//! Calendar page model.
//!
//! Events come from the Google Calendar REST API using an OAuth access token
//! obtained through the implicit grant in a popup window. The page polls for
//! that token with [`AuthState`] and then lists events once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::error::CalendarError;

/// Organizer or creator of an event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPerson {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Start or end of an event
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: Option<DateTime<Utc>>,
    pub time_zone: Option<String>,
}

/// Subset of the calendar event resource shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub html_link: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub creator: EventPerson,
    #[serde(default)]
    pub organizer: EventPerson,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

impl CalendarEvent {
    /// Last update as a short date, e.g. "Tue Feb 01 2022"
    pub fn updated_label(&self) -> String {
        self.updated.format("%a %b %d %Y").to_string()
    }

    pub fn organizer_label(&self) -> String {
        format!(
            "{} ({})",
            self.organizer.email,
            self.organizer.display_name.as_deref().unwrap_or_default()
        )
    }
}

/// Envelope of an events list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

/// Order in which fetched events are displayed: the service's order, reversed.
pub fn display_order(mut items: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    items.reverse();
    items
}

/// Source of calendar events for the signed-in user
#[async_trait(?Send)]
pub trait EventSource {
    async fn list_events(&self, since: DateTime<Utc>) -> Result<Vec<CalendarEvent>, CalendarError>;
}

/// Fetches events updated since `since`, in display order.
pub async fn load_events(
    source: &dyn EventSource,
    since: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>, CalendarError> {
    let items = source.list_events(since).await?;
    tracing::debug!("Fetched {} calendar events", items.len());
    Ok(display_order(items))
}

/// Sign-in progress of the calendar page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    /// Waiting for a token; `attempts` ticks have found none so far
    Polling { attempts: u32 },
    Authenticated,
}

impl AuthState {
    pub fn start_polling(self) -> Self {
        match self {
            AuthState::Authenticated => self,
            _ => AuthState::Polling { attempts: 0 },
        }
    }

    /// Advances one poll tick. Gives up after `max_attempts` empty ticks.
    pub fn tick(self, token_present: bool, max_attempts: u32) -> Self {
        match self {
            AuthState::Polling { .. } if token_present => AuthState::Authenticated,
            AuthState::Polling { attempts } if attempts + 1 >= max_attempts => {
                tracing::debug!("No calendar token after {} polls", attempts + 1);
                AuthState::Unauthenticated
            }
            AuthState::Polling { attempts } => AuthState::Polling {
                attempts: attempts + 1,
            },
            other => other,
        }
    }

    pub fn sign_out(self) -> Self {
        AuthState::Unauthenticated
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, AuthState::Polling { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}

/// OAuth access token from the implicit grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
}

/// Authorization endpoint URL for the implicit grant.
pub fn authorize_url(config: &CalendarConfig, redirect_uri: &str) -> String {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("response_type", "token"),
        ("scope", config.scope.as_str()),
        ("include_granted_scopes", "true"),
    ];
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", config.auth_url, query)
}

/// Parses the `#access_token=...&token_type=...` fragment of the redirect.
pub fn parse_token_fragment(fragment: &str) -> Option<AccessToken> {
    let fragment = fragment.trim_start_matches('#');
    let mut access_token = None;
    let mut token_type = None;
    let mut expires_in = None;

    for pair in fragment.split('&') {
        let (key, value) = pair.split_once('=')?;
        match key {
            "access_token" => access_token = Some(value.to_string()),
            "token_type" => token_type = Some(value.to_string()),
            "expires_in" => expires_in = value.parse().ok(),
            _ => {}
        }
    }

    Some(AccessToken {
        access_token: access_token.filter(|t| !t.is_empty())?,
        token_type: token_type.unwrap_or_else(|| "Bearer".to_string()),
        expires_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EVENT_JSON: &str = r#"{
        "kind": "calendar#event",
        "id": "evt1",
        "status": "confirmed",
        "htmlLink": "https://www.google.com/calendar/event?eid=evt1",
        "updated": "2022-02-01T10:30:00.000Z",
        "summary": "Standup",
        "description": "Daily sync",
        "creator": {"email": "ada@example.com", "self": true},
        "organizer": {"email": "team@example.com", "displayName": "Team"},
        "start": {"dateTime": "2022-02-02T09:00:00Z", "timeZone": "UTC"},
        "end": {"dateTime": "2022-02-02T09:15:00Z", "timeZone": "UTC"},
        "sequence": 0
    }"#;

    fn event(id: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            status: "confirmed".to_string(),
            html_link: None,
            summary: id.to_string(),
            description: String::new(),
            location: None,
            updated: Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap(),
            creator: EventPerson::default(),
            organizer: EventPerson::default(),
            start: EventTime::default(),
            end: EventTime::default(),
        }
    }

    struct FixedSource(Vec<CalendarEvent>);

    #[async_trait(?Send)]
    impl EventSource for FixedSource {
        async fn list_events(
            &self,
            _since: DateTime<Utc>,
        ) -> Result<Vec<CalendarEvent>, CalendarError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_event_parses_and_labels() {
        let event: CalendarEvent = serde_json::from_str(EVENT_JSON).unwrap();
        assert_eq!(event.summary, "Standup");
        assert_eq!(event.updated_label(), "Tue Feb 01 2022");
        assert_eq!(event.organizer_label(), "team@example.com (Team)");
    }

    #[test]
    fn test_event_list_tolerates_missing_items() {
        let list: EventList = serde_json::from_str(r#"{"kind":"calendar#events"}"#).unwrap();
        assert!(list.items.is_empty());
    }

    #[tokio::test]
    async fn test_load_events_reverses_service_order() {
        let source = FixedSource(vec![event("a"), event("b"), event("c")]);
        let since = Utc.with_ymd_and_hms(2022, 2, 1, 0, 0, 0).unwrap();
        let events = load_events(&source, since).await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_polling_authenticates_when_token_appears() {
        let state = AuthState::default().start_polling();
        let state = state.tick(false, 20);
        assert_eq!(state, AuthState::Polling { attempts: 1 });
        assert_eq!(state.tick(true, 20), AuthState::Authenticated);
    }

    #[test]
    fn test_polling_gives_up_after_max_attempts() {
        let mut state = AuthState::default().start_polling();
        for _ in 0..19 {
            state = state.tick(false, 20);
            assert!(state.is_polling());
        }
        assert_eq!(state.tick(false, 20), AuthState::Unauthenticated);
    }

    #[test]
    fn test_ticks_outside_polling_change_nothing() {
        assert_eq!(
            AuthState::Unauthenticated.tick(true, 20),
            AuthState::Unauthenticated
        );
        assert_eq!(AuthState::Authenticated.tick(false, 20), AuthState::Authenticated);
        assert_eq!(AuthState::Authenticated.start_polling(), AuthState::Authenticated);
        assert_eq!(AuthState::Authenticated.sign_out(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_parse_token_fragment() {
        let token =
            parse_token_fragment("#access_token=ya29.abc&token_type=Bearer&expires_in=3599&scope=x")
                .unwrap();
        assert_eq!(token.access_token, "ya29.abc");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, Some(3599));

        assert_eq!(parse_token_fragment("#error=access_denied"), None);
        assert_eq!(parse_token_fragment(""), None);
    }

    #[test]
    fn test_authorize_url_encodes_params() {
        let config = CalendarConfig::default();
        let url = authorize_url(&config, "http://localhost:8080/calendar");
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?client_id="));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fcalendar"));
        assert!(url.contains("response_type=token"));
        assert!(url.contains(
            "scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar.events.readonly"
        ));
    }
}
