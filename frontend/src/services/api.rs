use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gloo_net::http::Request;
use shared::calendar::{AccessToken, CalendarEvent, EventList, EventSource};
use shared::config::CalendarConfig;
use shared::error::{CalendarError, LookupError};
use shared::routing::{LookupResponse, RoutingLookup};

/// Routing-number lookup over HTTP
pub struct RoutingNumberService {
    url: String,
}

impl RoutingNumberService {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait(?Send)]
impl RoutingLookup for RoutingNumberService {
    async fn lookup(&self, routing_number: &str) -> Result<LookupResponse, LookupError> {
        let response = Request::get(&self.url)
            .query([("rn", routing_number)])
            .send()
            .await
            .map_err(|e| LookupError::Transport(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(LookupError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("{:?}", e)))
    }
}

/// Lists events from the signed-in user's primary calendar
pub struct CalendarService {
    config: CalendarConfig,
    token: AccessToken,
}

impl CalendarService {
    pub fn new(config: CalendarConfig, token: AccessToken) -> Self {
        Self { config, token }
    }
}

#[async_trait(?Send)]
impl EventSource for CalendarService {
    async fn list_events(&self, since: DateTime<Utc>) -> Result<Vec<CalendarEvent>, CalendarError> {
        let time_min = since.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut params = vec![("timeMin", time_min.as_str())];
        if !self.config.api_key.is_empty() {
            params.push(("key", self.config.api_key.as_str()));
        }
        let authorization = format!("{} {}", self.token.token_type, self.token.access_token);

        let response = Request::get(&self.config.events_url)
            .query(params)
            .header("Authorization", &authorization)
            .send()
            .await
            .map_err(|e| CalendarError::Transport(format!("{:?}", e)))?;

        if !response.ok() {
            return Err(CalendarError::Status(response.status()));
        }

        let list: EventList = response
            .json()
            .await
            .map_err(|e| CalendarError::Parse(format!("{:?}", e)))?;
        Ok(list.items)
    }
}
