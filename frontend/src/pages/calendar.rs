use std::rc::Rc;

use gloo::timers::callback::Interval;
use shared::calendar::{authorize_url, load_events, AuthState, CalendarEvent};
use shared::config::AppConfig;
use shared::error::CalendarError;
use yew::prelude::*;

use crate::services::api::CalendarService;
use crate::services::auth::TokenStore;

enum AuthAction {
    StartPolling,
    Tick { token_present: bool, max_attempts: u32 },
    SignOut,
}

#[derive(PartialEq)]
struct CalendarAuth(AuthState);

impl Reducible for CalendarAuth {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: AuthAction) -> Rc<Self> {
        let next = match action {
            AuthAction::StartPolling => self.0.start_polling(),
            AuthAction::Tick {
                token_present,
                max_attempts,
            } => self.0.tick(token_present, max_attempts),
            AuthAction::SignOut => self.0.sign_out(),
        };

        if next == self.0 {
            self
        } else {
            tracing::debug!("Calendar auth: {:?} -> {:?}", self.0, next);
            Rc::new(Self(next))
        }
    }
}

#[function_component(Calendar)]
pub fn calendar() -> Html {
    let config = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let auth = {
        let max_attempts = config.calendar.max_poll_attempts;
        use_reducer(move || {
            let polling = AuthState::default().start_polling();
            CalendarAuth(polling.tick(TokenStore::load().is_some(), max_attempts))
        })
    };
    let events = use_state(Vec::<CalendarEvent>::new);
    let loading = use_state(|| false);

    // Look for a token every few seconds while signing in; the interval is
    // cancelled as soon as polling stops or the page goes away.
    {
        let dispatcher = auth.dispatcher();
        let interval_ms = config.calendar.poll_interval_ms;
        let max_attempts = config.calendar.max_poll_attempts;

        use_effect_with(auth.0.is_polling(), move |polling| {
            let interval = polling.then(|| {
                Interval::new(interval_ms, move || {
                    dispatcher.dispatch(AuthAction::Tick {
                        token_present: TokenStore::load().is_some(),
                        max_attempts,
                    });
                })
            });
            move || drop(interval)
        });
    }

    // Fetch events once signed in
    {
        let events = events.clone();
        let loading = loading.clone();
        let dispatcher = auth.dispatcher();
        let calendar_config = config.calendar.clone();

        use_effect_with(auth.0.is_authenticated(), move |authenticated| {
            if *authenticated {
                match TokenStore::load() {
                    Some(token) => {
                        loading.set(true);
                        let since = calendar_config.events_since;
                        let service = CalendarService::new(calendar_config, token);
                        wasm_bindgen_futures::spawn_local(async move {
                            match load_events(&service, since).await {
                                Ok(items) => events.set(items),
                                Err(CalendarError::Status(401)) => {
                                    tracing::warn!("Calendar token rejected, signing out");
                                    TokenStore::clear();
                                    dispatcher.dispatch(AuthAction::SignOut);
                                }
                                Err(e) => {
                                    tracing::error!("Failed to fetch calendar events: {}", e);
                                }
                            }
                            loading.set(false);
                        });
                    }
                    None => dispatcher.dispatch(AuthAction::SignOut),
                }
            }
            || ()
        });
    }

    let on_sign_in = {
        let dispatcher = auth.dispatcher();
        let calendar_config = config.calendar.clone();
        Callback::from(move |_: MouseEvent| {
            let window = gloo::utils::window();
            let origin = match window.location().origin() {
                Ok(origin) => origin,
                Err(e) => {
                    tracing::error!("Failed to read page origin: {:?}", e);
                    return;
                }
            };
            let url = authorize_url(&calendar_config, &format!("{}/calendar", origin));
            if let Err(e) = window.open_with_url_and_target(&url, "google-sign-in") {
                tracing::error!("Failed to open sign-in window: {:?}", e);
            }
            dispatcher.dispatch(AuthAction::StartPolling);
        })
    };

    let on_sign_out = {
        let events = events.clone();
        let dispatcher = auth.dispatcher();
        Callback::from(move |_: MouseEvent| {
            events.set(Vec::new());
            TokenStore::clear();
            dispatcher.dispatch(AuthAction::SignOut);
        })
    };

    let last = events.len().saturating_sub(1);

    html! {
        <div class="container calendar">
            if auth.0.is_authenticated() {
                <button class="btn btn-sign-out" onclick={on_sign_out}>{ "Google Sign out" }</button>
            } else {
                <button class="btn btn-sign-in" onclick={on_sign_in}>{ "Google Sign in" }</button>
            }
            if *loading {
                <h3 class="loading">{ "Loading..." }</h3>
            }
            if !events.is_empty() {
                <div class="event-table">
                    <div class="event-row event-header">
                        <div class="col">{ "Summary" }</div>
                        <div class="col">{ "Updated" }</div>
                        <div class="col">{ "Organizer" }</div>
                        <div class="col col-wide">{ "Description" }</div>
                    </div>
                    { for events.iter().enumerate().map(|(i, event)| html! {
                        <div
                            key={event.id.clone()}
                            class={classes!(
                                "event-row",
                                if i % 2 == 1 { "odd" } else { "even" },
                                (i == last).then_some("last"),
                            )}
                        >
                            <div class="col"><p>{ &event.summary }</p></div>
                            <div class="col"><p>{ event.updated_label() }</p></div>
                            <div class="col"><p>{ event.organizer_label() }</p></div>
                            <div class="col col-wide"><p>{ &event.description }</p></div>
                        </div>
                    }) }
                </div>
            }
        </div>
    }
}
