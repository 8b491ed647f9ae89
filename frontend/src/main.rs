mod components;
mod pages;
mod router;
mod services;

use std::rc::Rc;

use shared::config::AppConfig;
use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::router::{switch, Route};

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());

    html! {
        <ContextProvider<Rc<AppConfig>> context={config}>
            <BrowserRouter>
                <div id="app">
                    <components::header::Header />
                    <yew_router::Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<Rc<AppConfig>>>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    // A sign-in popup stores its token and closes before rendering anything.
    services::auth::capture_redirect();

    yew::Renderer::<App>::new().render();
}
