use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{calendar::Calendar, home::Home, not_found::NotFound, payment::Payment};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/calendar")]
    Calendar,
    #[at("/payment")]
    Payment,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::Calendar => html! { <Calendar /> },
        Route::Payment => html! { <Payment /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
