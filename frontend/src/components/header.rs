use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <nav>
                    <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Calendar}>{ "Calendar" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Payment}>{ "Payments" }</Link<Route>>
                </nav>
                <hr />
            </div>
        </header>
    }
}
