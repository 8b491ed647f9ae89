use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="container">
            <h2>{ "Home" }</h2>
            <p>
                <Link<Route> to={Route::Calendar}>{ "Calendar" }</Link<Route>>
                { " lists the events of your Google calendar." }
            </p>
            <p>
                <Link<Route> to={Route::Payment}>{ "Payments" }</Link<Route>>
                { " adds a bank account for payouts." }
            </p>
        </div>
    }
}
