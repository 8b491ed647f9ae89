use std::rc::Rc;

use shared::config::AppConfig;
use shared::form::{FieldName, FormSession, Submission, FIELDS};
use yew::prelude::*;

use crate::components::field_input::FieldInput;
use crate::services::api::RoutingNumberService;

/// Shows an accepted submission. Nothing is sent anywhere.
fn present_submission(submission: &Submission) {
    if let Err(e) = submission.to_details() {
        tracing::error!("Accepted submission failed payment checks: {}", e);
        return;
    }
    match submission.to_json() {
        Ok(json) => gloo::dialogs::alert(&json),
        Err(e) => tracing::error!("Failed to render submission: {}", e),
    }
}

#[function_component(Payment)]
pub fn payment() -> Html {
    let config = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let rerender = use_force_update();

    // Dropped with the component; validator runs still in flight then do nothing.
    let session = use_memo((), move |_| {
        let lookup = Rc::new(RoutingNumberService::new(config.routing_lookup_url.clone()));
        FormSession::new(lookup).with_listener(move || rerender.force_update())
    });

    let on_change = |name: FieldName| {
        let session = session.clone();
        Callback::from(move |value: String| session.change(name, value))
    };

    let on_blur = |name: FieldName| {
        let session = session.clone();
        Callback::from(move |_: ()| {
            let run = session.blur(name);
            wasm_bindgen_futures::spawn_local(async move {
                let resolution = run.await;
                tracing::debug!("{} validation finished: {:?}", name, resolution);
            });
        })
    };

    let onsubmit = {
        let session = session.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            session.submit(&present_submission);
        })
    };

    let submittable = session.is_submittable();

    html! {
        <div class="container payment">
            <form class="payment-form" novalidate={true} {onsubmit}>
                { for FIELDS.iter().map(|field| html! {
                    <FieldInput
                        key={field.name.as_str()}
                        name={field.name}
                        state={session.field(field.name)}
                        on_change={on_change(field.name)}
                        on_blur={on_blur(field.name)}
                    />
                }) }
                <button
                    type="submit"
                    class={classes!("btn", if submittable { "btn-primary" } else { "btn-disabled" })}
                    disabled={!submittable}
                >
                    { "Submit" }
                </button>
            </form>
        </div>
    }
}
