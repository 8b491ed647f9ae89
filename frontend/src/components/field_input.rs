use shared::form::{descriptor, FieldName, FieldState};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldInputProps {
    pub name: FieldName,
    pub state: FieldState,
    pub on_change: Callback<String>,
    pub on_blur: Callback<()>,
}

/// One labelled payment form input with its error and info lines.
#[function_component(FieldInput)]
pub fn field_input(props: &FieldInputProps) -> Html {
    let field = descriptor(props.name);
    let id = field.name.as_str();

    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    let onblur = {
        let on_blur = props.on_blur.clone();
        Callback::from(move |_: FocusEvent| on_blur.emit(()))
    };

    html! {
        <div class="form-field">
            <label for={id}>{ field.label }</label>
            <input
                id={id}
                name={id}
                type={field.kind.input_type()}
                value={props.state.value.clone()}
                {oninput}
                {onblur}
            />
            if props.state.is_invalid {
                <p class="field-error">{ field.error_message }</p>
            }
            <p class="field-info">{ &props.state.info }</p>
        </div>
    }
}
