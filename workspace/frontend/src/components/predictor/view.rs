use common::{PanelBody, PanelView};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::result::ResultPanel;
use crate::common::error::ErrorDisplay;
use crate::common::loading::{ButtonSpinner, Loading};
use crate::hooks::use_predictor;

#[function_component(PredictorPanel)]
pub fn predictor_panel() -> Html {
    let predictor = use_predictor();
    let view: PanelView = predictor.state.view();
    let loading = predictor.state.is_loading();

    let on_input = {
        let on_input = predictor.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let on_submit = {
        let on_submit = predictor.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let body = match &view.body {
        PanelBody::Empty if loading => html! {
            <Loading text={format!("Analyzing {}...", view.symbol)} />
        },
        PanelBody::Empty => html! {},
        PanelBody::Error(message) => html! {
            <ErrorDisplay message={message.clone()} on_retry={Some(predictor.on_submit.clone())} />
        },
        PanelBody::Result(result) => html! {
            <ResultPanel result={result.clone()} />
        },
    };

    html! {
        <div class="flex flex-col gap-6">
            <form class="join w-full" onsubmit={on_submit}>
                <input
                    type="text"
                    class="input input-bordered join-item w-full"
                    placeholder="Enter Stock Symbol (e.g., TCS, INFY, RELIANCE)"
                    value={view.symbol.clone()}
                    oninput={on_input}
                />
                <button
                    type="submit"
                    class="btn btn-primary join-item"
                    disabled={view.submit_disabled}
                >
                    if loading {
                        <ButtonSpinner />
                    }
                    {view.submit_label}
                </button>
            </form>
            {body}
        </div>
    }
}
