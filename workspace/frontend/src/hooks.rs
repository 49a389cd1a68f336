use std::rc::Rc;

use common::{PanelState, PredictionError, PredictionResult, RequestToken};
use yew::prelude::*;

use crate::api_client::prediction::request_prediction;

/// Panel transitions dispatched from the UI
pub enum PanelAction {
    UpdateSymbol(String),
    Submit,
    Complete {
        token: RequestToken,
        outcome: Result<PredictionResult, PredictionError>,
    },
}

/// Reducer wrapper around [`PanelState`]
#[derive(Clone, PartialEq, Default)]
pub struct PanelStore(pub PanelState);

impl Reducible for PanelStore {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        let changed = match action {
            PanelAction::UpdateSymbol(text) => {
                state.update_symbol(&text);
                true
            }
            PanelAction::Submit => state.begin_submission().is_some(),
            PanelAction::Complete { token, outcome } => state.complete(token, outcome),
        };

        if changed {
            Rc::new(PanelStore(state))
        } else {
            self
        }
    }
}

pub struct UsePredictorHandle {
    pub state: PanelState,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
}

/// Owns the predictor panel state and runs the request for every accepted
/// submission.
#[hook]
pub fn use_predictor() -> UsePredictorHandle {
    let store = use_reducer(PanelStore::default);

    {
        let store = store.clone();
        let in_flight = store.0.in_flight().cloned();
        use_effect_with(in_flight, move |in_flight| {
            if let Some(submission) = in_flight.clone() {
                log::debug!(
                    "Dispatching prediction request #{} for {}",
                    submission.token.value(),
                    submission.request.symbol
                );
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = request_prediction(&submission.request).await;
                    store.dispatch(PanelAction::Complete {
                        token: submission.token,
                        outcome,
                    });
                });
            }
            || ()
        });
    }

    let on_input = {
        let store = store.clone();
        Callback::from(move |text: String| store.dispatch(PanelAction::UpdateSymbol(text)))
    };

    let on_submit = {
        let store = store.clone();
        Callback::from(move |_: ()| store.dispatch(PanelAction::Submit))
    };

    UsePredictorHandle {
        state: store.0.clone(),
        on_input,
        on_submit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(state: PanelState) -> Rc<PanelStore> {
        Rc::new(PanelStore(state))
    }

    fn result_for(symbol: &str) -> PredictionResult {
        PredictionResult {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_symbol_stores_uppercase() {
        let store = store_with(PanelState::new());
        let next = store.reduce(PanelAction::UpdateSymbol("tcs".into()));
        assert_eq!(next.0.symbol(), "TCS");
    }

    #[test]
    fn test_blank_submit_keeps_same_store() {
        let store = store_with(PanelState::new());
        let next = store.clone().reduce(PanelAction::Submit);

        assert!(Rc::ptr_eq(&store, &next));
        assert!(!next.0.is_loading());
    }

    #[test]
    fn test_submit_while_loading_keeps_same_store() {
        let mut state = PanelState::new();
        state.update_symbol("TCS");
        state.begin_submission().unwrap();
        let store = store_with(state);

        let next = store.clone().reduce(PanelAction::Submit);

        assert!(Rc::ptr_eq(&store, &next));
    }

    #[test]
    fn test_submit_starts_loading() {
        let mut state = PanelState::new();
        state.update_symbol("TCS");
        let store = store_with(state);

        let next = store.clone().reduce(PanelAction::Submit);

        assert!(!Rc::ptr_eq(&store, &next));
        assert!(next.0.is_loading());
        assert_eq!(next.0.in_flight().unwrap().request.symbol, "TCS");
    }

    #[test]
    fn test_stale_completion_keeps_same_store() {
        let mut state = PanelState::new();
        state.update_symbol("TCS");
        let first = state.begin_submission().unwrap();
        state.complete(first.token, Ok(result_for("TCS")));
        state.begin_submission().unwrap();
        let before = state.clone();
        let store = store_with(state);

        let next = store.clone().reduce(PanelAction::Complete {
            token: first.token,
            outcome: Ok(result_for("INFY")),
        });

        assert!(Rc::ptr_eq(&store, &next));
        assert_eq!(next.0, before);
    }

    #[test]
    fn test_current_completion_applies_outcome() {
        let mut state = PanelState::new();
        state.update_symbol("TCS");
        let submission = state.begin_submission().unwrap();
        let store = store_with(state);

        let next = store.reduce(PanelAction::Complete {
            token: submission.token,
            outcome: Err(PredictionError::Transport("offline".into())),
        });

        assert!(!next.0.is_loading());
        assert_eq!(next.0.error(), Some(common::FALLBACK_ERROR_MESSAGE));
    }
}
