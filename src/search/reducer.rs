use crate::mvi::Reducer;

use super::intent::SearchIntent;
use super::state::{SearchPhase, SearchState};

pub struct SearchReducer;

fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::TermChanged(term) if is_blank(&term) => SearchState {
                term,
                results: Vec::new(),
                phase: SearchPhase::Idle,
                error: None,
                ..state
            },
            SearchIntent::TermChanged(term) => SearchState {
                term,
                phase: SearchPhase::Loading,
                error: None,
                ..state
            },
            SearchIntent::Settled(term) => {
                // A timer for an older term can race a newer keystroke.
                if term != state.term || is_blank(&term) {
                    return state;
                }
                let mut request_count = state.request_count;
                request_count.bump();
                SearchState {
                    request_count,
                    ..state
                }
            }
            SearchIntent::ResultsArrived(results) => SearchState {
                results,
                phase: SearchPhase::Results,
                error: None,
                ..state
            },
            SearchIntent::QueryFailed(message) => SearchState {
                results: Vec::new(),
                phase: SearchPhase::Results,
                error: Some(message),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Author, Post};

    fn post(id: &str) -> Post {
        Post {
            id: id.into(),
            title: format!("post {id}"),
            body: String::new(),
            created_date: String::new(),
            author: Author {
                username: "alice".into(),
                avatar_url: String::new(),
            },
        }
    }

    #[test]
    fn typing_enters_loading() {
        let state = SearchReducer::reduce(
            SearchState::default(),
            SearchIntent::TermChanged("ca".into()),
        );
        assert_eq!(state.phase, SearchPhase::Loading);
        assert_eq!(state.term, "ca");
        assert_eq!(state.request_count.get(), 0);
    }

    #[test]
    fn blank_term_goes_idle_and_clears_results() {
        let state = SearchState {
            term: "cat".into(),
            results: vec![post("1")],
            phase: SearchPhase::Results,
            ..Default::default()
        };
        let state = SearchReducer::reduce(state, SearchIntent::TermChanged("   ".into()));
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.results.is_empty());
    }

    #[test]
    fn settle_bumps_only_for_current_term() {
        let state = SearchReducer::reduce(
            SearchState::default(),
            SearchIntent::TermChanged("cat".into()),
        );
        let stale = SearchReducer::reduce(state.clone(), SearchIntent::Settled("ca".into()));
        assert_eq!(stale.request_count.get(), 0);

        let settled = SearchReducer::reduce(state, SearchIntent::Settled("cat".into()));
        assert_eq!(settled.request_count.get(), 1);
        assert_eq!(settled.phase, SearchPhase::Loading);
    }

    #[test]
    fn failure_sets_error_and_clears_results() {
        let state = SearchState {
            term: "cat".into(),
            results: vec![post("1")],
            phase: SearchPhase::Loading,
            ..Default::default()
        };
        let state = SearchReducer::reduce(state, SearchIntent::QueryFailed("boom".into()));
        assert_eq!(state.phase, SearchPhase::Results);
        assert!(state.results.is_empty());
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn results_replace_previous() {
        let state = SearchState {
            term: "cat".into(),
            results: vec![post("1")],
            phase: SearchPhase::Loading,
            error: Some("old".into()),
            ..Default::default()
        };
        let state = SearchReducer::reduce(state, SearchIntent::ResultsArrived(vec![post("2")]));
        assert_eq!(state.results, vec![post("2")]);
        assert_eq!(state.error, None);
    }
}
