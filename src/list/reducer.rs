use std::marker::PhantomData;

use crate::models::Entity;
use crate::mvi::Reducer;

use super::intent::ListIntent;
use super::state::{ListPhase, ListState};

/// Reducer for list state transitions.
pub struct ListReducer<T>(PhantomData<T>);

impl<T: Entity> Reducer for ListReducer<T> {
    type State = ListState<T>;
    type Intent = ListIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::Reset => ListState::default(),

            ListIntent::LoadStarted => {
                if !state.can_load_more() {
                    return state;
                }
                let phase = if state.items.is_empty() && state.next_page == 1 {
                    ListPhase::LoadingInitial
                } else {
                    ListPhase::LoadingMore
                };
                ListState {
                    phase,
                    last_error: None,
                    ..state
                }
            }

            ListIntent::PageLoaded(result) => {
                if !state.is_loading() {
                    return state;
                }
                let exhausted = result.is_last();
                let mut items = state.items;
                items.extend(result.page);
                ListState {
                    items,
                    next_page: result.current_page.saturating_add(1),
                    phase: if exhausted {
                        ListPhase::Exhausted
                    } else {
                        ListPhase::Ready
                    },
                    last_error: None,
                }
            }

            ListIntent::PageFailed { message } => {
                if !state.is_loading() {
                    return state;
                }
                ListState {
                    phase: ListPhase::Error,
                    last_error: Some(message),
                    ..state
                }
            }

            ListIntent::ItemReplaced(item) => {
                let mut state = state;
                if let Some(slot) = state.items.iter_mut().find(|i| i.id() == item.id()) {
                    *slot = item;
                }
                state
            }

            ListIntent::ItemPrepended(item) => {
                let mut state = state;
                state.items.insert(0, item);
                state
            }

            ListIntent::ItemRemoved(id) => {
                let mut state = state;
                if let Some(pos) = state.items.iter().position(|i| i.id() == id) {
                    state.items.remove(pos);
                }
                state
            }
        }
    }
}
