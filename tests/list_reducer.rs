mod common;

use common::room_json;
use hotel_admin::gateway::FetchResult;
use hotel_admin::list::{ListIntent, ListPhase, ListReducer, ListState};
use hotel_admin::models::Room;
use hotel_admin::mvi::Reducer;

type Rooms = ListReducer<Room>;

fn room(id: u64) -> Room {
    serde_json::from_value(room_json(id, &format!("Room {}", id))).unwrap()
}

fn page(ids: &[u64], current_page: u32, last_page: u32) -> FetchResult<Room> {
    FetchResult {
        page: ids.iter().map(|id| room(*id)).collect(),
        current_page,
        last_page,
    }
}

fn ids(state: &ListState<Room>) -> Vec<u64> {
    state.items.iter().map(|r| r.id).collect()
}

fn loaded(ids: &[u64]) -> ListState<Room> {
    let state = Rooms::reduce(ListState::default(), ListIntent::LoadStarted);
    Rooms::reduce(state, ListIntent::PageLoaded(page(ids, 1, 2)))
}

#[test]
fn load_started_from_idle_is_initial() {
    let state = Rooms::reduce(ListState::default(), ListIntent::LoadStarted);
    assert_eq!(state.phase, ListPhase::LoadingInitial);
    assert!(state.is_loading_initial());
}

#[test]
fn load_started_with_items_is_more() {
    let state = Rooms::reduce(loaded(&[1, 2]), ListIntent::LoadStarted);
    assert_eq!(state.phase, ListPhase::LoadingMore);
}

#[test]
fn load_started_while_loading_is_ignored() {
    let loading = Rooms::reduce(ListState::default(), ListIntent::LoadStarted);
    let again = Rooms::reduce(loading.clone(), ListIntent::LoadStarted);
    assert_eq!(again, loading);
}

#[test]
fn page_loaded_appends_and_advances() {
    let state = loaded(&[1, 2]);
    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(state.next_page, 2);
    assert_eq!(state.phase, ListPhase::Ready);

    let state = Rooms::reduce(state, ListIntent::LoadStarted);
    let state = Rooms::reduce(state, ListIntent::PageLoaded(page(&[3], 2, 2)));
    assert_eq!(ids(&state), vec![1, 2, 3]);
    assert_eq!(state.phase, ListPhase::Exhausted);
    assert_eq!(state.next_page, 3);
}

#[test]
fn duplicates_across_pages_are_kept() {
    let state = Rooms::reduce(loaded(&[1, 2]), ListIntent::LoadStarted);
    let state = Rooms::reduce(state, ListIntent::PageLoaded(page(&[2, 3], 2, 3)));
    assert_eq!(ids(&state), vec![1, 2, 2, 3]);
}

#[test]
fn stray_page_without_load_is_ignored() {
    let state = loaded(&[1]);
    let after = Rooms::reduce(state.clone(), ListIntent::PageLoaded(page(&[9], 2, 2)));
    assert_eq!(after, state);
}

#[test]
fn page_failed_keeps_items_and_page() {
    let state = Rooms::reduce(loaded(&[1, 2]), ListIntent::LoadStarted);
    let state = Rooms::reduce(
        state,
        ListIntent::PageFailed {
            message: "Server error".to_string(),
        },
    );
    assert_eq!(state.phase, ListPhase::Error);
    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(state.next_page, 2);
    assert_eq!(state.error_message(), Some("Server error"));
    assert!(state.can_load_more());
}

#[test]
fn exhausted_ignores_load_started() {
    let state = Rooms::reduce(ListState::default(), ListIntent::LoadStarted);
    let state = Rooms::reduce(state, ListIntent::PageLoaded(page(&[1], 1, 1)));
    assert!(state.is_exhausted());
    let after = Rooms::reduce(state.clone(), ListIntent::LoadStarted);
    assert_eq!(after, state);
}

#[test]
fn reset_from_any_phase_is_default() {
    for state in [
        loaded(&[1]),
        Rooms::reduce(loaded(&[1]), ListIntent::LoadStarted),
        ListState {
            phase: ListPhase::Exhausted,
            ..loaded(&[1, 2])
        },
    ] {
        assert_eq!(Rooms::reduce(state, ListIntent::Reset), ListState::default());
    }
}

#[test]
fn replace_swaps_matching_item_in_place() {
    let mut updated = room(2);
    updated.name = "Renamed".to_string();
    let state = Rooms::reduce(loaded(&[1, 2, 3]), ListIntent::ItemReplaced(updated));
    assert_eq!(ids(&state), vec![1, 2, 3]);
    assert_eq!(state.items[1].name, "Renamed");
}

#[test]
fn replace_of_unloaded_item_is_a_no_op() {
    let state = loaded(&[1, 2]);
    let after = Rooms::reduce(state.clone(), ListIntent::ItemReplaced(room(42)));
    assert_eq!(after, state);
}

#[test]
fn prepend_puts_item_first() {
    let state = Rooms::reduce(loaded(&[1, 2]), ListIntent::ItemPrepended(room(7)));
    assert_eq!(ids(&state), vec![7, 1, 2]);
}

#[test]
fn remove_drops_exactly_one_item() {
    let state = Rooms::reduce(loaded(&[1, 7, 3]), ListIntent::ItemRemoved(7));
    assert_eq!(ids(&state), vec![1, 3]);

    let unchanged = Rooms::reduce(state.clone(), ListIntent::ItemRemoved(99));
    assert_eq!(unchanged, state);
}
