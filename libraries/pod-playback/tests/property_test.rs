//! Property-based tests for the playback store
//!
//! Uses proptest to check the state invariants across random action
//! sequences.

use pod_playback::{
    Episode, IndexPolicy, PlaybackStore, PlayerAction, StoreConfig, StoreEvent,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Helpers =====

fn arbitrary_episode() -> impl Strategy<Value = Episode> {
    (
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z, ]{0,30}", // members
        0u64..7200,         // duration (up to two hours)
        "[a-z0-9]{1,10}",   // file stem
    )
        .prop_map(|(title, members, duration, stem)| Episode {
            title,
            members,
            thumbnail: format!("https://cdn.example.com/{}.jpg", stem),
            duration,
            url: format!("https://cdn.example.com/{}.mp3", stem),
        })
}

fn arbitrary_action() -> impl Strategy<Value = PlayerAction> {
    prop_oneof![
        arbitrary_episode().prop_map(|episode| PlayerAction::Play { episode }),
        (prop::collection::vec(arbitrary_episode(), 0..8), 0usize..10)
            .prop_map(|(episodes, index)| PlayerAction::PlayList { episodes, index }),
        Just(PlayerAction::PlayNext),
        Just(PlayerAction::PlayPrev),
        Just(PlayerAction::TogglePlay),
        any::<bool>().prop_map(|playing| PlayerAction::SetPlayingState { playing }),
        Just(PlayerAction::ToggleLooping),
        Just(PlayerAction::ToggleShuffle),
    ]
}

fn arbitrary_policy() -> impl Strategy<Value = IndexPolicy> {
    prop_oneof![Just(IndexPolicy::Reject), Just(IndexPolicy::Clamp)]
}

// ===== Property Tests =====

proptest! {
    /// Property: index is present iff the queue is non-empty, and in bounds
    #[test]
    fn index_always_in_bounds(
        policy in arbitrary_policy(),
        seed in any::<u64>(),
        actions in prop::collection::vec(arbitrary_action(), 1..60)
    ) {
        let mut store = PlaybackStore::new(StoreConfig {
            index_policy: policy,
            shuffle_seed: Some(seed),
            ..Default::default()
        });

        for action in actions {
            store.dispatch(action).ok();

            match store.current_index() {
                Some(index) => prop_assert!(index < store.queue_len()),
                None => prop_assert_eq!(store.queue_len(), 0),
            }
        }
    }

    /// Property: playing implies an episode is selected
    #[test]
    fn playing_implies_selection(
        actions in prop::collection::vec(arbitrary_action(), 1..60)
    ) {
        let mut store = PlaybackStore::default();

        for action in actions {
            store.dispatch(action).ok();
            if store.is_playing() {
                prop_assert!(store.current_episode().is_some());
            }
        }
    }

    /// Property: derived flags agree with the index
    #[test]
    fn derived_flags_match_index(
        actions in prop::collection::vec(arbitrary_action(), 1..60)
    ) {
        let mut store = PlaybackStore::default();

        for action in actions {
            store.dispatch(action).ok();
            let snapshot = store.snapshot();

            match snapshot.current_index {
                Some(index) => {
                    prop_assert_eq!(snapshot.has_previous, index > 0);
                    prop_assert_eq!(snapshot.has_next, index + 1 < snapshot.queue.len());
                }
                None => {
                    prop_assert!(!snapshot.has_previous);
                    prop_assert!(!snapshot.has_next);
                }
            }
        }
    }

    /// Property: a failed action changes nothing and emits nothing
    #[test]
    fn failed_action_is_atomic(
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut store = PlaybackStore::default();

        for action in actions {
            let before = store.snapshot();
            store.drain_events();

            if store.dispatch(action).is_err() {
                prop_assert_eq!(store.snapshot(), before);
                prop_assert!(store.drain_events().is_empty());
            }
        }
    }

    /// Property: subscribers see exactly the polled event stream
    #[test]
    fn subscribers_match_drained_events(
        actions in prop::collection::vec(arbitrary_action(), 1..40)
    ) {
        let mut store = PlaybackStore::default();
        let seen: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));

        for action in actions {
            store.dispatch(action).ok();
        }

        prop_assert_eq!(store.drain_events(), seen.borrow().clone());
    }

    /// Property: non-shuffled next never moves more than one step
    #[test]
    fn sequential_next_steps_by_one(
        episodes in prop::collection::vec(arbitrary_episode(), 1..20),
        start in 0usize..20,
        presses in 1usize..30
    ) {
        let mut store = PlaybackStore::new(StoreConfig {
            index_policy: IndexPolicy::Clamp,
            ..Default::default()
        });
        let len = episodes.len();
        store.play_list(episodes, start).unwrap();

        for _ in 0..presses {
            let before = store.current_index().unwrap();
            store.play_next();
            let after = store.current_index().unwrap();
            prop_assert_eq!(after, (before + 1).min(len - 1));
        }
    }
}
