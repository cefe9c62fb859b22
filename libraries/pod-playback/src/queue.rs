//! Episode queue with a guaranteed selection
//!
//! A `Queue` always holds at least one episode and its cursor always points
//! at one of them. The store keeps an `Option<Queue>`, so "no episode" and
//! "index out of range" cannot be confused.

use crate::error::{PlaybackError, Result};
use crate::types::{Episode, IndexPolicy};

/// Non-empty, ordered episode list plus the current position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    episodes: Vec<Episode>,
    index: usize,
}

impl Queue {
    /// Queue holding a single episode
    pub fn single(episode: Episode) -> Self {
        Self {
            episodes: vec![episode],
            index: 0,
        }
    }

    /// Build a queue starting at `index`
    ///
    /// Empty lists are always rejected. An index past the end is rejected
    /// or clamped to the last episode depending on `policy`.
    pub fn new(episodes: Vec<Episode>, index: usize, policy: IndexPolicy) -> Result<Self> {
        if episodes.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        let len = episodes.len();
        let index = match policy {
            IndexPolicy::Reject if index >= len => {
                return Err(PlaybackError::IndexOutOfBounds { index, len });
            }
            IndexPolicy::Reject => index,
            IndexPolicy::Clamp => index.min(len - 1),
        };

        Ok(Self { episodes, index })
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Episode under the cursor
    pub fn current(&self) -> &Episode {
        &self.episodes[self.index]
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.episodes.len()
    }

    /// Step forward one episode
    ///
    /// Returns false at the last episode (no wrap).
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back one episode
    ///
    /// Returns false at the first episode.
    pub fn go_back(&mut self) -> bool {
        if self.has_previous() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an arbitrary position
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.episodes.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.episodes.len(),
            });
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str) -> Episode {
        Episode {
            title: title.to_string(),
            members: "Host".to_string(),
            thumbnail: format!("https://cdn.example.com/{}.jpg", title),
            duration: 600,
            url: format!("https://cdn.example.com/{}.mp3", title),
        }
    }

    fn three() -> Vec<Episode> {
        vec![episode("a"), episode("b"), episode("c")]
    }

    #[test]
    fn empty_list_is_rejected_under_both_policies() {
        assert_eq!(
            Queue::new(vec![], 0, IndexPolicy::Reject),
            Err(PlaybackError::QueueEmpty)
        );
        assert_eq!(
            Queue::new(vec![], 0, IndexPolicy::Clamp),
            Err(PlaybackError::QueueEmpty)
        );
    }

    #[test]
    fn reject_policy_refuses_out_of_range_index() {
        assert_eq!(
            Queue::new(three(), 3, IndexPolicy::Reject),
            Err(PlaybackError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn clamp_policy_lands_on_last_episode() {
        let queue = Queue::new(three(), 99, IndexPolicy::Clamp).unwrap();
        assert_eq!(queue.index(), 2);
        assert_eq!(queue.current().title, "c");
    }

    #[test]
    fn advance_stops_at_end() {
        let mut queue = Queue::new(three(), 1, IndexPolicy::Reject).unwrap();
        assert!(queue.advance());
        assert_eq!(queue.index(), 2);
        assert!(!queue.advance());
        assert_eq!(queue.index(), 2);
    }

    #[test]
    fn go_back_stops_at_start() {
        let mut queue = Queue::new(three(), 1, IndexPolicy::Reject).unwrap();
        assert!(queue.go_back());
        assert!(!queue.go_back());
        assert_eq!(queue.index(), 0);
    }

    #[test]
    fn single_episode_has_no_neighbours() {
        let queue = Queue::single(episode("solo"));
        assert!(!queue.has_next());
        assert!(!queue.has_previous());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn select_checks_bounds() {
        let mut queue = Queue::new(three(), 0, IndexPolicy::Reject).unwrap();
        assert!(queue.select(2).is_ok());
        assert_eq!(queue.current().title, "c");
        assert!(queue.select(3).is_err());
        assert_eq!(queue.index(), 2);
    }
}
