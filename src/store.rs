use log::debug;
use uuid::Uuid;

use crate::library::{NewTrack, Track, TrackFilter, TrackPatch};

const FIRST_ORDER: u64 = 1;

const SAMPLE_TRACKS: [(&str, &str, &str); 3] = [
    ("Afterlife", "Avenged Sevenfold", "6:36"),
    ("Papercut", "Linkin Park", "3:04"),
    ("Flying", "Anathema", "7:03"),
];

/// In-memory playlist. Orders come from a counter that only moves forward,
/// so removed tracks never give their order back.
#[derive(Debug)]
pub struct TrackStore {
    tracks: Vec<Track>,
    next_order: u64,
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackStore {
    /// Store seeded with the sample playlist (orders 1 to 3).
    pub fn new() -> Self {
        let mut store = Self::empty();
        for (title, artist, duration) in SAMPLE_TRACKS {
            store.add(NewTrack::new(title, artist, Some(duration)));
        }
        store
    }

    pub fn empty() -> Self {
        Self {
            tracks: Vec::new(),
            next_order: FIRST_ORDER,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Pairs with [`TrackStore::len`]; only tests call it.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn list(&self, filter: &TrackFilter) -> Vec<Track> {
        let mut items: Vec<Track> = self
            .tracks
            .iter()
            .filter(|track| filter.matches(track))
            .cloned()
            .collect();
        items.sort_by_key(|track| track.order);
        items
    }

    pub fn get(&self, id: &str) -> Option<Track> {
        self.find(id).cloned()
    }

    /// Title and artist are expected to be validated by the caller.
    pub fn add(&mut self, new_track: NewTrack) -> Track {
        let track = Track {
            id: Uuid::new_v4().to_string(),
            title: new_track.title.unwrap_or_default(),
            artist: new_track.artist.unwrap_or_default(),
            duration: new_track.duration,
            order: self.next_order,
            is_played: false,
        };
        self.next_order += 1;

        debug!("Added track {} ({} - {})", track.id, track.artist, track.title);
        self.tracks.push(track.clone());
        track
    }

    pub fn update(&mut self, id: &str, patch: TrackPatch) -> Option<Track> {
        let track = self.find_mut(id)?;

        if let Some(title) = patch.title.filter(|v| !v.is_empty()) {
            track.title = title;
        }
        if let Some(artist) = patch.artist.filter(|v| !v.is_empty()) {
            track.artist = artist;
        }
        if let Some(duration) = patch.duration.filter(|v| !v.is_empty()) {
            track.duration = Some(duration);
        }
        // `false` is treated as absent; only toggling clears the flag.
        if patch.is_played == Some(true) {
            track.is_played = true;
        }

        debug!("Updated track {}", track.id);
        Some(track.clone())
    }

    pub fn tick_played(&mut self, id: &str) -> Option<Track> {
        let track = self.find_mut(id)?;
        track.is_played = !track.is_played;
        debug!("Track {} played = {}", track.id, track.is_played);
        Some(track.clone())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let len_before = self.tracks.len();
        self.tracks.retain(|track| track.id != id);
        let removed = len_before != self.tracks.len();
        if removed {
            debug!("Removed track {}", id);
        }
        removed
    }

    /// Drops every track and restarts the order counter. Administrative only:
    /// no HTTP route reaches it.
    #[allow(dead_code)]
    pub fn clear(&mut self) -> usize {
        let count = self.tracks.len();
        self.tracks.clear();
        self.next_order = FIRST_ORDER;
        count
    }

    fn find(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|track| track.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn new_store_is_seeded_in_order() {
        let store = TrackStore::new();
        let tracks = store.list(&TrackFilter::default());

        assert_eq!(titles(&tracks), vec!["Afterlife", "Papercut", "Flying"]);
        assert_eq!(tracks.iter().map(|t| t.order).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(tracks.iter().all(|t| !t.is_played));
        assert_eq!(tracks[1].duration.as_deref(), Some("3:04"));
    }

    #[test]
    fn add_assigns_increasing_orders_and_unique_ids() {
        let mut store = TrackStore::new();
        let a = store.add(NewTrack::new("X", "Y", None));
        let b = store.add(NewTrack::new("Z", "W", Some("1:00")));

        assert_eq!(a.order, 4);
        assert_eq!(b.order, 5);
        assert_ne!(a.id, b.id);
        assert!(!a.is_played);
        assert_eq!(a.duration, None);
    }

    #[test]
    fn get_returns_what_add_returned() {
        let mut store = TrackStore::new();
        let added = store.add(NewTrack::new("X", "Y", Some("2:30")));

        assert_eq!(store.get(&added.id), Some(added));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn orders_are_not_reused_after_remove() {
        let mut store = TrackStore::new();
        let a = store.add(NewTrack::new("X", "Y", None));
        assert!(store.remove(&a.id));

        let b = store.add(NewTrack::new("X", "Y", None));
        assert_eq!(b.order, a.order + 1);
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let mut store = TrackStore::new();
        let a = store.add(NewTrack::new("X", "Y", None));

        assert!(store.remove(&a.id));
        assert_eq!(store.get(&a.id), None);
        assert!(!store.remove(&a.id));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn tick_played_twice_restores_flag() {
        let mut store = TrackStore::new();
        let id = store.list(&TrackFilter::default())[0].id.clone();

        assert!(store.tick_played(&id).unwrap().is_played);
        assert!(!store.tick_played(&id).unwrap().is_played);
        assert_eq!(store.tick_played("missing"), None);
    }

    #[test]
    fn search_is_case_insensitive_on_title_and_artist() {
        let store = TrackStore::new();

        let by_artist = store.list(&TrackFilter {
            q: Some("link".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&by_artist), vec!["Papercut"]);

        let by_title = store.list(&TrackFilter {
            q: Some("FLY".to_string()),
            ..Default::default()
        });
        assert_eq!(titles(&by_title), vec!["Flying"]);

        let empty_query = store.list(&TrackFilter {
            q: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(empty_query.len(), 3);
    }

    #[test]
    fn played_filter_returns_subset_sorted_by_order() {
        let mut store = TrackStore::new();
        let ids: Vec<String> = store
            .list(&TrackFilter::default())
            .into_iter()
            .map(|t| t.id)
            .collect();
        store.tick_played(&ids[2]);
        store.tick_played(&ids[0]);

        let played = store.list(&TrackFilter {
            played: Some(true),
            ..Default::default()
        });
        assert_eq!(titles(&played), vec!["Afterlife", "Flying"]);

        let unplayed = store.list(&TrackFilter {
            played: Some(false),
            q: Some("paper".to_string()),
        });
        assert_eq!(titles(&unplayed), vec!["Papercut"]);
    }

    #[test]
    fn update_replaces_only_supplied_values() {
        let mut store = TrackStore::new();
        let track = store.add(NewTrack::new("X", "Y", Some("1:00")));

        let updated = store
            .update(
                &track.id,
                TrackPatch {
                    title: Some("New".to_string()),
                    artist: Some(String::new()),
                    duration: None,
                    is_played: Some(true),
                },
            )
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.artist, "Y");
        assert_eq!(updated.duration.as_deref(), Some("1:00"));
        assert!(updated.is_played);
        assert_eq!(updated.id, track.id);
        assert_eq!(updated.order, track.order);
    }

    #[test]
    fn update_cannot_clear_played_or_duration() {
        let mut store = TrackStore::new();
        let track = store.add(NewTrack::new("X", "Y", Some("1:00")));
        store.tick_played(&track.id);

        let updated = store
            .update(
                &track.id,
                TrackPatch {
                    duration: Some(String::new()),
                    is_played: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(updated.is_played);
        assert_eq!(updated.duration.as_deref(), Some("1:00"));
    }

    #[test]
    fn update_missing_track_is_none() {
        let mut store = TrackStore::new();
        assert_eq!(store.update("missing", TrackPatch::default()), None);
    }

    #[test]
    fn clear_empties_and_resets_counter() {
        let mut store = TrackStore::new();
        store.add(NewTrack::new("X", "Y", None));

        assert_eq!(store.clear(), 4);
        assert!(store.is_empty());
        assert_eq!(store.add(NewTrack::new("X", "Y", None)).order, 1);
    }
}
