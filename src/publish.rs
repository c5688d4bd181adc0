//! Push a finished selection to a [`PlaylistSink`].

use crate::playlist::PlaylistSelection;
use crate::source::{PlaylistSink, ADD_TRACKS_BATCH};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

/// What the sink created, with the request's genre and length echoed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedPlaylist {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub minutes: f64,
}

/// Default playlist name, e.g. `jazz (30 min)`.
#[must_use]
pub fn default_name(selection: &PlaylistSelection) -> String {
    format!("{} ({} min)", selection.genre, selection.minutes)
}

/// Create a playlist named `name` and fill it with the selection's tracks,
/// [`ADD_TRACKS_BATCH`] ids per call.
///
/// # Errors
///
/// Fails if the sink cannot create the playlist or add a batch.
pub fn publish(
    sink: &dyn PlaylistSink,
    selection: &PlaylistSelection,
    name: &str,
) -> Result<PublishedPlaylist> {
    let description = format!(
        "{} tracks of {}, {:.1} min",
        selection.track_ids.len(),
        selection.genre,
        selection.total_duration as f64 / 600.0
    );
    let id = sink
        .create_playlist(name, &description)
        .with_context(|| format!("Failed to create playlist `{name}'"))?;

    for (batch, ids) in selection.track_ids.chunks(ADD_TRACKS_BATCH).enumerate() {
        sink.add_tracks(&id, ids)
            .with_context(|| format!("Failed to add track batch {batch} to playlist {id}"))?;
    }

    info!("Published playlist {id} `{name}' with {} tracks", selection.track_ids.len());
    Ok(PublishedPlaylist {
        id,
        name: name.to_string(),
        genre: selection.genre.clone(),
        minutes: selection.window.minutes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::Stage;
    use crate::window::TargetWindow;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        created: RefCell<Vec<(String, String)>>,
        batches: RefCell<Vec<usize>>,
    }

    impl PlaylistSink for RecordingSink {
        fn create_playlist(&self, name: &str, description: &str) -> Result<String> {
            self.created
                .borrow_mut()
                .push((name.to_string(), description.to_string()));
            Ok("pl-1".to_string())
        }

        fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
            assert_eq!(playlist_id, "pl-1");
            self.batches.borrow_mut().push(track_ids.len());
            Ok(())
        }
    }

    fn selection(tracks: usize) -> PlaylistSelection {
        PlaylistSelection {
            genre: "jazz".to_string(),
            minutes: 30,
            window: TargetWindow::from_minutes(30, 150, 600).unwrap(),
            track_ids: (0..tracks).map(|i| format!("t{i}")).collect(),
            total_duration: 18_000,
            total_tier: 10,
            resolved_at: Stage::ShortTermOnly,
            rounds: 0,
            candidates: tracks,
        }
    }

    #[test]
    fn test_tracks_added_in_batches_of_one_hundred() {
        let sink = RecordingSink::default();
        let published = publish(&sink, &selection(250), "mix").unwrap();

        assert_eq!(*sink.batches.borrow(), vec![100, 100, 50]);
        assert_eq!(published.id, "pl-1");
        assert_eq!(published.genre, "jazz");
        assert!((published.minutes - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_description_and_default_name() {
        let sink = RecordingSink::default();
        let selection = selection(3);
        let name = default_name(&selection);
        publish(&sink, &selection, &name).unwrap();

        let created = sink.created.borrow();
        assert_eq!(created[0].0, "jazz (30 min)");
        assert_eq!(created[0].1, "3 tracks of jazz, 30.0 min");
    }
}
