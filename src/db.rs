//! # Local Music Library
//!
//! SQLite-backed stand-in for the music service. [`LibrarySource`] answers the
//! engine's [`TrackSource`] lookups from a local database and stores published
//! playlists as a [`PlaylistSink`].
//!
//! ## Schema
//!
//! ```text
//! tracks(id, title, album_id, duration_ms)     duration_ms NULL = unknown length
//! track_artists(track_id, artist_id, position)
//! album_genres(album_id, genre)
//! artist_genres(artist_id, genre)
//! top_tracks(term, rank, track_id)             term: short_term | medium_term
//! playlists(id, name, description, created_at)
//! playlist_tracks(playlist_id, position, track_id)
//! ```
//!
//! ## Importing
//!
//! The database is filled from a JSON description of the library
//! ([`LibraryFile`]):
//!
//! ```json
//! {
//!   "albums":  [{"id": "al1", "genres": ["jazz"]}],
//!   "artists": [{"id": "ar1", "genres": ["jazz", "bebop"]}],
//!   "tracks":  [{"id": "t1", "title": "So What", "album": "al1",
//!                "artists": ["ar1"], "duration_ms": 562000}],
//!   "top_tracks": {"short_term": ["t1"], "medium_term": []}
//! }
//! ```

use crate::source::{
    GenreRef, PlaylistSink, Seeds, Term, TopTracksPage, TrackRef, TrackSource,
    TOP_TRACKS_PAGE_SIZE,
};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS tracks (
        id          TEXT PRIMARY KEY,
        title       TEXT NOT NULL DEFAULT '',
        album_id    TEXT,
        duration_ms INTEGER
    );
    CREATE TABLE IF NOT EXISTS track_artists (
        track_id  TEXT NOT NULL,
        artist_id TEXT NOT NULL,
        position  INTEGER NOT NULL,
        PRIMARY KEY (track_id, artist_id)
    );
    CREATE TABLE IF NOT EXISTS album_genres (
        album_id TEXT NOT NULL,
        genre    TEXT NOT NULL,
        PRIMARY KEY (album_id, genre)
    );
    CREATE TABLE IF NOT EXISTS artist_genres (
        artist_id TEXT NOT NULL,
        genre     TEXT NOT NULL,
        PRIMARY KEY (artist_id, genre)
    );
    CREATE TABLE IF NOT EXISTS top_tracks (
        term     TEXT NOT NULL,
        rank     INTEGER NOT NULL,
        track_id TEXT NOT NULL,
        PRIMARY KEY (term, rank)
    );
    CREATE TABLE IF NOT EXISTS playlists (
        id          INTEGER PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT NOT NULL,
        created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE TABLE IF NOT EXISTS playlist_tracks (
        playlist_id INTEGER NOT NULL,
        position    INTEGER NOT NULL,
        track_id    TEXT NOT NULL,
        PRIMARY KEY (playlist_id, position),
        FOREIGN KEY (playlist_id) REFERENCES playlists(id)
    );
    CREATE INDEX IF NOT EXISTS idx_album_genres_genre ON album_genres(genre);
    CREATE INDEX IF NOT EXISTS idx_artist_genres_genre ON artist_genres(genre);
    CREATE INDEX IF NOT EXISTS idx_track_artists_artist ON track_artists(artist_id);
";

/// Genres attached to an album or artist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreEntry {
    pub id: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub album: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    pub duration_ms: Option<u64>,
}

/// User history, most-played first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopTracksEntry {
    #[serde(default)]
    pub short_term: Vec<String>,
    #[serde(default)]
    pub medium_term: Vec<String>,
}

/// JSON description of a library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub albums: Vec<GenreEntry>,
    #[serde(default)]
    pub artists: Vec<GenreEntry>,
    pub tracks: Vec<TrackEntry>,
    #[serde(default)]
    pub top_tracks: TopTracksEntry,
}

impl LibraryFile {
    /// Read and parse a library JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid library description.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read library file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid library file {}", path.display()))
    }
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub tracks: usize,
    pub albums: usize,
    pub artists: usize,
    pub top_tracks: usize,
}

/// Summary of a stored playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPlaylist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tracks: usize,
}

/// Local library database.
pub struct LibrarySource {
    conn: Connection,
    page_size: usize,
}

impl LibrarySource {
    /// Open (creating if needed) the library at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or the schema cannot be created.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open library database {}", path.display()))?;
        Self::with_connection(conn)
    }

    /// Fresh in-memory library.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .context("Failed to create library schema")?;
        Ok(Self {
            conn,
            page_size: TOP_TRACKS_PAGE_SIZE,
        })
    }

    /// Override the top-tracks page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Insert or replace everything described by `library` in one transaction.
    ///
    /// # Errors
    ///
    /// Fails on any SQL error; nothing is written in that case.
    pub fn import(&mut self, library: &LibraryFile) -> Result<ImportStats> {
        let tx = self.conn.transaction()?;

        {
            let mut album_stmt =
                tx.prepare("INSERT OR IGNORE INTO album_genres (album_id, genre) VALUES (?1, ?2)")?;
            for album in &library.albums {
                for genre in &album.genres {
                    album_stmt
                        .execute(params![album.id, genre])
                        .with_context(|| format!("Failed to insert genres of album {}", album.id))?;
                }
            }

            let mut artist_stmt =
                tx.prepare("INSERT OR IGNORE INTO artist_genres (artist_id, genre) VALUES (?1, ?2)")?;
            for artist in &library.artists {
                for genre in &artist.genres {
                    artist_stmt
                        .execute(params![artist.id, genre])
                        .with_context(|| format!("Failed to insert genres of artist {}", artist.id))?;
                }
            }

            let mut track_stmt = tx.prepare(
                "INSERT OR REPLACE INTO tracks (id, title, album_id, duration_ms) VALUES (?1, ?2, ?3, ?4)",
            )?;
            let mut credit_stmt = tx.prepare(
                "INSERT OR REPLACE INTO track_artists (track_id, artist_id, position) VALUES (?1, ?2, ?3)",
            )?;
            for track in &library.tracks {
                let duration_ms = track.duration_ms.map(i64::try_from).transpose()?;
                track_stmt
                    .execute(params![track.id, track.title, track.album, duration_ms])
                    .with_context(|| format!("Failed to insert track {}", track.id))?;
                for (position, artist) in track.artists.iter().enumerate() {
                    credit_stmt.execute(params![track.id, artist, position as i64])?;
                }
            }

            let mut top_stmt = tx.prepare(
                "INSERT OR REPLACE INTO top_tracks (term, rank, track_id) VALUES (?1, ?2, ?3)",
            )?;
            for (term, ids) in [
                (Term::ShortTerm, &library.top_tracks.short_term),
                (Term::MediumTerm, &library.top_tracks.medium_term),
            ] {
                for (rank, id) in ids.iter().enumerate() {
                    top_stmt.execute(params![term.as_str(), rank as i64, id])?;
                }
            }
        }

        tx.commit().context("Committing library import failed")?;

        let stats = ImportStats {
            tracks: library.tracks.len(),
            albums: library.albums.len(),
            artists: library.artists.len(),
            top_tracks: library.top_tracks.short_term.len() + library.top_tracks.medium_term.len(),
        };
        info!("Imported library: {stats:?}");
        Ok(stats)
    }

    /// Number of tracks per genre, most common first. A track counts once per
    /// genre whether the genre comes from its album or its artists.
    ///
    /// # Errors
    ///
    /// Fails on SQL errors.
    pub fn genre_counts(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            "SELECT genre, COUNT(DISTINCT track_id) FROM (
                 SELECT ag.genre AS genre, t.id AS track_id
                 FROM tracks t JOIN album_genres ag ON ag.album_id = t.album_id
                 UNION ALL
                 SELECT g.genre, ta.track_id
                 FROM track_artists ta JOIN artist_genres g ON g.artist_id = ta.artist_id
             )
             GROUP BY genre
             ORDER BY 2 DESC, genre",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (genre, count) = row.context("Failed to read genre count")?;
            counts.push((genre, usize::try_from(count).unwrap_or_default()));
        }
        Ok(counts)
    }

    /// Every stored playlist, oldest first.
    ///
    /// # Errors
    ///
    /// Fails on SQL errors.
    pub fn playlists(&self) -> Result<Vec<StoredPlaylist>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, p.description, COUNT(pt.track_id)
             FROM playlists p LEFT JOIN playlist_tracks pt ON pt.playlist_id = p.id
             GROUP BY p.id
             ORDER BY p.id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(StoredPlaylist {
                id: row.get::<_, i64>(0)?.to_string(),
                name: row.get(1)?,
                description: row.get(2)?,
                tracks: usize::try_from(row.get::<_, i64>(3)?).unwrap_or_default(),
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read playlists")
    }

    /// Track ids of a stored playlist, in order.
    ///
    /// # Errors
    ///
    /// Fails on SQL errors or a malformed playlist id.
    pub fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<String>> {
        let id = parse_playlist_id(playlist_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT track_id FROM playlist_tracks WHERE playlist_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map([id], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<Vec<String>>>()
            .context("Failed to read playlist tracks")
    }

    fn track_ref(&self, id: &str) -> Result<Option<TrackRef>> {
        let album: Option<Option<String>> = self
            .conn
            .query_row("SELECT album_id FROM tracks WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(album) = album else {
            return Ok(None);
        };

        Ok(Some(TrackRef {
            id: id.to_string(),
            album,
            artists: self.track_artists(id)?,
        }))
    }

    fn track_artists(&self, track_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT artist_id FROM track_artists WHERE track_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map([track_id], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    fn count_top_tracks(&self, term: Term) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM top_tracks tt JOIN tracks t ON t.id = tt.track_id WHERE tt.term = ?1",
            [term.as_str()],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

impl TrackSource for LibrarySource {
    fn top_tracks(&self, term: Term, offset: usize) -> Result<TopTracksPage> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT t.id, t.album_id FROM top_tracks tt
             JOIN tracks t ON t.id = tt.track_id
             WHERE tt.term = ?1
             ORDER BY tt.rank
             LIMIT ?2 OFFSET ?3",
        )?;

        let rows = stmt.query_map(
            params![term.as_str(), self.page_size as i64, offset as i64],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?)),
        )?;

        let mut items = Vec::new();
        for row in rows {
            let (id, album) = row.context("Failed to read top track")?;
            let artists = self.track_artists(&id)?;
            items.push(TrackRef { id, album, artists });
        }

        let has_next = offset + items.len() < self.count_top_tracks(term)?;
        debug!("{term} top tracks at {offset}: {} (more: {has_next})", items.len());
        Ok(TopTracksPage { items, has_next })
    }

    fn genres(&self, reference: GenreRef<'_>) -> Result<Vec<String>> {
        let (sql, id) = match reference {
            GenreRef::Album(id) => ("SELECT genre FROM album_genres WHERE album_id = ?1 ORDER BY genre", id),
            GenreRef::Artist(id) => ("SELECT genre FROM artist_genres WHERE artist_id = ?1 ORDER BY genre", id),
        };
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map([id], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    fn duration(&self, track_id: &str) -> Result<Option<u32>> {
        let duration_ms: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT duration_ms FROM tracks WHERE id = ?1",
                [track_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(duration_ms
            .flatten()
            .and_then(|ms| u32::try_from(ms / 100).ok()))
    }

    fn recommendations(&self, seeds: &Seeds, limit: usize) -> Result<Vec<TrackRef>> {
        let exclude: &[String] = match seeds {
            Seeds::Genre(_) => &[],
            Seeds::Tracks(ids) => ids.as_slice(),
        };
        let genres: BTreeSet<String> = match seeds {
            Seeds::Genre(genre) => BTreeSet::from([genre.clone()]),
            Seeds::Tracks(ids) => {
                let mut genres = BTreeSet::new();
                for id in ids {
                    if let Some(track) = self.track_ref(id)? {
                        genres.extend(self.track_genres(&track)?);
                    }
                }
                genres
            }
        };

        if genres.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let genre_params = (1..=genres.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let exclude_clause = if exclude.is_empty() {
            String::new()
        } else {
            let placeholders = (genres.len() + 1..=genres.len() + exclude.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("AND id NOT IN ({placeholders})")
        };

        let sql = format!(
            "SELECT id FROM tracks
             WHERE id IN (
                 SELECT t.id FROM tracks t
                 JOIN album_genres ag ON ag.album_id = t.album_id
                 WHERE ag.genre IN ({genre_params})
                 UNION
                 SELECT ta.track_id FROM track_artists ta
                 JOIN artist_genres g ON g.artist_id = ta.artist_id
                 WHERE g.genre IN ({genre_params})
             )
             {exclude_clause}
             ORDER BY RANDOM()
             LIMIT {limit}"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_from_iter(genres.iter().chain(exclude)), |row| {
                row.get::<_, String>(0)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tracks = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(track) = self.track_ref(&id)? {
                tracks.push(track);
            }
        }
        debug!("Recommended {} tracks for {seeds:?}", tracks.len());
        Ok(tracks)
    }
}

impl PlaylistSink for LibrarySource {
    fn create_playlist(&self, name: &str, description: &str) -> Result<String> {
        self.conn
            .execute(
                "INSERT INTO playlists (name, description) VALUES (?1, ?2)",
                params![name, description],
            )
            .with_context(|| format!("Failed to create playlist `{name}'"))?;
        Ok(self.conn.last_insert_rowid().to_string())
    }

    fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        let id = parse_playlist_id(playlist_id)?;
        let tx = self.conn.unchecked_transaction()?;

        let exists: Option<i64> = tx
            .query_row("SELECT id FROM playlists WHERE id = ?1", [id], |row| row.get(0))
            .optional()?;
        if exists.is_none() {
            bail!("Unknown playlist {playlist_id}");
        }

        let next: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_tracks WHERE playlist_id = ?1",
            [id],
            |row| row.get(0),
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO playlist_tracks (playlist_id, position, track_id) VALUES (?1, ?2, ?3)",
            )?;
            for (offset, track_id) in track_ids.iter().enumerate() {
                stmt.execute(params![id, next + offset as i64, track_id])?;
            }
        }

        tx.commit().context("Committing playlist tracks failed")?;
        Ok(())
    }
}

fn parse_playlist_id(playlist_id: &str) -> Result<i64> {
    playlist_id
        .parse()
        .with_context(|| format!("Malformed playlist id `{playlist_id}'"))
}

/// Create (or with `force`, recreate) the library at `db_path` from a JSON file.
///
/// # Errors
///
/// Fails if the database exists and `force` is not set, or on read/parse/SQL errors.
pub fn init_library(db_path: &Path, json_path: &Path, force: bool) -> Result<ImportStats> {
    if db_path.exists() {
        if !force {
            bail!(
                "Library database already exists at {}. Use --force to recreate it.",
                db_path.display()
            );
        }
        info!("Removing existing library at {}", db_path.display());
        fs::remove_file(db_path)
            .with_context(|| format!("Failed to remove {}", db_path.display()))?;
    }

    let library = LibraryFile::read(json_path)?;
    let mut source = LibrarySource::open(db_path)?;
    source.import(&library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> LibraryFile {
        let track = |id: &str, album: Option<&str>, artists: &[&str], duration_ms: Option<u64>| TrackEntry {
            id: id.to_string(),
            title: format!("Title {id}"),
            album: album.map(str::to_string),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            duration_ms,
        };

        LibraryFile {
            albums: vec![
                GenreEntry { id: "kind-of-blue".into(), genres: vec!["jazz".into()] },
                GenreEntry { id: "nevermind".into(), genres: vec!["grunge".into(), "rock".into()] },
            ],
            artists: vec![
                GenreEntry { id: "miles".into(), genres: vec!["jazz".into(), "bebop".into()] },
                GenreEntry { id: "nirvana".into(), genres: vec!["grunge".into()] },
            ],
            tracks: vec![
                track("so-what", Some("kind-of-blue"), &["miles"], Some(562_000)),
                track("blue-in-green", Some("kind-of-blue"), &["miles"], Some(337_000)),
                track("teen-spirit", Some("nevermind"), &["nirvana"], Some(301_000)),
                track("bootleg", None, &["miles"], None),
            ],
            top_tracks: TopTracksEntry {
                short_term: vec!["so-what".into(), "teen-spirit".into(), "bootleg".into()],
                medium_term: vec!["blue-in-green".into()],
            },
        }
    }

    fn library() -> LibrarySource {
        let mut source = LibrarySource::open_in_memory().unwrap();
        source.import(&sample_library()).unwrap();
        source
    }

    #[test]
    fn test_import_stats() {
        let mut source = LibrarySource::open_in_memory().unwrap();
        let stats = source.import(&sample_library()).unwrap();
        assert_eq!(
            stats,
            ImportStats { tracks: 4, albums: 2, artists: 2, top_tracks: 4 }
        );
    }

    #[test]
    fn test_top_tracks_paginate_in_rank_order() {
        let source = library().with_page_size(2);

        let first = source.top_tracks(Term::ShortTerm, 0).unwrap();
        let ids: Vec<&str> = first.items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["so-what", "teen-spirit"]);
        assert!(first.has_next);
        assert_eq!(first.items[0].artists, vec!["miles".to_string()]);

        let second = source.top_tracks(Term::ShortTerm, 2).unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].album, None);
        assert!(!second.has_next);
    }

    #[test]
    fn test_genres_and_duration_lookups() {
        let source = library();

        assert_eq!(source.genres(GenreRef::Album("nevermind")).unwrap(), vec!["grunge", "rock"]);
        assert_eq!(source.genres(GenreRef::Artist("miles")).unwrap(), vec!["bebop", "jazz"]);
        assert!(source.genres(GenreRef::Album("unknown")).unwrap().is_empty());

        assert_eq!(source.duration("so-what").unwrap(), Some(5_620));
        assert_eq!(source.duration("bootleg").unwrap(), None);
        assert_eq!(source.duration("missing").unwrap(), None);
    }

    #[test]
    fn test_recommendations_by_genre() {
        let source = library();
        let mut ids: Vec<String> = source
            .recommendations(&Seeds::Genre("jazz".into()), 10)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        ids.sort();

        // `bootleg` matches through its artist.
        assert_eq!(ids, vec!["blue-in-green", "bootleg", "so-what"]);
        assert_eq!(source.recommendations(&Seeds::Genre("jazz".into()), 1).unwrap().len(), 1);
        assert!(source.recommendations(&Seeds::Genre("polka".into()), 10).unwrap().is_empty());
    }

    #[test]
    fn test_recommendations_by_track_exclude_seeds() {
        let source = library();
        let tracks = source
            .recommendations(&Seeds::Tracks(vec!["so-what".into()]), 10)
            .unwrap();
        let mut ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();

        assert_eq!(ids, vec!["blue-in-green", "bootleg"]);
    }

    #[test]
    fn test_playlist_sink_appends_in_order() {
        let source = library();
        let id = source.create_playlist("mix", "two batches").unwrap();

        source.add_tracks(&id, &["so-what".into(), "teen-spirit".into()]).unwrap();
        source.add_tracks(&id, &["blue-in-green".into()]).unwrap();

        assert_eq!(
            source.playlist_tracks(&id).unwrap(),
            vec!["so-what", "teen-spirit", "blue-in-green"]
        );
        let stored = source.playlists().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "mix");
        assert_eq!(stored[0].tracks, 3);
    }

    #[test]
    fn test_add_tracks_to_unknown_playlist_fails() {
        let source = library();
        assert!(source.add_tracks("42", &["so-what".into()]).is_err());
        assert!(source.add_tracks("not-a-number", &[]).is_err());
    }

    #[test]
    fn test_genre_counts() {
        let counts = library().genre_counts().unwrap();
        // Ties are ordered by name.
        assert_eq!(counts[0], ("bebop".to_string(), 3));
        assert_eq!(counts[1], ("jazz".to_string(), 3));
        assert!(counts.contains(&("grunge".to_string(), 1)));
        assert!(counts.contains(&("bebop".to_string(), 3)));
    }
}
