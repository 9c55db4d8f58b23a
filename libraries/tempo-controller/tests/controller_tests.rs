//! End-to-end controller scenarios
//!
//! Each test drives the controller through `handle` only and inspects the
//! returned effects and view models, the way a host would.

use tempo_controller::{
    Controller, ControllerConfig, Effect, InputField, Key, NetworkRequest, PlayIcon, RenderTarget,
    SelectedFile, UiEvent, View, ViewModel,
};
use tempo_core::{PlaylistId, Track, TrackId};
use tempo_playback::{MediaCommand, PlaybackState};
use tempo_storage::{KeyValueStore, MemoryKeyValueStore, PLAYLISTS_KEY};

fn track(id: u64, title: &str) -> Track {
    Track::new(TrackId::new(id), title, format!("{}.mp3", title.to_lowercase()))
        .with_artist("Band")
}

fn catalog() -> Vec<Track> {
    vec![track(1, "Alpha"), track(2, "Beta"), track(3, "Gamma")]
}

fn loaded() -> Controller<MemoryKeyValueStore> {
    let mut controller =
        Controller::new(ControllerConfig::default(), MemoryKeyValueStore::new()).unwrap();
    controller.start();
    controller.handle(UiEvent::CatalogLoaded { tracks: catalog() });
    controller
}

fn media(effects: &[Effect]) -> Vec<MediaCommand> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Media { command } => Some(command.clone()),
            _ => None,
        })
        .collect()
}

fn notifications(effects: &[Effect]) -> Vec<(bool, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Notify { notification } => {
                Some((notification.is_error(), notification.message.clone()))
            }
            _ => None,
        })
        .collect()
}

fn renders(effects: &[Effect]) -> Vec<RenderTarget> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Render { target } => Some(*target),
            _ => None,
        })
        .collect()
}

fn audio(name: &str) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        mime_type: "audio/mpeg".to_string(),
        location: format!("/tmp/{}", name),
    }
}

fn queue_ids(controller: &Controller<MemoryKeyValueStore>) -> Vec<u64> {
    controller
        .queue_items()
        .iter()
        .map(|q| q.track_id.get())
        .collect()
}

fn first_playlist(controller: &Controller<MemoryKeyValueStore>) -> PlaylistId {
    controller.playlists().list()[0].id
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_catalog_failure_uses_samples() {
    let mut controller =
        Controller::new(ControllerConfig::default(), MemoryKeyValueStore::new()).unwrap();
    controller.start();

    let effects = controller.handle(UiEvent::CatalogFailed {
        message: "connection refused".to_string(),
    });

    let grid = controller.grid_items();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[0].title, "Sample Song 1");
    assert_eq!(grid[1].artist, "Sample Artist");
    assert_eq!(queue_ids(&controller), vec![1, 2]);
    assert!(renders(&effects).contains(&RenderTarget::Grid));
    assert!(notifications(&effects).is_empty());
}

#[test]
fn test_search_filters_grid_only() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::Search {
        query: "BET".to_string(),
    });

    assert_eq!(renders(&effects), vec![RenderTarget::Grid]);
    assert_eq!(controller.grid_items().len(), 1);
    assert_eq!(queue_ids(&controller), vec![1, 2, 3]);
}

// =============================================================================
// Playback
// =============================================================================

#[test]
fn test_play_track_loads_resource() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(2),
    });

    assert_eq!(
        media(&effects),
        vec![
            MediaCommand::Load {
                url: "/static/music/beta.mp3".to_string()
            },
            MediaCommand::Play,
        ]
    );
    let targets = renders(&effects);
    assert!(targets.contains(&RenderTarget::NowPlaying));
    assert!(targets.contains(&RenderTarget::PlayerBar));
    assert_eq!(controller.now_playing().unwrap().title, "Beta");
    assert!(controller.queue_items()[1].is_current);
}

#[test]
fn test_play_confirmation_flips_icon() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });
    assert_eq!(controller.player_bar().play_icon, PlayIcon::Play);

    controller.handle(UiEvent::PlayStarted);
    assert_eq!(controller.player_bar().play_icon, PlayIcon::Pause);
    assert!(controller.grid_items()[0].is_playing);
}

#[test]
fn test_rejected_play_stays_paused_without_notification() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });

    let effects = controller.handle(UiEvent::PlayRejected {
        reason: "autoplay blocked".to_string(),
    });

    assert_eq!(controller.playback().get_state(), PlaybackState::Paused);
    assert!(media(&effects).is_empty());
    assert!(notifications(&effects).is_empty());
}

#[test]
fn test_progress_after_metadata() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });
    controller.handle(UiEvent::MetadataLoaded {
        duration_secs: 200.0,
    });
    controller.handle(UiEvent::TimeUpdate {
        position_secs: 50.0,
    });

    let bar = controller.player_bar();
    assert_eq!(bar.progress_percent, 25.0);
    assert_eq!(bar.current_time, "0:50");
    assert_eq!(bar.total_time, "3:20");

    let effects = controller.handle(UiEvent::Seek { percent: 50.0 });
    assert_eq!(
        media(&effects),
        vec![MediaCommand::Seek {
            position: std::time::Duration::from_secs(100)
        }]
    );
}

#[test]
fn test_non_finite_seek_is_ignored() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });
    controller.handle(UiEvent::MetadataLoaded {
        duration_secs: 200.0,
    });

    for percent in [f64::NAN, f64::INFINITY] {
        let effects = controller.handle(UiEvent::Seek { percent });
        assert!(media(&effects).is_empty());
    }
    assert_eq!(controller.player_bar().current_time, "0:00");
}

#[test]
fn test_unrepresentable_engine_times_are_dropped() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });
    controller.handle(UiEvent::MetadataLoaded {
        duration_secs: 200.0,
    });
    controller.handle(UiEvent::TimeUpdate {
        position_secs: 50.0,
    });

    controller.handle(UiEvent::MetadataLoaded {
        duration_secs: 1e300,
    });
    controller.handle(UiEvent::TimeUpdate {
        position_secs: f64::MAX,
    });

    let bar = controller.player_bar();
    assert_eq!(bar.total_time, "3:20");
    assert_eq!(bar.current_time, "0:50");
}

#[test]
fn test_seek_without_track_is_ignored() {
    let mut controller = loaded();
    let effects = controller.handle(UiEvent::Seek { percent: 40.0 });
    assert!(effects.is_empty());
}

#[test]
fn test_track_end_advances() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(1),
    });
    controller.handle(UiEvent::TrackEnded);
    assert_eq!(controller.now_playing().unwrap().title, "Beta");
}

#[test]
fn test_queue_drop_keeps_current_track() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(2),
    });

    let effects = controller.handle(UiEvent::QueueDrop { from: 0, to: 2 });

    assert_eq!(queue_ids(&controller), vec![2, 3, 1]);
    assert_eq!(renders(&effects), vec![RenderTarget::Queue]);
    let current: Vec<u64> = controller
        .queue_items()
        .iter()
        .filter(|q| q.is_current)
        .map(|q| q.track_id.get())
        .collect();
    assert_eq!(current, vec![2]);
}

// =============================================================================
// Keyboard
// =============================================================================

#[test]
fn test_keys_ignored_while_typing() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::KeyPressed {
        key: Key::Space,
        in_text_input: true,
    });

    assert!(effects.is_empty());
    assert!(controller.now_playing().is_none());
}

#[test]
fn test_space_starts_first_track() {
    let mut controller = loaded();

    controller.handle(UiEvent::KeyPressed {
        key: Key::Space,
        in_text_input: false,
    });

    assert_eq!(controller.now_playing().unwrap().title, "Alpha");
}

#[test]
fn test_arrow_keys_adjust_volume() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::KeyPressed {
        key: Key::ArrowUp,
        in_text_input: false,
    });
    assert_eq!(controller.player_bar().volume, 85);
    assert_eq!(renders(&effects), vec![RenderTarget::PlayerBar]);

    for _ in 0..30 {
        controller.handle(UiEvent::KeyPressed {
            key: Key::ArrowDown,
            in_text_input: false,
        });
    }
    assert_eq!(controller.player_bar().volume, 0);
}

// =============================================================================
// Upload
// =============================================================================

#[test]
fn test_upload_without_audio_is_rejected_locally() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::UploadSelected {
        files: vec![SelectedFile {
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            location: "/tmp/notes.txt".to_string(),
        }],
    });

    assert_eq!(
        notifications(&effects),
        vec![(true, "No valid audio files selected".to_string())]
    );
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::Network { .. })));
}

#[test]
fn test_upload_sends_only_audio_then_reloads() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::UploadSelected {
        files: vec![
            audio("a.mp3"),
            SelectedFile {
                name: "cover.png".to_string(),
                mime_type: "image/png".to_string(),
                location: "/tmp/cover.png".to_string(),
            },
        ],
    });

    assert_eq!(
        effects[0],
        Effect::network(NetworkRequest::Upload {
            files: vec![audio("a.mp3")]
        })
    );
    assert_eq!(controller.upload_progress(), Some(0));

    controller.handle(UiEvent::UploadProgress { percent: 60 });
    assert_eq!(
        controller.view_model(RenderTarget::UploadProgress),
        ViewModel::UploadProgress(Some(60))
    );

    let effects = controller.handle(UiEvent::UploadSucceeded { files: 1 });
    assert_eq!(
        notifications(&effects),
        vec![(false, "1 file(s) uploaded successfully".to_string())]
    );
    assert!(effects.contains(&Effect::network(NetworkRequest::FetchCatalog)));
    assert_eq!(controller.upload_progress(), None);
}

#[test]
fn test_upload_failure_notifies() {
    let mut controller = loaded();
    controller.handle(UiEvent::UploadSelected {
        files: vec![audio("a.mp3")],
    });

    let effects = controller.handle(UiEvent::UploadFailed {
        message: "HTTP 500".to_string(),
    });

    assert_eq!(
        notifications(&effects),
        vec![(true, "Failed to upload files".to_string())]
    );
    assert_eq!(controller.upload_progress(), None);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_requires_confirmation() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::DeleteTrackRequested {
        track_id: TrackId::new(2),
    });
    match &effects[0] {
        Effect::Confirm { request } => assert_eq!(request.message, "Delete \"Beta\"?"),
        other => panic!("Expected Confirm, got: {:?}", other),
    }

    let effects = controller.handle(UiEvent::Confirmed { accepted: false });
    assert!(effects.is_empty());
    assert!(!controller.has_pending_confirmation());

    controller.handle(UiEvent::DeleteTrackRequested {
        track_id: TrackId::new(2),
    });
    let effects = controller.handle(UiEvent::Confirmed { accepted: true });
    assert_eq!(
        effects,
        vec![Effect::network(NetworkRequest::DeleteTrack {
            track_id: TrackId::new(2),
            filename: "beta.mp3".to_string(),
        })]
    );
}

#[test]
fn test_delete_success_removes_everywhere() {
    let mut controller = loaded();
    controller.handle(UiEvent::Search {
        query: "gamma".to_string(),
    });

    let effects = controller.handle(UiEvent::DeleteSucceeded {
        track_id: TrackId::new(2),
    });

    assert_eq!(
        notifications(&effects),
        vec![(false, "\"Beta\" deleted".to_string())]
    );
    assert_eq!(controller.catalog().len(), 2);
    assert_eq!(queue_ids(&controller), vec![1, 3]);
    // search still applied
    let grid = controller.grid_items();
    assert_eq!(grid.len(), 1);
    assert_eq!(grid[0].title, "Gamma");
}

#[test]
fn test_deleting_current_track_stops_playback() {
    let mut controller = loaded();
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(3),
    });
    controller.handle(UiEvent::PlayStarted);

    let effects = controller.handle(UiEvent::DeleteSucceeded {
        track_id: TrackId::new(3),
    });

    assert!(media(&effects).contains(&MediaCommand::Pause));
    assert!(controller.now_playing().is_none());
    assert!(renders(&effects).contains(&RenderTarget::NowPlaying));
}

#[test]
fn test_delete_failure_prefers_server_message() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::DeleteFailed {
        track_id: TrackId::new(1),
        message: Some("File not found".to_string()),
    });
    assert_eq!(
        notifications(&effects),
        vec![(true, "File not found".to_string())]
    );

    let effects = controller.handle(UiEvent::DeleteFailed {
        track_id: TrackId::new(1),
        message: None,
    });
    assert_eq!(
        notifications(&effects),
        vec![(true, "Failed to delete track".to_string())]
    );
    assert_eq!(controller.catalog().len(), 3);
}

#[test]
fn test_download_uses_media_url() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::DownloadTrack {
        track_id: TrackId::new(1),
    });

    assert_eq!(
        effects,
        vec![Effect::Download {
            url: "/static/music/alpha.mp3".to_string(),
            filename: "alpha.mp3".to_string(),
        }]
    );
}

// =============================================================================
// Playlists
// =============================================================================

#[test]
fn test_add_without_playlists_asks_to_create_one() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::AddToPlaylistRequested {
        track_id: TrackId::new(1),
    });

    assert_eq!(
        notifications(&effects),
        vec![(true, "Create a playlist first".to_string())]
    );
}

#[test]
fn test_blank_playlist_name_is_highlighted() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::CreatePlaylist {
        name: "   ".to_string(),
    });

    assert_eq!(
        effects,
        vec![Effect::HighlightInvalid {
            field: InputField::PlaylistName
        }]
    );
    assert!(controller.playlists().is_empty());
}

#[test]
fn test_favs_playlist_flow() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::CreatePlaylist {
        name: "Favs".to_string(),
    });
    assert_eq!(
        notifications(&effects),
        vec![(false, "Playlist \"Favs\" created".to_string())]
    );
    let favs = first_playlist(&controller);

    let effects = controller.handle(UiEvent::AddToPlaylistRequested {
        track_id: TrackId::new(3),
    });
    match &effects[0] {
        Effect::ChoosePlaylist { track_id, playlists } => {
            assert_eq!(*track_id, TrackId::new(3));
            assert_eq!(playlists[0].name, "Favs");
        }
        other => panic!("Expected ChoosePlaylist, got: {:?}", other),
    }

    for id in [3, 1] {
        controller.handle(UiEvent::AddToPlaylist {
            playlist_id: favs,
            track_id: TrackId::new(id),
        });
    }
    let effects = controller.handle(UiEvent::AddToPlaylist {
        playlist_id: favs,
        track_id: TrackId::new(3),
    });
    assert_eq!(
        notifications(&effects),
        vec![(true, "This song is already in the playlist".to_string())]
    );

    controller.handle(UiEvent::PlayPlaylist {
        playlist_id: favs,
        start: 0,
    });
    assert_eq!(queue_ids(&controller), vec![3, 1]);
    assert_eq!(controller.now_playing().unwrap().title, "Gamma");
    assert_eq!(controller.grid_items().len(), 2);

    // clicking a catalog track that is not queued restores the catalog queue
    controller.handle(UiEvent::Search {
        query: String::new(),
    });
    controller.handle(UiEvent::PlayTrack {
        track_id: TrackId::new(2),
    });
    assert_eq!(queue_ids(&controller), vec![1, 2, 3]);
    assert_eq!(controller.now_playing().unwrap().title, "Beta");
}

#[test]
fn test_playlists_are_written_through() {
    let mut controller = loaded();
    controller.handle(UiEvent::CreatePlaylist {
        name: "Road".to_string(),
    });
    let road = first_playlist(&controller);
    controller.handle(UiEvent::AddToPlaylist {
        playlist_id: road,
        track_id: TrackId::new(1),
    });

    let json = controller
        .playlists()
        .store()
        .get(PLAYLISTS_KEY)
        .unwrap()
        .unwrap();
    let reopened = Controller::new(
        ControllerConfig::default(),
        MemoryKeyValueStore::with_value(PLAYLISTS_KEY, json),
    )
    .unwrap();

    let list = reopened.playlists().list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Road");
    assert_eq!(list[0].songs[0].title, "Alpha");
}

#[test]
fn test_remove_from_playlist() {
    let mut controller = loaded();
    controller.handle(UiEvent::CreatePlaylist {
        name: "Favs".to_string(),
    });
    let favs = first_playlist(&controller);
    controller.handle(UiEvent::AddToPlaylist {
        playlist_id: favs,
        track_id: TrackId::new(1),
    });

    let effects = controller.handle(UiEvent::RemoveFromPlaylist {
        playlist_id: favs,
        index: 0,
    });

    assert_eq!(
        notifications(&effects),
        vec![(false, "Song removed from playlist".to_string())]
    );
    assert!(renders(&effects).contains(&RenderTarget::Playlist(favs)));
    assert!(controller.playlists().get(favs).unwrap().is_empty());

    // stale index
    let effects = controller.handle(UiEvent::RemoveFromPlaylist {
        playlist_id: favs,
        index: 5,
    });
    assert!(effects.is_empty());
}

#[test]
fn test_delete_playlist_after_confirmation() {
    let mut controller = loaded();
    controller.handle(UiEvent::CreatePlaylist {
        name: "Favs".to_string(),
    });
    let favs = first_playlist(&controller);
    controller.handle(UiEvent::OpenPlaylist { playlist_id: favs });
    assert_eq!(controller.current_view(), View::Playlist(favs));

    let effects = controller.handle(UiEvent::DeletePlaylistRequested { playlist_id: favs });
    assert!(matches!(effects[0], Effect::Confirm { .. }));

    let effects = controller.handle(UiEvent::Confirmed { accepted: true });
    assert_eq!(
        notifications(&effects),
        vec![(false, "Playlist deleted".to_string())]
    );
    assert!(controller.playlists().is_empty());
    assert_eq!(controller.current_view(), View::Playlists);
    assert_eq!(
        controller.view_model(RenderTarget::Playlist(favs)),
        ViewModel::Playlist(None)
    );
}

#[test]
fn test_empty_playlist_does_not_play() {
    let mut controller = loaded();
    controller.handle(UiEvent::CreatePlaylist {
        name: "Empty".to_string(),
    });
    let empty = first_playlist(&controller);

    let effects = controller.handle(UiEvent::PlayPlaylist {
        playlist_id: empty,
        start: 0,
    });

    assert!(effects.is_empty());
    assert_eq!(queue_ids(&controller), vec![1, 2, 3]);
}

#[test]
fn test_navigation_renders_view() {
    let mut controller = loaded();

    let effects = controller.handle(UiEvent::ShowView {
        view: View::Playlists,
    });

    assert_eq!(
        renders(&effects),
        vec![RenderTarget::Navigation, RenderTarget::Playlists]
    );
    assert_eq!(
        controller.view_model(RenderTarget::Navigation),
        ViewModel::Navigation(View::Playlists)
    );
}
