use std::fmt::Write as _;

use client_core::ExplorerView;
use shared::domain::SyncState;

fn sync_label(state: SyncState) -> &'static str {
    match state {
        SyncState::Initialized => "loaded",
        SyncState::Dirty => "unsaved changes",
        SyncState::Synced => "saved",
    }
}

/// Draws the page as plain text, top to bottom in the order the web page
/// lays it out.
pub fn render_view(view: &ExplorerView, field: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {}'s Song Explorer ==", view.username);

    match &view.song_preview {
        Some(preview) => {
            let name = preview.name.as_deref().unwrap_or("(unknown song)");
            let artist = preview.artist.as_deref().unwrap_or("(unknown artist)");
            let _ = writeln!(out, "{name} - {artist}");
            for (label, value) in [
                ("cover", &preview.image_url),
                ("preview", &preview.preview_url),
                ("lyrics", &preview.genius_url),
            ] {
                if let Some(value) = value {
                    let _ = writeln!(out, "  {label}: {value}");
                }
            }
        }
        None => {
            let _ = writeln!(
                out,
                "Looks like you don't have anything saved! Use the form below!"
            );
        }
    }

    let _ = writeln!(out, "Your saved artists ({}):", sync_label(view.sync_state));
    if view.artist_ids.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (index, artist_id) in view.artist_ids.iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {artist_id:?}");
    }
    let _ = write!(out, "Save a favorite artist ID for later: {field:?}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::SongPreview;

    fn view() -> ExplorerView {
        ExplorerView {
            username: "alice".into(),
            song_preview: None,
            artist_ids: vec!["1".into(), "".into()],
            sync_state: SyncState::Dirty,
        }
    }

    #[test]
    fn renders_rows_with_their_delete_positions() {
        let text = render_view(&view(), "abc");
        assert!(text.starts_with("== alice's Song Explorer =="));
        assert!(text.contains("Looks like you don't have anything saved!"));
        assert!(text.contains("(unsaved changes)"));
        assert!(text.contains("  [0] \"1\"\n"));
        assert!(text.contains("  [1] \"\"\n"));
        assert!(text.ends_with("Save a favorite artist ID for later: \"abc\""));
    }

    #[test]
    fn renders_song_block_when_present() {
        let mut view = view();
        view.song_preview = Some(SongPreview {
            name: Some("Creep".into()),
            artist: Some("Radiohead".into()),
            image_url: None,
            preview_url: Some("https://p.scdn.co/mp3-preview/x".into()),
            genius_url: None,
        });
        view.artist_ids.clear();
        let text = render_view(&view, "");
        assert!(text.contains("Creep - Radiohead"));
        assert!(text.contains("  preview: https://p.scdn.co/mp3-preview/x"));
        assert!(!text.contains("cover:"));
        assert!(text.contains("  (none)"));
    }
}
