//! Completion sound playback

use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tokio::process::Command;
use tracing::{debug, info};

/// Players tried in order, each with the sound file it plays by default
const PLAYERS: [(&str, &str); 4] = [
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
    ("afplay", "/System/Library/Sounds/Glass.aiff"),
];

/// Pick the player and file to use. A custom file gets a player chosen by
/// platform and extension; otherwise the first installed system sound wins.
pub fn pick_player(custom: Option<&Path>) -> Option<(&'static str, PathBuf)> {
    pick_player_from(custom, &PLAYERS)
}

fn pick_player_from(
    custom: Option<&Path>,
    candidates: &[(&'static str, &'static str)],
) -> Option<(&'static str, PathBuf)> {
    if let Some(path) = custom {
        let player = match path.extension().and_then(|e| e.to_str()) {
            Some("wav") if cfg!(target_os = "linux") => "aplay",
            _ if cfg!(target_os = "macos") => "afplay",
            _ => "paplay",
        };
        return Some((player, path.to_path_buf()));
    }

    candidates
        .iter()
        .find(|(_, file)| Path::new(file).exists())
        .map(|&(player, file)| (player, PathBuf::from(file)))
}

/// Play the completion sound, falling back to the terminal bell
pub async fn play_completion_sound(custom: Option<&Path>) -> Result<(), String> {
    let Some((player, file)) = pick_player(custom) else {
        debug!("No sound player found, ringing terminal bell");
        return ring_bell();
    };

    debug!("Playing {} with {}", file.display(), player);
    let output = Command::new(player)
        .arg(&file)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", player, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", player, stderr.trim()));
    }

    info!("Completion sound played");
    Ok(())
}

fn ring_bell() -> Result<(), String> {
    let mut stderr = std::io::stderr();
    stderr
        .write_all(b"\x07")
        .and_then(|_| stderr.flush())
        .map_err(|e| format!("Failed to ring terminal bell: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");

    #[test]
    fn custom_file_is_always_used() {
        let (_, file) = pick_player(Some(Path::new("/tmp/ding.ogg"))).unwrap();
        assert_eq!(file, PathBuf::from("/tmp/ding.ogg"));
    }

    #[test]
    fn custom_player_follows_platform_and_extension() {
        let (wav_player, _) = pick_player_from(Some(Path::new("/tmp/ding.wav")), &[]).unwrap();
        let (ogg_player, _) = pick_player_from(Some(Path::new("/tmp/ding.ogg")), &[]).unwrap();

        if cfg!(target_os = "linux") {
            assert_eq!(wav_player, "aplay");
            assert_eq!(ogg_player, "paplay");
        } else if cfg!(target_os = "macos") {
            assert_eq!(wav_player, "afplay");
            assert_eq!(ogg_player, "afplay");
        } else {
            assert_eq!(wav_player, "paplay");
            assert_eq!(ogg_player, "paplay");
        }
    }

    #[test]
    fn missing_system_sounds_pick_nothing() {
        let candidates = [
            ("paplay", "/nonexistent/complete.oga"),
            ("aplay", "/nonexistent/generic.wav"),
        ];
        assert_eq!(pick_player_from(None, &candidates), None);
        assert_eq!(pick_player_from(None, &[]), None);
    }

    #[test]
    fn first_installed_system_sound_wins() {
        let candidates = [
            ("paplay", "/nonexistent/complete.oga"),
            ("aplay", MANIFEST),
            ("afplay", MANIFEST),
        ];
        assert_eq!(
            pick_player_from(None, &candidates),
            Some(("aplay", PathBuf::from(MANIFEST)))
        );
    }
}
