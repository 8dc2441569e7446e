//! Run configuration, default locations and path expansion.

use crate::core::collision::DEFAULT_MAX_ATTEMPTS;
use crate::core::organizer::{OrganizeRequest, Organizer};
use crate::core::scanner::ScanConfig;
use crate::events::EventSender;
use std::path::{Path, PathBuf};

/// Log file name, written next to the executable
pub const LOG_FILE_NAME: &str = "photo_organizer.log";

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or with `~user`, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(std::path::Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Where unsorted photos usually land (the OS downloads folder)
pub fn default_source() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| expand_home(Path::new("~/Downloads")))
}

/// Where sorted photos go (the OS pictures folder)
pub fn default_destination() -> PathBuf {
    dirs::picture_dir().unwrap_or_else(|| expand_home(Path::new("~/Pictures")))
}

/// `photo_organizer.log` beside the running binary, else in the working directory
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Make `path` absolute against the working directory without touching the filesystem
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

/// Everything one invocation needs
#[derive(Debug, Clone)]
pub struct OrganizeConfig {
    /// Folder to collect photos from
    pub source: PathBuf,
    /// Folder to sort photos into
    pub destination: PathBuf,
    /// Append-only log file
    pub log_file: PathBuf,
    /// Cap on `_n` probes per file (`None` = unbounded)
    pub max_collision_attempts: Option<u32>,
    /// Walker settings
    pub scan: ScanConfig,
}

impl Default for OrganizeConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            log_file: default_log_path(),
            max_collision_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            scan: ScanConfig::default(),
        }
    }
}

impl OrganizeConfig {
    /// Source and destination as absolute paths
    pub fn request(&self) -> std::io::Result<OrganizeRequest> {
        OrganizeRequest::new(&self.source, &self.destination)
    }

    /// An organizer wired to this configuration, reporting to `events`
    pub fn organizer(&self, events: EventSender) -> Organizer {
        Organizer::builder()
            .scan_config(self.scan.clone())
            .max_collision_attempts(self.max_collision_attempts)
            .events(events)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn tilde_expands_to_home() {
        let home = match dirs::home_dir() {
            Some(home) => home,
            None => return,
        };
        assert_eq!(expand_home(Path::new("~/Pictures")), home.join("Pictures"));
        assert_eq!(expand_home(Path::new("~")), home);
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(
            expand_home(Path::new("/srv/photos")),
            PathBuf::from("/srv/photos")
        );
        assert_eq!(expand_home(Path::new("a/~/b")), PathBuf::from("a/~/b"));
        assert_eq!(expand_home(Path::new("~bob/x")), PathBuf::from("~bob/x"));
    }

    #[test]
    fn absolutize_anchors_relative_paths() {
        let abs = absolutize(Path::new("inbox")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("inbox"));
    }

    #[test]
    fn log_path_uses_fixed_name() {
        assert!(default_log_path().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn default_config_includes_hidden_and_caps_probing() {
        let config = OrganizeConfig::default();
        assert!(config.scan.include_hidden);
        assert!(!config.scan.follow_symlinks);
        assert_eq!(config.max_collision_attempts, Some(DEFAULT_MAX_ATTEMPTS));
        assert!(config.log_file.ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn config_drives_the_organizer() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("in");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join(".hidden.jpg"), b"dot").unwrap();
        fs::write(source.join("shown.jpg"), b"plain").unwrap();

        let config = OrganizeConfig {
            source,
            destination: temp.path().join("out"),
            scan: ScanConfig {
                include_hidden: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let (sender, _receiver) = EventChannel::new();
        let stats = config
            .organizer(sender)
            .organize(&config.request().unwrap())
            .unwrap();

        assert_eq!(stats.total_processed, 1);
        assert_eq!(stats.copied, 1);
    }
}
