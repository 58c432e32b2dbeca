/// Stem source types
use crate::types::AudioFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One individually recorded audio track intended to be mixed with others
/// into a complete piece.
///
/// Created when a file is opened; destroyed (and its channel released) on the
/// next load or on engine teardown. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stem {
    /// Path of the underlying file
    pub path: PathBuf,

    /// Display name (file stem), used by UI listings
    pub name: String,

    /// Native format read from the file headers at open time
    pub format: AudioFormat,

    /// Total duration, when the container reports it
    pub duration: Option<Duration>,
}

impl Stem {
    /// Create a stem for an opened file
    pub fn new(path: PathBuf, format: AudioFormat, duration: Option<Duration>) -> Self {
        let name = display_name(&path);
        Self {
            path,
            name,
            format,
            duration,
        }
    }
}

/// Derive the display name from a path (file name without extension)
fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleRate;

    #[test]
    fn stem_display_name_strips_extension() {
        let format = AudioFormat::new(SampleRate::CD_QUALITY, 2, Some(16));
        let stem = Stem::new(PathBuf::from("/session/bass take 3.flac"), format, None);
        assert_eq!(stem.name, "bass take 3");
    }

    #[test]
    fn stem_display_name_handles_bare_file() {
        let format = AudioFormat::cd_quality();
        let stem = Stem::new(PathBuf::from("vocals"), format, None);
        assert_eq!(stem.name, "vocals");
    }
}
