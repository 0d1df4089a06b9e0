use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const POSITION_FILE: &str = "window-position.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

/// Bounds of one attached display, in the same coordinate space as
/// [`WindowPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    /// Edges are inclusive.
    pub fn contains(&self, position: WindowPosition) -> bool {
        let (x, y) = (i64::from(position.x), i64::from(position.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left
            && x <= left + i64::from(self.width)
            && y >= top
            && y <= top + i64::from(self.height)
    }
}

impl WindowPosition {
    /// Read a saved position, falling back to the default when the file is
    /// missing or does not hold an `{ "x": int, "y": int }` record.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(position) => position,
            Err(e) => {
                warn!("Failed to load window position, using default: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).context("Invalid window position data")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write window position to {}", path.display()))
    }

    /// This position if it lies on one of `displays`, otherwise the default.
    pub fn placement(self, displays: &[DisplayBounds]) -> Self {
        if displays.iter().any(|d| d.contains(self)) {
            self
        } else {
            Self::default()
        }
    }
}

/// Owns the location of the persisted window position. The window lifecycle
/// loads through it at startup and saves through it at shutdown.
#[derive(Debug, Clone)]
pub struct WindowPositionStore {
    path: PathBuf,
}

impl WindowPositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user's config directory.
    pub fn in_config_dir(app_name: &str) -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(app_name).join(POSITION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved position, adjusted to land on one of `displays`.
    pub fn restore(&self, displays: &[DisplayBounds]) -> WindowPosition {
        WindowPosition::load(&self.path).placement(displays)
    }

    pub fn persist(&self, position: WindowPosition) -> anyhow::Result<()> {
        position.save(&self.path)
    }
}
