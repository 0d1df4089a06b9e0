//! Input handling for choosing the "before" and "after" images.
//!
//! Every way of supplying images (drag and drop, a file picker, command line
//! arguments) is expressed as an [`InputEvent`] and fed through
//! [`Selection::handle`], which owns the current pair and decides what the
//! user is told.

use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const MSG_DROP_TWO: &str = "Please drop two images.";
pub const MSG_SELECT_TWO: &str = "Please select two images.";
pub const MSG_CANCELED: &str = "File selection was canceled.";
pub const MSG_MISSING_PAIR: &str = "Please drop or select both before and after images.";

/// Whether `path` has one of the extensions offered by the image picker.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub before: PathBuf,
    pub after: PathBuf,
}

impl ImagePair {
    /// The first two paths become before and after, in the order given.
    /// Any further paths are ignored.
    pub fn from_paths(paths: &[PathBuf]) -> Option<Self> {
        match paths {
            [before, after, ..] => Some(Self {
                before: before.clone(),
                after: after.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    FilesDropped(Vec<PathBuf>),
    FilesPicked(Vec<PathBuf>),
    PickerCanceled,
    MergeRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A new pair is selected and ready to merge.
    Ready(ImagePair),
    /// The event was not accepted; the message is meant for the user.
    Rejected(&'static str),
    /// The caller should merge this pair.
    Merge(ImagePair),
}

#[derive(Debug, Default)]
pub struct Selection {
    pair: Option<ImagePair>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(&self) -> Option<&ImagePair> {
        self.pair.as_ref()
    }

    fn select(&mut self, paths: &[PathBuf], too_few: &'static str) -> Response {
        match ImagePair::from_paths(paths) {
            Some(pair) => {
                self.pair = Some(pair.clone());
                Response::Ready(pair)
            }
            None => Response::Rejected(too_few),
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::FilesDropped(paths) => self.select(&paths, MSG_DROP_TWO),
            InputEvent::FilesPicked(paths) => self.select(&paths, MSG_SELECT_TWO),
            InputEvent::PickerCanceled => Response::Rejected(MSG_CANCELED),
            InputEvent::MergeRequested => match &self.pair {
                Some(pair) => Response::Merge(pair.clone()),
                None => Response::Rejected(MSG_MISSING_PAIR),
            },
        }
    }
}
