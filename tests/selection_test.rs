use image_merger_lib::selection::{
    is_supported_image, MSG_CANCELED, MSG_DROP_TWO, MSG_MISSING_PAIR, MSG_SELECT_TWO,
};
use image_merger_lib::{ImagePair, InputEvent, Response, Selection};
use std::path::{Path, PathBuf};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn test_first_two_files_are_before_and_after() {
    let mut selection = Selection::new();

    let response = selection.handle(InputEvent::FilesDropped(paths(&["b.png", "a.png", "c.png"])));

    let expected = ImagePair {
        before: PathBuf::from("b.png"),
        after: PathBuf::from("a.png"),
    };
    assert_eq!(response, Response::Ready(expected.clone()));
    assert_eq!(selection.handle(InputEvent::MergeRequested), Response::Merge(expected));
}

#[test]
fn test_merge_without_pair_is_rejected() {
    let mut selection = Selection::new();
    assert_eq!(
        selection.handle(InputEvent::MergeRequested),
        Response::Rejected(MSG_MISSING_PAIR)
    );
}

#[test]
fn test_too_few_files_keeps_previous_pair() {
    let mut selection = Selection::new();
    selection.handle(InputEvent::FilesPicked(paths(&["1.jpg", "2.jpg"])));

    assert_eq!(
        selection.handle(InputEvent::FilesDropped(paths(&["3.jpg"]))),
        Response::Rejected(MSG_DROP_TWO)
    );
    assert_eq!(
        selection.handle(InputEvent::FilesPicked(Vec::new())),
        Response::Rejected(MSG_SELECT_TWO)
    );
    assert_eq!(
        selection.handle(InputEvent::PickerCanceled),
        Response::Rejected(MSG_CANCELED)
    );

    let pair = selection.pair().expect("pair should survive rejected events");
    assert_eq!(pair.before, Path::new("1.jpg"));
    assert_eq!(pair.after, Path::new("2.jpg"));
}

#[test]
fn test_new_selection_replaces_pair() {
    let mut selection = Selection::new();
    selection.handle(InputEvent::FilesPicked(paths(&["1.jpg", "2.jpg"])));
    selection.handle(InputEvent::FilesDropped(paths(&["3.png", "4.png"])));

    match selection.handle(InputEvent::MergeRequested) {
        Response::Merge(pair) => {
            assert_eq!(pair.before, Path::new("3.png"));
            assert_eq!(pair.after, Path::new("4.png"));
        }
        other => panic!("expected merge, got {:?}", other),
    }
}

#[test]
fn test_supported_extensions() {
    assert!(is_supported_image(Path::new("photo.jpg")));
    assert!(is_supported_image(Path::new("photo.JPEG")));
    assert!(is_supported_image(Path::new("/tmp/shot.Png")));
    assert!(!is_supported_image(Path::new("notes.txt")));
    assert!(!is_supported_image(Path::new("no_extension")));
}
