pub mod caption;
pub mod compositor;
pub mod error;
pub mod merge;
pub mod output_path;
pub mod selection;
pub mod server_lib;
pub mod window_position;

pub use compositor::{compose, compose_images, caption_font_size, ComposeOptions, CompositeLayout};
pub use error::{MergeError, MergeResult};
pub use merge::{merge_in_background, merge_into_dir, MergeConfig};
pub use output_path::{default_output_dir, next_available_path};
pub use selection::{ImagePair, InputEvent, Response, Selection};
pub use window_position::{DisplayBounds, WindowPosition, WindowPositionStore};
