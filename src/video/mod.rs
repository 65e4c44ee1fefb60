pub mod cancel;
pub mod extractor;
pub mod preview;
pub mod source;

pub use cancel::CancelToken;
pub use extractor::{extract_frames, ExtractReport};
pub use preview::{preview_frames, PreviewReport};
pub use source::VideoSource;
