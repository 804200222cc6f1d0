pub mod speak_error;

pub use speak_error::{ErrorStatusPolicy, SpeakError, SpeakResult};
