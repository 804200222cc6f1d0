pub mod ssml;
pub mod storage;
pub mod tts;

// Re-export commonly used types for convenience
pub use ssml::{MarkupPolicy, wrap_with_prosody};
pub use storage::{AudioStore, ObjectStoreAudioStore, S3StoreConfig, StorageError};
pub use tts::{SpeechSynthesizer, SynthesisInput, TTSError, TextType};
