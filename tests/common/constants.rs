//! Shared constants for end-to-end tests

// ============================================================================
// Test Payloads
// ============================================================================

/// Bytes the test server hands out as the fallback image
pub const DEFAULT_IMAGE_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// A fake audio payload (starts like an ID3-tagged MP3)
pub const AUDIO_BYTES: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mp3-frames";

/// A second, distinct audio payload
pub const OTHER_AUDIO_BYTES: &[u8] = b"fLaC\x00\x00\x00\x22fake-flac-frames";

/// A fake image payload (starts like a PNG)
pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-png-chunks";

/// A replacement image payload
pub const OTHER_IMAGE_BYTES: &[u8] = b"GIF89a-fake-gif";

// ============================================================================
// Test Metadata
// ============================================================================

pub const TITLE_1: &str = "Jazz Riff";
pub const GENRE_1: &str = "Jazz";
pub const TITLE_2: &str = "Night Drive";
pub const GENRE_2: &str = "Synthwave";

/// An id no test ever creates
pub const NONEXISTENT_ID: &str = "999999";

// ============================================================================
// Expected Messages
// ============================================================================

pub const INVALID_ID_MESSAGE: &str = "Invalid id value";
pub const NOT_FOUND_MESSAGE: &str = "Audio entry not found";
pub const MISSING_AUDIO_MESSAGE: &str = "Audio file required";
pub const MISSING_TITLE_MESSAGE: &str = "Title field required";
pub const MISSING_GENRE_MESSAGE: &str = "Genre Field required";
pub const DELETED_MESSAGE: &str = "Audio entry deleted successfully";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
