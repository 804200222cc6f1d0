pub mod cors;

pub use cors::{CORS_HEADERS, cors_header_map, with_cors_headers};
