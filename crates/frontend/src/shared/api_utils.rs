//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and ordering
//! responses of repeated list loads.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Join a base URL, an API path and an already-encoded query string
pub fn join_url(base: &str, path: &str, query: &str) -> String {
    let base = base.trim_end_matches('/');
    if query.is_empty() {
        format!("{}{}", base, path)
    } else {
        format!("{}{}?{}", base, path, query)
    }
}

/// Last-request-wins counter for list reloads.
///
/// Every load takes a number from `next`; a response is applied only while
/// its number is still current.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestRequest {
    seq: u64,
}

impl LatestRequest {
    pub fn next(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.seq == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000/", "/api/countries", ""),
            "http://localhost:3000/api/countries"
        );
        assert_eq!(
            join_url("", "/api/cities", "page=0&province_id=10"),
            "/api/cities?page=0&province_id=10"
        );
    }

    #[test]
    fn test_only_latest_list_load_applies() {
        let mut latest = LatestRequest::default();
        let first = latest.next();
        let second = latest.next();

        // First response arrives after the second was issued
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));
    }
}
