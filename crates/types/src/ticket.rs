use serde::{Deserialize, Serialize};

/// Server-issued descriptor authorizing a single streaming upload attempt.
///
/// Issued by `POST /me/videos` with `{"type":"streaming"}` and immutable for
/// the lifetime of that attempt. `upload_link_secure` points at the upload
/// host (not the API host); `complete_uri` is the API path that finalizes
/// the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTicket {
    /// Session resource path, e.g. `/users/42/tickets/abcdef`.
    pub uri: String,
    pub ticket_id: String,
    pub complete_uri: String,
    pub upload_link_secure: String,
    /// Owner reference, passed through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_decodes_from_create_response() {
        let json = r#"{
            "uri": "/users/42/tickets/abc123",
            "ticket_id": "abc123",
            "complete_uri": "/users/42/uploads/abc123?video_file_id=9",
            "upload_link_secure": "https://upload-17.cloud.example.com/upload?ticket=abc123",
            "user": {"uri": "/users/42", "name": "studio"}
        }"#;
        let ticket: UploadTicket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.ticket_id, "abc123");
        assert!(ticket.complete_uri.starts_with("/users/42/uploads/"));
        assert!(ticket.user.is_some());
    }

    #[test]
    fn ticket_without_user_roundtrips() {
        let ticket = UploadTicket {
            uri: "/users/1/tickets/t".into(),
            ticket_id: "t".into(),
            complete_uri: "/users/1/uploads/t".into(),
            upload_link_secure: "https://upload.example.com/u".into(),
            user: None,
        };
        let json = serde_json::to_string(&ticket).unwrap();
        assert!(!json.contains("user"));
        let parsed: UploadTicket = serde_json::from_str(&json).unwrap();
        assert_eq!(ticket, parsed);
    }
}
