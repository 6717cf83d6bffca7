fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use reelsync_types::{Page, UploadTicket, VideoMetadata, VideoProperties};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and
    /// compares the JSON values (order-independent).
    ///
    /// Fixtures are written without `null` members, matching how the API
    /// omits absent fields, so a faithful mapping round-trips exactly.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  ours:    {reserialized}"
        );
    }

    #[test]
    fn fixture_upload_ticket() {
        roundtrip_test::<UploadTicket>("upload_ticket.json");
    }

    #[test]
    fn fixture_video() {
        roundtrip_test::<VideoMetadata>("video.json");
    }

    #[test]
    fn fixture_videos_page() {
        roundtrip_test::<Page<VideoMetadata>>("videos_page.json");
    }

    #[test]
    fn fixture_video_properties() {
        roundtrip_test::<VideoProperties>("video_properties.json");
    }

    #[test]
    fn page_items_keep_server_order() {
        let page: Page<VideoMetadata> =
            serde_json::from_value(load_fixture("videos_page.json")).unwrap();
        let ids: Vec<_> = page.data.iter().map(VideoMetadata::id).collect();
        assert_eq!(ids, ["201", "105"]);
        assert!(!page.is_last());
    }
}
