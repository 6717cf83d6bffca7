//! Wire types for the Vimeo REST API.
//!
//! Read-mostly DTOs mirroring the JSON the API serves (videos, paginated
//! listings, upload tickets) plus the dotted-key property bag used to PATCH
//! video settings. All shapes are plain serde structs; nothing here talks
//! to the network.

pub mod page;
pub mod properties;
pub mod ticket;
pub mod video;

pub use page::{Page, PageLinks};
pub use properties::{PrivacyComments, PrivacyEmbed, PrivacyView, TitleDisplay, VideoProperties};
pub use ticket::UploadTicket;
pub use video::{VideoMetadata, VideoPrivacy, VideoStatus};
