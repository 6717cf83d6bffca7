use serde::{Deserialize, Serialize};

/// Navigation links of a paginated listing. `next` is absent on the last page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// One page of a paginated listing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub paging: PageLinks,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// True when this is the last page of the listing.
    pub fn is_last(&self) -> bool {
        self.paging.next.is_none()
    }
}
