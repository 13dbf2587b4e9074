use serde::{Deserialize, Serialize};

/// Durable reference to one stored image blob.
///
/// `name` is generated at upload time (uuid v4) and never derived from a
/// client-supplied file name. Together with `owner_id` it locates the blob in
/// the store; `url` is the durable retrieval location resolved at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub owner_id: String,
    pub name: String,
    pub url: String,
}
