//! Document trait: a typed view over one collection of the content store.

use serde::{Serialize, de::DeserializeOwned};

/// A typed document stored in the external content store.
///
/// `DOC_TYPE` is the store's `_type` discriminator. Stored documents always
/// carry the id the store assigned; `Draft` is the id-less shape sent on
/// create.
pub trait Document: DeserializeOwned + Clone + Send + Sync + core::fmt::Debug {
    const DOC_TYPE: &'static str;

    type Draft: Serialize + Send + Sync;

    /// Query used to list the collection.
    ///
    /// The default returns every field; collections override this with the
    /// projection they actually read.
    fn list_query() -> String {
        format!("*[_type == \"{}\"]", Self::DOC_TYPE)
    }
}
