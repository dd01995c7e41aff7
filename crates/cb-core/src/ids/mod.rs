//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Document identifier assigned by the backing store.
///
/// Also the tie-breaker of the board sort order: posts with equal
/// creation timestamps sort by descending id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(String);

/// Identity-provider uid of a post author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(String);

impl_id!(PostId, AuthorId);
