use crate::page::page_model::{NodeId, Page};
use crate::page::paths::xpath;
use crate::selection::selection_set::SelectionSet;

/// How a candidate maps onto the current selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolution {
    /// The element is already selected under this identity.
    Existing(String),
    /// Not selected; this identity is free to use.
    Fresh(String),
}

/// Deterministic identity: tag, rounded viewport position, and a fingerprint
/// of the structural path. No randomness, so re-deriving it for the same
/// element in the same layout yields the same key.
pub fn derive_identity(page: &Page, id: NodeId) -> String {
    let tag = page.node(id).map(|n| n.tag.as_str()).unwrap_or("unknown");
    let rect = page.bounding_rect(id);
    format!(
        "{}_{}_{}_{}",
        tag,
        rect.x.round() as i64,
        rect.y.round() as i64,
        path_fingerprint(&xpath(page, id))
    )
}

/// Short hex digest of a structural path.
pub fn path_fingerprint(path: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(path.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

/// Map a candidate to an identity against `set`.
///
/// An element already in the set resolves to its stored identity even if it
/// has since moved. When a different element derives a key that is already
/// taken, a `#2`, `#3`, ... suffix disambiguates it instead of overwriting.
pub fn resolve_identity(set: &SelectionSet, page: &Page, id: NodeId) -> IdentityResolution {
    if let Some(existing) = set.identity_of(id) {
        return IdentityResolution::Existing(existing.to_string());
    }

    let base = derive_identity(page, id);
    if !set.contains(&base) {
        return IdentityResolution::Fresh(base);
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}#{}", base, n);
        if !set.contains(&candidate) {
            return IdentityResolution::Fresh(candidate);
        }
        n += 1;
    }
}
