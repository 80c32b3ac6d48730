//! Content shape classification.

use crate::tree::{resolve, Node};

/// The structural shape of a content item, deciding which extraction rules
/// apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Image set carrying a top-level `images` list.
    ImageAlbum,
    /// Image set carrying an `image_post_info` block.
    ImagePost,
    /// Single video; the exhaustive fallback.
    Video,
}

/// Classify an item by the presence of shape-specific sub-structures.
///
/// First match wins: `images` is checked before `image_post_info`, and
/// every item that triggers neither is a video. The ordering is a
/// behavioral contract; some items structurally satisfy both image
/// triggers.
pub fn classify(item: &Node) -> Shape {
    if resolve(item, "images")
        .and_then(Node::as_seq)
        .is_some_and(|images| !images.is_empty())
    {
        return Shape::ImageAlbum;
    }
    if resolve(item, "image_post_info").is_some_and(Node::is_truthy) {
        return Shape::ImagePost;
    }
    Shape::Video
}
