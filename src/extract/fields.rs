//! The fixed field-extraction pipeline.
//!
//! Each item runs through the same ordered steps: identity, description,
//! shape dispatch, author identity, music, statistics, tags, dimensions.
//! No step may fail; every miss writes the field's default and moves on,
//! so one malformed item can never poison a batch.

use chrono::{Local, TimeZone};

use super::classify::{classify, Shape};
use super::context::ExtractionContext;
use super::record::OutputRecord;
use crate::clean::TextCleaner;
use crate::tree::{resolve, resolve_i64, resolve_str, Node};

/// Platform truncation boundary: a `desc` at or past this length has been
/// cut short and the shareable long description holds the full text.
const SHORT_DESC_LIMIT: usize = 107;

/// Nickname used when an item's author block carries none.
pub const DEACTIVATED_ACCOUNT: &str = "deactivated account";

/// Nickname used when cleaning leaves nothing usable.
pub const INVALID_NICKNAME: &str = "invalid nickname";

/// Statistics counters copied under the item's `statistics` block.
const STATISTIC_KEYS: [&str; 4] = [
    "digg_count",
    "comment_count",
    "collect_count",
    "share_count",
];

/// Tag slots in the flat record.
const TAG_SLOTS: [&str; 3] = ["tag_1", "tag_2", "tag_3"];

/// Extract one item into a flat record.
pub fn extract_item(cx: &ExtractionContext, cleaner: &TextCleaner, item: &Node) -> OutputRecord {
    let mut record = OutputRecord::new();
    record.set("collection_time", cx.collection_time.clone());
    extract_work_info(cx, cleaner, item, &mut record);
    extract_author(cx, cleaner, item, &mut record);
    extract_music(item, &mut record);
    extract_statistics(item, &mut record);
    extract_tags(item, &mut record);
    extract_dimensions(item, &mut record);
    record
}

/// Identity, description, timestamps, and the shape-specific media fields.
fn extract_work_info(
    cx: &ExtractionContext,
    cleaner: &TextCleaner,
    item: &Node,
    record: &mut OutputRecord,
) {
    let id = resolve_str(item, "aweme_id", "");
    let desc = cleaner.clear_spaces(&cleaner.filter(&description(item)));
    record.set("desc", if desc.is_empty() { id.clone() } else { desc });
    record.set("id", id);
    record.set("create_time", format_create_time(&cx.date_format, item));
    match resolve_i64(item, "create_time") {
        Some(ts) => record.set("create_timestamp", ts),
        None => record.set("create_timestamp", ""),
    }
    extract_shape(item, record);
}

/// Pick the description text, preferring the short `desc` field.
///
/// A missing `desc`, or one at the platform truncation boundary, falls
/// back to the longer shareable text, which carries a
/// `"<prefix>  <text>  %s<suffix>"` layout: drop the two-space-delimited
/// prefix, cut at the `  %s` template marker, and tighten `"# "` topic
/// markers.
fn description(item: &Node) -> String {
    let desc = resolve_str(item, "desc", "");
    if !desc.is_empty() && desc.chars().count() < SHORT_DESC_LIMIT {
        return desc;
    }
    let long = resolve_str(item, "share_info.share_link_desc", "");
    let tail = match long.split_once("  ") {
        Some((_, rest)) => rest,
        None => long.as_str(),
    };
    let head = match tail.split_once("  %s") {
        Some((head, _)) => head,
        None => tail,
    };
    head.replace("# ", "#")
}

/// Render the creation epoch with the batch's date format.
///
/// A missing or zero epoch renders the current local time, matching the
/// collection-stamp convention.
fn format_create_time(date_format: &str, item: &Node) -> String {
    let when = resolve_i64(item, "create_time")
        .filter(|ts| *ts != 0)
        .and_then(|ts| Local.timestamp_opt(ts, 0).single())
        .unwrap_or_else(Local::now);
    when.format(date_format).to_string()
}

/// Shape dispatch: media type, download URLs, and cover images.
fn extract_shape(item: &Node, record: &mut OutputRecord) {
    match classify(item) {
        Shape::ImageAlbum => {
            record.set("type", "image-set");
            record.set("downloads", join_image_urls(item, "images", "url_list[-1]"));
            set_covers(item, record, false);
        }
        Shape::ImagePost => {
            record.set("type", "image-set");
            record.set(
                "downloads",
                join_image_urls(item, "image_post_info.images", "display_image.url_list[-1]"),
            );
            set_covers(item, record, false);
        }
        Shape::Video => {
            record.set("type", "video");
            record.set(
                "downloads",
                resolve_str(item, "video.play_addr.url_list[-1]", ""),
            );
            set_covers(item, record, true);
        }
    }
}

/// Space-join the terminal URL of every image under `images_path`.
fn join_image_urls(item: &Node, images_path: &str, url_path: &str) -> String {
    resolve(item, images_path)
        .and_then(Node::as_seq)
        .map(|images| {
            images
                .iter()
                .map(|image| resolve_str(image, url_path, ""))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Galleries have no single cover; both fields stay empty for them.
fn set_covers(item: &Node, record: &mut OutputRecord, has_cover: bool) {
    if has_cover {
        record.set(
            "dynamic_cover",
            resolve_str(item, "video.dynamic_cover.url_list[-1]", ""),
        );
        record.set(
            "origin_cover",
            resolve_str(item, "video.origin_cover.url_list[-1]", ""),
        );
    } else {
        record.set("dynamic_cover", "");
        record.set("origin_cover", "");
    }
}

/// `height`/`width`/`ratio` from the video block; empty for galleries.
fn extract_dimensions(item: &Node, record: &mut OutputRecord) {
    record.set("height", resolve_str(item, "video.height", ""));
    record.set("width", resolve_str(item, "video.width", ""));
    record.set("ratio", resolve_str(item, "video.ratio", ""));
}

/// Music metadata; all three fields empty when the block is absent.
fn extract_music(item: &Node, record: &mut OutputRecord) {
    let music = resolve(item, "music").filter(|m| m.is_truthy());
    match music {
        Some(music) => {
            record.set("music_author", resolve_str(music, "author", ""));
            record.set("music_title", resolve_str(music, "title", ""));
            // The terminal play URL is not always downloadable.
            record.set("music_url", resolve_str(music, "play_url.url_list[-1]", ""));
        }
        None => {
            record.set("music_author", "");
            record.set("music_title", "");
            record.set("music_url", "");
        }
    }
}

/// Engagement counters, stringified for uniform downstream handling.
///
/// An absent `statistics` block yields `""` for every counter; a present
/// counter of zero yields `"0"`, so the two stay distinguishable.
fn extract_statistics(item: &Node, record: &mut OutputRecord) {
    let stats = resolve(item, "statistics");
    for key in STATISTIC_KEYS {
        let value = stats
            .map(|stats| resolve_str(stats, key, ""))
            .unwrap_or_default();
        record.set(key, value);
    }
}

/// Up to three tag names, always exactly three slots, empty-padded.
fn extract_tags(item: &Node, record: &mut OutputRecord) {
    let tags = resolve(item, "video_tag").and_then(Node::as_seq);
    for (slot, idx) in TAG_SLOTS.iter().zip(0..) {
        let value = tags
            .and_then(|tags| tags.get(idx))
            .map(|tag| resolve_str(tag, "tag_name", ""))
            .unwrap_or_default();
        record.set(*slot, value);
    }
}

/// Author identity and the mode-dependent nickname/mark pair.
fn extract_author(
    cx: &ExtractionContext,
    cleaner: &TextCleaner,
    item: &Node,
    record: &mut OutputRecord,
) {
    let author = resolve(item, "author");
    for key in ["uid", "sec_uid", "short_id", "unique_id", "signature"] {
        let value = author
            .map(|author| resolve_str(author, key, ""))
            .unwrap_or_default();
        record.set(key, value);
    }

    if cx.post {
        record.set("nickname", cx.nickname.clone());
        let mark = if cx.mark.is_empty() {
            cx.nickname.clone()
        } else {
            cx.mark.clone()
        };
        record.set("mark", mark);
    } else {
        let raw = author
            .map(|author| resolve_str(author, "nickname", DEACTIVATED_ACCOUNT))
            .unwrap_or_else(|| DEACTIVATED_ACCOUNT.to_string());
        let nickname = cleaner.clean_name(&raw, false, INVALID_NICKNAME);
        record.set("nickname", nickname.clone());
        record.set("mark", nickname);
    }
}
