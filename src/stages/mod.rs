pub mod stage0_labels;
pub mod stage1_segment;
pub mod stage2_interjections;
pub mod stage3_render;

pub use stage0_labels::*;
pub use stage1_segment::*;
pub use stage2_interjections::*;
pub use stage3_render::*;

/// Escaped regex alternation over `items`, longest first, duplicates removed
///
/// Returns `None` when there is nothing to match.
pub(crate) fn longest_first_alternation<'a>(items: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut items: Vec<&str> = items.into_iter().filter(|s| !s.is_empty()).collect();
    if items.is_empty() {
        return None;
    }
    items.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    items.dedup();
    Some(
        items
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|"),
    )
}
