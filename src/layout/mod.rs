//! Single-line tag layout.
//!
//! Collapsed mode shows as many whole tags as fit on one line, then cuts the
//! first tag that does not fit down to the longest prefix that still fits
//! with an ellipsis appended. Nothing after that tag is considered, even if a
//! later, shorter tag would have fit.
//!
//! Layout is a pure function of the tag slice, the container width and a
//! [`TextMeasurer`]. Hosts call it on every render, so a change of tags, mode
//! or width is picked up on the next frame.

mod measure;

use std::cell::Cell;

use tracing::trace;

use crate::tag::{Tag, TagListMode};

pub use measure::{ChipMeasurer, FixedWidthMeasurer, TextMeasurer};

/// Smallest remaining width worth drawing a truncated chip in.
pub const MIN_TRUNCATED_WIDTH: usize = 50;

/// Marker appended to a truncated tag.
pub const ELLIPSIS: &str = "...";

/// Tunables for the truncation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// A truncated chip is only produced when strictly more than this much
    /// width remains.
    pub min_truncated_width: usize,
    /// Marker appended to the kept prefix.
    pub ellipsis: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_truncated_width: MIN_TRUNCATED_WIDTH,
            ellipsis: ELLIPSIS.to_string(),
        }
    }
}

/// The tags to draw for one pass.
///
/// `visible` borrows a prefix of the caller's list, so it is always
/// contiguous and in the original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult<'a> {
    /// Tags drawn in full.
    pub visible: &'a [Tag],
    /// Shortened copy of the tag right after `visible`, if one fits.
    pub truncated_overflow: Option<Tag>,
}

impl<'a> LayoutResult<'a> {
    /// Every tag visible, nothing truncated.
    pub fn full(tags: &'a [Tag]) -> Self {
        Self {
            visible: tags,
            truncated_overflow: None,
        }
    }

    /// Whether the line ends with a truncated chip.
    pub fn is_truncated(&self) -> bool {
        self.truncated_overflow.is_some()
    }

    /// Whether nothing at all is drawn.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.truncated_overflow.is_none()
    }

    /// Chips in drawing order: the visible prefix, then the truncated tag.
    pub fn chips(&self) -> impl Iterator<Item = &Tag> + '_ {
        self.visible.iter().chain(self.truncated_overflow.as_ref())
    }
}

/// Lay out `tags` on one line of `container_width` using the default options.
pub fn compute_layout<'a, M>(
    tags: &'a [Tag],
    container_width: usize,
    measurer: &M,
) -> LayoutResult<'a>
where
    M: TextMeasurer + ?Sized,
{
    compute_layout_with(tags, container_width, measurer, &LayoutOptions::default())
}

/// Lay out `tags` on one line of `container_width`.
///
/// Whole tags are packed left to right while their measured widths fit. The
/// first tag that does not fit is binary searched for the longest prefix
/// whose `prefix + ellipsis` fits the remaining width, provided more than
/// `min_truncated_width` remains. Layout stops at that tag either way.
///
/// The measurer must be monotonic in prefix length; if it is not, the result
/// is unspecified but this function still returns.
pub fn compute_layout_with<'a, M>(
    tags: &'a [Tag],
    container_width: usize,
    measurer: &M,
    options: &LayoutOptions,
) -> LayoutResult<'a>
where
    M: TextMeasurer + ?Sized,
{
    let probe = MeasureProbe::new(measurer);
    let mut used = 0usize;

    for (index, tag) in tags.iter().enumerate() {
        let width = probe.measure(&tag.content);
        if used.saturating_add(width) <= container_width {
            used += width;
            continue;
        }

        let available = container_width - used;
        let truncated_overflow = if available > options.min_truncated_width {
            truncate_to_fit(tag, available, &probe, &options.ellipsis)
        } else {
            None
        };

        trace!(
            fitted = index,
            used,
            available,
            truncated = truncated_overflow.is_some(),
            "collapsed layout stopped at overflowing tag"
        );

        return LayoutResult {
            visible: &tags[..index],
            truncated_overflow,
        };
    }

    trace!(fitted = tags.len(), used, "collapsed layout fitted every tag");
    LayoutResult::full(tags)
}

/// Pick the tags to draw for `mode`.
///
/// Only collapsed mode runs the single-line layout; the other modes draw
/// every tag regardless of width.
pub fn layout_for_mode<'a, M>(
    tags: &'a [Tag],
    mode: TagListMode,
    container_width: usize,
    measurer: &M,
    options: &LayoutOptions,
) -> LayoutResult<'a>
where
    M: TextMeasurer + ?Sized,
{
    match mode {
        TagListMode::Collapsed => compute_layout_with(tags, container_width, measurer, options),
        TagListMode::Expanded | TagListMode::Edit => LayoutResult::full(tags),
    }
}

/// Longest `prefix + ellipsis` of `tag` measuring at most `available`.
///
/// Prefix lengths count chars, so a cut never lands inside a multi-byte
/// character.
fn truncate_to_fit<M>(
    tag: &Tag,
    available: usize,
    probe: &MeasureProbe<'_, M>,
    ellipsis: &str,
) -> Option<Tag>
where
    M: TextMeasurer + ?Sized,
{
    // Byte offset at which a prefix of `n + 1` chars ends.
    let ends: Vec<usize> = tag
        .content
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    let candidate = |len: usize| format!("{}{}", &tag.content[..ends[len - 1]], ellipsis);

    let mut low = 1usize;
    let mut high = ends.len();
    let mut best = 0usize;

    while low <= high {
        let mid = low + (high - low) / 2;
        if probe.measure(&candidate(mid)) <= available {
            best = mid;
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    (best > 0).then(|| tag.with_content(candidate(best)))
}

/// Measurement handle scoped to one layout pass.
///
/// Dropped on every exit from the pass, early returns included.
struct MeasureProbe<'m, M: ?Sized> {
    measurer: &'m M,
    measurements: Cell<usize>,
}

impl<'m, M> MeasureProbe<'m, M>
where
    M: TextMeasurer + ?Sized,
{
    fn new(measurer: &'m M) -> Self {
        Self {
            measurer,
            measurements: Cell::new(0),
        }
    }

    fn measure(&self, text: &str) -> usize {
        self.measurements.set(self.measurements.get() + 1);
        self.measurer.measure(text)
    }
}

impl<M: ?Sized> Drop for MeasureProbe<'_, M> {
    fn drop(&mut self) {
        trace!(
            measurements = self.measurements.get(),
            "measurement probe released"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 per char plus no chrome, so "short" is 40 wide.
    fn measurer() -> FixedWidthMeasurer {
        FixedWidthMeasurer::new(8, 0)
    }

    fn tags(contents: &[&str]) -> Vec<Tag> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Tag::new((i + 1).to_string(), *c))
            .collect()
    }

    const LONG: &str = "this is a very long tag that cannot fit";

    #[test]
    fn test_empty_input() {
        let input: Vec<Tag> = Vec::new();
        let result = compute_layout(&input, 200, &measurer());
        assert!(result.visible.is_empty());
        assert!(result.truncated_overflow.is_none());
        assert!(result.is_empty());
    }

    #[test]
    fn test_everything_fits() {
        let input = tags(&["a", "bb", "ccc"]);
        let result = compute_layout(&input, 1000, &measurer());
        assert_eq!(result.visible, &input[..]);
        assert!(!result.is_truncated());
    }

    #[test]
    fn test_remaining_below_floor_drops_overflow() {
        let input = tags(&["short", LONG]);
        let result = compute_layout(&input, 80, &measurer());
        assert_eq!(result.visible, &input[..1]);
        assert!(result.truncated_overflow.is_none());
    }

    #[test]
    fn test_overflow_truncated_to_longest_fitting_prefix() {
        let input = tags(&["short", LONG]);
        let m = measurer();
        let result = compute_layout(&input, 200, &m);

        assert_eq!(result.visible, &input[..1]);
        let truncated = result.truncated_overflow.expect("truncated tag");
        assert_eq!(truncated.id, "2");
        // 160 remaining / 8 per char = 20 chars, 3 of them the ellipsis.
        assert_eq!(truncated.content, "this is a very lo...");
        assert!(m.measure(&truncated.content) <= 160);
    }

    #[test]
    fn test_exactly_floor_is_rejected() {
        // 40 used, 50 remaining: the floor is exclusive.
        let input = tags(&["short", LONG]);
        let result = compute_layout(&input, 90, &measurer());
        assert_eq!(result.visible.len(), 1);
        assert!(result.truncated_overflow.is_none());
    }

    #[test]
    fn test_zero_width_fits_nothing() {
        let input = tags(&["short", "tag"]);
        let result = compute_layout(&input, 0, &measurer());
        assert!(result.is_empty());
    }

    #[test]
    fn test_oversized_first_tag_is_truncated() {
        let input = tags(&[LONG]);
        let result = compute_layout(&input, 100, &measurer());
        assert!(result.visible.is_empty());
        let truncated = result.truncated_overflow.expect("truncated tag");
        assert_eq!(truncated.content, "this is a...");
    }

    #[test]
    fn test_first_fit_then_stop() {
        // "tiny" would fit after the long tag is cut, but is never tried.
        let input = tags(&["short", LONG, "tiny"]);
        let result = compute_layout(&input, 200, &measurer());
        assert_eq!(result.visible.len(), 1);
        assert_eq!(result.truncated_overflow.map(|t| t.id), Some("2".to_string()));
    }

    #[test]
    fn test_no_prefix_fits_gives_no_truncation() {
        // Chrome alone exceeds the remaining width.
        let m = FixedWidthMeasurer::new(8, 100);
        let input = tags(&[LONG]);
        let options = LayoutOptions {
            min_truncated_width: 10,
            ..LayoutOptions::default()
        };
        let result = compute_layout_with(&input, 60, &m, &options);
        assert!(result.is_empty());
    }

    #[test]
    fn test_visible_width_never_exceeds_container() {
        let input = tags(&["alpha", "beta", "gamma", "delta", LONG, "epsilon"]);
        let m = FixedWidthMeasurer::new(7, 12);
        for width in 0..400 {
            let result = compute_layout(&input, width, &m);
            let used: usize = result.visible.iter().map(|t| m.measure(&t.content)).sum();
            assert!(used <= width, "width {width}: used {used}");
            assert_eq!(result.visible, &input[..result.visible.len()]);

            if let Some(truncated) = &result.truncated_overflow {
                let original = &input[result.visible.len()];
                assert_eq!(truncated.id, original.id);
                let prefix = truncated
                    .content
                    .strip_suffix(ELLIPSIS)
                    .expect("ends with ellipsis");
                assert!(original.content.starts_with(prefix));
                assert!(prefix.len() < original.content.len());
                assert!(used + m.measure(&truncated.content) <= width);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let input = tags(&["short", LONG, "x"]);
        let m = measurer();
        assert_eq!(
            compute_layout(&input, 200, &m),
            compute_layout(&input, 200, &m)
        );
    }

    #[test]
    fn test_non_collapsed_modes_show_everything() {
        let input = tags(&["short", LONG, "x"]);
        let options = LayoutOptions::default();
        for mode in [TagListMode::Expanded, TagListMode::Edit] {
            let result = layout_for_mode(&input, mode, 10, &measurer(), &options);
            assert_eq!(result.visible, &input[..]);
            assert!(result.truncated_overflow.is_none());
        }
        let collapsed = layout_for_mode(&input, TagListMode::Collapsed, 10, &measurer(), &options);
        assert!(collapsed.visible.is_empty());
    }

    #[test]
    fn test_multibyte_prefix_cut_on_char_boundary() {
        let input = vec![Tag::new("4", "比较长的标签内容用来测试截断效果")];
        // 2 cells per CJK char via the chip measurer, no chrome.
        let m = ChipMeasurer::new(0, 0);
        let options = LayoutOptions {
            min_truncated_width: 4,
            ..LayoutOptions::default()
        };
        let result = compute_layout_with(&input, 12, &m, &options);
        let truncated = result.truncated_overflow.expect("truncated tag");
        // 4 chars (8 cells) + "..." (3 cells) = 11 <= 12
        assert_eq!(truncated.content, "比较长的...");
    }

    #[test]
    fn test_closure_measurer_and_call_count() {
        let calls = Cell::new(0usize);
        let counting = |text: &str| {
            calls.set(calls.get() + 1);
            text.chars().count() * 8
        };
        let input = tags(&["short", LONG]);
        compute_layout(&input, 200, &counting);
        // Two fit checks plus ceil(log2(39 + 1)) = 6 search steps at most.
        assert!(calls.get() <= 2 + 6, "calls = {}", calls.get());
    }

    #[test]
    fn test_chips_iterates_visible_then_truncated() {
        let input = tags(&["short", LONG]);
        let result = compute_layout(&input, 200, &measurer());
        let ids: Vec<&str> = result.chips().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_custom_ellipsis() {
        let input = tags(&[LONG]);
        let options = LayoutOptions {
            min_truncated_width: 0,
            ellipsis: "…".to_string(),
        };
        let result = compute_layout_with(&input, 40, &measurer(), &options);
        let truncated = result.truncated_overflow.expect("truncated tag");
        assert_eq!(truncated.content, "this…");
    }
}
