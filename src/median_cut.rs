//! Median-cut color quantization.
//!
//! A bucket of pixels is sorted along its widest channel and cut in half at the
//! median index, recursively, until each branch has used up its share of the
//! requested palette size. Every leaf bucket is then reduced to its average.
//!
//! All buckets live in one buffer: a split hands two disjoint sub-slices of the
//! parent to the recursive calls, so nothing is copied or allocated per level.

use std::ops::Range;

use log::{debug, trace};

use crate::color::{Channel, Color, Pixel};
use crate::error::{PaletteError, Result};

/// Requested palette sizes above this are silently capped.
pub const MAX_COLORS: usize = 16;

/// Palette size used when the caller does not ask for one.
pub const DEFAULT_COLORS: usize = 1;

/// Extract up to `n` representative colors from `pixels`.
///
/// `n` is capped at [`MAX_COLORS`]. Because every split hands both halves the
/// same halved budget, the palette holds `2^floor(log2(n))` colors, not `n`:
/// asking for 5 yields 4. Buckets of a single pixel are never split, so a
/// palette is also never longer than `pixels`. An empty input yields an empty
/// palette.
///
/// Colors are returned in split order (left half before right half), which
/// says nothing about how dominant each color is.
pub fn quantize(pixels: &[Pixel], n: usize) -> Result<Vec<Color>> {
    let mut buffer = pixels.to_vec();
    quantize_in_place(&mut buffer, n)
}

/// Same as [`quantize`], but reorders `pixels` instead of copying them.
pub fn quantize_in_place(pixels: &mut [Pixel], n: usize) -> Result<Vec<Color>> {
    let leaves = partition(pixels, n)?;
    Ok(leaves
        .into_iter()
        .filter_map(|range| average(&pixels[range]))
        .collect())
}

/// Run the recursive splitting and return the leaf buckets as index ranges
/// into the reordered `pixels`, in split order.
///
/// The ranges are non-empty and tile `0..pixels.len()` exactly.
pub fn partition(pixels: &mut [Pixel], n: usize) -> Result<Vec<Range<usize>>> {
    if n < 1 {
        return Err(PaletteError::InvalidArgument { n });
    }
    let n = n.min(MAX_COLORS);
    debug!("median cut over {} pixels, n = {n}", pixels.len());

    let mut leaves = Vec::with_capacity(n);
    if !pixels.is_empty() {
        cut(pixels, 0, n as f64, &mut leaves);
    }
    Ok(leaves)
}

fn cut(bucket: &mut [Pixel], offset: usize, n: f64, leaves: &mut Vec<Range<usize>>) {
    // log2(n) is the number of cuts still owed to this branch.
    if n.log2() < 1.0 || bucket.len() < 2 {
        leaves.push(offset..offset + bucket.len());
        return;
    }

    let channel = select_widest_channel(bucket);
    sort_by_channel(bucket, channel);
    let (left, right) = split_bucket(bucket);
    trace!(
        "split {}..{} on {channel:?} into {} + {}",
        offset,
        offset + left.len() + right.len(),
        left.len(),
        right.len()
    );

    let mid = offset + left.len();
    cut(left, offset, n / 2.0, leaves);
    cut(right, mid, n / 2.0, leaves);
}

/// Split a bucket at `len / 2`; the left half gets the smaller share.
#[inline]
pub fn split_bucket(bucket: &mut [Pixel]) -> (&mut [Pixel], &mut [Pixel]) {
    let mid = bucket.len() / 2;
    bucket.split_at_mut(mid)
}

/// `max - min` of each channel over `pixels`, indexed R, G, B.
///
/// Both bounds start from the first pixel. An empty slice has no spread.
pub fn channel_ranges(pixels: &[Pixel]) -> [u8; 3] {
    let Some(first) = pixels.first() else {
        return [0; 3];
    };

    let mut min = [first.r, first.g, first.b];
    let mut max = min;
    for pixel in &pixels[1..] {
        for channel in Channel::ALL {
            let i = channel.index();
            let v = channel.of(pixel);
            min[i] = min[i].min(v);
            max[i] = max[i].max(v);
        }
    }

    [max[0] - min[0], max[1] - min[1], max[2] - min[2]]
}

/// The channel with the largest spread; ties go to R, then G, then B.
pub fn select_widest_channel(pixels: &[Pixel]) -> Channel {
    let ranges = channel_ranges(pixels);
    let mut widest = Channel::R;
    for channel in [Channel::G, Channel::B] {
        if ranges[channel.index()] > ranges[widest.index()] {
            widest = channel;
        }
    }
    widest
}

/// Sort ascending by one channel. Order among equal values is unspecified.
#[inline]
pub fn sort_by_channel(pixels: &mut [Pixel], channel: Channel) {
    pixels.sort_unstable_by_key(|p| channel.of(p));
}

/// Channel-wise mean, rounded half away from zero. `None` for an empty bucket.
pub fn average(pixels: &[Pixel]) -> Option<Color> {
    if pixels.is_empty() {
        return None;
    }

    let len = pixels.len() as u64;
    let mut sum = [0u64; 3];
    for p in pixels {
        sum[0] += u64::from(p.r);
        sum[1] += u64::from(p.g);
        sum[2] += u64::from(p.b);
    }

    // Every term is non-negative, so adding half the divisor rounds halves up.
    let mean = |s: u64| ((s + len / 2) / len) as u8;
    Some(Color::new(mean(sum[0]), mean(sum[1]), mean(sum[2])))
}
