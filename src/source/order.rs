use super::SourceImage;

/// Order images tallest first; equal heights keep their load order.
pub fn sort_by_height(images: &mut [SourceImage]) {
    // sort_by is stable
    images.sort_by(|a, b| b.height().cmp(&a.height()));
}
