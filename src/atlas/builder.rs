use anyhow::Result;
use image::{RgbaImage, imageops};
use log::{info, warn};

use super::Atlas;
use crate::error::AtlasError;
use crate::packing::{Placement, ShelfPlanner};
use crate::source::{PlacedImage, SourceImage, sort_by_height};

/// Configuration for atlas building
pub struct AtlasBuilder {
    pub padding: u32,
    pub allow_unplaced: bool,
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasBuilder {
    pub fn new() -> Self {
        Self {
            padding: 1,
            allow_unplaced: false,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Log and drop images the planner could not fit instead of failing
    pub fn allow_unplaced(mut self, allow: bool) -> Self {
        self.allow_unplaced = allow;
        self
    }

    /// Sort the images tallest first, then pack and render them.
    pub fn build(&self, mut images: Vec<SourceImage>) -> Result<Atlas> {
        sort_by_height(&mut images);
        self.build_in_order(images)
    }

    /// Pack and render the images in the order given.
    ///
    /// The row height comes from the first image, so callers that skip the
    /// sort can end up with images that never fit.
    pub fn build_in_order(&self, images: Vec<SourceImage>) -> Result<Atlas> {
        let planner = ShelfPlanner::new(self.padding);
        let sizes: Vec<(u32, u32)> = images.iter().map(|i| (i.width(), i.height())).collect();
        let plan = planner.plan(&sizes)?;

        let omitted: Vec<String> = plan
            .unplaced
            .iter()
            .map(|&i| images[i].name.clone())
            .collect();

        if !omitted.is_empty() {
            if !self.allow_unplaced {
                return Err(AtlasError::UnplaceableImages {
                    names: omitted,
                    row_height: plan.height,
                }
                .into());
            }
            for name in &omitted {
                warn!(
                    "Omitting '{}': taller than the {}px row height",
                    name, plan.height
                );
            }
        }

        let mut atlas = Atlas::new(plan.width, plan.height, self.padding);
        atlas.omitted = omitted;

        for placement in &plan.placements {
            let source = &images[placement.index];
            let placed = self.blit(&planner, &mut atlas.image, source, placement)?;
            atlas.images.push(placed);
        }

        info!(
            "Atlas: {}x{} with {} images ({:.1}% efficiency)",
            atlas.width,
            atlas.height,
            atlas.images.len(),
            atlas.occupancy() * 100.0
        );

        Ok(atlas)
    }

    /// Copy one image into its cell and replicate its edges into the border.
    fn blit(
        &self,
        planner: &ShelfPlanner,
        atlas: &mut RgbaImage,
        source: &SourceImage,
        placement: &Placement,
    ) -> Result<PlacedImage, AtlasError> {
        let (w, h) = source.image.dimensions();
        let Some(cell) = planner
            .cell(placement, w, h)
            .filter(|c| c.fits_within(atlas.width(), atlas.height()))
        else {
            return Err(AtlasError::PlacementOutOfBounds {
                name: source.name.clone(),
            });
        };

        let pad = self.padding;
        let x = placement.origin.x + pad;
        let y = placement.origin.y + pad;

        imageops::replace(atlas, &source.image, i64::from(x), i64::from(y));

        if pad > 0 && w > 0 && h > 0 {
            // Sides first, so the top/bottom rows below carry the corners.
            for sy in y..y + h {
                let left = *atlas.get_pixel(x, sy);
                let right = *atlas.get_pixel(x + w - 1, sy);
                for e in 1..=pad {
                    atlas.put_pixel(x - e, sy, left);
                    atlas.put_pixel(x + w - 1 + e, sy, right);
                }
            }

            for ax in cell.x..cell.x + cell.width {
                let top = *atlas.get_pixel(ax, y);
                let bottom = *atlas.get_pixel(ax, y + h - 1);
                for e in 1..=pad {
                    atlas.put_pixel(ax, y - e, top);
                    atlas.put_pixel(ax, y + h - 1 + e, bottom);
                }
            }
        }

        Ok(PlacedImage {
            id: source.id,
            name: source.name.clone(),
            x,
            y,
            width: w,
            height: h,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Image whose every pixel is unique, so misplaced copies show up
    fn gradient(id: usize, width: u32, height: u32) -> SourceImage {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 + id as u32) as u8, (y * 13) as u8, id as u8 * 40, 255])
        });
        SourceImage {
            id,
            name: format!("img_{}.png", id),
            image,
        }
    }

    fn test_images() -> Vec<SourceImage> {
        let sizes = [(5, 3), (8, 12), (3, 3), (10, 6), (4, 12), (1, 1), (7, 2)];
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| gradient(i, w, h))
            .collect()
    }

    fn source_by_id(images: &[SourceImage], id: usize) -> &SourceImage {
        images.iter().find(|i| i.id == id).unwrap()
    }

    #[test]
    fn test_single_image_boundary() {
        let atlas = AtlasBuilder::new()
            .padding(1)
            .build(vec![gradient(0, 2, 2)])
            .unwrap();

        assert_eq!((atlas.width, atlas.height), (4, 4));
        assert_eq!(
            atlas.images,
            vec![PlacedImage {
                id: 0,
                name: "img_0.png".to_string(),
                x: 1,
                y: 1,
                width: 2,
                height: 2,
            }]
        );
    }

    #[test]
    fn test_power_of_two_dimensions() {
        for padding in [0, 1, 2] {
            let atlas = AtlasBuilder::new()
                .padding(padding)
                .build(test_images())
                .unwrap();

            assert!(atlas.width.is_power_of_two());
            assert!(atlas.height.is_power_of_two());
            assert_eq!(atlas.image.dimensions(), (atlas.width, atlas.height));
            assert_eq!(atlas.images.len(), 7);
        }
    }

    #[test]
    fn test_crop_reproduces_source() {
        let sources = test_images();
        for padding in [0, 1, 3] {
            let atlas = AtlasBuilder::new()
                .padding(padding)
                .build(sources.clone())
                .unwrap();

            for placed in &atlas.images {
                let crop =
                    imageops::crop_imm(&atlas.image, placed.x, placed.y, placed.width, placed.height)
                        .to_image();
                assert_eq!(crop, source_by_id(&sources, placed.id).image);
            }
        }
    }

    #[test]
    fn test_border_replicates_edges() {
        let sources = test_images();
        let pad = 2;
        let atlas = AtlasBuilder::new()
            .padding(pad)
            .build(sources.clone())
            .unwrap();

        for placed in &atlas.images {
            let src = &source_by_id(&sources, placed.id).image;
            let (x, y, w, h) = (placed.x, placed.y, placed.width, placed.height);

            for e in 1..=pad {
                for sy in 0..h {
                    assert_eq!(atlas.image.get_pixel(x - e, y + sy), src.get_pixel(0, sy));
                    assert_eq!(
                        atlas.image.get_pixel(x + w - 1 + e, y + sy),
                        src.get_pixel(w - 1, sy)
                    );
                }
                for sx in 0..w {
                    assert_eq!(atlas.image.get_pixel(x + sx, y - e), src.get_pixel(sx, 0));
                    assert_eq!(
                        atlas.image.get_pixel(x + sx, y + h - 1 + e),
                        src.get_pixel(sx, h - 1)
                    );
                }
            }

            // Diagonal corners take the matching corner pixel
            assert_eq!(atlas.image.get_pixel(x - pad, y - pad), src.get_pixel(0, 0));
            assert_eq!(
                atlas.image.get_pixel(x + w - 1 + pad, y - pad),
                src.get_pixel(w - 1, 0)
            );
            assert_eq!(
                atlas.image.get_pixel(x - pad, y + h - 1 + pad),
                src.get_pixel(0, h - 1)
            );
            assert_eq!(
                atlas.image.get_pixel(x + w - 1 + pad, y + h - 1 + pad),
                src.get_pixel(w - 1, h - 1)
            );
        }
    }

    #[test]
    fn test_zero_padding_touches_nothing_outside_content() {
        let atlas = AtlasBuilder::new()
            .padding(0)
            .build(vec![gradient(0, 3, 4)])
            .unwrap();

        assert_eq!((atlas.width, atlas.height), (4, 4));
        // Column 3 is never written and stays at the default transparent black
        for y in 0..4 {
            assert_eq!(*atlas.image.get_pixel(3, y), Rgba([0, 0, 0, 0]));
        }
    }

    #[test]
    fn test_builds_are_deterministic() {
        let a = AtlasBuilder::new().build(test_images()).unwrap();
        let b = AtlasBuilder::new().build(test_images()).unwrap();

        assert_eq!(a.images, b.images);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn test_unplaceable_image_is_an_error_by_default() {
        let images = vec![gradient(0, 4, 4), gradient(1, 4, 20), gradient(2, 4, 2)];
        let err = AtlasBuilder::new().build_in_order(images).unwrap_err();

        match err.downcast_ref::<AtlasError>() {
            Some(AtlasError::UnplaceableImages { names, row_height }) => {
                assert_eq!(names, &vec!["img_1.png".to_string()]);
                assert_eq!(*row_height, 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unplaceable_image_can_be_omitted() {
        let images = vec![gradient(0, 4, 4), gradient(1, 4, 20), gradient(2, 4, 2)];
        let atlas = AtlasBuilder::new()
            .allow_unplaced(true)
            .build_in_order(images)
            .unwrap();

        assert_eq!(atlas.omitted, vec!["img_1.png".to_string()]);
        let ids: Vec<usize> = atlas.images.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_huge_padding_is_an_error() {
        let err = AtlasBuilder::new()
            .padding(3_000_000_000)
            .build(vec![gradient(0, 2, 2)])
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AtlasError>(),
            Some(AtlasError::AtlasTooLarge { .. })
        ));
    }

    #[test]
    fn test_sorting_avoids_unplaceable_images() {
        let images = vec![gradient(0, 4, 4), gradient(1, 4, 20), gradient(2, 4, 2)];
        let atlas = AtlasBuilder::new().build(images).unwrap();

        assert!(atlas.omitted.is_empty());
        assert_eq!(atlas.images.len(), 3);
    }
}
