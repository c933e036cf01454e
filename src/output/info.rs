use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::atlas::Atlas;
use crate::error::AtlasError;
use crate::source::PlacedImage;

/// Field separator in `atlasInfo.txt`
pub const INFO_DELIMITER: char = ';';

/// Render one `name;x;y;width;height` line per image, in placement order.
///
/// `x`/`y` are the content origin (padding already added); width and height
/// are unpadded. There is no header.
pub fn format_info(images: &[PlacedImage]) -> Result<String, AtlasError> {
    let mut out = String::new();

    for image in images {
        if image
            .name
            .contains(|c: char| c == INFO_DELIMITER || c == '\n' || c == '\r')
        {
            return Err(AtlasError::InvalidName {
                name: image.name.clone(),
            });
        }

        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "{name}{d}{x}{d}{y}{d}{w}{d}{h}",
            name = image.name,
            d = INFO_DELIMITER,
            x = image.x,
            y = image.y,
            w = image.width,
            h = image.height,
        );
    }

    Ok(out)
}

/// Write the placement metadata for `atlas` to `path`
pub fn write_info(atlas: &Atlas, path: &Path) -> Result<()> {
    let content = format_info(&atlas.images)?;

    fs::write(path, content).map_err(|e| AtlasError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(name: &str, x: u32, y: u32, width: u32, height: u32) -> PlacedImage {
        PlacedImage {
            id: 0,
            name: name.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_single_line() {
        let text = format_info(&[placed("hero.png", 1, 1, 2, 2)]).unwrap();
        assert_eq!(text, "hero.png;1;1;2;2\n");
    }

    #[test]
    fn test_lines_follow_given_order() {
        let images = [
            placed("tall.png", 1, 1, 10, 64),
            placed("mid.png", 1, 67, 10, 32),
            placed("short.png", 1, 101, 10, 16),
        ];
        let text = format_info(&images).unwrap();

        assert_eq!(
            text,
            "tall.png;1;1;10;64\nmid.png;1;67;10;32\nshort.png;1;101;10;16\n"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_info(&[]).unwrap(), "");
    }

    #[test]
    fn test_delimiter_in_name_is_rejected() {
        let err = format_info(&[placed("a;b.png", 0, 0, 1, 1)]).unwrap_err();
        assert!(matches!(err, AtlasError::InvalidName { name } if name == "a;b.png"));
    }

    #[test]
    fn test_newline_in_name_is_rejected() {
        let result = format_info(&[placed("a\nb.png", 0, 0, 1, 1)]);
        assert!(matches!(result, Err(AtlasError::InvalidName { .. })));
    }
}
