//! Image probing utilities

use std::path::Path;

use crate::assets::AssetError;

/// Read the pixel dimensions of an image file without decoding the pixels
pub fn probe_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32), AssetError> {
    let path_ref = path.as_ref();
    if !path_ref.is_file() {
        return Err(AssetError::NotFound(path_ref.to_path_buf()));
    }

    let (width, height) = image::image_dimensions(path_ref)
        .map_err(|e| AssetError::LoadFailed(format!("Failed to read image: {}", e)))?;

    log::debug!("Probed image {}x{} from {:?}", width, height, path_ref);
    Ok((width, height))
}
