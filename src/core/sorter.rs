use crate::core::{DateKey, PhotoRecord, YearPhotoSet};
use crate::utils::error::{PageError, Result};

/// Keys photos by capture day. A later photo on a day already seen replaces
/// the earlier one; every replacement is logged.
pub fn group_by_date(photos: Vec<PhotoRecord>) -> Result<YearPhotoSet> {
    let mut set = YearPhotoSet::new();

    for photo in photos {
        let key = DateKey::parse(&photo.date_taken).map_err(|source| {
            PageError::DateParseError {
                photo_id: photo.id.clone(),
                value: photo.date_taken.clone(),
                source,
            }
        })?;

        let id = photo.id.clone();
        if let Some(replaced) = set.insert(key.clone(), photo) {
            tracing::warn!(
                "Photo {} replaces photo {} taken the same day ({})",
                id,
                replaced.id,
                key
            );
        }
    }

    Ok(set)
}

/// One photo per capture day, newest day first.
pub fn group_and_sort(photos: Vec<PhotoRecord>) -> Result<Vec<PhotoRecord>> {
    let received = photos.len();
    let set = group_by_date(photos)?;
    tracing::info!("Found {} photos ({} received).", set.len(), received);
    Ok(set.into_photos())
}
