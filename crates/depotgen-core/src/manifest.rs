use thiserror::Error;

use crate::depots::is_integer_id;

/// Manifest id written into generated packages when the caller supplies none.
pub const DEFAULT_MANIFEST_ID: &str = "8888888888888888888";

/// A validated request to generate a manifest package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRequest {
    pub app_id: String,
    pub depot_id: String,
    pub manifest_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestRequestError {
    #[error("appId and depotId are required")]
    MissingField,

    #[error("appId and depotId must be valid numbers")]
    NotNumeric,

    #[error("manifestId must be a valid number")]
    InvalidManifestId,
}

impl ManifestRequest {
    /// Validates raw request fields.
    ///
    /// `app_id` and `depot_id` must be present, non-blank and fully numeric.
    /// `manifest_id` is optional; a blank value falls back to
    /// [`DEFAULT_MANIFEST_ID`], anything else must be numeric because it is
    /// interpolated into the generated Lua script.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestRequestError`] describing the first failed check.
    pub fn validate(
        app_id: Option<&str>,
        depot_id: Option<&str>,
        manifest_id: Option<&str>,
    ) -> Result<Self, ManifestRequestError> {
        let app_id = app_id.map(str::trim).filter(|s| !s.is_empty());
        let depot_id = depot_id.map(str::trim).filter(|s| !s.is_empty());

        let (Some(app_id), Some(depot_id)) = (app_id, depot_id) else {
            return Err(ManifestRequestError::MissingField);
        };

        if !is_integer_id(app_id) || !is_integer_id(depot_id) {
            return Err(ManifestRequestError::NotNumeric);
        }

        let manifest_id = match manifest_id.map(str::trim).filter(|s| !s.is_empty()) {
            None => DEFAULT_MANIFEST_ID.to_owned(),
            Some(id) if is_integer_id(id) => id.to_owned(),
            Some(_) => return Err(ManifestRequestError::InvalidManifestId),
        };

        Ok(Self {
            app_id: app_id.to_owned(),
            depot_id: depot_id.to_owned(),
            manifest_id,
        })
    }
}
