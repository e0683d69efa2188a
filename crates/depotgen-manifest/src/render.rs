use chrono::{DateTime, SecondsFormat, Utc};
use depotgen_core::ManifestRequest;

/// All-zero depot decryption key written into every script.
pub const DEPOT_KEY_PLACEHOLDER: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Renders the Lua depot script for `request`.
///
/// Ids are interpolated verbatim; [`ManifestRequest::validate`] only lets
/// through unsigned digit strings, which are valid Lua numerals.
#[must_use]
pub fn render_lua_script(request: &ManifestRequest) -> String {
    format!(
        "-- Generated by Steam Manifest Generator\n\
         appid = {app_id}\n\
         depots = {{\n\
         \x20   [{depot_id}] = {{\n\
         \x20       [\"manifest\"] = \"{manifest_id}\",\n\
         \x20       [\"key\"] = \"{key}\",\n\
         \x20       [\"target\"] = \"default\",\n\
         \x20   }},\n\
         }}\n",
        app_id = request.app_id,
        depot_id = request.depot_id,
        manifest_id = request.manifest_id,
        key = DEPOT_KEY_PLACEHOLDER,
    )
}

/// Renders the text stand-in for a depot manifest.
#[must_use]
pub fn render_placeholder_manifest(request: &ManifestRequest, generated_at: DateTime<Utc>) -> String {
    format!(
        "Fake Manifest Content for App {app_id} - Depot {depot_id}\n\
         Manifest ID: {manifest_id}\n\
         Generated at: {generated_at}\n\
         \n\
         This is a placeholder manifest file for testing purposes.\n\
         In a real implementation, this would contain the actual Steam manifest data.",
        app_id = request.app_id,
        depot_id = request.depot_id,
        manifest_id = request.manifest_id,
        generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn request(manifest_id: Option<&str>) -> ManifestRequest {
        ManifestRequest::validate(Some("440"), Some("441"), manifest_id).expect("valid request")
    }

    #[test]
    fn lua_script_matches_expected_layout() {
        let script = render_lua_script(&request(Some("12345")));
        let expected = "-- Generated by Steam Manifest Generator\n\
appid = 440\n\
depots = {\n    [441] = {\n        [\"manifest\"] = \"12345\",\n        \
[\"key\"] = \"0000000000000000000000000000000000000000000000000000000000000000\",\n        \
[\"target\"] = \"default\",\n    },\n}\n";
        assert_eq!(script, expected);
    }

    #[test]
    fn lua_script_uses_default_manifest_id() {
        let script = render_lua_script(&request(None));
        assert!(script.contains("[\"manifest\"] = \"8888888888888888888\""));
    }

    #[test]
    fn placeholder_manifest_stamps_generation_time() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let text = render_placeholder_manifest(&request(None), at);
        assert!(text.starts_with("Fake Manifest Content for App 440 - Depot 441\n"));
        assert!(text.contains("Manifest ID: 8888888888888888888\n"));
        assert!(text.contains("Generated at: 2025-01-02T03:04:05.000Z\n"));
    }
}
