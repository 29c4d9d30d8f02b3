use crate::application::read_models::ReportReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for machine-readable output
///
/// Serializes the read model as pretty-printed JSON. Tree lines keep their
/// depth and marker; drawing hints are left out.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &ReportReadModel) -> Result<String> {
        let mut json = serde_json::to_string_pretty(model)?;
        json.push('\n');
        Ok(json)
    }
}
