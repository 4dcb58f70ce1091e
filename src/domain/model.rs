use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column order of the tabular export. Fixed regardless of field order or
/// presence in the stored responses.
pub const EXPORT_HEADERS: [&str; 12] = [
    "tn",
    "lrn",
    "ported_status",
    "ported_date",
    "ocn",
    "line_type",
    "spid",
    "spid_carrier_name",
    "spid_carrier_type",
    "altspid",
    "altspid_carrier_name",
    "altspid_carrier_type",
];

/// One lookup response, kept as the raw JSON object the service returned.
/// Fields outside the export schema are preserved on disk, not dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupRecord {
    pub fields: Map<String, Value>,
}

impl LookupRecord {
    /// The telephone number the service reported for this record.
    pub fn tn(&self) -> Option<&str> {
        self.fields.get("tn").and_then(Value::as_str)
    }

    /// Field value as export text: missing and null render empty, strings
    /// render as-is, anything else renders as its JSON text.
    pub fn field(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// One export row in [`EXPORT_HEADERS`] order, with the raw `line_type`
    /// code replaced by its label.
    pub fn export_row(&self) -> Vec<String> {
        EXPORT_HEADERS
            .iter()
            .map(|&column| {
                if column == "line_type" {
                    self.line_type_label()
                } else {
                    self.field(column)
                }
            })
            .collect()
    }

    fn line_type_label(&self) -> String {
        // Only a present code is mapped; an absent or null field exports as
        // an empty cell like every other column. The empty-string code is a
        // value the service actually sends and labels as Unknown.
        let code = match self.fields.get("line_type") {
            None | Some(Value::Null) => return String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        match LineType::from_code(&code) {
            Some(line_type) => line_type.label().to_string(),
            None => {
                tracing::warn!(
                    "Unrecognized line_type code '{}' for tn [{}], exporting empty value",
                    code,
                    self.field("tn")
                );
                String::new()
            }
        }
    }
}

/// Closed mapping of the service's numeric line-type codes. Codes outside
/// the set have no label; callers must handle that case explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Wired,
    Wireless,
    Voip,
    Unknown,
}

impl LineType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(LineType::Wired),
            "1" => Some(LineType::Wireless),
            "2" => Some(LineType::Voip),
            "" => Some(LineType::Unknown),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineType::Wired => "Wired",
            LineType::Wireless => "Wireless",
            LineType::Voip => "VOIP",
            LineType::Unknown => "Unknown",
        }
    }
}
