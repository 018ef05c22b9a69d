use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Spreadsheet read at startup and by `load` when no `--file` is given
    #[serde(default = "default_source_path")]
    pub source_path: String,
    #[serde(default = "default_load_on_startup")]
    pub load_on_startup: bool,
    /// Worksheet to read from workbook sources. The first sheet is used when unset.
    #[serde(default)]
    pub sheet: Option<String>,
}

fn default_source_path() -> String {
    "data/excel_fil.xlsx".to_string()
}

fn default_load_on_startup() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            load_on_startup: default_load_on_startup(),
            sheet: None,
        }
    }
}
