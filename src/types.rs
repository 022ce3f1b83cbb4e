use serde::{Deserialize, Serialize};

/// Default sentinel tokens (compared after trimming and lowercasing)
pub const DEFAULT_SENTINEL_TOKENS: &[&str] =
    &["", "n/a", "na", "none", "null", "unknown", "?", "??", "-"];

/// Plausible age range in years (inclusive)
pub const DEFAULT_MIN_AGE: f64 = 0.0;
pub const DEFAULT_MAX_AGE: f64 = 120.0;

/// Accepted phone number length in digits (inclusive)
pub const DEFAULT_MIN_PHONE_DIGITS: usize = 10;
pub const DEFAULT_MAX_PHONE_DIGITS: usize = 15;

/// Share of non-missing values that must parse before a text column becomes numeric
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.70;

/// Tukey fence multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Literal written into missing text cells
pub const DEFAULT_TEXT_FILL: &str = "unknown";

/// Encoding label tried when the input is not valid UTF-8
pub const DEFAULT_FALLBACK_ENCODING: &str = "latin1";

pub const DEFAULT_RAW_PATH: &str = "data/raw";
pub const DEFAULT_CLEANED_PATH: &str = "data/cleaned/hospital_records_cleaned.csv";
pub const DEFAULT_REPORT_DIR: &str = "reports";

pub const BEFORE_REPORT_FILE: &str = "missing_report_before.csv";
pub const AFTER_REPORT_FILE: &str = "missing_report_after.csv";
pub const SUMMARY_FILE: &str = "cleaning_summary.json";

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    Text,
    Numeric,
    Temporal,
}

/// Semantic role of a column, guessed from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Identifier,
    Name,
    Gender,
    Age,
    Date,
    Phone,
    Monetary,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Identifier,
        Role::Name,
        Role::Gender,
        Role::Age,
        Role::Date,
        Role::Phone,
        Role::Monetary,
    ];
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" | "txt" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            _ => None,
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Substring patterns used to detect each role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolePatterns {
    pub identifier: Vec<String>,
    pub name: Vec<String>,
    pub gender: Vec<String>,
    pub age: Vec<String>,
    pub date: Vec<String>,
    pub phone: Vec<String>,
    pub monetary: Vec<String>,
}

impl RolePatterns {
    pub fn get(&self, role: Role) -> &[String] {
        match role {
            Role::Identifier => &self.identifier,
            Role::Name => &self.name,
            Role::Gender => &self.gender,
            Role::Age => &self.age,
            Role::Date => &self.date,
            Role::Phone => &self.phone,
            Role::Monetary => &self.monetary,
        }
    }
}

impl Default for RolePatterns {
    fn default() -> Self {
        Self {
            identifier: strings(&["id"]),
            name: strings(&["name", "patient"]),
            gender: strings(&["gender", "sex"]),
            age: strings(&["age"]),
            date: strings(&["date", "admission", "discharge", "dob"]),
            phone: strings(&["phone", "mobile", "contact"]),
            monetary: strings(&["bill", "cost", "charge", "amount", "price", "payment"]),
        }
    }
}

/// Explicit column lists that replace detection for a role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleAssignments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monetary: Option<Vec<String>>,
}

impl RoleAssignments {
    pub fn get(&self, role: Role) -> Option<&[String]> {
        let columns = match role {
            Role::Identifier => &self.identifier,
            Role::Name => &self.name,
            Role::Gender => &self.gender,
            Role::Age => &self.age,
            Role::Date => &self.date,
            Role::Phone => &self.phone,
            Role::Monetary => &self.monetary,
        };
        columns.as_deref()
    }
}

/// Tunables for every cleaning stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Tokens treated as missing, matched case-insensitively after trimming
    pub sentinel_tokens: Vec<String>,

    pub min_age: f64,
    pub max_age: f64,

    pub min_phone_digits: usize,
    pub max_phone_digits: usize,

    /// Fraction of parseable values required to convert a text column
    pub numeric_threshold: f64,

    pub iqr_multiplier: f64,

    /// Columns with fewer non-missing values are not capped
    pub min_outlier_values: usize,

    /// Literal used to fill missing text cells
    pub text_fill: String,

    /// Encoding label (WHATWG) used when UTF-8 decoding fails
    pub fallback_encoding: String,

    pub role_patterns: RolePatterns,

    /// Manual role assignments, replacing detection for the listed roles
    pub role_columns: RoleAssignments,

    /// Substrings that mark a column for date parsing
    pub date_patterns: Vec<String>,

    /// Column pair checked for discharge-before-admission rows
    pub admission_column: String,
    pub discharge_column: String,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            sentinel_tokens: strings(DEFAULT_SENTINEL_TOKENS),
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
            max_phone_digits: DEFAULT_MAX_PHONE_DIGITS,
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            min_outlier_values: 1,
            text_fill: DEFAULT_TEXT_FILL.to_string(),
            fallback_encoding: DEFAULT_FALLBACK_ENCODING.to_string(),
            role_patterns: RolePatterns::default(),
            role_columns: RoleAssignments::default(),
            date_patterns: strings(&["date", "admission", "discharge", "dob"]),
            admission_column: "admission_date".to_string(),
            discharge_column: "discharge_date".to_string(),
        }
    }
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
