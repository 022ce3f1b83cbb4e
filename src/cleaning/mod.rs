pub mod dates;
pub mod dedup;
pub mod headers;
pub mod impute;
pub mod normalize;
pub mod numeric;
pub mod outliers;
pub mod sentinels;

pub use dates::{clear_inverted_stays, normalize_dates};
pub use dedup::drop_duplicates;
pub use headers::normalize_headers;
pub use impute::{impute, ImputedColumn};
pub use normalize::{normalize_age, normalize_gender, normalize_phone, trim_text};
pub use numeric::coerce_numeric;
pub use outliers::{cap_outliers, CappedColumn};
pub use sentinels::replace_sentinels;
