use std::path::{Path, PathBuf};

use tracing::info;

use crate::cleaning::{
    cap_outliers, clear_inverted_stays, coerce_numeric, drop_duplicates, impute, normalize_age,
    normalize_dates, normalize_gender, normalize_headers, normalize_phone, replace_sentinels,
    trim_text,
};
use crate::output;
use crate::readers::{load_table, resolve_input, SourceEncoding};
use crate::report::{CleaningReport, MissingReport};
use crate::roles::{match_columns, RoleMap};
use crate::table::Table;
use crate::types::{
    CleaningOptions, Result, Role, AFTER_REPORT_FILE, BEFORE_REPORT_FILE, SUMMARY_FILE,
};

/// Where a run reads from and writes to
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub input: PathBuf,
    pub cleaned: PathBuf,
    pub report_dir: PathBuf,
    /// Also write the JSON run summary into the report directory
    pub summary: bool,
}

/// Files written by a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: PathBuf,
    pub cleaned: PathBuf,
    pub before_report: PathBuf,
    pub after_report: PathBuf,
    pub summary: Option<PathBuf>,
    pub report: CleaningReport,
}

/// Run every cleaning stage over a freshly loaded table
pub fn clean_table(
    table: Table,
    encoding: SourceEncoding,
    options: &CleaningOptions,
) -> (Table, CleaningReport) {
    let rows_loaded = table.row_count();

    let table = normalize_headers(table);

    let (table, sentinels_replaced) = replace_sentinels(table, &options.sentinel_tokens);
    let missing_before = MissingReport::measure(&table);
    info!(
        cells = sentinels_replaced,
        missing = missing_before.total(),
        "converted sentinel tokens to missing"
    );

    let (table, duplicates_removed) = drop_duplicates(table);
    let rows_after_dedup = table.row_count();
    info!(removed = duplicates_removed, rows = rows_after_dedup, "dropped duplicate rows");

    let table = trim_text(table);

    let roles = RoleMap::detect(&table.column_names(), options);

    let (table, gender_columns) = normalize_gender(table, roles.columns(Role::Gender));
    let (table, age_columns) =
        normalize_age(table, roles.columns(Role::Age), options.min_age, options.max_age);

    let date_candidates = match_columns(&table.column_names(), &options.date_patterns);
    let (table, date_columns) = normalize_dates(table, &date_candidates);
    let (table, inverted_stays_cleared) =
        clear_inverted_stays(table, &options.admission_column, &options.discharge_column);

    let (table, phone_columns) = normalize_phone(
        table,
        roles.columns(Role::Phone),
        options.min_phone_digits,
        options.max_phone_digits,
    );
    info!(
        gender = ?gender_columns,
        age = ?age_columns,
        date = ?date_columns,
        phone = ?phone_columns,
        inverted_stays = inverted_stays_cleared,
        "normalized role columns"
    );

    let handled: Vec<String> = [&gender_columns, &age_columns, &date_columns, &phone_columns]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let (table, numeric_columns) = coerce_numeric(table, &handled, options.numeric_threshold);
    info!(columns = ?numeric_columns, "converted numeric-looking text columns");

    let (table, capped) = cap_outliers(
        table,
        &roles,
        options.iqr_multiplier,
        options.min_outlier_values,
    );
    info!(
        values = capped.iter().map(|c| c.capped).sum::<usize>(),
        columns = capped.len(),
        "capped outliers"
    );

    let (table, imputed) = impute(table, &options.text_fill);
    info!(
        values = imputed.iter().map(|c| c.filled).sum::<usize>(),
        columns = imputed.len(),
        "imputed missing values"
    );

    let missing_after = MissingReport::measure(&table);

    let report = CleaningReport {
        encoding,
        rows_loaded,
        rows_after_dedup,
        duplicates_removed,
        sentinels_replaced,
        roles,
        gender_columns,
        age_columns,
        date_columns,
        inverted_stays_cleared,
        phone_columns,
        numeric_columns,
        capped,
        imputed,
        missing_before,
        missing_after,
    };
    (table, report)
}

/// Load the raw file, clean it, and write the cleaned table and reports
pub fn run(paths: &RunPaths, options: &CleaningOptions) -> Result<RunOutput> {
    let input = resolve_input(&paths.input)?;
    let loaded = load_table(&input, &options.fallback_encoding)?;
    let (table, report) = clean_table(loaded.table, loaded.encoding, options);

    let before_report = paths.report_dir.join(BEFORE_REPORT_FILE);
    let after_report = paths.report_dir.join(AFTER_REPORT_FILE);

    output::write_table(&table, &paths.cleaned)?;
    output::write_report(&report.missing_before, &before_report)?;
    output::write_report(&report.missing_after, &after_report)?;

    let summary = if paths.summary {
        let path = paths.report_dir.join(SUMMARY_FILE);
        output::write_json_file(&report, &path)?;
        Some(path)
    } else {
        None
    };

    info!(
        cleaned = %paths.cleaned.display(),
        reports = %paths.report_dir.display(),
        "wrote cleaned table and reports"
    );

    Ok(RunOutput {
        input,
        cleaned: paths.cleaned.clone(),
        before_report,
        after_report,
        summary,
        report,
    })
}

/// Load a file and detect column roles on its normalized headers
pub fn detect_roles(input: &Path, options: &CleaningOptions) -> Result<RoleMap> {
    let input = resolve_input(input)?;
    let loaded = load_table(&input, &options.fallback_encoding)?;
    let table = normalize_headers(loaded.table);
    Ok(RoleMap::detect(&table.column_names(), options))
}
