//! Per-session state.
//!
//! A [`Session`] holds one [`FileSession`] per uploaded file name, in upload
//! order. Every user command goes through the session, which applies it to
//! the right file, logs it, and queues a notification. A failure on one file
//! never touches the others.

use crate::data::{
    self, Archive, ChartOptions, ChartSpec, DataError, DataResult, ProcessedFile, Transform,
    TransformReport, UploadedFile,
};
use crate::notifications::{Toast, ToastManager};
use crate::settings::Settings;
use crate::types::{ChartSelection, FileFormat, Table, Theme};

/// Format a byte count the way the preview header shows it, e.g. `12.34 KB`
pub fn format_file_size(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// State for one uploaded file
#[derive(Clone, Debug)]
pub struct FileSession {
    name: String,
    size: usize,
    source_format: FileFormat,
    /// Table as parsed, before any transform
    pristine: Table,
    /// Table with every applied transform
    table: Table,
    /// Transforms applied so far, in order
    applied: Vec<Transform>,
    lowercase: bool,
    chart: Option<ChartSelection>,
    export_format: FileFormat,
    last_export: Option<ProcessedFile>,
}

impl FileSession {
    fn new(name: String, size: usize, source_format: FileFormat, table: Table, export_format: FileFormat) -> Self {
        Self {
            name,
            size,
            source_format,
            pristine: table.clone(),
            table,
            applied: Vec::new(),
            lowercase: false,
            chart: None,
            export_format,
            last_export: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upload size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }

    pub fn source_format(&self) -> FileFormat {
        self.source_format
    }

    /// Current table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// First `rows` rows of the current table
    pub fn preview(&self, rows: usize) -> Table {
        self.table.head(rows)
    }

    pub fn applied_transforms(&self) -> &[Transform] {
        &self.applied
    }

    pub fn lowercase_enabled(&self) -> bool {
        self.lowercase
    }

    pub fn chart_selection(&self) -> Option<&ChartSelection> {
        self.chart.as_ref()
    }

    pub fn export_format(&self) -> FileFormat {
        self.export_format
    }

    pub fn last_export(&self) -> Option<&ProcessedFile> {
        self.last_export.as_ref()
    }

    fn apply(&mut self, transform: Transform) -> TransformReport {
        if transform == Transform::LowercaseText {
            self.lowercase = true;
        }
        self.applied.push(transform);
        transform.apply(&mut self.table)
    }

    /// Drop lowercasing from the log and rebuild the table from the parsed
    /// original by replaying the remaining transforms.
    fn disable_lowercase(&mut self) {
        self.lowercase = false;
        self.applied.retain(|t| *t != Transform::LowercaseText);

        let mut table = self.pristine.clone();
        for transform in &self.applied {
            transform.apply(&mut table);
        }
        self.table = table;
    }

    /// Selection to chart with, if the table can be charted at all.
    ///
    /// A stored selection whose columns are no longer numeric falls back to
    /// the default axes, keeping the chosen chart type.
    fn effective_chart(&self) -> Option<ChartSelection> {
        let default = data::default_selection(&self.table)?;
        match &self.chart {
            Some(selection) => {
                let numeric = self.table.numeric_column_names();
                if numeric.contains(&selection.x_column) && numeric.contains(&selection.y_column) {
                    Some(selection.clone())
                } else {
                    Some(default.with_chart_type(selection.chart_type))
                }
            }
            None => Some(default),
        }
    }
}

/// Outcome of an upload batch
#[derive(Debug, Default)]
pub struct UploadReport {
    /// File names parsed into tables
    pub accepted: Vec<String>,
    /// File names skipped, with the reason
    pub rejected: Vec<(String, DataError)>,
}

/// All files and choices of one user session
#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    theme: Theme,
    files: Vec<FileSession>,
    toasts: ToastManager,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            theme: settings.theme,
            settings,
            files: Vec::new(),
            toasts: ToastManager::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ------------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------------

    /// Parse each uploaded file independently.
    ///
    /// Unsupported or unreadable files are reported and skipped; the rest
    /// are still processed. Re-uploading a name replaces its previous state.
    pub fn upload(&mut self, uploads: Vec<UploadedFile>) -> UploadReport {
        let mut report = UploadReport::default();

        for upload in uploads {
            let name = upload.name.clone();
            match self.upload_one(upload) {
                Ok(()) => report.accepted.push(name),
                Err(e) => report.rejected.push((name, e)),
            }
        }

        report
    }

    fn upload_one(&mut self, upload: UploadedFile) -> DataResult<()> {
        let parsed = data::detect_format(&upload.name).and_then(|format| {
            data::ingest_with_limit(&upload, self.settings.max_upload_mb).map(|table| (format, table))
        });

        let (source_format, table) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Skipping {}: {} ({})", upload.name, e, e.kind());
                self.toasts.push(Toast::error(e.to_string()).for_file(&upload.name));
                return Err(e);
            }
        };

        tracing::info!(
            "Loaded {} ({}): {} rows x {} cols",
            upload.name,
            format_file_size(upload.size()),
            table.row_count(),
            table.column_count()
        );

        let export_format = self.settings.default_export_format.unwrap_or(source_format);
        let file = FileSession::new(upload.name.clone(), upload.size(), source_format, table, export_format);

        match self.files.iter_mut().find(|f| f.name == upload.name) {
            Some(existing) => {
                *existing = file;
                let toast = Toast::warning("Replaced the earlier upload; its edits were discarded");
                self.toasts.push(toast.for_file(&upload.name));
            }
            None => self.files.push(file),
        }
        Ok(())
    }

    /// Forget an uploaded file
    pub fn remove(&mut self, name: &str) -> DataResult<()> {
        let idx = self.index_of(name)?;
        self.files.remove(idx);
        Ok(())
    }

    pub fn files(&self) -> &[FileSession] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn file(&self, name: &str) -> Option<&FileSession> {
        self.files.iter().find(|f| f.name == name)
    }

    fn index_of(&self, name: &str) -> DataResult<usize> {
        self.files
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DataError::UnknownFile(name.to_string()))
    }

    fn file_mut(&mut self, name: &str) -> DataResult<&mut FileSession> {
        let idx = self.index_of(name)?;
        Ok(&mut self.files[idx])
    }

    // ------------------------------------------------------------------------
    // Cleaning
    // ------------------------------------------------------------------------

    /// Apply a cleaning transform to one file's table
    pub fn apply_transform(&mut self, name: &str, transform: Transform) -> DataResult<TransformReport> {
        let file = self.file_mut(name)?;
        let report = file.apply(transform);

        tracing::info!("{} on {}: {:?}", transform.label(), name, report);
        self.toasts.push(Toast::success(transform.success_message()).for_file(name));
        Ok(report)
    }

    /// Turn lowercasing of text columns on or off for one file.
    ///
    /// Turning it off rebuilds the table from the parsed original, replaying
    /// every other transform in the order it was applied.
    pub fn set_lowercase(&mut self, name: &str, enabled: bool) -> DataResult<()> {
        let file = self.file_mut(name)?;
        if file.lowercase == enabled {
            return Ok(());
        }

        if enabled {
            return self.apply_transform(name, Transform::LowercaseText).map(|_| ());
        }

        file.disable_lowercase();
        tracing::info!("Lowercasing turned off for {}", name);
        self.toasts.push(Toast::info("Original text case restored").for_file(name));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Visualization
    // ------------------------------------------------------------------------

    /// Chart choices for one file, `None` when it has fewer than two numeric columns
    pub fn chart_options(&self, name: &str) -> DataResult<Option<ChartOptions>> {
        let file = self.file(name).ok_or_else(|| DataError::UnknownFile(name.to_string()))?;
        Ok(data::chart_options(&file.table))
    }

    /// Store the chart kind and axes for one file
    pub fn select_chart(&mut self, name: &str, selection: ChartSelection) -> DataResult<()> {
        let theme = self.theme;
        let file = self.file_mut(name)?;
        data::build_chart(&file.table, &selection, theme)?;
        file.chart = Some(selection);
        Ok(())
    }

    /// Chart for one file with the session theme.
    ///
    /// Returns `Ok(None)` when the table has fewer than two numeric columns.
    pub fn chart(&self, name: &str) -> DataResult<Option<ChartSpec>> {
        let file = self.file(name).ok_or_else(|| DataError::UnknownFile(name.to_string()))?;
        match file.effective_chart() {
            Some(selection) => data::build_chart(&file.table, &selection, self.theme).map(Some),
            None => {
                tracing::debug!("{} has fewer than two numeric columns, no chart", name);
                Ok(None)
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    pub fn set_export_format(&mut self, name: &str, format: FileFormat) -> DataResult<()> {
        self.file_mut(name)?.export_format = format;
        Ok(())
    }

    /// Export one file in its chosen format.
    ///
    /// Always serializes afresh; the result replaces the file's previous export.
    pub fn export(&mut self, name: &str) -> DataResult<ProcessedFile> {
        let file = self.file_mut(name)?;
        match data::export_table(&file.table, &file.name, file.export_format) {
            Ok(processed) => {
                file.last_export = Some(processed.clone());
                tracing::info!("Exported {} as {}", name, processed.name);
                Ok(processed)
            }
            Err(e) => {
                tracing::warn!("Export of {} failed: {}", name, e);
                self.toasts.push(Toast::error(e.to_string()).for_file(name));
                Err(e)
            }
        }
    }

    /// Export every file; one failure does not stop the others
    pub fn export_all(&mut self) -> Vec<(String, DataResult<ProcessedFile>)> {
        let names: Vec<String> = self.files.iter().map(|f| f.name.clone()).collect();
        names
            .into_iter()
            .map(|name| {
                let result = self.export(&name);
                (name, result)
            })
            .collect()
    }

    /// Latest export of every file, in upload order
    pub fn processed_files(&self) -> Vec<&ProcessedFile> {
        self.files.iter().filter_map(|f| f.last_export.as_ref()).collect()
    }

    /// Bundle every exported file into one archive.
    ///
    /// Individual exports stay available whether or not bundling succeeds.
    pub fn bundle(&mut self) -> DataResult<Archive> {
        let processed: Vec<ProcessedFile> = self.processed_files().into_iter().cloned().collect();
        match data::bundle(&processed) {
            Ok(archive) => {
                self.toasts.push(Toast::success(format!("{} files bundled", archive.entries.len())));
                Ok(archive)
            }
            Err(e) => {
                tracing::warn!("Bundling failed: {}", e);
                self.toasts.push(Toast::error(e.to_string()));
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    pub fn notifications(&self) -> &ToastManager {
        &self.toasts
    }

    /// Take every queued notification, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }
}
