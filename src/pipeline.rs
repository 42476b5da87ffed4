use crate::{
    config::Config,
    error::Result,
    format::render,
    group::{group_entries, Grouping},
    loader::{parse_entries, read_entries, RawEntries},
    writer::Writer,
};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a cleaning run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanStats {
    /// Input list that was processed
    pub input_path: String,

    /// Output file path
    pub output_path: String,

    /// Non-empty lines read, duplicates included
    pub lines_read: usize,

    /// Distinct trimmed lines
    pub distinct_lines: usize,

    /// Distinct canonical keys seen
    pub unique_entries: usize,

    /// Entries collapsed into another spelling of the same domain
    pub duplicates_removed: usize,

    /// Entries dropped because nothing remained after removing markers
    pub dropped_entries: usize,

    /// Number of letter groups in the output
    pub groups: usize,

    /// Number of rules in the output
    pub rules_written: usize,

    /// Size of the rendered document in bytes
    pub bytes: usize,

    /// Whether writing was skipped
    pub dry_run: bool,

    /// Time spent reading the input
    pub load_duration: Duration,

    /// Time spent deduplicating, grouping and rendering
    pub group_duration: Duration,

    /// Time spent writing the output file
    pub write_duration: Duration,

    /// Total execution time
    pub duration: Duration,

    /// Completion timestamp
    pub finished_at: String,
}

/// Output of the pure transform: the grouping and its rendered document.
#[derive(Debug, Clone)]
pub struct Cleaned {
    /// Distinct raw entries read from the input
    pub entries: RawEntries,

    /// Survivors bucketed by letter
    pub grouping: Grouping,

    /// Rendered rule document
    pub document: String,
}

/// Runs the loader, grouper and formatter on in-memory text.
///
/// # Examples
///
/// ```
/// use abp_cleaner::clean_text;
///
/// let cleaned = clean_text("Foo.com\nfoo.com\n foo.com \n");
/// assert_eq!(cleaned.document, "#[F]\n||Foo.com^\n");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> Cleaned {
    clean_entries(parse_entries(text))
}

fn clean_entries(entries: RawEntries) -> Cleaned {
    let grouping = group_entries(&entries);
    let document = render(&grouping);
    Cleaned {
        entries,
        grouping,
        document,
    }
}

/// Pipeline orchestrator turning a domain list into a cleaned rule file.
pub struct Pipeline {
    config: Config,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let writer = Writer::new(&config);

        Ok(Self { config, writer })
    }

    /// Cleans `input` and writes the result, returning run statistics.
    ///
    /// # Process
    ///
    /// 1. **Load**: reads distinct trimmed lines from the input list
    /// 2. **Group**: collapses case and marker variants, buckets by letter
    /// 3. **Write**: renders the rule document and replaces the output file
    ///
    /// Nothing is written if loading fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is missing or unreadable, or if the
    /// output cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use abp_cleaner::{Config, Pipeline};
    /// use std::path::Path;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().work_dir(".").build()?;
    /// let stats = Pipeline::new(config)?.run(Path::new("domains.txt"))?;
    /// println!("{} unique entries", stats.unique_entries);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(work_dir = %self.config.work_dir.display()))]
    pub fn run(&self, input: &Path) -> Result<CleanStats> {
        let start_time = Instant::now();

        info!("Stage 1/3: Loading {}", input.display());
        let load_start = Instant::now();
        let entries = read_entries(input)?;
        let load_duration = load_start.elapsed();
        info!(
            "✓ Read {} lines ({} distinct)",
            entries.lines_read(),
            entries.len()
        );

        info!("Stage 2/3: Deduplicating and grouping...");
        let group_start = Instant::now();
        let cleaned = clean_entries(entries);
        let group_duration = group_start.elapsed();
        let grouping = &cleaned.grouping;
        info!(
            "✓ {} unique entries in {} groups ({} duplicates, {} dropped)",
            grouping.unique_keys,
            grouping.group_count(),
            grouping.duplicates,
            grouping.dropped
        );

        let write_start = Instant::now();
        if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file write");
        } else {
            info!("Stage 3/3: Writing {}", self.writer.output_path().display());
            self.writer.write_document(&cleaned.document)?;
        }
        let write_duration = write_start.elapsed();

        let stats = CleanStats {
            input_path: input.display().to_string(),
            output_path: self.writer.output_path().display().to_string(),
            lines_read: cleaned.entries.lines_read(),
            distinct_lines: cleaned.entries.len(),
            unique_entries: grouping.unique_keys,
            duplicates_removed: grouping.duplicates,
            dropped_entries: grouping.dropped,
            groups: grouping.group_count(),
            rules_written: grouping.entry_count(),
            bytes: cleaned.document.len(),
            dry_run: self.config.dry_run,
            load_duration,
            group_duration,
            write_duration,
            duration: start_time.elapsed(),
            finished_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        };

        info!(
            "✓ Pipeline completed in {:.3}s",
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OUTPUT_FILE_NAME;
    use assert_fs::prelude::*;

    fn create_test_config(root: &Path) -> Config {
        Config::builder().work_dir(root).build().unwrap()
    }

    #[test]
    fn test_pipeline_basic_execution() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("domains.txt");
        input
            .write_str("example.com\nWWW.Example.com\n||other.org^\nfoo.net\n")
            .unwrap();

        let pipeline = Pipeline::new(create_test_config(temp.path())).unwrap();
        let stats = pipeline.run(input.path()).unwrap();

        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.unique_entries, 3);
        assert_eq!(stats.duplicates_removed, 1);
        assert_eq!(stats.groups, 3);
        assert_eq!(stats.rules_written, 3);

        let output = std::fs::read_to_string(temp.path().join(OUTPUT_FILE_NAME)).unwrap();
        assert!(output.starts_with("#[E]\n||"));
        assert!(output.ends_with("\n\n#[F]\n||foo.net^\n\n#[O]\n||other.org^\n"));
        assert_eq!(output.len(), stats.bytes);
    }

    #[test]
    fn test_pipeline_empty_input_writes_empty_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("empty.txt");
        input.write_str("").unwrap();

        let stats = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run(input.path())
            .unwrap();

        assert_eq!(stats.unique_entries, 0);
        temp.child(OUTPUT_FILE_NAME).assert("");
    }

    #[test]
    fn test_pipeline_counts_dropped_entries() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("list.txt");
        input.write_str("www.\nads.com\n").unwrap();

        let stats = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run(input.path())
            .unwrap();

        assert_eq!(stats.unique_entries, 2);
        assert_eq!(stats.dropped_entries, 1);
        assert_eq!(stats.rules_written, 1);
        temp.child(OUTPUT_FILE_NAME).assert("#[A]\n||ads.com^\n");
    }

    #[test]
    fn test_pipeline_missing_input_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(OUTPUT_FILE_NAME).write_str("previous").unwrap();

        let err = Pipeline::new(create_test_config(temp.path()))
            .unwrap()
            .run(&temp.path().join("missing.txt"))
            .unwrap_err();

        assert!(err.is_not_found());
        temp.child(OUTPUT_FILE_NAME).assert("previous");
    }

    #[test]
    fn test_pipeline_dry_run() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("list.txt");
        input.write_str("ads.com\n").unwrap();

        let config = Config::builder()
            .work_dir(temp.path())
            .dry_run(true)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run(input.path()).unwrap();

        assert!(stats.dry_run);
        assert_eq!(stats.rules_written, 1);
        assert!(!temp.child(OUTPUT_FILE_NAME).exists());
    }

    #[test]
    fn test_pipeline_output_is_stable_across_runs() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("list.txt");
        input
            .write_str("Foo.com\nfoo.com\n||FOO.com\nbar.org\nwww.Bar.org\n")
            .unwrap();
        let pipeline = Pipeline::new(create_test_config(temp.path())).unwrap();
        let output = temp.path().join(OUTPUT_FILE_NAME);

        pipeline.run(input.path()).unwrap();
        let first = std::fs::read_to_string(&output).unwrap();
        pipeline.run(input.path()).unwrap();
        let second = std::fs::read_to_string(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, "#[B]\n||bar.org^\n\n#[F]\n||FOO.com^\n");
    }

    #[test]
    fn test_clean_text_scenarios() {
        assert_eq!(clean_text("").document, "");
        assert_eq!(clean_text("www.\n").document, "");
        assert_eq!(
            clean_text("||already.formatted^\n").document,
            "#[A]\n||already.formatted^\n"
        );

        let collapsed = clean_text("Foo.com\nfoo.com\n foo.com \n");
        assert_eq!(collapsed.grouping.entry_count(), 1);
        assert_eq!(collapsed.entries.len(), 2);
    }

    #[test]
    fn test_clean_text_old_mac_line_endings() {
        let cleaned = clean_text("a.com\rb.com\r");

        assert_eq!(cleaned.document, "#[A]\n||a.com^\n\n#[B]\n||b.com^\n");
        assert_eq!(cleaned.grouping.entry_count(), 2);
    }

    #[test]
    fn test_stats_serialize() {
        let cleaned = clean_text("ads.com\n");
        let stats = CleanStats {
            input_path: "list.txt".to_string(),
            output_path: OUTPUT_FILE_NAME.to_string(),
            lines_read: cleaned.entries.lines_read(),
            distinct_lines: cleaned.entries.len(),
            unique_entries: cleaned.grouping.unique_keys,
            duplicates_removed: 0,
            dropped_entries: 0,
            groups: 1,
            rules_written: 1,
            bytes: cleaned.document.len(),
            dry_run: true,
            load_duration: Duration::from_millis(1),
            group_duration: Duration::from_millis(1),
            write_duration: Duration::ZERO,
            duration: Duration::from_millis(2),
            finished_at: "2026-01-01 00:00:00".to_string(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["unique_entries"], 1);
        assert_eq!(json["output_path"], OUTPUT_FILE_NAME);
    }
}
