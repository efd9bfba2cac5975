//! Command-line interface for slopcheck.
//!
//! The CLI owns everything the engine deliberately does not: file discovery,
//! configuration loading, report serialization, console output, and exit
//! codes.

use anyhow::Context;
use clap::Parser;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::detect::{run_detection, SourceFile};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default configuration file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["slopcheck.json", ".slopcheckrc.json", "slopcheck.yaml"];

/// File extensions the scanner understands.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Directories never worth scanning.
const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "coverage",
    "vendor",
    "storybook-static",
];

/// Detect patterns correlated with low-quality machine-generated code.
///
/// Slopcheck scans TypeScript/React sources line by line against a registry
/// of slop patterns - permissive `any` typing, hallucinated imports, missing
/// error handling, placeholder content - and reports a weighted score across
/// utility, quality, and style axes.
#[derive(Parser)]
#[command(name = "slopcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to a config file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Write the JSON report to a file as well
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Focus the report on core application code
    #[arg(short, long)]
    pub quiet: bool,

    /// Fail on any finding, not just critical/high
    #[arg(long)]
    pub strict: bool,
}

/// Discover a configuration file next to the scanned path.
fn discover_config(root: &Path) -> Option<PathBuf> {
    let base = if root.is_dir() {
        root
    } else {
        root.parent().unwrap_or(Path::new("."))
    };
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| base.join(name))
        .find(|p| p.exists())
}

/// Compile the config's ignore globs.
fn build_ignore_set(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid ignorePaths pattern {:?}", pattern))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Collect scannable files under `root`, skipping build output, dependency
/// directories, hidden directories, and config-ignored paths.
fn collect_files(root: &Path, ignore: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            !EXCLUDED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !SUPPORTED_EXTENSIONS.contains(&ext) {
            continue;
        }
        if !ignore.is_empty() && ignore.is_match(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Read every file up front. A read failure aborts the whole run; the engine
/// makes no progress guarantee for a partially-read file set.
fn load_sources(paths: &[PathBuf]) -> anyhow::Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|p| {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("reading {}", p.display()))?;
            Ok(SourceFile::new(p.to_string_lossy(), content))
        })
        .collect()
}

/// Run a scan. Returns the process exit code.
pub fn run_scan(args: &Cli) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if !args.path.exists() {
        eprintln!("Error: cannot access path {:?}", args.path);
        return Ok(EXIT_ERROR);
    }

    // Load configuration before touching any source file.
    let config_path = args
        .config
        .clone()
        .or_else(|| discover_config(&args.path));
    let config = match &config_path {
        Some(p) => Some(Config::parse_file(p).with_context(|| format!("loading {}", p.display()))?),
        None => None,
    };

    let ignore = build_ignore_set(
        config
            .as_ref()
            .map(|c| c.ignore_paths.as_slice())
            .unwrap_or(&[]),
    )?;

    let paths = if args.path.is_dir() {
        collect_files(&args.path, &ignore)?
    } else {
        vec![args.path.clone()]
    };

    if paths.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    let sources = load_sources(&paths)?;
    let detection = run_detection(&sources, config.as_ref(), args.quiet)
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let path_str = args.path.to_string_lossy();
    match args.format.as_str() {
        "json" => report::print_json(&path_str, &detection)?,
        _ => report::print_pretty(&path_str, &detection, args.quiet),
    }
    if let Some(output) = &args.output {
        report::write_json_file(&path_str, &detection, output)?;
    }

    let strict = args.strict || config.as_ref().map(|c| c.strict).unwrap_or(false);
    if detection.has_blocking_issues(strict) {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_collect_files_skips_dependency_dirs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/app.ts", "const x = 1;\n");
        write(temp.path(), "node_modules/lib/index.js", "module.exports = 1;\n");
        write(temp.path(), "dist/app.js", "var x = 1;\n");
        write(temp.path(), "README.md", "# hi\n");

        let files = collect_files(temp.path(), &GlobSet::empty()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.ts"));
    }

    #[test]
    fn test_collect_files_honors_ignore_globs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/app.ts", "const x = 1;\n");
        write(temp.path(), "src/generated/schema.ts", "export type T = 1;\n");

        let ignore = build_ignore_set(&["**/generated/**".to_string()]).unwrap();
        let files = collect_files(temp.path(), &ignore).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.ts"));
    }

    #[test]
    fn test_discover_config() {
        let temp = TempDir::new().unwrap();
        assert!(discover_config(temp.path()).is_none());
        write(temp.path(), "slopcheck.json", "{}");
        let found = discover_config(temp.path()).unwrap();
        assert!(found.ends_with("slopcheck.json"));
    }

    #[test]
    fn test_run_scan_exit_codes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/clean.ts", "export const n: number = 1;\n");
        let args = Cli {
            path: temp.path().to_path_buf(),
            config: None,
            format: "json".to_string(),
            output: None,
            quiet: false,
            strict: false,
        };
        assert_eq!(run_scan(&args).unwrap(), EXIT_SUCCESS);

        write(temp.path(), "src/slop.ts", "const data: any = {};\n");
        assert_eq!(run_scan(&args).unwrap(), EXIT_FINDINGS);
    }

    #[test]
    fn test_run_scan_strict_fails_on_low_findings() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/app.ts", "console.log('hello');\n");
        let mut args = Cli {
            path: temp.path().to_path_buf(),
            config: None,
            format: "json".to_string(),
            output: None,
            quiet: false,
            strict: false,
        };
        // production-logging is low severity: passes by default...
        assert_eq!(run_scan(&args).unwrap(), EXIT_SUCCESS);
        // ...but fails under --strict.
        args.strict = true;
        assert_eq!(run_scan(&args).unwrap(), EXIT_FINDINGS);
    }

    #[test]
    fn test_run_scan_writes_json_report() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/app.ts", "const data: any = {};\n");
        let output = temp.path().join("report.json");
        let args = Cli {
            path: temp.path().to_path_buf(),
            config: None,
            format: "json".to_string(),
            output: Some(output.clone()),
            quiet: false,
            strict: false,
        };
        run_scan(&args).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["files_scanned"], 1);
        assert_eq!(parsed["issues"][0]["rule"], "permissive-type-usage");
    }

    #[test]
    fn test_run_scan_rejects_bad_config() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/app.ts", "const x = 1;\n");
        write(
            temp.path(),
            "slopcheck.json",
            r#"{"rules": [{"id": "r", "pattern": "[", "message": "m", "severity": "low"}]}"#,
        );
        let args = Cli {
            path: temp.path().to_path_buf(),
            config: None,
            format: "json".to_string(),
            output: None,
            quiet: false,
            strict: false,
        };
        assert!(run_scan(&args).is_err());
    }
}
