//! textar CLI
//!
//! Create, update, extract, and list textar archives.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use textar::{Archive, Decoder, Encoder, File};

#[derive(Parser, Debug)]
#[command(name = "textar")]
#[command(version)]
#[command(about = "Reversible text archive tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an archive from files/directories
    Create {
        /// Files and directories to archive
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output archive file (default: stdout, same as -)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Update or extend an archive with files/directories
    Update {
        /// Archive file to update
        archive: PathBuf,

        /// Files and directories to add or replace
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Extract an archive
    #[command(name = "x")]
    Extract {
        /// Archive file to extract (default: stdin, same as -)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Directory to extract to (default: current directory)
        #[arg(short = 'C', long, default_value = ".")]
        directory: PathBuf,

        /// Only extract these names or directory prefixes
        names: Vec<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List contents of an archive
    #[command(name = "t")]
    List {
        /// Archive file to list (default: stdin, same as -)
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Create { inputs, output, verbose } => {
            create_archive(inputs, output, verbose)?;
        }
        Commands::Update { archive, inputs, verbose } => {
            update_archive(&archive, inputs, verbose)?;
        }
        Commands::Extract { input, directory, names, verbose } => {
            extract_archive(input, &directory, &names, verbose)?;
        }
        Commands::List { input, verbose } => {
            list_archive(input, verbose)?;
        }
    }

    Ok(())
}

/// Walk the inputs and read every regular file, in a stable order.
///
/// Entries within each input are sorted by file name so the same tree always
/// produces the same archive.
fn collect_inputs(inputs: &[PathBuf], verbose: bool) -> Result<Vec<File>> {
    let mut files = Vec::new();

    for input in inputs {
        for entry in walkdir::WalkDir::new(input).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk: {}", input.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let data = fs::read(path)
                .with_context(|| format!("Failed to read: {}", path.display()))?;
            let name = path.to_string_lossy().replace('\\', "/");

            if verbose {
                println!("Added: {} ({} bytes)", name, data.len());
            }
            files.push(File::new(name, data));
        }
    }

    Ok(files)
}

fn create_archive(inputs: Vec<PathBuf>, output: Option<PathBuf>, verbose: bool) -> Result<()> {
    let mut archive = Archive::new();
    for file in collect_inputs(&inputs, verbose)? {
        archive.add_file(file);
    }

    let encoded = Encoder::new().encode(&archive);

    match output {
        Some(path) if path != Path::new("-") => {
            fs::write(&path, encoded)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            if verbose {
                println!("Created: {} ({} files)", path.display(), archive.len());
            }
        }
        _ => io::stdout().write_all(&encoded)?,
    }

    Ok(())
}

fn update_archive(path: &Path, inputs: Vec<PathBuf>, verbose: bool) -> Result<()> {
    let mut archive = Decoder::new()
        .with_keep_comment_entries(true)
        .decode_file(path)?;

    for file in collect_inputs(&inputs, verbose)? {
        archive.upsert(file.name, file.data);
    }

    Encoder::new().encode_to_file(&archive, path)?;

    if verbose {
        println!("Updated: {} ({} files)", path.display(), archive.len());
    }
    Ok(())
}

fn extract_archive(
    input: Option<PathBuf>,
    directory: &Path,
    names: &[String],
    verbose: bool,
) -> Result<()> {
    let archive = Decoder::new().decode(&read_input(input)?);

    if verbose {
        println!("Files: {}", archive.len());
    }

    for file in &archive {
        if !selected(names, &file.name) {
            if verbose {
                println!("Skipped: {}", file.name);
            }
            continue;
        }

        let output_path = directory.join(file.name.trim_start_matches('/'));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create: {}", parent.display()))?;
        }
        fs::write(&output_path, &file.data)
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;

        if verbose {
            println!("Extracted: {}", file.name);
        }
    }

    Ok(())
}

fn list_archive(input: Option<PathBuf>, verbose: bool) -> Result<()> {
    let archive = Decoder::new().decode(&read_input(input)?);

    for file in &archive {
        if verbose {
            println!("{}  {}", file.name, file.data.len());
        } else {
            println!("{}", file.name);
        }
    }

    Ok(())
}

/// Read the archive bytes from a file, or from stdin for `None` / `-`.
fn read_input(input: Option<PathBuf>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read(&path).with_context(|| format!("Failed to read: {}", path.display()))
        }
        _ => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Whether `name` is selected by the filter list.
///
/// An empty filter selects everything; otherwise a filter entry matches its
/// exact name or any name under it as a directory.
fn selected(names: &[String], name: &str) -> bool {
    names.is_empty() || names.iter().any(|n| name == n || subdir(n, name))
}

/// Whether `file` lies under the directory `dir`.
fn subdir(dir: &str, file: &str) -> bool {
    match file.strip_prefix(dir) {
        Some(rest) => dir.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that rely on relative input paths change the process working
    // directory, which is shared across test threads.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_subdir() {
        assert!(subdir("dir", "dir/file"));
        assert!(subdir("dir/", "dir/file"));
        assert!(subdir("a/b", "a/b/c/d"));
        assert!(!subdir("dir", "dirfile"));
        assert!(!subdir("dir", "other/file"));
        assert!(!subdir("dir/file", "dir"));
    }

    #[test]
    fn test_selected() {
        let names = vec!["dir/file3".to_string()];
        assert!(selected(&names, "dir/file3"));
        assert!(!selected(&names, "dir/file1"));
        assert!(selected(&[], "anything"));
    }

    #[test]
    fn test_create_then_extract_selected() {
        let _cwd = CWD_LOCK.lock().unwrap();
        let workdir = tempfile::tempdir().unwrap();
        let src = workdir.path().join("dir");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("file1"), b"one\n").unwrap();
        fs::write(src.join("file3"), b"three\n").unwrap();

        // Collect with names relative to the temp dir.
        std::env::set_current_dir(workdir.path()).unwrap();
        let files = collect_inputs(&[PathBuf::from("dir")], false).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "dir/file1");
        assert_eq!(files[1].name, "dir/file3");

        let archive_path = workdir.path().join("a.textar");
        create_archive(
            vec![PathBuf::from("dir")],
            Some(archive_path.clone()),
            false,
        )
        .unwrap();

        let out = workdir.path().join("out");
        extract_archive(
            Some(archive_path),
            &out,
            &["dir/file3".to_string()],
            false,
        )
        .unwrap();

        assert!(!out.join("dir/file1").exists());
        assert_eq!(fs::read(out.join("dir/file3")).unwrap(), b"three\n");
    }

    #[test]
    fn test_update_preserves_position_and_appends() {
        let _cwd = CWD_LOCK.lock().unwrap();
        let workdir = tempfile::tempdir().unwrap();
        let path = workdir.path().join("a.textar");

        let mut archive = Archive::new();
        archive.add_file(File::new("keep", "old keep\n"));
        archive.add_file(File::new("replace", "old replace\n"));
        Encoder::new().encode_to_file(&archive, &path).unwrap();

        let replace = workdir.path().join("replace");
        let added = workdir.path().join("added");
        fs::write(&replace, b"new replace\n").unwrap();
        fs::write(&added, b"added\n").unwrap();

        std::env::set_current_dir(workdir.path()).unwrap();
        update_archive(
            &path,
            vec![PathBuf::from("replace"), PathBuf::from("added")],
            false,
        )
        .unwrap();

        let updated = Decoder::new().decode_file(&path).unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated.files[0].name, "keep");
        assert_eq!(updated.files[1].name, "replace");
        assert_eq!(updated.files[1].data, b"new replace\n");
        assert_eq!(updated.files[2].name, "added");
    }
}
