use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a training file and returns its usable lines.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Trims every line and drops the empty ones
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Reads a corpus from a file or from a directory.
///
/// For a directory, every file with the given extension directly inside it
/// is read, in file name order, and the lines are concatenated.
pub fn read_corpus<P: AsRef<Path>>(path: P, extension: &str) -> io::Result<Vec<String>> {
	let path = path.as_ref();
	let folder = match path.to_str() {
		Some(s) => normalize_folder(s),
		None => path.to_path_buf(),
	};

	if !folder.is_dir() {
		return read_lines(path);
	}

	let mut lines = Vec::new();
	for file in list_files(&folder, extension)? {
		let full_path = folder.join(&file);
		let mut file_lines = read_lines(&full_path)?;
		tracing::debug!(file = %full_path.display(), lines = file_lines.len(), "read corpus file");
		lines.append(&mut file_lines);
	}
	Ok(lines)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Returns file names only (no paths).
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
