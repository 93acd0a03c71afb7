use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::error::{Result, ScrapeError};
use crate::player_page::PlayerPageParser;
use crate::types::PlayerRecord;

const PROGRESS_EVERY: usize = 100;

/// Saved pages in `dir`, sorted so repeated runs write rows in the same order.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScrapeError::filesystem(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| ScrapeError::filesystem(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.extension().map(|ext| ext != "html").unwrap_or(true) {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(|e| ScrapeError::filesystem(&path, e))?;
        // Symlinks are followed so a linked page still counts as a saved page.
        let is_file = if file_type.is_symlink() {
            fs::metadata(&path)
                .map_err(|e| ScrapeError::filesystem(&path, e))?
                .is_file()
        } else {
            file_type.is_file()
        };
        if is_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extracts every saved page in `html_dir` into `output_csv`. Returns the number of rows written.
pub fn write_dataset(html_dir: &Path, output_csv: &Path) -> Result<usize> {
    if let Some(parent) = output_csv.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScrapeError::filesystem(parent, e))?;
    }

    let parser = PlayerPageParser::new()?;
    let files = list_html_files(html_dir)?;
    info!("Transforming {} saved pages into {:?}", files.len(), output_csv);

    let mut wtr = csv::Writer::from_path(output_csv)?;
    wtr.write_record(PlayerRecord::HEADERS)?;

    let mut written = 0;
    for (idx, path) in files.iter().enumerate() {
        let html = fs::read_to_string(path).map_err(|e| ScrapeError::filesystem(path, e))?;
        let record = parser.parse(&html)?;
        debug!(?path, player = %record.player_name, "extracted record");
        wtr.write_record(record.as_row())?;
        written += 1;

        if (idx + 1) % PROGRESS_EVERY == 0 {
            info!("Lines read: {}", idx + 1);
        }
    }

    wtr.flush().map_err(|e| ScrapeError::filesystem(output_csv, e))?;
    info!("Wrote {} records to {:?}", written, output_csv);
    Ok(written)
}

/// Removes every saved page from `dir`. Other files are left alone.
pub fn delete_html_files(dir: &Path) -> Result<usize> {
    let files = list_html_files(dir)?;
    for path in &files {
        fs::remove_file(path).map_err(|e| ScrapeError::filesystem(path, e))?;
    }
    info!("Deleted {} HTML files from {:?}", files.len(), dir);
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_html_files_skips_other_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b_2.html"), "").unwrap();
        fs::write(dir.path().join("a_1.html"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.html")).unwrap();

        let names: Vec<_> = list_html_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_1.html", "b_2.html"]);
    }

    #[test]
    fn test_empty_dir_writes_header_only() {
        let html_dir = tempdir().unwrap();
        let out_dir = tempdir().unwrap();
        let output = out_dir.path().join("results").join("players.csv");

        assert_eq!(write_dataset(html_dir.path(), &output).unwrap(), 0);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "player_name,country_birth,country_fifa\n"
        );
    }

    #[test]
    fn test_delete_html_files_keeps_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("brasilien_238223.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("keep.csv"), "x").unwrap();

        assert_eq!(delete_html_files(dir.path()).unwrap(), 1);
        assert!(!dir.path().join("brasilien_238223.html").exists());
        assert!(dir.path().join("keep.csv").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_page_entry_is_filesystem_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_1.html"), "").unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("missing-target.html"),
            dir.path().join("b_2.html"),
        )
        .unwrap();

        let err = list_html_files(dir.path()).unwrap_err();
        assert!(matches!(err, ScrapeError::Filesystem { .. }), "got {err:?}");
        // Cleanup stops too instead of reporting a partial delete as success.
        assert!(delete_html_files(dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_page_is_listed() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("page.txt");
        fs::write(&target, "<html></html>").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("a_1.html")).unwrap();

        assert_eq!(list_html_files(dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_html_dir_is_filesystem_error() {
        let dir = tempdir().unwrap();
        let err = list_html_files(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ScrapeError::Filesystem { .. }), "got {err:?}");
    }
}
