use std::path::Path;

/// True if the file name ends in `.csv` (any case). Does not touch the filesystem.
pub(crate) fn is_csv(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".csv")
}

/// True if the path is a regular file that can be opened for reading.
pub(crate) fn validate_csv(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn is_csv_extension() {
        assert!(is_csv(Path::new("file.csv")));
        assert!(is_csv(Path::new("file.CSV")));
        assert!(is_csv(Path::new("dir/people.Csv")));
        assert!(!is_csv(Path::new("file.txt")));
        assert!(!is_csv(Path::new("csv")));
        assert!(!is_csv(Path::new("file.csv.bak")));
    }

    #[test]
    fn validate_csv_existing_and_missing() {
        let dir = tempdir().unwrap();
        let found = dir.path().join("isFound.csv");
        std::fs::write(&found, "").unwrap();
        assert!(validate_csv(&found));
        assert!(!validate_csv(&dir.path().join("isNotFound.csv")));
        assert!(!validate_csv(dir.path()));
    }
}
