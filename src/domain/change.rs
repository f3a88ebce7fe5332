/// Files with uncommitted changes that are not yet staged.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    pub files: Vec<String>,
}

impl ChangeSet {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths for the given 1-based indices; out-of-range indices are skipped.
    pub fn pick(&self, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .filter(|&&index| index > 0 && index <= self.files.len())
            .map(|&index| self.files[index - 1].clone())
            .collect()
    }

    /// Numbered listing shown in the staging prompt.
    pub fn numbered(&self) -> String {
        self.files
            .iter()
            .enumerate()
            .map(|(idx, file)| format!("[{}] {}", idx + 1, file))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What the user asked for at the staging prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    All,
    Indices(Vec<usize>),
    Quit,
    Invalid,
}

impl FileSelection {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return FileSelection::All;
        }
        if trimmed.eq_ignore_ascii_case("q") {
            return FileSelection::Quit;
        }

        trimmed
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map(FileSelection::Indices)
            .unwrap_or(FileSelection::Invalid)
    }
}

/// Parse the newline separated output of `git ls-files`.
pub fn parse_file_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_variants() {
        assert_eq!(FileSelection::parse(""), FileSelection::All);
        assert_eq!(FileSelection::parse("   "), FileSelection::All);
        assert_eq!(FileSelection::parse("Q"), FileSelection::Quit);
        assert_eq!(
            FileSelection::parse("1 3  2"),
            FileSelection::Indices(vec![1, 3, 2])
        );
        assert_eq!(FileSelection::parse("1 two"), FileSelection::Invalid);
        assert_eq!(FileSelection::parse("-1"), FileSelection::Invalid);
    }

    #[test]
    fn picks_only_valid_indices() {
        let changes = ChangeSet::new(vec!["a.rs".into(), "b.rs".into(), "c.rs".into()]);
        assert_eq!(changes.pick(&[3, 0, 1, 9]), vec!["c.rs", "a.rs"]);
        assert!(changes.pick(&[4]).is_empty());
    }

    #[test]
    fn numbers_files_from_one() {
        let changes = ChangeSet::new(vec!["a.rs".into(), "src/b.rs".into()]);
        assert_eq!(changes.numbered(), "[1] a.rs\n[2] src/b.rs");
    }

    #[test]
    fn parses_ls_files_output() {
        assert_eq!(
            parse_file_list("src/main.rs\nnew file.txt\n\n"),
            vec!["src/main.rs", "new file.txt"]
        );
        assert!(parse_file_list("").is_empty());
    }
}
