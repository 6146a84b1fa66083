/// the three datasets produced by a split
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitLabel {
    Train,
    Validation,
    Test,
}

impl SplitLabel {
    pub const ALL: [SplitLabel; 3] = [SplitLabel::Train, SplitLabel::Validation, SplitLabel::Test];

    /// output subdirectory and filename prefix for this split
    pub fn name(&self) -> &'static str {
        match self {
            SplitLabel::Train => "train",
            SplitLabel::Validation => "validation",
            SplitLabel::Test => "test",
        }
    }
}

impl std::fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// names the files of one write. the token is random and fresh for every
/// tag so that workers sharing a destination never collide, even when they
/// share a worker id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTag {
    pub worker_id: String,
    pub token: String,
}

impl OutputTag {
    pub fn new(worker_id: &str) -> OutputTag {
        let token = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        OutputTag {
            worker_id: worker_id.to_string(),
            token,
        }
    }

    pub fn filename(&self, label: SplitLabel) -> String {
        format!("{}_{}_{}.csv", label.name(), self.worker_id, self.token)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_filename_layout() {
        let tag = OutputTag {
            worker_id: String::from("algo-1"),
            token: String::from("0123abcd"),
        };
        assert_eq!(tag.filename(SplitLabel::Validation), "validation_algo-1_0123abcd.csv");
    }

    #[test]
    fn test_tokens_are_fresh() {
        let a = OutputTag::new("algo-1");
        let b = OutputTag::new("algo-1");
        assert_eq!(a.token.len(), 8);
        assert!(a.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a.token, b.token);
    }
}
