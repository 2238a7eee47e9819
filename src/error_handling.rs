use std::fmt::{Debug, Display};
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// A position in some source text. Zero means "unknown" for line and column,
// and an empty path means the text did not come from a file
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn in_file(file: PathBuf, line: usize) -> Self {
        Location { file, line, column: 0 }
    }

    pub fn at(line: usize, column: usize) -> Self {
        Location { file: PathBuf::new(), line, column }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = if self.file.as_os_str().is_empty() {
            "<input>".to_string()
        } else {
            self.file.display().to_string()
        };

        match (self.line, self.column) {
            (0, _) => write!(f, "{}", file),
            (line, 0) => write!(f, "{}:{}", file, line),
            (line, column) => write!(f, "{}:{}:{}", file, line, column),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T,
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

impl<T: ErrorType + Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

// Joins a batch of errors into one report, one error per line
pub fn report<T: ErrorType>(errors: &Errors<T>) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n")
}
