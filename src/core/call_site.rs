//! Call-site capture for the `path` record field

use std::fmt;
use std::panic::Location;

/// Where a log call was made.
///
/// Public entry points are `#[track_caller]`, so [`CallSite::caller`]
/// evaluated inside the facade already resolves to the application's call
/// site no matter how many wrapper layers sit in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl CallSite {
    /// Call site from explicit parts (used by the logging macros)
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Location of the nearest caller not annotated with `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), None)
    }

    /// Source file name without directories
    pub fn file(&self) -> &'static str {
        self.file
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

impl fmt::Display for CallSite {
    /// `<file>:<line>(<function>)`, with `???` when the function is unknown
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}({})",
            self.file(),
            self.line,
            self.function.unwrap_or("???")
        )
    }
}
