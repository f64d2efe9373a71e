use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Window, WindowResult};

/// A predicate that classifies windows by class name, executable
/// name, and title.
///
/// Every present constraint must match; absent constraints match
/// anything. A selector always has at least one constraint. Class
/// names and executable names compare case-sensitively.
#[derive(Debug, Clone)]
pub struct WindowSelector {
    class: Option<String>,
    executable: Option<String>,
    title: Option<Regex>,
}

impl WindowSelector {
    /// Builds a selector from its optional constraints.
    ///
    /// `title` is an exact title; it is matched as an anchored, escaped
    /// pattern. Use [`WindowSelector::with_title_pattern`] for regular
    /// expressions.
    pub fn new(
        class: Option<&str>,
        executable: Option<&str>,
        title: Option<&str>,
    ) -> WindowResult<Self> {
        let pattern = title
            .map(|t| Regex::new(&format!("^{}$", regex::escape(t))))
            .transpose()?;
        Self::build(class, executable, pattern)
    }

    /// Builds a selector whose title constraint is a regular expression.
    pub fn with_title_pattern(
        class: Option<&str>,
        executable: Option<&str>,
        pattern: &str,
    ) -> WindowResult<Self> {
        Self::build(class, executable, Some(Regex::new(pattern)?))
    }

    /// Selects windows by class name only.
    pub fn class(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            executable: None,
            title: None,
        }
    }

    /// Selects windows by executable basename only.
    ///
    /// A trailing `.exe` (any case) is ignored.
    pub fn executable(executable: &str) -> Self {
        Self {
            class: None,
            executable: Some(strip_exe(executable)),
            title: None,
        }
    }

    fn build(
        class: Option<&str>,
        executable: Option<&str>,
        title: Option<Regex>,
    ) -> WindowResult<Self> {
        if class.is_none() && executable.is_none() && title.is_none() {
            return Err(Error::EmptySelector);
        }

        Ok(Self {
            class: class.map(str::to_string),
            executable: executable.map(strip_exe),
            title,
        })
    }

    /// Returns whether `window` satisfies every constraint.
    ///
    /// A window that closes while being inspected does not match.
    pub fn matches<W: Window + ?Sized>(&self, window: &W) -> bool {
        self.try_matches(window).unwrap_or(false)
    }

    fn try_matches<W: Window + ?Sized>(&self, window: &W) -> WindowResult<bool> {
        if let Some(class) = &self.class
            && window.class()? != *class
        {
            return Ok(false);
        }
        if let Some(title) = &self.title
            && !title.is_match(&window.title()?)
        {
            return Ok(false);
        }
        if let Some(executable) = &self.executable
            && strip_exe(&window.executable_name()?) != *executable
        {
            return Ok(false);
        }
        Ok(true)
    }
}

/// Removes a trailing `.exe`, ignoring case.
fn strip_exe(name: &str) -> String {
    let len = name.len();
    if len >= 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".exe") {
        name[..len - 4].to_string()
    } else {
        name.to_string()
    }
}

/// Serialized form of a [`WindowSelector`] as it appears in config files.
///
/// ```toml
/// [[padding.no_padding]]
/// class = "XLMAIN"
///
/// [[companion]]
/// class = "WindowsForms10.Window.8.app.0.2bf8098_r7_ad1"
/// title_pattern = "^Commit"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    /// Exact window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Regular expression matched against the window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_pattern: Option<String>,
}

impl TryFrom<&SelectorConfig> for WindowSelector {
    type Error = Error;

    fn try_from(config: &SelectorConfig) -> WindowResult<Self> {
        let class = config.class.as_deref();
        let executable = config.executable.as_deref();

        match (&config.title, &config.title_pattern) {
            (Some(_), Some(_)) => Err(Error::ConflictingTitle),
            (_, Some(pattern)) => Self::with_title_pattern(class, executable, pattern),
            (title, None) => Self::new(class, executable, title.as_deref()),
        }
    }
}
