//! Requirement string parsing.
//!
//! A requirement line is an optional run of installer flags followed by a
//! package reference:
//!
//! ```text
//! --index-url https://mirror.example/simple  some_pkg[extra]>=1.2 ; python_version < "3.9"
//! └────────────── flags ──────────────────┘  └────────────── reference ───────────────────┘
//! ```
//!
//! The reference is handed to the installer untouched. Only its leading name
//! token is extracted and normalized for the dependency-tree inspector.
//!
//! | Input                              | Flags                       | Reference          | Name        |
//! |------------------------------------|-----------------------------|--------------------|-------------|
//! | `requests==2.28.0`                 |                             | `requests==2.28.0` | `requests`  |
//! | `Some_Pkg[socks]~=1.0`             |                             | `Some_Pkg[socks]~=1.0` | `some-pkg` |
//! | `--index-url https://x pkgname`    | `--index-url https://x`     | `pkgname`          | `pkgname`   |
//! | `--pre --extra-index-url=https://x a.b` | `--pre --extra-index-url=https://x` | `a.b`  | `a.b`       |
//! | `pkg >= 1.0`                       |                             | `pkg >= 1.0`       | `pkg`       |
//! | `==1.0`, `--upgrade`, empty        | parse error                 |                    |             |
//!
//! # Example
//!
//! ```
//! use reqgate::requirements::parse_requirement;
//!
//! let req = parse_requirement("--index-url https://x Some_Pkg==1.0").unwrap();
//! assert_eq!(req.name(), "some-pkg");
//! assert_eq!(req.installer_args(), vec!["--index-url", "https://x", "Some_Pkg==1.0"]);
//! ```

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+").expect("name pattern is valid"));

/// Installer flags that never take a separate value.
const BOOLEAN_FLAGS: &[&str] = &[
    "--pre",
    "--no-deps",
    "--upgrade",
    "--force-reinstall",
    "--ignore-installed",
    "--no-cache-dir",
    "--no-build-isolation",
    "--no-index",
    "--prefer-binary",
    "--user",
    "--quiet",
    "--verbose",
    "--isolated",
    "--no-warn-script-location",
    "--no-compile",
    "--require-hashes",
    "--no-clean",
    "--disable-pip-version-check",
    "--ignore-requires-python",
    "--no-warn-conflicts",
];

/// Installer flags that always take the next token as their value.
const VALUE_FLAGS: &[&str] = &[
    "--index-url",
    "--extra-index-url",
    "--find-links",
    "--trusted-host",
    "--constraint",
    "--requirement",
    "--editable",
    "--target",
    "--prefix",
    "--root",
    "--src",
    "--platform",
    "--python-version",
    "--implementation",
    "--abi",
    "--no-binary",
    "--only-binary",
    "--progress-bar",
    "--upgrade-strategy",
    "--global-option",
    "--config-settings",
    "--cache-dir",
    "--proxy",
    "--timeout",
    "--retries",
    "--cert",
    "--client-cert",
    "--log",
];

/// Why a requirement string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace.
    #[error("requirement is empty")]
    Empty,

    /// Only installer flags, no package reference after them.
    #[error("no package reference after installer flags")]
    MissingReference,

    /// The package reference does not start with a distribution name.
    #[error("no package name in '{reference}'")]
    MissingName { reference: String },
}

/// A requirement split into installer flags and a package reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequirement {
    raw: String,
    flags: Vec<String>,
    reference: String,
    name: String,
}

impl ParsedRequirement {
    /// The original requirement text, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Leading installer flags, verbatim and in order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Package reference including extras, version specifier and markers.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Normalized distribution name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments to append to the installer command: flags, then reference.
    pub fn installer_args(&self) -> Vec<String> {
        let mut args = self.flags.clone();
        args.push(self.reference.clone());
        args
    }
}

impl fmt::Display for ParsedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse a requirement line into flags, reference and normalized name.
pub fn parse_requirement(input: &str) -> Result<ParsedRequirement, ParseError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let mut flags = Vec::new();
    let mut i = 0;
    while i < tokens.len() && tokens[i].starts_with("--") {
        let flag = tokens[i];
        flags.push(flag.to_string());
        i += 1;
        if takes_value(flag, tokens.len() - i) {
            flags.push(tokens[i].to_string());
            i += 1;
        }
    }

    if i == tokens.len() {
        return Err(ParseError::MissingReference);
    }

    let reference = tokens[i..].join(" ");
    let name = NAME_REGEX
        .find(&reference)
        .map(|m| normalize_name(m.as_str()))
        .ok_or_else(|| ParseError::MissingName {
            reference: reference.clone(),
        })?;

    Ok(ParsedRequirement {
        raw: raw.to_string(),
        flags,
        reference,
        name,
    })
}

/// Whether `flag` consumes the next token, given `remaining` tokens after it.
///
/// Listed flags decide for themselves. An unlisted flag only takes a value
/// when a package reference would still follow it.
fn takes_value(flag: &str, remaining: usize) -> bool {
    if flag.contains('=') || BOOLEAN_FLAGS.contains(&flag) {
        false
    } else if VALUE_FLAGS.contains(&flag) {
        remaining > 0
    } else {
        remaining > 1
    }
}

/// Canonical distribution name: lowercase, `_` replaced by `-`.
///
/// The dependency-tree inspector and the package index both key on this form.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}
