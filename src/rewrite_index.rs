//! # rewrite_index: tidy the `index.rst` that sphinx-apidoc generates
//!
//! apidoc produces a page titled `<package> package` with a visible
//! "Submodules" toctree and a verbose `automodule` block. The rewrite replaces
//! the title, trims the `automodule` options down to an explicit member list
//! and hides the toctree.
//!
//! The input is validated line by line first; anything unexpected is an error
//! and nothing is written.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where the index lives and what it documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexLayout {
    pub index_file: PathBuf,
    /// Module name as apidoc writes it, e.g. `ci_diff_helper`.
    pub package: String,
    /// Replacement page title.
    pub title: String,
}

impl Default for IndexLayout {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from("docs/index.rst"),
            package: "ci_diff_helper".to_string(),
            title: "``ci-diff-helper``".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("unexpected title line: expected exactly one '=' underline at line 1, found {found:?}")]
    TitleLine { found: Vec<usize> },
    #[error("unexpected title content: {0:?}")]
    TitleContent(String),
    #[error("unexpected submodules line: expected two '-' underlines with the first at line 4, found {found:?}")]
    SubmodulesLine { found: Vec<usize> },
    #[error("unexpected submodules header: {0:?}")]
    SubmodulesHeader(Vec<String>),
    #[error("unexpected module header: {0:?}")]
    ModuleHeader(String),
    #[error("unexpected automodule content: {0:?}")]
    AutomoduleContent(Vec<String>),
    #[error("unexpected toctree start: {0:?}")]
    ToctreeStart(Vec<String>),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const TITLE_LINE: usize = 1;
const SUBMODULES_LINE: usize = 4;
const TOCTREE_START: usize = 6;

fn underlined_with(line: &str, ch: char) -> bool {
    !line.is_empty() && line.chars().all(|c| c == ch)
}

fn underline_indices(lines: &[&str], ch: char) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| underlined_with(line, ch))
        .map(|(i, _)| i)
        .collect()
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Rewrite the contents of an apidoc index page.
///
/// `members` is appended to the `:members:` option; pass an empty slice to
/// document every public member.
pub fn rewrite_index(
    contents: &str,
    layout: &IndexLayout,
    members: &[String],
) -> Result<String, RewriteError> {
    let lines: Vec<&str> = contents.split('\n').collect();
    let mut rewritten: Vec<String> = Vec::new();

    let titles = underline_indices(&lines, '=');
    if titles != [TITLE_LINE] {
        return Err(RewriteError::TitleLine { found: titles });
    }
    let expected_title = format!("{} package", layout.package);
    if lines[0] != expected_title {
        return Err(RewriteError::TitleContent(lines[0].to_string()));
    }
    rewritten.push(layout.title.clone());
    rewritten.push("=".repeat(layout.title.chars().count()));

    let sections = underline_indices(&lines, '-');
    let mod_index = match sections.as_slice() {
        [SUBMODULES_LINE, mod_index] => *mod_index,
        _ => return Err(RewriteError::SubmodulesLine { found: sections }),
    };
    let header = &lines[2..TOCTREE_START];
    if header != ["", "Submodules", lines[SUBMODULES_LINE], ""] {
        return Err(RewriteError::SubmodulesHeader(owned(header)));
    }
    if lines[mod_index - 1] != "Module contents" {
        return Err(RewriteError::ModuleHeader(lines[mod_index - 1].to_string()));
    }
    let automodule = format!(".. automodule:: {}", layout.package);
    let expected_tail = [
        "",
        automodule.as_str(),
        "    :members:",
        "    :inherited-members:",
        "    :undoc-members:",
        "    :show-inheritance:",
        "",
    ];
    let tail = &lines[mod_index + 1..];
    if tail != expected_tail {
        return Err(RewriteError::AutomoduleContent(owned(tail)));
    }

    let mut members_option = "    :members:".to_string();
    if !members.is_empty() {
        members_option.push(' ');
        members_option.push_str(&members.join(", "));
    }
    rewritten.extend([String::new(), automodule, members_option, String::new()]);

    // The "Module contents" header sits right after the toctree.
    let toctree_end = (mod_index - 1).max(TOCTREE_START);
    let mut toctree = owned(&lines[TOCTREE_START..toctree_end]);
    if toctree.len() < 2 || toctree[..2] != [".. toctree::", ""] {
        let start = toctree.iter().take(2).cloned().collect();
        return Err(RewriteError::ToctreeStart(start));
    }
    toctree.insert(1, "   :hidden:".to_string());
    rewritten.extend(toctree);

    debug!(lines_in = lines.len(), lines_out = rewritten.len(), "Rewrote index");
    Ok(rewritten.join("\n"))
}

/// Rewrite `path` in place. The file is left untouched if validation fails.
pub fn rewrite_index_file(
    path: &Path,
    layout: &IndexLayout,
    members: &[String],
) -> Result<(), RewriteError> {
    let contents = fs::read_to_string(path).map_err(|source| RewriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rewritten = rewrite_index(&contents, layout, members)?;
    fs::write(path, rewritten).map_err(|source| RewriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), members = members.len(), "Rewrote documentation index");
    Ok(())
}
