use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::asset::{AssetKind, AssetRef};
use crate::checker::{
    AssetCheckResult, AssetChecker, CheckOutcome, CheckResultType, RepairStatus,
};
use crate::error::CheckerError;

use super::LINE_ENDINGS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEndingsOptions {
    /// Asset kinds treated as text.
    #[serde(default = "default_kinds")]
    pub kinds: Vec<AssetKind>,
}

impl Default for LineEndingsOptions {
    fn default() -> Self {
        Self {
            kinds: default_kinds(),
        }
    }
}

fn default_kinds() -> Vec<AssetKind> {
    vec![AssetKind::Script, AssetKind::Shader, AssetKind::Text]
}

/// Issues are listed in the order repairs fix them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormattingIssue {
    CrlfLineEndings,
    MissingFinalNewline,
}

impl FormattingIssue {
    const fn id(self) -> &'static str {
        match self {
            Self::CrlfLineEndings => "crlf",
            Self::MissingFinalNewline => "missing-final-newline",
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::CrlfLineEndings => "File uses CRLF line endings",
            Self::MissingFinalNewline => "File does not end with a newline",
        }
    }

    fn fix(self, text: &str) -> String {
        match self {
            Self::CrlfLineEndings => text.replace("\r\n", "\n"),
            Self::MissingFinalNewline => format!("{text}\n"),
        }
    }
}

fn detect(text: &str) -> Vec<FormattingIssue> {
    let mut issues = Vec::new();
    if text.contains("\r\n") {
        issues.push(FormattingIssue::CrlfLineEndings);
    }
    if !text.is_empty() && !text.ends_with('\n') {
        issues.push(FormattingIssue::MissingFinalNewline);
    }
    issues
}

/// Flags CRLF line endings and missing final newlines.
///
/// Each repair call fixes one issue, so an asset with both issues needs two
/// repairs and the first one reports [`RepairStatus::Partial`].
pub struct LineEndingsChecker {
    root: PathBuf,
    options: LineEndingsOptions,
}

impl LineEndingsChecker {
    #[must_use]
    pub fn new(root: &Path, options: LineEndingsOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
        }
    }

    fn applies_to(&self, asset: &AssetRef) -> bool {
        asset.is_project_asset() && self.options.kinds.contains(&asset.kind())
    }

    fn read(&self, asset: &AssetRef) -> Result<(PathBuf, String), CheckerError> {
        let path = super::project_file(&self.root, asset)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok((path, text)),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(CheckerError::InvalidAsset(
                format!("{} is not valid UTF-8 text", asset.path()),
            )),
            Err(source) => Err(CheckerError::Io { path, source }),
        }
    }

    fn describe(result: &mut AssetCheckResult, issues: &[FormattingIssue]) {
        result.title = match issues {
            [single] => single.describe().to_string(),
            _ => format!("{} formatting issues", issues.len()),
        };
        result.details = issues
            .iter()
            .map(|issue| format!("- {}", issue.describe()))
            .collect::<Vec<_>>()
            .join("\n");
        result.custom_view_id = Some(LINE_ENDINGS.to_string());
        result.custom_data = Some(json!({
            "issues": issues.iter().map(|issue| issue.id()).collect::<Vec<_>>(),
        }));
    }
}

impl AssetChecker for LineEndingsChecker {
    fn name(&self) -> &str {
        LINE_ENDINGS
    }

    fn check_asset(&self, asset: &AssetRef) -> CheckOutcome {
        if !self.applies_to(asset) {
            return Ok(None);
        }

        let (_, text) = self.read(asset)?;
        let issues = detect(&text);
        if issues.is_empty() {
            return Ok(None);
        }

        let mut result = AssetCheckResult::new(CheckResultType::Warning, String::new())
            .with_categories(["Formatting"])
            .with_asset(asset.clone())
            .repairable(true);
        Self::describe(&mut result, &issues);
        Ok(Some(result))
    }

    fn repair_asset(&self, result: &mut AssetCheckResult) -> Result<RepairStatus, CheckerError> {
        let asset = result
            .asset
            .clone()
            .ok_or_else(|| CheckerError::InvalidAsset("result has no asset".to_string()))?;
        let (path, text) = self.read(&asset)?;

        let Some(first) = detect(&text).first().copied() else {
            return Ok(RepairStatus::AllRepaired);
        };
        let fixed = first.fix(&text);
        fs::write(&path, &fixed).map_err(|source| CheckerError::Io {
            path: path.clone(),
            source,
        })?;

        let remaining = detect(&fixed);
        if remaining.is_empty() {
            return Ok(RepairStatus::AllRepaired);
        }
        Self::describe(result, &remaining);
        Ok(RepairStatus::Partial)
    }
}

#[cfg(test)]
#[path = "line_endings_tests.rs"]
mod tests;
