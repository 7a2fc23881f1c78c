//! Review status catalog and notification text

use std::fmt;
use std::str::FromStr;

use crate::response::HomeworkRecord;

/// Review status of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Status code used by the review API
    pub fn code(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Verdict appended to the notification
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HomeworkStatus {
    type Err = crate::NotifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| crate::NotifierError::UnknownStatus(s.to_string()))
    }
}

/// Render the status-change notification for one homework record
pub fn parse_status(record: &HomeworkRecord) -> crate::Result<String> {
    let name = record.homework_name.as_deref().ok_or_else(|| {
        crate::NotifierError::Schema("homework record has no `homework_name`".to_string())
    })?;
    let code = record
        .status
        .as_deref()
        .ok_or_else(|| crate::NotifierError::Schema("homework record has no `status`".to_string()))?;

    let status: HomeworkStatus = code.parse()?;
    tracing::debug!("Homework '{}' has status {}", name, status);

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
