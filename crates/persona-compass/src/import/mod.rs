//! CSV seeding for the question, personality, and account catalogs.

mod parser;

use crate::access::{Role, UserId};
use crate::accounts::UserAccount;
use crate::assessment::{
    HollandAttribute, MbtiAttribute, PersonalityCode, Question, QuestionDraft, QuestionId,
};
use crate::personalities::{PersonalityDescription, PersonalityId};
use parser::{AccountRow, PersonalityRow, QuestionRow};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            ImportError::InvalidRow { line, reason } => {
                write!(f, "invalid catalog row on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

fn invalid(line: usize, reason: impl ToString) -> ImportError {
    ImportError::InvalidRow {
        line,
        reason: reason.to_string(),
    }
}

fn required(line: usize, field: &str, value: String) -> Result<String, ImportError> {
    if value.is_empty() {
        Err(invalid(line, format!("{field} is empty")))
    } else {
        Ok(value)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn questions_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::questions_from_reader(file)
    }

    /// Columns: `id,question_en,question_ar,mbti,holland`.
    pub fn questions_from_reader<R: Read>(reader: R) -> Result<Vec<Question>, ImportError> {
        parser::parse_rows::<QuestionRow, _>(reader)?
            .into_iter()
            .map(|(line, row)| {
                let id = required(line, "id", row.id)?;
                let draft = QuestionDraft {
                    question_en: row.question_en,
                    question_ar: row.question_ar,
                    mbti_attribute: row
                        .mbti
                        .parse::<MbtiAttribute>()
                        .map_err(|err| invalid(line, err))?,
                    holland_attribute: row
                        .holland
                        .parse::<HollandAttribute>()
                        .map_err(|err| invalid(line, err))?,
                };
                let draft = draft.normalized().map_err(|err| invalid(line, err))?;
                Ok(draft.into_question(QuestionId(id)))
            })
            .collect()
    }

    pub fn personalities_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<PersonalityDescription>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::personalities_from_reader(file)
    }

    /// Columns: `id,code,english_description,arabic_description`. Codes are stored in
    /// canonical form, so `ris+entj` becomes `IRS+ENTJ`.
    pub fn personalities_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<PersonalityDescription>, ImportError> {
        parser::parse_rows::<PersonalityRow, _>(reader)?
            .into_iter()
            .map(|(line, row)| {
                let code: PersonalityCode = row.code.parse().map_err(|err| invalid(line, err))?;
                Ok(PersonalityDescription {
                    id: PersonalityId(required(line, "id", row.id)?),
                    code: code.to_string(),
                    english_description: required(
                        line,
                        "english_description",
                        row.english_description,
                    )?,
                    arabic_description: required(
                        line,
                        "arabic_description",
                        row.arabic_description,
                    )?,
                    tags: Vec::new(),
                })
            })
            .collect()
    }

    pub fn accounts_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<UserAccount>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::accounts_from_reader(file)
    }

    /// Columns: `id,user_name,first_name,last_name,email,role,verified`; a blank
    /// `verified` means unverified.
    pub fn accounts_from_reader<R: Read>(reader: R) -> Result<Vec<UserAccount>, ImportError> {
        parser::parse_rows::<AccountRow, _>(reader)?
            .into_iter()
            .map(|(line, row)| {
                let role: Role = row.role.parse().map_err(|err| invalid(line, err))?;
                Ok(UserAccount {
                    id: UserId(required(line, "id", row.id)?),
                    user_name: required(line, "user_name", row.user_name)?,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    email: required(line, "email", row.email)?,
                    role,
                    verified: row.verified.unwrap_or(false),
                })
            })
            .collect()
    }
}
