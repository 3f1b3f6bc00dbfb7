use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionRow {
    pub(crate) id: String,
    pub(crate) question_en: String,
    pub(crate) question_ar: String,
    pub(crate) mbti: String,
    pub(crate) holland: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonalityRow {
    pub(crate) id: String,
    pub(crate) code: String,
    pub(crate) english_description: String,
    pub(crate) arabic_description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountRow {
    pub(crate) id: String,
    pub(crate) user_name: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) role: String,
    #[serde(default)]
    pub(crate) verified: Option<bool>,
}

/// Deserialize every data row, pairing it with the file line the record starts on.
pub(crate) fn parse_rows<T, R>(reader: R) -> Result<Vec<(usize, T)>, csv::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |position| position.line() as usize);
        rows.push((line, record.deserialize(Some(&headers))?));
    }

    Ok(rows)
}
