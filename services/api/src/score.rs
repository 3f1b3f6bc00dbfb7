use crate::infra::Stores;
use clap::Args;
use persona_compass::access::UserId;
use persona_compass::assessment::{
    Answer, AssessmentService, CalculateRequest, HollandAttribute, MbtiAttribute,
    ScoredQuestionnaire,
};
use persona_compass::config::CatalogConfig;
use persona_compass::error::AppError;
use persona_compass::personalities::Language;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Question catalog CSV (id,question_en,question_ar,mbti,holland)
    #[arg(long)]
    pub(crate) questions: PathBuf,
    /// Personality catalog CSV (id,code,english_description,arabic_description)
    #[arg(long)]
    pub(crate) personalities: PathBuf,
    /// JSON file shaped like the calculate request: {"answers": [...]}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print the Arabic description instead of the English one
    #[arg(long)]
    pub(crate) arabic: bool,
}

const LOCAL_USER: &str = "local-cli";

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let stores = Stores::seeded(&CatalogConfig {
        questions_csv: Some(args.questions),
        personalities_csv: Some(args.personalities),
        accounts_csv: None,
    })?;

    let reader = BufReader::new(File::open(&args.answers)?);
    let request: CalculateRequest = serde_json::from_reader(reader)?;

    let report = build_report(&stores, &request.answers)?;
    let language = if args.arabic {
        Language::Ar
    } else {
        Language::En
    };
    print!("{}", render_report(&report, language));
    Ok(())
}

pub(crate) fn build_report(
    stores: &Stores,
    answers: &[Answer],
) -> Result<ScoredQuestionnaire, AppError> {
    let service = AssessmentService::new(
        stores.questions.clone(),
        stores.personalities.clone(),
        stores.results.clone(),
    );
    Ok(service.score_questionnaire(&UserId(LOCAL_USER.to_string()), answers)?)
}

pub(crate) fn render_report(report: &ScoredQuestionnaire, language: Language) -> String {
    let mbti = MbtiAttribute::ALL
        .iter()
        .map(|letter| format!("{letter} {}", report.sheet.mbti.get(*letter)))
        .collect::<Vec<_>>()
        .join(" | ");
    let holland = HollandAttribute::ALL
        .iter()
        .map(|letter| format!("{letter} {}", report.sheet.holland.get(*letter)))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "Personality code: {}\nMBTI totals: {mbti}\nHolland totals: {holland}\n\n{}\n",
        report.personality.code,
        report.personality.description(language),
    )
}
