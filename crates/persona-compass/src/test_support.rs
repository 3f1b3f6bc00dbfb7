use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::access::{Role, UserId, USER_ID_HEADER, USER_ROLE_HEADER, USER_VERIFIED_HEADER};
use crate::accounts::{AccountDirectory, RoleChange, UserAccount};
use crate::assessment::{
    Answer, HollandAttribute, MbtiAttribute, Question, QuestionCatalog, QuestionId, ResultStore,
    UserResult,
};
use crate::community::{Comment, CommentId, CommentStore};
use crate::personalities::{PersonalityCatalog, PersonalityDescription, PersonalityId, Tag, TagId};
use crate::repository::RepositoryError;

pub(crate) fn question(id: &str, mbti: MbtiAttribute, holland: HollandAttribute) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        question_en: format!("English prompt for {id}"),
        question_ar: format!("سؤال تجريبي رقم {id}"),
        mbti_attribute: mbti,
        holland_attribute: holland,
    }
}

/// One question per MBTI letter, spread over the Holland categories.
pub(crate) fn questions() -> Vec<Question> {
    use HollandAttribute as H;
    use MbtiAttribute as M;
    vec![
        question("q-e", M::Extraversion, H::Realistic),
        question("q-i", M::Introversion, H::Investigative),
        question("q-s", M::Sensing, H::Artistic),
        question("q-n", M::Intuition, H::Social),
        question("q-t", M::Thinking, H::Enterprising),
        question("q-f", M::Feeling, H::Conventional),
        question("q-j", M::Judging, H::Realistic),
        question("q-p", M::Perceiving, H::Social),
    ]
}

pub(crate) fn answer(id: &str, value: f64) -> Answer {
    Answer {
        question_id: QuestionId(id.to_string()),
        value,
    }
}

/// Resolves to `ERS+ENTJ`: R=8, S=7, E=4 and a J/P tie.
pub(crate) fn entj_answers() -> Vec<Answer> {
    vec![
        answer("q-e", 5.0),
        answer("q-i", 1.0),
        answer("q-s", 1.0),
        answer("q-n", 4.0),
        answer("q-t", 4.0),
        answer("q-f", 2.0),
        answer("q-j", 3.0),
        answer("q-p", 3.0),
    ]
}

pub(crate) fn personality(id: &str, code: &str) -> PersonalityDescription {
    PersonalityDescription {
        id: PersonalityId(id.to_string()),
        code: code.to_string(),
        english_description: format!("English description for {code}"),
        arabic_description: format!("الوصف العربي لـ {code}"),
        tags: Vec::new(),
    }
}

pub(crate) fn personalities() -> Vec<PersonalityDescription> {
    vec![
        personality("p-ers-entj", "ERS+ENTJ"),
        personality("p-air-estj", "AIR+ESTJ"),
        personality("p-cir-infp", "CIR+INFP"),
    ]
}

pub(crate) fn account(id: &str, user_name: &str, role: Role) -> UserAccount {
    UserAccount {
        id: UserId(id.to_string()),
        user_name: user_name.to_string(),
        first_name: "Test".to_string(),
        last_name: "Account".to_string(),
        email: format!("{user_name}@example.com"),
        role,
        verified: true,
    }
}

pub(crate) fn accounts() -> Vec<UserAccount> {
    vec![
        account("u-root", "rana", Role::SuperAdmin),
        account("u-admin", "omar", Role::Admin),
        account("u-1", "layla", Role::User),
        account("u-2", "layth", Role::User),
    ]
}

pub(crate) fn request(
    method: Method,
    uri: &str,
    identity: Option<(&str, Role, bool)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some((user_id, role, verified)) = identity {
        builder = builder
            .header(USER_ID_HEADER, user_id)
            .header(USER_ROLE_HEADER, role.label())
            .header(
                USER_VERIFIED_HEADER,
                if verified { "true" } else { "false" },
            );
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("json body")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default, Clone)]
pub(crate) struct MemoryQuestions {
    records: Arc<Mutex<Vec<Question>>>,
}

impl MemoryQuestions {
    pub(crate) fn with(questions: Vec<Question>) -> Self {
        Self {
            records: Arc::new(Mutex::new(questions)),
        }
    }
}

impl QuestionCatalog for MemoryQuestions {
    fn list(&self) -> Result<Vec<Question>, RepositoryError> {
        Ok(self.records.lock().expect("lock").clone())
    }

    fn insert(&self, question: Question) -> Result<Question, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.iter().any(|existing| {
            existing.id == question.id
                || existing.question_en == question.question_en
                || existing.question_ar == question.question_ar
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(question.clone());
        Ok(question)
    }

    fn update(&self, question: Question) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        match guard.iter_mut().find(|existing| existing.id == question.id) {
            Some(slot) => {
                *slot = question;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        let position = guard.iter().position(|question| &question.id == id);
        Ok(position.map(|index| guard.remove(index)))
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryPersonalities {
    records: Arc<Mutex<BTreeMap<PersonalityId, PersonalityDescription>>>,
    tags: Arc<Mutex<Vec<Tag>>>,
}

impl MemoryPersonalities {
    pub(crate) fn with(personalities: Vec<PersonalityDescription>) -> Self {
        let records = personalities
            .into_iter()
            .map(|personality| (personality.id.clone(), personality))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
            tags: Arc::default(),
        }
    }
}

impl PersonalityCatalog for MemoryPersonalities {
    fn find_by_code(&self, code: &str) -> Result<Option<PersonalityDescription>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.values().find(|p| p.code == code).cloned())
    }

    fn find_by_id(
        &self,
        id: &PersonalityId,
    ) -> Result<Option<PersonalityDescription>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PersonalityDescription>, RepositoryError> {
        let mut all: Vec<_> = self.records.lock().expect("lock").values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    fn insert(
        &self,
        personality: PersonalityDescription,
    ) -> Result<PersonalityDescription, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&personality.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(personality.id.clone(), personality.clone());
        Ok(personality)
    }

    fn update(&self, personality: PersonalityDescription) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        match guard.get_mut(&personality.id) {
            Some(slot) => {
                *slot = personality;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        Ok(self.tags.lock().expect("lock").clone())
    }

    fn find_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        let guard = self.tags.lock().expect("lock");
        Ok(guard.iter().find(|tag| &tag.id == id).cloned())
    }

    fn insert_tag(&self, tag: Tag) -> Result<Tag, RepositoryError> {
        let mut guard = self.tags.lock().expect("lock");
        if guard.iter().any(|existing| existing.name == tag.name) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(tag.clone());
        Ok(tag)
    }

    fn remove_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        let mut tags = self.tags.lock().expect("lock");
        let mut records = self.records.lock().expect("lock");
        let removed = tags
            .iter()
            .position(|tag| &tag.id == id)
            .map(|index| tags.remove(index));
        if removed.is_some() {
            for personality in records.values_mut() {
                personality.tags.retain(|tag| tag != id);
            }
        }
        Ok(removed)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryResults {
    records: Arc<Mutex<HashMap<UserId, UserResult>>>,
}

impl MemoryResults {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl ResultStore for MemoryResults {
    fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserResult>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(user_id).cloned())
    }

    fn upsert(
        &self,
        user_id: &UserId,
        personality_id: &PersonalityId,
    ) -> Result<UserResult, RepositoryError> {
        let result = UserResult {
            user_id: user_id.clone(),
            personality_id: personality_id.clone(),
        };
        self.records
            .lock()
            .expect("lock")
            .insert(user_id.clone(), result.clone());
        Ok(result)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryComments {
    records: Arc<Mutex<Vec<Comment>>>,
}

impl MemoryComments {
    pub(crate) fn with(comments: Vec<Comment>) -> Self {
        Self {
            records: Arc::new(Mutex::new(comments)),
        }
    }
}

impl CommentStore for MemoryComments {
    fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError> {
        self.records.lock().expect("lock").push(comment.clone());
        Ok(comment)
    }

    fn update(&self, comment: Comment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        match guard.iter_mut().find(|existing| existing.id == comment.id) {
            Some(slot) => {
                *slot = comment;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn find(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.iter().find(|comment| &comment.id == id).cloned())
    }

    fn remove(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        let position = guard.iter().position(|comment| &comment.id == id);
        Ok(position.map(|index| guard.remove(index)))
    }

    fn list(&self, author: Option<&UserId>) -> Result<Vec<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .iter()
            .filter(|comment| author.map_or(true, |author| &comment.created_by == author))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryAccounts {
    records: Arc<Mutex<BTreeMap<UserId, UserAccount>>>,
}

impl MemoryAccounts {
    pub(crate) fn with(accounts: Vec<UserAccount>) -> Self {
        let records = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl AccountDirectory for MemoryAccounts {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&account.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn find(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn list(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        let mut all: Vec<_> = self.records.lock().expect("lock").values().cloned().collect();
        all.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(all)
    }

    fn find_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.values().filter(|a| a.role == role).cloned().collect())
    }

    fn apply_role_changes(&self, changes: &[RoleChange]) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if changes.iter().any(|change| !guard.contains_key(&change.user_id)) {
            return Err(RepositoryError::NotFound);
        }
        for change in changes {
            if let Some(account) = guard.get_mut(&change.user_id) {
                account.role = change.role;
            }
        }
        Ok(())
    }
}

/// Every storage call fails, for exercising the 500 paths.
#[derive(Default, Clone, Copy)]
pub(crate) struct UnavailableStore;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("store offline".to_string()))
}

impl QuestionCatalog for UnavailableStore {
    fn list(&self) -> Result<Vec<Question>, RepositoryError> {
        unavailable()
    }

    fn insert(&self, _question: Question) -> Result<Question, RepositoryError> {
        unavailable()
    }

    fn update(&self, _question: Question) -> Result<(), RepositoryError> {
        unavailable()
    }

    fn remove(&self, _id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        unavailable()
    }
}

impl ResultStore for UnavailableStore {
    fn find_by_user(&self, _user_id: &UserId) -> Result<Option<UserResult>, RepositoryError> {
        unavailable()
    }

    fn upsert(
        &self,
        _user_id: &UserId,
        _personality_id: &PersonalityId,
    ) -> Result<UserResult, RepositoryError> {
        unavailable()
    }
}
