use metrics_exporter_prometheus::PrometheusHandle;
use persona_compass::access::{Role, UserId};
use persona_compass::accounts::{AccountDirectory, RoleChange, UserAccount};
use persona_compass::assessment::{Question, QuestionCatalog, QuestionId, ResultStore, UserResult};
use persona_compass::community::{Comment, CommentId, CommentStore};
use persona_compass::config::CatalogConfig;
use persona_compass::error::AppError;
use persona_compass::import::CatalogImporter;
use persona_compass::personalities::{
    PersonalityCatalog, PersonalityDescription, PersonalityId, Tag, TagId,
};
use persona_compass::repository::RepositoryError;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryQuestionCatalog {
    records: Arc<Mutex<Vec<Question>>>,
}

impl QuestionCatalog for InMemoryQuestionCatalog {
    fn list(&self) -> Result<Vec<Question>, RepositoryError> {
        let guard = self.records.lock().expect("question mutex poisoned");
        Ok(guard.clone())
    }

    fn insert(&self, question: Question) -> Result<Question, RepositoryError> {
        let mut guard = self.records.lock().expect("question mutex poisoned");
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
        let mut guard = self.records.lock().expect("question mutex poisoned");
        if guard.iter().any(|existing| {
            existing.id != question.id
                && (existing.question_en == question.question_en
                    || existing.question_ar == question.question_ar)
        }) {
            return Err(RepositoryError::Conflict);
        }
        match guard.iter_mut().find(|existing| existing.id == question.id) {
            Some(slot) => {
                *slot = question;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn remove(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError> {
        let mut guard = self.records.lock().expect("question mutex poisoned");
        let position = guard.iter().position(|question| &question.id == id);
        Ok(position.map(|index| guard.remove(index)))
    }
}

#[derive(Default)]
struct PersonalityRecords {
    personalities: BTreeMap<PersonalityId, PersonalityDescription>,
    tags: Vec<Tag>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPersonalityCatalog {
    records: Arc<Mutex<PersonalityRecords>>,
}

impl PersonalityCatalog for InMemoryPersonalityCatalog {
    fn find_by_code(&self, code: &str) -> Result<Option<PersonalityDescription>, RepositoryError> {
        let guard = self.records.lock().expect("personality mutex poisoned");
        Ok(guard
            .personalities
            .values()
            .find(|personality| personality.code == code)
            .cloned())
    }

    fn find_by_id(
        &self,
        id: &PersonalityId,
    ) -> Result<Option<PersonalityDescription>, RepositoryError> {
        let guard = self.records.lock().expect("personality mutex poisoned");
        Ok(guard.personalities.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<PersonalityDescription>, RepositoryError> {
        let guard = self.records.lock().expect("personality mutex poisoned");
        let mut personalities: Vec<_> = guard.personalities.values().cloned().collect();
        personalities.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(personalities)
    }

    fn insert(
        &self,
        personality: PersonalityDescription,
    ) -> Result<PersonalityDescription, RepositoryError> {
        let mut guard = self.records.lock().expect("personality mutex poisoned");
        if guard.personalities.contains_key(&personality.id)
            || guard
                .personalities
                .values()
                .any(|existing| existing.code == personality.code)
        {
            return Err(RepositoryError::Conflict);
        }
        guard
            .personalities
            .insert(personality.id.clone(), personality.clone());
        Ok(personality)
    }

    fn update(&self, personality: PersonalityDescription) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("personality mutex poisoned");
        match guard.personalities.get_mut(&personality.id) {
            Some(slot) => {
                *slot = personality;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let guard = self.records.lock().expect("personality mutex poisoned");
        Ok(guard.tags.clone())
    }

    fn find_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        let guard = self.records.lock().expect("personality mutex poisoned");
        Ok(guard.tags.iter().find(|tag| &tag.id == id).cloned())
    }

    fn insert_tag(&self, tag: Tag) -> Result<Tag, RepositoryError> {
        let mut guard = self.records.lock().expect("personality mutex poisoned");
        if guard
            .tags
            .iter()
            .any(|existing| existing.id == tag.id || existing.name == tag.name)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.tags.push(tag.clone());
        Ok(tag)
    }

    fn remove_tag(&self, id: &TagId) -> Result<Option<Tag>, RepositoryError> {
        let mut guard = self.records.lock().expect("personality mutex poisoned");
        let Some(position) = guard.tags.iter().position(|tag| &tag.id == id) else {
            return Ok(None);
        };
        let removed = guard.tags.remove(position);
        for personality in guard.personalities.values_mut() {
            personality.tags.retain(|tag| tag != id);
        }
        Ok(Some(removed))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryResultStore {
    records: Arc<Mutex<HashMap<UserId, UserResult>>>,
}

impl ResultStore for InMemoryResultStore {
    fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserResult>, RepositoryError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard.get(user_id).cloned())
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
        let mut guard = self.records.lock().expect("result mutex poisoned");
        guard.insert(user_id.clone(), result.clone());
        Ok(result)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCommentStore {
    records: Arc<Mutex<BTreeMap<CommentId, Comment>>>,
}

impl CommentStore for InMemoryCommentStore {
    fn insert(&self, comment: Comment) -> Result<Comment, RepositoryError> {
        let mut guard = self.records.lock().expect("comment mutex poisoned");
        if guard.contains_key(&comment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    fn update(&self, comment: Comment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("comment mutex poisoned");
        match guard.get_mut(&comment.id) {
            Some(slot) => {
                *slot = comment;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn find(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("comment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let mut guard = self.records.lock().expect("comment mutex poisoned");
        Ok(guard.remove(id))
    }

    fn list(&self, author: Option<&UserId>) -> Result<Vec<Comment>, RepositoryError> {
        let guard = self.records.lock().expect("comment mutex poisoned");
        Ok(guard
            .values()
            .filter(|comment| author.map_or(true, |author| &comment.created_by == author))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAccountDirectory {
    records: Arc<Mutex<HashMap<UserId, UserAccount>>>,
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn insert(&self, account: UserAccount) -> Result<UserAccount, RepositoryError> {
        let mut guard = self.records.lock().expect("account mutex poisoned");
        if guard.contains_key(&account.id)
            || guard
                .values()
                .any(|existing| existing.user_name == account.user_name)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn find(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("account mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("account mutex poisoned");
        let mut accounts: Vec<_> = guard.values().cloned().collect();
        accounts.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(accounts)
    }

    fn find_by_role(&self, role: Role) -> Result<Vec<UserAccount>, RepositoryError> {
        let guard = self.records.lock().expect("account mutex poisoned");
        Ok(guard
            .values()
            .filter(|account| account.role == role)
            .cloned()
            .collect())
    }

    fn apply_role_changes(&self, changes: &[RoleChange]) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("account mutex poisoned");
        if changes
            .iter()
            .any(|change| !guard.contains_key(&change.user_id))
        {
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

/// Backing stores shared by every router.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) questions: Arc<InMemoryQuestionCatalog>,
    pub(crate) personalities: Arc<InMemoryPersonalityCatalog>,
    pub(crate) results: Arc<InMemoryResultStore>,
    pub(crate) comments: Arc<InMemoryCommentStore>,
    pub(crate) accounts: Arc<InMemoryAccountDirectory>,
}

impl Stores {
    /// Load every configured CSV export; catalogs without a path start empty.
    pub(crate) fn seeded(catalog: &CatalogConfig) -> Result<Self, AppError> {
        let stores = Self::default();

        if let Some(path) = &catalog.questions_csv {
            let questions = CatalogImporter::questions_from_path(path)?;
            let count = questions.len();
            for question in questions {
                stores.questions.insert(question)?;
            }
            info!(path = %path.display(), count, "question catalog seeded");
        }

        if let Some(path) = &catalog.personalities_csv {
            let personalities = CatalogImporter::personalities_from_path(path)?;
            let count = personalities.len();
            for personality in personalities {
                stores.personalities.insert(personality)?;
            }
            info!(path = %path.display(), count, "personality catalog seeded");
        }

        if let Some(path) = &catalog.accounts_csv {
            let accounts = CatalogImporter::accounts_from_path(path)?;
            let count = accounts.len();
            for account in accounts {
                stores.accounts.insert(account)?;
            }
            info!(path = %path.display(), count, "account directory seeded");
        }

        Ok(stores)
    }
}
