use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use quiz_core::model::QuestionSet;

use crate::bank::schema::decode_bank;
use crate::error::BankError;

// Upper bound on the one-shot HTTP fetch; no retry policy lives here.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the question bank comes from. The bank is fetched once per view
/// mount and delivered exactly once.
#[async_trait]
pub trait QuestionBankSource: Send + Sync {
    async fn fetch(&self) -> Result<QuestionSet, BankError>;
}

//
// ─── HTTP ─────────────────────────────────────────────────────────────────────
//

/// Bank served from an HTTP endpoint.
pub struct HttpBankSource {
    client: Client,
    endpoint: Url,
}

impl HttpBankSource {
    /// Build a source with the default fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Http` if the client cannot be constructed.
    pub fn new(endpoint: Url) -> Result<Self, BankError> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QuestionBankSource for HttpBankSource {
    async fn fetch(&self) -> Result<QuestionSet, BankError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        if !response.status().is_success() {
            return Err(BankError::HttpStatus(response.status()));
        }
        let payload = response.text().await?;
        decode_bank(&payload)
    }
}

//
// ─── FILE ─────────────────────────────────────────────────────────────────────
//

/// Bank read from a local JSON file.
pub struct FileBankSource {
    path: PathBuf,
}

impl FileBankSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionBankSource for FileBankSource {
    async fn fetch(&self) -> Result<QuestionSet, BankError> {
        let payload = std::fs::read_to_string(&self.path)?;
        decode_bank(&payload)
    }
}

//
// ─── STATIC ───────────────────────────────────────────────────────────────────
//

/// In-memory source for tests and demos.
#[derive(Clone)]
pub struct StaticBankSource {
    questions: QuestionSet,
}

impl StaticBankSource {
    #[must_use]
    pub fn new(questions: QuestionSet) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionBankSource for StaticBankSource {
    async fn fetch(&self) -> Result<QuestionSet, BankError> {
        Ok(self.questions.clone())
    }
}
