use chrono::Utc;

use crate::config::AccountConfig;
use crate::error::{FeedError, Result};
use crate::http::{build_agent, get_text, post_form};

const LOGIN_PATH: &str = "login";
const SWITCH_PROFILE_PATH: &str = "SwitchProfile";
const VIEWING_ACTIVITY_PATH: &str = "api/shakti/va61a784d/viewingactivitycsv";
const LOGIN_FIELDS: &str = "rememberMe,nextPage,userLoginId,password,countryCode,countryIsoCode";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Source of raw viewing-activity exports.
pub trait HistoryProvider {
    type Session;

    fn authenticate(&self, credentials: &Credentials) -> Result<Self::Session>;

    fn select_profile(&self, session: &Self::Session, profile_token: &str) -> Result<()>;

    fn fetch_history(&self, session: &Self::Session, account_id: &str) -> Result<String>;
}

/// Log in, switch to the configured profile and download the CSV export.
pub fn download_snapshot<P: HistoryProvider>(
    provider: &P,
    account: &AccountConfig,
) -> Result<String> {
    let credentials = Credentials {
        email: account.email.clone(),
        password: account.password.clone(),
    };
    let session = provider.authenticate(&credentials)?;
    provider.select_profile(&session, &account.profile_token)?;
    provider.fetch_history(&session, &account.user_guid)
}

pub struct NetflixProvider {
    base_url: String,
    auth_token: Option<String>,
}

impl NetflixProvider {
    pub fn new(base_url: &str, auth_token: Option<String>) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            auth_token,
        }
    }

    pub fn from_account(account: &AccountConfig) -> Self {
        Self::new(account.provider_url(), account.auth_token.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl HistoryProvider for NetflixProvider {
    // Cookie-carrying agent; login state lives in its jar.
    type Session = ureq::Agent;

    fn authenticate(&self, credentials: &Credentials) -> Result<ureq::Agent> {
        let agent = build_agent();
        let form = [
            ("userLoginId", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("rememberMe", "true"),
            ("flow", "websiteSignUp"),
            ("mode", "login"),
            ("action", "loginAction"),
            ("withFields", LOGIN_FIELDS),
            ("countryCode", "+1"),
            ("countryIsoCode", "US"),
        ];
        post_form(&agent, &self.url(LOGIN_PATH), &form)
            .map_err(|err| FeedError::Auth(format!("could not login: {err}")))?;
        Ok(agent)
    }

    fn select_profile(&self, session: &ureq::Agent, profile_token: &str) -> Result<()> {
        get_text(session, &self.url(SWITCH_PROFILE_PATH), &[("tkn", profile_token)])
            .map_err(|err| FeedError::Auth(format!("could not set profile: {err}")))?;
        Ok(())
    }

    fn fetch_history(&self, session: &ureq::Agent, account_id: &str) -> Result<String> {
        let cache_buster = Utc::now().timestamp_millis().to_string();
        let mut query = vec![("guid", account_id), ("_", cache_buster.as_str())];
        if let Some(token) = self.auth_token.as_deref() {
            query.push(("authURL", token));
        }
        get_text(session, &self.url(VIEWING_ACTIVITY_PATH), &query)
            .map_err(|err| FeedError::Fetch(format!("could not get csv: {err}")))
    }
}
